//! Authority-precedence merge for preference bootstrap.
//!
//! The value rendered on first paint must equal the value a later
//! hydration would compute, so the merge is a pure function over the
//! inbound cookie set: profile-cached value first, then the user-chosen
//! persisted value, then the default. Unparseable values at any level
//! fall through to the next.

use std::str::FromStr;

use super::types::{Currency, Locale};
use super::{CURRENCY_KEY, LOCALE_KEY, PROFILE_CURRENCY_KEY, PROFILE_LOCALE_KEY};

/// Merge one preference according to authority precedence.
///
/// `profile` is the profile-cached value, `persisted` the user-chosen
/// one. A value that fails to parse is treated as absent.
pub fn resolve<T>(profile: Option<&str>, persisted: Option<&str>, default: T) -> T
where
    T: FromStr + Copy,
{
    profile
        .and_then(|v| v.parse().ok())
        .or_else(|| persisted.and_then(|v| v.parse().ok()))
        .unwrap_or(default)
}

/// Bootstrap the locale from an inbound cookie set.
pub fn bootstrap_locale<F>(cookie: F, default: Locale) -> Locale
where
    F: Fn(&str) -> Option<String>,
{
    resolve(
        cookie(PROFILE_LOCALE_KEY).as_deref(),
        cookie(LOCALE_KEY).as_deref(),
        default,
    )
}

/// Bootstrap the currency from an inbound cookie set.
pub fn bootstrap_currency<F>(cookie: F, default: Currency) -> Currency
where
    F: Fn(&str) -> Option<String>,
{
    resolve(
        cookie(PROFILE_CURRENCY_KEY).as_deref(),
        cookie(CURRENCY_KEY).as_deref(),
        default,
    )
}
