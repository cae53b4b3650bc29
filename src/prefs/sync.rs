//! Preference synchronization state machine.
//!
//! # Responsibilities
//! - Hold the current locale/currency selection for rendering
//! - Write-through persistence: storage and cookies before held state
//! - One-way sync from the authenticated profile without feedback loops
//! - Last-write-wins across out-of-order persistence responses
//!
//! # Design Decisions
//! - Each preference is a single-writer last-value cell (`ArcSwap`)
//!   tagged with a monotonically increasing epoch. The epoch is the
//!   explicit form of the original UI's side-channel ref: a profile
//!   response is compared against the latest user selection, never
//!   against a value captured when the request was dispatched.
//! - A profile value is applied only when it parses, the cell has not
//!   moved since the response's ticket was taken, and it differs from
//!   the held value. Equal values trigger no writes at all.
//! - User changes commit locally first; remote reconciliation is
//!   best-effort and never rolls the local value back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use super::merge;
use super::store::KeyValueStore;
use super::types::{Currency, Locale};
use super::{
    CURRENCY_KEY, LOCALE_KEY, PROFILE_CURRENCY_KEY, PROFILE_LOCALE_KEY,
};

/// One preference selection plus the epoch of the action that set it.
#[derive(Debug, Clone, Copy)]
struct Selection<T> {
    value: T,
    epoch: u64,
}

/// Snapshot of both preference epochs, taken when a profile fetch or
/// update is dispatched. A response is stale for a preference whose
/// cell has moved past the ticket.
#[derive(Debug, Clone, Copy)]
pub struct SyncTicket {
    locale_epoch: u64,
    currency_epoch: u64,
}

/// Client-held locale and currency state.
pub struct PreferenceSync {
    locale: ArcSwap<Selection<Locale>>,
    currency: ArcSwap<Selection<Currency>>,
    epochs: AtomicU64,
    durable: Arc<dyn KeyValueStore>,
    cookies: Arc<dyn KeyValueStore>,
}

impl PreferenceSync {
    /// Bootstrap held state from the inbound cookie set.
    ///
    /// Synchronous by construction: the value used for the first render
    /// is the value any later read would compute, so there is no
    /// loading gap and no flicker.
    pub fn bootstrap(
        durable: Arc<dyn KeyValueStore>,
        cookies: Arc<dyn KeyValueStore>,
        default_locale: Locale,
        default_currency: Currency,
    ) -> Self {
        let locale = merge::bootstrap_locale(|key| cookies.get(key), default_locale);
        let currency = merge::bootstrap_currency(|key| cookies.get(key), default_currency);

        Self {
            locale: ArcSwap::from_pointee(Selection { value: locale, epoch: 0 }),
            currency: ArcSwap::from_pointee(Selection { value: currency, epoch: 0 }),
            epochs: AtomicU64::new(1),
            durable,
            cookies,
        }
    }

    /// Currently held locale.
    pub fn locale(&self) -> Locale {
        self.locale.load().value
    }

    /// Currently held currency.
    pub fn currency(&self) -> Currency {
        self.currency.load().value
    }

    /// Snapshot both epochs; pass the ticket back with the response of
    /// whatever request is dispatched next.
    pub fn observe(&self) -> SyncTicket {
        SyncTicket {
            locale_epoch: self.locale.load().epoch,
            currency_epoch: self.currency.load().epoch,
        }
    }

    /// User-initiated locale change.
    ///
    /// Persistence is written before the held value so anything keyed
    /// off storage in the same tick already sees the new value.
    pub fn set_locale(&self, locale: Locale) -> SyncTicket {
        self.cookies.set(LOCALE_KEY, locale.as_str());
        self.durable.set(LOCALE_KEY, locale.as_str());

        let epoch = self.next_epoch();
        self.locale.store(Arc::new(Selection { value: locale, epoch }));
        self.observe()
    }

    /// User-initiated currency change. Same ordering as [`set_locale`].
    ///
    /// [`set_locale`]: PreferenceSync::set_locale
    pub fn set_currency(&self, currency: Currency) -> SyncTicket {
        self.cookies.set(CURRENCY_KEY, currency.as_str());
        self.durable.set(CURRENCY_KEY, currency.as_str());

        let epoch = self.next_epoch();
        self.currency.store(Arc::new(Selection { value: currency, epoch }));
        self.observe()
    }

    /// Apply a profile fetch/update response taken against `ticket`.
    ///
    /// Per preference: unparseable values are ignored, responses that
    /// lost a race to a newer user action are dropped, and values equal
    /// to the held one trigger no writes.
    pub fn apply_profile(
        &self,
        ticket: SyncTicket,
        language: Option<&str>,
        currency: Option<&str>,
    ) {
        if let Some(locale) = language.and_then(|v| v.parse::<Locale>().ok()) {
            let held = self.locale.load();
            if held.epoch != ticket.locale_epoch {
                tracing::debug!(
                    profile = %locale,
                    held = %held.value,
                    "dropping stale profile language"
                );
            } else if held.value != locale {
                self.cookies.set(PROFILE_LOCALE_KEY, locale.as_str());
                self.cookies.set(LOCALE_KEY, locale.as_str());
                self.durable.set(PROFILE_LOCALE_KEY, locale.as_str());
                self.durable.set(LOCALE_KEY, locale.as_str());

                let epoch = self.next_epoch();
                self.locale.store(Arc::new(Selection { value: locale, epoch }));
            }
        }

        if let Some(value) = currency.and_then(|v| v.parse::<Currency>().ok()) {
            let held = self.currency.load();
            if held.epoch != ticket.currency_epoch {
                tracing::debug!(
                    profile = %value,
                    held = %held.value,
                    "dropping stale profile currency"
                );
            } else if held.value != value {
                self.cookies.set(PROFILE_CURRENCY_KEY, value.as_str());
                self.cookies.set(CURRENCY_KEY, value.as_str());
                self.durable.set(PROFILE_CURRENCY_KEY, value.as_str());
                self.durable.set(CURRENCY_KEY, value.as_str());

                let epoch = self.next_epoch();
                self.currency.store(Arc::new(Selection { value, epoch }));
            }
        }
    }

    /// Drop the profile-sourced cache on logout.
    ///
    /// The user-chosen `locale`/`currency` keys survive so an anonymous
    /// session keeps the last explicit choice.
    pub fn clear_profile_cache(&self) {
        self.cookies.remove(PROFILE_LOCALE_KEY);
        self.cookies.remove(PROFILE_CURRENCY_KEY);
        self.durable.remove(PROFILE_LOCALE_KEY);
        self.durable.remove(PROFILE_CURRENCY_KEY);
    }

    fn next_epoch(&self) -> u64 {
        self.epochs.fetch_add(1, Ordering::Relaxed)
    }
}
