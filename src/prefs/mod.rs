//! Locale and currency preference model.
//!
//! A preference lives in up to three places at once, in descending
//! authority: the authenticated profile, the persisted cookie/storage
//! value, and the hardcoded default. This module keeps that precedence
//! explicit (a pure merge function), and implements the write-through
//! synchronization state machine that keeps all three consistent without
//! feedback loops or lost updates.

pub mod merge;
pub mod store;
pub mod sync;
pub mod types;

pub use store::{KeyValueStore, MemoryStore};
pub use sync::{PreferenceSync, SyncTicket};
pub use types::{Currency, Locale};

/// Cookie/storage key for the user-chosen locale.
pub const LOCALE_KEY: &str = "locale";
/// Cookie/storage key for the user-chosen currency.
pub const CURRENCY_KEY: &str = "currency";
/// Cookie/storage key caching the authenticated profile's language.
pub const PROFILE_LOCALE_KEY: &str = "profile_locale";
/// Cookie/storage key caching the authenticated profile's currency.
pub const PROFILE_CURRENCY_KEY: &str = "profile_currency";

/// Max-age for preference cookies, in seconds (1 year).
pub const PREFERENCE_COOKIE_MAX_AGE: i64 = 60 * 60 * 24 * 365;
