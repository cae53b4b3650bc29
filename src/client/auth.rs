//! Auth token storage with remember-me semantics.
//!
//! # Responsibilities
//! - Persist the token and serialized user record
//! - Pick durable vs session storage based on the remember-me flag
//! - Clear credentials from both stores on logout
//!
//! # Design Decisions
//! - The remember-me flag itself always lives in durable storage, so
//!   the choice of store can be re-derived after a restart.
//! - Reads consult both stores; a credential is present wherever the
//!   login wrote it.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::client::api::{User, UserProfile};
use crate::prefs::KeyValueStore;

/// Storage key for the auth token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the serialized user record.
pub const USER_KEY: &str = "auth_user";
/// Storage key for the remember-me flag (durable store only).
pub const REMEMBER_ME_KEY: &str = "remember_me";

/// Token and identity storage for one browser session.
pub struct AuthSession {
    durable: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    user: ArcSwapOption<User>,
    profile: ArcSwapOption<UserProfile>,
}

impl AuthSession {
    /// Create an auth session over the two storage backends.
    ///
    /// `durable` survives restarts; `session` does not.
    pub fn new(durable: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        let auth = Self {
            durable,
            session,
            user: ArcSwapOption::empty(),
            profile: ArcSwapOption::empty(),
        };
        auth.restore_user();
        auth
    }

    fn restore_user(&self) {
        let raw = self
            .durable
            .get(USER_KEY)
            .or_else(|| self.session.get(USER_KEY));
        if let Some(raw) = raw {
            match serde_json::from_str::<User>(&raw) {
                Ok(user) => self.user.store(Some(Arc::new(user))),
                Err(e) => tracing::warn!(error = %e, "discarding unparseable stored user"),
            }
        }
    }

    /// Store credentials after a successful login.
    ///
    /// With `remember_me` the token and user go to durable storage,
    /// otherwise to session storage. Either way the previous location
    /// is cleared so the two stores never disagree.
    pub fn store_login(&self, token: &str, user: &User, remember_me: bool) {
        let serialized = serde_json::to_string(user).unwrap_or_default();

        let (target, other): (&dyn KeyValueStore, &dyn KeyValueStore) = if remember_me {
            (self.durable.as_ref(), self.session.as_ref())
        } else {
            (self.session.as_ref(), self.durable.as_ref())
        };

        target.set(TOKEN_KEY, token);
        target.set(USER_KEY, &serialized);
        other.remove(TOKEN_KEY);
        other.remove(USER_KEY);

        self.durable
            .set(REMEMBER_ME_KEY, if remember_me { "true" } else { "false" });

        self.user.store(Some(Arc::new(user.clone())));
    }

    /// The stored token, wherever it lives.
    pub fn stored_token(&self) -> Option<String> {
        self.durable
            .get(TOKEN_KEY)
            .or_else(|| self.session.get(TOKEN_KEY))
    }

    /// Whether credentials are currently present.
    pub fn is_authenticated(&self) -> bool {
        self.stored_token().is_some()
    }

    /// The remembered flag from the last login, if any.
    pub fn remember_me(&self) -> bool {
        self.durable
            .get(REMEMBER_ME_KEY)
            .map(|v| v == "true")
            .unwrap_or(false)
    }

    /// The logged-in user record, if restored or set.
    pub fn user(&self) -> Option<Arc<User>> {
        self.user.load_full()
    }

    /// The last fetched profile, if any.
    pub fn profile(&self) -> Option<Arc<UserProfile>> {
        self.profile.load_full()
    }

    /// Cache the latest profile fetch.
    pub fn set_profile(&self, profile: UserProfile) {
        self.profile.store(Some(Arc::new(profile)));
    }

    /// Drop credentials from both stores and the in-memory identity.
    pub fn clear_credentials(&self) {
        for store in [self.durable.as_ref(), self.session.as_ref()] {
            store.remove(TOKEN_KEY);
            store.remove(USER_KEY);
        }
        self.durable.remove(REMEMBER_ME_KEY);
        self.user.store(None);
        self.profile.store(None);
    }
}
