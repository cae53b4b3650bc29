//! Storefront session facade.
//!
//! Ties the REST client, auth storage, and preference sync together:
//! login/logout flows, profile fetch with automatic logout on a dead
//! token, and optimistic preference changes reconciled against the
//! server's echo.

use std::sync::Arc;

use crate::client::api::{ApiClient, ClientError, UserProfile};
use crate::client::auth::AuthSession;
use crate::prefs::{Currency, Locale, PreferenceSync, SyncTicket};

/// One logged-in (or anonymous) storefront session.
pub struct StorefrontSession {
    api: Arc<ApiClient>,
    auth: AuthSession,
    prefs: Arc<PreferenceSync>,
}

impl StorefrontSession {
    pub fn new(api: Arc<ApiClient>, auth: AuthSession, prefs: Arc<PreferenceSync>) -> Self {
        Self { api, auth, prefs }
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn prefs(&self) -> &PreferenceSync {
        &self.prefs
    }

    /// Log in and pull the account profile.
    ///
    /// The profile fetch is best-effort: a failure there leaves the
    /// session logged in with local preferences intact.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<(), ClientError> {
        let response = self.api.login(email, password).await?;
        self.auth.store_login(&response.token, &response.user, remember_me);
        tracing::info!(user_id = response.user.id, remember_me, "logged in");

        self.sync_profile().await;
        Ok(())
    }

    /// Drop credentials and the cached profile preference keys.
    ///
    /// The visitor's own locale/currency choices survive logout.
    pub fn logout(&self) {
        self.auth.clear_credentials();
        self.prefs.clear_profile_cache();
        tracing::info!("logged out");
    }

    /// Fetch the profile and fold its preferences into local state.
    ///
    /// A 401 means the stored token is dead; the session logs itself
    /// out. Profile preferences only apply if the user has not changed
    /// the preference locally since the fetch started.
    pub async fn sync_profile(&self) {
        let Some(token) = self.auth.stored_token() else {
            return;
        };

        let ticket = self.prefs.observe();
        match self.api.fetch_profile(&token).await {
            Ok(profile) => {
                self.apply_profile(ticket, &profile);
            }
            Err(ClientError::Unauthorized) => {
                tracing::warn!("stored token rejected, logging out");
                self.logout();
            }
            Err(e) => {
                tracing::error!(error = %e, "profile fetch failed");
            }
        }
    }

    /// Change the UI language: commit locally, then reconcile with the
    /// server in the same call. Remote failure keeps the local value.
    pub async fn set_locale(&self, locale: Locale) {
        let ticket = self.prefs.set_locale(locale);
        self.push_preference(ticket, serde_json::json!({ "language": locale.as_str() }))
            .await;
    }

    /// Change the display currency; same semantics as [`Self::set_locale`].
    pub async fn set_currency(&self, currency: Currency) {
        let ticket = self.prefs.set_currency(currency);
        self.push_preference(ticket, serde_json::json!({ "currency": currency.as_str() }))
            .await;
    }

    async fn push_preference(&self, ticket: SyncTicket, patch: serde_json::Value) {
        let Some(token) = self.auth.stored_token() else {
            return;
        };

        match self.api.update_profile(&token, &patch).await {
            Ok(profile) => {
                self.apply_profile(ticket, &profile);
            }
            Err(e) => {
                tracing::warn!(error = %e, "preference update failed, keeping local value");
            }
        }
    }

    fn apply_profile(&self, ticket: SyncTicket, profile: &UserProfile) {
        self.auth.set_profile(profile.clone());
        self.prefs
            .apply_profile(ticket, profile.language.as_deref(), profile.currency.as_deref());
    }
}
