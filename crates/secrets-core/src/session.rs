//! Credential session

use secrecy::{ExposeSecret, Secret};
use tracing::{info, warn};
use url::Url;
use vr_config::{SourceConfig, USER_ID_ENV};
use vr_errors::{AppError, AppResult};
use vr_ports::{AppIdCredentials, SecretStore};

/// Authenticated handle to the secret store, valid for one invocation.
///
/// Holds a non-empty client token; every read goes through it.
pub struct Session<S> {
    store: S,
    token: Secret<String>,
}

impl<S: SecretStore> Session<S> {
    /// Log in with the source's app-id credentials.
    ///
    /// `connect` builds the store client bound to `vault_uri`. It is only
    /// invoked once both identifiers are known to be present, so a missing
    /// credential never reaches the network.
    pub async fn authenticate<F>(config: &SourceConfig, connect: F) -> AppResult<Self>
    where
        F: FnOnce(&Url) -> AppResult<S>,
    {
        if config.app_id.is_empty() {
            return Err(AppError::missing_credential(
                "app_id not set in resource source",
            ));
        }
        if config.user_id.expose_secret().is_empty() {
            return Err(AppError::missing_credential(format!(
                "user_id not set; export {}",
                USER_ID_ENV
            )));
        }

        let store = connect(&config.vault_uri).map_err(|e| e.in_stage("authenticate"))?;

        info!(vault_uri = %config.vault_uri, app_id = %config.app_id, "Authenticating with app-id");
        let credentials = AppIdCredentials {
            app_id: config.app_id.clone(),
            user_id: config.user_id.clone(),
        };
        let response = store
            .login(&credentials)
            .await
            .map_err(|e| e.in_stage("authenticate"))?;
        for warning in &response.warnings {
            warn!(stage = "authenticate", "{}", warning);
        }

        let token = response
            .client_token
            .ok_or_else(|| AppError::auth_rejected("login response carried no client token"))?;
        let session = Self::from_token(store, Secret::new(token))?;

        info!("Successfully authenticated with Vault");
        Ok(session)
    }

    /// Wrap an already issued token. Empty tokens are rejected.
    pub fn from_token(store: S, token: Secret<String>) -> AppResult<Self> {
        if token.expose_secret().is_empty() {
            return Err(AppError::auth_rejected("store issued an empty client token"));
        }
        Ok(Self { store, token })
    }

    pub fn token(&self) -> &Secret<String> {
        &self.token
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
