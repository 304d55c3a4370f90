//! Secret store trait definition

use async_trait::async_trait;
use secrecy::Secret;
use serde_json::{Map, Value};
use vr_errors::AppResult;

/// Login material for the app-id auth backend
#[derive(Debug, Clone)]
pub struct AppIdCredentials {
    pub app_id: String,
    pub user_id: Secret<String>,
}

/// Store answer to a login request
#[derive(Debug, Clone, Default)]
pub struct LoginResponse {
    /// Absent when the store accepted the request but issued no token
    pub client_token: Option<String>,
    pub warnings: Vec<String>,
}

/// One secret as returned by the store, values still untyped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSecret {
    pub data: Map<String, Value>,
    pub warnings: Vec<String>,
}

/// Minimal capability interface of a secret store client
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Exchange app-id credentials for a client token
    async fn login(&self, credentials: &AppIdCredentials) -> AppResult<LoginResponse>;

    /// Read the secret at `path`.
    ///
    /// `Ok(None)` means the store was reachable but holds nothing at `path`.
    async fn read(&self, token: &Secret<String>, path: &str) -> AppResult<Option<RawSecret>>;
}
