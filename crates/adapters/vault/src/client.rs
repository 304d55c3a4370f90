//! Vault client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info};
use url::Url;
use vr_errors::{AppError, AppResult};
use vr_ports::{AppIdCredentials, LoginResponse, RawSecret, SecretStore};

use crate::config::VaultConfig;
use crate::error::{error_detail, map_login_status, map_read_status, map_transport_error};

const TOKEN_HEADER: &str = "X-Vault-Token";

/// Vault client speaking the HTTP API
pub struct VaultClient {
    http: reqwest::Client,
    endpoint: Url,
    login_path: String,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    auth: Option<AuthBody>,
    #[serde(default)]
    warnings: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct AuthBody {
    #[serde(default)]
    client_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SecretBody {
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    warnings: Option<Vec<String>>,
}

impl VaultClient {
    /// Create a client bound to `config.endpoint`. No request is sent.
    pub fn new(config: VaultConfig) -> AppResult<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            AppError::validation(format!("Invalid Vault endpoint `{}`: {}", config.endpoint, e))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(AppError::validation(format!(
                "Invalid Vault endpoint `{}`: not a base URL",
                config.endpoint
            )));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connection_timeout_secs))
            .build()
            .map_err(|e| map_transport_error(e, "Failed to build Vault client"))?;

        Ok(Self {
            http,
            endpoint,
            login_path: config.login_path(),
        })
    }

    /// `<endpoint>/v1/<path>`, one URL segment per `/`-separated part.
    ///
    /// Segments are percent-encoded, so `?`, `#` and `%` reach Vault as part
    /// of the path. Dot segments are refused; a URL cannot carry them literally.
    fn api_url(&self, path: &str) -> AppResult<Url> {
        let relative = path.trim_start_matches('/');
        if relative.split('/').any(|segment| segment == "." || segment == "..") {
            return Err(AppError::validation(format!(
                "Invalid secret path `{}`: `.` and `..` segments are not allowed",
                path
            )));
        }

        let mut url = self.endpoint.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| {
                AppError::validation(format!("Vault endpoint `{}` cannot carry a path", self.endpoint))
            })?
            .pop_if_empty()
            .push("v1")
            .extend(relative.split('/'));
        Ok(url)
    }

    /// Log in against the app-id backend
    pub async fn login_app_id(&self, credentials: &AppIdCredentials) -> AppResult<LoginResponse> {
        let url = self.api_url(&self.login_path)?;
        info!("Logging in to Vault at {}", url);

        let body = json!({
            "app_id": credentials.app_id,
            "user_id": credentials.user_id.expose_secret(),
        });
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_transport_error(e, "Could not reach Vault for authentication"))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| map_transport_error(e, "Failed to read login response"))?;

        if !status.is_success() {
            return Err(map_login_status(status, &error_detail(status, &text)));
        }

        let parsed: LoginBody = serde_json::from_str(&text).map_err(|e| {
            AppError::auth_rejected(format!("Malformed login response: {}", e))
        })?;

        Ok(LoginResponse {
            client_token: parsed.auth.and_then(|auth| auth.client_token),
            warnings: parsed.warnings.unwrap_or_default(),
        })
    }

    /// Read a logical path. `Ok(None)` when Vault has nothing there.
    pub async fn read_path(
        &self,
        token: &Secret<String>,
        path: &str,
    ) -> AppResult<Option<RawSecret>> {
        let url = self.api_url(path)?;
        debug!("Reading secret from path: {}", path);

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, token.expose_secret())
            .send()
            .await
            .map_err(|e| map_transport_error(e, "Failed to reach Vault"))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            debug!(status = status.as_u16(), "No secret at path: {}", path);
            return Ok(None);
        }

        let text = response
            .text()
            .await
            .map_err(|e| map_transport_error(e, "Failed to read secret response"))?;

        if !status.is_success() {
            return Err(map_read_status(status, &error_detail(status, &text)));
        }
        if text.trim().is_empty() {
            return Ok(None);
        }

        let parsed: SecretBody = serde_json::from_str(&text)
            .map_err(|e| AppError::transport(format!("Malformed secret response: {}", e)))?;

        Ok(Some(RawSecret {
            data: parsed.data.unwrap_or_default(),
            warnings: parsed.warnings.unwrap_or_default(),
        }))
    }
}

#[async_trait]
impl SecretStore for VaultClient {
    async fn login(&self, credentials: &AppIdCredentials) -> AppResult<LoginResponse> {
        self.login_app_id(credentials).await
    }

    async fn read(&self, token: &Secret<String>, path: &str) -> AppResult<Option<RawSecret>> {
        self.read_path(token, path).await
    }
}
