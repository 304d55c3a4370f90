//! Vault configuration

/// Vault client configuration
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault server endpoint
    pub endpoint: String,

    /// Mount path of the app-id auth backend
    pub auth_mount: String,

    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

fn default_auth_mount() -> String {
    "app-id".to_string()
}

fn default_connection_timeout() -> u64 {
    10
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8200".to_string(),
            auth_mount: default_auth_mount(),
            connection_timeout_secs: default_connection_timeout(),
        }
    }
}

impl VaultConfig {
    /// Path of the login endpoint relative to `/v1/`
    pub fn login_path(&self) -> String {
        format!("auth/{}/login", self.auth_mount.trim_matches('/'))
    }
}

/// Builder for VaultConfig
pub struct VaultConfigBuilder {
    config: VaultConfig,
}

impl VaultConfigBuilder {
    /// Create a new builder with endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            config: VaultConfig {
                endpoint: endpoint.into(),
                ..Default::default()
            },
        }
    }

    /// Set the app-id auth mount
    pub fn with_auth_mount(mut self, auth_mount: impl Into<String>) -> Self {
        self.config.auth_mount = auth_mount.into();
        self
    }

    /// Set connection timeout
    pub fn with_connection_timeout(mut self, timeout_secs: u64) -> Self {
        self.config.connection_timeout_secs = timeout_secs;
        self
    }

    /// Build the configuration
    pub fn build(self) -> VaultConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VaultConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8200");
        assert_eq!(config.auth_mount, "app-id");
        assert_eq!(config.connection_timeout_secs, 10);
        assert_eq!(config.login_path(), "auth/app-id/login");
    }

    #[test]
    fn test_builder() {
        let config = VaultConfigBuilder::new("http://vault:8200")
            .with_auth_mount("/ci-app-id/")
            .with_connection_timeout(20)
            .build();

        assert_eq!(config.endpoint, "http://vault:8200");
        assert_eq!(config.connection_timeout_secs, 20);
        assert_eq!(config.login_path(), "auth/ci-app-id/login");
    }
}
