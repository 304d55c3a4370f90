//! vr-adapter-vault - HashiCorp Vault adapter
//!
//! Implements the `SecretStore` port over Vault's HTTP API:
//! - app-id login (`auth/<mount>/login`)
//! - logical reads with absent paths reported as `None`
//! - status and transport error mapping to `AppError`

pub mod client;
pub mod config;
pub mod error;

pub use client::VaultClient;
pub use config::{VaultConfig, VaultConfigBuilder};
