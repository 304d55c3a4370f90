//! Basic usage example for vr-adapter-vault
//!
//! Run with:
//! ```bash
//! export VAULT_ADDR=http://127.0.0.1:8200
//! export VAULT_APP_ID=your-app-id
//! export VAULT_USER_ID=your-user-id
//! cargo run -p vr-adapter-vault --example basic_usage -- db=secret/db api=secret/api
//! ```

use vr_adapter_vault::{VaultClient, VaultConfigBuilder};
use vr_config::{user_id_from_env, SourceConfig};
use vr_secrets_core::{merge, PathMapping, Session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let source = SourceConfig::new(
        &std::env::var("VAULT_ADDR").unwrap_or_else(|_| "http://127.0.0.1:8200".to_string()),
        std::env::var("VAULT_APP_ID")?,
        user_id_from_env(),
    )?;

    let entries: Vec<(String, String)> = std::env::args()
        .skip(1)
        .filter_map(|arg| {
            arg.split_once('=')
                .map(|(prefix, path)| (prefix.to_string(), path.to_string()))
        })
        .collect();
    let mapping = PathMapping::new(entries)?;

    println!("Connecting to {}", source.vault_uri);
    let session = Session::authenticate(&source, |uri| {
        VaultClient::new(VaultConfigBuilder::new(uri.as_str()).build())
    })
    .await?;

    let merged = merge(&session, &mapping).await?;
    println!("Fetched {} keys from {} paths:", merged.len(), mapping.len());
    for key in merged.keys() {
        println!("  {}", key);
    }

    Ok(())
}
