//! `in`: authenticate, merge every mapped path, persist, report

use std::io::{Read, Write};
use std::path::Path;

use secrecy::Secret;
use tracing::info;
use vr_adapter_vault::{VaultClient, VaultConfigBuilder};
use vr_config::ResourceSettings;
use vr_errors::AppResult;
use vr_secrets_core::{merge, Session};

use crate::output::{ensure_destination, write_secrets};
use crate::protocol::{write_response, InResponse, Request, Version};

pub async fn run<R: Read, W: Write>(
    stdin: R,
    stdout: W,
    destination: &Path,
    settings: &ResourceSettings,
    user_id: Secret<String>,
) -> AppResult<()> {
    let request = Request::decode(stdin)?;
    let source = request.source_config(user_id)?;
    let mapping = request.path_mapping()?;
    ensure_destination(destination)?;

    let session = Session::authenticate(&source, |uri| {
        VaultClient::new(
            VaultConfigBuilder::new(uri.as_str())
                .with_auth_mount(settings.auth_mount.as_str())
                .with_connection_timeout(settings.connect_timeout_secs)
                .build(),
        )
    })
    .await?;

    let merged = merge(&session, &mapping).await?;
    let written = write_secrets(destination, &settings.output_file, &merged)?;
    info!(file = %written.display(), keys = merged.len(), "Secrets written");

    write_response(stdout, &InResponse::new(Version::now(), &mapping, &merged))
}
