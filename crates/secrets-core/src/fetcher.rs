//! Secret fetcher

use tracing::debug;
use vr_errors::{AppError, AppResult};
use vr_ports::SecretStore;

use crate::model::SecretRecord;
use crate::session::Session;

impl<S: SecretStore> Session<S> {
    /// Read one path and decode it.
    ///
    /// An absent secret is `NotFound`; a store failure is `Transport` with the
    /// path attached; a non-string value is `TypeMismatch`.
    pub async fn fetch(&self, path: &str) -> AppResult<SecretRecord> {
        debug!("Reading secret from path: {}", path);

        let raw = self
            .store()
            .read(self.token(), path)
            .await
            .map_err(|e| match e {
                AppError::Transport { message, .. } => {
                    AppError::transport(format!("reading `{}`: {}", path, message))
                        .in_stage("fetch")
                }
                other => other,
            })?
            .ok_or_else(|| AppError::not_found(path))?;

        let record = SecretRecord::decode(path, raw)?;
        debug!(keys = record.data.len(), "Successfully read secret from path: {}", path);
        Ok(record)
    }
}
