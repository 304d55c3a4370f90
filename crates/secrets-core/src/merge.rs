//! Merge engine

use tracing::{debug, info, warn};
use vr_errors::AppResult;
use vr_ports::SecretStore;

use crate::model::{MergedSecrets, PathMapping};
use crate::session::Session;

/// Fetch every path in `mapping` and flatten the results under their prefixes.
///
/// Entries are processed one at a time in prefix order. The first error
/// aborts the batch and nothing merged so far is returned. Store warnings are
/// logged and otherwise ignored. On a flattened-key collision the entry
/// processed last wins.
pub async fn merge<S: SecretStore>(
    session: &Session<S>,
    mapping: &PathMapping,
) -> AppResult<MergedSecrets> {
    let mut merged = MergedSecrets::default();

    for (index, (prefix, path)) in mapping.iter().enumerate() {
        debug!(step = index + 1, total = mapping.len(), prefix, path, "Fetching");
        let record = session.fetch(path).await?;

        for warning in &record.warnings {
            warn!(prefix, path, "{}", warning);
        }

        for key in merged.extend_prefixed(prefix, record.data) {
            debug!(key = %key, prefix, "Flattened key overwritten");
        }
    }

    info!(paths = mapping.len(), keys = merged.len(), "Merged secrets");
    Ok(merged)
}
