//! vr-secrets-core - secret retrieval and merge
//!
//! Authenticate once, read every mapped path in prefix order, and flatten the
//! results into a single `prefix-key` namespace. The first failure aborts the
//! whole batch.

mod fetcher;
mod merge;
mod model;
mod session;

pub use merge::merge;
pub use model::{flatten_key, MergedSecrets, PathMapping, SecretRecord};
pub use session::Session;
