//! vault-resource - pipeline resource backed by Vault
//!
//! `check` emits a fresh version on every call. `in` logs in with app-id
//! credentials, reads each `prefix: path` entry from the request params,
//! and writes the flattened `prefix-key` map into the destination directory.

pub mod cli;
pub mod commands;
pub mod output;
pub mod protocol;

use std::io::{Read, Write};

use secrecy::Secret;
use vr_config::ResourceSettings;
use vr_errors::{AppError, AppResult};

pub use cli::{Invocation, Step};

/// Run one resource step against the given stdin/stdout.
///
/// `user_id` is read from the environment by the caller, once, at startup.
pub async fn run<R: Read, W: Write>(
    step: Step,
    settings: &ResourceSettings,
    user_id: Secret<String>,
    stdin: R,
    stdout: W,
) -> AppResult<()> {
    match step {
        Step::Check => commands::check::run(stdin, stdout),
        Step::In { destination } => {
            commands::fetch::run(stdin, stdout, &destination, settings, user_id).await
        }
        Step::Out { .. } => Err(AppError::unsupported(
            "out is not implemented; this resource only supports check and in",
        )),
    }
}
