//! Persisting merged secrets

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use vr_errors::{AppError, AppResult};
use vr_secrets_core::MergedSecrets;

/// Fail early if `destination` cannot receive the output file.
pub fn ensure_destination(destination: &Path) -> AppResult<()> {
    if destination.is_dir() {
        Ok(())
    } else {
        Err(AppError::file_io(format!(
            "destination `{}` is not a directory",
            destination.display()
        )))
    }
}

/// Write `secrets` as a flat JSON object to `destination/file_name`.
///
/// The file is staged in the destination directory and renamed into place,
/// so readers see either the complete file or nothing. The file mode is
/// `0666` less the umask, like any newly created file.
pub fn write_secrets(
    destination: &Path,
    file_name: &str,
    secrets: &MergedSecrets,
) -> AppResult<PathBuf> {
    ensure_destination(destination)?;
    let target = destination.join(file_name);

    let mut staged = stage_file(destination)?;

    serde_json::to_writer(&mut staged, secrets)
        .map_err(|e| AppError::encode(format!("Writing secrets file: {}", e)))?;
    staged
        .write_all(b"\n")
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| AppError::file_io(format!("Writing secrets file: {}", e)))?;

    staged.persist(&target).map_err(|e| {
        AppError::file_io(format!("Failed to move output into `{}`: {}", target.display(), e.error))
    })?;

    Ok(target)
}

fn stage_file(destination: &Path) -> AppResult<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".secrets");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    builder.tempfile_in(destination).map_err(|e| {
        AppError::file_io(format!("Failed to create output file in `{}`: {}", destination.display(), e))
    })
}
