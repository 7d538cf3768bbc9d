use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a local property snapshot (32 MB)
pub const MAX_STORE_FILE_SIZE: u64 = 32 * 1024 * 1024;

/// Validates that an existing store file can be read safely
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
/// A store file that does not exist yet is accepted; it is created on first write.
///
/// # Errors
/// Returns an error if the path is a symbolic link, is not a regular file,
/// or exceeds [`MAX_STORE_FILE_SIZE`]
pub fn validate_store_file(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            anyhow::bail!(
                "Failed to read metadata for property store {}: {}",
                path.display(),
                e
            )
        }
    };

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, property stores behind symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_STORE_FILE_SIZE)
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}
