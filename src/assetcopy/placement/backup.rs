use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// `<dest>1`, the single backup slot for a destination file.
pub fn backup_slot(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push("1");
    PathBuf::from(name)
}

/// A file or symlink (dangling or not) occupies `path`. Directories do not count.
pub(crate) fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| !meta.is_dir())
        .unwrap_or(false)
}

/// Moves the current occupant of `destination` into its backup slot, discarding any
/// earlier backup. Returns the slot path when a rotation happened.
pub fn rotate(destination: &Path) -> Result<Option<PathBuf>> {
    if !is_occupied(destination) {
        return Ok(None);
    }

    let slot = backup_slot(destination);
    if is_occupied(&slot) {
        tracing::info!(backup = %slot.display(), "Removing old backup to make room for the new one");
        fs::remove_file(&slot)?;
    }

    tracing::info!(
        from = %destination.display(),
        to = %slot.display(),
        "Moving existing file to backup"
    );
    fs::rename(destination, &slot)?;
    Ok(Some(slot))
}
