use super::backup::is_occupied;
use crate::error::{AssetCopyError, Result};
use crate::host::{ProjectHost, SaveOptions};
use std::fs;
use std::path::Path;

const STAGING_FILENAME: &str = "asset_export_temp.blend";

/// A symlink left at the destination by an earlier run would make a copy write
/// through it into its target, so it is removed first. In symlink mode any
/// remaining file is in the way of the new link and is removed too.
pub(crate) fn clear_destination(destination: &Path, for_symlink: bool) -> Result<()> {
    let is_link = destination.is_symlink();
    if is_link || (for_symlink && is_occupied(destination)) {
        tracing::debug!(dest = %destination.display(), "Removing existing destination entry");
        fs::remove_file(destination)?;
    }
    Ok(())
}

#[cfg(unix)]
fn make_symlink(source: &Path, destination: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, destination)
}

#[cfg(windows)]
fn make_symlink(source: &Path, destination: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(source, destination)
}

#[cfg(not(any(unix, windows)))]
fn make_symlink(_source: &Path, _destination: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlinks are not supported on this platform",
    ))
}

pub fn symlink(source: &Path, destination: &Path) -> Result<()> {
    if source.as_os_str().is_empty() {
        return Err(AssetCopyError::Internal("Symlink source is empty".into()));
    }
    tracing::info!(
        source = %source.display(),
        dest = %destination.display(),
        "Creating symlink"
    );
    make_symlink(source, destination)?;
    Ok(())
}

/// Asks the host to save a copy at `destination`, optionally saving into a fresh
/// temporary directory first and copying the result over. Some synced folders
/// mishandle files written in place.
pub fn save_copy<H: ProjectHost>(
    host: &mut H,
    destination: &Path,
    options: SaveOptions,
    stage_through_temp: bool,
) -> Result<()> {
    tracing::info!(compress = options.compress, "Saving copy");

    if !stage_through_temp {
        tracing::info!(dest = %destination.display(), "Saving from current state");
        return host.save_copy(destination, options);
    }

    let staging = tempfile::tempdir()?;
    let temp_path = staging.path().join(STAGING_FILENAME);
    tracing::info!(temp = %temp_path.display(), "Saving temporary file from current state");
    host.save_copy(&temp_path, options)?;

    tracing::info!(
        from = %temp_path.display(),
        to = %destination.display(),
        "Copying staged file into place"
    );
    fs::copy(&temp_path, destination)?;
    staging.close()?;
    Ok(())
}
