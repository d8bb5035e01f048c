//! # Placement
//!
//! Puts the open project into an Asset Library directory. [`place`] walks the
//! steps in order and stops at the first one that says no:
//!
//! 1. **Saved state**: a clean, saved file is always fine. A dirty or unsaved one
//!    only when copying with `allow_unsaved`. Symlinks need the file on disk as is.
//! 2. **Destination**: an empty library path is an internal error.
//! 3. **File name**: the project's file name, optionally with a trailing number
//!    rewritten to `_latest`. A destination that is the project file itself is
//!    refused.
//! 4. **Preflight**: warnings cancel the placement unless skipped by config or by
//!    the caller's override. Callers show the warnings and retry with the override.
//! 5. **Backup**: an existing destination moves to `<name>1`.
//! 6. **Materialize**: symlink to the project file, or have the host save a copy
//!    (compressed when the source already is, or when forced).
//! 7. **Catalogs**: merge `blender_assets.cats.txt` into the library. A version
//!    refusal becomes a warning; the placed file stays.
//!
//! Nothing on disk changes before step 5.

use crate::catalog::{self, MergeOutcome};
use crate::config::CopyConfig;
use crate::error::{AssetCopyError, Result};
use crate::host::{ProjectHost, SaveOptions};
use crate::preflight;
use std::path::{Path, PathBuf};

pub mod backup;
pub mod compression;
pub mod materialize;
pub mod naming;

pub const NOT_SAVED_MESSAGE: &str = "File must be saved before copying";
pub const SAME_FILE_MESSAGE: &str =
    "The library already holds this file under the same name; it cannot be copied onto itself";
pub const CATALOG_VERSION_WARNING: &str =
    "Catalog version was invalid or too new. Copied asset but did not update the catalog file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    Symlinked,
    Copied,
}

impl PlacementKind {
    pub fn verb(&self) -> &'static str {
        match self {
            PlacementKind::Symlinked => "Symlinked",
            PlacementKind::Copied => "Copied",
        }
    }
}

/// One resolved copy/symlink job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    /// Project file on disk, if it has one.
    pub source: Option<PathBuf>,
    pub destination_dir: PathBuf,
    pub filename: String,
    pub kind: PlacementKind,
}

impl PlacementRequest {
    pub fn destination(&self) -> PathBuf {
        self.destination_dir.join(&self.filename)
    }

    /// Whether the destination names the project file itself.
    ///
    /// Only the directories are resolved, so a symlink left at the destination by
    /// an earlier run still counts as a separate entry.
    pub fn targets_source(&self) -> bool {
        let Some(source) = self.source.as_deref() else {
            return false;
        };
        let (Some(dir), Some(name)) = (source.parent(), source.file_name()) else {
            return false;
        };
        if name != self.filename.as_str() {
            return false;
        }
        match (resolve_dir(dir), resolve_dir(&self.destination_dir)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

fn resolve_dir(dir: &Path) -> Option<PathBuf> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    dir.canonicalize().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    NotSaved,
    /// The destination is the project file.
    SameFile,
    /// Preflight produced warnings; retry with the override to continue.
    Preflight(Vec<String>),
}

impl CancelReason {
    pub fn message(&self) -> String {
        match self {
            CancelReason::NotSaved => NOT_SAVED_MESSAGE.to_string(),
            CancelReason::SameFile => SAME_FILE_MESSAGE.to_string(),
            CancelReason::Preflight(_) => "There were some problems with this file".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub kind: PlacementKind,
    pub filename: String,
    pub destination: PathBuf,
    pub backup: Option<PathBuf>,
    pub catalog: Option<MergeOutcome>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed(Placement),
    Cancelled(CancelReason),
}

/// Whether the project may be placed with the given configuration.
pub fn can_save<H: ProjectHost>(host: &H, config: &CopyConfig) -> bool {
    let has_path = host
        .filepath()
        .map(|p| !p.as_os_str().is_empty())
        .unwrap_or(false);
    let clean = host.is_saved() && !host.is_dirty();
    has_path && (clean || config.snapshots_unsaved())
}

/// Resolves where and how the project would be placed, without touching anything.
pub fn plan<H: ProjectHost>(
    host: &H,
    destination_dir: &Path,
    config: &CopyConfig,
) -> Result<PlacementRequest> {
    if destination_dir.as_os_str().is_empty() {
        return Err(AssetCopyError::Internal("Path not provided".into()));
    }

    let source = host.filepath();
    let filename = match &source {
        Some(path) => naming::destination_filename(path, config.normalize_numeric_suffix)?,
        None => {
            return Err(AssetCopyError::Internal(
                "File name could not be determined".into(),
            ))
        }
    };

    let kind = if config.create_symlinks {
        PlacementKind::Symlinked
    } else {
        PlacementKind::Copied
    };

    Ok(PlacementRequest {
        source,
        destination_dir: destination_dir.to_path_buf(),
        filename,
        kind,
    })
}

/// Places the open project into `destination_dir`. See the module docs for the steps.
///
/// `skip_preflight` is the caller's override after the user confirmed the warnings
/// of an earlier, cancelled attempt.
pub fn place<H: ProjectHost>(
    host: &mut H,
    destination_dir: &Path,
    config: &CopyConfig,
    skip_preflight: bool,
) -> Result<PlacementOutcome> {
    if !can_save(host, config) {
        tracing::warn!("Project is not in a savable state");
        return Ok(PlacementOutcome::Cancelled(CancelReason::NotSaved));
    }

    let request = plan(host, destination_dir, config)?;

    if request.targets_source() {
        tracing::warn!(dest = %request.destination().display(), "Destination is the project file");
        return Ok(PlacementOutcome::Cancelled(CancelReason::SameFile));
    }

    if !skip_preflight && !config.skip_preflight {
        let warnings = preflight::check(host);
        if !warnings.is_empty() {
            tracing::info!(count = warnings.len(), "Preflight failed, asking for confirmation");
            return Ok(PlacementOutcome::Cancelled(CancelReason::Preflight(
                warnings,
            )));
        }
    }

    let destination = request.destination();
    let backup = if config.create_backup {
        backup::rotate(&destination)?
    } else {
        None
    };

    match request.kind {
        PlacementKind::Symlinked => {
            let source = request.source.as_deref().ok_or_else(|| {
                AssetCopyError::Internal("File name could not be determined".into())
            })?;
            materialize::clear_destination(&destination, true)?;
            materialize::symlink(source, &destination)?;
        }
        PlacementKind::Copied => {
            let compress = config.always_compress
                || compression::is_compressed(request.source.as_deref())?;
            let options = SaveOptions {
                compress,
                relative_remap: config.relative_remap,
            };
            materialize::clear_destination(&destination, false)?;
            materialize::save_copy(host, &destination, options, config.stages_through_temp())?;
        }
    }

    let mut placement = Placement {
        kind: request.kind,
        filename: request.filename.clone(),
        destination,
        backup,
        catalog: None,
        warning: None,
    };

    if config.append_catalog {
        match catalog::append_new_catalogs(host, &request.destination_dir) {
            Ok(outcome) => placement.catalog = Some(outcome),
            Err(AssetCopyError::CatalogVersion(e)) => {
                tracing::warn!(error = %e, "Catalog version exception");
                placement.warning = Some(CATALOG_VERSION_WARNING.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(PlacementOutcome::Placed(placement))
}
