use crate::error::{AssetCopyError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static NUMERIC_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[_ ]?\d+(\.[^.]+)$").expect("static regex"));

/// Rewrites a trailing number before the extension to `_latest`:
/// `Scene_02.blend` and `Scene 3.blend` both become `Scene_latest.blend`.
/// Names without such a suffix come back unchanged.
pub fn normalize_numeric_suffix(filename: &str) -> String {
    NUMERIC_SUFFIX
        .replace(filename, "_latest${1}")
        .into_owned()
}

/// The file name the placed copy gets inside the library.
pub fn destination_filename(source: &Path, normalize: bool) -> Result<String> {
    let filename = source
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AssetCopyError::Internal("File name could not be determined".into()))?;

    let resolved = if normalize {
        normalize_numeric_suffix(filename)
    } else {
        filename.to_string()
    };

    if resolved.is_empty() {
        return Err(AssetCopyError::Internal(
            "File name could not be determined".into(),
        ));
    }
    Ok(resolved)
}
