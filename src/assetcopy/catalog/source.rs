use super::CATALOG_FILENAME;
use crate::error::Result;
use crate::host::ProjectHost;
use std::fs;
use std::path::PathBuf;

/// Where the open project's catalog text was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    TextBlock(String),
    /// Read lazily; bootstrapping copies it byte for byte.
    File(PathBuf),
}

impl CatalogSource {
    pub fn read_text(self) -> Result<String> {
        match self {
            CatalogSource::TextBlock(text) => Ok(text),
            CatalogSource::File(path) => Ok(fs::read_to_string(path)?),
        }
    }
}

/// The catalog file that sits next to the project file, if the project has a path.
pub fn sibling_catalog_path<H: ProjectHost>(host: &H) -> Option<PathBuf> {
    let project = host.filepath()?;
    let dir = project.parent()?;
    Some(dir.join(CATALOG_FILENAME))
}

/// Locates the project's catalog text: a non-empty text block named
/// `blender_assets.cats.txt` wins over a sibling file of the same name.
///
/// Nothing is read from disk here.
pub fn locate_source_catalog<H: ProjectHost>(host: &H) -> Option<CatalogSource> {
    if let Some(text) = host.text_block(CATALOG_FILENAME).filter(|t| !t.is_empty()) {
        return Some(CatalogSource::TextBlock(text));
    }

    sibling_catalog_path(host)
        .filter(|path| path.is_file())
        .map(CatalogSource::File)
}

/// Absence is `Ok(None)`; only a failed read of an existing file is an error.
pub fn read_source_catalog_text<H: ProjectHost>(host: &H) -> Result<Option<String>> {
    locate_source_catalog(host)
        .map(CatalogSource::read_text)
        .transpose()
}
