use super::{ImageInfo, LinkedLibrary, ProjectHost, ProjectInventory, SaveOptions};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// A save request as seen by [`InMemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRecord {
    pub path: PathBuf,
    pub options: SaveOptions,
}

/// Scripted host for tests.
///
/// `save_copy` writes `payload` to the requested path so the filesystem side of
/// the pipeline can be observed, and records the request.
#[derive(Debug, Clone)]
pub struct InMemoryHost {
    pub filepath: Option<PathBuf>,
    pub saved: bool,
    pub dirty: bool,
    pub inventory: ProjectInventory,
    pub payload: Vec<u8>,
    pub saves: Vec<SaveRecord>,
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHost {
    /// An unsaved project with assets and nothing external.
    pub fn new() -> Self {
        Self {
            filepath: None,
            saved: false,
            dirty: false,
            inventory: ProjectInventory::default(),
            payload: b"BLENDER-in-memory".to_vec(),
            saves: Vec::new(),
        }
    }

    /// A project saved to `path` with no pending changes.
    pub fn saved_at(path: impl Into<PathBuf>) -> Self {
        Self {
            filepath: Some(path.into()),
            saved: true,
            ..Self::new()
        }
    }

    pub fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn with_assets(mut self, has_assets: bool) -> Self {
        self.inventory.has_assets = has_assets;
        self
    }

    pub fn with_image(mut self, image: ImageInfo) -> Self {
        self.inventory.images.push(image);
        self
    }

    pub fn with_library(mut self, library: LinkedLibrary) -> Self {
        self.inventory.libraries.push(library);
        self
    }

    pub fn with_text_block(mut self, name: &str, text: &str) -> Self {
        self.inventory
            .text_blocks
            .insert(name.to_string(), text.to_string());
        self
    }
}

impl ProjectHost for InMemoryHost {
    fn filepath(&self) -> Option<PathBuf> {
        self.filepath.clone()
    }

    fn is_saved(&self) -> bool {
        self.saved
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn save_copy(&mut self, path: &Path, options: SaveOptions) -> Result<()> {
        fs::write(path, &self.payload)?;
        self.saves.push(SaveRecord {
            path: path.to_path_buf(),
            options,
        });
        Ok(())
    }

    fn text_block(&self, name: &str) -> Option<String> {
        self.inventory.text_block(name)
    }

    fn has_marked_assets(&self) -> bool {
        self.inventory.has_assets
    }

    fn images(&self) -> Vec<ImageInfo> {
        self.inventory.images.clone()
    }

    fn linked_libraries(&self) -> Vec<LinkedLibrary> {
        self.inventory.libraries.clone()
    }
}
