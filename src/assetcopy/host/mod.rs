//! # Host Layer
//!
//! Everything the library needs from the authoring application sits behind the
//! [`ProjectHost`] trait: saved-state flags, the on-disk path of the open project,
//! the "save a copy" routine, named text blocks and scene introspection for the
//! preflight checks.
//!
//! ## Implementations
//!
//! - [`fs::FileHost`]: a project file on disk, used by the CLI. Scene
//!   introspection comes from an optional JSON [`ProjectInventory`].
//! - [`memory::InMemoryHost`]: a scripted host for tests. It records every
//!   save request so tests can assert on compression and target paths.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;

/// Name of the pseudo-image the host creates for render output.
pub const RENDER_RESULT_IMAGE: &str = "Render Result";

/// Options for [`ProjectHost::save_copy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    pub compress: bool,
    pub relative_remap: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub name: String,
    #[serde(default)]
    pub packed: bool,
}

impl ImageInfo {
    pub fn packed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packed: true,
        }
    }

    pub fn external(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packed: false,
        }
    }
}

/// An externally linked library and the number of items in the project that use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedLibrary {
    pub name: String,
    #[serde(default)]
    pub users: usize,
}

impl LinkedLibrary {
    pub fn new(name: impl Into<String>, users: usize) -> Self {
        Self {
            name: name.into(),
            users,
        }
    }
}

/// What the host knows about the contents of the open project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInventory {
    pub has_assets: bool,
    pub images: Vec<ImageInfo>,
    pub libraries: Vec<LinkedLibrary>,
    /// Named in-memory text resources, keyed by name.
    pub text_blocks: BTreeMap<String, String>,
}

impl Default for ProjectInventory {
    fn default() -> Self {
        Self {
            has_assets: true,
            images: Vec::new(),
            libraries: Vec::new(),
            text_blocks: BTreeMap::new(),
        }
    }
}

impl ProjectInventory {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn text_block(&self, name: &str) -> Option<String> {
        self.text_blocks.get(name).cloned()
    }
}

/// The capabilities consumed from the authoring application.
pub trait ProjectHost {
    /// On-disk path of the open project, `None` if it was never saved.
    fn filepath(&self) -> Option<PathBuf>;

    /// The project has been written to disk at least once.
    fn is_saved(&self) -> bool;

    /// The in-memory state differs from what is on disk.
    fn is_dirty(&self) -> bool;

    /// Serialize the current in-memory state to `path` without changing the
    /// project's own file path.
    fn save_copy(&mut self, path: &Path, options: SaveOptions) -> Result<()>;

    /// Contents of a named in-memory text block.
    fn text_block(&self, name: &str) -> Option<String>;

    /// Whether any data-block carries asset metadata.
    fn has_marked_assets(&self) -> bool;

    fn images(&self) -> Vec<ImageInfo>;

    fn linked_libraries(&self) -> Vec<LinkedLibrary>;
}
