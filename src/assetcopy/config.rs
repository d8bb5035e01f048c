//! # Configuration
//!
//! A flat set of named options, stored as `config.json` in the config directory.
//! A missing file yields the defaults below; every field is optional on disk.
//!
//! | Key | Default | Effect |
//! |-----|---------|--------|
//! | `create_symlinks` | `false` | Symlink instead of copying |
//! | `allow_unsaved` | `true` | Snapshot a dirty project (copy mode only) |
//! | `always_compress` | `true` | Force a compressed copy |
//! | `normalize_numeric_suffix` | `true` | `Scene_02.blend` → `Scene_latest.blend` |
//! | `create_backup` | `true` | Rotate an existing destination into `<name>1` |
//! | `append_catalog` | `false` | Merge `blender_assets.cats.txt` after placement |
//! | `skip_preflight` | `false` | Bypass the preflight checks |
//! | `save_copy_to_temp` | `true` | Stage the copy in a temporary directory |
//! | `relative_remap` | `true` | Ask the host to remap relative paths |
//!
//! The configuration is read once per invocation and treated as a snapshot.

use crate::error::{AssetCopyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Boolean keys accepted by [`CopyConfig::set_flag`], in display order.
pub const FLAG_KEYS: &[&str] = &[
    "create_symlinks",
    "allow_unsaved",
    "always_compress",
    "normalize_numeric_suffix",
    "create_backup",
    "append_catalog",
    "skip_preflight",
    "save_copy_to_temp",
    "relative_remap",
];

/// A configured Asset Library root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetLibrary {
    pub name: String,
    pub path: PathBuf,
}

impl AssetLibrary {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CopyConfig {
    pub create_symlinks: bool,
    pub allow_unsaved: bool,
    pub always_compress: bool,
    pub normalize_numeric_suffix: bool,
    pub create_backup: bool,
    pub append_catalog: bool,
    pub skip_preflight: bool,
    pub save_copy_to_temp: bool,
    pub relative_remap: bool,
    pub libraries: Vec<AssetLibrary>,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            create_symlinks: false,
            allow_unsaved: true,
            always_compress: true,
            normalize_numeric_suffix: true,
            create_backup: true,
            append_catalog: false,
            skip_preflight: false,
            save_copy_to_temp: true,
            relative_remap: true,
            libraries: Vec::new(),
        }
    }
}

impl CopyConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: CopyConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Snapshots of unsaved state are only possible when copying.
    pub fn snapshots_unsaved(&self) -> bool {
        self.allow_unsaved && !self.create_symlinks
    }

    /// Temp staging only applies to the copy path.
    pub fn stages_through_temp(&self) -> bool {
        self.save_copy_to_temp && !self.create_symlinks
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        let value = match key {
            "create_symlinks" => self.create_symlinks,
            "allow_unsaved" => self.allow_unsaved,
            "always_compress" => self.always_compress,
            "normalize_numeric_suffix" => self.normalize_numeric_suffix,
            "create_backup" => self.create_backup,
            "append_catalog" => self.append_catalog,
            "skip_preflight" => self.skip_preflight,
            "save_copy_to_temp" => self.save_copy_to_temp,
            "relative_remap" => self.relative_remap,
            _ => return None,
        };
        Some(value)
    }

    pub fn set_flag(&mut self, key: &str, value: bool) -> Result<()> {
        let slot = match key {
            "create_symlinks" => &mut self.create_symlinks,
            "allow_unsaved" => &mut self.allow_unsaved,
            "always_compress" => &mut self.always_compress,
            "normalize_numeric_suffix" => &mut self.normalize_numeric_suffix,
            "create_backup" => &mut self.create_backup,
            "append_catalog" => &mut self.append_catalog,
            "skip_preflight" => &mut self.skip_preflight,
            "save_copy_to_temp" => &mut self.save_copy_to_temp,
            "relative_remap" => &mut self.relative_remap,
            other => return Err(AssetCopyError::Config(format!("Unknown config key: {}", other))),
        };
        *slot = value;
        Ok(())
    }

    pub fn library(&self, name: &str) -> Option<&AssetLibrary> {
        self.libraries.iter().find(|lib| lib.name == name)
    }

    /// Adds a library, replacing the path of an existing one with the same name.
    pub fn add_library(&mut self, library: AssetLibrary) {
        match self.libraries.iter_mut().find(|lib| lib.name == library.name) {
            Some(existing) => existing.path = library.path,
            None => self.libraries.push(library),
        }
    }

    pub fn remove_library(&mut self, name: &str) -> Option<AssetLibrary> {
        let pos = self.libraries.iter().position(|lib| lib.name == name)?;
        Some(self.libraries.remove(pos))
    }
}

/// Parses the usual spellings of a boolean config value.
pub fn parse_flag_value(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(AssetCopyError::Config(format!(
            "Expected a boolean value, got: {}",
            other
        ))),
    }
}
