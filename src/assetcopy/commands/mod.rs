//! # Command Layer
//!
//! Each operation lives in its own submodule as a plain function over the host,
//! the configuration snapshot and a few arguments. Commands return a [`CmdResult`]
//! with structured messages; they never print and never exit.
//!
//! - [`copy`]: place the project into a library
//! - [`preflight`]: run the preflight checks on their own
//! - [`catalog`]: merge the project's catalogs into a library
//! - [`libraries`]: list configured libraries
//! - [`config`]: show and change configuration

use crate::config::{AssetLibrary, CopyConfig};
use crate::error::{AssetCopyError, Result};
use crate::placement::Placement;
use std::path::PathBuf;

pub mod catalog;
pub mod config;
pub mod copy;
pub mod libraries;
pub mod preflight;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub libraries: Vec<AssetLibrary>,
    pub preflight_warnings: Vec<String>,
    /// Set when the operation stopped on preflight warnings and can be retried
    /// with the override.
    pub needs_confirmation: bool,
    pub placement: Option<Placement>,
    pub config: Option<CopyConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_libraries(mut self, libraries: Vec<AssetLibrary>) -> Self {
        self.libraries = libraries;
        self
    }

    pub fn with_preflight_warnings(mut self, warnings: Vec<String>) -> Self {
        self.preflight_warnings = warnings;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_config(mut self, config: CopyConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

/// Turns a library name or a literal directory into the library root.
pub fn resolve_library(config: &CopyConfig, target: &str) -> Result<PathBuf> {
    if target.is_empty() {
        return Err(AssetCopyError::Internal("Path not provided".into()));
    }
    Ok(config
        .library(target)
        .map(|lib| lib.path.clone())
        .unwrap_or_else(|| PathBuf::from(target)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_library_by_name_or_path() {
        let mut config = CopyConfig::default();
        config.add_library(AssetLibrary::new("Props", "/libs/props"));

        assert_eq!(
            resolve_library(&config, "Props").unwrap(),
            PathBuf::from("/libs/props")
        );
        assert_eq!(
            resolve_library(&config, "/tmp/elsewhere").unwrap(),
            PathBuf::from("/tmp/elsewhere")
        );
        assert!(resolve_library(&config, "").is_err());
    }
}
