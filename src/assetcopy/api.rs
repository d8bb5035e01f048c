//! # API Facade
//!
//! A thin facade over the command layer: it owns the host and the configuration
//! snapshot and dispatches to `commands/*.rs`. No logic and no I/O of its own.
//!
//! `AssetCopyApi<H: ProjectHost>` is generic over the host, so the CLI uses
//! `AssetCopyApi<FileHost>` and tests can use `AssetCopyApi<InMemoryHost>`.

use crate::commands;
use crate::config::CopyConfig;
use crate::error::Result;
use crate::host::ProjectHost;
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct AssetCopyApi<H: ProjectHost> {
    host: H,
    config: CopyConfig,
    config_dir: PathBuf,
}

impl<H: ProjectHost> AssetCopyApi<H> {
    /// Loads the configuration snapshot from `config_dir`.
    pub fn new(host: H, config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();
        let config = CopyConfig::load(&config_dir)?;
        Ok(Self {
            host,
            config,
            config_dir,
        })
    }

    pub fn with_config(host: H, config: CopyConfig, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            host,
            config,
            config_dir: config_dir.into(),
        }
    }

    pub fn copy_to_library(
        &mut self,
        target: &str,
        skip_preflight: bool,
    ) -> Result<commands::CmdResult> {
        commands::copy::run(&mut self.host, &self.config, target, skip_preflight)
    }

    pub fn preflight(&self) -> Result<commands::CmdResult> {
        commands::preflight::run(&self.host)
    }

    pub fn merge_catalogs(&self, target: &str) -> Result<commands::CmdResult> {
        commands::catalog::run(&self.host, &self.config, target)
    }

    pub fn libraries(&self) -> Result<commands::CmdResult> {
        commands::libraries::run(&self.host, &self.config)
    }

    /// Changes go to disk; the snapshot held by this instance is refreshed after a write.
    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

/// Configuration changes need no open project.
pub fn configure(config_dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(config_dir, action)
}
