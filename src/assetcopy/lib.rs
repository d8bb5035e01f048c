//! # assetcopy
//!
//! Copies or symlinks the currently open project file into an Asset Library
//! directory, optionally merging its `blender_assets.cats.txt` catalog into the
//! library's own.
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                        │
//! │  - argument parsing, coloured output, exit codes         │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  API (api.rs) → Commands (commands/*.rs)                 │
//! │  - structured CmdResult, no printing                     │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Core: placement/, catalog/, preflight.rs                │
//! │  - talks to the application only through ProjectHost     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The authoring application is never linked in. Its saved-state flags, its
//! "save a copy" routine and its scene introspection are reached through the
//! [`host::ProjectHost`] trait, which lets every step run against
//! [`host::memory::InMemoryHost`] in tests.
//!
//! ## Modules
//!
//! - [`api`]: facade, entry point for all operations
//! - [`commands`]: one module per user-facing operation
//! - [`placement`]: file name, backup rotation, symlink or copy
//! - [`catalog`]: catalog file parsing and merging
//! - [`preflight`]: advisory checks before placement
//! - [`host`]: the application boundary
//! - [`config`]: configuration snapshot
//! - [`error`]: error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod placement;
pub mod preflight;
