//! # Catalogs
//!
//! An Asset Library keeps its catalog tree in `blender_assets.cats.txt`:
//!
//! ```text
//! # This is an Asset Catalog Definition file for Blender.
//! VERSION 1
//!
//! 0e1ff7a1-4c22-4d29-8a12-91f1b5ef0c3b:Props/Furniture:Props-Furniture
//! 5b8a0c2e-3d44-4a87-b1c0-62d9d6f1e2aa:Props:Props
//! ```
//!
//! Lines carrying a UUID followed by `:` are records. The rest of the line is kept
//! verbatim and never interpreted. Every other line is ignored when reading and left
//! alone when writing, since merging only ever appends.
//!
//! - [`source`]: finds the open project's catalog text.
//! - [`merge`]: appends records missing from a library's catalog file.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

pub mod merge;
pub mod source;

pub use merge::{append_new_catalogs, MergeOutcome};
pub use source::read_source_catalog_text;

pub const CATALOG_FILENAME: &str = "blender_assets.cats.txt";

/// Highest catalog file version this crate knows how to append to.
/// Bump after checking that a newer format still accepts appended records.
pub const MAX_CATALOG_VERSION: u32 = 1;

static RECORD_UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}):.+")
        .expect("static regex")
});

static VERSION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^VERSION (\d+)$").expect("static regex"));

#[derive(Error, Debug)]
pub enum CatalogVersionError {
    #[error("Cannot find VERSION in {}. It may be a newer version, or invalid.", .path.display())]
    Missing { path: PathBuf },

    #[error(
        "VERSION in {} is version {found} and may not be compatible with version {max}",
        .path.display()
    )]
    Unsupported { path: PathBuf, found: String, max: u32 },
}

/// Extracts the UUID a catalog line is keyed by, if the line is a record.
pub fn parse_record_uuid(line: &str) -> Option<Uuid> {
    let caps = RECORD_UUID.captures(line)?;
    Uuid::parse_str(caps.get(1)?.as_str()).ok()
}

/// The number on the first `VERSION <n>` line, as written.
pub fn parse_version(text: &str) -> Option<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .find_map(|line| VERSION_LINE.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// One catalog line, keyed by its UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub uuid: Uuid,
    pub line: String,
}

/// The records of a catalog text in file order.
///
/// If a UUID occurs twice, the later line replaces the earlier one in place.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    by_uuid: HashMap<Uuid, usize>,
}

impl Catalog {
    pub fn parse(text: &str) -> Self {
        let mut catalog = Catalog::default();
        for line in text.split('\n') {
            let Some(uuid) = parse_record_uuid(line) else {
                continue;
            };
            let record = CatalogRecord {
                uuid,
                line: line.to_string(),
            };
            match catalog.by_uuid.get(&uuid) {
                Some(&pos) => catalog.records[pos] = record,
                None => {
                    catalog.by_uuid.insert(uuid, catalog.records.len());
                    catalog.records.push(record);
                }
            }
        }
        catalog
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn get(&self, uuid: &Uuid) -> Option<&CatalogRecord> {
        self.by_uuid.get(uuid).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, uuid: &Uuid) -> bool {
        self.by_uuid.contains_key(uuid)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of `self` whose UUID does not appear in `other`.
    ///
    /// Only UUIDs are compared: a record whose descriptor changed is not "new".
    pub fn missing_from<'a>(&'a self, other: &Catalog) -> Vec<&'a CatalogRecord> {
        self.records
            .iter()
            .filter(|record| !other.contains(&record.uuid))
            .collect()
    }
}
