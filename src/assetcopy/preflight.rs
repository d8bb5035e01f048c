//! # Preflight
//!
//! Advisory checks run before a file is placed into a library. Each check is
//! independent and only adds warnings; nothing here touches the filesystem.
//!
//! - Nothing in the project is marked as an asset: one warning.
//! - Images that are not packed into the project: one warning each, or a single
//!   count once there are more than [`COLLAPSE_OVER`].
//! - Linked libraries that items depend on: same scheme, collapsed on their own.

use crate::host::{ProjectHost, RENDER_RESULT_IMAGE};

/// Above this many entries, a group of per-item warnings becomes one summary line.
pub const COLLAPSE_OVER: usize = 10;

pub const NO_ASSETS_WARNING: &str = "This file contains nothing marked as an Asset";

fn collapse(details: Vec<String>, summary: impl FnOnce(usize) -> String) -> Vec<String> {
    if details.len() > COLLAPSE_OVER {
        vec![summary(details.len())]
    } else {
        details
    }
}

/// Runs every check against the open project, in a fixed order.
pub fn check<H: ProjectHost>(host: &H) -> Vec<String> {
    let mut warnings = Vec::new();

    if !host.has_marked_assets() {
        warnings.push(NO_ASSETS_WARNING.to_string());
    }

    let unpacked: Vec<String> = host
        .images()
        .into_iter()
        .filter(|img| !img.packed && img.name != RENDER_RESULT_IMAGE)
        .map(|img| format!("Image \"{}\" is not packed", img.name))
        .collect();
    warnings.extend(collapse(unpacked, |n| {
        format!("{} images were not packed", n)
    }));

    let linked: Vec<String> = host
        .linked_libraries()
        .into_iter()
        .filter(|lib| lib.users > 0)
        .map(|lib| format!("{} items are linked from library \"{}\"", lib.users, lib.name))
        .collect();
    warnings.extend(collapse(linked, |n| {
        format!("Linked items from {} linked libraries were found", n)
    }));

    warnings
}
