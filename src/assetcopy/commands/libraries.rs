use crate::commands::{CmdMessage, CmdResult};
use crate::config::CopyConfig;
use crate::error::Result;
use crate::host::ProjectHost;

pub const MUST_SAVE_ALERT: &str = "File must be saved";

/// Lists the configured libraries, flagging when the project cannot be placed
/// as it is.
pub fn run<H: ProjectHost>(host: &H, config: &CopyConfig) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_libraries(config.libraries.clone());

    let unsaved = host.is_dirty() || !host.is_saved();
    if unsaved && !config.snapshots_unsaved() {
        result.add_message(CmdMessage::error(MUST_SAVE_ALERT));
    }

    if config.libraries.is_empty() {
        result.add_message(CmdMessage::info(
            "No asset libraries configured. Add one with `assetcopy library add <name> <path>`.",
        ));
    }

    Ok(result)
}
