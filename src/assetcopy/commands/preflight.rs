use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::host::ProjectHost;
use crate::preflight;

pub fn run<H: ProjectHost>(host: &H) -> Result<CmdResult> {
    let warnings = preflight::check(host);
    let mut result = CmdResult::default();

    if warnings.is_empty() {
        result.add_message(CmdMessage::success("No problems found."));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Preflight found {} problem(s):",
            warnings.len()
        )));
    }

    Ok(result.with_preflight_warnings(warnings))
}
