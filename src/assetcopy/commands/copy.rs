use crate::catalog::MergeOutcome;
use crate::commands::{resolve_library, CmdMessage, CmdResult};
use crate::config::CopyConfig;
use crate::error::Result;
use crate::host::ProjectHost;
use crate::placement::{self, CancelReason, PlacementOutcome};

/// Copies or symlinks the open project into `target` (a library name or directory).
///
/// When preflight warnings stop the copy, the result carries them with
/// `needs_confirmation` set; run again with `skip_preflight` to go ahead.
pub fn run<H: ProjectHost>(
    host: &mut H,
    config: &CopyConfig,
    target: &str,
    skip_preflight: bool,
) -> Result<CmdResult> {
    let dir = resolve_library(config, target)?;
    let outcome = placement::place(host, &dir, config, skip_preflight)?;
    let mut result = CmdResult::default();

    match outcome {
        PlacementOutcome::Cancelled(reason @ (CancelReason::NotSaved | CancelReason::SameFile)) => {
            result.add_message(CmdMessage::error(reason.message()));
        }
        PlacementOutcome::Cancelled(CancelReason::Preflight(warnings)) => {
            result.add_message(CmdMessage::warning(
                "There were some problems with this file:",
            ));
            result.needs_confirmation = true;
            result = result.with_preflight_warnings(warnings);
        }
        PlacementOutcome::Placed(placed) => {
            if let Some(backup) = &placed.backup {
                result.add_message(CmdMessage::info(format!(
                    "Previous file moved to {}",
                    backup.display()
                )));
            }
            match &placed.catalog {
                Some(MergeOutcome::Appended { count, .. }) => {
                    result.add_message(CmdMessage::info(format!(
                        "Added {} catalog(s) to the library",
                        count
                    )));
                }
                Some(MergeOutcome::Bootstrapped) => {
                    result.add_message(CmdMessage::info("Created the library catalog file"));
                }
                _ => {}
            }
            match &placed.warning {
                Some(warning) => result.add_message(CmdMessage::warning(warning.clone())),
                None => result.add_message(CmdMessage::success(format!(
                    "{} {}",
                    placed.kind.verb(),
                    placed.filename
                ))),
            }
            result = result.with_placement(placed);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::AssetLibrary;
    use crate::host::memory::InMemoryHost;
    use crate::host::ImageInfo;
    use std::fs;

    fn setup() -> (tempfile::TempDir, tempfile::TempDir, CopyConfig) {
        let project = tempfile::tempdir().unwrap();
        let library = tempfile::tempdir().unwrap();
        let mut config = CopyConfig {
            save_copy_to_temp: false,
            ..CopyConfig::default()
        };
        config.add_library(AssetLibrary::new("Props", library.path()));
        (project, library, config)
    }

    #[test]
    fn test_copy_by_library_name() {
        let (project, library, config) = setup();
        let path = project.path().join("Lamp_4.blend");
        fs::write(&path, "lamp").unwrap();
        let mut host = InMemoryHost::saved_at(path);

        let result = run(&mut host, &config, "Props", false).unwrap();

        assert!(library.path().join("Lamp_latest.blend").exists());
        let last = result.messages.last().unwrap();
        assert_eq!(last.level, MessageLevel::Success);
        assert_eq!(last.content, "Copied Lamp_latest.blend");
        assert!(result.placement.is_some());
    }

    #[test]
    fn test_unsaved_reports_error() {
        let (_project, _library, config) = setup();
        let mut host = InMemoryHost::new();

        let result = run(&mut host, &config, "Props", false).unwrap();
        assert!(result.has_errors());
        assert_eq!(result.messages[0].content, "File must be saved before copying");
    }

    #[test]
    fn test_preflight_asks_for_confirmation() {
        let (project, library, config) = setup();
        let path = project.path().join("Lamp.blend");
        fs::write(&path, "lamp").unwrap();
        let mut host = InMemoryHost::saved_at(path).with_image(ImageInfo::external("a.png"));

        let result = run(&mut host, &config, "Props", false).unwrap();
        assert!(result.needs_confirmation);
        assert_eq!(result.preflight_warnings.len(), 1);
        assert!(!library.path().join("Lamp.blend").exists());

        let confirmed = run(&mut host, &config, "Props", true).unwrap();
        assert!(!confirmed.needs_confirmation);
        assert!(library.path().join("Lamp.blend").exists());
    }
}
