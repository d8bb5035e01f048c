use crate::catalog::{self, MergeOutcome};
use crate::commands::{resolve_library, CmdMessage, CmdResult};
use crate::config::CopyConfig;
use crate::error::Result;
use crate::host::ProjectHost;

/// Merges the project's catalogs into `target` without placing the file.
pub fn run<H: ProjectHost>(host: &H, config: &CopyConfig, target: &str) -> Result<CmdResult> {
    let dir = resolve_library(config, target)?;
    let outcome = catalog::append_new_catalogs(host, &dir)?;

    let mut result = CmdResult::default();
    let message = match outcome {
        MergeOutcome::Bootstrapped => CmdMessage::success(format!(
            "Created {} in {}",
            catalog::CATALOG_FILENAME,
            dir.display()
        )),
        MergeOutcome::NoSource => CmdMessage::info("No existing catalog data. Nothing to export."),
        MergeOutcome::UpToDate => {
            CmdMessage::info("All catalogs already existed in the library")
        }
        MergeOutcome::Appended { count, backup } => CmdMessage::success(format!(
            "Added {} catalog(s), previous file saved as {}",
            count,
            backup.display()
        )),
    };
    result.add_message(message);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG_FILENAME;
    use crate::error::AssetCopyError;
    use crate::host::memory::InMemoryHost;
    use std::fs;

    const RECORD: &str = "0e1ff7a1-4c22-4d29-8a12-91f1b5ef0c3b:Props:Props";

    #[test]
    fn test_merge_into_directory() {
        let library = tempfile::tempdir().unwrap();
        fs::write(library.path().join(CATALOG_FILENAME), "VERSION 1\n").unwrap();
        let host = InMemoryHost::new().with_text_block(CATALOG_FILENAME, RECORD);
        let target = library.path().to_string_lossy().into_owned();

        let result = run(&host, &CopyConfig::default(), &target).unwrap();

        assert!(result.messages[0].content.starts_with("Added 1 catalog(s)"));
        let merged = fs::read_to_string(library.path().join(CATALOG_FILENAME)).unwrap();
        assert_eq!(merged, format!("VERSION 1\n{}\n", RECORD));
    }

    #[test]
    fn test_version_error_propagates() {
        let library = tempfile::tempdir().unwrap();
        fs::write(library.path().join(CATALOG_FILENAME), "VERSION 2\n").unwrap();
        let host = InMemoryHost::new().with_text_block(CATALOG_FILENAME, RECORD);
        let target = library.path().to_string_lossy().into_owned();

        let err = run(&host, &CopyConfig::default(), &target).unwrap_err();
        assert!(matches!(err, AssetCopyError::CatalogVersion(_)));
    }
}
