use super::source::{locate_source_catalog, read_source_catalog_text, CatalogSource};
use super::{parse_version, Catalog, CatalogVersionError, CATALOG_FILENAME, MAX_CATALOG_VERSION};
use crate::error::Result;
use crate::host::ProjectHost;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What [`append_new_catalogs`] did to the library's catalog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The library had no catalog file; the project's catalog was copied in.
    Bootstrapped,
    /// The project has no catalog text, so nothing was written.
    NoSource,
    /// Every project record was already present.
    UpToDate,
    /// New records were appended after backing the file up.
    Appended { count: usize, backup: PathBuf },
}

pub fn backup_path(catalog_file: &Path) -> PathBuf {
    let mut name = catalog_file.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

fn check_version(path: &Path, text: &str) -> std::result::Result<(), CatalogVersionError> {
    let found = parse_version(text).ok_or_else(|| CatalogVersionError::Missing {
        path: path.to_path_buf(),
    })?;

    tracing::debug!(
        version = found,
        max = MAX_CATALOG_VERSION,
        "Catalog file version"
    );

    match found.parse::<u64>() {
        Ok(v) if v <= u64::from(MAX_CATALOG_VERSION) => Ok(()),
        _ => Err(CatalogVersionError::Unsupported {
            path: path.to_path_buf(),
            found: found.to_string(),
            max: MAX_CATALOG_VERSION,
        }),
    }
}

fn bootstrap<H: ProjectHost>(host: &H, dest_file: &Path) -> Result<MergeOutcome> {
    match locate_source_catalog(host) {
        Some(CatalogSource::File(src)) => {
            fs::copy(&src, dest_file)?;
        }
        Some(CatalogSource::TextBlock(text)) => {
            let mut fh = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(dest_file)?;
            fh.write_all(text.as_bytes())?;
        }
        None => return Ok(MergeOutcome::NoSource),
    }
    Ok(MergeOutcome::Bootstrapped)
}

/// Appends catalog records from the open project that `dest_dir`'s catalog file
/// does not have yet.
///
/// - No catalog file in `dest_dir`: the project's catalog is copied there verbatim.
/// - Otherwise the destination must declare `VERSION n` with `n <= MAX_CATALOG_VERSION`.
///   A missing or newer version fails with [`CatalogVersionError`] and nothing is written.
/// - Records are matched by UUID alone; the destination's line always wins.
/// - When there is something to append, the file is first copied to
///   `blender_assets.cats.txt.backup`, replacing any earlier backup.
///
/// Running it twice with unchanged inputs appends nothing the second time.
pub fn append_new_catalogs<H: ProjectHost>(host: &H, dest_dir: &Path) -> Result<MergeOutcome> {
    let dest_file = dest_dir.join(CATALOG_FILENAME);

    if !dest_file.is_file() {
        tracing::info!(
            dest = %dest_file.display(),
            "No catalog file at destination, copying the project's catalog"
        );
        return bootstrap(host, &dest_file);
    }

    let dest_text = fs::read_to_string(&dest_file)?;
    check_version(&dest_file, &dest_text)?;

    let source_text = match read_source_catalog_text(host)? {
        Some(text) if !text.is_empty() => text,
        _ => {
            tracing::info!("No catalog data in the project, nothing to merge");
            return Ok(MergeOutcome::NoSource);
        }
    };

    let source = Catalog::parse(&source_text);
    let dest = Catalog::parse(&dest_text);
    let new_lines: Vec<&str> = source
        .missing_from(&dest)
        .into_iter()
        .map(|record| record.line.as_str())
        .collect();

    if new_lines.is_empty() {
        tracing::info!(dest = %dest_file.display(), "All catalogs already present");
        return Ok(MergeOutcome::UpToDate);
    }

    let backup = backup_path(&dest_file);
    fs::copy(&dest_file, &backup)?;
    tracing::info!(
        from = %dest_file.display(),
        to = %backup.display(),
        "Backed up catalog file"
    );

    let mut appended = String::new();
    if !dest_text.is_empty() && !dest_text.ends_with('\n') {
        appended.push('\n');
    }
    appended.push_str(&new_lines.join("\n"));
    appended.push('\n');

    let mut fh = OpenOptions::new().append(true).open(&dest_file)?;
    fh.write_all(appended.as_bytes())?;

    tracing::info!(
        count = new_lines.len(),
        dest = %dest_file.display(),
        "Appended catalogs"
    );
    Ok(MergeOutcome::Appended {
        count: new_lines.len(),
        backup,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssetCopyError;
    use crate::host::memory::InMemoryHost;
    use tempfile::TempDir;

    const A: &str = "0e1ff7a1-4c22-4d29-8a12-91f1b5ef0c3b";
    const B: &str = "5b8a0c2e-3d44-4a87-b1c0-62d9d6f1e2aa";
    const C: &str = "9c0d7e11-0b6a-4f3e-9d2c-7a5b4c3d2e1f";

    struct Env {
        _project_dir: TempDir,
        library: TempDir,
        host: InMemoryHost,
    }

    impl Env {
        fn with_source(text: &str) -> Self {
            let project_dir = tempfile::tempdir().unwrap();
            fs::write(project_dir.path().join(CATALOG_FILENAME), text).unwrap();
            let host = InMemoryHost::saved_at(project_dir.path().join("scene.blend"));
            Self {
                _project_dir: project_dir,
                library: tempfile::tempdir().unwrap(),
                host,
            }
        }

        fn dest_file(&self) -> PathBuf {
            self.library.path().join(CATALOG_FILENAME)
        }

        fn write_dest(&self, text: &str) {
            fs::write(self.dest_file(), text).unwrap();
        }

        fn read_dest(&self) -> String {
            fs::read_to_string(self.dest_file()).unwrap()
        }

        fn merge(&self) -> Result<MergeOutcome> {
            append_new_catalogs(&self.host, self.library.path())
        }
    }

    #[test]
    fn test_bootstrap_copies_source_verbatim() {
        let source = format!("# header\nVERSION 1\n\n{}:Props:Props\n", A);
        let env = Env::with_source(&source);

        assert_eq!(env.merge().unwrap(), MergeOutcome::Bootstrapped);
        assert_eq!(env.read_dest(), source);
        assert!(!backup_path(&env.dest_file()).exists());
    }

    #[test]
    fn test_bootstrap_copies_non_utf8_source_bytes() {
        let env = Env::with_source("");
        let bytes = b"VERSION 1\n\xe9t\xe9\n".to_vec();
        fs::write(env._project_dir.path().join(CATALOG_FILENAME), &bytes).unwrap();

        assert_eq!(env.merge().unwrap(), MergeOutcome::Bootstrapped);
        assert_eq!(fs::read(env.dest_file()).unwrap(), bytes);
    }

    #[test]
    fn test_bootstrap_from_text_block() {
        let library = tempfile::tempdir().unwrap();
        let text = format!("VERSION 1\n{}:Props:Props", A);
        let host = InMemoryHost::new().with_text_block(CATALOG_FILENAME, &text);

        let outcome = append_new_catalogs(&host, library.path()).unwrap();
        assert_eq!(outcome, MergeOutcome::Bootstrapped);
        assert_eq!(
            fs::read_to_string(library.path().join(CATALOG_FILENAME)).unwrap(),
            text
        );
    }

    #[test]
    fn test_bootstrap_without_source_writes_nothing() {
        let library = tempfile::tempdir().unwrap();
        let host = InMemoryHost::new();

        assert_eq!(
            append_new_catalogs(&host, library.path()).unwrap(),
            MergeOutcome::NoSource
        );
        assert!(!library.path().join(CATALOG_FILENAME).exists());
    }

    #[test]
    fn test_union_keeps_destination_line() {
        let env = Env::with_source(&format!(
            "VERSION 1\n{}:Source/A:A\n{}:Source/B:B\n",
            A, B
        ));
        env.write_dest(&format!("VERSION 1\n{}:Dest/B:B\n{}:Dest/C:C\n", B, C));

        let outcome = env.merge().unwrap();
        assert!(matches!(outcome, MergeOutcome::Appended { count: 1, .. }));

        let merged = Catalog::parse(&env.read_dest());
        assert_eq!(merged.len(), 3);
        let b = uuid::Uuid::parse_str(B).unwrap();
        assert_eq!(merged.get(&b).unwrap().line, format!("{}:Dest/B:B", B));
        assert!(env.read_dest().contains(&format!("{}:Source/A:A", A)));
    }

    #[test]
    fn test_descriptor_drift_is_not_merged() {
        // Same UUID, different descriptor: the destination keeps its own line.
        let env = Env::with_source(&format!("VERSION 1\n{}:Renamed:Renamed\n", A));
        let dest = format!("VERSION 1\n{}:Original:Original\n", A);
        env.write_dest(&dest);

        assert_eq!(env.merge().unwrap(), MergeOutcome::UpToDate);
        assert_eq!(env.read_dest(), dest);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let env = Env::with_source(&format!("VERSION 1\n{}:A:A\n{}:B:B\n", A, B));
        env.write_dest(&format!("VERSION 1\n{}:C:C\n", C));

        assert!(matches!(
            env.merge().unwrap(),
            MergeOutcome::Appended { count: 2, .. }
        ));
        let after_first = env.read_dest();
        let backup_after_first = fs::read_to_string(backup_path(&env.dest_file())).unwrap();

        assert_eq!(env.merge().unwrap(), MergeOutcome::UpToDate);
        assert_eq!(env.read_dest(), after_first);
        // no second backup generation was written
        assert_eq!(
            fs::read_to_string(backup_path(&env.dest_file())).unwrap(),
            backup_after_first
        );
    }

    #[test]
    fn test_backup_holds_previous_content() {
        let env = Env::with_source(&format!("VERSION 1\n{}:A:A\n", A));
        let dest = format!("VERSION 1\n{}:C:C\n", C);
        env.write_dest(&dest);

        let backup = match env.merge().unwrap() {
            MergeOutcome::Appended { backup, .. } => backup,
            other => panic!("expected append, got {:?}", other),
        };
        assert_eq!(fs::read_to_string(backup).unwrap(), dest);
    }

    #[test]
    fn test_append_adds_separator_when_missing() {
        let env = Env::with_source(&format!("VERSION 1\n{}:A:A", A));
        env.write_dest(&format!("VERSION 1\n{}:C:C", C));

        env.merge().unwrap();
        assert_eq!(
            env.read_dest(),
            format!("VERSION 1\n{}:C:C\n{}:A:A\n", C, A)
        );
    }

    #[test]
    fn test_preserves_unrecognized_destination_lines() {
        let env = Env::with_source(&format!("VERSION 1\n{}:A:A\n", A));
        let dest = "# Blender catalog\nVERSION 1\n\nsome stray line\n";
        env.write_dest(dest);

        env.merge().unwrap();
        assert!(env.read_dest().starts_with(dest));
    }

    #[test]
    fn test_newer_version_is_refused() {
        let env = Env::with_source(&format!("VERSION 1\n{}:A:A\n", A));
        let dest = format!("VERSION 999\n{}:C:C\n", C);
        env.write_dest(&dest);

        let err = env.merge().unwrap_err();
        assert!(matches!(
            err,
            AssetCopyError::CatalogVersion(CatalogVersionError::Unsupported { .. })
        ));
        assert_eq!(env.read_dest(), dest);
        assert!(!backup_path(&env.dest_file()).exists());
    }

    #[test]
    fn test_missing_version_is_refused() {
        let env = Env::with_source(&format!("VERSION 1\n{}:A:A\n", A));
        let dest = format!("{}:C:C\n", C);
        env.write_dest(&dest);

        let err = env.merge().unwrap_err();
        assert!(matches!(
            err,
            AssetCopyError::CatalogVersion(CatalogVersionError::Missing { .. })
        ));
        assert_eq!(env.read_dest(), dest);
    }

    #[test]
    fn test_version_checked_even_without_source() {
        let library = tempfile::tempdir().unwrap();
        fs::write(library.path().join(CATALOG_FILENAME), "VERSION 999\n").unwrap();

        let err = append_new_catalogs(&InMemoryHost::new(), library.path()).unwrap_err();
        assert!(matches!(err, AssetCopyError::CatalogVersion(_)));
    }

    #[test]
    fn test_no_source_leaves_destination_alone() {
        let library = tempfile::tempdir().unwrap();
        let dest = format!("VERSION 1\n{}:C:C\n", C);
        fs::write(library.path().join(CATALOG_FILENAME), &dest).unwrap();

        let outcome = append_new_catalogs(&InMemoryHost::new(), library.path()).unwrap();
        assert_eq!(outcome, MergeOutcome::NoSource);
        assert_eq!(
            fs::read_to_string(library.path().join(CATALOG_FILENAME)).unwrap(),
            dest
        );
    }
}
