//! Detects whether a project file on disk is already stored compressed.

use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Zstd,
}

/// Classifies a file header. Anything shorter than a magic number is uncompressed.
pub fn sniff(head: &[u8]) -> Option<Compression> {
    if head.starts_with(&GZIP_MAGIC) {
        Some(Compression::Gzip)
    } else if head.starts_with(&ZSTD_MAGIC) {
        Some(Compression::Zstd)
    } else {
        None
    }
}

/// Reads the first four bytes of `path` and classifies them.
pub fn detect(path: &Path) -> Result<Option<Compression>> {
    let mut head = Vec::with_capacity(ZSTD_MAGIC.len());
    File::open(path)?
        .take(ZSTD_MAGIC.len() as u64)
        .read_to_end(&mut head)?;
    Ok(sniff(&head))
}

/// Like [`detect`], but a project that has no file yet counts as uncompressed.
pub fn is_compressed(path: Option<&Path>) -> Result<bool> {
    match path {
        Some(path) => Ok(detect(path)?.is_some()),
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sniff() {
        assert_eq!(sniff(&[0x1f, 0x8b, 0x08, 0x00]), Some(Compression::Gzip));
        assert_eq!(sniff(&[0x28, 0xb5, 0x2f, 0xfd]), Some(Compression::Zstd));
        assert_eq!(sniff(b"BLENDER-v300"), None);
        assert_eq!(sniff(&[0x28, 0xb5]), None);
        assert_eq!(sniff(&[]), None);
    }

    #[test]
    fn test_detect_reads_header() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.blend");
        let zstd = dir.path().join("zstd.blend");
        fs::write(&plain, b"BLENDER-v300REST").unwrap();
        fs::write(&zstd, [0x28, 0xb5, 0x2f, 0xfd, 0x00, 0x01]).unwrap();

        assert_eq!(detect(&plain).unwrap(), None);
        assert_eq!(detect(&zstd).unwrap(), Some(Compression::Zstd));
        assert!(is_compressed(Some(&zstd)).unwrap());
    }

    #[test]
    fn test_unsaved_project_is_uncompressed() {
        assert!(!is_compressed(None).unwrap());
    }

    #[test]
    fn test_detect_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(detect(&dir.path().join("missing.blend")).is_err());
    }
}
