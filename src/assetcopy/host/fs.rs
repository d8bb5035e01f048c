use super::{ImageInfo, LinkedLibrary, ProjectHost, ProjectInventory, SaveOptions};
use crate::error::Result;
use crate::placement::compression;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// A project that lives in a single file on disk.
///
/// The file is always considered saved and clean, so "saving a copy" means copying
/// its bytes. When compression is requested and the file is not already framed as
/// gzip or Zstandard, the copy is gzip-encoded.
pub struct FileHost {
    path: PathBuf,
    inventory: ProjectInventory,
}

impl FileHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inventory: ProjectInventory::default(),
        }
    }

    pub fn with_inventory(mut self, inventory: ProjectInventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_compressed(&self, dest: &Path) -> Result<()> {
        let mut source = File::open(&self.path)?;
        let mut encoder = GzEncoder::new(File::create(dest)?, Compression::default());
        io::copy(&mut source, &mut encoder)?;
        encoder.finish()?;
        Ok(())
    }
}

impl ProjectHost for FileHost {
    fn filepath(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }

    fn is_saved(&self) -> bool {
        self.path.is_file()
    }

    fn is_dirty(&self) -> bool {
        false
    }

    fn save_copy(&mut self, path: &Path, options: SaveOptions) -> Result<()> {
        if options.relative_remap {
            tracing::debug!("Relative path remapping is not available for raw file copies");
        }

        if options.compress && compression::detect(&self.path)?.is_none() {
            tracing::debug!(dest = %path.display(), "Writing gzip-compressed copy");
            self.write_compressed(path)
        } else {
            tracing::debug!(dest = %path.display(), "Copying project file");
            fs::copy(&self.path, path)?;
            Ok(())
        }
    }

    fn text_block(&self, name: &str) -> Option<String> {
        self.inventory.text_block(name)
    }

    fn has_marked_assets(&self) -> bool {
        self.inventory.has_assets
    }

    fn images(&self) -> Vec<ImageInfo> {
        self.inventory.images.clone()
    }

    fn linked_libraries(&self) -> Vec<LinkedLibrary> {
        self.inventory.libraries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn opts(compress: bool) -> SaveOptions {
        SaveOptions {
            compress,
            relative_remap: false,
        }
    }

    #[test]
    fn test_save_copy_plain() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("scene.blend");
        fs::write(&src, b"BLENDER-v300 data").unwrap();

        let mut host = FileHost::new(&src);
        let dest = dir.path().join("copy.blend");
        host.save_copy(&dest, opts(false)).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"BLENDER-v300 data");
    }

    #[test]
    fn test_save_copy_compresses_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("scene.blend");
        fs::write(&src, b"BLENDER-v300 data").unwrap();

        let mut host = FileHost::new(&src);
        let dest = dir.path().join("copy.blend");
        host.save_copy(&dest, opts(true)).unwrap();

        let raw = fs::read(&dest).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);

        let mut decoded = Vec::new();
        GzDecoder::new(&raw[..]).read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, b"BLENDER-v300 data");
    }

    #[test]
    fn test_save_copy_keeps_already_compressed_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("scene.blend");
        let zstd = [0x28, 0xb5, 0x2f, 0xfd, 0x01, 0x02];
        fs::write(&src, zstd).unwrap();

        let mut host = FileHost::new(&src);
        let dest = dir.path().join("copy.blend");
        host.save_copy(&dest, opts(true)).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), zstd);
    }

    #[test]
    fn test_saved_state_follows_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("scene.blend");
        let host = FileHost::new(&src);
        assert!(!host.is_saved());

        fs::write(&src, b"x").unwrap();
        assert!(host.is_saved());
        assert!(!host.is_dirty());
    }

    #[test]
    fn test_inventory_drives_introspection() {
        let mut inventory = ProjectInventory {
            has_assets: false,
            ..Default::default()
        };
        inventory.images.push(ImageInfo::external("wood.png"));
        inventory
            .text_blocks
            .insert("notes".to_string(), "hello".to_string());

        let host = FileHost::new("/nowhere/scene.blend").with_inventory(inventory);
        assert!(!host.has_marked_assets());
        assert_eq!(host.images().len(), 1);
        assert_eq!(host.text_block("notes").as_deref(), Some("hello"));
        assert_eq!(host.text_block("other"), None);
    }
}
