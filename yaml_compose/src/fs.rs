//! Filesystem capability used by the composer to read base and layer files.

use std::collections::BTreeMap;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};

/// Read access to the files a composition needs.
pub trait ComposeFs {
    /// Read the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    fn read_file(&self, path: &Utf8Path) -> io::Result<Vec<u8>>;
}

impl<T: ComposeFs + ?Sized> ComposeFs for &T {
    fn read_file(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        (**self).read_file(path)
    }
}

/// The host filesystem, reached through ambient authority.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmbientFs;

impl ComposeFs for AmbientFs {
    fn read_file(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// An in-memory filesystem keyed by path.
///
/// # Examples
///
/// ```rust
/// use camino::Utf8Path;
/// use yaml_compose::{ComposeFs, MemoryFs};
///
/// let fs = MemoryFs::new().with_file("base.yaml", "doe: a deer\n");
/// assert_eq!(fs.read_file(Utf8Path::new("base.yaml"))?, b"doe: a deer\n");
/// # Ok::<_, std::io::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<Utf8PathBuf, Vec<u8>>,
}

impl MemoryFs {
    /// Create an empty filesystem.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Store `contents` at `path`, replacing any previous file.
    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder form of [`MemoryFs::insert`].
    #[must_use]
    pub fn with_file(mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }
}

impl ComposeFs for MemoryFs {
    fn read_file(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{path}: file does not exist"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AmbientFs, ComposeFs, MemoryFs};
    use anyhow::{Context, Result, ensure};
    use camino::{Utf8Path, Utf8PathBuf};
    use rstest::rstest;
    use std::io;

    #[rstest]
    fn memory_fs_reports_missing_files_as_not_found() {
        let fs = MemoryFs::new();
        let err = fs
            .read_file(Utf8Path::new("missing.yaml"))
            .expect_err("missing file must fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn memory_fs_replaces_existing_files() -> Result<()> {
        let mut fs = MemoryFs::new().with_file("a.yaml", "one");
        fs.insert("a.yaml", "two");
        ensure!(fs.read_file(Utf8Path::new("a.yaml"))? == b"two", "file should be replaced");
        Ok(())
    }

    fn read_through<F: ComposeFs>(fs: F, path: &str) -> io::Result<Vec<u8>> {
        fs.read_file(Utf8Path::new(path))
    }

    #[rstest]
    fn borrowed_filesystems_delegate() -> Result<()> {
        let fs = MemoryFs::new().with_file("a.yaml", "one");
        ensure!(read_through(&fs, "a.yaml")? == b"one", "delegation failed");
        ensure!(read_through(fs, "a.yaml")? == b"one", "owned read failed");
        Ok(())
    }

    #[rstest]
    fn ambient_fs_reads_from_disk() -> Result<()> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let path = Utf8PathBuf::from_path_buf(dir.path().join("base.yaml"))
            .map_err(|path| anyhow::anyhow!("non UTF-8 temp path {}", path.display()))?;
        std::fs::write(&path, "doe: a deer\n").context("write base file")?;
        ensure!(
            AmbientFs.read_file(&path)? == b"doe: a deer\n",
            "unexpected contents"
        );
        Ok(())
    }
}
