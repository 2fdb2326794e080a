//! Temporary on-disk composition trees.
//!
//! A [`ComposeTree`] owns a temporary directory holding a base file and its
//! `<base>.d/` layer directory. The directory is removed when the tree is
//! dropped.
//!
//! # Examples
//!
//! ```
//! use yaml_compose_test_helpers::ComposeTree;
//!
//! let tree = ComposeTree::new()?;
//! tree.write_base("doe: a deer\n")?;
//! tree.write_layer("1-c.yaml", "xmas: false\n")?;
//! assert!(tree.layer_dir().join("1-c.yaml").is_file());
//! # Ok::<_, anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tempfile::TempDir;

const DEFAULT_BASE: &str = "base.yaml";

/// A temporary directory laid out for a composition run.
pub struct ComposeTree {
    _temp: TempDir,
    root: Utf8PathBuf,
    dir: Dir,
    base_name: String,
}

impl ComposeTree {
    /// Create an empty tree whose base file is called `base.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        Self::with_base_name(DEFAULT_BASE)
    }

    /// Create an empty tree whose base file is called `base_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn with_base_name(base_name: &str) -> Result<Self> {
        let temp = tempfile::tempdir().context("create composition tempdir")?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("tempdir path is not valid UTF-8: {}", path.display()))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())
            .with_context(|| format!("open {root} with cap-std"))?;
        Ok(Self {
            _temp: temp,
            root,
            dir,
            base_name: base_name.to_owned(),
        })
    }

    /// Root of the temporary directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of the base file.
    #[must_use]
    pub fn base_path(&self) -> Utf8PathBuf {
        self.root.join(&self.base_name)
    }

    /// Absolute path of the layer directory.
    #[must_use]
    pub fn layer_dir(&self) -> Utf8PathBuf {
        self.root.join(self.layer_dir_name())
    }

    /// Write the base file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_base(&self, contents: &str) -> Result<&Self> {
        self.write_file(&self.base_name, contents)?;
        Ok(self)
    }

    /// Create the layer directory without adding any layers.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create_layer_dir(&self) -> Result<&Self> {
        let name = self.layer_dir_name();
        self.dir
            .create_dir_all(&name)
            .with_context(|| format!("create {name}"))?;
        Ok(self)
    }

    /// Write a layer file, creating the layer directory when needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write_layer(&self, name: &str, contents: &str) -> Result<&Self> {
        self.create_layer_dir()?;
        self.write_file(&format!("{}/{name}", self.layer_dir_name()), contents)?;
        Ok(self)
    }

    /// Write `contents` at `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parents cannot be written.
    pub fn write_file(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let relative = Utf8Path::new(relative);
        if let Some(parent) = relative.parent().filter(|parent| !parent.as_str().is_empty()) {
            self.dir
                .create_dir_all(parent)
                .with_context(|| format!("create {parent}"))?;
        }
        self.dir
            .write(relative, contents)
            .with_context(|| format!("write {relative}"))?;
        Ok(self.root.join(relative))
    }

    /// Read the file at `relative` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_file(&self, relative: &str) -> Result<String> {
        self.dir
            .read_to_string(relative)
            .with_context(|| format!("read {relative}"))
    }

    fn layer_dir_name(&self) -> String {
        format!("{}.d", self.base_name)
    }
}
