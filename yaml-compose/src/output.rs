//! Output sinks for the composed document.

use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::CliError;

/// Writes `document` to `path`, creating missing parent directories and
/// truncating any existing file.
///
/// # Errors
///
/// Returns [`CliError::CreateOutputDir`] when the parent directory cannot be
/// created or opened, and [`CliError::WriteOutput`] when the file cannot be
/// written.
pub fn write_file(path: &Utf8Path, document: &str) -> Result<(), CliError> {
    let write_err = |source| CliError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path.file_name().ok_or_else(|| {
        write_err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "output path has no file name",
        ))
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let dir = ensure_dir(parent)?;
    let mut file = dir
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(write_err)?;
    file.write_all(document.as_bytes()).map_err(write_err)?;
    tracing::debug!(path = %path, bytes = document.len(), "wrote composed document");
    Ok(())
}

/// Prints `document` followed by a newline.
///
/// # Errors
///
/// Returns [`CliError::Print`] when writing to `out` fails.
pub fn print<W: Write>(out: &mut W, document: &str) -> Result<(), CliError> {
    writeln!(out, "{document}")
        .and_then(|()| out.flush())
        .map_err(CliError::Print)
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, CliError> {
    let create_err = |source| CliError::CreateOutputDir {
        path: path.to_path_buf(),
        source,
    };
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(create_err)?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(create_err)
        }
        Err(open_err) => Err(create_err(open_err)),
    }
}

#[cfg(test)]
mod tests {
    use super::{print, write_file};
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use std::io;
    use test_helpers::ComposeTree;

    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("write stdout failed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[rstest]
    fn print_appends_newline() -> Result<()> {
        let mut out = Vec::new();
        print(&mut out, "a: 1\n")?;
        ensure!(out == b"a: 1\n\n", "unexpected {out:?}");
        Ok(())
    }

    #[rstest]
    fn print_failure_is_reported() {
        let err = print(&mut FailingWriter, "a: 1").expect_err("write must fail");
        assert!(err.to_string().starts_with("print output"));
    }

    #[rstest]
    fn write_creates_parent_directories() -> Result<()> {
        let tree = ComposeTree::new()?;
        let target = tree.root().join("nested/deeper/out.yaml");
        write_file(&target, "a: 1\n")?;
        ensure!(tree.read_file("nested/deeper/out.yaml")? == "a: 1\n");
        Ok(())
    }

    #[rstest]
    fn write_truncates_existing_file() -> Result<()> {
        let tree = ComposeTree::new()?;
        let target = tree.write_file("out.yaml", "a very long previous document\n")?;
        write_file(&target, "b: 2\n")?;
        ensure!(tree.read_file("out.yaml")? == "b: 2\n");
        Ok(())
    }

    #[rstest]
    fn parent_that_is_a_file_cannot_be_created() -> Result<()> {
        let tree = ComposeTree::new()?;
        tree.write_file("blocker", "file\n")?;
        let err = write_file(&tree.root().join("blocker/out.yaml"), "a: 1\n")
            .expect_err("parent is a file");
        ensure!(
            err.to_string().starts_with("create output directory"),
            "unexpected {err}"
        );
        Ok(())
    }
}
