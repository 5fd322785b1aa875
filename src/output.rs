//! Output destination resolution and writing.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::input::InputOrigin;

/// Where the generated source goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Picks the destination for an input of the given origin.
///
/// An explicit `output` wins (`-` meaning stdout). Otherwise stdin input goes
/// to stdout and file input to the input path with its extension replaced by
/// `extension`.
pub fn resolve_target(
    origin: &InputOrigin,
    output: Option<&Path>,
    extension: &str,
) -> OutputTarget {
    match (output, origin) {
        (Some(path), _) if path == Path::new("-") => OutputTarget::Stdout,
        (Some(path), _) => OutputTarget::File(path.to_path_buf()),
        (None, InputOrigin::Stdin) => OutputTarget::Stdout,
        (None, InputOrigin::File(input)) => {
            OutputTarget::File(derive_output_path(input, extension))
        }
    }
}

/// `dir/data.yaml` becomes `dir/data.<extension>`.
pub fn derive_output_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

/// Writes `content` to `target`; `stdout` is only touched for
/// [`OutputTarget::Stdout`].
///
/// # Errors
/// * `Error::Io` if writing to `stdout` fails
/// * `Error::OutputWrite` if the file cannot be created or written
pub fn write_output<W: Write>(content: &[u8], target: &OutputTarget, mut stdout: W) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            stdout.write_all(content)?;
            stdout.flush()?;
            Ok(())
        }
        OutputTarget::File(path) => {
            debug!("Writing file: {}", path.display());
            write_file(path, content).map_err(|source| Error::OutputWrite {
                path: path.clone(),
                source,
            })
        }
    }
}

fn write_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.write_all(content)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("/work/data.yaml"), "go"),
            PathBuf::from("/work/data.go")
        );
        assert_eq!(
            derive_output_path(Path::new("/work/data.v1.json"), "go"),
            PathBuf::from("/work/data.v1.go")
        );
        assert_eq!(
            derive_output_path(Path::new("/work/data"), "go"),
            PathBuf::from("/work/data.go")
        );
    }

    #[test]
    fn test_resolve_target() {
        let file = InputOrigin::File(PathBuf::from("/work/data.yaml"));
        assert_eq!(resolve_target(&InputOrigin::Stdin, None, "go"), OutputTarget::Stdout);
        assert_eq!(
            resolve_target(&file, None, "go"),
            OutputTarget::File(PathBuf::from("/work/data.go"))
        );
        assert_eq!(
            resolve_target(&file, Some(Path::new("-")), "go"),
            OutputTarget::Stdout
        );
        assert_eq!(
            resolve_target(&InputOrigin::Stdin, Some(Path::new("out.go")), "go"),
            OutputTarget::File(PathBuf::from("out.go"))
        );
    }

    #[test]
    fn test_write_stdout() {
        let mut buf = Vec::new();
        write_output(b"package demo\n", &OutputTarget::Stdout, &mut buf).unwrap();
        assert_eq!(buf, b"package demo\n");
    }

    #[test]
    fn test_write_file_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.go");
        std::fs::write(&path, "a much longer previous content\n").unwrap();

        let mut stdout = Vec::new();
        write_output(b"package demo\n", &OutputTarget::File(path.clone()), &mut stdout).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "package demo\n");
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_write_file_error_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("data.go");

        let err = write_output(b"x", &OutputTarget::File(path), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::OutputWrite { .. }));
        assert!(err.to_string().contains("data.go"));
    }
}
