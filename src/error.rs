//! Error handling for yaml-gen.
//! Defines the error type and result alias shared by every generation stage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a generation run.
///
/// Every variant carries enough context (operation, cause and, for the
/// formatter, the captured diagnostics) to be acted upon without re-running.
#[derive(Error, Debug)]
pub enum Error {
    /// No `--in` was given and stdin is an interactive terminal
    #[error("missing input: pass --in <FILE> or pipe a document on stdin")]
    MissingInput,

    /// The input file could not be opened
    #[error("failed to read input '{}': {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input document is not valid YAML/JSON
    #[error("failed to decode input {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Neither a declared nor a fallback package name could be derived
    #[error("package inference failed: {0}")]
    PackageInference(String),

    /// Template parsing or execution failed
    #[error("template error: {0:#}")]
    Template(#[from] minijinja::Error),

    /// The formatter executable is not on the search path
    #[error("{name} was not found, consider using `--format=false`")]
    FormatterNotFound { name: String },

    /// The formatter ran and reported a failure
    #[error("{name} failed ({cause}): {stderr}")]
    Formatter {
        name: String,
        cause: String,
        stderr: String,
    },

    /// The generated output could not be written to its destination file
    #[error("failed to write output '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other file system or stream failure
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Prints `error: <message>` to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
