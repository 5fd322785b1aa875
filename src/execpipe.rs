//! Pipes rendered source through an external formatter.
//!
//! The formatter reads the source on stdin and writes the formatted result on
//! stdout; its stderr is kept for error reports. Both output streams are
//! drained on their own threads while the main thread feeds stdin, so a
//! formatter that fills its stdout pipe before reading all input never blocks.

use std::ffi::OsStr;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, ScopedJoinHandle};

use log::debug;

use crate::error::{Error, Result};

/// Captured streams of one formatter run.
#[derive(Debug, Default)]
pub struct PipeOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
}

/// Looks `executable` up on the `PATH`.
///
/// # Errors
/// * `Error::FormatterNotFound` if it is not there
pub fn check_path(executable: &str) -> Result<PathBuf> {
    which::which(executable).map_err(|e| {
        debug!("{} lookup failed: {}", executable, e);
        Error::FormatterNotFound {
            name: executable.to_string(),
        }
    })
}

/// Runs `program` with `args`, feeding it `input` and returning what it wrote
/// on both output streams.
///
/// # Errors
/// * `Error::Formatter` if the program cannot be started, its streams fail,
///   or it exits unsuccessfully. The error carries the captured stderr.
pub fn run<P, S>(input: &[u8], program: P, args: &[S]) -> Result<PipeOutput>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let name = program.to_string_lossy().into_owned();
    let fail = |cause: String, stderr: String| Error::Formatter {
        name: name.clone(),
        cause,
        stderr,
    };

    debug!("Piping {} bytes through {}", input.len(), name);
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| fail(e.to_string(), String::new()))?;

    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (written, status, stdout, stderr) = thread::scope(|s| {
        // Readers start before the first byte is written.
        let stdout_reader = s.spawn(move || drain(stdout));
        let stderr_reader = s.spawn(move || drain(stderr));

        // Dropping the pipe closes the formatter's stdin.
        let written = match stdin {
            Some(mut pipe) => pipe.write_all(input),
            None => Ok(()),
        };
        let status = child.wait();

        (written, status, join(stdout_reader), join(stderr_reader))
    });

    let stderr = stderr
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default();
    let output = PipeOutput {
        stdout: stdout.map_err(|e| fail(e.to_string(), stderr.clone()))?,
        stderr,
    };

    check_status(status, written).map_err(|cause| fail(cause, output.stderr.clone()))?;
    Ok(output)
}

fn drain<R: Read>(stream: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        stream.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

fn join(handle: ScopedJoinHandle<'_, io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("pipe reader panicked")))
}

fn check_status(
    status: io::Result<ExitStatus>,
    written: io::Result<()>,
) -> std::result::Result<(), String> {
    let status = status.map_err(|e| e.to_string())?;
    if !status.success() {
        return Err(status.to_string());
    }
    // A formatter that exits cleanly without reading all input still lost data.
    written.map_err(|e| e.to_string())
}
