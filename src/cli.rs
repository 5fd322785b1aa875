//! Command-line interface implementation for yaml-gen.
//! Provides argument parsing using clap; the generator's name, version and
//! description come from its [`Config`] at runtime.

use clap::{ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use log::warn;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{Config, Flags};

/// Command-line arguments structure for yaml-gen.
#[derive(Parser, Debug)]
pub struct Args {
    /// Input document (YAML or JSON); read from stdin when omitted
    #[arg(short = 'i', long = "in", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file; derived from the input name when omitted, `-` for stdout
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Package name; inferred from neighbouring sources when omitted
    #[arg(short, long, value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Pipe the generated source through the formatter
    #[arg(
        short = 'F',
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub format: Option<bool>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Merges the parsed arguments over the configured defaults.
    pub fn into_flags(self, config: &Config) -> Flags {
        let defaults = config.default_flags();
        Flags {
            input: self.input.or(defaults.input),
            output: self.output.or(defaults.output),
            package: self.package.or(defaults.package),
            format: self.format.unwrap_or(defaults.format),
        }
    }
}

/// Builds the clap command carrying the generator's identity.
pub fn command(config: &Config) -> Command {
    let command = Args::command()
        .name(config.name.clone())
        .bin_name(config.name.clone())
        .version(config.version.clone())
        .about(config.about.clone());
    match &config.long_about {
        Some(text) => command.long_about(text.clone()),
        None => command,
    }
}

/// Parses `args` (including the program name) for the given generator.
pub fn parse_args_from<I, T>(config: &Config, args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches: ArgMatches = command(config).try_get_matches_from(args)?;
    Args::from_arg_matches(&matches)
}

/// Parses the process arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors, `--help` and `--version`
pub fn get_args(config: &Config) -> Args {
    match parse_args_from(config, std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    }
}

/// Writes the help text to `out`; a failed write is only logged.
pub fn print_help<W: Write>(config: &Config, mut out: W) {
    let help = command(config).render_help();
    if let Err(e) = write!(out, "{help}").and_then(|()| out.flush()) {
        warn!("failed to print help: {e}");
    }
}
