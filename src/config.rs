//! Configuration handling for yaml-gen.
//! The embedding binary describes its generator with a [`Config`]; the parsed
//! command line becomes an immutable [`Flags`] value read by every stage.

use std::path::PathBuf;

/// Template used when the embedding binary does not provide its own.
pub const DEFAULT_TEMPLATE: &str = "package {{ Output.Package }}\n";

/// Static description of a generator, constant for the whole process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Generator name, exposed to templates as `Gen.Name`
    pub name: String,
    /// Generator version, exposed to templates as `Gen.Version`
    pub version: String,
    /// One-line description shown in `--help`
    pub about: String,
    /// Longer usage text shown by `--help` below the one-liner
    pub long_about: Option<String>,
    /// Template source rendered against the model
    pub template: String,
    /// Executable the rendered text is piped through when formatting is on
    pub formatter: String,
    /// Extension (without the dot) of the generated source files
    pub source_extension: String,
    /// Keyword introducing a package declaration in those source files
    pub package_keyword: String,

    pub default_input: Option<PathBuf>,
    pub default_output: Option<PathBuf>,
    pub default_package: Option<String>,
    pub default_format: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            about: env!("CARGO_PKG_DESCRIPTION").to_string(),
            long_about: None,
            template: DEFAULT_TEMPLATE.to_string(),
            formatter: "goimports".to_string(),
            source_extension: "go".to_string(),
            package_keyword: "package".to_string(),
            default_input: None,
            default_output: None,
            default_package: None,
            default_format: true,
        }
    }
}

impl Config {
    /// Returns the flags a run gets when nothing is passed on the command line.
    pub fn default_flags(&self) -> Flags {
        Flags {
            input: self.default_input.clone(),
            output: self.default_output.clone(),
            package: self.default_package.clone(),
            format: self.default_format,
        }
    }
}

/// Per-invocation options. Never mutated once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    /// Input document; `None` reads standard input
    pub input: Option<PathBuf>,
    /// Destination override; `-` forces standard output
    pub output: Option<PathBuf>,
    /// Package name override; skips inference when set
    pub package: Option<String>,
    /// Pipe the rendered text through the formatter
    pub format: bool,
}
