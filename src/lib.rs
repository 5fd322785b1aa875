//! yaml-gen renders source code from a YAML (or JSON) document.
//! The document is exposed to a MiniJinja template together with the
//! generator's identity and an inferred package name; the result can be piped
//! through an external formatter before it is written.

/// Command-line interface module
pub mod cli;

/// Generator description and per-invocation flags
pub mod config;

/// Error types and handling
pub mod error;

/// External formatter piping
pub mod execpipe;

/// The end-to-end generation pipeline
pub mod generator;

/// Input document resolution and decoding
pub mod input;

/// Logger setup
pub mod logger;

/// Rendering model exposed to templates
pub mod model;

/// Output destination resolution and writing
pub mod output;

/// Package name inference from neighbouring source files
pub mod package;

/// Template rendering with the helper function registry
pub mod renderer;
