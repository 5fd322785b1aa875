//! The generation pipeline: input, package inference, model, rendering,
//! optional formatting and output, in that order. Any failure aborts the run
//! before anything is written.

use std::io::{Read, Write};

use log::{debug, warn};

use crate::config::{Config, Flags};
use crate::error::{Error, Result};
use crate::execpipe;
use crate::input::{resolve_input, InputOrigin};
use crate::model::Model;
use crate::output::{resolve_target, write_output, OutputTarget};
use crate::package::PackageInferrer;
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};

/// Runs one document-in, source-out transformation per call.
pub struct Generator<'a> {
    config: &'a Config,
    engine: Box<dyn TemplateRenderer>,
    inferrer: PackageInferrer,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self::with_engine(config, Box::new(MiniJinjaRenderer::new()))
    }

    pub fn with_engine(config: &'a Config, engine: Box<dyn TemplateRenderer>) -> Self {
        Self {
            config,
            engine,
            inferrer: PackageInferrer::from_config(config),
        }
    }

    /// Executes the pipeline and returns where the output went.
    ///
    /// # Arguments
    /// * `flags` - Invocation flags
    /// * `stdin` - Read when `flags.input` is not set
    /// * `stdin_is_terminal` - Guards against blocking on an interactive stdin
    /// * `stdout` - Receives the output when the target is stdout
    ///
    /// # Flow
    /// 1. Rejects an interactive `stdin` when there is no `--in`
    /// 2. Checks the formatter is on the `PATH` (when formatting)
    /// 3. Reads and decodes the input document
    /// 4. Uses the `--package` override or infers the package
    /// 5. Builds the model and renders the template
    /// 6. Pipes the result through the formatter (when formatting)
    /// 7. Writes to the derived file or stdout
    pub fn generate<R: Read, W: Write>(
        &self,
        flags: &Flags,
        stdin: R,
        stdin_is_terminal: bool,
        stdout: W,
    ) -> Result<OutputTarget> {
        if flags.input.is_none() && stdin_is_terminal {
            return Err(Error::MissingInput);
        }
        let formatter = if flags.format {
            Some(execpipe::check_path(&self.config.formatter)?)
        } else {
            None
        };

        let (origin, data) = resolve_input(flags, stdin, stdin_is_terminal)?;
        let package = self.package_name(flags, &origin)?;
        debug!("Generating package '{}' from {}", package, origin);

        let model = Model::new(self.config, &origin, data, package);
        let mut content = self.render(&model)?.into_bytes();

        if let Some(formatter) = formatter {
            let formatted = execpipe::run(&content, &formatter, &[] as &[&str])?;
            if !formatted.stderr.is_empty() {
                warn!("{}: {}", formatter.display(), formatted.stderr.trim_end());
            }
            content = formatted.stdout;
        }

        let target = resolve_target(
            &origin,
            flags.output.as_deref(),
            &self.config.source_extension,
        );
        write_output(&content, &target, stdout)?;
        Ok(target)
    }

    /// Renders the configured template against `model`.
    pub fn render(&self, model: &Model) -> Result<String> {
        self.engine.render(&self.config.template, model)
    }

    fn package_name(&self, flags: &Flags, origin: &InputOrigin) -> Result<String> {
        match flags.package.as_deref() {
            Some(package) if !package.is_empty() => Ok(package.to_string()),
            _ => self.inferrer.infer(origin),
        }
    }
}
