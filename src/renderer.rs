//! Template renderer for yaml-gen.
//! Executes the generator template against the [`Model`] with MiniJinja and a
//! fixed set of helper functions.
use std::path::{Path, PathBuf};

use minijinja::{Environment, ErrorKind, UndefinedBehavior, Value};

use crate::error::Result;
use crate::input::clean_path;
use crate::model::Model;

/// Name the template is registered under. It has no `.html` suffix, so
/// MiniJinja never auto-escapes the output.
pub const TEMPLATE_NAME: &str = "template";

/// Helpers available to every template, both as `f(x)` and `x | f`.
pub const HELPERS: [&str; 4] = ["basename", "dirname", "abs", "jsonify"];

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string against the generation model.
    ///
    /// # Arguments
    /// * `template` - Template source
    /// * `model` - Rendering context
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text
    fn render(&self, template: &str, model: &Model) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment with the helpers registered
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a strict environment: undefined fields are errors and the
    /// template's trailing newline is kept.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        register_helpers(&mut env);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::Template` if:
    ///   - The template fails to parse
    ///   - Execution touches an undefined field
    ///   - A helper function fails
    fn render(&self, template: &str, model: &Model) -> Result<String> {
        let mut env = self.env.clone();
        env.add_template_owned(TEMPLATE_NAME, template.to_string())?;

        let tmpl = env.get_template(TEMPLATE_NAME)?;
        Ok(tmpl.render(Value::from_serialize(model))?)
    }
}

fn register_helpers(env: &mut Environment<'static>) {
    env.add_function(HELPERS[0], basename);
    env.add_filter(HELPERS[0], basename);
    env.add_function(HELPERS[1], dirname);
    env.add_filter(HELPERS[1], dirname);
    env.add_function(HELPERS[2], abs);
    env.add_filter(HELPERS[2], abs);
    env.add_function(HELPERS[3], jsonify);
    env.add_filter(HELPERS[3], jsonify);
}

/// Last element of `path`. Trailing slashes are ignored.
pub fn basename(path: String) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    match trimmed.rfind('/') {
        Some(idx) => trimmed[idx + 1..].to_string(),
        None => trimmed.to_string(),
    }
}

/// Everything up to the last `/` of `path`, cleaned. `.` when there is no
/// `/` at all.
pub fn dirname(path: String) -> String {
    match path.rfind('/') {
        Some(idx) => clean_path(Path::new(&path[..=idx])).display().to_string(),
        None => ".".to_string(),
    }
}

/// Absolute, lexically cleaned form of `path`.
pub fn abs(path: String) -> std::result::Result<String, minijinja::Error> {
    let joined = if Path::new(&path).is_absolute() {
        PathBuf::from(&path)
    } else {
        let cwd = std::env::current_dir().map_err(|e| {
            minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("abs: cannot resolve '{path}'"),
            )
            .with_source(e)
        })?;
        cwd.join(&path)
    };
    Ok(clean_path(&joined).display().to_string())
}

/// Serializes `value` as two-space indented JSON. `<`, `>` and `&` are
/// written as-is.
pub fn jsonify(value: Value) -> std::result::Result<String, minijinja::Error> {
    serde_json::to_string_pretty(&value).map_err(|e| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "jsonify: cannot serialize value")
            .with_source(e)
    })
}
