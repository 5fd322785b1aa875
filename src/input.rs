//! Input acquisition: picks standard input or the `--in` file and decodes the
//! document into a schema-less [`serde_json::Value`].

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::config::Flags;
use crate::error::{Error, Result};

/// Path reported for documents read from standard input.
pub const STDIN_SENTINEL: &str = "(stdin)";

/// Where the input document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOrigin {
    Stdin,
    /// Absolute path of the input file
    File(PathBuf),
}

impl InputOrigin {
    /// The origin as exposed to templates in `Input.Path`.
    pub fn to_path_string(&self) -> String {
        match self {
            InputOrigin::Stdin => STDIN_SENTINEL.to_string(),
            InputOrigin::File(path) => path.display().to_string(),
        }
    }
}

impl fmt::Display for InputOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputOrigin::Stdin => f.write_str(STDIN_SENTINEL),
            InputOrigin::File(path) => write!(f, "'{}'", path.display()),
        }
    }
}

/// Resolves the input named by `flags` and decodes it.
///
/// # Arguments
/// * `flags` - Invocation flags; `flags.input == None` selects `stdin`
/// * `stdin` - Standard input stream
/// * `stdin_is_terminal` - Whether `stdin` is an interactive terminal
///
/// # Errors
/// * `Error::MissingInput` when there is no `--in` and `stdin` is a terminal
/// * `Error::InputRead` when the input file cannot be opened
/// * `Error::Decode` when the document is not valid YAML/JSON
pub fn resolve_input<R: Read>(
    flags: &Flags,
    stdin: R,
    stdin_is_terminal: bool,
) -> Result<(InputOrigin, serde_json::Value)> {
    match &flags.input {
        None => {
            if stdin_is_terminal {
                return Err(Error::MissingInput);
            }
            debug!("Reading input from {STDIN_SENTINEL}");
            let origin = InputOrigin::Stdin;
            let data = read_input(BufReader::new(stdin), &origin)?;
            Ok((origin, data))
        }
        Some(path) => {
            let path = absolute_path(path)?;
            debug!("Reading input from {}", path.display());
            let file = File::open(&path).map_err(|source| Error::InputRead {
                path: path.clone(),
                source,
            })?;
            let origin = InputOrigin::File(path);
            let data = read_input(BufReader::new(file), &origin)?;
            Ok((origin, data))
        }
    }
}

/// Decodes the first YAML document of `reader`. An empty stream yields `null`.
pub fn read_input<R: Read>(reader: R, origin: &InputOrigin) -> Result<serde_json::Value> {
    let document = match serde_yaml::Deserializer::from_reader(reader).next() {
        Some(document) => document,
        None => return Ok(serde_json::Value::Null),
    };
    let value = serde_yaml::Value::deserialize(document).map_err(|source| Error::Decode {
        origin: origin.to_string(),
        source,
    })?;
    Ok(yaml_to_json(value))
}

/// Joins a relative path onto the current directory and cleans the result
/// lexically. Does not touch the file.
pub fn absolute_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(clean_path(path))
    } else {
        Ok(clean_path(&std::env::current_dir()?.join(path)))
    }
}

/// Removes `.` components and resolves `..` against the preceding element,
/// without consulting the file system. `..` directly under the root stays at
/// the root; leading `..` of a relative path are kept. An empty result is `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().map(|c| c.as_os_str()).collect()
}

/// Converts a decoded YAML tree into the JSON data model exposed to templates.
///
/// Non-string keys are stringified, tags are dropped, and non-finite floats
/// become `null` since JSON cannot represent them.
pub fn yaml_to_json(value: serde_yaml::Value) -> serde_json::Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => serde_json::Value::Null,
        Yaml::Bool(b) => serde_json::Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                serde_json::Value::from(i)
            } else if let Some(u) = n.as_u64() {
                serde_json::Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
        }
        Yaml::String(s) => serde_json::Value::String(s),
        Yaml::Sequence(seq) => {
            serde_json::Value::Array(seq.into_iter().map(yaml_to_json).collect())
        }
        Yaml::Mapping(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| (key_to_string(k), yaml_to_json(v)))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn key_to_string(key: serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Null => "null".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Tagged(tagged) => key_to_string(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
