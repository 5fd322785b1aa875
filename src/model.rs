//! The rendering model handed to templates.
//!
//! Field names are serialized capitalized, so templates read
//! `Gen.Name`, `Input.Data.<key>` and `Output.Package`.

use serde::Serialize;

use crate::config::Config;
use crate::input::InputOrigin;

/// Root rendering context, built once per run.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    pub gen: Gen,
    pub input: Input,
    pub output: Output,
}

/// Generator identity.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Gen {
    pub name: String,
    pub version: String,
}

/// Where the document came from and what it contains.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Input {
    /// Absolute input path, or `(stdin)`
    pub path: String,
    pub data: serde_json::Value,
}

/// Identifiers inferred for the generated file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub package: String,
}

impl Model {
    pub fn new(
        config: &Config,
        origin: &InputOrigin,
        data: serde_json::Value,
        package: String,
    ) -> Self {
        Self {
            gen: Gen {
                name: config.name.clone(),
                version: config.version.clone(),
            },
            input: Input {
                path: origin.to_path_string(),
                data,
            },
            output: Output { package },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_model_serializes_capitalized_fields() {
        let config = Config {
            name: "gen".to_string(),
            version: "v1".to_string(),
            ..Config::default()
        };
        let model = Model::new(
            &config,
            &InputOrigin::File(PathBuf::from("/work/data.yaml")),
            json!({"name": "widget"}),
            "demo".to_string(),
        );

        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({
                "Gen": {"Name": "gen", "Version": "v1"},
                "Input": {"Path": "/work/data.yaml", "Data": {"name": "widget"}},
                "Output": {"Package": "demo"}
            })
        );
    }

    #[test]
    fn test_stdin_origin_path() {
        let model = Model::new(
            &Config::default(),
            &InputOrigin::Stdin,
            serde_json::Value::Null,
            "main".to_string(),
        );
        assert_eq!(model.input.path, "(stdin)");
    }
}
