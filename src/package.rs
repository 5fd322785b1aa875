//! Package name inference for the generated source.
//!
//! Sibling source files are scanned for a package declaration; when none is
//! found the directory name, sanitized into an identifier, is used instead.
//! This is a heuristic, not a parser: unreadable or binary files are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;
use regex::Regex;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::input::InputOrigin;

/// Scans source files next to the input for their declared package.
pub struct PackageInferrer {
    extension: String,
    declaration: Regex,
    invalid_chars: Regex,
}

impl PackageInferrer {
    /// Creates an inferrer for files ending in `.<extension>` that declare
    /// their package with `<keyword> <identifier>`.
    pub fn new(extension: &str, keyword: &str) -> Self {
        let declaration = Regex::new(&format!(
            r"^{}\s+([a-zA-Z][a-zA-Z0-9_]*)",
            regex::escape(keyword)
        ))
        .expect("package declaration pattern is valid");
        let invalid_chars = Regex::new(r"[^a-zA-Z0-9_]").expect("sanitize pattern is valid");

        Self {
            extension: format!(".{extension}"),
            declaration,
            invalid_chars,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.source_extension, &config.package_keyword)
    }

    /// Infers the package for an input with the given origin.
    ///
    /// Stdin input is resolved against the current directory, file input
    /// against the file's parent directory.
    pub fn infer(&self, origin: &InputOrigin) -> Result<String> {
        let dir = match origin {
            InputOrigin::Stdin => std::env::current_dir()?,
            InputOrigin::File(path) => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("/")),
        };
        self.infer_from_dir(&dir)
    }

    /// Returns the first package declared by a source file in `dir`, in
    /// file name order, falling back to the sanitized directory name.
    pub fn infer_from_dir(&self, dir: &Path) -> Result<String> {
        if let Some(name) = self.scan_dir(dir) {
            return Ok(name);
        }
        let fallback = self.fallback_name(dir)?;
        debug!(
            "No package declaration found in {}, using '{}'",
            dir.display(),
            fallback
        );
        Ok(fallback)
    }

    fn scan_dir(&self, dir: &Path) -> Option<String> {
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok());

        for entry in entries {
            if entry.file_type().is_dir() {
                continue;
            }
            let is_source = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(&self.extension));
            if !is_source {
                continue;
            }
            if let Some(name) = self.read_package(entry.path()) {
                debug!("Found package '{}' in {}", name, entry.path().display());
                return Some(name);
            }
        }
        None
    }

    /// Reads `path` line by line until a package declaration matches. Lines
    /// that are not valid UTF-8 are decoded lossily rather than ending the scan.
    pub fn read_package(&self, path: &Path) -> Option<String> {
        let file = File::open(path).ok()?;
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    debug!("Skipping {}: {}", path.display(), e);
                    return None;
                }
            }
            let line = String::from_utf8_lossy(&buf);
            if let Some(caps) = self.declaration.captures(line.trim()) {
                return Some(caps[1].to_string());
            }
        }
    }

    /// Directory base name with every character outside `[A-Za-z0-9_]`
    /// replaced by `_`.
    pub fn fallback_name(&self, dir: &Path) -> Result<String> {
        let base = dir.file_name().ok_or_else(|| {
            Error::PackageInference(format!("'{}' has no base name", dir.display()))
        })?;
        Ok(self
            .invalid_chars
            .replace_all(&base.to_string_lossy(), "_")
            .into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn inferrer() -> PackageInferrer {
        PackageInferrer::new("go", "package")
    }

    #[test]
    fn test_declaration_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.go"), "// Package foo does things.\n\npackage foo\n").unwrap();

        assert_eq!(inferrer().infer_from_dir(dir.path()).unwrap(), "foo");
    }

    #[test]
    fn test_first_file_by_name_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.go"), "package second\n").unwrap();
        fs::write(dir.path().join("a.go"), "package first\n").unwrap();

        assert_eq!(inferrer().infer_from_dir(dir.path()).unwrap(), "first");
    }

    #[test]
    fn test_indented_declaration_with_trailing_text() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("x.go"), "   package  my_pkg2 // comment\n").unwrap();

        assert_eq!(inferrer().infer_from_dir(dir.path()).unwrap(), "my_pkg2");
    }

    #[test]
    fn test_skips_other_extensions_and_dirs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "package nope\n").unwrap();
        fs::create_dir(dir.path().join("b.go")).unwrap();
        fs::write(dir.path().join("c.go"), "package yes\n").unwrap();

        assert_eq!(inferrer().infer_from_dir(dir.path()).unwrap(), "yes");
    }

    #[test]
    fn test_skips_binary_and_undeclared_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.go"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();
        fs::write(dir.path().join("b.go"), "func main() {}\n").unwrap();
        fs::write(dir.path().join("c.go"), "package last\n").unwrap();

        assert_eq!(inferrer().infer_from_dir(dir.path()).unwrap(), "last");
    }

    #[test]
    fn test_non_utf8_line_before_declaration() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.go"), b"// caf\xe9\npackage foo\n").unwrap();
        fs::write(dir.path().join("b.go"), "package other\n").unwrap();

        assert_eq!(inferrer().infer_from_dir(dir.path()).unwrap(), "foo");
    }

    #[test]
    fn test_identifier_must_start_with_letter() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("pkg");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("a.go"), "package 9lives\n").unwrap();

        assert_eq!(inferrer().infer_from_dir(&sub).unwrap(), "pkg");
    }

    #[test]
    fn test_fallback_sanitizes_dir_name() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("my-gen.v2 pkg");
        fs::create_dir(&sub).unwrap();

        assert_eq!(inferrer().infer_from_dir(&sub).unwrap(), "my_gen_v2_pkg");
    }

    #[test]
    fn test_unreadable_dir_falls_back() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-dir");

        assert_eq!(inferrer().infer_from_dir(&missing).unwrap(), "no_such_dir");
    }

    #[test]
    fn test_root_has_no_fallback() {
        let err = inferrer().fallback_name(Path::new("/")).unwrap_err();
        assert!(matches!(err, Error::PackageInference(_)));
    }

    #[test]
    fn test_infer_uses_input_parent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("model.go"), "package models\n").unwrap();
        let origin = InputOrigin::File(dir.path().join("data.yaml"));

        assert_eq!(inferrer().infer(&origin).unwrap(), "models");
    }

    #[test]
    fn test_custom_keyword() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.kt"), "package com\n").unwrap();
        fs::write(dir.path().join("b.rs"), "mod generated;\n").unwrap();

        let rust = PackageInferrer::new("rs", "mod");
        assert_eq!(rust.infer_from_dir(dir.path()).unwrap(), "generated");
    }
}
