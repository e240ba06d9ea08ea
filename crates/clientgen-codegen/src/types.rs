//! Types for generated output.
//!
//! A generation run produces one [`GeneratedCode`] per artifact group
//! (`types`, `api`, `client`, `stores`, `root`). Together they form the
//! artifact set that the orchestrator writes to disk.
//!
//! # Examples
//!
//! ```
//! use clientgen_codegen::{GeneratedCode, GeneratedFile};
//!
//! let mut code = GeneratedCode::new("api");
//! code.add_file(GeneratedFile::new("api/users.ts", "export {};"));
//! code.warn("Unknown services in services.include: ghost");
//!
//! assert_eq!(code.file_count(), 1);
//! assert_eq!(code.warnings.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Files produced by one artifact generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Artifact group that produced the files
    pub group: String,
    /// Generated files, paths relative to the output root
    pub files: Vec<GeneratedFile>,
    /// Non-fatal advisories raised while generating
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl GeneratedCode {
    /// Creates an empty container for an artifact group.
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds a generated file.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Records an advisory.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Returns the number of generated files.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns an iterator over the generated files.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Finds a file by relative path.
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// A single generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the output root, `/`-separated
    pub path: String,
    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Creates a file.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Returns the file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the file content.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_new() {
        let code = GeneratedCode::new("types");
        assert_eq!(code.group, "types");
        assert_eq!(code.file_count(), 0);
        assert!(code.warnings.is_empty());
    }

    #[test]
    fn test_file_lookup() {
        let mut code = GeneratedCode::new("api");
        code.add_file(GeneratedFile::new("api/index.ts", "export * from './users';"));
        code.add_file(GeneratedFile::new("api/users.ts", "export {};"));

        assert_eq!(code.file("api/users.ts").map(GeneratedFile::content), Some("export {};"));
        assert!(code.file("api/ghost.ts").is_none());
    }

    #[test]
    fn test_warnings_not_serialized_when_empty() {
        let code = GeneratedCode::new("root");
        let json = serde_json::to_string(&code).unwrap();
        assert!(!json.contains("warnings"));
    }
}
