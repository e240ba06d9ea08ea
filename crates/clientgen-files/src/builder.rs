//! Builder for in-memory file trees.
//!
//! # Examples
//!
//! ```
//! use clientgen_files::FilesBuilder;
//!
//! let fs = FilesBuilder::new()
//!     .add_file("/index.ts", "export * from './api';")
//!     .add_file("/api/index.ts", "export {};")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(fs.file_count(), 2);
//! ```

use crate::types::{FilesError, Result};
use crate::vfs::FileSystem;
use clientgen_codegen::GeneratedCode;
use std::path::Path;

/// Fluent builder for [`FileSystem`].
///
/// Invalid paths are collected and reported by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct FilesBuilder {
    fs: FileSystem,
    errors: Vec<FilesError>,
}

impl FilesBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fs: FileSystem::new(),
            errors: Vec::new(),
        }
    }

    /// Creates a builder holding every file of a generated artifact group.
    ///
    /// Relative generated paths are placed under `base_path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_files::FilesBuilder;
    /// use clientgen_codegen::{GeneratedCode, GeneratedFile};
    ///
    /// let mut code = GeneratedCode::new("api");
    /// code.add_file(GeneratedFile::new("api/users.ts", "export {};"));
    ///
    /// let fs = FilesBuilder::from_generated_code(&code, "/")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(fs.exists("/api/users.ts"));
    /// ```
    #[must_use]
    pub fn from_generated_code(code: &GeneratedCode, base_path: impl AsRef<Path>) -> Self {
        let base = base_path.as_ref().to_string_lossy();
        let base = if base.ends_with('/') {
            base.into_owned()
        } else {
            format!("{base}/")
        };

        code.files.iter().fold(Self::new(), |builder, file| {
            builder.add_file(format!("{base}{}", file.path), file.content.clone())
        })
    }

    /// Adds a file.
    #[must_use]
    pub fn add_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Err(e) = self.fs.add_file(path, content) {
            self.errors.push(e);
        }
        self
    }

    /// Adds several files.
    #[must_use]
    pub fn add_files<P, C>(mut self, files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: AsRef<Path>,
        C: Into<String>,
    {
        for (path, content) in files {
            if let Err(e) = self.fs.add_file(path, content) {
                self.errors.push(e);
            }
        }
        self
    }

    /// Finishes the tree.
    ///
    /// # Errors
    ///
    /// Returns the first path error collected while adding files.
    pub fn build(self) -> Result<FileSystem> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.fs),
        }
    }

    /// Finishes the tree, dropping any files whose paths were invalid.
    #[must_use]
    pub fn build_unchecked(self) -> FileSystem {
        if !self.errors.is_empty() {
            tracing::warn!(count = self.errors.len(), "Dropped files with invalid paths");
        }
        self.fs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientgen_codegen::GeneratedFile;

    #[test]
    fn test_build_empty() {
        let fs = FilesBuilder::new().build().unwrap();
        assert!(fs.is_empty());
    }

    #[test]
    fn test_build_reports_first_error() {
        let result = FilesBuilder::new()
            .add_file("/ok.ts", "")
            .add_file("bad.ts", "")
            .add_file("/../worse.ts", "")
            .build();

        let err = result.unwrap_err();
        assert!(matches!(err, FilesError::PathNotAbsolute { .. }));
    }

    #[test]
    fn test_build_unchecked_keeps_valid_files() {
        let fs = FilesBuilder::new()
            .add_files(vec![("/ok.ts", "1"), ("bad.ts", "2")])
            .build_unchecked();
        assert_eq!(fs.file_count(), 1);
    }

    #[test]
    fn test_from_generated_code_with_base() {
        let mut code = GeneratedCode::new("types");
        code.add_file(GeneratedFile::new("types/user.ts", "export interface User {}"));
        code.add_file(GeneratedFile::new("types/index.ts", "export * from './user';"));

        let fs = FilesBuilder::from_generated_code(&code, "/out")
            .build()
            .unwrap();

        assert!(fs.exists("/out/types/user.ts"));
        assert!(fs.exists("/out/types/index.ts"));
    }
}
