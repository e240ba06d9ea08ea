//! Core types for the in-memory file tree.
//!
//! # Examples
//!
//! ```
//! use clientgen_files::{FileEntry, FilePath};
//!
//! let path = FilePath::new("/api/users.ts").unwrap();
//! let file = FileEntry::new("export {};");
//!
//! assert_eq!(path.as_str(), "/api/users.ts");
//! assert_eq!(file.content(), "export {};");
//! ```

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Errors raised by file tree operations and disk export.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilesError {
    /// File or directory not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// Path is empty or not valid UTF-8
    #[error("Invalid path: {path}")]
    InvalidPath {
        /// The invalid path
        path: String,
    },

    /// Path is not absolute (must start with '/')
    #[error("Path must be absolute: {path}")]
    PathNotAbsolute {
        /// The relative path
        path: String,
    },

    /// Path contains '..' or empty components
    #[error("Path contains invalid components: {path}")]
    InvalidPathComponent {
        /// The offending path
        path: String,
    },

    /// Disk operation failed
    #[error("Failed to write {path}: {message}")]
    WriteFailed {
        /// Disk path
        path: String,
        /// Underlying I/O error text
        message: String,
    },
}

impl FilesError {
    /// Returns `true` if this is a file not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Returns `true` for any path validation error.
    #[must_use]
    pub const fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. }
                | Self::PathNotAbsolute { .. }
                | Self::InvalidPathComponent { .. }
        )
    }

    /// Returns `true` if a disk operation failed.
    #[must_use]
    pub const fn is_write_failed(&self) -> bool {
        matches!(self, Self::WriteFailed { .. })
    }

    pub(crate) fn write_failed(path: &Path, err: &std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<FilesError> for clientgen_core::Error {
    fn from(err: FilesError) -> Self {
        let path = match &err {
            FilesError::FileNotFound { path }
            | FilesError::InvalidPath { path }
            | FilesError::PathNotAbsolute { path }
            | FilesError::InvalidPathComponent { path }
            | FilesError::WriteFailed { path, .. } => path.clone(),
        };
        Self::OutputUnwritable {
            path: path.into(),
            source: std::io::Error::other(err.to_string()),
        }
    }
}

/// Type alias for file tree results.
pub type Result<T> = std::result::Result<T, FilesError>;

/// A validated path inside the file tree.
///
/// Paths always use `/` separators, start with `/`, and never contain `..`
/// or empty components.
///
/// # Examples
///
/// ```
/// use clientgen_files::FilePath;
///
/// assert!(FilePath::new("/types/user.ts").is_ok());
/// assert!(FilePath::new("types/user.ts").is_err());
/// assert!(FilePath::new("/types/../escape.ts").is_err());
/// assert!(FilePath::new("/types//user.ts").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilePath(String);

impl FilePath {
    /// Creates a validated path.
    ///
    /// # Errors
    ///
    /// Returns a path validation error if the path is empty, relative, or
    /// contains `..` or empty components.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = path.to_str().ok_or_else(|| FilesError::InvalidPath {
            path: path.display().to_string(),
        })?;

        let normalized = if cfg!(target_os = "windows") {
            raw.replace(std::path::MAIN_SEPARATOR, "/")
        } else {
            raw.to_string()
        };

        if normalized.is_empty() {
            return Err(FilesError::InvalidPath {
                path: String::new(),
            });
        }

        if !normalized.starts_with('/') {
            return Err(FilesError::PathNotAbsolute { path: normalized });
        }

        let body = &normalized[1..];
        if body.is_empty() || body.split('/').any(|c| c.is_empty() || c == "." || c == "..") {
            return Err(FilesError::InvalidPathComponent { path: normalized });
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path without the leading `/`.
    #[must_use]
    pub fn relative(&self) -> &str {
        &self.0[1..]
    }

    /// Parent directory, `None` for top-level files.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_files::FilePath;
    ///
    /// let path = FilePath::new("/api/users.ts").unwrap();
    /// assert_eq!(path.parent(), Some("/api"));
    ///
    /// let root = FilePath::new("/index.ts").unwrap();
    /// assert_eq!(root.parent(), None);
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        match self.0.rfind('/') {
            Some(0) | None => None,
            Some(pos) => Some(&self.0[..pos]),
        }
    }

    /// Final path component.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content of one file in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    content: String,
}

impl FileEntry {
    /// Creates a file entry.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns the file content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_validation() {
        assert!(FilePath::new("/a.ts").is_ok());
        assert!(FilePath::new("/a/b/c.ts").is_ok());

        let err = FilePath::new("").unwrap_err();
        assert!(err.is_invalid_path());

        let err = FilePath::new("rel.ts").unwrap_err();
        assert!(matches!(err, FilesError::PathNotAbsolute { .. }));

        let err = FilePath::new("/").unwrap_err();
        assert!(matches!(err, FilesError::InvalidPathComponent { .. }));

        assert!(FilePath::new("/a/./b.ts").is_err());
        assert!(FilePath::new("/a/../b.ts").is_err());
    }

    #[test]
    fn test_file_path_parts() {
        let path = FilePath::new("/client/http.ts").unwrap();
        assert_eq!(path.relative(), "client/http.ts");
        assert_eq!(path.parent(), Some("/client"));
        assert_eq!(path.file_name(), "http.ts");
    }

    #[test]
    fn test_file_path_ordering() {
        let mut paths = vec![
            FilePath::new("/types/user.ts").unwrap(),
            FilePath::new("/api/index.ts").unwrap(),
        ];
        paths.sort();
        assert_eq!(paths[0].as_str(), "/api/index.ts");
    }

    #[test]
    fn test_files_error_into_core_error() {
        let err: clientgen_core::Error = FilesError::WriteFailed {
            path: "/out/a.ts".to_string(),
            message: "denied".to_string(),
        }
        .into();
        assert!(err.is_output_error());
        assert!(err.to_string().contains("/out/a.ts"));
    }
}
