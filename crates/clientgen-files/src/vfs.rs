//! In-memory file tree.
//!
//! Files are kept in a `BTreeMap` so iteration (and therefore export and
//! report order) is deterministic.

use crate::types::{FileEntry, FilePath, FilesError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// In-memory tree of generated files keyed by validated path.
///
/// # Examples
///
/// ```
/// use clientgen_files::FileSystem;
///
/// let mut fs = FileSystem::new();
/// fs.add_file("/api/users.ts", "export {};").unwrap();
///
/// assert!(fs.exists("/api/users.ts"));
/// assert_eq!(fs.read_file("/api/users.ts").unwrap(), "export {};");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSystem {
    files: BTreeMap<FilePath, FileEntry>,
}

impl FileSystem {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Adds or replaces a file.
    ///
    /// # Errors
    ///
    /// Returns a path validation error if `path` is not a valid tree path.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Result<()> {
        let path = FilePath::new(path)?;
        self.files.insert(path, FileEntry::new(content));
        Ok(())
    }

    /// Reads a file's content.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::FileNotFound`] if the file is absent.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<&str> {
        let path = FilePath::new(path)?;
        self.files
            .get(&path)
            .map(FileEntry::content)
            .ok_or_else(|| FilesError::FileNotFound {
                path: path.to_string(),
            })
    }

    /// Checks whether a file exists. Invalid paths never exist.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        FilePath::new(path).is_ok_and(|p| self.files.contains_key(&p))
    }

    /// Lists the files directly inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::FileNotFound`] if no file lives under `dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_files::FilesBuilder;
    ///
    /// let fs = FilesBuilder::new()
    ///     .add_file("/api/users.ts", "")
    ///     .add_file("/api/index.ts", "")
    ///     .add_file("/api/nested/deep.ts", "")
    ///     .build()
    ///     .unwrap();
    ///
    /// let files = fs.list_dir("/api").unwrap();
    /// assert_eq!(files.len(), 2);
    /// ```
    pub fn list_dir(&self, dir: &str) -> Result<Vec<&FilePath>> {
        let dir = dir.trim_end_matches('/');
        let entries: Vec<_> = self
            .files
            .keys()
            .filter(|path| path.parent().unwrap_or("") == dir)
            .collect();

        if entries.is_empty() && !self.files.keys().any(|p| p.as_str().starts_with(&format!("{dir}/"))) {
            return Err(FilesError::FileNotFound {
                path: dir.to_string(),
            });
        }
        Ok(entries)
    }

    /// Number of files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the tree holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All paths in sorted order.
    #[must_use]
    pub fn all_paths(&self) -> Vec<&FilePath> {
        self.files.keys().collect()
    }

    /// Iterates over all files in sorted order.
    pub fn files(&self) -> impl Iterator<Item = (&FilePath, &FileEntry)> {
        self.files.iter()
    }

    /// Total content size in bytes.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.files.values().map(FileEntry::size).sum()
    }

    /// Moves every file of `other` into this tree, replacing duplicates.
    pub fn merge(&mut self, other: Self) {
        self.files.extend(other.files);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_read() {
        let mut fs = FileSystem::new();
        fs.add_file("/index.ts", "export * from './api';").unwrap();

        assert_eq!(fs.file_count(), 1);
        assert_eq!(fs.read_file("/index.ts").unwrap(), "export * from './api';");
        assert!(fs.read_file("/missing.ts").unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_rejects_invalid_path() {
        let mut fs = FileSystem::new();
        assert!(fs.add_file("relative.ts", "").is_err());
        assert!(fs.add_file("/../escape.ts", "").is_err());
        assert!(fs.is_empty());
    }

    #[test]
    fn test_exists_with_invalid_path() {
        let fs = FileSystem::new();
        assert!(!fs.exists("not/absolute"));
    }

    #[test]
    fn test_list_dir_only_direct_children() {
        let mut fs = FileSystem::new();
        fs.add_file("/api/users.ts", "").unwrap();
        fs.add_file("/api/v2/users.ts", "").unwrap();
        fs.add_file("/types/user.ts", "").unwrap();

        let api: Vec<_> = fs.list_dir("/api").unwrap().iter().map(|p| p.as_str()).collect();
        assert_eq!(api, vec!["/api/users.ts"]);

        assert!(fs.list_dir("/stores").is_err());
    }

    #[test]
    fn test_list_dir_with_only_subdirectories() {
        let mut fs = FileSystem::new();
        fs.add_file("/api/v2/users.ts", "").unwrap();
        assert!(fs.list_dir("/api").unwrap().is_empty());
    }

    #[test]
    fn test_merge_and_sizes() {
        let mut a = FileSystem::new();
        a.add_file("/a.ts", "12345").unwrap();
        let mut b = FileSystem::new();
        b.add_file("/b.ts", "123").unwrap();
        b.add_file("/a.ts", "1").unwrap();

        a.merge(b);
        assert_eq!(a.file_count(), 2);
        assert_eq!(a.total_size(), 4);
    }

    #[test]
    fn test_paths_are_sorted() {
        let mut fs = FileSystem::new();
        fs.add_file("/z.ts", "").unwrap();
        fs.add_file("/a.ts", "").unwrap();
        let paths: Vec<_> = fs.all_paths().iter().map(|p| p.as_str()).collect();
        assert_eq!(paths, vec!["/a.ts", "/z.ts"]);
    }
}
