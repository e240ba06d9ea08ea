//! Rollback guard for an output tree.
//!
//! [`OutputGuard`] tracks everything a generation run writes. Dropping it
//! without calling [`commit`](OutputGuard::commit) undoes the run:
//!
//! - if the run created the output root, the whole root is removed;
//! - otherwise written files are removed (or restored to their previous
//!   content) and directories created by the run are removed.
//!
//! # Examples
//!
//! ```
//! use clientgen_files::{ExportOptions, FilesBuilder, OutputGuard};
//! # use tempfile::TempDir;
//!
//! # let temp = TempDir::new().unwrap();
//! let root = temp.path().join("out");
//! let fs = FilesBuilder::new().add_file("/index.ts", "export {};").build().unwrap();
//!
//! {
//!     let mut guard = OutputGuard::begin(&root, ExportOptions::default()).unwrap();
//!     guard.write(&fs).unwrap();
//!     // dropped without commit
//! }
//! assert!(!root.exists());
//!
//! let mut guard = OutputGuard::begin(&root, ExportOptions::default()).unwrap();
//! guard.write(&fs).unwrap();
//! let report = guard.commit();
//! assert_eq!(report.written_files.len(), 1);
//! assert!(root.join("index.ts").exists());
//! ```

use crate::filesystem::{ExportOptions, ExportReport};
use crate::types::{FilesError, Result};
use crate::vfs::FileSystem;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Tracks writes under one output root and undoes them on drop.
#[derive(Debug)]
pub struct OutputGuard {
    root: PathBuf,
    created_top: Option<PathBuf>,
    options: ExportOptions,
    report: ExportReport,
    armed: bool,
}

impl OutputGuard {
    /// Starts a guarded run, creating `root` (and missing parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns [`FilesError::WriteFailed`] if the root cannot be created.
    pub fn begin(root: impl Into<PathBuf>, options: ExportOptions) -> Result<Self> {
        let root = root.into();
        let created_top = topmost_missing(&root);

        if created_top.is_some() {
            fs::create_dir_all(&root).map_err(|e| FilesError::write_failed(&root, &e))?;
            tracing::debug!(root = %root.display(), "Created output root");
        }

        Ok(Self {
            root,
            created_top,
            options,
            report: ExportReport::default(),
            armed: true,
        })
    }

    /// Output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `true` if this run created the output root.
    #[must_use]
    pub const fn created_root(&self) -> bool {
        self.created_top.is_some()
    }

    /// Progress so far.
    #[must_use]
    pub const fn report(&self) -> &ExportReport {
        &self.report
    }

    /// Writes a file tree under the root, tracking every change.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory or file cannot be written. Changes
    /// made before the failure are still tracked for rollback.
    pub fn write(&mut self, files: &FileSystem) -> Result<()> {
        files.export_with_options(&self.root, &self.options, &mut self.report)
    }

    /// Keeps everything written and returns the final report.
    #[must_use]
    pub fn commit(mut self) -> ExportReport {
        self.armed = false;
        std::mem::take(&mut self.report)
    }

    fn rollback(&mut self) {
        if let Some(top) = &self.created_top {
            match fs::remove_dir_all(top) {
                Ok(()) => tracing::debug!(path = %top.display(), "Removed incomplete output tree"),
                Err(e) => tracing::warn!(
                    path = %top.display(),
                    error = %e,
                    "Failed to remove incomplete output tree"
                ),
            }
            return;
        }

        let replaced: HashSet<&Path> = self
            .report
            .replaced_files
            .iter()
            .map(|(path, _)| path.as_path())
            .collect();

        for (path, previous) in &self.report.replaced_files {
            if let Err(e) = fs::write(path, previous) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to restore file");
            }
        }

        for path in &self.report.written_files {
            if replaced.contains(path.as_path()) {
                continue;
            }
            if let Err(e) = fs::remove_file(path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove file");
            }
        }

        for dir in self.report.created_dirs.iter().rev() {
            if let Err(e) = fs::remove_dir(dir) {
                tracing::warn!(path = %dir.display(), error = %e, "Failed to remove directory");
            }
        }

        tracing::debug!(
            root = %self.root.display(),
            files = self.report.written_files.len(),
            "Rolled back partial output"
        );
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        if self.armed {
            self.rollback();
        }
    }
}

/// Highest ancestor of `path` (or `path` itself) that does not exist yet.
fn topmost_missing(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return None;
    }
    let mut top = path.to_path_buf();
    while let Some(parent) = top.parent() {
        if parent.as_os_str().is_empty() || parent.exists() {
            break;
        }
        top = parent.to_path_buf();
    }
    Some(top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilesBuilder;
    use tempfile::TempDir;

    fn tree() -> FileSystem {
        FilesBuilder::new()
            .add_file("/types/user.ts", "export interface User {}")
            .add_file("/index.ts", "export * from './types';")
            .build()
            .unwrap()
    }

    #[test]
    fn test_rollback_removes_created_root_with_parents() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("a/b/out");

        {
            let mut guard = OutputGuard::begin(&root, ExportOptions::default()).unwrap();
            assert!(guard.created_root());
            guard.write(&tree()).unwrap();
        }

        assert!(!temp.path().join("a").exists());
    }

    #[test]
    fn test_rollback_in_existing_root_restores_state() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        fs::write(root.join("index.ts"), "// user file").unwrap();
        fs::write(root.join("keep.txt"), "keep").unwrap();

        {
            let mut guard = OutputGuard::begin(&root, ExportOptions::default()).unwrap();
            assert!(!guard.created_root());
            guard.write(&tree()).unwrap();
            assert!(root.join("types/user.ts").exists());
        }

        assert!(!root.join("types").exists());
        assert_eq!(fs::read_to_string(root.join("index.ts")).unwrap(), "// user file");
        assert_eq!(fs::read_to_string(root.join("keep.txt")).unwrap(), "keep");
    }

    #[test]
    fn test_commit_keeps_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("out");

        let mut guard = OutputGuard::begin(&root, ExportOptions::default()).unwrap();
        guard.write(&tree()).unwrap();
        let report = guard.commit();

        assert_eq!(report.written_files.len(), 2);
        assert!(root.join("types/user.ts").exists());
    }

    #[test]
    fn test_multiple_writes_accumulate() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("out");

        let mut guard = OutputGuard::begin(&root, ExportOptions::default()).unwrap();
        guard.write(&tree()).unwrap();
        let more = FilesBuilder::new().add_file("/api/index.ts", "export {};").build().unwrap();
        guard.write(&more).unwrap();

        assert_eq!(guard.report().written_files.len(), 3);
        drop(guard);
        assert!(!root.exists());
    }

    #[test]
    fn test_topmost_missing() {
        let temp = TempDir::new().unwrap();
        assert_eq!(topmost_missing(temp.path()), None);
        assert_eq!(
            topmost_missing(&temp.path().join("x/y")),
            Some(temp.path().join("x"))
        );
    }
}
