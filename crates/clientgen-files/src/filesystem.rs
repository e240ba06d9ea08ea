//! Disk export and import for [`FileSystem`].
//!
//! Export pre-creates every directory in one pass, then writes files in
//! sorted order. Everything it touches is recorded in an [`ExportReport`]
//! as it happens, so a caller can undo a partially completed export.
//!
//! # Examples
//!
//! ```
//! use clientgen_files::{ExportReport, FilesBuilder};
//! # use tempfile::TempDir;
//!
//! # let temp = TempDir::new().unwrap();
//! let fs = FilesBuilder::new()
//!     .add_file("/api/users.ts", "export {};")
//!     .build()
//!     .unwrap();
//!
//! let report = fs.export_to_filesystem(temp.path()).unwrap();
//! assert_eq!(report.written_files.len(), 1);
//! assert!(temp.path().join("api/users.ts").exists());
//! ```

use crate::types::{FilesError, Result};
use crate::vfs::FileSystem;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options for disk export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Write to a temp file, then rename
    pub atomic: bool,
    /// Replace files that already exist
    pub overwrite: bool,
}

impl ExportOptions {
    /// Atomic writes with overwrite enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            atomic: true,
            overwrite: true,
        }
    }

    /// Sets whether to use atomic writes.
    #[must_use]
    pub const fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Sets whether to overwrite existing files.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything an export changed on disk, in the order it happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Directories that did not exist before
    pub created_dirs: Vec<PathBuf>,
    /// Files written (new or replaced)
    pub written_files: Vec<PathBuf>,
    /// Previous content of replaced files
    pub replaced_files: Vec<(PathBuf, Vec<u8>)>,
    /// Files left alone because overwrite was off
    pub skipped_files: Vec<PathBuf>,
}

impl ExportReport {
    /// Returns `true` if nothing was changed on disk.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created_dirs.is_empty() && self.written_files.is_empty()
    }
}

impl FileSystem {
    /// Exports every file under `base_path` with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the base path is missing or any write fails.
    pub fn export_to_filesystem(&self, base_path: impl AsRef<Path>) -> Result<ExportReport> {
        let mut report = ExportReport::default();
        self.export_with_options(base_path, &ExportOptions::default(), &mut report)?;
        Ok(report)
    }

    /// Exports every file under `base_path`, recording progress in `report`.
    ///
    /// On error, `report` still lists what was changed before the failure.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Base path does not exist
    /// - A directory cannot be created
    /// - A file cannot be written
    pub fn export_with_options(
        &self,
        base_path: impl AsRef<Path>,
        options: &ExportOptions,
        report: &mut ExportReport,
    ) -> Result<()> {
        let base = base_path.as_ref();
        if !base.is_dir() {
            return Err(FilesError::FileNotFound {
                path: base.display().to_string(),
            });
        }

        for dir in self.collect_directories(base) {
            if dir.is_dir() {
                continue;
            }
            fs::create_dir(&dir).map_err(|e| FilesError::write_failed(&dir, &e))?;
            tracing::trace!(dir = %dir.display(), "Created directory");
            report.created_dirs.push(dir);
        }

        for (path, file) in self.files() {
            let disk_path = to_disk_path(path.relative(), base);

            if disk_path.exists() {
                if !options.overwrite {
                    report.skipped_files.push(disk_path);
                    continue;
                }
                let previous =
                    fs::read(&disk_path).map_err(|e| FilesError::write_failed(&disk_path, &e))?;
                report.replaced_files.push((disk_path.clone(), previous));
            }

            write_file(&disk_path, file.content(), options)?;
            tracing::debug!(path = %disk_path.display(), bytes = file.size(), "Wrote file");
            report.written_files.push(disk_path);
        }

        Ok(())
    }

    /// Loads every regular file under `root` into a tree.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or is not valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_files::{FileSystem, FilesBuilder};
    /// # use tempfile::TempDir;
    ///
    /// # let temp = TempDir::new().unwrap();
    /// let fs = FilesBuilder::new().add_file("/a/b.ts", "x").build().unwrap();
    /// fs.export_to_filesystem(temp.path()).unwrap();
    ///
    /// let loaded = FileSystem::load_from_disk(temp.path()).unwrap();
    /// assert_eq!(loaded, fs);
    /// ```
    pub fn load_from_disk(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let mut loaded = Self::new();

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|_| FilesError::InvalidPath {
                    path: entry.path().display().to_string(),
                })?;
            let normalized = relative.to_string_lossy().replace('\\', "/");
            let content = fs::read_to_string(entry.path())
                .map_err(|e| FilesError::write_failed(entry.path(), &e))?;
            loaded.add_file(format!("/{normalized}"), content)?;
        }

        Ok(loaded)
    }

    /// Every directory between `base` and the files, parents first.
    fn collect_directories(&self, base: &Path) -> BTreeSet<PathBuf> {
        let mut dirs = BTreeSet::new();
        for (path, _) in self.files() {
            let disk_path = to_disk_path(path.relative(), base);
            let mut current = disk_path.parent();
            while let Some(dir) = current {
                if dir == base || !dir.starts_with(base) || !dirs.insert(dir.to_path_buf()) {
                    break;
                }
                current = dir.parent();
            }
        }
        dirs
    }
}

/// Lists every regular file below `root`. A missing root has no files.
#[must_use]
pub fn existing_files(root: impl AsRef<Path>) -> Vec<PathBuf> {
    let root = root.as_ref();
    if !root.exists() {
        return Vec::new();
    }
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn to_disk_path(relative: &str, base: &Path) -> PathBuf {
    relative
        .split('/')
        .fold(base.to_path_buf(), |path, component| path.join(component))
}

fn write_file(path: &Path, content: &str, options: &ExportOptions) -> Result<()> {
    if !options.atomic {
        return fs::write(path, content).map_err(|e| FilesError::write_failed(path, &e));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    let result = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    result.map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FilesError::write_failed(path, &e)
    })
}
