//! In-memory file tree and guarded disk export for generated clients.
//!
//! Generators produce [`clientgen_codegen::GeneratedCode`]; this crate turns
//! it into a validated [`FileSystem`], writes it to disk, and rolls back a
//! partially written tree when a run fails.
//!
//! # Features
//!
//! - **Validated paths**: `/`-rooted, no `..`, no empty components
//! - **Deterministic order**: files are exported in sorted path order
//! - **Rollback**: [`OutputGuard`] undoes a run unless committed
//!
//! # Examples
//!
//! ```
//! use clientgen_codegen::{GeneratedCode, GeneratedFile};
//! use clientgen_files::{ExportOptions, FilesBuilder, OutputGuard};
//! # use tempfile::TempDir;
//!
//! # let temp = TempDir::new().unwrap();
//! let mut code = GeneratedCode::new("types");
//! code.add_file(GeneratedFile::new("types/index.ts", "export {};"));
//!
//! let fs = FilesBuilder::from_generated_code(&code, "/").build().unwrap();
//!
//! let mut guard = OutputGuard::begin(temp.path().join("out"), ExportOptions::default()).unwrap();
//! guard.write(&fs).unwrap();
//! guard.commit();
//!
//! assert!(temp.path().join("out/types/index.ts").exists());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod builder;
pub mod filesystem;
pub mod guard;
pub mod types;
pub mod vfs;

pub use builder::FilesBuilder;
pub use filesystem::{ExportOptions, ExportReport, existing_files};
pub use guard::OutputGuard;
pub use types::{FileEntry, FilePath, FilesError, Result};
pub use vfs::FileSystem;
