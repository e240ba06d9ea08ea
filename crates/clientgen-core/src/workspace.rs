//! Workspace inspection and project-type detection.
//!
//! Resolution never reads the process working directory or the real
//! filesystem directly. Callers pass a [`Workspace`] instead, so tests can
//! swap in a [`MemoryWorkspace`].
//!
//! # Examples
//!
//! ```
//! use clientgen_core::config::ProjectType;
//! use clientgen_core::workspace::{detect_project_type, MemoryWorkspace};
//!
//! let workspace = MemoryWorkspace::new("/app")
//!     .with_file("package.json", r#"{ "dependencies": { "next": "14.0.0" } }"#);
//!
//! assert_eq!(detect_project_type(&workspace), ProjectType::NextJs);
//! ```

use crate::config::ProjectType;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Read-only view of the directory the tool runs in.
pub trait Workspace: Send + Sync + Debug {
    /// Root directory; relative output paths resolve against it.
    fn root(&self) -> &Path;

    /// Reads a file relative to the root. `None` if absent or unreadable.
    fn read_file(&self, relative: &str) -> Option<String>;

    /// Checks whether a file exists relative to the root.
    fn exists(&self, relative: &str) -> bool {
        self.read_file(relative).is_some()
    }
}

/// Workspace backed by a real directory.
#[derive(Debug, Clone)]
pub struct FsWorkspace {
    root: PathBuf,
}

impl FsWorkspace {
    /// Creates a workspace rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a workspace rooted at the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn current() -> crate::Result<Self> {
        let root = std::env::current_dir().map_err(|e| crate::Error::ConfigError {
            field: "outputDir".to_string(),
            message: format!("cannot determine working directory: {e}"),
        })?;
        Ok(Self::new(root))
    }
}

impl Workspace for FsWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, relative: &str) -> Option<String> {
        std::fs::read_to_string(self.root.join(relative)).ok()
    }

    fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).exists()
    }
}

/// In-memory workspace for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkspace {
    root: PathBuf,
    files: HashMap<String, String>,
}

impl MemoryWorkspace {
    /// Creates an empty workspace with the given root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: HashMap::new(),
        }
    }

    /// Adds a file, builder style.
    #[must_use]
    pub fn with_file(mut self, relative: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(relative.into(), content.into());
        self
    }
}

impl Workspace for MemoryWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read_file(&self, relative: &str) -> Option<String> {
        self.files.get(relative).cloned()
    }
}

/// Framework marker files checked when `package.json` is inconclusive.
const CONFIG_MARKERS: &[(&str, ProjectType)] = &[
    ("next.config.js", ProjectType::NextJs),
    ("next.config.mjs", ProjectType::NextJs),
    ("next.config.ts", ProjectType::NextJs),
    ("nuxt.config.ts", ProjectType::Nuxt),
    ("nuxt.config.js", ProjectType::Nuxt),
    ("svelte.config.js", ProjectType::Svelte),
    ("vite.config.ts", ProjectType::Vite),
    ("vite.config.js", ProjectType::Vite),
    ("vue.config.js", ProjectType::Vue),
];

/// Dependency names in priority order. Meta-frameworks come before the
/// libraries they build on.
const DEPENDENCY_MARKERS: &[(&str, ProjectType)] = &[
    ("next", ProjectType::NextJs),
    ("nuxt", ProjectType::Nuxt),
    ("@sveltejs/kit", ProjectType::Svelte),
    ("svelte", ProjectType::Svelte),
    ("vite", ProjectType::Vite),
    ("react", ProjectType::React),
    ("vue", ProjectType::Vue),
    ("express", ProjectType::Node),
    ("fastify", ProjectType::Node),
    ("koa", ProjectType::Node),
];

/// Guesses the project type from `package.json` and framework config files.
///
/// Falls back to [`ProjectType::Vanilla`]; never returns `Auto`.
#[must_use]
pub fn detect_project_type(workspace: &dyn Workspace) -> ProjectType {
    if let Some(manifest) = workspace.read_file("package.json") {
        match serde_json::from_str::<serde_json::Value>(&manifest) {
            Ok(value) => {
                let has_dep = |name: &str| {
                    ["dependencies", "devDependencies", "peerDependencies"]
                        .iter()
                        .any(|section| value.get(section).and_then(|d| d.get(name)).is_some())
                };
                if let Some((_, project)) =
                    DEPENDENCY_MARKERS.iter().find(|(name, _)| has_dep(name))
                {
                    tracing::debug!(project = %project, "Detected project type from package.json");
                    return *project;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unparsable package.json");
            }
        }
    }

    if let Some((marker, project)) = CONFIG_MARKERS
        .iter()
        .find(|(marker, _)| workspace.exists(marker))
    {
        tracing::debug!(marker = *marker, project = %project, "Detected project type from config file");
        return *project;
    }

    if workspace.exists("package.json") {
        ProjectType::Node
    } else {
        ProjectType::Vanilla
    }
}
