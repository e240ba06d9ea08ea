//! Cross-reference closure check over an artifact set.
//!
//! Every relative `import ... from './x'` or `export ... from './x'` in a
//! generated file must name another file of the same set, either `x.ts` or
//! `x/index.ts`. Package imports (`axios`, `zustand`) are ignored.
//!
//! # Examples
//!
//! ```
//! use clientgen_codegen::{GeneratedFile, closure::check_closure};
//!
//! let files = vec![
//!     GeneratedFile::new("index.ts", "export * from './api';"),
//!     GeneratedFile::new("api/index.ts", "export * from './users';"),
//!     GeneratedFile::new("api/users.ts", "import axios from 'axios';"),
//! ];
//! assert!(check_closure(&files).is_ok());
//!
//! let broken = vec![GeneratedFile::new("index.ts", "export * from './stores';")];
//! assert!(check_closure(&broken).is_err());
//! ```

use crate::GeneratedFile;
use clientgen_core::{Error, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(?:import|export)\b[^;]*?\bfrom\s+['"](\.{1,2}/[^'"]*)['"]"#)
        .expect("valid regex")
});

/// One unresolved relative import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingImport {
    /// File containing the import
    pub file: String,
    /// Specifier as written
    pub specifier: String,
}

/// Relative module specifiers imported or re-exported by `content`.
#[must_use]
pub fn relative_specifiers(content: &str) -> Vec<&str> {
    SPECIFIER_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Resolves `specifier` against the directory of `from`, normalizing `.`
/// and `..`. Returns `None` if the path escapes the output root.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::closure::resolve_specifier;
///
/// assert_eq!(resolve_specifier("stores/users.ts", "../api").as_deref(), Some("api"));
/// assert_eq!(resolve_specifier("index.ts", "./types").as_deref(), Some("types"));
/// assert_eq!(resolve_specifier("index.ts", "../outside"), None);
/// ```
#[must_use]
pub fn resolve_specifier(from: &str, specifier: &str) -> Option<String> {
    let mut parts: Vec<&str> = from.split('/').collect();
    parts.pop();

    for component in specifier.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}

/// Finds every dangling relative import in the set.
#[must_use]
pub fn find_dangling<'a>(files: impl IntoIterator<Item = &'a GeneratedFile> + Clone) -> Vec<DanglingImport> {
    let present: HashSet<&str> = files.clone().into_iter().map(|f| f.path.as_str()).collect();
    let mut dangling = Vec::new();

    for file in files {
        for specifier in relative_specifiers(&file.content) {
            let resolved = resolve_specifier(&file.path, specifier);
            let found = resolved.is_some_and(|target| {
                present.contains(format!("{target}.ts").as_str())
                    || present.contains(format!("{target}/index.ts").as_str())
            });
            if !found {
                dangling.push(DanglingImport {
                    file: file.path.clone(),
                    specifier: specifier.to_string(),
                });
            }
        }
    }

    dangling
}

/// Fails with a generation error listing every dangling import.
///
/// # Errors
///
/// Returns [`Error::GenerationError`] if any relative import does not resolve.
pub fn check_closure(files: &[GeneratedFile]) -> Result<()> {
    let dangling = find_dangling(files);
    if dangling.is_empty() {
        return Ok(());
    }

    let listing = dangling
        .iter()
        .map(|d| format!("{} imports '{}'", d.file, d.specifier))
        .collect::<Vec<_>>()
        .join(", ");
    Err(Error::GenerationError {
        artifact: "artifact set".to_string(),
        message: format!("dangling imports: {listing}"),
        source: None,
    })
}
