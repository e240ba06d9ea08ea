//! Structured assembly of one emitted source file.
//!
//! Generators never concatenate whole files. They collect an import block
//! and a list of rendered sections in a [`SourceFile`], and [`SourceFile::finish`]
//! joins them in one deterministic step: banner, imports, sections. The join
//! step also normalizes whitespace and applies the minify toggle.
//!
//! # Examples
//!
//! ```
//! use clientgen_codegen::render::{RenderOptions, SourceFile};
//!
//! let mut file = SourceFile::new();
//! file.import_type("../types", "User");
//! file.import_named("../client/http", "request");
//! file.push("export const x = 1;");
//!
//! let text = file.finish(&RenderOptions::plain());
//! assert_eq!(
//!     text,
//!     "import { request } from '../client/http';\n\
//!      import type { User } from '../types';\n\
//!      \n\
//!      export const x = 1;\n"
//! );
//! ```

use clientgen_core::config::GenerationConfig;
use std::collections::{BTreeMap, BTreeSet};

/// Imports from one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ImportSpec {
    default: Option<String>,
    namespace: Option<String>,
    named: BTreeSet<String>,
    types: BTreeSet<String>,
}

/// Banner and formatting switches for the join step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Banner text, without comment markers
    pub banner: Option<String>,
    /// Strip comments and blank lines
    pub minify: bool,
}

impl RenderOptions {
    /// No banner, no minification.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            banner: None,
            minify: false,
        }
    }

    /// Options derived from the generation toggles.
    #[must_use]
    pub fn from_config(generation: &GenerationConfig, api_version: &str) -> Self {
        let banner = (generation.comments && !generation.minify).then(|| {
            format!("Generated by clientgen for API {api_version}. Do not edit by hand.")
        });
        Self {
            banner,
            minify: generation.minify,
        }
    }
}

/// Imports and sections of one emitted file.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    imports: BTreeMap<String, ImportSpec>,
    sections: Vec<String>,
}

impl SourceFile {
    /// Creates an empty file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `import { name } from 'module'`.
    pub fn import_named(&mut self, module: &str, name: impl Into<String>) -> &mut Self {
        self.spec(module).named.insert(name.into());
        self
    }

    /// Adds `import type { name } from 'module'`.
    pub fn import_type(&mut self, module: &str, name: impl Into<String>) -> &mut Self {
        self.spec(module).types.insert(name.into());
        self
    }

    /// Adds `import name from 'module'`.
    pub fn import_default(&mut self, module: &str, name: impl Into<String>) -> &mut Self {
        self.spec(module).default = Some(name.into());
        self
    }

    /// Adds `import * as alias from 'module'`.
    pub fn import_namespace(&mut self, module: &str, alias: impl Into<String>) -> &mut Self {
        self.spec(module).namespace = Some(alias.into());
        self
    }

    /// Appends a rendered section. Blank sections are dropped.
    pub fn push(&mut self, section: impl Into<String>) -> &mut Self {
        let section = section.into();
        if !section.trim().is_empty() {
            self.sections.push(section);
        }
        self
    }

    /// Returns `true` if nothing was pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.imports.is_empty()
    }

    fn spec(&mut self, module: &str) -> &mut ImportSpec {
        self.imports.entry(module.to_string()).or_default()
    }

    fn import_block(&self) -> String {
        let mut lines = Vec::new();
        for (module, spec) in &self.imports {
            if let Some(alias) = &spec.namespace {
                lines.push(format!("import * as {alias} from '{module}';"));
            }

            let named = spec.named.iter().cloned().collect::<Vec<_>>().join(", ");
            match (&spec.default, named.is_empty()) {
                (Some(default), true) => lines.push(format!("import {default} from '{module}';")),
                (Some(default), false) => {
                    lines.push(format!("import {default}, {{ {named} }} from '{module}';"));
                }
                (None, false) => lines.push(format!("import {{ {named} }} from '{module}';")),
                (None, true) => {}
            }

            if !spec.types.is_empty() {
                let types = spec.types.iter().cloned().collect::<Vec<_>>().join(", ");
                lines.push(format!("import type {{ {types} }} from '{module}';"));
            }
        }
        lines.join("\n")
    }

    /// Joins banner, imports, and sections into the final file text.
    #[must_use]
    pub fn finish(&self, options: &RenderOptions) -> String {
        let mut blocks = Vec::new();
        if let Some(banner) = &options.banner {
            blocks.push(format!("// {banner}"));
        }
        let imports = self.import_block();
        if !imports.is_empty() {
            blocks.push(imports);
        }
        blocks.extend(self.sections.iter().map(|s| s.trim_matches('\n').to_string()));

        let joined = blocks.join("\n\n");
        if options.minify {
            minify(&joined)
        } else {
            normalize(&joined)
        }
    }
}

/// Trims trailing spaces, keeps at most one blank line in a row, and ends
/// the text with exactly one newline.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::render::normalize;
///
/// assert_eq!(normalize("a  \n\n\n\nb\n\n"), "a\n\nb\n");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.trim_matches('\n').lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}

/// Drops comment-only lines, block comments, and blank lines.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::render::minify;
///
/// let text = "// banner\n\n/**\n * Doc\n */\nexport const a = 'http://x';\n";
/// assert_eq!(minify(text), "export const a = 'http://x';\n");
/// ```
#[must_use]
pub fn minify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_block = false;
    for line in text.lines() {
        let trimmed = line.trim();
        if in_block {
            if trimmed.contains("*/") {
                in_block = false;
            }
            continue;
        }
        if trimmed.starts_with("/*") {
            in_block = !trimmed.contains("*/");
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}
