//! Artifact generator seam and the shared generation context.
//!
//! Each artifact group (types, api, client, stores, root index) is an
//! [`ArtifactGenerator`]: a pure function from the [`GenerationContext`] to
//! a [`GeneratedCode`]. Generators never touch disk; the orchestrator
//! writes what they return.
//!
//! # Examples
//!
//! ```
//! use clientgen_codegen::{GenerationContext, TemplateEngine, generate_all};
//! use clientgen_core::{Endpoint, ResolvedConfig, Schema};
//!
//! let mut schema = Schema::default();
//! schema.endpoints.push(Endpoint::new("GET", "/users"));
//!
//! let config = ResolvedConfig::default();
//! let engine = TemplateEngine::new().unwrap();
//! let ctx = GenerationContext::new(&schema, &config, &engine);
//!
//! let groups = generate_all(&ctx).unwrap();
//! let names: Vec<_> = groups.iter().map(|g| g.group.as_str()).collect();
//! assert_eq!(names, vec!["types", "api", "client", "stores", "root"]);
//! ```

use crate::generators::{
    ApiGenerator, ClientGenerator, RootIndexGenerator, StoresGenerator, TypesGenerator,
};
use crate::model::ApiModel;
use crate::render::{RenderOptions, SourceFile};
use crate::template_engine::TemplateEngine;
use crate::typescript::TypeMapper;
use crate::types::{GeneratedCode, GeneratedFile};
use clientgen_core::{ResolvedConfig, Result, Schema};
use std::fmt::Debug;

/// Produces the files of one artifact group.
pub trait ArtifactGenerator: Send + Sync + Debug {
    /// Artifact group name, used in logs and errors.
    fn group(&self) -> &'static str;

    /// Computes every file of the group.
    ///
    /// # Errors
    ///
    /// Returns a generation error if a template fails to render.
    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<GeneratedCode>;
}

/// Everything a generator reads during one run.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    /// Validated schema
    pub schema: &'a Schema,
    /// Resolved configuration
    pub config: &'a ResolvedConfig,
    /// Template engine with built-in templates
    pub engine: &'a TemplateEngine,
    /// Type-expression rewriter for the configured naming
    pub types: TypeMapper,
    /// Resources and operations after service selection
    pub model: ApiModel,
    /// Banner and minify settings for every file
    pub render: RenderOptions,
}

impl<'a> GenerationContext<'a> {
    /// Builds the context, deriving the type mapper and the api model.
    #[must_use]
    pub fn new(schema: &'a Schema, config: &'a ResolvedConfig, engine: &'a TemplateEngine) -> Self {
        let types = TypeMapper::new(
            schema.types.keys().map(String::as_str),
            config.naming.type_prefix.clone(),
            config.naming.type_suffix.clone(),
        );
        let model = ApiModel::build(schema, config, &types);
        let render = RenderOptions::from_config(&config.generation, &config.api_version);

        Self {
            schema,
            config,
            engine,
            types,
            model,
            render,
        }
    }

    /// Whether doc comments are emitted.
    #[must_use]
    pub const fn doc_comments(&self) -> bool {
        self.config.generation.doc_comments && !self.config.generation.minify
    }

    /// Assembles a file and wraps it with its output path.
    #[must_use]
    pub fn file(&self, path: impl Into<String>, source: &SourceFile) -> GeneratedFile {
        GeneratedFile::new(path, source.finish(&self.render))
    }

    /// Output path of `stem.ts` inside a group folder.
    #[must_use]
    pub fn path_in(&self, folder: &str, stem: &str) -> String {
        format!("{folder}/{stem}.{}", self.config.language.extension())
    }
}

/// Every built-in generator in dependency order: types, api, client,
/// stores, root index.
#[must_use]
pub fn default_generators() -> Vec<Box<dyn ArtifactGenerator>> {
    vec![
        Box::new(TypesGenerator),
        Box::new(ApiGenerator),
        Box::new(ClientGenerator),
        Box::new(StoresGenerator),
        Box::new(RootIndexGenerator),
    ]
}

/// Runs every default generator in order.
///
/// # Errors
///
/// Returns the first generator error.
pub fn generate_all(ctx: &GenerationContext<'_>) -> Result<Vec<GeneratedCode>> {
    default_generators()
        .iter()
        .map(|generator| {
            let code = generator.generate(ctx)?;
            tracing::debug!(
                group = generator.group(),
                files = code.file_count(),
                "Generated artifact group"
            );
            Ok(code)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientgen_core::Endpoint;

    #[test]
    fn test_generator_order() {
        let groups: Vec<_> = default_generators().iter().map(|g| g.group()).collect();
        assert_eq!(groups, vec!["types", "api", "client", "stores", "root"]);
    }

    #[test]
    fn test_context_paths() {
        let schema = Schema::default();
        let config = ResolvedConfig::default();
        let engine = TemplateEngine::new().unwrap();
        let ctx = GenerationContext::new(&schema, &config, &engine);
        assert_eq!(ctx.path_in("api", "users"), "api/users.ts");
    }

    #[test]
    fn test_doc_comments_off_when_minified() {
        let schema = Schema::default();
        let mut config = ResolvedConfig::default();
        config.generation.minify = true;
        let engine = TemplateEngine::new().unwrap();
        let ctx = GenerationContext::new(&schema, &config, &engine);
        assert!(!ctx.doc_comments());
        assert!(ctx.render.banner.is_none());
    }

    #[test]
    fn test_context_builds_model() {
        let mut schema = Schema::default();
        schema.endpoints.push(Endpoint::new("GET", "/users"));
        schema.endpoints.push(Endpoint::new("GET", "/orders"));
        let config = ResolvedConfig::default();
        let engine = TemplateEngine::new().unwrap();
        let ctx = GenerationContext::new(&schema, &config, &engine);
        assert_eq!(ctx.model.resources.len(), 2);
    }
}
