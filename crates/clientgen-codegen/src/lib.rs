//! Schema validation and TypeScript client generation.
//!
//! Turns a validated [`clientgen_core::Schema`] and a resolved configuration
//! into an in-memory artifact set: types, api functions, the HTTP client,
//! state stores and a root index. Nothing here touches disk.
//!
//! # Examples
//!
//! ```
//! use clientgen_codegen::{GenerationContext, TemplateEngine, check_closure, generate_all, validate};
//! use clientgen_core::{Endpoint, Parameter, ResolvedConfig, Schema};
//!
//! let mut schema = Schema::default();
//! schema.endpoints.push(
//!     Endpoint::new("GET", "/users/{id}").with_parameter(Parameter::required("id", "string")),
//! );
//! let config = ResolvedConfig::default();
//! validate(&schema, &config).unwrap();
//!
//! let engine = TemplateEngine::new().unwrap();
//! let ctx = GenerationContext::new(&schema, &config, &engine);
//! let files: Vec<_> = generate_all(&ctx)
//!     .unwrap()
//!     .into_iter()
//!     .flat_map(|group| group.files)
//!     .collect();
//!
//! check_closure(&files).unwrap();
//! assert!(files.iter().any(|f| f.path == "api/users.ts"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod closure;
pub mod generator;
pub mod generators;
pub mod model;
pub mod naming;
pub mod render;
pub mod template_engine;
pub mod types;
pub mod typescript;
pub mod validation;

pub use closure::check_closure;
pub use generator::{ArtifactGenerator, GenerationContext, default_generators, generate_all};
pub use model::ApiModel;
pub use template_engine::TemplateEngine;
pub use types::{GeneratedCode, GeneratedFile};
pub use validation::{validate, validate_config};
