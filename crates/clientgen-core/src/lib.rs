//! Core types, traits, and errors for clientgen.
//!
//! This crate provides the foundational types used across the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Schema data model (`Schema`, `Endpoint`, `Parameter`)
//! - User and resolved configuration with the layered resolver
//! - Workspace inspection and project-type detection
//! - Error hierarchy with contextual information
//! - The `SchemaSource` trait

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod types;

pub mod cli;
pub mod config;
pub mod resolver;
pub mod schema;
pub mod traits;
pub mod workspace;

pub use config::{ResolvedConfig, UserConfig};
pub use error::{Error, Result};
pub use resolver::resolve;
pub use schema::{Endpoint, HttpMethod, Parameter, ResponseSpec, Schema};
pub use types::{EnvironmentName, ResourceName};
