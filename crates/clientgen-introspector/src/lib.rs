//! Schema providers.
//!
//! Obtains the endpoint/type schema that drives a generation run:
//!
//! - [`SchemaFetcher`] performs a versioned HTTP GET with a bearer
//!   credential and falls back to an embedded schema on any failure
//! - [`StaticSchema`] serves a schema loaded from a file or built in memory
//!
//! Both implement [`clientgen_core::traits::SchemaSource`].

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod fallback;
pub mod fetcher;
pub mod static_source;

pub use fallback::fallback_schema;
pub use fetcher::{SchemaFetcher, schema_url};
pub use static_source::StaticSchema;
