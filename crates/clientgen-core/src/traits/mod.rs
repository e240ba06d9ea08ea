//! Core traits for clientgen.
//!
//! # Module Structure
//!
//! - `schema_source` - Schema provider trait
//!
//! # Examples
//!
//! ```
//! use clientgen_core::traits::{FetchRequest, SchemaFetch, SchemaOrigin, SchemaSource};
//! use clientgen_core::schema::Schema;
//! use clientgen_core::Result;
//! # use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! struct EmptySchema;
//!
//! #[async_trait]
//! impl SchemaSource for EmptySchema {
//!     async fn fetch(&self, _request: &FetchRequest) -> Result<SchemaFetch> {
//!         Ok(SchemaFetch::new(Schema::default(), SchemaOrigin::Static))
//!     }
//! }
//! ```

mod schema_source;

pub use schema_source::{FetchRequest, SchemaFetch, SchemaOrigin, SchemaSource};
