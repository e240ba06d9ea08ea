//! Schema supplied directly, from a file or from memory.

use async_trait::async_trait;
use clientgen_core::traits::{FetchRequest, SchemaFetch, SchemaOrigin, SchemaSource};
use clientgen_core::{Error, Result, Schema};
use std::path::Path;

/// A schema that needs no network.
///
/// # Examples
///
/// ```
/// use clientgen_core::Schema;
/// use clientgen_core::traits::{FetchRequest, SchemaOrigin, SchemaSource};
/// use clientgen_core::config::ResolvedConfig;
/// use clientgen_introspector::StaticSchema;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = StaticSchema::new(Schema::default());
/// let request = FetchRequest::from_config(&ResolvedConfig::default());
/// let fetched = source.fetch(&request).await.unwrap();
/// assert_eq!(fetched.origin, SchemaOrigin::Static);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StaticSchema {
    schema: Schema,
}

impl StaticSchema {
    /// Wraps an in-memory schema.
    #[must_use]
    pub const fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Loads a JSON schema document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaUnavailable`] if the file cannot be read or is
    /// not a schema document.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::SchemaUnavailable {
                message: format!("cannot read schema file {}: {e}", path.display()),
                source: Some(Box::new(e)),
            })?;

        let schema: Schema = serde_json::from_str(&text).map_err(|e| Error::SchemaUnavailable {
            message: format!("{} is not a schema document: {e}", path.display()),
            source: Some(Box::new(e)),
        })?;

        tracing::debug!(
            path = %path.display(),
            endpoints = schema.endpoints.len(),
            "Loaded schema file"
        );
        Ok(Self::new(schema))
    }

    /// The wrapped schema.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }
}

#[async_trait]
impl SchemaSource for StaticSchema {
    async fn fetch(&self, _request: &FetchRequest) -> Result<SchemaFetch> {
        Ok(SchemaFetch::new(self.schema.clone(), SchemaOrigin::Static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "endpoints": [{{ "path": "/ping", "method": "GET" }}] }}"#
        )
        .unwrap();

        let source = StaticSchema::from_file(file.path()).await.unwrap();
        assert_eq!(source.schema().endpoints.len(), 1);
        assert!(source.schema().types.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = StaticSchema::from_file("/definitely/not/here.json")
            .await
            .unwrap_err();
        assert!(err.is_schema_unavailable());
    }

    #[tokio::test]
    async fn test_invalid_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();

        let err = StaticSchema::from_file(file.path()).await.unwrap_err();
        assert!(err.is_schema_unavailable());
        assert!(err.to_string().contains("not a schema document"));
    }
}
