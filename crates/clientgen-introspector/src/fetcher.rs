//! Remote schema fetch with an embedded fallback.
//!
//! The schema lives at `{base_url}/{api_version}/schema`. The request carries
//! the credential as a bearer token and a fixed timeout. Any failure
//! (transport error, timeout, non-2xx status, undecodable body) either
//! substitutes [`fallback_schema`] with a warning or, when the fallback is
//! disabled, fails with [`Error::SchemaUnavailable`].

use crate::fallback::fallback_schema;
use async_trait::async_trait;
use clientgen_core::traits::{FetchRequest, SchemaFetch, SchemaOrigin, SchemaSource};
use clientgen_core::{Error, Result, Schema};
use thiserror::Error as ThisError;

/// Why a remote fetch failed.
#[derive(Debug, ThisError)]
enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("response is not a schema document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// URL of the versioned schema document.
///
/// # Examples
///
/// ```
/// use clientgen_introspector::schema_url;
///
/// assert_eq!(
///     schema_url("https://api.example.com/", "v2"),
///     "https://api.example.com/v2/schema"
/// );
/// ```
#[must_use]
pub fn schema_url(base_url: &str, api_version: &str) -> String {
    format!(
        "{}/{}/schema",
        base_url.trim_end_matches('/'),
        api_version.trim_matches('/')
    )
}

/// HTTP schema source.
///
/// # Examples
///
/// ```no_run
/// use clientgen_core::config::ResolvedConfig;
/// use clientgen_core::traits::{FetchRequest, SchemaSource};
/// use clientgen_introspector::SchemaFetcher;
///
/// # async fn example() -> clientgen_core::Result<()> {
/// let fetcher = SchemaFetcher::new();
/// let fetched = fetcher.fetch(&FetchRequest::from_config(&ResolvedConfig::default())).await?;
/// println!("{} endpoints from {}", fetched.schema.endpoints.len(), fetched.origin);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SchemaFetcher {
    client: reqwest::Client,
    fallback: bool,
}

impl Default for SchemaFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaFetcher {
    /// Creates a fetcher with the embedded fallback enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            fallback: true,
        }
    }

    /// Enables or disables the embedded fallback.
    #[must_use]
    pub const fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    /// Returns `true` if failures fall back to the embedded schema.
    #[must_use]
    pub const fn uses_fallback(&self) -> bool {
        self.fallback
    }

    async fn fetch_remote(&self, request: &FetchRequest) -> std::result::Result<Schema, FetchError> {
        let url = schema_url(&request.base_url, &request.api_version);
        tracing::debug!(url = %url, timeout = ?request.timeout, "Fetching schema");

        let mut builder = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(request.timeout);
        if let Some(key) = &request.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SchemaSource for SchemaFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<SchemaFetch> {
        match self.fetch_remote(request).await {
            Ok(schema) => {
                tracing::info!(
                    endpoints = schema.endpoints.len(),
                    types = schema.types.len(),
                    "Fetched remote schema"
                );
                Ok(SchemaFetch::new(schema, SchemaOrigin::Remote))
            }
            Err(e) if self.fallback => {
                let warning = format!("Schema fetch failed ({e}); using the built-in fallback schema");
                tracing::warn!("{warning}");
                Ok(SchemaFetch::new(fallback_schema(), SchemaOrigin::Fallback).with_warning(warning))
            }
            Err(e) => Err(Error::SchemaUnavailable {
                message: format!(
                    "could not fetch {}: {e}",
                    schema_url(&request.base_url, &request.api_version)
                ),
                source: Some(Box::new(e)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable_request() -> FetchRequest {
        FetchRequest {
            // Nothing listens on the discard port.
            base_url: "http://127.0.0.1:9".to_string(),
            api_version: "v1".to_string(),
            api_key: Some("key".to_string()),
            timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_schema_url_normalizes_slashes() {
        assert_eq!(schema_url("http://h", "v1"), "http://h/v1/schema");
        assert_eq!(schema_url("http://h//", "/v1/"), "http://h/v1/schema");
    }

    #[tokio::test]
    async fn test_unreachable_server_uses_fallback() {
        let fetched = SchemaFetcher::new().fetch(&unreachable_request()).await.unwrap();
        assert_eq!(fetched.origin, SchemaOrigin::Fallback);
        assert_eq!(fetched.schema, fallback_schema());
        assert_eq!(fetched.warnings.len(), 1);
        assert!(fetched.warnings[0].contains("fallback"));
    }

    #[tokio::test]
    async fn test_unreachable_server_without_fallback() {
        let err = SchemaFetcher::new()
            .with_fallback(false)
            .fetch(&unreachable_request())
            .await
            .unwrap_err();
        assert!(err.is_schema_unavailable());
        assert!(err.to_string().contains("/v1/schema"));
    }
}
