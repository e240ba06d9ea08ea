//! Schema provider trait.
//!
//! The generation pipeline only depends on the shape of a [`Schema`]; how it
//! is obtained (network, file, embedded fallback) is behind [`SchemaSource`].

use crate::config::ResolvedConfig;
use crate::schema::Schema;
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Fixed timeout of the schema request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters of one schema request.
#[derive(Clone)]
pub struct FetchRequest {
    /// API base URL
    pub base_url: String,
    /// API version inserted into the schema URL
    pub api_version: String,
    /// Bearer credential
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl FetchRequest {
    /// Builds a request from a resolved configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_core::config::ResolvedConfig;
    /// use clientgen_core::traits::FetchRequest;
    ///
    /// let request = FetchRequest::from_config(&ResolvedConfig::default());
    /// assert_eq!(request.api_version, "v1");
    /// assert_eq!(request.timeout.as_secs(), 10);
    /// ```
    #[must_use]
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_version: config.api_version.clone(),
            api_key: config.api_key.clone(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

// Credential stays out of logs.
impl fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchRequest")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Where a schema came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaOrigin {
    /// Fetched from the API
    Remote,
    /// Embedded fallback used after a failed fetch
    Fallback,
    /// Supplied directly (file or in-memory)
    Static,
}

impl SchemaOrigin {
    /// Returns the origin name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Fallback => "fallback",
            Self::Static => "static",
        }
    }
}

impl fmt::Display for SchemaOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schema together with its origin and any advisories raised while
/// obtaining it.
#[derive(Debug, Clone)]
pub struct SchemaFetch {
    /// The complete schema
    pub schema: Schema,
    /// Where it came from
    pub origin: SchemaOrigin,
    /// Non-fatal advisories (e.g. why the fallback was used)
    pub warnings: Vec<String>,
}

impl SchemaFetch {
    /// Creates a fetch result without warnings.
    #[must_use]
    pub const fn new(schema: Schema, origin: SchemaOrigin) -> Self {
        Self {
            schema,
            origin,
            warnings: Vec::new(),
        }
    }

    /// Adds a warning, builder style.
    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// Supplies the schema of one generation run.
///
/// Implementations return either a complete schema or an error; they must
/// never merge a partially fetched schema with fallback content.
#[async_trait]
pub trait SchemaSource: Send + Sync + fmt::Debug {
    /// Obtains the schema.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SchemaUnavailable`] if no schema can be
    /// produced at all.
    async fn fetch(&self, request: &FetchRequest) -> Result<SchemaFetch>;
}
