//! Error types for clientgen.
//!
//! One error hierarchy is shared by every crate in the workspace so the
//! calling CLI can classify a failure (configuration, schema, output,
//! generation) without inspecting message text.
//!
//! # Examples
//!
//! ```
//! use clientgen_core::{Error, Result};
//!
//! fn require_key(key: Option<&str>) -> Result<&str> {
//!     key.ok_or_else(|| Error::ConfigError {
//!         field: "apiKey".to_string(),
//!         message: "an API key is required".to_string(),
//!     })
//! }
//!
//! let err = require_key(None).unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for clientgen.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised when a required field is absent or a value is unusable.
    /// Always detected before any generation work starts.
    #[error("Configuration error in '{field}': {message}")]
    ConfigError {
        /// Configuration field that is missing or invalid
        field: String,
        /// Description of the configuration problem
        message: String,
    },

    /// The schema could not be obtained at all.
    #[error("Schema unavailable: {message}")]
    SchemaUnavailable {
        /// Description of why the schema could not be obtained
        message: String,
        /// Underlying error cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Structural problems in the schema.
    ///
    /// Every violation found by the validation pass is carried, not only
    /// the first one.
    #[error("Schema validation failed with {} violation(s):\n  - {}", .violations.len(), .violations.join("\n  - "))]
    SchemaValidation {
        /// Human-readable violation messages
        violations: Vec<String>,
    },

    /// Output directory already contains files and overwrite is disabled.
    #[error("Output directory is not empty: {} (enable generation.overwrite to replace it)", .path.display())]
    OutputNotEmpty {
        /// Output root that already contains files
        path: PathBuf,
    },

    /// Output directory cannot be created or written.
    #[error("Output path is not writable: {}", .path.display())]
    OutputUnwritable {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Unexpected failure while a generator computed its files.
    #[error("Generation failed for '{artifact}': {message}")]
    GenerationError {
        /// Artifact group (or template) that failed
        artifact: String,
        /// Description of the failure
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     field: "apiKey".to_string(),
    ///     message: "missing".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if the schema could not be obtained.
    #[must_use]
    pub const fn is_schema_unavailable(&self) -> bool {
        matches!(self, Self::SchemaUnavailable { .. })
    }

    /// Returns `true` if this is a schema validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_core::Error;
    ///
    /// let err = Error::SchemaValidation {
    ///     violations: vec!["bad method".to_string()],
    /// };
    /// assert!(err.is_validation_error());
    /// ```
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::SchemaValidation { .. })
    }

    /// Returns `true` for output directory problems (not empty, unwritable).
    #[must_use]
    pub const fn is_output_error(&self) -> bool {
        matches!(
            self,
            Self::OutputNotEmpty { .. } | Self::OutputUnwritable { .. }
        )
    }

    /// Returns `true` if a generator failed while producing files.
    #[must_use]
    pub const fn is_generation_error(&self) -> bool {
        matches!(self, Self::GenerationError { .. })
    }

    /// Returns the validation violations, if this is a validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_core::Error;
    ///
    /// let err = Error::SchemaValidation {
    ///     violations: vec!["a".to_string(), "b".to_string()],
    /// };
    /// assert_eq!(err.violations().len(), 2);
    ///
    /// let other = Error::InvalidArgument("x".to_string());
    /// assert!(other.violations().is_empty());
    /// ```
    #[must_use]
    pub fn violations(&self) -> &[String] {
        match self {
            Self::SchemaValidation { violations } => violations,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Type alias for Results using clientgen's Error type.
pub type Result<T> = std::result::Result<T, Error>;
