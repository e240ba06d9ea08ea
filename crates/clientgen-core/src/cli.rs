//! CLI value types shared by the binary and its tests.
//!
//! # Examples
//!
//! ```
//! use clientgen_core::cli::{ExitCode, OutputFormat};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format, OutputFormat::Json);
//!
//! assert_eq!(ExitCode::VALIDATION_FAILED.as_i32(), 4);
//! ```

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// Output format of the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON output for machine parsing
    Json,
    /// Plain text output for scripts
    Text,
    /// Colored output for humans
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::InvalidArgument(format!(
                "invalid output format: '{s}' (expected: json, text, or pretty)"
            ))),
        }
    }
}

/// Process exit code with a fixed meaning per error class.
///
/// # Examples
///
/// ```
/// use clientgen_core::cli::ExitCode;
/// use clientgen_core::Error;
///
/// let err = Error::SchemaValidation { violations: vec!["x".into()] };
/// assert_eq!(ExitCode::for_error(&err), ExitCode::VALIDATION_FAILED);
/// assert!(ExitCode::SUCCESS.is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful run (0).
    pub const SUCCESS: Self = Self(0);

    /// Unclassified failure (1).
    pub const ERROR: Self = Self(1);

    /// Missing or invalid configuration (2).
    pub const CONFIG_ERROR: Self = Self(2);

    /// Schema could not be obtained (3).
    pub const SCHEMA_UNAVAILABLE: Self = Self(3);

    /// Schema failed validation (4).
    pub const VALIDATION_FAILED: Self = Self(4);

    /// Output directory not empty or not writable (5).
    pub const OUTPUT_ERROR: Self = Self(5);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Classifies an error into its exit code.
    #[must_use]
    pub const fn for_error(error: &Error) -> Self {
        match error {
            Error::ConfigError { .. } => Self::CONFIG_ERROR,
            Error::SchemaUnavailable { .. } => Self::SCHEMA_UNAVAILABLE,
            Error::SchemaValidation { .. } => Self::VALIDATION_FAILED,
            Error::OutputNotEmpty { .. } | Error::OutputUnwritable { .. } => Self::OUTPUT_ERROR,
            _ => Self::ERROR,
        }
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
