//! Strong domain types.
//!
//! # Examples
//!
//! ```
//! use clientgen_core::{EnvironmentName, ResourceName};
//!
//! assert_eq!(EnvironmentName::default().as_str(), "prod");
//! assert_eq!(ResourceName::new("users").as_str(), "users");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime environment name selecting an `environments[...]` override block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentName(String);

impl EnvironmentName {
    /// Name used when the caller does not pick one.
    pub const DEFAULT: &'static str = "prod";

    /// Creates a new environment name. Blank input falls back to the default.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_core::EnvironmentName;
    ///
    /// assert_eq!(EnvironmentName::new("dev").as_str(), "dev");
    /// assert_eq!(EnvironmentName::new("  ").as_str(), "prod");
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EnvironmentName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EnvironmentName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EnvironmentName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Resource name: the first static path segment of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceName(String);

impl ResourceName {
    /// Creates a new resource name.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_name_default() {
        assert_eq!(EnvironmentName::default().as_str(), "prod");
        assert_eq!(EnvironmentName::new("").as_str(), "prod");
    }

    #[test]
    fn test_environment_name_trims() {
        assert_eq!(EnvironmentName::new(" staging ").as_str(), "staging");
        assert_eq!(EnvironmentName::from("dev").to_string(), "dev");
    }

    #[test]
    fn test_resource_name_ordering() {
        let mut names = vec![ResourceName::new("users"), ResourceName::new("posts")];
        names.sort();
        assert_eq!(names[0].as_str(), "posts");
    }
}
