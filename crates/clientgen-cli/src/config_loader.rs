//! Configuration file discovery and loading.
//!
//! Lookup order, first hit wins:
//!
//! 1. the path given on the command line (must exist)
//! 2. `clientgen.config.json` in the workspace root
//! 3. `clientgen/config.json` in the user configuration directory
//! 4. built-in defaults (empty configuration)
//!
//! Credential placeholders of the form `${NAME}` are substituted from the
//! process environment after parsing. A placeholder whose variable is not
//! set stays literal.

use clientgen_core::config::DEFAULT_CONFIG_FILE;
use clientgen_core::workspace::Workspace;
use clientgen_core::{Error, Result, UserConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name below the user configuration directory.
pub const USER_CONFIG_DIR: &str = "clientgen";

/// File name inside [`USER_CONFIG_DIR`].
pub const USER_CONFIG_FILE: &str = "config.json";

/// Where the loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    /// Path passed on the command line
    Explicit,
    /// Project configuration file in the workspace root
    Workspace,
    /// Per-user configuration file
    User,
    /// Nothing found, defaults only
    Default,
}

/// A parsed user configuration and its source file.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Parsed configuration, placeholders substituted
    pub config: UserConfig,
    /// File it was read from, `None` for defaults
    pub path: Option<PathBuf>,
    /// Which lookup step found it
    pub origin: ConfigOrigin,
}

/// Returns the per-user configuration file path.
///
/// Linux: `~/.config/clientgen/config.json`, macOS:
/// `~/Library/Application Support/clientgen/config.json`, Windows:
/// `%APPDATA%\clientgen\config.json`.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
}

/// Loads the configuration following the standard lookup order.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the explicit path is missing or any
/// file found cannot be parsed.
pub fn load(explicit: Option<&Path>, workspace: &dyn Workspace) -> Result<LoadedConfig> {
    load_from(explicit, workspace, user_config_path().as_deref())
}

/// Loads the configuration with an explicit user configuration path.
///
/// # Errors
///
/// Same as [`load`].
pub fn load_from(
    explicit: Option<&Path>,
    workspace: &dyn Workspace,
    user_file: Option<&Path>,
) -> Result<LoadedConfig> {
    let lookup = |name: &str| std::env::var(name).ok();

    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            workspace.root().join(path)
        };
        let text = std::fs::read_to_string(&path).map_err(|e| Error::ConfigError {
            field: "config".to_string(),
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        return finish(&text, Some(path), ConfigOrigin::Explicit, lookup);
    }

    if let Some(text) = workspace.read_file(DEFAULT_CONFIG_FILE) {
        let path = workspace.root().join(DEFAULT_CONFIG_FILE);
        return finish(&text, Some(path), ConfigOrigin::Workspace, lookup);
    }

    let user = user_file.and_then(|p| std::fs::read_to_string(p).ok().map(|text| (p, text)));
    if let Some((path, text)) = user {
        return finish(&text, Some(path.to_path_buf()), ConfigOrigin::User, lookup);
    }

    debug!("No configuration file found, using defaults");
    Ok(LoadedConfig {
        config: UserConfig::default(),
        path: None,
        origin: ConfigOrigin::Default,
    })
}

fn finish(
    text: &str,
    path: Option<PathBuf>,
    origin: ConfigOrigin,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<LoadedConfig> {
    let shown = path
        .as_deref()
        .map_or_else(String::new, |p| p.display().to_string());
    let mut config = parse(text, &shown)?;
    substitute_env(&mut config, lookup);
    debug!(path = %shown, ?origin, "Loaded configuration");
    Ok(LoadedConfig {
        config,
        path,
        origin,
    })
}

/// Parses a configuration document.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] naming the file and the parse position.
///
/// # Examples
///
/// ```
/// use clientgen_cli::config_loader::parse;
///
/// let config = parse(r#"{ "apiKey": "k" }"#, "inline").unwrap();
/// assert_eq!(config.api_key.as_deref(), Some("k"));
///
/// assert!(parse("{ nope", "inline").unwrap_err().is_config_error());
/// ```
pub fn parse(text: &str, origin: &str) -> Result<UserConfig> {
    serde_json::from_str(text).map_err(|e| Error::ConfigError {
        field: "config".to_string(),
        message: format!("{origin} is not a valid configuration: {e}"),
    })
}

/// Returns the variable name of a `${NAME}` placeholder.
///
/// # Examples
///
/// ```
/// use clientgen_cli::config_loader::placeholder_name;
///
/// assert_eq!(placeholder_name("${API_KEY}"), Some("API_KEY"));
/// assert_eq!(placeholder_name("sk-live"), None);
/// assert_eq!(placeholder_name("${}"), None);
/// ```
#[must_use]
pub fn placeholder_name(value: &str) -> Option<&str> {
    value
        .trim()
        .strip_prefix("${")?
        .strip_suffix('}')
        .filter(|name| !name.is_empty())
}

/// Replaces credential placeholders whose variable `lookup` knows.
pub fn substitute_env(config: &mut UserConfig, lookup: impl Fn(&str) -> Option<String>) {
    substitute(&mut config.api_key, &lookup);
    for environment in config.environments.values_mut() {
        substitute(&mut environment.api_key, &lookup);
    }
}

fn substitute(slot: &mut Option<String>, lookup: &impl Fn(&str) -> Option<String>) {
    let Some(name) = slot.as_deref().and_then(placeholder_name) else {
        return;
    };
    match lookup(name) {
        Some(value) => *slot = Some(value),
        None => debug!(variable = name, "Credential placeholder left unresolved"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientgen_core::config::EnvironmentOverride;
    use clientgen_core::workspace::{FsWorkspace, MemoryWorkspace};
    use tempfile::TempDir;

    fn lookup(name: &str) -> Option<String> {
        (name == "ACME_KEY").then(|| "sk-acme".to_string())
    }

    #[test]
    fn test_substitutes_top_level_and_environment_keys() {
        let mut config = UserConfig {
            api_key: Some("${ACME_KEY}".to_string()),
            ..UserConfig::default()
        };
        config.environments.insert(
            "dev".to_string(),
            EnvironmentOverride {
                api_key: Some("${ACME_KEY}".to_string()),
                ..EnvironmentOverride::default()
            },
        );

        substitute_env(&mut config, lookup);
        assert_eq!(config.api_key.as_deref(), Some("sk-acme"));
        assert_eq!(config.environments["dev"].api_key.as_deref(), Some("sk-acme"));
    }

    #[test]
    fn test_unset_variable_stays_literal() {
        let mut config = UserConfig {
            api_key: Some("${MISSING_KEY}".to_string()),
            ..UserConfig::default()
        };
        substitute_env(&mut config, lookup);
        assert_eq!(config.api_key.as_deref(), Some("${MISSING_KEY}"));
    }

    #[test]
    fn test_plain_key_untouched() {
        let mut config = UserConfig {
            api_key: Some("ACME_KEY".to_string()),
            ..UserConfig::default()
        };
        substitute_env(&mut config, lookup);
        assert_eq!(config.api_key.as_deref(), Some("ACME_KEY"));
    }

    #[test]
    fn test_workspace_file_wins_over_user_file() {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("user.json");
        std::fs::write(&user, r#"{ "apiVersion": "v9" }"#).unwrap();

        let workspace = MemoryWorkspace::new("/app")
            .with_file(DEFAULT_CONFIG_FILE, r#"{ "apiVersion": "v2" }"#);
        let loaded = load_from(None, &workspace, Some(&user)).unwrap();

        assert_eq!(loaded.origin, ConfigOrigin::Workspace);
        assert_eq!(loaded.config.api_version.as_deref(), Some("v2"));
        assert_eq!(loaded.path, Some(PathBuf::from("/app").join(DEFAULT_CONFIG_FILE)));
    }

    #[test]
    fn test_load_with_debug_logging_enabled() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let workspace = MemoryWorkspace::new("/app")
            .with_file(DEFAULT_CONFIG_FILE, r#"{ "apiKey": "${ACME_KEY}" }"#);

        let loaded = tracing::subscriber::with_default(subscriber, || {
            load_from(None, &workspace, None).unwrap()
        });
        assert_eq!(loaded.origin, ConfigOrigin::Workspace);
        assert_eq!(loaded.config.api_key.as_deref(), Some("${ACME_KEY}"));
    }

    #[test]
    fn test_user_file_used_without_workspace_file() {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("user.json");
        std::fs::write(&user, r#"{ "apiVersion": "v9" }"#).unwrap();

        let loaded = load_from(None, &MemoryWorkspace::new("/app"), Some(&user)).unwrap();
        assert_eq!(loaded.origin, ConfigOrigin::User);
        assert_eq!(loaded.config.api_version.as_deref(), Some("v9"));
    }

    #[test]
    fn test_defaults_when_nothing_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent.json");
        let loaded = load_from(None, &MemoryWorkspace::new("/app"), Some(&missing)).unwrap();
        assert_eq!(loaded.origin, ConfigOrigin::Default);
        assert!(loaded.path.is_none());
        assert_eq!(loaded.config, UserConfig::default());
    }

    #[test]
    fn test_explicit_path_relative_to_workspace() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("custom.json"), r#"{ "baseUrl": "https://x.dev" }"#)
            .unwrap();
        let workspace = FsWorkspace::new(temp.path());

        let loaded = load_from(Some(Path::new("custom.json")), &workspace, None).unwrap();
        assert_eq!(loaded.origin, ConfigOrigin::Explicit);
        assert_eq!(loaded.config.base_url.as_deref(), Some("https://x.dev"));
    }

    #[test]
    fn test_missing_explicit_path_is_config_error() {
        let temp = TempDir::new().unwrap();
        let workspace = FsWorkspace::new(temp.path());
        let err = load_from(Some(Path::new("nope.json")), &workspace, None).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_invalid_document_is_config_error() {
        let workspace =
            MemoryWorkspace::new("/app").with_file(DEFAULT_CONFIG_FILE, r#"{ "httpClient": 3 }"#);
        let err = load_from(None, &workspace, None).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }
}
