//! Configuration resolution.
//!
//! Resolution applies an ordered list of [`Layer`]s left to right on top of
//! [`ResolvedConfig::default`]:
//!
//! 1. built-in defaults
//! 2. project-type preferences (HTTP client, state management)
//! 3. user top-level scalars
//! 4. `environments[env]` overrides
//! 5. user nested groups, merged key by key
//!
//! Later layers win. Resolution never fails; a missing credential is left
//! as `None` for the orchestrator to reject.
//!
//! # Examples
//!
//! ```
//! use clientgen_core::config::UserConfig;
//! use clientgen_core::resolver::resolve;
//! use clientgen_core::workspace::MemoryWorkspace;
//! use clientgen_core::EnvironmentName;
//!
//! let user: UserConfig = serde_json::from_str(r#"{
//!     "apiVersion": "v1",
//!     "environments": { "prod": { "apiVersion": "v3" } },
//!     "client": { "className": "Acme" }
//! }"#).unwrap();
//!
//! let config = resolve(&user, &EnvironmentName::default(), &MemoryWorkspace::new("/app"));
//! assert_eq!(config.api_version, "v3");
//! assert_eq!(config.client.class_name, "Acme");
//! assert!(config.client.enabled);
//! ```

use crate::EnvironmentName;
use crate::config::{EnvironmentOverride, ProjectType, ResolvedConfig, UserConfig};
use crate::workspace::{Workspace, detect_project_type};
use std::path::Path;

/// One override layer of the resolution pipeline.
#[derive(Debug, Clone, Copy)]
pub enum Layer<'a> {
    /// Preferred transport and state management of a project type
    ProjectPreferences(ProjectType),
    /// Top-level scalars of the user configuration
    UserTopLevel(&'a UserConfig),
    /// Scalar overrides of the selected environment
    Environment(&'a EnvironmentOverride),
    /// Nested groups of the user configuration
    UserGroups(&'a UserConfig),
}

impl Layer<'_> {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ProjectPreferences(_) => "project-preferences",
            Self::UserTopLevel(_) => "user-top-level",
            Self::Environment(_) => "environment",
            Self::UserGroups(_) => "user-groups",
        }
    }

    /// Applies this layer onto `config`.
    pub fn apply(&self, config: &mut ResolvedConfig) {
        match self {
            Self::ProjectPreferences(project) => {
                config.project_type = *project;
                if let Some((http_client, state_management)) = project.preferences() {
                    config.http_client = http_client;
                    config.state_management = state_management;
                }
            }
            Self::UserTopLevel(user) => {
                if let Some(key) = &user.api_key {
                    config.api_key = Some(key.clone());
                }
                if let Some(url) = &user.base_url {
                    config.base_url.clone_from(url);
                }
                if let Some(env) = &user.environment {
                    config.environment.clone_from(env);
                }
                if let Some(language) = user.language {
                    config.language = language;
                }
                if let Some(state) = user.state_management {
                    config.state_management = state;
                }
                if let Some(client) = user.http_client {
                    config.http_client = client;
                }
                if let Some(dir) = &user.output_dir {
                    config.output_dir.clone_from(dir);
                }
                if let Some(version) = &user.api_version {
                    config.api_version.clone_from(version);
                }
                if let Some(services) = &user.services {
                    config.services.clone_from(&services.include);
                }
            }
            Self::Environment(env) => {
                if let Some(key) = &env.api_key {
                    config.api_key = Some(key.clone());
                }
                if let Some(url) = &env.base_url {
                    config.base_url.clone_from(url);
                }
                if let Some(version) = &env.api_version {
                    config.api_version.clone_from(version);
                }
                if let Some(dir) = &env.output_dir {
                    config.output_dir.clone_from(dir);
                }
                if let Some(client) = env.http_client {
                    config.http_client = client;
                }
                if let Some(state) = env.state_management {
                    config.state_management = state;
                }
            }
            Self::UserGroups(user) => {
                if let Some(naming) = &user.naming {
                    config.naming.merge(naming);
                }
                if let Some(folders) = &user.folders {
                    config.folders.merge(folders);
                }
                if let Some(client) = &user.client {
                    config.client.merge(client);
                }
                if let Some(api) = &user.api {
                    config.api.merge(api);
                }
                if let Some(response) = &user.response {
                    config.response.merge(response);
                }
                if let Some(plugins) = &user.plugins {
                    config.plugins.merge(plugins);
                }
                if let Some(errors) = &user.errors {
                    config.errors.merge(errors);
                }
                if let Some(http) = &user.http {
                    config.http.merge(http);
                }
                if let Some(generation) = &user.generation {
                    config.generation.merge(generation);
                }
            }
        }
    }
}

/// Builds the ordered layer list for one user configuration.
///
/// `project` must already be concrete (detection happens before this).
#[must_use]
pub fn layers<'a>(
    user: &'a UserConfig,
    environment: &EnvironmentName,
    project: ProjectType,
) -> Vec<Layer<'a>> {
    let mut layers = vec![Layer::ProjectPreferences(project), Layer::UserTopLevel(user)];
    if let Some(env) = user.environments.get(environment.as_str()) {
        layers.push(Layer::Environment(env));
    }
    layers.push(Layer::UserGroups(user));
    layers
}

/// Resolves a sparse user configuration into a fully populated one.
///
/// `auto` (or absent) project type is replaced by the detection result.
/// Relative output directories are anchored at the workspace root.
#[must_use]
pub fn resolve(
    user: &UserConfig,
    environment: &EnvironmentName,
    workspace: &dyn Workspace,
) -> ResolvedConfig {
    let project = match user.project_type.unwrap_or_default() {
        ProjectType::Auto => detect_project_type(workspace),
        explicit => explicit,
    };

    let mut config = ResolvedConfig {
        environment: environment.as_str().to_string(),
        ..ResolvedConfig::default()
    };

    for layer in layers(user, environment, project) {
        tracing::trace!(layer = layer.name(), "Applying configuration layer");
        layer.apply(&mut config);
    }

    config.output_dir = anchor(workspace.root(), &config.output_dir);

    tracing::debug!(
        environment = %environment,
        project = %config.project_type,
        http_client = %config.http_client,
        state_management = %config.state_management,
        output_dir = %config.output_dir.display(),
        "Resolved configuration"
    );

    config
}

fn anchor(root: &Path, dir: &Path) -> std::path::PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}
