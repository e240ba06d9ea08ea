//! Validation pass run before any generator.
//!
//! Generators assume a well-formed schema. This pass checks everything
//! they rely on and reports every violation it finds in one
//! [`Error::SchemaValidation`], so a user can fix the whole schema in one
//! go. Configuration values that generators splice into code (folder
//! names, custom error classes) are checked separately by
//! [`validate_config`].
//!
//! # Examples
//!
//! ```
//! use clientgen_codegen::validation::validate;
//! use clientgen_core::{Endpoint, ResolvedConfig, Schema};
//!
//! let mut schema = Schema::default();
//! schema.endpoints.push(Endpoint::new("FETCH", "users"));
//! schema.endpoints.push(
//!     Endpoint::new("GET", "/users/{id}").with_response("Ghost"),
//! );
//!
//! let err = validate(&schema, &ResolvedConfig::default()).unwrap_err();
//! assert_eq!(err.violations().len(), 4);
//! ```

use crate::model::function_name;
use crate::naming::{
    is_valid_identifier, resource_of, sanitize_file_name, sanitize_identifier, to_camel_case,
    to_kebab_case, to_pascal_case,
};
use crate::typescript::referenced_types;
use clientgen_core::config::StateManagement;
use clientgen_core::{Endpoint, Error, ResolvedConfig, Result, Schema};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Names exported by the client group regardless of the schema.
pub const CLIENT_EXPORTS: &[&str] = &[
    "HttpMethod",
    "RetryPolicy",
    "HttpConfig",
    "ApiResult",
    "TransportRequest",
    "TransportResponse",
    "Transport",
    "configureHttp",
    "getHttpConfig",
    "buildPath",
    "request",
    "setTransport",
    "ApiError",
    "ValidationError",
    "NetworkError",
    "RequestContext",
    "ResponseContext",
    "Plugin",
    "PluginRegistry",
    "pluginRegistry",
    "loggerPlugin",
];

/// File stems the stores group reserves for itself.
pub const RESERVED_STORE_STEMS: &[&str] = &["index", "global", "store"];

const ERROR_BASES: &[&str] = &["Error", "ApiError"];

const ERROR_OWN_PROPERTIES: &[&str] = &["name", "message", "stack", "status", "response", "cause"];

/// Validates schema structure and name uniqueness.
///
/// # Errors
///
/// Returns [`Error::SchemaValidation`] listing every violation found.
pub fn validate(schema: &Schema, config: &ResolvedConfig) -> Result<()> {
    let mut violations = Vec::new();

    for (index, endpoint) in schema.endpoints.iter().enumerate() {
        check_endpoint(schema, index, endpoint, &mut violations);
    }
    check_types(schema, &mut violations);
    check_names(schema, config, &mut violations);

    if violations.is_empty() {
        tracing::debug!(
            endpoints = schema.endpoints.len(),
            types = schema.types.len(),
            "Schema validated"
        );
        Ok(())
    } else {
        tracing::debug!(count = violations.len(), "Schema validation failed");
        Err(Error::SchemaValidation { violations })
    }
}

/// Validates configuration values that end up in generated identifiers
/// and paths.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] naming the first offending field, with
/// every problem for that field in the message.
pub fn validate_config(config: &ResolvedConfig) -> Result<()> {
    let folders = [
        ("folders.types", &config.folders.types),
        ("folders.api", &config.folders.api),
        ("folders.client", &config.folders.client),
        ("folders.stores", &config.folders.stores),
    ];
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (field, folder) in folders {
        if sanitize_file_name(folder) != *folder {
            return Err(Error::ConfigError {
                field: field.to_string(),
                message: format!(
                    "'{folder}' is not a valid folder name (use lower-case letters, digits and '-')"
                ),
            });
        }
        if let Some(other) = seen.insert(folder.as_str(), field) {
            return Err(Error::ConfigError {
                field: field.to_string(),
                message: format!("'{folder}' is already used by {other}"),
            });
        }
    }

    if !is_valid_identifier(&config.client.class_name) {
        return Err(Error::ConfigError {
            field: "client.className".to_string(),
            message: format!("'{}' is not a valid identifier", config.client.class_name),
        });
    }

    if !config.errors.enabled && !config.errors.custom.is_empty() {
        return Err(Error::ConfigError {
            field: "errors.custom".to_string(),
            message: "custom error classes require errors.enabled".to_string(),
        });
    }

    let mut problems = Vec::new();
    let mut declared: HashSet<&str> = HashSet::new();
    for class in &config.errors.custom {
        let name = class.name.as_str();
        if !is_valid_identifier(name) {
            problems.push(format!("'{name}' is not a valid class name"));
        }
        if CLIENT_EXPORTS.contains(&name) {
            problems.push(format!("'{name}' clashes with a built-in client export"));
        } else if !declared.insert(name) {
            problems.push(format!("'{name}' is declared more than once"));
        }
        let base = class.extends.as_deref().unwrap_or("ApiError");
        if !ERROR_BASES.contains(&base) {
            problems.push(format!(
                "'{name}' extends '{base}', expected one of: {}",
                ERROR_BASES.join(", ")
            ));
        }
        let mut props = HashSet::new();
        for property in &class.properties {
            let prop = property.name.as_str();
            if !is_valid_identifier(prop) {
                problems.push(format!("'{name}.{prop}' is not a valid property name"));
            } else if ERROR_OWN_PROPERTIES.contains(&prop) {
                problems.push(format!("'{name}.{prop}' shadows a built-in error property"));
            } else if !props.insert(prop) {
                problems.push(format!("'{name}.{prop}' is declared more than once"));
            }
        }
    }
    if !problems.is_empty() {
        return Err(Error::ConfigError {
            field: "errors.custom".to_string(),
            message: problems.join("; "),
        });
    }

    Ok(())
}

fn describe(index: usize, endpoint: &Endpoint) -> String {
    format!("endpoint #{} ({} {})", index + 1, endpoint.method, endpoint.path)
}

fn check_endpoint(schema: &Schema, index: usize, endpoint: &Endpoint, violations: &mut Vec<String>) {
    let label = describe(index, endpoint);

    if endpoint.path.is_empty() {
        violations.push(format!("{label}: path is empty"));
    } else if !endpoint.path.starts_with('/') {
        violations.push(format!("{label}: path must start with '/'"));
    }

    if endpoint.http_method().is_none() {
        violations.push(format!(
            "{label}: unsupported HTTP method '{}' (expected GET, POST, PUT, PATCH, DELETE, HEAD or OPTIONS)",
            endpoint.method
        ));
    }

    let mut seen = HashSet::new();
    for param in &endpoint.parameters {
        if !seen.insert(param.name.as_str()) {
            violations.push(format!("{label}: duplicate parameter '{}'", param.name));
        }
        if !is_valid_identifier(&param.name) {
            violations.push(format!(
                "{label}: parameter '{}' is not a valid identifier",
                param.name
            ));
        }
        for name in referenced_types(&param.type_expr) {
            if !schema.knows_type(name) {
                violations.push(format!(
                    "{label}: parameter '{}' references undefined type '{name}'",
                    param.name
                ));
            }
        }
    }

    for placeholder in endpoint.path_placeholders() {
        if !seen.contains(placeholder) {
            violations.push(format!(
                "{label}: path placeholder '{{{placeholder}}}' has no matching parameter"
            ));
        }
    }

    for name in referenced_types(endpoint.response_type()) {
        if !schema.knows_type(name) {
            violations.push(format!("{label}: response references undefined type '{name}'"));
        }
    }
}

fn check_types(schema: &Schema, violations: &mut Vec<String>) {
    let mut stems: HashMap<String, &str> = HashMap::new();
    for (type_name, fields) in &schema.types {
        if !is_valid_identifier(type_name) {
            violations.push(format!("type '{type_name}': name is not a valid identifier"));
        }
        if let Some(other) = stems.insert(to_kebab_case(type_name), type_name) {
            violations.push(format!(
                "type '{type_name}': file name collides with type '{other}'"
            ));
        }
        for (field, expr) in fields {
            for name in referenced_types(expr) {
                if !schema.knows_type(name) {
                    violations.push(format!(
                        "type '{type_name}': field '{field}' references undefined type '{name}'"
                    ));
                }
            }
        }
    }
}

/// Every name that reaches the root index through `export *`.
#[derive(Debug, Default)]
struct ExportTable {
    owners: HashMap<String, String>,
}

impl ExportTable {
    fn claim(&mut self, name: String, owner: String, violations: &mut Vec<String>) {
        if let Some(previous) = self.owners.get(&name) {
            violations.push(format!("{owner}: exported name '{name}' collides with {previous}"));
        } else {
            self.owners.insert(name, owner);
        }
    }
}

fn check_names(schema: &Schema, config: &ResolvedConfig, violations: &mut Vec<String>) {
    let mut exports = ExportTable::default();
    let namespaced = config.api.namespace && config.api.group_by_resource;
    let stores = config.state_management;

    for export in CLIENT_EXPORTS {
        exports.claim((*export).to_string(), "the client module".to_string(), violations);
    }
    exports.claim(
        config.client.class_name.clone(),
        "the client class".to_string(),
        violations,
    );
    exports.claim(
        format!("{}Options", config.client.class_name),
        "the client options".to_string(),
        violations,
    );
    for class in &config.errors.custom {
        exports.claim(class.name.clone(), format!("custom error '{}'", class.name), violations);
    }

    for type_name in schema.types.keys() {
        let emitted = format!(
            "{}{type_name}{}",
            config.naming.type_prefix, config.naming.type_suffix
        );
        exports.claim(emitted, format!("type '{type_name}'"), violations);
    }

    let mut resource_stems: IndexMap<String, &str> = IndexMap::new();
    let mut store_stems: HashMap<String, String> = HashMap::new();

    for (index, endpoint) in schema.endpoints.iter().enumerate() {
        let label = describe(index, endpoint);
        let resource = resource_of(endpoint);
        let function = function_name(endpoint, config);

        if config.api.group_by_resource {
            let stem = sanitize_file_name(resource);
            match resource_stems.get(&stem) {
                Some(other) if *other != resource => violations.push(format!(
                    "{label}: resource '{resource}' and '{other}' map to the same file '{stem}.ts'"
                )),
                Some(_) => {}
                None => {
                    resource_stems.insert(stem, resource);
                }
            }
        }

        // Namespaced functions only clash within their resource file.
        if namespaced {
            let scoped = format!("{resource}.{function}");
            exports.claim(scoped, label.clone(), violations);
        } else {
            exports.claim(function.clone(), label.clone(), violations);
        }

        if stores.is_enabled() {
            let stem = to_kebab_case(&function);
            if RESERVED_STORE_STEMS.contains(&stem.as_str()) {
                violations.push(format!("{label}: store file name '{stem}' is reserved"));
            } else if let Some(other) = store_stems.insert(stem.clone(), label.clone()) {
                violations.push(format!("{label}: store file '{stem}.ts' collides with {other}"));
            }
            for export in store_exports(&function, config) {
                exports.claim(export, label.clone(), violations);
            }
        }
    }

    if namespaced {
        for resource in resource_stems.values() {
            let alias = sanitize_identifier(&to_camel_case(resource));
            exports.claim(alias, format!("resource '{resource}'"), violations);
        }
    }

    if stores.is_enabled() {
        for export in global_store_exports(config) {
            exports.claim(export, "the global store".to_string(), violations);
        }
    }
}

/// Names a per-operation store file exports.
#[must_use]
pub fn store_exports(function: &str, config: &ResolvedConfig) -> Vec<String> {
    let pascal = to_pascal_case(function);
    match config.state_management {
        StateManagement::Zustand => vec![
            format!("{pascal}State"),
            format!(
                "{}{pascal}{}",
                config.naming.store_prefix, config.naming.store_suffix
            ),
        ],
        StateManagement::Redux => vec![
            format!("{pascal}State"),
            format!("{function}Thunk"),
            format!("{function}Slice"),
            format!("{function}Reducer"),
            format!("reset{pascal}"),
        ],
        StateManagement::None => Vec::new(),
    }
}

/// Names the global store file (and redux root store) export.
#[must_use]
pub fn global_store_exports(config: &ResolvedConfig) -> Vec<String> {
    match config.state_management {
        StateManagement::Zustand => vec![
            "GlobalState".to_string(),
            format!(
                "{}Global{}",
                config.naming.store_prefix, config.naming.store_suffix
            ),
        ],
        StateManagement::Redux => [
            "GlobalState",
            "globalSlice",
            "setLoading",
            "setError",
            "globalReducer",
            "store",
            "RootState",
            "AppDispatch",
        ]
        .iter()
        .map(ToString::to_string)
        .collect(),
        StateManagement::None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientgen_core::Parameter;
    use clientgen_core::config::{CustomErrorClass, CustomErrorProperty};

    fn valid_schema() -> Schema {
        Schema::from_json(
            r#"{
                "endpoints": [
                    { "path": "/users", "method": "get", "response": { "type": "User[]" } },
                    { "path": "/users/{id}", "method": "GET",
                      "parameters": [{ "name": "id", "type": "string", "required": true }],
                      "response": { "type": "User" } }
                ],
                "types": {
                    "User": { "id": "string", "address": "Address | null" },
                    "Address": { "city": "string" }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_schema_passes() {
        assert!(validate(&valid_schema(), &ResolvedConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_violation() {
        let mut schema = valid_schema();
        schema.endpoints.push(Endpoint::new("FETCH", "orders"));
        schema.endpoints.push(
            Endpoint::new("POST", "/orders")
                .with_parameter(Parameter::required("item", "Item"))
                .with_parameter(Parameter::required("item", "string")),
        );

        let err = validate(&schema, &ResolvedConfig::default()).unwrap_err();
        let violations = err.violations();
        assert!(violations.iter().any(|v| v.contains("unsupported HTTP method 'FETCH'")));
        assert!(violations.iter().any(|v| v.contains("must start with '/'")));
        assert!(violations.iter().any(|v| v.contains("duplicate parameter 'item'")));
        assert!(violations.iter().any(|v| v.contains("undefined type 'Item'")));
        assert_eq!(violations.len(), 4);
    }

    #[test]
    fn test_empty_path() {
        let mut schema = Schema::default();
        schema.endpoints.push(Endpoint::new("GET", ""));
        let err = validate(&schema, &ResolvedConfig::default()).unwrap_err();
        assert!(err.violations()[0].contains("path is empty"));
    }

    #[test]
    fn test_undeclared_placeholder() {
        let mut schema = Schema::default();
        schema.endpoints.push(Endpoint::new("GET", "/users/{id}"));
        let err = validate(&schema, &ResolvedConfig::default()).unwrap_err();
        assert!(err.violations()[0].contains("'{id}' has no matching parameter"));
    }

    #[test]
    fn test_undefined_field_type() {
        let mut schema = valid_schema();
        schema.types["Address"].insert("country".into(), "Country".into());
        let err = validate(&schema, &ResolvedConfig::default()).unwrap_err();
        assert_eq!(
            err.violations(),
            ["type 'Address': field 'country' references undefined type 'Country'"]
        );
    }

    #[test]
    fn test_duplicate_function_names() {
        let mut schema = valid_schema();
        // Same verb, same resource, both with an id parameter.
        schema.endpoints.push(
            Endpoint::new("GET", "/users/{userId}")
                .with_parameter(Parameter::required("userId", "string")),
        );
        let err = validate(&schema, &ResolvedConfig::default()).unwrap_err();
        assert!(err.violations()[0].contains("'getUsersById' collides"));
    }

    #[test]
    fn test_nested_path_collides_with_parent() {
        let mut schema = valid_schema();
        schema.endpoints.push(
            Endpoint::new("GET", "/users/{id}/posts")
                .with_parameter(Parameter::required("id", "string")),
        );
        let err = validate(&schema, &ResolvedConfig::default()).unwrap_err();
        assert!(err.violations()[0].starts_with("endpoint #3 (GET /users/{id}/posts)"));
        assert!(err.violations()[0].contains("'getUsersById' collides"));
    }

    #[test]
    fn test_type_collides_with_client_export() {
        let mut schema = valid_schema();
        schema.types.insert("ApiError".into(), Default::default());
        let err = validate(&schema, &ResolvedConfig::default()).unwrap_err();
        assert!(err.violations()[0].contains("'ApiError' collides with the client module"));
    }

    #[test]
    fn test_type_prefix_avoids_collision() {
        let mut schema = valid_schema();
        schema.types.insert("ApiError".into(), Default::default());
        let mut config = ResolvedConfig::default();
        config.naming.type_prefix = "I".into();
        assert!(validate(&schema, &config).is_ok());
    }

    #[test]
    fn test_resource_file_collision_only_when_grouped() {
        let mut schema = Schema::default();
        schema.endpoints.push(Endpoint::new("GET", "/user-profiles"));
        schema.endpoints.push(Endpoint::new("POST", "/user_profiles"));

        let err = validate(&schema, &ResolvedConfig::default()).unwrap_err();
        assert!(err.violations()[0].contains("same file 'user-profiles.ts'"));

        let mut config = ResolvedConfig::default();
        config.api.group_by_resource = false;
        assert!(validate(&schema, &config).is_ok());
    }

    #[test]
    fn test_type_file_collision() {
        let mut schema = Schema::default();
        schema.types.insert("UserProfile".into(), Default::default());
        schema.types.insert("User_Profile".into(), Default::default());
        let err = validate(&schema, &ResolvedConfig::default()).unwrap_err();
        assert!(err.violations()[0].contains("file name collides with type 'UserProfile'"));
    }

    #[test]
    fn test_store_exports_follow_naming() {
        let mut config = ResolvedConfig::default();
        config.naming.store_prefix = "use".into();
        config.naming.store_suffix = "Query".into();
        assert_eq!(
            store_exports("getUsers", &config),
            vec!["GetUsersState", "useGetUsersQuery"]
        );

        config.state_management = StateManagement::None;
        assert!(store_exports("getUsers", &config).is_empty());
        assert!(global_store_exports(&config).is_empty());
    }

    #[test]
    fn test_config_folder_names() {
        let mut config = ResolvedConfig::default();
        assert!(validate_config(&config).is_ok());

        config.folders.api = "../escape".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("folders.api"));

        config.folders.api = "types".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("already used by folders.types"));
    }

    #[test]
    fn test_config_custom_errors() {
        let mut config = ResolvedConfig::default();
        config.errors.custom = vec![
            CustomErrorClass {
                name: "QuotaError".into(),
                extends: None,
                properties: vec![CustomErrorProperty {
                    name: "limit".into(),
                    type_expr: "number".into(),
                }],
            },
            CustomErrorClass {
                name: "BadBase".into(),
                extends: Some("Whatever".into()),
                properties: vec![CustomErrorProperty {
                    name: "status".into(),
                    type_expr: "number".into(),
                }],
            },
        ];

        let err = validate_config(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("errors.custom"));
        assert!(message.contains("extends 'Whatever'"));
        assert!(message.contains("'BadBase.status' shadows"));
        assert!(!message.contains("QuotaError"));
    }

    #[test]
    fn test_custom_errors_need_error_module() {
        let mut config = ResolvedConfig::default();
        config.errors.enabled = false;
        assert!(validate_config(&config).is_ok());

        config.errors.custom = vec![CustomErrorClass {
            name: "QuotaError".into(),
            extends: None,
            properties: vec![],
        }];
        let err = validate_config(&config).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("errors.enabled"));
    }

    #[test]
    fn test_invalid_class_name() {
        let mut config = ResolvedConfig::default();
        config.client.class_name = "my-client".into();
        assert!(validate_config(&config).unwrap_err().is_config_error());
    }
}
