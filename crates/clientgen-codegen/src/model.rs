//! Generation model shared by the api, client and store generators.
//!
//! The model is computed once per run from the validated schema and the
//! resolved configuration: endpoints are bucketed into resources, the
//! service-selection filter is applied, and every name a generator needs
//! (function, module, store file) is derived up front. Generators that
//! reference each other's output read the same model, which keeps their
//! imports consistent.

use crate::naming::{
    self, derive_method_name, prefixed_function_name, render_parameter_signature,
    render_parameter_type, resource_of, sanitize_file_name, sanitize_identifier, to_camel_case,
};
use crate::typescript::{TypeMapper, doc_text};
use clientgen_core::{Endpoint, HttpMethod, Parameter, ResolvedConfig, Schema};
use indexmap::IndexMap;

/// Resources, operations and advisories of one run.
#[derive(Debug, Clone, Default)]
pub struct ApiModel {
    /// Selected resources in schema order
    pub resources: Vec<ResourceModel>,
    /// Every resource the schema defines, selected or not
    pub available: Vec<String>,
    /// Non-fatal advisories (unknown services)
    pub warnings: Vec<String>,
}

/// Endpoints sharing a first static path segment.
#[derive(Debug, Clone)]
pub struct ResourceModel {
    /// Resource name as it appears in the path
    pub name: String,
    /// File stem of the resource module
    pub file_stem: String,
    /// Identifier used for namespace re-exports
    pub namespace: String,
    /// Operations in schema order
    pub operations: Vec<OperationModel>,
}

/// One endpoint, with every derived name resolved.
#[derive(Debug, Clone)]
pub struct OperationModel {
    /// Exported function name, prefix applied
    pub function_name: String,
    /// HTTP verb
    pub method: HttpMethod,
    /// Path template as declared
    pub path: String,
    /// Description as a single doc-safe line, empty when absent
    pub summary: String,
    /// Declared parameters in order
    pub params: Vec<Parameter>,
    /// Object type of the parameter bag, empty without parameters
    pub params_type: String,
    /// Destructured parameter declaration, `= {}` appended when all optional
    pub signature: String,
    /// Whether every parameter is optional
    pub all_optional: bool,
    /// Emitted TypeScript response type
    pub response_type: String,
    /// Declared schema types referenced by parameters or response
    pub referenced_types: Vec<String>,
    /// Module path of the function relative to the output root, no extension
    pub module: String,
    /// File stem of the store generated for this operation
    pub store_stem: String,
}

impl OperationModel {
    /// Returns `true` if the function takes a parameter bag.
    #[must_use]
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

impl ApiModel {
    /// Builds the model. The schema must already be validated.
    #[must_use]
    pub fn build(schema: &Schema, config: &ResolvedConfig, types: &TypeMapper) -> Self {
        let mut buckets: IndexMap<&str, Vec<&Endpoint>> = IndexMap::new();
        for endpoint in &schema.endpoints {
            buckets.entry(resource_of(endpoint)).or_default().push(endpoint);
        }

        let available: Vec<String> = buckets.keys().map(|name| (*name).to_string()).collect();
        let mut warnings = Vec::new();

        if let Some(include) = &config.services {
            let unknown: Vec<&str> = include
                .iter()
                .map(String::as_str)
                .filter(|name| !buckets.contains_key(name))
                .collect();
            if !unknown.is_empty() {
                let alternatives = if available.is_empty() {
                    "(none)".to_string()
                } else {
                    available.join(", ")
                };
                let message = format!(
                    "Unknown services in services.include: {}. Available: {alternatives}",
                    unknown.join(", ")
                );
                tracing::warn!("{message}");
                warnings.push(message);
            }
            buckets.retain(|name, _| include.iter().any(|wanted| wanted.as_str() == *name));
        }

        let folder = &config.folders.api;
        let grouped = config.api.group_by_resource;

        let resources = buckets
            .into_iter()
            .map(|(name, endpoints)| {
                let file_stem = sanitize_file_name(name);
                let module = if grouped {
                    format!("{folder}/{file_stem}")
                } else {
                    format!("{folder}/index")
                };
                ResourceModel {
                    name: name.to_string(),
                    namespace: sanitize_identifier(&to_camel_case(name)),
                    operations: endpoints
                        .into_iter()
                        .filter_map(|endpoint| operation(endpoint, config, types, &module))
                        .collect(),
                    file_stem,
                }
            })
            .collect();

        Self {
            resources,
            available,
            warnings,
        }
    }

    /// Every selected operation across resources, in schema order per resource.
    pub fn operations(&self) -> impl Iterator<Item = &OperationModel> {
        self.resources.iter().flat_map(|r| r.operations.iter())
    }

    /// Number of selected operations.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.operations().count()
    }
}

/// Exported function name of an endpoint under the naming configuration.
#[must_use]
pub fn function_name(endpoint: &Endpoint, config: &ResolvedConfig) -> String {
    prefixed_function_name(&config.naming.function_prefix, &derive_method_name(endpoint))
}

fn operation(
    endpoint: &Endpoint,
    config: &ResolvedConfig,
    types: &TypeMapper,
    module: &str,
) -> Option<OperationModel> {
    let Some(method) = endpoint.http_method() else {
        tracing::debug!(method = %endpoint.method, path = %endpoint.path, "Skipping endpoint with unsupported method");
        return None;
    };

    let name = function_name(endpoint, config);
    let params = endpoint.parameters.clone();
    let map = |expr: &str| types.map(expr);

    let all_optional = !params.is_empty() && params.iter().all(|p| !p.required);
    let mut signature = render_parameter_signature(&params, map);
    if all_optional {
        signature.push_str(" = {}");
    }

    let mut referenced_types: Vec<String> = Vec::new();
    let expressions = params
        .iter()
        .map(|p| p.type_expr.as_str())
        .chain(std::iter::once(endpoint.response_type()));
    for expr in expressions {
        for name in types.declared_references(expr) {
            if !referenced_types.iter().any(|known| known == name) {
                referenced_types.push(name.to_string());
            }
        }
    }

    Some(OperationModel {
        store_stem: naming::to_kebab_case(&name),
        function_name: name,
        method,
        path: endpoint.path.clone(),
        summary: endpoint.description.as_deref().map(doc_text).unwrap_or_default(),
        params_type: render_parameter_type(&params, map),
        signature,
        all_optional,
        response_type: types.map(endpoint.response_type()),
        referenced_types,
        module: module.to_string(),
        params,
    })
}
