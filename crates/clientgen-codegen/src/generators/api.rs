//! Api generator: one exported async function per selected endpoint.

use super::{EMPTY_MODULE, from_group, import_schema_types};
use crate::generator::{ArtifactGenerator, GenerationContext};
use crate::model::OperationModel;
use crate::render::SourceFile;
use crate::typescript::{doc_text, ts_string};
use crate::types::GeneratedCode;
use clientgen_core::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
struct FunctionContext<'a> {
    doc_comments: bool,
    summary: &'a str,
    method: &'static str,
    doc_path: String,
    param_docs: Vec<ParamDoc>,
    name: &'a str,
    signature: &'a str,
    return_type: String,
    use_helper: bool,
    response_type: &'a str,
    call_args: String,
    result_pattern: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ParamDoc {
    name: String,
    description: String,
}

/// Emits the api module(s): one file per resource, or a single
/// `api/index.ts` when grouping is off.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiGenerator;

impl ApiGenerator {
    /// Arguments of the `request` call: verb, path template, parameter bag.
    fn call_args(op: &OperationModel) -> String {
        let mut args = format!("{}, {}", ts_string(op.method.as_str()), ts_string(&op.path));
        if op.has_params() {
            args.push_str(&format!(", {{ {} }}", op.param_names().collect::<Vec<_>>().join(", ")));
        }
        args
    }

    fn render_function(ctx: &GenerationContext<'_>, op: &OperationModel) -> Result<String> {
        let result_pattern = ctx.config.response.is_result();
        let context = FunctionContext {
            doc_comments: ctx.doc_comments(),
            summary: &op.summary,
            method: op.method.as_str(),
            doc_path: doc_text(&op.path),
            param_docs: op
                .params
                .iter()
                .map(|p| ParamDoc {
                    name: p.name.clone(),
                    description: p.description.as_deref().map(doc_text).unwrap_or_default(),
                })
                .collect(),
            name: &op.function_name,
            signature: &op.signature,
            return_type: if result_pattern {
                format!("ApiResult<{}>", op.response_type)
            } else {
                op.response_type.clone()
            },
            use_helper: ctx.config.api.use_http_helper,
            response_type: &op.response_type,
            call_args: Self::call_args(op),
            result_pattern,
        };
        ctx.engine.render("api/function", &context)
    }

    /// Builds one module holding the given operations.
    fn module<'o>(
        ctx: &GenerationContext<'_>,
        operations: impl IntoIterator<Item = &'o OperationModel>,
    ) -> Result<SourceFile> {
        let http = from_group(&format!("{}/http", ctx.config.folders.client));
        let mut file = SourceFile::new();

        for op in operations {
            if ctx.config.api.use_http_helper {
                file.import_named(&http, "request");
            }
            if ctx.config.response.is_result() {
                file.import_type(&http, "ApiResult");
            }
            import_schema_types(&mut file, ctx, op.referenced_types.iter().map(String::as_str));
            file.push(Self::render_function(ctx, op)?);
        }

        if file.is_empty() {
            file.push(EMPTY_MODULE);
        }
        Ok(file)
    }
}

impl ArtifactGenerator for ApiGenerator {
    fn group(&self) -> &'static str {
        "api"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<GeneratedCode> {
        let folder = &ctx.config.folders.api;
        let mut code = GeneratedCode::new(self.group());
        for warning in &ctx.model.warnings {
            code.warn(warning.clone());
        }

        if !ctx.config.api.group_by_resource {
            let file = Self::module(ctx, ctx.model.operations())?;
            code.add_file(ctx.file(ctx.path_in(folder, "index"), &file));
            return Ok(code);
        }

        let mut index = Vec::with_capacity(ctx.model.resources.len());
        for resource in &ctx.model.resources {
            let file = Self::module(ctx, &resource.operations)?;
            code.add_file(ctx.file(ctx.path_in(folder, &resource.file_stem), &file));

            index.push(if ctx.config.api.namespace {
                format!("export * as {} from './{}';", resource.namespace, resource.file_stem)
            } else {
                format!("export * from './{}';", resource.file_stem)
            });
            tracing::debug!(
                resource = %resource.name,
                operations = resource.operations.len(),
                "Generated api module"
            );
        }

        let mut file = SourceFile::new();
        file.push(if index.is_empty() {
            EMPTY_MODULE.to_string()
        } else {
            index.join("\n")
        });
        code.add_file(ctx.file(ctx.path_in(folder, "index"), &file));

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_engine::TemplateEngine;
    use clientgen_core::config::ResponsePattern;
    use clientgen_core::{ResolvedConfig, Schema};

    fn schema() -> Schema {
        Schema::from_json(
            r#"{
                "endpoints": [
                    { "path": "/users", "method": "GET", "description": "List users",
                      "response": { "type": "User[]" } },
                    { "path": "/users/{id}", "method": "GET",
                      "parameters": [{ "name": "id", "type": "string", "required": true,
                                       "description": "User id" }],
                      "response": { "type": "User" } },
                    { "path": "/orders", "method": "POST",
                      "parameters": [{ "name": "total", "type": "number", "required": true }],
                      "response": { "type": "Order" } }
                ],
                "types": {
                    "User": { "id": "string" },
                    "Order": { "id": "string", "total": "number" }
                }
            }"#,
        )
        .unwrap()
    }

    fn generate(config: &ResolvedConfig) -> GeneratedCode {
        let schema = schema();
        let engine = TemplateEngine::new().unwrap();
        let ctx = GenerationContext::new(&schema, config, &engine);
        ApiGenerator.generate(&ctx).unwrap()
    }

    #[test]
    fn test_grouped_layout() {
        let code = generate(&ResolvedConfig::default());
        let paths: Vec<_> = code.files().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["api/users.ts", "api/orders.ts", "api/index.ts"]);

        let index = &code.file("api/index.ts").unwrap().content;
        assert!(index.contains("export * from './users';"));
        assert!(index.contains("export * from './orders';"));
    }

    #[test]
    fn test_function_delegates_to_request() {
        let code = generate(&ResolvedConfig::default());
        let users = &code.file("api/users.ts").unwrap().content;

        assert!(users.contains("import { request } from '../client/http';"));
        assert!(users.contains("import type { User } from '../types';"));
        assert!(users.contains("export async function getUsers(): Promise<User[]> {"));
        assert!(users.contains(r#"return request<User[]>("GET", "/users");"#));
        assert!(users.contains(
            "export async function getUsersById({ id }: { id: string }): Promise<User> {"
        ));
        assert!(users.contains(r#"return request<User>("GET", "/users/{id}", { id });"#));
        assert!(users.contains("* List users"));
        assert!(users.contains("@param params.id User id"));
    }

    #[test]
    fn test_namespace_reexports() {
        let mut config = ResolvedConfig::default();
        config.api.namespace = true;
        let code = generate(&config);
        let index = &code.file("api/index.ts").unwrap().content;
        assert!(index.contains("export * as users from './users';"));
        assert!(index.contains("export * as orders from './orders';"));
    }

    #[test]
    fn test_flat_layout() {
        let mut config = ResolvedConfig::default();
        config.api.group_by_resource = false;
        let code = generate(&config);

        assert_eq!(code.file_count(), 1);
        let index = &code.file("api/index.ts").unwrap().content;
        assert!(index.contains("export async function getUsers()"));
        assert!(index.contains("export async function createOrders("));
        assert!(index.contains("import type { Order, User } from '../types';"));
    }

    #[test]
    fn test_result_pattern() {
        let mut config = ResolvedConfig::default();
        config.response.pattern = ResponsePattern::Result;
        let code = generate(&config);
        let orders = &code.file("api/orders.ts").unwrap().content;

        assert!(orders.contains("import type { ApiResult } from '../client/http';"));
        assert!(orders.contains("Promise<ApiResult<Order>>"));
        assert!(orders.contains(r#"return request<Order>("POST", "/orders", { total });"#));
    }

    #[test]
    fn test_without_http_helper() {
        let mut config = ResolvedConfig::default();
        config.api.use_http_helper = false;
        let code = generate(&config);
        let users = &code.file("api/users.ts").unwrap().content;

        assert!(!users.contains("import { request }"));
        assert!(users.contains("throw new Error('HTTP helper is not configured for getUsers');"));
    }

    #[test]
    fn test_service_selection_and_warnings() {
        let mut config = ResolvedConfig::default();
        config.services = Some(vec!["orders".to_string(), "ghost".to_string()]);
        let code = generate(&config);

        let paths: Vec<_> = code.files().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["api/orders.ts", "api/index.ts"]);
        assert_eq!(code.warnings.len(), 1);
        assert!(code.warnings[0].contains("ghost"));
    }

    #[test]
    fn test_empty_selection_emits_empty_index() {
        let mut config = ResolvedConfig::default();
        config.services = Some(vec!["ghost".to_string()]);
        let code = generate(&config);

        assert_eq!(code.file_count(), 1);
        assert!(code.files[0].content.contains("export {};"));
    }

    #[test]
    fn test_doc_comments_off() {
        let mut config = ResolvedConfig::default();
        config.generation.doc_comments = false;
        let code = generate(&config);
        assert!(!code.file("api/users.ts").unwrap().content.contains("/**"));
    }
}
