//! Client generator: HTTP helper, error classes, plugin registry and the
//! client class.

use super::{from_group, import_schema_types};
use crate::generator::{ArtifactGenerator, GenerationContext};
use crate::render::SourceFile;
use crate::typescript::ts_string;
use crate::types::GeneratedCode;
use clientgen_core::config::{CustomErrorClass, HttpClient};
use clientgen_core::Result;
use serde::Serialize;

const API_ERROR: &str = "ApiError";

#[derive(Debug, Clone, Serialize)]
struct HttpContext {
    result_pattern: bool,
    doc_comments: bool,
    base_url: String,
    api_version: String,
    environment: String,
    timeout_ms: u64,
    headers: Vec<HeaderContext>,
    retry_enabled: bool,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
struct HeaderContext {
    key: String,
    value: String,
}

#[derive(Debug, Clone, Serialize)]
struct RequestContext {
    network_error: bool,
    errors: bool,
    doc_comments: bool,
    result_pattern: bool,
    plugins: bool,
}

#[derive(Debug, Clone, Serialize)]
struct ErrorsContext {
    doc_comments: bool,
    validation_error: bool,
    network_error: bool,
}

#[derive(Debug, Clone, Serialize)]
struct CustomErrorContext {
    name: String,
    extends: String,
    api_base: bool,
    properties: Vec<PropertyContext>,
}

#[derive(Debug, Clone, Serialize)]
struct PropertyContext {
    name: String,
    type_expr: String,
}

#[derive(Debug, Clone, Serialize)]
struct ClassContext {
    options_name: String,
    doc_comments: bool,
    class_name: String,
    plugins: bool,
    default_export: bool,
}

#[derive(Debug, Clone, Serialize)]
struct DocContext {
    doc_comments: bool,
}

/// Emits the `client` folder.
///
/// `http.ts` is always present. `errors.ts`, `plugins.ts` and `client.ts`
/// follow their toggles, and `index.ts` re-exports whatever was emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientGenerator;

impl ClientGenerator {
    fn network_error(ctx: &GenerationContext<'_>) -> bool {
        ctx.config.errors.enabled && ctx.config.errors.network_error
    }

    fn http(ctx: &GenerationContext<'_>) -> Result<SourceFile> {
        let config = ctx.config;
        let mut file = SourceFile::new();

        let context = HttpContext {
            result_pattern: config.response.is_result(),
            doc_comments: ctx.doc_comments(),
            base_url: ts_string(&config.base_url),
            api_version: ts_string(&config.api_version),
            environment: ts_string(&config.environment),
            timeout_ms: config.http.timeout_ms,
            headers: config
                .http
                .headers
                .iter()
                .map(|(key, value)| HeaderContext {
                    key: ts_string(key),
                    value: ts_string(value),
                })
                .collect(),
            retry_enabled: config.http.retry.enabled,
            retry_attempts: config.http.retry.attempts,
            retry_delay_ms: config.http.retry.delay_ms,
        };
        file.push(ctx.engine.render("client/http", &context)?);

        let transport = match config.http_client {
            HttpClient::Axios => {
                file.import_default("axios", "axios");
                "client/transport-axios"
            }
            HttpClient::Fetch => "client/transport-fetch",
            HttpClient::Custom => "client/transport-custom",
        };
        file.push(ctx.engine.render(
            transport,
            &DocContext {
                doc_comments: ctx.doc_comments(),
            },
        )?);

        if config.errors.enabled {
            file.import_named("./errors", API_ERROR);
            if Self::network_error(ctx) {
                file.import_named("./errors", "NetworkError");
            }
        }
        if config.plugins.enabled {
            file.import_named("./plugins", "pluginRegistry");
        }

        let context = RequestContext {
            network_error: Self::network_error(ctx),
            errors: config.errors.enabled,
            doc_comments: ctx.doc_comments(),
            result_pattern: config.response.is_result(),
            plugins: config.plugins.enabled,
        };
        file.push(ctx.engine.render("client/request", &context)?);

        Ok(file)
    }

    fn custom_error(
        ctx: &GenerationContext<'_>,
        file: &mut SourceFile,
        class: &CustomErrorClass,
    ) -> Result<String> {
        let extends = class.extends.clone().unwrap_or_else(|| API_ERROR.to_string());
        let mut properties = Vec::with_capacity(class.properties.len());
        for property in &class.properties {
            import_schema_types(file, ctx, ctx.types.declared_references(&property.type_expr));
            properties.push(PropertyContext {
                name: property.name.clone(),
                type_expr: ctx.types.map(&property.type_expr),
            });
        }

        let context = CustomErrorContext {
            name: class.name.clone(),
            api_base: extends != "Error",
            extends,
            properties,
        };
        ctx.engine.render("client/custom-error", &context)
    }

    fn errors(ctx: &GenerationContext<'_>) -> Result<SourceFile> {
        let mut file = SourceFile::new();
        let context = ErrorsContext {
            doc_comments: ctx.doc_comments(),
            validation_error: ctx.config.errors.validation_error,
            network_error: Self::network_error(ctx),
        };
        file.push(ctx.engine.render("client/errors", &context)?);

        for class in &ctx.config.errors.custom {
            let section = Self::custom_error(ctx, &mut file, class)?;
            file.push(section);
        }
        Ok(file)
    }

    fn plugins(ctx: &GenerationContext<'_>) -> Result<SourceFile> {
        let mut file = SourceFile::new();
        file.import_type("./http", "TransportRequest")
            .import_type("./http", "TransportResponse");
        file.push(ctx.engine.render(
            "client/plugins",
            &DocContext {
                doc_comments: ctx.doc_comments(),
            },
        )?);
        if ctx.config.plugins.logger {
            file.push(ctx.engine.render(
                "client/logger-plugin",
                &DocContext {
                    doc_comments: ctx.doc_comments(),
                },
            )?);
        }
        Ok(file)
    }

    fn class(ctx: &GenerationContext<'_>) -> Result<SourceFile> {
        let config = ctx.config;
        let mut file = SourceFile::new();
        file.import_namespace(&from_group(&config.folders.api), "endpoints")
            .import_named("./http", "configureHttp")
            .import_named("./http", "getHttpConfig")
            .import_type("./http", "HttpConfig");
        if config.plugins.enabled {
            file.import_named("./plugins", "pluginRegistry")
                .import_type("./plugins", "Plugin");
        }

        let context = ClassContext {
            options_name: format!("{}Options", config.client.class_name),
            doc_comments: ctx.doc_comments(),
            class_name: config.client.class_name.clone(),
            plugins: config.plugins.enabled,
            default_export: config.client.default_export,
        };
        file.push(ctx.engine.render("client/class", &context)?);
        Ok(file)
    }
}

impl ArtifactGenerator for ClientGenerator {
    fn group(&self) -> &'static str {
        "client"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<GeneratedCode> {
        let config = ctx.config;
        let folder = &config.folders.client;
        let mut code = GeneratedCode::new(self.group());
        let mut index = vec!["export * from './http';".to_string()];

        code.add_file(ctx.file(ctx.path_in(folder, "http"), &Self::http(ctx)?));

        if config.errors.enabled {
            code.add_file(ctx.file(ctx.path_in(folder, "errors"), &Self::errors(ctx)?));
            index.push("export * from './errors';".to_string());
        }
        if config.plugins.enabled {
            code.add_file(ctx.file(ctx.path_in(folder, "plugins"), &Self::plugins(ctx)?));
            index.push("export * from './plugins';".to_string());
        }
        if config.client.enabled {
            code.add_file(ctx.file(ctx.path_in(folder, "client"), &Self::class(ctx)?));
            index.push("export * from './client';".to_string());
            if config.client.default_export {
                index.push("export { default } from './client';".to_string());
            }
        }

        let mut file = SourceFile::new();
        file.push(index.join("\n"));
        code.add_file(ctx.file(ctx.path_in(folder, "index"), &file));

        tracing::debug!(
            transport = %config.http_client,
            files = code.file_count(),
            "Generated client"
        );
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_engine::TemplateEngine;
    use clientgen_core::config::{CustomErrorProperty, ResponsePattern};
    use clientgen_core::{ResolvedConfig, Schema};

    fn generate(config: &ResolvedConfig) -> GeneratedCode {
        let schema = Schema::from_json(r#"{ "types": { "FieldIssue": { "field": "string" } } }"#)
            .unwrap();
        let engine = TemplateEngine::new().unwrap();
        let ctx = GenerationContext::new(&schema, config, &engine);
        ClientGenerator.generate(&ctx).unwrap()
    }

    fn paths(code: &GeneratedCode) -> Vec<&str> {
        code.files().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_default_layout() {
        let code = generate(&ResolvedConfig::default());
        assert_eq!(
            paths(&code),
            vec![
                "client/http.ts",
                "client/errors.ts",
                "client/plugins.ts",
                "client/client.ts",
                "client/index.ts"
            ]
        );

        let index = &code.file("client/index.ts").unwrap().content;
        assert!(index.contains("export * from './http';"));
        assert!(index.contains("export { default } from './client';"));
    }

    #[test]
    fn test_http_helper_embeds_configuration() {
        let mut config = ResolvedConfig::default();
        config.base_url = "https://api.test".to_string();
        config.api_version = "v2".to_string();
        config.http.timeout_ms = 2500;
        config.http.headers.insert("X-Tenant".to_string(), "acme".to_string());
        config.http.retry.enabled = true;
        let code = generate(&config);
        let http = &code.file("client/http.ts").unwrap().content;

        assert!(http.contains(r#"baseUrl: "https://api.test","#));
        assert!(http.contains(r#"apiVersion: "v2","#));
        assert!(http.contains("timeoutMs: 2500,"));
        assert!(http.contains(r#""X-Tenant": "acme","#));
        assert!(http.contains("retry: { enabled: true, attempts: 3, delayMs: 1000 },"));
        assert!(http.contains("export async function request<T>("));
    }

    #[test]
    fn test_api_key_is_not_embedded() {
        let mut config = ResolvedConfig::default();
        config.api_key = Some("sk-secret".to_string());
        let code = generate(&config);
        assert!(code.files().all(|f| !f.content.contains("sk-secret")));
    }

    #[test]
    fn test_transport_selection() {
        let code = generate(&ResolvedConfig::default());
        let http = &code.file("client/http.ts").unwrap().content;
        assert!(http.contains("import axios from 'axios';"));
        assert!(http.contains("axios.request("));

        let mut config = ResolvedConfig::default();
        config.http_client = HttpClient::Fetch;
        let code = generate(&config);
        let http = &code.file("client/http.ts").unwrap().content;
        assert!(!http.contains("axios"));
        assert!(http.contains("await fetch(request.url"));

        config.http_client = HttpClient::Custom;
        let code = generate(&config);
        let http = &code.file("client/http.ts").unwrap().content;
        assert!(http.contains("export function setTransport(custom: Transport): void {"));
    }

    #[test]
    fn test_errors_disabled() {
        let mut config = ResolvedConfig::default();
        config.errors.enabled = false;
        let code = generate(&config);

        assert!(code.file("client/errors.ts").is_none());
        let http = &code.file("client/http.ts").unwrap().content;
        assert!(!http.contains("./errors"));
        assert!(!http.contains("new ApiError"));
        assert!(!code.file("client/index.ts").unwrap().content.contains("./errors"));
    }

    #[test]
    fn test_custom_error_classes() {
        let mut config = ResolvedConfig::default();
        config.errors.custom = vec![
            CustomErrorClass {
                name: "QuotaError".to_string(),
                extends: None,
                properties: vec![CustomErrorProperty {
                    name: "issues".to_string(),
                    type_expr: "FieldIssue[]".to_string(),
                }],
            },
            CustomErrorClass {
                name: "ConfigMissingError".to_string(),
                extends: Some("Error".to_string()),
                properties: Vec::new(),
            },
        ];
        let code = generate(&config);
        let errors = &code.file("client/errors.ts").unwrap().content;

        assert!(errors.contains("import type { FieldIssue } from '../types';"));
        assert!(errors.contains("export class QuotaError extends ApiError {"));
        assert!(errors.contains("readonly issues: FieldIssue[];"));
        assert!(errors.contains(
            "constructor(message: string, status: number, response: unknown, issues: FieldIssue[]) {"
        ));
        assert!(errors.contains("export class ConfigMissingError extends Error {"));
        assert!(errors.contains("super(message);"));
    }

    #[test]
    fn test_plugins_toggle() {
        let mut config = ResolvedConfig::default();
        config.plugins.logger = true;
        let code = generate(&config);
        let plugins = &code.file("client/plugins.ts").unwrap().content;
        assert!(plugins.contains("import type { TransportRequest, TransportResponse } from './http';"));
        assert!(plugins.contains("pluginRegistry.register(loggerPlugin);"));

        config.plugins.enabled = false;
        let code = generate(&config);
        assert!(code.file("client/plugins.ts").is_none());
        let http = &code.file("client/http.ts").unwrap().content;
        assert!(!http.contains("pluginRegistry"));
        assert!(!code.file("client/client.ts").unwrap().content.contains("use(plugin"));
    }

    #[test]
    fn test_client_class() {
        let mut config = ResolvedConfig::default();
        config.client.class_name = "ShopClient".to_string();
        config.client.default_export = false;
        let code = generate(&config);
        let class = &code.file("client/client.ts").unwrap().content;

        assert!(class.contains("import * as endpoints from '../api';"));
        assert!(class.contains("export interface ShopClientOptions {"));
        assert!(class.contains("export class ShopClient {"));
        assert!(!class.contains("export default"));
        assert!(!code.file("client/index.ts").unwrap().content.contains("default"));

        config.client.enabled = false;
        let code = generate(&config);
        assert!(code.file("client/client.ts").is_none());
    }

    #[test]
    fn test_result_pattern_helper() {
        let mut config = ResolvedConfig::default();
        config.response.pattern = ResponsePattern::Result;
        let code = generate(&config);
        let http = &code.file("client/http.ts").unwrap().content;
        assert!(http.contains("export interface ApiResult<T> {"));
        assert!(http.contains("Promise<ApiResult<T>>"));
        assert!(http.contains("return { data: null, error };"));
    }
}
