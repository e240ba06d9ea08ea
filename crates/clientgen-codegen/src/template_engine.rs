//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with every built-in template pre-registered. Templates
//! render declaration-sized fragments (one interface, one function, one
//! class); imports and file assembly happen in [`crate::render`].
//!
//! # Examples
//!
//! ```
//! use clientgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let text = engine
//!     .render(
//!         "types/interface",
//!         &json!({
//!             "name": "User",
//!             "doc": "",
//!             "fields": [{ "key": "id", "type_expr": "string" }]
//!         }),
//!     )
//!     .unwrap();
//! assert!(text.contains("export interface User {"));
//! ```

use clientgen_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Built-in templates, name and source.
const TEMPLATES: &[(&str, &str)] = &[
    (
        "types/interface",
        include_str!("../templates/types/interface.ts.hbs"),
    ),
    ("api/function", include_str!("../templates/api/function.ts.hbs")),
    ("client/http", include_str!("../templates/client/http.ts.hbs")),
    (
        "client/transport-axios",
        include_str!("../templates/client/transport-axios.ts.hbs"),
    ),
    (
        "client/transport-fetch",
        include_str!("../templates/client/transport-fetch.ts.hbs"),
    ),
    (
        "client/transport-custom",
        include_str!("../templates/client/transport-custom.ts.hbs"),
    ),
    ("client/request", include_str!("../templates/client/request.ts.hbs")),
    ("client/errors", include_str!("../templates/client/errors.ts.hbs")),
    (
        "client/custom-error",
        include_str!("../templates/client/custom-error.ts.hbs"),
    ),
    ("client/plugins", include_str!("../templates/client/plugins.ts.hbs")),
    (
        "client/logger-plugin",
        include_str!("../templates/client/logger-plugin.ts.hbs"),
    ),
    ("client/class", include_str!("../templates/client/class.ts.hbs")),
    (
        "stores/zustand",
        include_str!("../templates/stores/zustand.ts.hbs"),
    ),
    (
        "stores/zustand-global",
        include_str!("../templates/stores/zustand-global.ts.hbs"),
    ),
    (
        "stores/redux-slice",
        include_str!("../templates/stores/redux-slice.ts.hbs"),
    ),
    (
        "stores/redux-global",
        include_str!("../templates/stores/redux-global.ts.hbs"),
    ),
    (
        "stores/redux-root",
        include_str!("../templates/stores/redux-root.ts.hbs"),
    ),
];

/// Template engine for code generation.
///
/// Strict mode is on: a template that reads a field missing from its
/// context fails instead of rendering an empty string. Output is never
/// HTML-escaped.
#[derive(Debug)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Creates a new template engine with registered templates.
    ///
    /// # Errors
    ///
    /// Returns error if template registration fails (should not happen
    /// with valid built-in templates).
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, source) in TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::GenerationError {
                    artifact: (*name).to_string(),
                    message: format!("Failed to register template: {e}"),
                    source: Some(Box::new(e)),
                })?;
        }

        tracing::trace!(count = TEMPLATES.len(), "Registered templates");
        Ok(Self { handlebars })
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - Template reads a field the context does not have
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::GenerationError {
                artifact: template_name.to_string(),
                message: format!("Template rendering failed: {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Registers an additional template.
    ///
    /// # Errors
    ///
    /// Returns error if template string is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_codegen::template_engine::TemplateEngine;
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine.register_template_string("custom", "// {{name}}").unwrap();
    /// assert!(engine.has_template("custom"));
    /// ```
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::GenerationError {
                artifact: name.to_string(),
                message: format!("Failed to register template: {e}"),
                source: Some(Box::new(e)),
            })
    }
}
