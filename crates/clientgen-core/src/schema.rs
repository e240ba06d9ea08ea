//! Schema data model.
//!
//! The schema is the external input of a generation run: an ordered list of
//! endpoints plus a map of named record types. It is immutable for the whole
//! run. Structural checks live in the codegen crate's validation pass; the
//! types here only describe shape.
//!
//! # Examples
//!
//! ```
//! use clientgen_core::schema::{HttpMethod, Schema};
//!
//! let schema: Schema = serde_json::from_str(r#"{
//!     "endpoints": [
//!         { "path": "/users/{id}", "method": "get",
//!           "parameters": [{ "name": "id", "type": "string", "required": true }],
//!           "response": { "type": "User" } }
//!     ],
//!     "types": { "User": { "id": "string", "name": "string" } }
//! }"#).unwrap();
//!
//! let endpoint = &schema.endpoints[0];
//! assert_eq!(endpoint.http_method(), Some(HttpMethod::Get));
//! assert_eq!(endpoint.path_segments().collect::<Vec<_>>(), vec!["users", "{id}"]);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-expression strings that need no declaration in `types`.
pub const BUILTIN_TYPES: &[&str] = &[
    "string", "number", "integer", "int", "float", "double", "boolean", "bool", "date",
    "datetime", "object", "any", "unknown", "void", "null", "undefined", "never",
];

/// Field name to type-expression map of one declared type, in declaration order.
pub type TypeFields = IndexMap<String, String>;

/// Complete endpoint/type description driving one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Endpoints in declaration order
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    /// Declared record types in declaration order
    #[serde(default)]
    pub types: IndexMap<String, TypeFields>,
}

impl Schema {
    /// Parses a schema from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the text is not a schema document.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns `true` if `name` is a declared type or a builtin primitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_core::schema::Schema;
    ///
    /// let mut schema = Schema::default();
    /// schema.types.insert("User".to_string(), Default::default());
    ///
    /// assert!(schema.knows_type("User"));
    /// assert!(schema.knows_type("string"));
    /// assert!(!schema.knows_type("Ghost"));
    /// ```
    #[must_use]
    pub fn knows_type(&self, name: &str) -> bool {
        self.types.contains_key(name) || is_builtin_type(name)
    }
}

/// One HTTP endpoint of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Path template, e.g. `/users/{id}`
    pub path: String,
    /// HTTP verb as written in the schema (normalized by [`Endpoint::http_method`])
    pub method: String,
    /// Human description used for doc comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared parameters in order
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Response description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseSpec>,
}

impl Endpoint {
    /// Creates an endpoint without parameters or response.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            description: None,
            parameters: Vec::new(),
            response: None,
        }
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the response type, builder style.
    #[must_use]
    pub fn with_response(mut self, type_expr: impl Into<String>) -> Self {
        self.response = Some(ResponseSpec {
            type_expr: type_expr.into(),
            description: None,
        });
        self
    }

    /// Sets the description, builder style.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parses the method case-insensitively.
    ///
    /// Returns `None` for verbs outside GET/POST/PUT/PATCH/DELETE/HEAD/OPTIONS.
    #[must_use]
    pub fn http_method(&self) -> Option<HttpMethod> {
        self.method.parse().ok()
    }

    /// Iterates over the non-empty `/`-separated segments of the path.
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    /// Names of the `{placeholder}` segments in the path, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientgen_core::schema::Endpoint;
    ///
    /// let endpoint = Endpoint::new("GET", "/users/{userId}/posts/{postId}");
    /// assert_eq!(endpoint.path_placeholders(), vec!["userId", "postId"]);
    /// ```
    #[must_use]
    pub fn path_placeholders(&self) -> Vec<&str> {
        self.path_segments()
            .filter_map(|segment| {
                segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
            })
            .collect()
    }

    /// Response type expression, `unknown` when the schema declares none.
    #[must_use]
    pub fn response_type(&self) -> &str {
        self.response
            .as_ref()
            .map_or("unknown", |response| response.type_expr.as_str())
    }
}

/// One endpoint parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, used as identifier in generated code
    pub name: String,
    /// Type expression
    #[serde(rename = "type")]
    pub type_expr: String,
    /// Whether callers must supply the parameter
    #[serde(default)]
    pub required: bool,
    /// Human description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    /// Creates a required parameter.
    #[must_use]
    pub fn required(name: impl Into<String>, type_expr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_expr: type_expr.into(),
            required: true,
            description: None,
        }
    }

    /// Creates an optional parameter.
    #[must_use]
    pub fn optional(name: impl Into<String>, type_expr: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, type_expr)
        }
    }
}

/// Response description of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// Type expression of the payload
    #[serde(rename = "type")]
    pub type_expr: String,
    /// Human description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Supported HTTP verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// Upper-case wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether non-path parameters travel in the query string rather than a body.
    #[must_use]
    pub const fn uses_query(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Delete | Self::Options)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(crate::Error::InvalidArgument(format!(
                "unsupported HTTP method: '{s}'"
            ))),
        }
    }
}

/// Returns `true` for type expressions that need no declaration.
#[must_use]
pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Strips any number of trailing `[]` array suffixes.
///
/// # Examples
///
/// ```
/// use clientgen_core::schema::strip_array_suffix;
///
/// assert_eq!(strip_array_suffix("User[]"), "User");
/// assert_eq!(strip_array_suffix("string[][]"), "string");
/// assert_eq!(strip_array_suffix("User"), "User");
/// ```
#[must_use]
pub fn strip_array_suffix(type_expr: &str) -> &str {
    let mut base = type_expr.trim();
    while let Some(stripped) = base.strip_suffix("[]") {
        base = stripped.trim_end();
    }
    base
}
