//! Embedded offline schema.
//!
//! Used only when the remote fetch fails. It describes a single `users`
//! resource and is never merged with remote content.

use clientgen_core::schema::TypeFields;
use clientgen_core::{Endpoint, Parameter, Schema};
use indexmap::IndexMap;

/// The fixed fallback schema: CRUD over `users` plus the `User` type.
///
/// # Examples
///
/// ```
/// use clientgen_introspector::fallback_schema;
///
/// let schema = fallback_schema();
/// assert!(schema.endpoints.iter().all(|e| e.path.starts_with("/users")));
/// assert!(schema.knows_type("User"));
/// ```
#[must_use]
pub fn fallback_schema() -> Schema {
    let endpoints = vec![
        Endpoint::new("GET", "/users")
            .with_description("List users")
            .with_response("User[]"),
        Endpoint::new("GET", "/users/{id}")
            .with_description("Get a user by id")
            .with_parameter(Parameter::required("id", "string"))
            .with_response("User"),
        Endpoint::new("POST", "/users")
            .with_description("Create a user")
            .with_parameter(Parameter::required("name", "string"))
            .with_parameter(Parameter::required("email", "string"))
            .with_response("User"),
        Endpoint::new("PUT", "/users/{id}")
            .with_description("Update a user")
            .with_parameter(Parameter::required("id", "string"))
            .with_parameter(Parameter::optional("name", "string"))
            .with_parameter(Parameter::optional("email", "string"))
            .with_response("User"),
        Endpoint::new("DELETE", "/users/{id}")
            .with_description("Delete a user")
            .with_parameter(Parameter::required("id", "string"))
            .with_response("void"),
    ];

    let user: TypeFields = [
        ("id", "string"),
        ("name", "string"),
        ("email", "string"),
        ("createdAt", "datetime"),
    ]
    .into_iter()
    .map(|(name, type_expr)| (name.to_string(), type_expr.to_string()))
    .collect();

    let mut types = IndexMap::new();
    types.insert("User".to_string(), user);

    Schema { endpoints, types }
}
