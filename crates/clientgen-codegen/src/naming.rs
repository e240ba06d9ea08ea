//! Naming utilities shared by every generator.
//!
//! All functions are pure and deterministic.
//!
//! # Examples
//!
//! ```
//! use clientgen_codegen::naming::{derive_method_name, to_kebab_case};
//! use clientgen_core::{Endpoint, Parameter};
//!
//! let endpoint = Endpoint::new("GET", "/users/{id}")
//!     .with_parameter(Parameter::required("id", "string"));
//!
//! assert_eq!(derive_method_name(&endpoint), "getUsersById");
//! assert_eq!(to_kebab_case("getUsersById"), "get-users-by-id");
//! ```

use clientgen_core::{Endpoint, HttpMethod, Parameter};

/// Name used when sanitizing leaves nothing.
pub const PLACEHOLDER_NAME: &str = "unnamed";

/// Resource name of endpoints without a static path segment.
pub const ROOT_RESOURCE: &str = "root";

const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield", "let", "static", "implements", "interface",
    "package", "private", "protected", "public", "await",
];

/// Semantic prefix for an HTTP verb.
#[must_use]
pub const fn method_prefix(method: Option<HttpMethod>) -> &'static str {
    match method {
        Some(HttpMethod::Get) => "get",
        Some(HttpMethod::Post) => "create",
        Some(HttpMethod::Put | HttpMethod::Patch) => "update",
        Some(HttpMethod::Delete) => "delete",
        _ => "operation",
    }
}

/// Static (non-`{placeholder}`) path segments in order.
pub fn static_segments(endpoint: &Endpoint) -> impl Iterator<Item = &str> {
    endpoint
        .path_segments()
        .filter(|segment| !(segment.starts_with('{') && segment.ends_with('}')))
}

/// Resource an endpoint belongs to: its first static path segment.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::naming::resource_of;
/// use clientgen_core::Endpoint;
///
/// assert_eq!(resource_of(&Endpoint::new("GET", "/users/{id}")), "users");
/// assert_eq!(resource_of(&Endpoint::new("GET", "/{tenant}/orders")), "orders");
/// assert_eq!(resource_of(&Endpoint::new("GET", "/")), "root");
/// ```
#[must_use]
pub fn resource_of(endpoint: &Endpoint) -> &str {
    static_segments(endpoint).next().unwrap_or(ROOT_RESOURCE)
}

/// Derives the function name of an endpoint from its verb and path.
///
/// The verb prefix is followed by the first static path segment (the
/// resource noun) in PascalCase, then `ById` when any parameter name
/// contains `id` (case-insensitive). Paths without static segments use
/// `Root`. Nested paths can therefore derive the same name as their
/// parent; validation reports those collisions.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::naming::derive_method_name;
/// use clientgen_core::{Endpoint, Parameter};
///
/// assert_eq!(derive_method_name(&Endpoint::new("GET", "/users")), "getUsers");
/// assert_eq!(derive_method_name(&Endpoint::new("post", "/user-profiles")), "createUserProfiles");
///
/// let nested = Endpoint::new("PATCH", "/users/{userId}/posts")
///     .with_parameter(Parameter::required("userId", "string"));
/// assert_eq!(derive_method_name(&nested), "updateUsersById");
/// ```
#[must_use]
pub fn derive_method_name(endpoint: &Endpoint) -> String {
    let mut name = method_prefix(endpoint.http_method()).to_string();

    match static_segments(endpoint).next() {
        Some(noun) => name.push_str(&to_pascal_case(noun)),
        None => name.push_str("Root"),
    }

    if endpoint
        .parameters
        .iter()
        .any(|p| p.name.to_ascii_lowercase().contains("id"))
    {
        name.push_str("ById");
    }

    name
}

/// Applies `naming.functionPrefix` to a derived name.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::naming::prefixed_function_name;
///
/// assert_eq!(prefixed_function_name("", "getUsers"), "getUsers");
/// assert_eq!(prefixed_function_name("api", "getUsers"), "apiGetUsers");
/// ```
#[must_use]
pub fn prefixed_function_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{}", capitalize(name))
    }
}

/// Object type of a parameter bag: `{ a: T; b?: U }`.
///
/// `map_type` converts each schema type expression to its emitted form.
/// An empty list renders as an empty string.
#[must_use]
pub fn render_parameter_type(parameters: &[Parameter], map_type: impl Fn(&str) -> String) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    let fields: Vec<String> = parameters
        .iter()
        .map(|p| {
            let optional = if p.required { "" } else { "?" };
            format!("{}{optional}: {}", p.name, map_type(&p.type_expr))
        })
        .collect();
    format!("{{ {} }}", fields.join("; "))
}

/// Destructured parameter declaration: `{ a, b }: { a: T; b?: U }`.
///
/// An empty list renders as an empty string (the function takes no
/// arguments).
///
/// # Examples
///
/// ```
/// use clientgen_codegen::naming::render_parameter_signature;
/// use clientgen_core::Parameter;
///
/// let params = vec![
///     Parameter::required("id", "string"),
///     Parameter::optional("expand", "boolean"),
/// ];
/// assert_eq!(
///     render_parameter_signature(&params, str::to_string),
///     "{ id, expand }: { id: string; expand?: boolean }"
/// );
/// assert_eq!(render_parameter_signature(&[], str::to_string), "");
/// ```
#[must_use]
pub fn render_parameter_signature(
    parameters: &[Parameter],
    map_type: impl Fn(&str) -> String,
) -> String {
    if parameters.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
    format!(
        "{{ {} }}: {}",
        names.join(", "),
        render_parameter_type(parameters, map_type)
    )
}

/// Lower-cases, replaces disallowed characters with `-`, collapses
/// repeats, and trims. Empty results become [`PLACEHOLDER_NAME`].
///
/// # Examples
///
/// ```
/// use clientgen_codegen::naming::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("User Profiles!"), "user-profiles");
/// assert_eq!(sanitize_file_name("--a__b--"), "a-b");
/// assert_eq!(sanitize_file_name("$$$"), "unnamed");
/// ```
#[must_use]
pub fn sanitize_file_name(input: &str) -> String {
    collapse(&input.to_lowercase(), '-', |c| {
        c.is_ascii_lowercase() || c.is_ascii_digit()
    })
}

/// Turns arbitrary text into a valid identifier.
///
/// Disallowed characters become `_`, a leading digit gets a `_` prefix and
/// reserved words get a `_` suffix.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::naming::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("user-profiles"), "user_profiles");
/// assert_eq!(sanitize_identifier("2fa"), "_2fa");
/// assert_eq!(sanitize_identifier("delete"), "delete_");
/// assert_eq!(sanitize_identifier("!!"), "unnamed");
/// ```
#[must_use]
pub fn sanitize_identifier(input: &str) -> String {
    let mut ident = collapse(input, '_', |c| c.is_ascii_alphanumeric() || c == '$');
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED_WORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Returns `true` if `name` is usable as-is as a TypeScript identifier.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&name)
}

fn collapse(input: &str, separator: char, allowed: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if allowed(c) {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with(separator) {
            out.push(separator);
        }
    }
    let trimmed = out.trim_matches(separator);
    if trimmed.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

fn words(input: &str) -> Vec<String> {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| {
            if w.chars().all(|c| !c.is_ascii_lowercase()) {
                w.to_ascii_lowercase()
            } else {
                w.to_string()
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

fn decapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Converts `snake_case`, `kebab-case`, or spaced text to camelCase.
///
/// Existing humps are kept; all-caps words are lowered first.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::naming::to_camel_case;
///
/// assert_eq!(to_camel_case("send_message"), "sendMessage");
/// assert_eq!(to_camel_case("user-profiles"), "userProfiles");
/// assert_eq!(to_camel_case("getUsers"), "getUsers");
/// assert_eq!(to_camel_case("API keys"), "apiKeys");
/// ```
#[must_use]
pub fn to_camel_case(input: &str) -> String {
    let mut out = String::new();
    for (i, word) in words(input).iter().enumerate() {
        if i == 0 {
            out.push_str(&decapitalize(word));
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Converts to PascalCase.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("send_message"), "SendMessage");
/// assert_eq!(to_pascal_case("users"), "Users");
/// assert_eq!(to_pascal_case("getUsersById"), "GetUsersById");
/// ```
#[must_use]
pub fn to_pascal_case(input: &str) -> String {
    capitalize(&to_camel_case(input))
}

/// Converts camelCase or PascalCase to a sanitized kebab-case file stem.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::naming::to_kebab_case;
///
/// assert_eq!(to_kebab_case("UserProfile"), "user-profile");
/// assert_eq!(to_kebab_case("user_profile"), "user-profile");
/// assert_eq!(to_kebab_case("OAuth2Token"), "oauth2-token");
/// ```
#[must_use]
pub fn to_kebab_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut prev_lower = false;
    for c in input.chars() {
        if c.is_ascii_uppercase() && prev_lower {
            out.push('-');
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        out.push(c);
    }
    sanitize_file_name(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(method: &str, path: &str, params: &[&str]) -> Endpoint {
        params.iter().fold(Endpoint::new(method, path), |e, name| {
            e.with_parameter(Parameter::required(*name, "string"))
        })
    }

    #[test]
    fn test_method_prefixes() {
        assert_eq!(derive_method_name(&endpoint("GET", "/users", &[])), "getUsers");
        assert_eq!(derive_method_name(&endpoint("POST", "/users", &[])), "createUsers");
        assert_eq!(derive_method_name(&endpoint("PUT", "/users", &[])), "updateUsers");
        assert_eq!(derive_method_name(&endpoint("PATCH", "/users", &[])), "updateUsers");
        assert_eq!(derive_method_name(&endpoint("DELETE", "/users", &[])), "deleteUsers");
        assert_eq!(derive_method_name(&endpoint("HEAD", "/users", &[])), "operationUsers");
        assert_eq!(derive_method_name(&endpoint("OPTIONS", "/users", &[])), "operationUsers");
    }

    #[test]
    fn test_by_id_suffix_is_case_insensitive() {
        assert_eq!(
            derive_method_name(&endpoint("GET", "/users/{id}", &["id"])),
            "getUsersById"
        );
        assert_eq!(
            derive_method_name(&endpoint("GET", "/users/{userID}", &["userID"])),
            "getUsersById"
        );
        assert_eq!(
            derive_method_name(&endpoint("GET", "/users", &["page"])),
            "getUsers"
        );
    }

    #[test]
    fn test_root_path() {
        assert_eq!(derive_method_name(&endpoint("GET", "/", &[])), "getRoot");
        assert_eq!(derive_method_name(&endpoint("GET", "/{id}", &["id"])), "getRootById");
    }

    #[test]
    fn test_method_name_is_deterministic() {
        let e = endpoint("GET", "/orders/{orderId}/items", &["orderId"]);
        assert_eq!(derive_method_name(&e), derive_method_name(&e));
        assert_eq!(derive_method_name(&e), "getOrdersById");
    }

    #[test]
    fn test_only_first_static_segment_is_used() {
        assert_eq!(
            derive_method_name(&endpoint("GET", "/users/{id}/posts", &["id"])),
            "getUsersById"
        );
        assert_eq!(derive_method_name(&endpoint("GET", "/orders/search", &[])), "getOrders");
        assert_eq!(
            derive_method_name(&endpoint("POST", "/{tenant}/invoices/drafts", &["tenant"])),
            "createInvoices"
        );
    }

    #[test]
    fn test_resource_of() {
        assert_eq!(resource_of(&endpoint("GET", "/users/{id}/posts", &["id"])), "users");
        assert_eq!(resource_of(&endpoint("GET", "/{v}", &["v"])), ROOT_RESOURCE);
    }

    #[test]
    fn test_parameter_signature_preserves_order() {
        let params = vec![
            Parameter::optional("limit", "number"),
            Parameter::required("id", "string"),
        ];
        assert_eq!(
            render_parameter_signature(&params, str::to_string),
            "{ limit, id }: { limit?: number; id: string }"
        );
    }

    #[test]
    fn test_parameter_signature_maps_types() {
        let params = vec![Parameter::required("count", "integer")];
        let rendered = render_parameter_signature(&params, |t| {
            if t == "integer" { "number".to_string() } else { t.to_string() }
        });
        assert_eq!(rendered, "{ count }: { count: number }");
    }

    #[test]
    fn test_sanitize_file_name_edges() {
        assert_eq!(sanitize_file_name("Users"), "users");
        assert_eq!(sanitize_file_name("a///b"), "a-b");
        assert_eq!(sanitize_file_name(""), PLACEHOLDER_NAME);
        assert_eq!(sanitize_file_name("v2.users"), "v2-users");
    }

    #[test]
    fn test_sanitize_identifier_edges() {
        assert_eq!(sanitize_identifier("users"), "users");
        assert_eq!(sanitize_identifier("$store"), "$store");
        assert_eq!(sanitize_identifier("class"), "class_");
        assert_eq!(sanitize_identifier(""), PLACEHOLDER_NAME);
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("userId"));
        assert!(is_valid_identifier("_private"));
        assert!(!is_valid_identifier("user-id"));
        assert!(!is_valid_identifier("1st"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("default"));
    }

    #[test]
    fn test_prefixed_function_name() {
        assert_eq!(prefixed_function_name("fetch", "getUsersById"), "fetchGetUsersById");
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_pascal_case("user_profiles"), "UserProfiles");
        assert_eq!(to_kebab_case("getUsersById"), "get-users-by-id");
        assert_eq!(to_kebab_case("HTTPServer"), "httpserver");
    }
}
