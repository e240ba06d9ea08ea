//! TypeScript type-expression utilities.
//!
//! Schema type expressions are small TypeScript-like strings (`User[]`,
//! `string | null`, `Record<string, Order>`). They are rewritten token by
//! token: declared type names get the configured prefix and suffix, and
//! primitive aliases become their TypeScript equivalents.
//!
//! # Examples
//!
//! ```
//! use clientgen_codegen::typescript::TypeMapper;
//!
//! let declared = ["User".to_string()];
//! let mapper = TypeMapper::new(declared.iter().map(String::as_str), "I", "");
//!
//! assert_eq!(mapper.map("User[]"), "IUser[]");
//! assert_eq!(mapper.map("integer | null"), "number | null");
//! ```

use clientgen_core::schema::is_builtin_type;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Quoted literal, or an identifier optionally followed by `?:` / `:`.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'[^']*'|"[^"]*"|([A-Za-z_$][A-Za-z0-9_$]*)(\s*\??\s*:)?"#)
        .expect("valid regex")
});

/// Generic and global type names usable without a declaration.
pub const GLOBAL_TYPES: &[&str] = &[
    "Record", "Array", "Partial", "Readonly", "Promise", "Map", "Set", "Date",
];

const TYPE_KEYWORDS: &[&str] = &["true", "false", "keyof", "typeof", "readonly"];

/// TypeScript spelling of a builtin schema primitive.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::typescript::primitive_to_ts;
///
/// assert_eq!(primitive_to_ts("integer"), Some("number"));
/// assert_eq!(primitive_to_ts("datetime"), Some("string"));
/// assert_eq!(primitive_to_ts("User"), None);
/// ```
#[must_use]
pub fn primitive_to_ts(name: &str) -> Option<&'static str> {
    let mapped = match name {
        "string" | "date" | "datetime" => "string",
        "number" | "integer" | "int" | "float" | "double" => "number",
        "boolean" | "bool" => "boolean",
        "object" => "Record<string, unknown>",
        "any" => "any",
        "unknown" => "unknown",
        "void" => "void",
        "null" => "null",
        "undefined" => "undefined",
        "never" => "never",
        _ => return None,
    };
    Some(mapped)
}

/// Identifiers in a type expression that are neither builtins nor globals.
///
/// Object-literal keys and quoted literals are skipped. Order follows first
/// appearance; duplicates are removed.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::typescript::referenced_types;
///
/// assert_eq!(referenced_types("Record<string, Order[]> | User"), vec!["Order", "User"]);
/// assert_eq!(referenced_types("{ id: string; owner?: User }"), vec!["User"]);
/// assert!(referenced_types("'active' | 'inactive'").is_empty());
/// ```
#[must_use]
pub fn referenced_types(type_expr: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    TOKEN_RE
        .captures_iter(type_expr)
        .filter_map(|caps| {
            let ident = caps.get(1)?;
            if caps.get(2).is_some() {
                return None;
            }
            let name = ident.as_str();
            let is_known = is_builtin_type(name)
                || GLOBAL_TYPES.contains(&name)
                || TYPE_KEYWORDS.contains(&name);
            (!is_known && seen.insert(name)).then_some(name)
        })
        .collect()
}

/// Rewrites schema type expressions into emitted TypeScript.
#[derive(Debug, Clone)]
pub struct TypeMapper {
    declared: HashSet<String>,
    prefix: String,
    suffix: String,
}

impl TypeMapper {
    /// Creates a mapper for the given declared type names.
    #[must_use]
    pub fn new<'a>(
        declared: impl IntoIterator<Item = &'a str>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            declared: declared.into_iter().map(str::to_string).collect(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Emitted identifier of a declared type.
    #[must_use]
    pub fn type_name(&self, name: &str) -> String {
        format!("{}{name}{}", self.prefix, self.suffix)
    }

    /// Returns `true` if `name` is declared in the schema.
    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    /// Rewrites a whole type expression.
    #[must_use]
    pub fn map(&self, type_expr: &str) -> String {
        TOKEN_RE
            .replace_all(type_expr.trim(), |caps: &Captures<'_>| {
                let Some(ident) = caps.get(1) else {
                    return caps[0].to_string();
                };
                if caps.get(2).is_some() {
                    return caps[0].to_string();
                }
                let name = ident.as_str();
                if self.declared.contains(name) {
                    self.type_name(name)
                } else if let Some(ts) = primitive_to_ts(name) {
                    ts.to_string()
                } else {
                    name.to_string()
                }
            })
            .into_owned()
    }

    /// Declared types referenced by an expression, in first-appearance order.
    #[must_use]
    pub fn declared_references<'e>(&self, type_expr: &'e str) -> Vec<&'e str> {
        referenced_types(type_expr)
            .into_iter()
            .filter(|name| self.declared.contains(*name))
            .collect()
    }
}

/// Double-quoted TypeScript string literal.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::typescript::ts_string;
///
/// assert_eq!(ts_string("/users/{id}"), r#""/users/{id}""#);
/// assert_eq!(ts_string("say \"hi\""), r#""say \"hi\"""#);
/// ```
#[must_use]
pub fn ts_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Property key, quoted when it is not a plain identifier.
///
/// A trailing `?` marks the property optional and is kept outside the quotes.
///
/// # Examples
///
/// ```
/// use clientgen_codegen::typescript::property_key;
///
/// assert_eq!(property_key("createdAt"), "createdAt");
/// assert_eq!(property_key("nickname?"), "nickname?");
/// assert_eq!(property_key("content-type"), r#""content-type""#);
/// ```
#[must_use]
pub fn property_key(name: &str) -> String {
    let (base, optional) = name
        .strip_suffix('?')
        .map_or((name, ""), |base| (base, "?"));
    let plain = base
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && base
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if plain {
        format!("{base}{optional}")
    } else {
        format!("{}{optional}", ts_string(base))
    }
}

/// Single-line text safe to place inside a `/** */` comment.
#[must_use]
pub fn doc_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "*\\/")
}
