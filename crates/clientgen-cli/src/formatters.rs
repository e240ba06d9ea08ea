//! Output formatters for command reports.
//!
//! Every command prints one serializable report. JSON is for machines,
//! text is line-oriented `key: value` output for scripts, and pretty is an
//! indented, colored outline for terminals.

use anyhow::Result;
use clientgen_core::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if the data cannot be serialized.
///
/// # Examples
///
/// ```
/// use clientgen_cli::formatters::format_output;
/// use clientgen_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     files: usize,
///     output_dir: String,
/// }
///
/// let summary = Summary { files: 12, output_dir: "src/api-client".to_string() };
///
/// let json = format_output(&summary, OutputFormat::Json)?;
/// assert!(json.contains("\"files\": 12"));
///
/// let text = format_output(&summary, OutputFormat::Text)?;
/// assert_eq!(text, "files: 12\noutput_dir: src/api-client");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, Value, scalar};

    /// Format data as `key: value` lines, keys in sorted order.
    ///
    /// Nested keys are joined with `.`, array items repeat their key, and
    /// empty arrays are omitted.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut lines = Vec::new();
        flatten("", &value, &mut lines);
        Ok(lines.join("\n"))
    }

    fn flatten(key: &str, value: &Value, lines: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (name, child) in map {
                    let path = if key.is_empty() {
                        name.clone()
                    } else {
                        format!("{key}.{name}")
                    };
                    flatten(&path, child, lines);
                }
            }
            Value::Array(items) => {
                for item in items {
                    flatten(key, item, lines);
                }
            }
            other => lines.push(format!("{key}: {}", scalar(other))),
        }
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize, Value, scalar};

    /// Format data as a colored outline.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let mut out = Vec::new();
        format_value(&value, 0, &mut out);
        Ok(out.join("\n"))
    }

    fn format_value(value: &Value, indent: usize, out: &mut Vec<String>) {
        let pad = "  ".repeat(indent);
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let label = key.replace('_', " ");
                    match child {
                        Value::Object(inner) if !inner.is_empty() => {
                            out.push(format!("{pad}{}", label.blue().bold()));
                            format_value(child, indent + 1, out);
                        }
                        Value::Array(items) if !items.is_empty() => {
                            out.push(format!(
                                "{pad}{} {}",
                                label.blue().bold(),
                                format!("({})", items.len()).dimmed()
                            ));
                            format_value(child, indent + 1, out);
                        }
                        _ => out.push(format!("{pad}{}: {}", label.blue().bold(), colored(child))),
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if item.is_object() {
                        let mut nested = Vec::new();
                        format_value(item, 0, &mut nested);
                        out.push(format!("{pad}- {}", nested.join(", ")));
                    } else {
                        out.push(format!("{pad}- {}", colored(item)));
                    }
                }
            }
            other => out.push(format!("{pad}{}", colored(other))),
        }
    }

    fn colored(value: &Value) -> String {
        let text = scalar(value);
        match value {
            Value::Null => text.dimmed().to_string(),
            Value::Bool(true) => text.green().to_string(),
            Value::Bool(false) => text.yellow().to_string(),
            Value::Number(_) => text.cyan().to_string(),
            Value::Array(_) | Value::Object(_) => text.dimmed().to_string(),
            Value::String(_) => text,
        }
    }
}

/// Renders a scalar without JSON quoting.
fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.is_empty() => "none".to_string(),
        Value::Object(map) if map.is_empty() => "none".to_string(),
        other => other.to_string(),
    }
}
