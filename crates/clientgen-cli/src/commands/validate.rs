//! Validate command implementation.
//!
//! Obtains the schema exactly as `generate` would and runs the validation
//! pass, without generating or writing anything. Exits with
//! [`ExitCode::VALIDATION_FAILED`] when the schema has violations.

use super::common::{resolve_config, schema_source};
use crate::cli::SourceArgs;
use crate::formatters::format_output;
use crate::orchestrator::{Orchestrator, require_credential};
use anyhow::Result;
use clientgen_codegen::typescript::TypeMapper;
use clientgen_codegen::{ApiModel, validate, validate_config};
use clientgen_core::cli::{ExitCode, OutputFormat};
use clientgen_core::traits::SchemaOrigin;
use clientgen_core::workspace::{FsWorkspace, Workspace};
use clientgen_core::{Error, ResourceName};
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of a validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// No violations were found
    pub valid: bool,
    /// Environment the configuration was resolved for
    pub environment: String,
    /// Where the schema came from
    pub schema_origin: SchemaOrigin,
    /// Number of endpoints
    pub endpoints: usize,
    /// Number of declared types
    pub types: usize,
    /// Resources that would be generated, empty when invalid
    pub resources: Vec<ResourceName>,
    /// Every violation found
    pub violations: Vec<String>,
    /// Non-fatal advisories
    pub warnings: Vec<String>,
}

/// Validates the schema selected by `source` in `workspace`.
///
/// A remote fetch needs a credential; a local `--schema` file does not.
///
/// # Errors
///
/// Returns configuration and schema-availability errors. Validation
/// violations are reported in the result, not as an error.
pub async fn check(workspace: &dyn Workspace, source: &SourceArgs) -> Result<ValidationReport> {
    let config = resolve_config(source, workspace)?;
    if source.schema.is_none() {
        require_credential(&config)?;
    }
    validate_config(&config)?;

    let orchestrator = Orchestrator::new(schema_source(source).await?)?;
    let fetch = orchestrator.fetch_schema(&config).await?;
    let schema = &fetch.schema;

    let (violations, resources, model_warnings) = match validate(schema, &config) {
        Ok(()) => {
            let types = TypeMapper::new(
                schema.types.keys().map(String::as_str),
                config.naming.type_prefix.clone(),
                config.naming.type_suffix.clone(),
            );
            let model = ApiModel::build(schema, &config, &types);
            let resources = model
                .resources
                .iter()
                .map(|r| ResourceName::new(r.name.as_str()))
                .collect();
            (Vec::new(), resources, model.warnings)
        }
        Err(Error::SchemaValidation { violations }) => (violations, Vec::new(), Vec::new()),
        Err(other) => return Err(other.into()),
    };
    let mut warnings = fetch.warnings.clone();
    warnings.extend(model_warnings);

    if violations.is_empty() {
        info!(endpoints = schema.endpoints.len(), "Schema is valid");
    } else {
        warn!(count = violations.len(), "Schema has violations");
    }

    Ok(ValidationReport {
        valid: violations.is_empty(),
        environment: config.environment,
        schema_origin: fetch.origin,
        endpoints: schema.endpoints.len(),
        types: schema.types.len(),
        resources,
        violations,
        warnings,
    })
}

/// Runs the validate command.
///
/// # Errors
///
/// Returns an error if the configuration is unusable or the schema cannot
/// be obtained.
pub async fn run(source: SourceArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let workspace = FsWorkspace::current()?;
    let report = check(&workspace, &source).await?;

    println!("{}", format_output(&report, output_format)?);

    if report.valid {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::VALIDATION_FAILED)
    }
}
