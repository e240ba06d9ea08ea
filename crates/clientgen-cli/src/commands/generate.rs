//! Generate command implementation.
//!
//! Resolves the configuration for the selected environment, picks the
//! schema source, and hands both to the [`Orchestrator`]. The run report is
//! printed on success.

use super::common::{RunOverrides, resolve_config, schema_source};
use crate::cli::SourceArgs;
use crate::formatters::format_output;
use crate::orchestrator::{Orchestrator, RunReport};
use anyhow::{Context, Result};
use clientgen_core::cli::{ExitCode, OutputFormat};
use clientgen_core::workspace::{FsWorkspace, Workspace};
use tracing::info;

/// Runs one generation in `workspace`.
///
/// # Errors
///
/// Returns the orchestrator's error unchanged (wrapped in `anyhow`), so
/// callers can still classify it.
pub async fn execute(
    workspace: &dyn Workspace,
    source: &SourceArgs,
    overrides: &RunOverrides,
) -> Result<RunReport> {
    let mut config = resolve_config(source, workspace)?;
    overrides.apply(&mut config, workspace.root());

    info!(
        environment = %config.environment,
        output = %config.output_dir.display(),
        "Generating API client"
    );

    let orchestrator = Orchestrator::new(schema_source(source).await?)?;
    let report = orchestrator.run(&config).await?;
    Ok(report)
}

/// Runs the generate command.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is missing a credential or is malformed
/// - The schema cannot be obtained or fails validation
/// - The output directory is not empty and overwrite is off
/// - Writing the output fails (nothing is left behind)
pub async fn run(
    source: SourceArgs,
    overrides: RunOverrides,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let workspace = FsWorkspace::current()?;
    let report = execute(&workspace, &source, &overrides)
        .await
        .context("generation aborted")?;

    println!("{}", format_output(&report, output_format)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientgen_core::config::DEFAULT_CONFIG_FILE;
    use tempfile::TempDir;

    const SCHEMA: &str = r#"{
        "endpoints": [
            { "path": "/orders", "method": "GET", "response": { "type": "Order[]" } }
        ],
        "types": { "Order": { "id": "string", "total": "number" } }
    }"#;

    fn project(config: &str) -> (TempDir, SourceArgs) {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(DEFAULT_CONFIG_FILE), config).unwrap();
        let schema = temp.path().join("schema.json");
        std::fs::write(&schema, SCHEMA).unwrap();
        let source = SourceArgs {
            schema: Some(schema),
            ..SourceArgs::default()
        };
        (temp, source)
    }

    #[tokio::test]
    async fn test_execute_from_schema_file() {
        let (temp, source) = project(r#"{ "apiKey": "k", "outputDir": "gen" }"#);
        let workspace = FsWorkspace::new(temp.path());

        let report = execute(&workspace, &source, &RunOverrides::default())
            .await
            .unwrap();
        assert_eq!(report.output_dir, temp.path().join("gen"));
        assert!(temp.path().join("gen/api/orders.ts").is_file());
        assert!(temp.path().join("gen/types/order.ts").is_file());
    }

    #[tokio::test]
    async fn test_output_flag_overrides_config() {
        let (temp, source) = project(r#"{ "apiKey": "k", "outputDir": "gen" }"#);
        let workspace = FsWorkspace::new(temp.path());
        let overrides = RunOverrides {
            output: Some("elsewhere".into()),
            ..RunOverrides::default()
        };

        execute(&workspace, &source, &overrides).await.unwrap();
        assert!(temp.path().join("elsewhere/index.ts").is_file());
        assert!(!temp.path().join("gen").exists());
    }

    #[tokio::test]
    async fn test_error_stays_classifiable() {
        let (temp, source) = project(r#"{ "outputDir": "gen" }"#);
        let workspace = FsWorkspace::new(temp.path());

        let err = execute(&workspace, &source, &RunOverrides::default())
            .await
            .context("generation aborted")
            .unwrap_err();
        let core = err.downcast_ref::<clientgen_core::Error>().unwrap();
        assert_eq!(ExitCode::for_error(core), ExitCode::CONFIG_ERROR);
        assert!(!temp.path().join("gen").exists());
    }
}
