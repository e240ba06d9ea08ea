//! End-to-end generation run.
//!
//! [`Orchestrator::run`] takes a resolved configuration through every stage:
//! credential check, schema fetch, validation, the output-directory check,
//! the artifact generators in dependency order, the import-closure
//! self-check, and the optional post-write type check.
//!
//! Writes happen through an [`OutputGuard`]. Any failure between the first
//! write and the commit drops the guard, which removes everything the run
//! wrote (the whole output root when the run created it).

use crate::config_loader::placeholder_name;
use clientgen_codegen::{
    ArtifactGenerator, GeneratedFile, GenerationContext, TemplateEngine, check_closure,
    default_generators, validate, validate_config,
};
use clientgen_core::traits::{FetchRequest, SchemaFetch, SchemaOrigin, SchemaSource};
use clientgen_core::{Error, ResolvedConfig, ResourceName, Result};
use clientgen_files::{ExportOptions, FilesBuilder, OutputGuard, existing_files};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Summary of one artifact group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    /// Group name
    pub group: String,
    /// Number of files the group produced
    pub files: usize,
}

/// Everything a finished run reports back.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Output root
    pub output_dir: PathBuf,
    /// Environment the configuration was resolved for
    pub environment: String,
    /// Where the schema came from
    pub schema_origin: SchemaOrigin,
    /// No files were written
    pub dry_run: bool,
    /// Resources that received generated modules
    pub resources: Vec<ResourceName>,
    /// File counts per group, in generation order
    pub groups: Vec<GroupSummary>,
    /// Every emitted path relative to the output root
    pub files: Vec<String>,
    /// Files that existed before and were replaced
    pub replaced: usize,
    /// Non-fatal advisories
    pub warnings: Vec<String>,
}

impl RunReport {
    /// Total number of emitted files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Runs the generation pipeline against one schema source.
#[derive(Debug)]
pub struct Orchestrator {
    source: Box<dyn SchemaSource>,
    generators: Vec<Box<dyn ArtifactGenerator>>,
    engine: TemplateEngine,
}

impl Orchestrator {
    /// Creates an orchestrator with the built-in generators.
    ///
    /// # Errors
    ///
    /// Returns an error if the template engine cannot be built.
    pub fn new(source: Box<dyn SchemaSource>) -> Result<Self> {
        Ok(Self {
            source,
            generators: default_generators(),
            engine: TemplateEngine::new()?,
        })
    }

    /// Replaces the generator list. Order is the write order.
    #[must_use]
    pub fn with_generators(mut self, generators: Vec<Box<dyn ArtifactGenerator>>) -> Self {
        self.generators = generators;
        self
    }

    /// Obtains the schema for a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaUnavailable`] if the source has nothing.
    pub async fn fetch_schema(&self, config: &ResolvedConfig) -> Result<SchemaFetch> {
        let request = FetchRequest::from_config(config);
        debug!(?request, "Fetching schema");
        let fetch = self.source.fetch(&request).await?;
        info!(
            origin = %fetch.origin,
            endpoints = fetch.schema.endpoints.len(),
            types = fetch.schema.types.len(),
            "Schema obtained"
        );
        Ok(fetch)
    }

    /// Generates the client for `config`.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigError`] for a missing credential or unusable names
    /// - [`Error::SchemaUnavailable`] if no schema can be obtained
    /// - [`Error::SchemaValidation`] with every violation found
    /// - [`Error::OutputNotEmpty`] if the root has files and overwrite is off
    /// - [`Error::OutputUnwritable`] if writing fails
    /// - [`Error::GenerationError`] if a generator or the self-check fails
    pub async fn run(&self, config: &ResolvedConfig) -> Result<RunReport> {
        require_credential(config)?;
        validate_config(config)?;

        let SchemaFetch {
            schema,
            origin,
            mut warnings,
        } = self.fetch_schema(config).await?;
        validate(&schema, config)?;

        let root = config.output_dir.as_path();
        let dry_run = config.generation.dry_run;
        check_output_root(root, config.generation.overwrite)?;

        let ctx = GenerationContext::new(&schema, config, &self.engine);
        let mut guard = if dry_run {
            info!(root = %root.display(), "Dry run, nothing will be written");
            None
        } else {
            let options = ExportOptions::default().with_overwrite(config.generation.overwrite);
            Some(OutputGuard::begin(root, options)?)
        };

        let mut groups = Vec::with_capacity(self.generators.len());
        let mut emitted: Vec<GeneratedFile> = Vec::new();
        for generator in &self.generators {
            let code = generator.generate(&ctx)?;
            info!(group = generator.group(), files = code.file_count(), "Generated");

            if let Some(guard) = guard.as_mut() {
                let tree = FilesBuilder::from_generated_code(&code, "/").build()?;
                guard.write(&tree)?;
            }

            for warning in &code.warnings {
                if !warnings.contains(warning) {
                    warnings.push(warning.clone());
                }
            }
            groups.push(GroupSummary {
                group: code.group.clone(),
                files: code.file_count(),
            });
            emitted.extend(code.files);
        }

        check_closure(&emitted)?;

        let replaced = guard.map_or(0, |guard| {
            let report = guard.commit();
            report.replaced_files.len()
        });

        if config.generation.validate_output && !dry_run {
            let entry = root.join(format!("index.{}", config.language.extension()));
            if let Some(advisory) = type_check(&entry).await {
                warn!("{advisory}");
                warnings.push(advisory);
            }
        }

        info!(
            files = emitted.len(),
            root = %root.display(),
            dry_run,
            "Generation complete"
        );

        Ok(RunReport {
            output_dir: root.to_path_buf(),
            environment: config.environment.clone(),
            schema_origin: origin,
            dry_run,
            resources: ctx
                .model
                .resources
                .iter()
                .map(|r| ResourceName::new(r.name.as_str()))
                .collect(),
            groups,
            files: emitted.into_iter().map(|f| f.path).collect(),
            replaced,
            warnings,
        })
    }
}

/// Fails unless the configuration carries a usable credential.
///
/// Blank keys and `${NAME}` placeholders whose variable was never set
/// count as missing.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] on field `apiKey`.
pub fn require_credential(config: &ResolvedConfig) -> Result<()> {
    let key = config.api_key.as_deref().map(str::trim).unwrap_or_default();
    if let Some(name) = placeholder_name(key) {
        return Err(Error::ConfigError {
            field: "apiKey".to_string(),
            message: format!("placeholder '{key}' is unresolved, set the {name} environment variable"),
        });
    }
    if key.is_empty() {
        return Err(Error::ConfigError {
            field: "apiKey".to_string(),
            message: format!(
                "an API key is required (set apiKey or environments.{}.apiKey)",
                config.environment
            ),
        });
    }
    Ok(())
}

/// Fails if `root` already holds files and overwriting is off.
///
/// # Errors
///
/// Returns [`Error::OutputNotEmpty`].
pub fn check_output_root(root: &Path, overwrite: bool) -> Result<()> {
    let existing = existing_files(root);
    if existing.is_empty() {
        return Ok(());
    }
    if overwrite {
        debug!(count = existing.len(), "Output root has files, overwrite enabled");
        return Ok(());
    }
    Err(Error::OutputNotEmpty {
        path: root.to_path_buf(),
    })
}

/// Runs `tsc --noEmit` over the emitted tree. Returns an advisory on any
/// failure, `None` when the check passed.
async fn type_check(entry: &Path) -> Option<String> {
    let Ok(tsc) = which::which("tsc") else {
        return Some("generation.validateOutput is on but tsc was not found in PATH".to_string());
    };

    let output = Command::new(tsc)
        .args([
            "--noEmit",
            "--strict",
            "--skipLibCheck",
            "--target",
            "es2020",
            "--module",
            "esnext",
            "--moduleResolution",
            "bundler",
        ])
        .arg(entry)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            info!("Type check passed");
            None
        }
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let diagnostics: Vec<&str> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
            let shown = diagnostics.iter().take(5).copied().collect::<Vec<_>>().join("\n  ");
            Some(format!(
                "Type check reported {} diagnostic line(s):\n  {shown}",
                diagnostics.len()
            ))
        }
        Err(e) => Some(format!("Type check could not run: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientgen_introspector::{StaticSchema, fallback_schema};
    use tempfile::TempDir;

    fn config(root: &Path) -> ResolvedConfig {
        ResolvedConfig {
            api_key: Some("sk-test".to_string()),
            output_dir: root.to_path_buf(),
            ..ResolvedConfig::default()
        }
    }

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(Box::new(StaticSchema::new(fallback_schema()))).unwrap()
    }

    #[test]
    fn test_require_credential() {
        let mut config = ResolvedConfig::default();
        assert!(require_credential(&config).unwrap_err().is_config_error());

        config.api_key = Some("   ".to_string());
        assert!(require_credential(&config).is_err());

        config.api_key = Some("${ACME_KEY}".to_string());
        let err = require_credential(&config).unwrap_err();
        assert!(err.to_string().contains("ACME_KEY"));

        config.api_key = Some("sk-live".to_string());
        assert!(require_credential(&config).is_ok());
    }

    #[test]
    fn test_check_output_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("out");
        assert!(check_output_root(&root, false).is_ok());

        std::fs::create_dir_all(&root).unwrap();
        assert!(check_output_root(&root, false).is_ok());

        std::fs::write(root.join("keep.ts"), "x").unwrap();
        assert!(check_output_root(&root, false).unwrap_err().is_output_error());
        assert!(check_output_root(&root, true).is_ok());
    }

    #[tokio::test]
    async fn test_run_writes_every_group() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("client");

        let report = orchestrator().run(&config(&root)).await.unwrap();

        assert_eq!(report.schema_origin, SchemaOrigin::Static);
        assert_eq!(report.resources, vec![ResourceName::new("users")]);
        let groups: Vec<_> = report.groups.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(groups, vec!["types", "api", "client", "stores", "root"]);
        for path in &report.files {
            assert!(root.join(path).is_file(), "missing {path}");
        }
        assert!(root.join("api/users.ts").is_file());
        assert_eq!(report.replaced, 0);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("client");
        let mut config = config(&root);
        config.generation.dry_run = true;

        let report = orchestrator().run(&config).await.unwrap();
        assert!(report.dry_run);
        assert!(report.file_count() > 0);
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_missing_credential_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("client");
        let mut config = config(&root);
        config.api_key = None;

        let err = orchestrator().run(&config).await.unwrap_err();
        assert!(err.is_config_error());
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_previous_run() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("client");
        let mut config = config(&root);

        orchestrator().run(&config).await.unwrap();
        let err = orchestrator().run(&config).await.unwrap_err();
        assert!(err.is_output_error());

        config.generation.overwrite = true;
        let report = orchestrator().run(&config).await.unwrap();
        assert_eq!(report.replaced, report.file_count());
    }

    #[tokio::test]
    async fn test_missing_tsc_is_an_advisory() {
        let advisory = type_check(Path::new("/nonexistent/index.ts")).await;
        assert!(advisory.is_some());
    }
}
