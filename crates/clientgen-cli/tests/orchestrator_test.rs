//! On-disk tests of the generation pipeline: atomicity, overwrite rules,
//! dry runs, and idempotence.

use clientgen_cli::config_loader;
use clientgen_cli::orchestrator::Orchestrator;
use clientgen_codegen::{
    ArtifactGenerator, GeneratedCode, GeneratedFile, GenerationContext, default_generators,
};
use clientgen_core::config::StateManagement;
use clientgen_core::traits::SchemaOrigin;
use clientgen_core::workspace::FsWorkspace;
use clientgen_core::{EnvironmentName, Error, ResolvedConfig, Result, Schema, resolve};
use clientgen_files::FileSystem;
use clientgen_introspector::{SchemaFetcher, StaticSchema};
use std::path::Path;
use tempfile::TempDir;

const SCHEMA: &str = r#"{
    "endpoints": [
        { "path": "/users", "method": "GET", "response": { "type": "User[]" } },
        { "path": "/users/{id}", "method": "GET",
          "parameters": [{ "name": "id", "type": "string", "required": true }],
          "response": { "type": "User" } },
        { "path": "/orders", "method": "POST",
          "parameters": [{ "name": "total", "type": "number", "required": true }],
          "response": { "type": "Order" } }
    ],
    "types": {
        "User": { "id": "string", "name": "string" },
        "Order": { "id": "string", "buyer": "User", "total": "number" }
    }
}"#;

/// Fails after the groups before it have been written.
#[derive(Debug)]
struct FailingGenerator;

impl ArtifactGenerator for FailingGenerator {
    fn group(&self) -> &'static str {
        "failing"
    }

    fn generate(&self, _ctx: &GenerationContext<'_>) -> Result<GeneratedCode> {
        Err(Error::GenerationError {
            artifact: "failing".to_string(),
            message: "transformer threw".to_string(),
            source: None,
        })
    }
}

/// Emits a file importing a module nobody generates.
#[derive(Debug)]
struct DanglingGenerator;

impl ArtifactGenerator for DanglingGenerator {
    fn group(&self) -> &'static str {
        "dangling"
    }

    fn generate(&self, _ctx: &GenerationContext<'_>) -> Result<GeneratedCode> {
        let mut code = GeneratedCode::new("dangling");
        code.add_file(GeneratedFile::new(
            "extra/index.ts",
            "export * from './missing';\n",
        ));
        Ok(code)
    }
}

fn orchestrator() -> Orchestrator {
    let schema = Schema::from_json(SCHEMA).unwrap();
    Orchestrator::new(Box::new(StaticSchema::new(schema))).unwrap()
}

fn config(root: &Path) -> ResolvedConfig {
    ResolvedConfig {
        api_key: Some("sk-test".to_string()),
        output_dir: root.to_path_buf(),
        ..ResolvedConfig::default()
    }
}

fn with_generator_at(index: usize, generator: Box<dyn ArtifactGenerator>) -> Orchestrator {
    let mut generators = default_generators();
    generators.insert(index, generator);
    orchestrator().with_generators(generators)
}

#[tokio::test]
async fn test_failing_generator_leaves_no_output_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("nested/client");

    let err = with_generator_at(2, Box::new(FailingGenerator))
        .run(&config(&root))
        .await
        .unwrap_err();

    assert!(err.is_generation_error());
    assert!(!root.exists());
    assert!(!temp.path().join("nested").exists());
}

#[tokio::test]
async fn test_dangling_import_rolls_back() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");

    let err = with_generator_at(5, Box::new(DanglingGenerator))
        .run(&config(&root))
        .await
        .unwrap_err();

    assert!(err.is_generation_error());
    assert!(err.to_string().contains("./missing"));
    assert!(!root.exists());
}

#[tokio::test]
async fn test_failure_restores_previous_output() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");
    let mut config = config(&root);

    orchestrator().run(&config).await.unwrap();
    let before = FileSystem::load_from_disk(&root).unwrap();
    std::fs::write(root.join("notes.md"), "kept").unwrap();

    config.api.group_by_resource = false;
    config.generation.overwrite = true;
    let err = with_generator_at(3, Box::new(FailingGenerator))
        .run(&config)
        .await
        .unwrap_err();
    assert!(err.is_generation_error());

    std::fs::remove_file(root.join("notes.md")).unwrap();
    let after = FileSystem::load_from_disk(&root).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_non_empty_output_without_overwrite() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("handwritten.ts"), "export const x = 1;\n").unwrap();

    let err = orchestrator().run(&config(&root)).await.unwrap_err();
    assert!(matches!(err, Error::OutputNotEmpty { .. }));

    let entries: Vec<_> = std::fs::read_dir(&root).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_dry_run_still_checks_output_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("handwritten.ts"), "x").unwrap();

    let mut config = config(&root);
    config.generation.dry_run = true;
    let err = orchestrator().run(&config).await.unwrap_err();
    assert!(err.is_output_error());
}

#[tokio::test]
async fn test_idempotent_with_overwrite() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");
    let mut config = config(&root);
    config.generation.overwrite = true;

    orchestrator().run(&config).await.unwrap();
    let first = FileSystem::load_from_disk(&root).unwrap();
    orchestrator().run(&config).await.unwrap();
    let second = FileSystem::load_from_disk(&root).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_state_management_none_has_no_stores() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");
    let mut config = config(&root);
    config.state_management = StateManagement::None;

    let report = orchestrator().run(&config).await.unwrap();

    assert!(!root.join("stores").exists());
    assert!(report.files.iter().all(|f| !f.starts_with("stores/")));
    let index = std::fs::read_to_string(root.join("index.ts")).unwrap();
    assert!(!index.contains("./stores"));
}

#[tokio::test]
async fn test_written_tree_matches_report() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");

    let report = orchestrator().run(&config(&root)).await.unwrap();
    let tree = FileSystem::load_from_disk(&root).unwrap();

    assert_eq!(tree.file_count(), report.file_count());
    for path in &report.files {
        assert!(tree.exists(format!("/{path}")), "{path}");
    }
    let total: usize = report.groups.iter().map(|g| g.files).sum();
    assert_eq!(total, report.file_count());
}

#[tokio::test]
async fn test_unresolved_placeholder_is_missing_credential() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("clientgen.config.json"),
        r#"{ "apiKey": "${CLIENTGEN_TEST_NEVER_SET_4F2A}", "outputDir": "gen" }"#,
    )
    .unwrap();
    let workspace = FsWorkspace::new(temp.path());

    let loaded = config_loader::load_from(None, &workspace, None).unwrap();
    let config = resolve(&loaded.config, &EnvironmentName::default(), &workspace);
    assert_eq!(
        config.api_key.as_deref(),
        Some("${CLIENTGEN_TEST_NEVER_SET_4F2A}")
    );

    let err = orchestrator().run(&config).await.unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("CLIENTGEN_TEST_NEVER_SET_4F2A"));
    assert!(!temp.path().join("gen").exists());
}

#[tokio::test]
async fn test_unreachable_api_generates_from_fallback() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");
    let mut config = config(&root);
    // Nothing listens on the discard port.
    config.base_url = "http://127.0.0.1:9".to_string();

    let orchestrator = Orchestrator::new(Box::new(SchemaFetcher::new())).unwrap();
    let report = orchestrator.run(&config).await.unwrap();

    assert_eq!(report.schema_origin, SchemaOrigin::Fallback);
    assert!(!report.warnings.is_empty());
    assert!(root.join("api/users.ts").is_file());
    assert!(!root.join("api/orders.ts").exists());
}

#[tokio::test]
async fn test_unreachable_api_without_fallback_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");
    let mut config = config(&root);
    config.base_url = "http://127.0.0.1:9".to_string();

    let source = SchemaFetcher::new().with_fallback(false);
    let err = Orchestrator::new(Box::new(source))
        .unwrap()
        .run(&config)
        .await
        .unwrap_err();

    assert!(err.is_schema_unavailable());
    assert!(!root.exists());
}
