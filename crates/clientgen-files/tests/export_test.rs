//! Exporting real generator output through the rollback guard.

use clientgen_codegen::{GenerationContext, TemplateEngine, generate_all};
use clientgen_core::{Endpoint, Parameter, ResolvedConfig, Schema};
use clientgen_files::{ExportOptions, FileSystem, FilesBuilder, OutputGuard};
use tempfile::TempDir;

fn generated_tree() -> FileSystem {
    let mut schema = Schema::default();
    schema.endpoints.push(Endpoint::new("GET", "/users"));
    schema.endpoints.push(
        Endpoint::new("GET", "/users/{id}").with_parameter(Parameter::required("id", "string")),
    );

    let config = ResolvedConfig::default();
    let engine = TemplateEngine::new().unwrap();
    let ctx = GenerationContext::new(&schema, &config, &engine);

    let mut tree = FileSystem::new();
    for code in generate_all(&ctx).unwrap() {
        tree.merge(FilesBuilder::from_generated_code(&code, "/").build().unwrap());
    }
    tree
}

#[test]
fn test_committed_tree_round_trips() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");
    let tree = generated_tree();

    let mut guard = OutputGuard::begin(&root, ExportOptions::default()).unwrap();
    guard.write(&tree).unwrap();
    let report = guard.commit();

    assert_eq!(report.written_files.len(), tree.file_count());
    assert_eq!(FileSystem::load_from_disk(&root).unwrap(), tree);
}

#[test]
fn test_uncommitted_tree_is_removed() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");

    {
        let mut guard = OutputGuard::begin(&root, ExportOptions::default()).unwrap();
        guard.write(&generated_tree()).unwrap();
        assert!(guard.created_root());
        assert!(root.join("api/users.ts").is_file());
    }

    assert!(!root.exists());
}

#[test]
fn test_existing_root_survives_rollback() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("client");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("README.md"), "handwritten").unwrap();

    {
        let mut guard = OutputGuard::begin(&root, ExportOptions::default()).unwrap();
        guard.write(&generated_tree()).unwrap();
        assert!(!guard.created_root());
    }

    let left: Vec<_> = std::fs::read_dir(&root)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(left, vec!["README.md"]);
}
