//! Validates synthesized migration intents against the formal schema at
//! docs/migration-intent-schema.json.

use std::path::{Path, PathBuf};

use ferry_core::{FerryConfig, FileSystemProvider, InMemoryProvider, Pipeline, Stage};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn validator() -> jsonschema::Validator {
    let schema_path = workspace_root().join("docs/migration-intent-schema.json");
    let schema_src = std::fs::read_to_string(&schema_path)
        .unwrap_or_else(|e| panic!("Failed to read schema at {}: {}", schema_path.display(), e));
    let schema_value: serde_json::Value = serde_json::from_str(&schema_src).unwrap();
    jsonschema::validator_for(&schema_value)
        .unwrap_or_else(|e| panic!("Failed to compile schema: {}", e))
}

fn intent_json(pipeline: &mut Pipeline<'_>) -> serde_json::Value {
    pipeline
        .run_until(Stage::Synthesized)
        .unwrap_or_else(|e| panic!("analysis failed: {}", e));
    serde_json::to_value(pipeline.intent().unwrap()).unwrap()
}

#[test]
fn fixture_intent_conforms_to_schema() {
    let validator = validator();
    let provider = FileSystemProvider;
    let mut pipeline = Pipeline::new(
        &provider,
        workspace_root().join("fixtures/trucklease"),
        FerryConfig::default(),
    );
    let instance = intent_json(&mut pipeline);
    if let Err(error) = validator.validate(&instance) {
        panic!("fixture intent does not match schema: {}", error);
    }
}

#[test]
fn empty_application_intent_conforms_to_schema() {
    let validator = validator();
    let provider = InMemoryProvider::new().with_file("app/README", "nothing here");
    let mut pipeline = Pipeline::new(&provider, "app", FerryConfig::default());
    let instance = intent_json(&mut pipeline);
    if let Err(error) = validator.validate(&instance) {
        panic!("empty intent does not match schema: {}", error);
    }
}

#[test]
fn schema_rejects_unknown_method() {
    let validator = validator();
    let provider = FileSystemProvider;
    let mut pipeline = Pipeline::new(
        &provider,
        workspace_root().join("fixtures/trucklease"),
        FerryConfig::default(),
    );
    let mut instance = intent_json(&mut pipeline);
    instance["api_endpoints"][0]["method"] = serde_json::json!("PATCH");
    assert!(validator.validate(&instance).is_err());
}
