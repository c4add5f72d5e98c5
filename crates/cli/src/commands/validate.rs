use std::collections::HashSet;
use std::path::Path;
use std::process;

use ferry_core::FerryError;
use ferry_interchange::{InterchangeError, MigrationIntent};

use crate::{fail, report_error, OutputFormat};

const INTENT_SCHEMA_STR: &str = include_str!("../../../../docs/migration-intent-schema.json");

/// Checks the schema cannot express: cross references and uniqueness.
fn semantic_errors(intent: &MigrationIntent) -> Vec<String> {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for component in &intent.components {
        if !names.insert(component.name.as_str()) {
            errors.push(format!("duplicate component name '{}'", component.name));
        }
    }
    let mut paths = HashSet::new();
    for endpoint in &intent.endpoints {
        if !paths.insert(endpoint.path.as_str()) {
            errors.push(format!("duplicate endpoint path '{}'", endpoint.path));
        }
    }
    for route in &intent.routing {
        if !names.contains(route.component.as_str()) {
            errors.push(format!(
                "route '{}' names unknown component '{}'",
                route.path, route.component
            ));
        }
    }
    errors
}

/// Schema errors first; semantic checks only run on a schema-valid document.
fn validation_errors(doc: &serde_json::Value) -> Result<Vec<String>, String> {
    let schema: serde_json::Value = serde_json::from_str(INTENT_SCHEMA_STR)
        .map_err(|e| format!("internal error: failed to parse embedded intent schema: {}", e))?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| format!("internal error: failed to compile schema: {}", e))?;

    let errors: Vec<String> = validator
        .iter_errors(doc)
        .map(|e| format!("{}", e))
        .collect();
    if !errors.is_empty() {
        return Ok(errors);
    }
    match serde_json::from_value::<MigrationIntent>(doc.clone()) {
        Ok(intent) => Ok(semantic_errors(&intent)),
        Err(e) => Ok(vec![e.to_string()]),
    }
}

pub(crate) fn cmd_validate(intent_path: &Path, output: OutputFormat, quiet: bool) {
    let content = match std::fs::read_to_string(intent_path) {
        Ok(c) => c,
        Err(source) => fail(
            &FerryError::Intent(InterchangeError::Read {
                path: intent_path.to_path_buf(),
                source,
            }),
            output,
            quiet,
        ),
    };
    let doc: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(source) => fail(
            &FerryError::Intent(InterchangeError::Json {
                path: intent_path.to_path_buf(),
                source,
            }),
            output,
            quiet,
        ),
    };

    let errors = match validation_errors(&doc) {
        Ok(errors) => errors,
        Err(msg) => {
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{{\"valid\": true}}"),
            }
        }
        return;
    }

    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("invalid intent");
                for err in &errors {
                    eprintln!("  - {}", err);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({ "valid": false, "errors": errors });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }
    process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> serde_json::Value {
        json!({
            "react_components": [{
                "name": "Welcome",
                "kind": "display",
                "sourceFile": "welcome.jsp",
                "title": "Welcome"
            }],
            "api_endpoints": [{
                "path": "/welcome",
                "method": "GET",
                "sourceHandler": "com.example.WelcomeAction"
            }],
            "state_management": {
                "solution": "React Context",
                "sessionStrategy": "JWT tokens",
                "formStateStrategy": "React Hook Form"
            },
            "routing": [{ "path": "/", "component": "Welcome" }],
            "validation_rules": {}
        })
    }

    #[test]
    fn test_embedded_schema_parses() {
        let schema: serde_json::Value = serde_json::from_str(INTENT_SCHEMA_STR).unwrap();
        assert!(jsonschema::validator_for(&schema).is_ok());
    }

    #[test]
    fn test_minimal_intent_is_valid() {
        assert_eq!(validation_errors(&minimal()).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_missing_section_is_a_schema_error() {
        let mut doc = minimal();
        doc.as_object_mut().unwrap().remove("routing");
        let errors = validation_errors(&doc).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("routing"));
    }

    #[test]
    fn test_unknown_route_component_is_reported() {
        let mut doc = minimal();
        doc["routing"][0]["component"] = json!("Missing");
        let errors = validation_errors(&doc).unwrap();
        assert_eq!(errors, vec!["route '/' names unknown component 'Missing'"]);
    }

    #[test]
    fn test_duplicate_endpoint_path_is_reported() {
        let mut doc = minimal();
        let endpoint = doc["api_endpoints"][0].clone();
        doc["api_endpoints"].as_array_mut().unwrap().push(endpoint);
        let errors = validation_errors(&doc).unwrap();
        assert_eq!(errors, vec!["duplicate endpoint path '/welcome'"]);
    }
}
