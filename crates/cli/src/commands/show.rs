use std::fmt::Write as _;
use std::path::Path;

use ferry_core::FerryError;
use ferry_interchange::{load_intent, MigrationIntent};

use crate::{fail, print_json, OutputFormat};

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Human-readable listing of every section of an intent.
fn render_text(intent: &MigrationIntent) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Components ({})", intent.components.len());
    for c in &intent.components {
        let kind = if c.is_form() { "form" } else { "display" };
        let _ = writeln!(out, "  {:<24} {:<8} {}", c.name, kind, c.source_file);
        if !c.state_fields.is_empty() {
            let _ = writeln!(out, "    fields: {}", list(&c.state_fields));
        }
    }

    let _ = writeln!(out, "Endpoints ({})", intent.endpoints.len());
    for e in &intent.endpoints {
        let _ = write!(out, "  {:<5} {:<28} {}", e.method.to_string(), e.path, e.source_handler);
        if let Some(bean) = &e.form_bean {
            let _ = write!(out, " [{}{}]", bean, if e.validation_required { ", validated" } else { "" });
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Routes ({})", intent.routing.len());
    for r in &intent.routing {
        let guard = if r.protected { " (protected)" } else { "" };
        let _ = writeln!(out, "  {:<28} -> {}{}", r.path, r.component, guard);
        for (forward, target) in &r.redirect_rules {
            let _ = writeln!(out, "    {} => {}", forward, target);
        }
    }

    let state = &intent.state_management;
    let _ = writeln!(
        out,
        "State: {} (session: {}, forms: {})",
        state.solution, state.session_strategy, state.form_state_strategy
    );
    if !state.global_entities.is_empty() {
        let _ = writeln!(out, "  global entities: {}", list(&state.global_entities));
    }

    let _ = writeln!(out, "Validation rules ({})", intent.validation_rules.len());
    for (bean, rule) in &intent.validation_rules {
        let markers: Vec<String> = rule.rules.iter().map(|m| m.to_string()).collect();
        let _ = writeln!(out, "  {}: {}", bean, list(&rule.fields));
        if !markers.is_empty() {
            let _ = writeln!(out, "    markers: {}", markers.join(", "));
        }
    }
    out
}

fn render_json(intent: &MigrationIntent) -> serde_json::Value {
    serde_json::json!({
        "components": intent.components.iter().map(|c| &c.name).collect::<Vec<_>>(),
        "endpoints": intent
            .endpoints
            .iter()
            .map(|e| format!("{} {}", e.method, e.path))
            .collect::<Vec<_>>(),
        "routes": intent
            .routing
            .iter()
            .map(|r| serde_json::json!({ "path": r.path, "component": r.component, "protected": r.protected }))
            .collect::<Vec<_>>(),
        "state_management": intent.state_management.solution,
        "validation_rules": intent.validation_rules.keys().collect::<Vec<_>>(),
        "suggested_libraries": intent.suggested_libraries(),
    })
}

pub(crate) fn cmd_show(intent_path: &Path, output: OutputFormat, quiet: bool) {
    let intent = match load_intent(intent_path) {
        Ok(intent) => intent,
        Err(e) => fail(&FerryError::from(e), output, quiet),
    };
    match output {
        OutputFormat::Json => print_json(&render_json(&intent)),
        OutputFormat::Text => print!("{}", render_text(&intent)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_interchange::{
        ApiEndpointSpec, ComponentKind, ComponentSpec, HttpMethod, RouteSpec,
        StateManagementRecommendation,
    };
    use indexmap::IndexMap;

    fn intent() -> MigrationIntent {
        MigrationIntent {
            components: vec![ComponentSpec {
                name: "ApplicantInfo".to_string(),
                kind: ComponentKind::Form,
                source_file: "applicant-info.jsp".to_string(),
                title: "Applicant".to_string(),
                state_fields: vec!["firstName".to_string(), "email".to_string()],
                validation_required: true,
                props: Vec::new(),
                suggested_libraries: vec!["react-hook-form".to_string()],
            }],
            endpoints: vec![ApiEndpointSpec {
                path: "/applicant-info".to_string(),
                method: HttpMethod::Post,
                source_handler: "com.example.ApplicantInfoAction".to_string(),
                form_bean: Some("applicantForm".to_string()),
                validation_required: true,
                responses: vec!["success".to_string()],
                suggested_middleware: Vec::new(),
            }],
            state_management: StateManagementRecommendation {
                solution: "React Context".to_string(),
                session_strategy: "JWT tokens".to_string(),
                form_state_strategy: "React Hook Form".to_string(),
                global_entities: Vec::new(),
            },
            routing: vec![RouteSpec {
                path: "/applicant-info".to_string(),
                component: "ApplicantInfo".to_string(),
                protected: true,
                redirect_rules: IndexMap::new(),
            }],
            validation_rules: IndexMap::new(),
        }
    }

    #[test]
    fn test_text_lists_every_section() {
        let text = render_text(&intent());
        assert!(text.starts_with("Components (1)\n"));
        assert!(text.contains("    fields: firstName, email\n"));
        assert!(text.contains("POST  /applicant-info"));
        assert!(text.contains("[applicantForm, validated]"));
        assert!(text.contains("-> ApplicantInfo (protected)"));
        assert!(text.contains("State: React Context (session: JWT tokens, forms: React Hook Form)"));
        assert!(text.ends_with("Validation rules (0)\n"));
    }

    #[test]
    fn test_json_summary() {
        let json = render_json(&intent());
        assert_eq!(json["components"][0], "ApplicantInfo");
        assert_eq!(json["endpoints"][0], "POST /applicant-info");
        assert_eq!(json["routes"][0]["protected"], true);
        assert_eq!(json["suggested_libraries"][0], "react-hook-form");
    }
}
