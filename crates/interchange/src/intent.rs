//! The migration intent: the single intermediate representation consumed by
//! both code emitters.
//!
//! Built exactly once per analysis run and treated as read-only afterwards.
//! Every type here round-trips through `migration_intent.json` without loss,
//! which is what lets the generator run from a file instead of a live
//! analysis.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::ValidationMarker;

/// Library and middleware hints shared by the synthesizer and the emitters.
pub mod hints {
    pub const FORM_LIBRARY: &str = "react-hook-form";
    pub const SELECT_WIDGET: &str = "react-select";
    pub const TABLE_WIDGET: &str = "@tanstack/react-table";
    pub const SCHEMA_LIBRARY: &str = "yup";
    pub const NO_LIBRARY: &str = "none";

    pub const VALIDATION_MIDDLEWARE: &str = "express-validator";
    pub const SESSION_MIDDLEWARE: &str = "express-session";
    pub const CORS_MIDDLEWARE: &str = "cors";

    pub const RICH_STATE: &str = "Redux Toolkit";
    pub const LOCAL_STATE: &str = "React Context";
    pub const SESSION_STRATEGY: &str = "JWT tokens";
    pub const FORM_STATE_STRATEGY: &str = "React Hook Form";
}

/// Well-known component prop names.
pub mod props {
    pub const LOADING: &str = "loading";
    pub const USER: &str = "user";
    pub const ON_SUBMIT: &str = "onSubmit";
    pub const ERRORS: &str = "errors";
}

// ── Components ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Form,
    Display,
}

/// One UI page to generate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// Valid identifier, derived deterministically from `source_file`.
    pub name: String,
    pub kind: ComponentKind,
    pub source_file: String,
    pub title: String,
    /// Input property names observed on the source page, in extraction order.
    #[serde(default)]
    pub state_fields: Vec<String>,
    #[serde(default)]
    pub validation_required: bool,
    #[serde(default)]
    pub props: Vec<String>,
    #[serde(default)]
    pub suggested_libraries: Vec<String>,
}

impl ComponentSpec {
    pub fn is_form(&self) -> bool {
        self.kind == ComponentKind::Form
    }

    pub fn has_prop(&self, prop: &str) -> bool {
        self.props.iter().any(|p| p == prop)
    }
}

// ── Endpoints ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Lowercase verb as used by router method names (`get`, `post`).
    pub fn verb(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// One back-end endpoint to generate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpointSpec {
    /// Action path with the handler extension removed; unique per intent.
    pub path: String,
    pub method: HttpMethod,
    pub source_handler: String,
    #[serde(default)]
    pub form_bean: Option<String>,
    #[serde(default)]
    pub validation_required: bool,
    /// Forward names of the originating action.
    #[serde(default)]
    pub responses: Vec<String>,
    #[serde(default)]
    pub suggested_middleware: Vec<String>,
}

impl ApiEndpointSpec {
    /// First path segment, used to group endpoints into modules.
    /// Returns `None` for the root path.
    pub fn domain(&self) -> Option<&str> {
        self.path.split('/').find(|seg| !seg.is_empty())
    }

    /// Path after the domain segment, always starting with `/`.
    pub fn remainder(&self) -> &str {
        let trimmed = self.path.trim_start_matches('/');
        match trimmed.find('/') {
            Some(idx) => &trimmed[idx..],
            None => "/",
        }
    }
}

// ── Routing ─────────────────────────────────────────────────────────

/// One client-side route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    pub path: String,
    /// Name of an existing [`ComponentSpec`].
    pub component: String,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub redirect_rules: IndexMap<String, String>,
}

// ── Validation and state ────────────────────────────────────────────

/// Validation rules for one form bean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRuleSpec {
    pub fields: Vec<String>,
    pub rules: Vec<ValidationMarker>,
    pub suggested_library: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StateManagementRecommendation {
    pub solution: String,
    pub session_strategy: String,
    pub form_state_strategy: String,
    #[serde(default)]
    pub global_entities: Vec<String>,
}

// ── MigrationIntent ─────────────────────────────────────────────────

/// The synthesized intermediate representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MigrationIntent {
    #[serde(rename = "react_components")]
    pub components: Vec<ComponentSpec>,
    #[serde(rename = "api_endpoints")]
    pub endpoints: Vec<ApiEndpointSpec>,
    pub state_management: StateManagementRecommendation,
    pub routing: Vec<RouteSpec>,
    /// Keyed by form bean name, in bean declaration order.
    pub validation_rules: IndexMap<String, ValidationRuleSpec>,
}

impl MigrationIntent {
    pub fn component(&self, name: &str) -> Option<&ComponentSpec> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn endpoint(&self, path: &str) -> Option<&ApiEndpointSpec> {
        self.endpoints.iter().find(|e| e.path == path)
    }

    /// Union of every component's suggested libraries, first-seen order.
    pub fn suggested_libraries(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for lib in self.components.iter().flat_map(|c| &c.suggested_libraries) {
            if !seen.contains(&lib.as_str()) {
                seen.push(lib);
            }
        }
        seen
    }
}
