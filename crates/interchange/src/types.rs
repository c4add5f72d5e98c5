//! Raw extraction records.
//!
//! These are produced by the extractors in `ferry-core` and serialized into
//! `struts_analysis.json`. Field names follow the camelCase shape of the
//! analysis artifact; the top-level array names are snake_case.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ── ActionMapping ───────────────────────────────────────────────────

/// One route/action descriptor entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActionMapping {
    /// URL-like path including the legacy handler extension, e.g. `/applicant-info.do`.
    pub path: String,
    /// Fully-qualified handler class.
    pub handler_type: String,
    /// Name of the form bean bound to this action.
    #[serde(default)]
    pub form_name: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub validate: bool,
    #[serde(default)]
    pub input_path: Option<String>,
    /// Forward name to target path. Insertion order is definition order and
    /// the first definition of a repeated name wins.
    #[serde(default)]
    pub forwards: IndexMap<String, String>,
}

// ── FormBean ────────────────────────────────────────────────────────

/// Validation indicator discovered in a form-bean implementation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMarker {
    ServerSideValidation,
    ErrorHandling,
    RegexValidation,
}

impl ValidationMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMarker::ServerSideValidation => "server_side_validation",
            ValidationMarker::ErrorHandling => "error_handling",
            ValidationMarker::RegexValidation => "regex_validation",
        }
    }
}

impl fmt::Display for ValidationMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed collection of input properties.
///
/// Created by the descriptor pass with empty `properties`/`validations`;
/// the logic-unit pass fills both in place before synthesis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormBean {
    pub name: String,
    #[serde(rename = "type")]
    pub bean_type: String,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub validations: Vec<ValidationMarker>,
}

impl FormBean {
    pub fn new(name: impl Into<String>, bean_type: impl Into<String>) -> Self {
        FormBean {
            name: name.into(),
            bean_type: bean_type.into(),
            properties: Vec::new(),
            validations: Vec::new(),
        }
    }

    /// Simple class name: the last `.`/`$` separated segment of the type.
    pub fn simple_type_name(&self) -> &str {
        self.bean_type
            .rsplit(['.', '$'])
            .next()
            .unwrap_or(&self.bean_type)
    }
}

// ── ViewPage ────────────────────────────────────────────────────────

/// Input control classification, taken from the declaring tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    Select,
    Checkbox,
    Textarea,
    Radio,
}

impl InputKind {
    /// Map a legacy tag name (`text`, `select`, ...) to its kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(InputKind::Text),
            "select" => Some(InputKind::Select),
            "checkbox" => Some(InputKind::Checkbox),
            "textarea" => Some(InputKind::Textarea),
            "radio" => Some(InputKind::Radio),
            _ => None,
        }
    }
}

/// One declared input field on a view page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewInput {
    pub property: String,
    #[serde(rename = "type")]
    pub kind: InputKind,
    #[serde(default)]
    pub css_class: String,
}

/// Embedded-logic marker found in a view template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LogicMarker {
    ConditionalLogic,
    DataDisplay,
    SessionManagement,
}

/// One scanned view template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewPage {
    /// Path relative to the application root, `/`-separated.
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub forms: Vec<String>,
    #[serde(default)]
    pub inputs: Vec<ViewInput>,
    #[serde(default)]
    pub navigation: Vec<String>,
    #[serde(default)]
    pub logic_markers: BTreeSet<LogicMarker>,
}

impl ViewPage {
    pub fn has_marker(&self, marker: LogicMarker) -> bool {
        self.logic_markers.contains(&marker)
    }

    /// File name without directories or extension.
    pub fn stem(&self) -> &str {
        let file = self.path.rsplit('/').next().unwrap_or(&self.path);
        match file.rfind('.') {
            Some(0) | None => file,
            Some(idx) => &file[..idx],
        }
    }
}

// ── AnalysisReport ──────────────────────────────────────────────────

/// The raw extraction written to `struts_analysis.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisReport {
    pub action_mappings: Vec<ActionMapping>,
    pub form_beans: Vec<FormBean>,
    #[serde(rename = "jsp_pages")]
    pub view_pages: Vec<ViewPage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_type_name() {
        let bean = FormBean::new("applicantForm", "com.trucklease.beans.ApplicantForm");
        assert_eq!(bean.simple_type_name(), "ApplicantForm");

        let nested = FormBean::new("inner", "com.acme.Outer$InnerForm");
        assert_eq!(nested.simple_type_name(), "InnerForm");

        let bare = FormBean::new("bare", "BareForm");
        assert_eq!(bare.simple_type_name(), "BareForm");
    }

    #[test]
    fn test_view_page_stem() {
        let page = ViewPage {
            path: "src/main/webapp/jsp/applicant-info.jsp".to_string(),
            title: "Applicant".to_string(),
            forms: vec![],
            inputs: vec![],
            navigation: vec![],
            logic_markers: BTreeSet::new(),
        };
        assert_eq!(page.stem(), "applicant-info");
    }

    #[test]
    fn test_action_mapping_json_shape() {
        let mut forwards = IndexMap::new();
        forwards.insert("success".to_string(), "/vehicle-preference.do".to_string());
        let action = ActionMapping {
            path: "/applicant-info.do".to_string(),
            handler_type: "com.trucklease.actions.ApplicantInfoAction".to_string(),
            form_name: Some("applicantForm".to_string()),
            scope: Some("session".to_string()),
            validate: true,
            input_path: Some("/jsp/applicant-info.jsp".to_string()),
            forwards,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["handlerType"], "com.trucklease.actions.ApplicantInfoAction");
        assert_eq!(json["formName"], "applicantForm");
        assert_eq!(json["inputPath"], "/jsp/applicant-info.jsp");
        assert_eq!(json["forwards"]["success"], "/vehicle-preference.do");
    }

    #[test]
    fn test_markers_serialize_snake_case() {
        let mut markers = BTreeSet::new();
        markers.insert(LogicMarker::SessionManagement);
        markers.insert(LogicMarker::ConditionalLogic);
        let json = serde_json::to_value(&markers).unwrap();
        assert_eq!(
            json,
            serde_json::json!(["conditional_logic", "session_management"])
        );
        assert_eq!(
            serde_json::to_value(ValidationMarker::RegexValidation).unwrap(),
            "regex_validation"
        );
    }

    #[test]
    fn test_report_uses_jsp_pages_key() {
        let json = serde_json::to_value(AnalysisReport::default()).unwrap();
        assert!(json.get("jsp_pages").is_some());
        assert!(json.get("action_mappings").is_some());
        assert!(json.get("form_beans").is_some());
    }
}
