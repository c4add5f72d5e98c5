//! LogicUnitAnalyzer: scans business-logic source units for form-bean
//! implementations and merges their fields and validation indicators into
//! the descriptor's [`FormBean`] records.
//!
//! Detection is textual. A form bean is any public class extending one of
//! the framework form base classes; fields are `private` instance fields.
//! Getters-only beans, fields declared on a superclass and validation done in
//! helper classes are not seen.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use ferry_interchange::{FormBean, ValidationMarker};

use crate::config::FerryConfig;
use crate::diagnostics::Diagnostics;
use crate::scan::scan_tree;
use crate::source::SourceProvider;

static PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*package\s+([\w.]+)\s*;").expect("package regex"));
static CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bpublic\s+(?:(?:final|abstract)\s+)*class\s+(\w+)").expect("class regex")
});
static FORM_BASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bextends\s+(?:[\w]+\.)*(?:ActionForm|ValidatorForm|ValidatorActionForm)\b")
        .expect("form base regex")
});
static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bprivate\s+(static\s+)?(?:final\s+)?[\w.]+(?:<[^;=()]*>)?(?:\[\])*\s+(\w+)\s*(?:=[^;]*)?;",
    )
    .expect("field regex")
});

/// What one source unit contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicUnit {
    /// Root-relative path of the source unit.
    pub path: String,
    pub class_name: String,
    /// `package.ClassName`, or just the class name without a package.
    pub qualified_name: String,
    pub is_form_bean: bool,
    pub properties: Vec<String>,
    pub validations: Vec<ValidationMarker>,
}

impl LogicUnit {
    fn matches(&self, bean: &FormBean) -> bool {
        bean.bean_type == self.qualified_name || bean.simple_type_name() == self.class_name
    }
}

/// Scan one source unit. Returns `None` when no public class is declared.
pub fn scan_logic_unit(path: &str, text: &str) -> Option<LogicUnit> {
    let class_name = CLASS.captures(text)?[1].to_string();
    let qualified_name = match PACKAGE.captures(text) {
        Some(pkg) => format!("{}.{}", &pkg[1], class_name),
        None => class_name.clone(),
    };
    let is_form_bean = FORM_BASE.is_match(text);

    let mut properties = Vec::new();
    let mut validations = Vec::new();
    if is_form_bean {
        for field in FIELD.captures_iter(text) {
            if field.get(1).is_some() {
                continue;
            }
            let name = field[2].to_string();
            if !properties.contains(&name) {
                properties.push(name);
            }
        }
        if text.contains("validate(") {
            validations.push(ValidationMarker::ServerSideValidation);
        }
        if text.contains("ActionErrors") {
            validations.push(ValidationMarker::ErrorHandling);
        }
        if text.contains("Pattern.compile") {
            validations.push(ValidationMarker::RegexValidation);
        }
    }

    Some(LogicUnit {
        path: path.to_string(),
        class_name,
        qualified_name,
        is_form_bean,
        properties,
        validations,
    })
}

/// Run the LogicUnitAnalyzer and fill `form_beans` in place.
///
/// Each bean takes its properties and validations from the first matching
/// form-bean unit in path order.
pub fn analyze_logic_units(
    provider: &dyn SourceProvider,
    root: &Path,
    config: &FerryConfig,
    form_beans: &mut [FormBean],
    diagnostics: &mut Diagnostics,
) -> Vec<LogicUnit> {
    let units = scan_tree(
        provider,
        root,
        &config.layout.logic,
        "java",
        config.extraction.parallel,
        diagnostics,
        |rel, text| Ok(scan_logic_unit(rel, text)),
    );
    let merged = merge_into_beans(&units, form_beans);
    tracing::info!(units = units.len(), merged, "analyzed logic units");
    units
}

/// Copy discovered properties and validations into matching beans. Returns
/// how many beans were filled.
pub fn merge_into_beans(units: &[LogicUnit], form_beans: &mut [FormBean]) -> usize {
    let mut merged = 0;
    for bean in form_beans.iter_mut() {
        let Some(unit) = units.iter().filter(|u| u.is_form_bean).find(|u| u.matches(bean)) else {
            tracing::debug!(bean = %bean.name, ty = %bean.bean_type, "no implementation found");
            continue;
        };
        tracing::debug!(bean = %bean.name, unit = %unit.path, "merging form bean");
        bean.properties = unit.properties.clone();
        bean.validations = unit.validations.clone();
        merged += 1;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryProvider;

    const APPLICANT_FORM: &str = r#"package com.trucklease.beans;

import java.util.regex.Pattern;
import org.apache.struts.action.*;

public class ApplicantForm extends ActionForm {
    private static final long serialVersionUID = 1L;
    private static final Pattern SSN = Pattern.compile("\\d{3}-\\d{2}-\\d{4}");

    private String firstName;
    private String email;
    private String phone = "";
    private java.util.List<String> previousAddresses;

    public ActionErrors validate(ActionMapping mapping, HttpServletRequest request) {
        ActionErrors errors = new ActionErrors();
        return errors;
    }
}
"#;

    #[test]
    fn test_scan_form_bean() {
        let unit = scan_logic_unit("src/main/java/ApplicantForm.java", APPLICANT_FORM).unwrap();
        assert_eq!(unit.class_name, "ApplicantForm");
        assert_eq!(unit.qualified_name, "com.trucklease.beans.ApplicantForm");
        assert!(unit.is_form_bean);
        assert_eq!(
            unit.properties,
            vec!["firstName", "email", "phone", "previousAddresses"]
        );
        assert_eq!(
            unit.validations,
            vec![
                ValidationMarker::ServerSideValidation,
                ValidationMarker::ErrorHandling,
                ValidationMarker::RegexValidation,
            ]
        );
    }

    #[test]
    fn test_non_form_classes() {
        let action = "package a;\npublic class WelcomeAction extends Action { private String x; }";
        let unit = scan_logic_unit("A.java", action).unwrap();
        assert!(!unit.is_form_bean);
        assert!(unit.properties.is_empty());

        assert!(scan_logic_unit("B.java", "interface Nothing {}").is_none());
    }

    #[test]
    fn test_merge_matches_qualified_then_simple_name() {
        let mut beans = vec![
            FormBean::new("applicantForm", "com.trucklease.beans.ApplicantForm"),
            FormBean::new("vehicleForm", "VehicleForm"),
            FormBean::new("orphanForm", "com.trucklease.beans.OrphanForm"),
        ];
        let provider = InMemoryProvider::new()
            .with_file("app/src/main/java/com/trucklease/beans/ApplicantForm.java", APPLICANT_FORM)
            .with_file(
                "app/src/main/java/com/trucklease/beans/VehicleForm.java",
                "package com.trucklease.beans;\npublic class VehicleForm extends ValidatorForm {\n  private String preferredMake;\n}\n",
            );
        let mut diags = Diagnostics::new();
        let units = analyze_logic_units(
            &provider,
            Path::new("app"),
            &FerryConfig::default(),
            &mut beans,
            &mut diags,
        );
        assert_eq!(units.len(), 2);
        assert_eq!(beans[0].properties.len(), 4);
        assert_eq!(beans[1].properties, vec!["preferredMake"]);
        assert!(beans[1].validations.is_empty());
        assert!(beans[2].properties.is_empty());
        assert!(diags.is_empty());
    }
}
