//! ViewExtractor: scans view templates for forms, inputs, navigation and
//! embedded-logic markers.
//!
//! This is a pattern scanner over template text, not a template parser.
//! Tags split across unusual constructs (a `>` inside a scriptlet attribute,
//! tags assembled at runtime) are missed, and commented-out markup is still
//! reported. Treat the output as best-effort structure.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use ferry_interchange::{InputKind, LogicMarker, ViewInput, ViewPage};

use crate::config::FerryConfig;
use crate::diagnostics::Diagnostics;
use crate::scan::scan_tree;
use crate::source::SourceProvider;

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title>(.*?)</title>").expect("title regex"));
static FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<html:form\b[^>]*?\baction="([^"]*)""#).expect("form regex"));
static INPUT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<html:(text|select|checkbox|textarea|radio)\b([^>]*)>").expect("input regex")
});
static NAV_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<html:(link|submit)\b([^>]*)>").expect("navigation regex"));
static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\b([A-Za-z][\w-]*)\s*=\s*"([^"]*)""#).expect("attribute regex"));

/// Run the ViewExtractor over the configured view directory.
pub fn extract_views(
    provider: &dyn SourceProvider,
    root: &Path,
    config: &FerryConfig,
    diagnostics: &mut Diagnostics,
) -> Vec<ViewPage> {
    let pages = scan_tree(
        provider,
        root,
        &config.layout.views,
        "jsp",
        config.extraction.parallel,
        diagnostics,
        |rel, text| Ok(Some(scan_view(rel, text))),
    );
    tracing::info!(pages = pages.len(), "extracted view pages");
    pages
}

fn tag_attribute<'t>(attrs: &'t str, name: &str) -> Option<&'t str> {
    ATTRIBUTE
        .captures_iter(attrs)
        .find(|c| &c[1] == name)
        .and_then(|c| c.get(2))
        .map(|m| m.as_str())
}

/// Scan one template. `path` is root-relative and becomes [`ViewPage::path`].
pub fn scan_view(path: &str, text: &str) -> ViewPage {
    let mut page = ViewPage {
        path: path.to_string(),
        title: String::new(),
        forms: FORM.captures_iter(text).map(|c| c[1].to_string()).collect(),
        inputs: Vec::new(),
        navigation: Vec::new(),
        logic_markers: BTreeSet::new(),
    };
    page.title = TITLE
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| page.stem().to_string());

    for tag in INPUT_TAG.captures_iter(text) {
        let Some(kind) = InputKind::from_tag(&tag[1]) else {
            continue;
        };
        let attrs = tag.get(2).map_or("", |m| m.as_str());
        let Some(property) = tag_attribute(attrs, "property") else {
            continue;
        };
        page.inputs.push(ViewInput {
            property: property.to_string(),
            kind,
            css_class: tag_attribute(attrs, "styleClass").unwrap_or_default().to_string(),
        });
    }

    for tag in NAV_TAG.captures_iter(text) {
        let attrs = tag.get(2).map_or("", |m| m.as_str());
        let target = match &tag[1] {
            "link" => tag_attribute(attrs, "action"),
            _ => tag_attribute(attrs, "value"),
        };
        if let Some(target) = target {
            page.navigation.push(target.to_string());
        }
    }

    if text.contains("<logic:") {
        page.logic_markers.insert(LogicMarker::ConditionalLogic);
    }
    if text.contains("<bean:") {
        page.logic_markers.insert(LogicMarker::DataDisplay);
    }
    if text.contains("session.getAttribute") {
        page.logic_markers.insert(LogicMarker::SessionManagement);
    }
    page
}
