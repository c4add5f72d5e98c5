//! ConfigExtractor: route/action and form-bean descriptors.
//!
//! The route/action descriptor is the structural backbone of the run. A
//! missing descriptor degrades to empty sequences with a diagnostic; a
//! descriptor that exists but cannot be parsed aborts the run.
//!
//! The deployment descriptor is only consulted for the handler extension
//! (`*.do` servlet mapping). Problems with it are never fatal.

use std::path::Path;

use indexmap::IndexMap;
use roxmltree::{Document, Node, ParsingOptions};

use ferry_interchange::{ActionMapping, FormBean};

use crate::config::FerryConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::FerryError;
use crate::naming::strip_handler_suffix;
use crate::source::SourceProvider;

const ROOT_ELEMENT: &str = "struts-config";

/// Everything the ConfigExtractor produces.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorExtraction {
    pub action_mappings: Vec<ActionMapping>,
    pub form_beans: Vec<FormBean>,
    /// Handler extension stripped from action paths, e.g. `.do`.
    pub handler_suffix: String,
}

/// Run the ConfigExtractor against the application rooted at `root`.
pub fn extract_descriptors(
    provider: &dyn SourceProvider,
    root: &Path,
    config: &FerryConfig,
    diagnostics: &mut Diagnostics,
) -> Result<DescriptorExtraction, FerryError> {
    let handler_suffix = resolve_handler_suffix(provider, root, config, diagnostics);

    let rel = &config.layout.descriptor;
    let path = root.join(rel);
    if !provider.exists(&path) {
        diagnostics.push(
            DiagnosticKind::MissingArtifact,
            rel,
            "route/action descriptor not found; continuing with no actions or form beans",
        );
        return Ok(DescriptorExtraction {
            action_mappings: Vec::new(),
            form_beans: Vec::new(),
            handler_suffix,
        });
    }

    let text = provider
        .read_source(&path)
        .map_err(|e| FerryError::MalformedDescriptor {
            path: rel.clone(),
            message: e.to_string(),
        })?;
    let (actions, form_beans) =
        parse_struts_config(&text).map_err(|message| FerryError::MalformedDescriptor {
            path: rel.clone(),
            message,
        })?;
    let action_mappings = dedupe_actions(actions, &handler_suffix, rel, diagnostics);

    tracing::info!(
        actions = action_mappings.len(),
        form_beans = form_beans.len(),
        suffix = %handler_suffix,
        "extracted descriptors"
    );
    Ok(DescriptorExtraction {
        action_mappings,
        form_beans,
        handler_suffix,
    })
}

fn parse_xml(text: &str) -> Result<Document<'_>, String> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options).map_err(|e| e.to_string())
}

fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}

fn child_elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| n.has_tag_name(tag))
}

/// Parse descriptor text into action mappings and form beans, in document
/// order. Form beans come back with empty `properties`/`validations`.
pub fn parse_struts_config(text: &str) -> Result<(Vec<ActionMapping>, Vec<FormBean>), String> {
    let doc = parse_xml(text)?;
    let root = doc.root_element();
    if !root.has_tag_name(ROOT_ELEMENT) {
        return Err(format!(
            "expected <{}> root element, found <{}>",
            ROOT_ELEMENT,
            root.tag_name().name()
        ));
    }

    let form_beans = child_elements(root, "form-beans")
        .flat_map(|section| child_elements(section, "form-bean"))
        .map(|bean| {
            FormBean::new(
                bean.attribute("name").unwrap_or_default(),
                bean.attribute("type").unwrap_or_default(),
            )
        })
        .collect();

    let actions = child_elements(root, "action-mappings")
        .flat_map(|section| child_elements(section, "action"))
        .map(parse_action)
        .collect();

    Ok((actions, form_beans))
}

fn parse_action(action: Node<'_, '_>) -> ActionMapping {
    let mut forwards = IndexMap::new();
    for forward in child_elements(action, "forward") {
        let name = forward.attribute("name").unwrap_or_default().to_string();
        let path = forward.attribute("path").unwrap_or_default().to_string();
        forwards.entry(name).or_insert(path);
    }
    ActionMapping {
        path: action.attribute("path").unwrap_or_default().to_string(),
        handler_type: action.attribute("type").unwrap_or_default().to_string(),
        form_name: attr(action, "name"),
        scope: attr(action, "scope"),
        validate: action
            .attribute("validate")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
        input_path: attr(action, "input"),
        forwards,
    }
}

/// Keep the first action for each stripped path.
fn dedupe_actions(
    actions: Vec<ActionMapping>,
    suffix: &str,
    descriptor: &Path,
    diagnostics: &mut Diagnostics,
) -> Vec<ActionMapping> {
    let mut seen: Vec<String> = Vec::with_capacity(actions.len());
    let mut kept = Vec::with_capacity(actions.len());
    for action in actions {
        let stripped = strip_handler_suffix(&action.path, suffix).to_string();
        if seen.contains(&stripped) {
            diagnostics.push(
                DiagnosticKind::DuplicateAction,
                descriptor,
                format!(
                    "action '{}' repeats endpoint '{}'; keeping the first definition",
                    action.path, stripped
                ),
            );
            continue;
        }
        seen.push(stripped);
        kept.push(action);
    }
    kept
}

// ── Deployment descriptor ───────────────────────────────────────────────────

fn resolve_handler_suffix(
    provider: &dyn SourceProvider,
    root: &Path,
    config: &FerryConfig,
    diagnostics: &mut Diagnostics,
) -> String {
    let fallback = config.extraction.handler_suffix.clone();
    let rel = &config.layout.deployment_descriptor;
    let path = root.join(rel);
    if !provider.exists(&path) {
        tracing::debug!(path = %rel.display(), "no deployment descriptor; using configured suffix");
        return fallback;
    }

    let found = provider
        .read_source(&path)
        .map_err(|e| e.to_string())
        .and_then(|text| discover_handler_suffix(&text));
    match found {
        Ok(Some(suffix)) => suffix,
        Ok(None) => fallback,
        Err(message) => {
            diagnostics.push(
                DiagnosticKind::MissingArtifact,
                rel,
                format!("unusable deployment descriptor ({}); using '{}'", message, fallback),
            );
            fallback
        }
    }
}

/// First extension mapping (`*.do` → `.do`) among the servlet mappings.
pub fn discover_handler_suffix(text: &str) -> Result<Option<String>, String> {
    let doc = parse_xml(text)?;
    let suffix = doc
        .descendants()
        .filter(|n| n.has_tag_name("servlet-mapping"))
        .flat_map(|mapping| mapping.children().filter(|n| n.has_tag_name("url-pattern")))
        .filter_map(|pattern| pattern.text())
        .map(str::trim)
        .find_map(|pattern| {
            pattern
                .strip_prefix('*')
                .filter(|ext| ext.starts_with('.') && ext.len() > 1)
                .map(str::to_string)
        });
    Ok(suffix)
}
