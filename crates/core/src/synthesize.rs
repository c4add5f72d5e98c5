//! IntentSynthesizer: merges the three extraction outputs into the
//! [`MigrationIntent`].
//!
//! A pure function of its inputs. Given the same records in the same order it
//! produces the same intent, names included.

use indexmap::IndexMap;

use ferry_interchange::{
    hints, props, ActionMapping, ApiEndpointSpec, ComponentKind, ComponentSpec, FormBean,
    HttpMethod, InputKind, LogicMarker, MigrationIntent, RouteSpec, StateManagementRecommendation,
    ValidationRuleSpec, ViewPage,
};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::FerryError;
use crate::naming::{
    component_name_for_action, component_name_for_view, strip_handler_suffix, CollisionPolicy,
    NameAllocator,
};

/// More form beans than this recommends the richer state pattern.
const RICH_STATE_THRESHOLD: usize = 3;

/// Landing-page candidates for the synthetic home route, in priority order.
const LANDING_NAMES: [&str; 3] = ["Welcome", "Index", "Home"];
const FALLBACK_LANDING: &str = "Home";
const HOME_PATH: &str = "/";

#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    pub handler_suffix: String,
    pub collision_policy: CollisionPolicy,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        SynthesisOptions {
            handler_suffix: ".do".to_string(),
            collision_policy: CollisionPolicy::Suffix,
        }
    }
}

/// Build the migration intent.
///
/// Fails only when the collision policy is `reject` and two sources derive
/// the same component name.
pub fn synthesize(
    actions: &[ActionMapping],
    form_beans: &[FormBean],
    pages: &[ViewPage],
    options: &SynthesisOptions,
    diagnostics: &mut Diagnostics,
) -> Result<MigrationIntent, FerryError> {
    let mut names = NameAllocator::new(options.collision_policy);
    let any_bean_validates = form_beans.iter().any(|b| !b.validations.is_empty());

    let mut components = Vec::with_capacity(pages.len());
    for page in pages {
        let base = component_name_for_view(&page.path);
        let allocation = names.allocate(&base, &page.path)?;
        if let Some(owner) = &allocation.collided_with {
            diagnostics.push(
                DiagnosticKind::NameCollision,
                &page.path,
                format!(
                    "component name '{}' already taken by '{}'; using '{}'",
                    base, owner, allocation.name
                ),
            );
        }
        components.push(component_for_page(page, allocation.name, any_bean_validates));
    }

    let endpoints: Vec<ApiEndpointSpec> = actions
        .iter()
        .map(|a| endpoint_for_action(a, &options.handler_suffix))
        .collect();

    let mut routing = Vec::with_capacity(actions.len() + 1);
    for action in actions {
        let path = strip_handler_suffix(&action.path, &options.handler_suffix);
        if path.is_empty() || path == HOME_PATH {
            // The synthesized home route already owns "/".
            tracing::debug!(action = %action.path, "action maps the home route; skipping");
            continue;
        }
        let wanted = component_name_for_action(&action.path, &options.handler_suffix);
        let component = if components.iter().any(|c| c.name == wanted) {
            wanted
        } else {
            let allocation = names.allocate(&wanted, &action.path)?;
            tracing::debug!(component = %allocation.name, action = %action.path, "synthesizing display component for route");
            components.push(placeholder_component(&allocation.name, &action.path));
            allocation.name
        };
        routing.push(RouteSpec {
            path: path.to_string(),
            component,
            protected: action.validate,
            redirect_rules: action.forwards.clone(),
        });
    }

    let landing = match landing_component(&components) {
        Some(name) => name,
        None => {
            let allocation = names.allocate(FALLBACK_LANDING, HOME_PATH)?;
            components.push(placeholder_component(&allocation.name, HOME_PATH));
            allocation.name
        }
    };
    routing.insert(
        0,
        RouteSpec {
            path: HOME_PATH.to_string(),
            component: landing,
            protected: false,
            redirect_rules: IndexMap::new(),
        },
    );

    let state_management = StateManagementRecommendation {
        solution: if form_beans.len() > RICH_STATE_THRESHOLD {
            hints::RICH_STATE
        } else {
            hints::LOCAL_STATE
        }
        .to_string(),
        session_strategy: hints::SESSION_STRATEGY.to_string(),
        form_state_strategy: hints::FORM_STATE_STRATEGY.to_string(),
        global_entities: form_beans.iter().map(|b| b.name.clone()).collect(),
    };

    let mut validation_rules = IndexMap::new();
    for bean in form_beans.iter().filter(|b| !b.validations.is_empty()) {
        validation_rules
            .entry(bean.name.clone())
            .or_insert_with(|| ValidationRuleSpec {
                fields: bean.properties.clone(),
                rules: bean.validations.clone(),
                suggested_library: hints::SCHEMA_LIBRARY.to_string(),
            });
    }

    let intent = MigrationIntent {
        components,
        endpoints,
        state_management,
        routing,
        validation_rules,
    };
    tracing::info!(
        components = intent.components.len(),
        endpoints = intent.endpoints.len(),
        routes = intent.routing.len(),
        validation_rules = intent.validation_rules.len(),
        "synthesized migration intent"
    );
    Ok(intent)
}

fn component_for_page(page: &ViewPage, name: String, validation_required: bool) -> ComponentSpec {
    let is_form = !page.forms.is_empty();

    // Radio groups repeat a property; each name appears once, first position kept.
    let mut state_fields: Vec<String> = Vec::with_capacity(page.inputs.len());
    for input in &page.inputs {
        if !state_fields.contains(&input.property) {
            state_fields.push(input.property.clone());
        }
    }

    let mut component_props = Vec::new();
    if page.has_marker(LogicMarker::ConditionalLogic) {
        component_props.push(props::LOADING.to_string());
    }
    if page.has_marker(LogicMarker::SessionManagement) {
        component_props.push(props::USER.to_string());
    }
    if is_form {
        component_props.push(props::ON_SUBMIT.to_string());
        component_props.push(props::ERRORS.to_string());
    }

    let mut libraries = Vec::new();
    if !page.inputs.is_empty() {
        libraries.push(hints::FORM_LIBRARY.to_string());
    }
    if page.inputs.iter().any(|i| i.kind == InputKind::Select) {
        libraries.push(hints::SELECT_WIDGET.to_string());
    }
    if page.has_marker(LogicMarker::DataDisplay) {
        libraries.push(hints::TABLE_WIDGET.to_string());
    }

    ComponentSpec {
        name,
        kind: if is_form {
            ComponentKind::Form
        } else {
            ComponentKind::Display
        },
        source_file: page.path.clone(),
        title: page.title.clone(),
        state_fields,
        validation_required,
        props: component_props,
        suggested_libraries: libraries,
    }
}

/// Display component for a route with no matching view page.
fn placeholder_component(name: &str, source: &str) -> ComponentSpec {
    ComponentSpec {
        name: name.to_string(),
        kind: ComponentKind::Display,
        source_file: source.to_string(),
        title: name.to_string(),
        state_fields: Vec::new(),
        validation_required: false,
        props: Vec::new(),
        suggested_libraries: Vec::new(),
    }
}

fn landing_component(components: &[ComponentSpec]) -> Option<String> {
    LANDING_NAMES
        .iter()
        .find_map(|wanted| components.iter().find(|c| c.name == *wanted))
        .or_else(|| components.first())
        .map(|c| c.name.clone())
}

fn endpoint_for_action(action: &ActionMapping, suffix: &str) -> ApiEndpointSpec {
    let mut middleware = Vec::new();
    if action.validate {
        middleware.push(hints::VALIDATION_MIDDLEWARE.to_string());
    }
    if action.scope.as_deref() == Some("session") {
        middleware.push(hints::SESSION_MIDDLEWARE.to_string());
    }
    middleware.push(hints::CORS_MIDDLEWARE.to_string());

    ApiEndpointSpec {
        path: strip_handler_suffix(&action.path, suffix).to_string(),
        method: if action.validate {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        },
        source_handler: action.handler_type.clone(),
        form_bean: action.form_name.clone(),
        validation_required: action.validate,
        responses: action.forwards.keys().cloned().collect(),
        suggested_middleware: middleware,
    }
}
