//! FrontEndEmitter: a Vite + React + TypeScript project from a migration
//! intent.
//!
//! Layout of the emitted tree:
//!
//! ```text
//! package.json  tsconfig.json  vite.config.ts  index.html
//! tailwind.config.js  postcss.config.js
//! src/main.tsx  src/App.tsx  src/AppRouter.tsx  src/index.css
//! src/components/ProtectedRoute.tsx
//! src/pages/<Component>.tsx            one per component
//! src/utils/validationSchemas.ts  src/utils/api.ts
//! ```

mod api;
mod page;
mod router;
mod schemas;
mod shell;

use ferry_core::config::FrontendConfig;
use ferry_core::{Emitter, FerryError, GeneratedFile};
use ferry_interchange::MigrationIntent;

use crate::template::is_identifier;

pub const EMITTER_NAME: &str = "frontend";

/// Emits the front-end tree.
#[derive(Debug, Clone, Default)]
pub struct FrontEndEmitter {
    config: FrontendConfig,
}

impl FrontEndEmitter {
    pub fn new(config: FrontendConfig) -> Self {
        FrontEndEmitter { config }
    }
}

impl Emitter for FrontEndEmitter {
    fn name(&self) -> &'static str {
        EMITTER_NAME
    }

    fn render(&self, intent: &MigrationIntent) -> Result<Vec<GeneratedFile>, FerryError> {
        check_names(intent)?;

        let title = home_component(intent)
            .map(|c| c.title.as_str())
            .unwrap_or(&self.config.package_name);

        let mut files = vec![
            GeneratedFile::new("package.json", shell::package_json(&self.config, intent)),
            GeneratedFile::new("tsconfig.json", shell::tsconfig_json()),
            GeneratedFile::new("vite.config.ts", shell::vite_config()),
            GeneratedFile::new("tailwind.config.js", shell::tailwind_config()),
            GeneratedFile::new("postcss.config.js", shell::postcss_config()),
            GeneratedFile::new("index.html", shell::index_html(title)),
            GeneratedFile::new("src/main.tsx", shell::main_tsx()),
            GeneratedFile::new("src/vite-env.d.ts", shell::vite_env()),
            GeneratedFile::new("src/App.tsx", shell::app_tsx()),
            GeneratedFile::new("src/index.css", shell::index_css()),
            GeneratedFile::new("src/components/ProtectedRoute.tsx", router::protected_route()),
            GeneratedFile::new("src/AppRouter.tsx", router::app_router(intent)),
        ];
        for component in &intent.components {
            files.push(GeneratedFile::new(
                format!("src/pages/{}.tsx", component.name),
                page::page_module(component, intent),
            ));
        }
        files.push(GeneratedFile::new(
            "src/utils/validationSchemas.ts",
            schemas::validation_schemas(intent),
        ));
        files.push(GeneratedFile::new(
            "src/utils/api.ts",
            api::api_client(intent, &self.config.api_base_url),
        ));

        tracing::debug!(files = files.len(), "rendered front-end tree");
        Ok(files)
    }
}

/// Component names become file names and identifiers, so an intent loaded
/// from disk is checked before anything is rendered.
fn check_names(intent: &MigrationIntent) -> Result<(), FerryError> {
    let mut seen = std::collections::HashSet::new();
    for component in &intent.components {
        if !is_identifier(&component.name) {
            return Err(FerryError::Emit {
                emitter: EMITTER_NAME,
                message: format!("component name '{}' is not an identifier", component.name),
            });
        }
        if !seen.insert(component.name.as_str()) {
            return Err(FerryError::Emit {
                emitter: EMITTER_NAME,
                message: format!("component '{}' is declared twice", component.name),
            });
        }
    }
    for route in &intent.routing {
        if intent.component(&route.component).is_none() {
            return Err(FerryError::Emit {
                emitter: EMITTER_NAME,
                message: format!(
                    "route '{}' names unknown component '{}'",
                    route.path, route.component
                ),
            });
        }
    }
    Ok(())
}

// ── Navigation helpers ──────────────────────────────────────────────

fn home_component(intent: &MigrationIntent) -> Option<&ferry_interchange::ComponentSpec> {
    intent
        .routing
        .iter()
        .find(|r| r.path == "/")
        .and_then(|r| intent.component(&r.component))
}

/// Drop the extension of the final path segment: `/vehicle-preference.do`
/// → `/vehicle-preference`.
fn route_path_of(target: &str) -> &str {
    let last = target.rfind('/').map_or(0, |i| i + 1);
    match target[last..].rfind('.') {
        Some(0) | None => target,
        Some(dot) => &target[..last + dot],
    }
}

/// Where a page should go next, if anywhere.
///
/// The `success` forward of the page's own route wins when it names another
/// route. The landing page falls back to the first route after home.
pub(crate) fn next_route<'a>(intent: &'a MigrationIntent, component: &str) -> Option<&'a str> {
    let is_route = |path: &str| intent.routing.iter().any(|r| r.path == path);

    let forwarded = intent
        .routing
        .iter()
        .filter(|r| r.component == component && r.path != "/")
        .filter_map(|r| r.redirect_rules.get("success"))
        .map(|target| route_path_of(target))
        .find(|path| is_route(path));
    if forwarded.is_some() {
        return forwarded;
    }

    let is_home = intent
        .routing
        .first()
        .is_some_and(|r| r.path == "/" && r.component == component);
    if !is_home {
        return None;
    }
    intent
        .routing
        .iter()
        .find(|r| r.path != "/" && r.component != component)
        .map(|r| r.path.as_str())
}
