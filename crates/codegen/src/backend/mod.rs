//! BackEndEmitter: an Express + TypeScript service from a migration intent.
//!
//! Endpoints are grouped by their first path segment (the *domain*). Each
//! domain gets one route module and one controller module; controllers are
//! factories over an injected `Repository`, so the in-memory stand-in can be
//! replaced without touching them.
//!
//! ```text
//! package.json  tsconfig.json
//! src/server.ts
//! src/middleware/validation.ts  src/middleware/auth.ts
//! src/repository/Repository.ts  src/repository/InMemoryRepository.ts
//! src/models/<entity>.ts               one per fixed entity
//! src/routes/<domain>.ts  src/controllers/<domain>Controller.ts
//! ```

mod controllers;
mod middleware;
mod project;
mod repository;
mod routes;

use ferry_core::config::BackendConfig;
use ferry_core::naming::camel_case;
use ferry_core::{Emitter, FerryError, GeneratedFile};
use ferry_interchange::{ApiEndpointSpec, MigrationIntent};

use crate::template::LocalNames;

pub const EMITTER_NAME: &str = "backend";

/// Persisted entities, matched by substring against the domain. The last one
/// is the fallback.
pub(crate) const ENTITIES: [&str; 6] = [
    "applicant",
    "vehicle",
    "financial",
    "background",
    "lease",
    "record",
];

/// Module name of endpoints with no first segment.
const ROOT_DOMAIN: &str = "general";

/// Emits the back-end tree.
#[derive(Debug, Clone, Default)]
pub struct BackEndEmitter {
    config: BackendConfig,
}

impl BackEndEmitter {
    pub fn new(config: BackendConfig) -> Self {
        BackEndEmitter { config }
    }
}

impl Emitter for BackEndEmitter {
    fn name(&self) -> &'static str {
        EMITTER_NAME
    }

    fn render(&self, intent: &MigrationIntent) -> Result<Vec<GeneratedFile>, FerryError> {
        let domains = group_domains(&intent.endpoints);

        let mut files = vec![
            GeneratedFile::new("package.json", project::package_json(&self.config)),
            GeneratedFile::new("tsconfig.json", project::tsconfig_json()),
            GeneratedFile::new("src/server.ts", project::server_ts(&self.config, &domains)),
            GeneratedFile::new("src/middleware/validation.ts", middleware::validation()),
            GeneratedFile::new("src/middleware/auth.ts", middleware::auth()),
            GeneratedFile::new("src/repository/Repository.ts", repository::contract()),
            GeneratedFile::new(
                "src/repository/InMemoryRepository.ts",
                repository::in_memory(),
            ),
        ];
        for entity in ENTITIES {
            files.push(GeneratedFile::new(
                format!("src/models/{entity}.ts"),
                repository::model(entity),
            ));
        }
        for domain in &domains {
            files.push(GeneratedFile::new(
                format!("src/routes/{}.ts", domain.ident),
                routes::route_module(domain, intent),
            ));
            files.push(GeneratedFile::new(
                format!("src/controllers/{}Controller.ts", domain.ident),
                controllers::controller_module(domain),
            ));
        }

        tracing::debug!(
            files = files.len(),
            domains = domains.len(),
            "rendered back-end tree"
        );
        Ok(files)
    }
}

// ── Domains ─────────────────────────────────────────────────────────

/// One endpoint with its handler name inside the domain's controller.
#[derive(Debug)]
pub(crate) struct Handler<'a> {
    pub endpoint: &'a ApiEndpointSpec,
    /// Path relative to the domain mount point, always starting with `/`.
    pub route: &'a str,
    pub method_name: String,
}

/// A group of endpoints sharing a first path segment.
#[derive(Debug)]
pub(crate) struct Domain<'a> {
    /// camelCase module identifier, unique across domains.
    pub ident: String,
    /// Where server.ts mounts the domain router.
    pub mount: String,
    pub entity: &'static str,
    pub handlers: Vec<Handler<'a>>,
}

impl Domain<'_> {
    /// `applicantInfo` → `ApplicantInfo`, for factory and type names.
    pub fn type_name(&self) -> String {
        let mut chars = self.ident.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// First entity whose name occurs in `segment`, else `record`.
pub(crate) fn entity_for(segment: &str) -> &'static str {
    let lower = segment.to_ascii_lowercase();
    ENTITIES[..ENTITIES.len() - 1]
        .iter()
        .copied()
        .find(|e| lower.contains(e))
        .unwrap_or(ENTITIES[ENTITIES.len() - 1])
}

/// Group endpoints by domain in first-appearance order.
pub(crate) fn group_domains(endpoints: &[ApiEndpointSpec]) -> Vec<Domain<'_>> {
    let mut keys: Vec<Option<&str>> = Vec::new();
    let mut members: Vec<Vec<&ApiEndpointSpec>> = Vec::new();
    for endpoint in endpoints {
        let key = endpoint.domain();
        match keys.iter().position(|k| *k == key) {
            Some(i) => members[i].push(endpoint),
            None => {
                keys.push(key);
                members.push(vec![endpoint]);
            }
        }
    }

    let mut idents = LocalNames::new();
    keys.into_iter()
        .zip(members)
        .map(|(key, endpoints)| {
            let slug = key.unwrap_or(ROOT_DOMAIN);
            let ident = idents.claim(&camel_case(slug), slug);
            let mount = match key {
                Some(segment) => format!("/api/{segment}"),
                None => "/api".to_string(),
            };

            let mut methods = LocalNames::new();
            let handlers = endpoints
                .into_iter()
                .map(|endpoint| {
                    let route = if key.is_some() { endpoint.remainder() } else { "/" };
                    let base = if route == "/" {
                        endpoint.method.verb().to_string()
                    } else {
                        camel_case(route)
                    };
                    Handler {
                        endpoint,
                        route,
                        method_name: methods.claim(&base, &endpoint.path),
                    }
                })
                .collect();

            Domain {
                ident,
                mount,
                entity: entity_for(slug),
                handlers,
            }
        })
        .collect()
}
