use ferry_interchange::{ApiEndpointSpec, HttpMethod, MigrationIntent};

use super::Domain;
use crate::fields::FieldRule;
use crate::template::{ts_string, CodeWriter};

/// Request-body validators for a POST endpoint whose form bean has rules.
fn body_chains(endpoint: &ApiEndpointSpec, intent: &MigrationIntent) -> Vec<String> {
    if endpoint.method != HttpMethod::Post || !endpoint.validation_required {
        return Vec::new();
    }
    endpoint
        .form_bean
        .as_ref()
        .and_then(|bean| intent.validation_rules.get(bean))
        .map(|rule| {
            rule.fields
                .iter()
                .map(|field| FieldRule::for_field(field).body_chain(field))
                .collect()
        })
        .unwrap_or_default()
}

/// Generate src/routes/<domain>.ts: a router factory over the domain's
/// controller.
pub(super) fn route_module(domain: &Domain<'_>, intent: &MigrationIntent) -> String {
    let ty = domain.type_name();
    let chains: Vec<Vec<String>> = domain
        .handlers
        .iter()
        .map(|h| body_chains(h.endpoint, intent))
        .collect();
    let validates = chains.iter().any(|c| !c.is_empty());

    let mut w = CodeWriter::new();
    w.line("import { Router } from 'express';");
    if validates {
        w.line("import { body } from 'express-validator';");
    }
    w.line(format!(
        "import {{ {ty}Controller }} from '../controllers/{}Controller';",
        domain.ident
    ));
    if validates {
        w.line("import { validateRequest } from '../middleware/validation';");
    }
    w.blank();
    w.block(
        format!("export const create{ty}Router = (controller: {ty}Controller): Router => {{"),
        "};",
        |w| {
            w.line("const router = Router();");
            w.blank();
            for (handler, chain) in domain.handlers.iter().zip(&chains) {
                let verb = handler.endpoint.method.verb();
                let route = ts_string(handler.route);
                if chain.is_empty() {
                    w.line(format!(
                        "router.{verb}({route}, controller.{});",
                        handler.method_name
                    ));
                    continue;
                }
                w.block(format!("router.{verb}("), ");", |w| {
                    w.line(format!("{route},"));
                    w.block("[", "],", |w| {
                        for validator in chain {
                            w.line(format!("{validator},"));
                        }
                    });
                    w.line("validateRequest,");
                    w.line(format!("controller.{}", handler.method_name));
                });
            }
            w.blank();
            w.line("return router;");
        },
    );
    w.finish()
}
