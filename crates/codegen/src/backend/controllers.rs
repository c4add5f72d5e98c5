use ferry_interchange::{ApiEndpointSpec, HttpMethod};

use super::repository::entity_type;
use super::{Domain, Handler};
use crate::template::{ts_string, CodeWriter};

/// Where a successful submission sends the client, keyed by a substring of
/// the endpoint path. First match wins.
const NEXT_STEPS: [(&str, &str); 4] = [
    ("applicant", "/vehicle-preference"),
    ("vehicle", "/financial-info"),
    ("financial", "/background-check"),
    ("background", "/lease-review"),
];

/// Next step after a POST: looked up only when the action had a `success`
/// forward, `/` otherwise.
pub(crate) fn next_step(endpoint: &ApiEndpointSpec) -> &'static str {
    if !endpoint.responses.iter().any(|r| r == "success") {
        return "/";
    }
    let path = endpoint.path.to_ascii_lowercase();
    NEXT_STEPS
        .iter()
        .find(|(key, _)| path.contains(key))
        .map_or("/", |(_, next)| *next)
}

fn post_handler(w: &mut CodeWriter, handler: &Handler<'_>) {
    let endpoint = handler.endpoint;
    w.block(
        format!(
            "{}: async (req: Request, res: Response, next: NextFunction) => {{",
            handler.method_name
        ),
        "},",
        |w| {
            w.block("try {", "} catch (error) {", |w| {
                w.line("const data = await repository.create(req.body);");
                w.block("res.status(201).json({", "});", |w| {
                    w.line("success: true,");
                    w.line(format!(
                        "message: {},",
                        ts_string(&format!("{} {} processed", endpoint.method, endpoint.path))
                    ));
                    w.line("data,");
                    w.line(format!("nextStep: {},", ts_string(next_step(endpoint))));
                });
            });
            w.indented(|w| {
                w.line("next(error);");
            });
            w.line("}");
        },
    );
}

fn get_handler(w: &mut CodeWriter, handler: &Handler<'_>) {
    w.block(
        format!(
            "{}: async (_req: Request, res: Response, next: NextFunction) => {{",
            handler.method_name
        ),
        "},",
        |w| {
            w.block("try {", "} catch (error) {", |w| {
                w.line("const data = await repository.findAll();");
                w.line("res.json({ success: true, data });");
            });
            w.indented(|w| {
                w.line("next(error);");
            });
            w.line("}");
        },
    );
}

/// Generate src/controllers/<domain>Controller.ts: a factory closing over the
/// injected repository, one handler per endpoint.
pub(super) fn controller_module(domain: &Domain<'_>) -> String {
    let ty = domain.type_name();
    let record = format!("{}Data", entity_type(domain.entity));

    let mut w = CodeWriter::new();
    w.line("import { NextFunction, Request, Response } from 'express';");
    w.line("import { Repository } from '../repository/Repository';");
    w.line(format!(
        "import {{ {record} }} from '../models/{}';",
        domain.entity
    ));
    w.blank();
    w.block(
        format!("export const create{ty}Controller = (repository: Repository<{record}>) => ({{"),
        "});",
        |w| {
            for (i, handler) in domain.handlers.iter().enumerate() {
                if i > 0 {
                    w.blank();
                }
                match handler.endpoint.method {
                    HttpMethod::Post => post_handler(w, handler),
                    HttpMethod::Get => get_handler(w, handler),
                }
            }
        },
    );
    w.blank();
    w.line(format!(
        "export type {ty}Controller = ReturnType<typeof create{ty}Controller>;"
    ));
    w.finish()
}
