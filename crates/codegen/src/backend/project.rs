//! package.json, tsconfig.json and the server entry point.

use ferry_core::config::BackendConfig;

use super::Domain;
use crate::template::{json_entries, json_string, ts_string, CodeWriter};

const DEPENDENCIES: [(&str, &str); 8] = [
    ("bcryptjs", "^2.4.3"),
    ("cors", "^2.8.5"),
    ("dotenv", "^16.0.0"),
    ("express", "^4.18.0"),
    ("express-rate-limit", "^6.7.0"),
    ("express-validator", "^6.14.0"),
    ("helmet", "^6.0.0"),
    ("jsonwebtoken", "^9.0.0"),
];

const DEV_DEPENDENCIES: [(&str, &str); 8] = [
    ("@types/bcryptjs", "^2.4.0"),
    ("@types/cors", "^2.8.0"),
    ("@types/express", "^4.17.0"),
    ("@types/jsonwebtoken", "^9.0.0"),
    ("@types/node", "^18.0.0"),
    ("nodemon", "^2.0.0"),
    ("ts-node", "^10.9.0"),
    ("typescript", "^4.9.0"),
];

pub(super) fn package_json(config: &BackendConfig) -> String {
    format!(
        r#"{{
  "name": {name},
  "version": "0.1.0",
  "private": true,
  "main": "dist/server.js",
  "scripts": {{
    "start": "node dist/server.js",
    "dev": "nodemon src/server.ts",
    "build": "tsc"
  }},
  "dependencies": {{
{dependencies}
  }},
  "devDependencies": {{
{dev_dependencies}
  }}
}}
"#,
        name = json_string(&config.package_name),
        dependencies = json_entries(DEPENDENCIES, 2),
        dev_dependencies = json_entries(DEV_DEPENDENCIES, 2),
    )
}

pub(super) fn tsconfig_json() -> String {
    r#"{
  "compilerOptions": {
    "target": "ES2020",
    "module": "commonjs",
    "lib": ["ES2020"],
    "outDir": "dist",
    "rootDir": "src",
    "strict": true,
    "esModuleInterop": true,
    "skipLibCheck": true,
    "forceConsistentCasingInFileNames": true,
    "resolveJsonModule": true
  },
  "include": ["src"]
}
"#
    .to_string()
}

const SERVER_MIDDLEWARE: &str = r#"app.use(helmet());
app.use(
  cors({
    origin: process.env.FRONTEND_URL ?? 'http://localhost:3000',
    credentials: true,
  })
);
app.use(
  '/api/',
  rateLimit({
    windowMs: 15 * 60 * 1000,
    max: 100,
    message: 'Too many requests from this IP, please try again later.',
  })
);
app.use(express.json({ limit: '10mb' }));
app.use(express.urlencoded({ extended: true }));

app.get('/health', (_req: Request, res: Response) => {
  res.json({ status: 'OK', timestamp: new Date().toISOString() });
});"#;

const SERVER_TAIL: &str = r#"app.use((err: Error, _req: Request, res: Response, _next: NextFunction) => {
  console.error(err.stack);
  res.status(500).json({
    success: false,
    message: 'Internal server error',
    error: process.env.NODE_ENV === 'development' ? err.message : undefined,
  });
});

app.use('*', (_req: Request, res: Response) => {
  res.status(404).json({ success: false, message: 'Route not found' });
});

app.listen(PORT, () => {
  console.log(`Server running on port ${PORT}`);
});

export default app;"#;

/// Generate src/server.ts: security middleware, one shared repository per
/// entity in use, and one mounted router per domain.
pub(super) fn server_ts(config: &BackendConfig, domains: &[Domain<'_>]) -> String {
    let mut entities: Vec<&str> = Vec::new();
    for domain in domains {
        if !entities.contains(&domain.entity) {
            entities.push(domain.entity);
        }
    }
    entities.sort_by_key(|e| super::ENTITIES.iter().position(|x| x == e));

    let mut w = CodeWriter::new();
    w.line("import express, { NextFunction, Request, Response } from 'express';");
    w.line("import cors from 'cors';");
    w.line("import helmet from 'helmet';");
    w.line("import rateLimit from 'express-rate-limit';");
    w.line("import dotenv from 'dotenv';");
    for entity in &entities {
        w.line(format!(
            "import {{ create{}Repository }} from './models/{entity}';",
            super::repository::entity_type(entity)
        ));
    }
    for domain in domains {
        let ty = domain.type_name();
        w.line(format!(
            "import {{ create{ty}Controller }} from './controllers/{}Controller';",
            domain.ident
        ));
        w.line(format!(
            "import {{ create{ty}Router }} from './routes/{}';",
            domain.ident
        ));
    }
    w.blank();
    w.line("dotenv.config();");
    w.blank();
    w.line("const app = express();");
    w.line(format!(
        "const PORT = Number(process.env.PORT ?? {});",
        config.port
    ));
    w.blank();
    w.lines(SERVER_MIDDLEWARE);

    if !entities.is_empty() {
        w.blank();
        for entity in &entities {
            w.line(format!(
                "const {entity}Repository = create{}Repository();",
                super::repository::entity_type(entity)
            ));
        }
    }
    if !domains.is_empty() {
        w.blank();
        for domain in domains {
            let ty = domain.type_name();
            w.line(format!(
                "app.use({}, create{ty}Router(create{ty}Controller({}Repository)));",
                ts_string(&domain.mount),
                domain.entity
            ));
        }
    }
    w.blank();
    w.lines(SERVER_TAIL);
    w.finish()
}
