use std::path::Path;

use ferry_codegen::{BackEndEmitter, FrontEndEmitter};
use ferry_core::{FerryConfig, FerryError, Pipeline, Stage, WriteReport};
use ferry_interchange::load_intent;
use serde::Serialize;

use crate::{fail, print_json, OutputFormat};

#[derive(Debug, Serialize)]
pub(crate) struct TreeSummary<'a> {
    pub dir: String,
    pub written: usize,
    pub removed: &'a [std::path::PathBuf],
}

impl<'a> TreeSummary<'a> {
    pub fn new(dir: &Path, report: Option<&'a WriteReport>) -> Self {
        TreeSummary {
            dir: dir.display().to_string(),
            written: report.map_or(0, |r| r.written.len()),
            removed: report.map(|r| r.removed.as_slice()).unwrap_or_default(),
        }
    }

    pub fn print_text(&self, label: &str) {
        println!("{} files in {}: {} written", label, self.dir, self.written);
        for path in self.removed {
            println!("removed stale {}", path.display());
        }
    }
}

/// Progress printer for emitted files: one `wrote <path>` line each, text
/// mode only.
pub(crate) fn progress(output: OutputFormat, quiet: bool) -> impl FnMut(&Path) {
    let show = output == OutputFormat::Text && !quiet;
    move |path: &Path| {
        if show {
            println!("wrote {}", path.display());
        }
    }
}

pub(crate) fn cmd_generate(
    intent_path: &Path,
    frontend_dir: &Path,
    backend_dir: &Path,
    config: FerryConfig,
    output: OutputFormat,
    quiet: bool,
) {
    let intent = match load_intent(intent_path) {
        Ok(intent) => intent,
        Err(e) => fail(&FerryError::from(e), output, quiet),
    };
    tracing::info!(
        intent = %intent_path.display(),
        components = intent.components.len(),
        endpoints = intent.endpoints.len(),
        "loaded migration intent"
    );

    let frontend = FrontEndEmitter::new(config.frontend.clone());
    let backend = BackEndEmitter::new(config.backend.clone());
    let mut pipeline = Pipeline::from_intent(intent, config)
        .with_frontend(&frontend, frontend_dir)
        .with_backend(&backend, backend_dir)
        .with_progress(progress(output, quiet));
    if let Err(e) = pipeline.run_until(Stage::BackEndEmitted) {
        fail(&e, output, quiet);
    }

    let front = TreeSummary::new(frontend_dir, pipeline.frontend_report());
    let back = TreeSummary::new(backend_dir, pipeline.backend_report());
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "frontend": front,
            "backend": back,
        })),
        OutputFormat::Text => {
            if !quiet {
                front.print_text("front-end");
                back.print_text("back-end");
            }
        }
    }
}
