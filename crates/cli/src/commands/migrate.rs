use std::path::Path;

use ferry_codegen::{BackEndEmitter, FrontEndEmitter};
use ferry_core::{FerryConfig, FileSystemProvider, Pipeline, Stage};

use super::analyze::{synthesized, write_artifacts, AnalysisSummary};
use super::generate::{progress, TreeSummary};
use crate::{fail, print_json, OutputFormat};

/// Analyze `root` and generate both trees under `out`:
/// `analysis/`, `frontend/` and `backend/`.
pub(crate) fn cmd_migrate(root: &Path, out: &Path, config: FerryConfig, output: OutputFormat, quiet: bool) {
    let analysis_dir = out.join("analysis");
    let frontend_dir = out.join("frontend");
    let backend_dir = out.join("backend");

    let provider = FileSystemProvider;
    let frontend = FrontEndEmitter::new(config.frontend.clone());
    let backend = BackEndEmitter::new(config.backend.clone());
    let mut pipeline = Pipeline::new(&provider, root, config)
        .with_frontend(&frontend, &frontend_dir)
        .with_backend(&backend, &backend_dir)
        .with_progress(progress(output, quiet));

    if let Err(e) = pipeline.run_until(Stage::Synthesized) {
        fail(&e, output, quiet);
    }
    let artifacts = match synthesized(&pipeline)
        .and_then(|intent| write_artifacts(&analysis_dir, pipeline.analysis(), intent))
    {
        Ok(artifacts) => artifacts,
        Err(e) => fail(&e, output, quiet),
    };
    if let Err(e) = pipeline.run_until(Stage::BackEndEmitted) {
        fail(&e, output, quiet);
    }

    let summary = match synthesized(&pipeline) {
        Ok(intent) => AnalysisSummary::new(
            root,
            pipeline.analysis(),
            intent,
            pipeline.diagnostics(),
            &artifacts,
        ),
        Err(e) => fail(&e, output, quiet),
    };
    let front = TreeSummary::new(&frontend_dir, pipeline.frontend_report());
    let back = TreeSummary::new(&backend_dir, pipeline.backend_report());
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "analysis": summary,
            "frontend": front,
            "backend": back,
        })),
        OutputFormat::Text => {
            if !quiet {
                summary.print_text();
                front.print_text("front-end");
                back.print_text("back-end");
            }
        }
    }
}
