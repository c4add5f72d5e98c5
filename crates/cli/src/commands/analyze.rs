use std::path::{Path, PathBuf};

use ferry_core::{Diagnostic, Diagnostics, FerryConfig, FerryError, FileSystemProvider, Pipeline, Stage};
use ferry_interchange::{
    save_analysis, save_intent, AnalysisReport, MigrationIntent, ANALYSIS_FILE, INTENT_FILE,
};
use serde::Serialize;

use crate::{fail, print_json, OutputFormat};

/// Counts printed after an analysis run.
#[derive(Debug, Serialize)]
pub(crate) struct AnalysisSummary {
    pub root: String,
    pub action_mappings: usize,
    pub form_beans: usize,
    pub pages: usize,
    pub components: usize,
    pub endpoints: usize,
    pub routes: usize,
    pub state_management: String,
    pub validation_rules: usize,
    pub artifacts: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisSummary {
    pub fn new(
        root: &Path,
        analysis: &AnalysisReport,
        intent: &MigrationIntent,
        diagnostics: &Diagnostics,
        artifacts: &[PathBuf],
    ) -> Self {
        AnalysisSummary {
            root: root.display().to_string(),
            action_mappings: analysis.action_mappings.len(),
            form_beans: analysis.form_beans.len(),
            pages: analysis.view_pages.len(),
            components: intent.components.len(),
            endpoints: intent.endpoints.len(),
            routes: intent.routing.len(),
            state_management: intent.state_management.solution.clone(),
            validation_rules: intent.validation_rules.len(),
            artifacts: artifacts.iter().map(|p| p.display().to_string()).collect(),
            diagnostics: diagnostics.iter().cloned().collect(),
        }
    }

    pub fn print_text(&self) {
        println!("analyzed {}", self.root);
        println!("  action mappings:  {}", self.action_mappings);
        println!("  form beans:       {}", self.form_beans);
        println!("  pages:            {}", self.pages);
        println!("  components:       {}", self.components);
        println!("  endpoints:        {}", self.endpoints);
        println!("  routes:           {}", self.routes);
        println!("  state management: {}", self.state_management);
        println!("  validation rules: {}", self.validation_rules);
        for artifact in &self.artifacts {
            println!("wrote {}", artifact);
        }
        if self.diagnostics.is_empty() {
            println!("no diagnostics");
        } else {
            println!("{} diagnostic(s):", self.diagnostics.len());
            for diagnostic in &self.diagnostics {
                println!("  {}", diagnostic);
            }
        }
    }
}

/// Write both JSON artifacts under `out`, returning their paths.
pub(crate) fn write_artifacts(
    out: &Path,
    analysis: &AnalysisReport,
    intent: &MigrationIntent,
) -> Result<Vec<PathBuf>, FerryError> {
    std::fs::create_dir_all(out).map_err(|e| FerryError::output_write(out, e))?;
    let analysis_path = out.join(ANALYSIS_FILE);
    let intent_path = out.join(INTENT_FILE);
    save_analysis(analysis, &analysis_path)?;
    save_intent(intent, &intent_path)?;
    Ok(vec![analysis_path, intent_path])
}

/// The intent is present once the pipeline has reached `Synthesized`.
pub(crate) fn synthesized<'p>(pipeline: &'p Pipeline<'_>) -> Result<&'p MigrationIntent, FerryError> {
    pipeline.intent().ok_or(FerryError::InvalidStage {
        current: pipeline.stage().as_str(),
        requested: Stage::Synthesized.as_str(),
    })
}

pub(crate) fn cmd_analyze(root: &Path, out: &Path, config: FerryConfig, output: OutputFormat, quiet: bool) {
    let provider = FileSystemProvider;
    let mut pipeline = Pipeline::new(&provider, root, config);
    if let Err(e) = pipeline.run_until(Stage::Synthesized) {
        fail(&e, output, quiet);
    }

    let summary = synthesized(&pipeline).and_then(|intent| {
        let artifacts = write_artifacts(out, pipeline.analysis(), intent)?;
        Ok(AnalysisSummary::new(
            root,
            pipeline.analysis(),
            intent,
            pipeline.diagnostics(),
            &artifacts,
        ))
    });
    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => fail(&e, output, quiet),
    };

    match output {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            if !quiet {
                summary.print_text();
            }
        }
    }
}
