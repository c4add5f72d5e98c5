//! The migration pipeline as an explicit linear state machine.
//!
//! ```text
//! Pending → ConfigExtracted → ViewsExtracted → LogicAnalyzed → Synthesized
//!         → FrontEndEmitted → BackEndEmitted
//! ```
//!
//! [`Pipeline::step`] runs exactly one stage. A fatal error moves the
//! pipeline to [`Stage::Failed`]; every later step returns an error of the
//! same kind. Recoverable conditions accumulate in [`Pipeline::diagnostics`].
//! A generator-only run starts at `Synthesized` from a loaded intent.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use ferry_interchange::{AnalysisReport, MigrationIntent};

use crate::config::FerryConfig;
use crate::descriptor::extract_descriptors;
use crate::diagnostics::Diagnostics;
use crate::emitter::Emitter;
use crate::error::FerryError;
use crate::logic_units::analyze_logic_units;
use crate::output::WriteReport;
use crate::source::SourceProvider;
use crate::synthesize::{synthesize, SynthesisOptions};
use crate::views::extract_views;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Pending,
    ConfigExtracted,
    ViewsExtracted,
    LogicAnalyzed,
    Synthesized,
    FrontEndEmitted,
    BackEndEmitted,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Pending => "pending",
            Stage::ConfigExtracted => "config_extracted",
            Stage::ViewsExtracted => "views_extracted",
            Stage::LogicAnalyzed => "logic_analyzed",
            Stage::Synthesized => "synthesized",
            Stage::FrontEndEmitted => "front_end_emitted",
            Stage::BackEndEmitted => "back_end_emitted",
            Stage::Failed => "failed",
        }
    }

    /// The stage a successful step reaches from here.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Pending => Some(Stage::ConfigExtracted),
            Stage::ConfigExtracted => Some(Stage::ViewsExtracted),
            Stage::ViewsExtracted => Some(Stage::LogicAnalyzed),
            Stage::LogicAnalyzed => Some(Stage::Synthesized),
            Stage::Synthesized => Some(Stage::FrontEndEmitted),
            Stage::FrontEndEmitted => Some(Stage::BackEndEmitted),
            Stage::BackEndEmitted | Stage::Failed => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct EmitTarget<'a> {
    emitter: &'a dyn Emitter,
    out_dir: PathBuf,
    report: Option<WriteReport>,
}

pub struct Pipeline<'a> {
    provider: Option<&'a dyn SourceProvider>,
    root: PathBuf,
    config: FerryConfig,
    stage: Stage,
    diagnostics: Diagnostics,
    analysis: AnalysisReport,
    handler_suffix: String,
    intent: Option<MigrationIntent>,
    frontend: Option<EmitTarget<'a>>,
    backend: Option<EmitTarget<'a>>,
    progress: Option<Box<dyn FnMut(&Path) + 'a>>,
    failure: Option<(&'static str, String)>,
}

impl<'a> Pipeline<'a> {
    /// A full run over the legacy application at `root`.
    pub fn new(provider: &'a dyn SourceProvider, root: impl Into<PathBuf>, config: FerryConfig) -> Self {
        let handler_suffix = config.extraction.handler_suffix.clone();
        Pipeline {
            provider: Some(provider),
            root: root.into(),
            config,
            stage: Stage::Pending,
            diagnostics: Diagnostics::new(),
            analysis: AnalysisReport::default(),
            handler_suffix,
            intent: None,
            frontend: None,
            backend: None,
            progress: None,
            failure: None,
        }
    }

    /// A generator-only run starting at [`Stage::Synthesized`].
    pub fn from_intent(intent: MigrationIntent, config: FerryConfig) -> Self {
        let handler_suffix = config.extraction.handler_suffix.clone();
        Pipeline {
            provider: None,
            root: PathBuf::new(),
            config,
            stage: Stage::Synthesized,
            diagnostics: Diagnostics::new(),
            analysis: AnalysisReport::default(),
            handler_suffix,
            intent: Some(intent),
            frontend: None,
            backend: None,
            progress: None,
            failure: None,
        }
    }

    /// Emit the front-end tree to `out_dir` during the front-end stage.
    /// Without one, that stage is a no-op.
    pub fn with_frontend(mut self, emitter: &'a dyn Emitter, out_dir: impl Into<PathBuf>) -> Self {
        self.frontend = Some(EmitTarget {
            emitter,
            out_dir: out_dir.into(),
            report: None,
        });
        self
    }

    pub fn with_backend(mut self, emitter: &'a dyn Emitter, out_dir: impl Into<PathBuf>) -> Self {
        self.backend = Some(EmitTarget {
            emitter,
            out_dir: out_dir.into(),
            report: None,
        });
        self
    }

    /// Called with each file path as the emitters write it.
    pub fn with_progress(mut self, progress: impl FnMut(&Path) + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn analysis(&self) -> &AnalysisReport {
        &self.analysis
    }

    pub fn intent(&self) -> Option<&MigrationIntent> {
        self.intent.as_ref()
    }

    pub fn handler_suffix(&self) -> &str {
        &self.handler_suffix
    }

    pub fn frontend_report(&self) -> Option<&WriteReport> {
        self.frontend.as_ref().and_then(|t| t.report.as_ref())
    }

    pub fn backend_report(&self) -> Option<&WriteReport> {
        self.backend.as_ref().and_then(|t| t.report.as_ref())
    }

    /// Hand back the accumulated results.
    pub fn into_parts(self) -> (AnalysisReport, Option<MigrationIntent>, Diagnostics) {
        (self.analysis, self.intent, self.diagnostics)
    }

    /// Run exactly one stage and return the stage reached.
    pub fn step(&mut self) -> Result<Stage, FerryError> {
        if let Some((kind, message)) = &self.failure {
            return Err(FerryError::Halted {
                kind: *kind,
                message: message.clone(),
            });
        }
        let Some(next) = self.stage.next() else {
            return Err(FerryError::InvalidStage {
                current: self.stage.as_str(),
                requested: "step",
            });
        };

        match self.run_stage(next) {
            Ok(()) => {
                tracing::debug!(stage = %next, "pipeline advanced");
                self.stage = next;
                Ok(next)
            }
            Err(e) => {
                tracing::debug!(stage = %next, error = %e, "pipeline failed");
                self.failure = Some((e.kind(), e.to_string()));
                self.stage = Stage::Failed;
                Err(e)
            }
        }
    }

    /// Step until `target` is reached.
    pub fn run_until(&mut self, target: Stage) -> Result<(), FerryError> {
        while self.stage != target {
            if self.stage != Stage::Failed && self.stage > target {
                return Err(FerryError::InvalidStage {
                    current: self.stage.as_str(),
                    requested: target.as_str(),
                });
            }
            self.step()?;
        }
        Ok(())
    }

    fn provider(&self, requested: Stage) -> Result<&'a dyn SourceProvider, FerryError> {
        self.provider.ok_or(FerryError::InvalidStage {
            current: self.stage.as_str(),
            requested: requested.as_str(),
        })
    }

    fn run_stage(&mut self, next: Stage) -> Result<(), FerryError> {
        match next {
            Stage::ConfigExtracted => {
                let provider = self.provider(next)?;
                if !provider.is_dir(&self.root) {
                    return Err(FerryError::InputRootMissing {
                        path: self.root.clone(),
                    });
                }
                tracing::info!(root = %self.root.display(), "extracting descriptors");
                let extraction =
                    extract_descriptors(provider, &self.root, &self.config, &mut self.diagnostics)?;
                self.analysis.action_mappings = extraction.action_mappings;
                self.analysis.form_beans = extraction.form_beans;
                self.handler_suffix = extraction.handler_suffix;
            }
            Stage::ViewsExtracted => {
                let provider = self.provider(next)?;
                self.analysis.view_pages =
                    extract_views(provider, &self.root, &self.config, &mut self.diagnostics);
            }
            Stage::LogicAnalyzed => {
                let provider = self.provider(next)?;
                analyze_logic_units(
                    provider,
                    &self.root,
                    &self.config,
                    &mut self.analysis.form_beans,
                    &mut self.diagnostics,
                );
            }
            Stage::Synthesized => {
                let options = SynthesisOptions {
                    handler_suffix: self.handler_suffix.clone(),
                    collision_policy: self.config.extraction.collision_policy,
                };
                let intent = synthesize(
                    &self.analysis.action_mappings,
                    &self.analysis.form_beans,
                    &self.analysis.view_pages,
                    &options,
                    &mut self.diagnostics,
                )?;
                self.intent = Some(intent);
            }
            Stage::FrontEndEmitted => {
                if let Some(target) = self.frontend.as_mut() {
                    emit_target(target, self.intent.as_ref(), &mut self.progress)?;
                }
            }
            Stage::BackEndEmitted => {
                if let Some(target) = self.backend.as_mut() {
                    emit_target(target, self.intent.as_ref(), &mut self.progress)?;
                }
            }
            Stage::Pending | Stage::Failed => {}
        }
        Ok(())
    }
}

fn emit_target(
    target: &mut EmitTarget<'_>,
    intent: Option<&MigrationIntent>,
    progress: &mut Option<Box<dyn FnMut(&Path) + '_>>,
) -> Result<(), FerryError> {
    let intent = intent.ok_or(FerryError::Emit {
        emitter: target.emitter.name(),
        message: "no migration intent available".to_string(),
    })?;
    let mut noop = |_: &Path| {};
    let on_write: &mut dyn FnMut(&Path) = match progress {
        Some(callback) => callback.as_mut(),
        None => &mut noop,
    };
    let report = target.emitter.emit(intent, &target.out_dir, on_write)?;
    target.report = Some(report);
    Ok(())
}
