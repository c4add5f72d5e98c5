//! ferry-interchange: records shared by the extraction, synthesis and
//! emission stages.
//!
//! Two JSON artifacts cross crate (and process) boundaries:
//!
//! - `struts_analysis.json`: the raw extraction, an [`AnalysisReport`]
//!   holding action mappings, form beans and view pages.
//! - `migration_intent.json`: the synthesized [`MigrationIntent`] consumed by
//!   both code emitters.
//!
//! This crate owns their typed shape and the single load/save entry points so
//! that the analyzer and the generator can never disagree on field names.

pub mod artifact;
pub mod intent;
pub mod types;

pub use artifact::{
    load_analysis, load_intent, save_analysis, save_intent, InterchangeError, ANALYSIS_FILE,
    INTENT_FILE,
};
pub use intent::*;
pub use types::*;
