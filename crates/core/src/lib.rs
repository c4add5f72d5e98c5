#![allow(clippy::result_large_err)]
//! ferry-core: legacy application extraction and migration intent synthesis.
//!
//! Runs the extraction half of the migration pipeline: descriptors, view
//! templates and business-logic units go in, a [`MigrationIntent`] comes out.
//! The emitters live in `ferry-codegen` and plug in through [`Emitter`].
//!
//! # Public API
//!
//! - [`Pipeline`] / [`Stage`] -- the stage-by-stage state machine
//! - [`extract_descriptors`], [`extract_views`], [`analyze_logic_units`] --
//!   the three extractors, usable on their own
//! - [`synthesize`] -- pure merge of extraction records into the intent
//! - [`FerryError`] for fatal errors, [`Diagnostics`] for recoverable ones
//! - [`write_tree`] -- manifest-tracked output writer used by emitters
//!
//! [`MigrationIntent`]: ferry_interchange::MigrationIntent

pub mod config;
pub mod descriptor;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod logic_units;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod source;
pub mod synthesize;
pub mod views;

// ── Convenience re-exports: key types ────────────────────────────────

pub use config::FerryConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use emitter::Emitter;
pub use error::FerryError;
pub use naming::{CollisionPolicy, NameAllocator};
pub use output::{GeneratedFile, WriteReport, MANIFEST_FILE};
pub use pipeline::{Pipeline, Stage};
pub use source::{FileSystemProvider, InMemoryProvider, SourceProvider};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use descriptor::extract_descriptors;
pub use logic_units::analyze_logic_units;
pub use output::write_tree;
pub use synthesize::{synthesize, SynthesisOptions};
pub use views::extract_views;
