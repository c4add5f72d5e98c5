//! ferry-codegen: the two code emitters.
//!
//! Both consume a read-only [`MigrationIntent`] and implement
//! [`ferry_core::Emitter`], so the pipeline drives them the same way whether
//! the intent was just synthesized or loaded from `migration_intent.json`.
//! Rendering is pure: the same intent always yields the same bytes.
//!
//! [`MigrationIntent`]: ferry_interchange::MigrationIntent

pub mod backend;
pub mod fields;
pub mod frontend;
pub mod template;

#[cfg(test)]
pub(crate) mod tests_support;

// ── Convenience re-exports ───────────────────────────────────────────

pub use backend::BackEndEmitter;
pub use frontend::FrontEndEmitter;
