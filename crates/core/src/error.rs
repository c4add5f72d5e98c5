use std::path::PathBuf;

use ferry_interchange::InterchangeError;

/// Fatal errors. Any of these aborts the run.
///
/// Recoverable conditions (a missing descriptor, one unreadable template)
/// are not errors; they are recorded as [`crate::Diagnostic`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum FerryError {
    /// The legacy application root does not exist.
    #[error("input root '{path}' does not exist")]
    InputRootMissing { path: PathBuf },

    /// The route/form descriptor exists but fails structural parsing.
    #[error("malformed descriptor '{path}': {message}")]
    MalformedDescriptor { path: PathBuf, message: String },

    /// Two distinct sources normalize to the same generated identifier and
    /// the collision policy is `reject`.
    #[error("name collision: '{name}' is derived from both {}", sources.join(" and "))]
    NameCollision { name: String, sources: Vec<String> },

    /// A directory or file could not be created during emission.
    #[error("could not write '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An emitter could not render its tree.
    #[error("{emitter} emitter failed: {message}")]
    Emit {
        emitter: &'static str,
        message: String,
    },

    #[error("invalid configuration '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// The intent or analysis artifact could not be read, parsed or written.
    #[error(transparent)]
    Intent(#[from] InterchangeError),

    /// A pipeline step was requested in a state that cannot perform it.
    #[error("pipeline cannot run {requested} from stage {current}")]
    InvalidStage {
        current: &'static str,
        requested: &'static str,
    },

    /// The pipeline already failed; carries the kind of the original error.
    #[error("pipeline halted after {kind} error: {message}")]
    Halted { kind: &'static str, message: String },
}

impl FerryError {
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FerryError::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Stable machine-readable kind, used in JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            FerryError::InputRootMissing { .. } => "input_root_missing",
            FerryError::MalformedDescriptor { .. } => "malformed_descriptor",
            FerryError::NameCollision { .. } => "name_collision",
            FerryError::OutputWrite { .. } => "output_write",
            FerryError::Emit { .. } => "emit",
            FerryError::Config { .. } => "config",
            FerryError::Intent(_) => "intent",
            FerryError::InvalidStage { .. } => "invalid_stage",
            FerryError::Halted { kind, .. } => *kind,
        }
    }
}
