//! Recoverable conditions accumulated during a run.
//!
//! Each stage pushes into a shared [`Diagnostics`] list instead of failing.
//! Every push is also logged at `warn` so the conditions reach stderr even
//! when the caller never prints the summary.

use serde::Serialize;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An expected descriptor or directory is absent; its input is treated as empty.
    MissingArtifact,
    /// One template or source unit could not be read or scanned and was skipped.
    PerFileExtraction,
    /// A later action entry repeats an earlier endpoint path and was dropped.
    DuplicateAction,
    /// Two sources produced the same identifier; the later one was renamed.
    NameCollision,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::MissingArtifact => "missing artifact",
            DiagnosticKind::PerFileExtraction => "skipped file",
            DiagnosticKind::DuplicateAction => "duplicate action",
            DiagnosticKind::NameCollision => "name collision",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning: {} '{}': {}", self.kind, self.path, self.message)
    }
}

/// Ordered diagnostic list for one run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DiagnosticKind, path: impl AsRef<Path>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            kind,
            path: path.as_ref().display().to_string(),
            message: message.into(),
        };
        tracing::warn!(kind = %diagnostic.kind, path = %diagnostic.path, "{}", diagnostic.message);
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_count() {
        let mut diags = Diagnostics::new();
        diags.push(DiagnosticKind::MissingArtifact, "WEB-INF/struts-config.xml", "not found");
        diags.push(DiagnosticKind::PerFileExtraction, "jsp/broken.jsp", "invalid UTF-8");
        diags.push(DiagnosticKind::PerFileExtraction, "jsp/other.jsp", "invalid UTF-8");

        assert_eq!(diags.len(), 3);
        assert_eq!(diags.count(DiagnosticKind::PerFileExtraction), 2);
        assert_eq!(diags.count(DiagnosticKind::DuplicateAction), 0);
    }

    #[test]
    fn test_display_and_json() {
        let mut diags = Diagnostics::new();
        diags.push(DiagnosticKind::PerFileExtraction, "jsp/broken.jsp", "invalid UTF-8");
        let d = diags.iter().next().unwrap();
        assert_eq!(
            d.to_string(),
            "warning: skipped file 'jsp/broken.jsp': invalid UTF-8"
        );

        let json = serde_json::to_value(&diags).unwrap();
        assert_eq!(json[0]["kind"], "per_file_extraction");
        assert_eq!(json[0]["path"], "jsp/broken.jsp");
    }
}
