//! Per-file scanning shared by the view and logic-unit extractors.
//!
//! Files are listed in path order, scanned independently (optionally on the
//! rayon pool), and merged back in that same order. A file that fails to
//! read or scan becomes a `per_file_extraction` diagnostic and is skipped.

use std::path::{Component, Path};

use rayon::prelude::*;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::source::SourceProvider;

/// `path` relative to `root`, `/`-separated.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Scan every `*.{extension}` file under `root/dir`.
///
/// `scan` receives the root-relative path and the file text; `Ok(None)`
/// means the file was read fine but holds nothing of interest.
pub fn scan_tree<T, F>(
    provider: &dyn SourceProvider,
    root: &Path,
    dir: &Path,
    extension: &str,
    parallel: bool,
    diagnostics: &mut Diagnostics,
    scan: F,
) -> Vec<T>
where
    T: Send,
    F: Fn(&str, &str) -> Result<Option<T>, String> + Sync,
{
    let abs = root.join(dir);
    if !provider.is_dir(&abs) {
        diagnostics.push(
            DiagnosticKind::MissingArtifact,
            dir,
            format!("directory not found; no *.{} files scanned", extension),
        );
        return Vec::new();
    }
    let files = match provider.list_files(&abs, extension) {
        Ok(files) => files,
        Err(e) => {
            diagnostics.push(DiagnosticKind::MissingArtifact, dir, e.to_string());
            return Vec::new();
        }
    };

    let scan_one = |path: &std::path::PathBuf| {
        let rel = relative_path(root, path);
        tracing::debug!(file = %rel, "scanning");
        let outcome = provider
            .read_source(path)
            .map_err(|e| e.to_string())
            .and_then(|text| scan(&rel, &text));
        (rel, outcome)
    };
    let outcomes: Vec<(String, Result<Option<T>, String>)> = if parallel {
        files.par_iter().map(scan_one).collect()
    } else {
        files.iter().map(scan_one).collect()
    };

    let mut records = Vec::with_capacity(outcomes.len());
    for (rel, outcome) in outcomes {
        match outcome {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(message) => diagnostics.push(DiagnosticKind::PerFileExtraction, &rel, message),
        }
    }
    records
}
