//! Writing emitted trees to disk.
//!
//! Every emitter writes a `.ferry-manifest.json` next to its files listing
//! each relative path with its SHA-256. On the next run, files named in the
//! old manifest but not produced again are deleted, so regenerating from the
//! same intent always converges to the same tree.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::FerryError;

pub const MANIFEST_FILE: &str = ".ferry-manifest.json";

/// One file produced by an emitter, relative to its output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// `/`-separated path relative to the output root.
    pub path: String,
    pub contents: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        GeneratedFile {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn sha256(&self) -> String {
        Sha256::digest(self.contents.as_bytes())
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub emitter: String,
    pub files: Vec<ManifestEntry>,
}

/// What one [`write_tree`] call did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    /// Files written, in emission order.
    pub written: Vec<PathBuf>,
    /// Stale files removed.
    pub removed: Vec<PathBuf>,
}

/// A relative path made only of normal components.
fn is_contained(rel: &str) -> bool {
    let path = Path::new(rel);
    !rel.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)))
}

fn read_previous_manifest(out_dir: &Path) -> Option<GenerationManifest> {
    let path = out_dir.join(MANIFEST_FILE);
    let text = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&text) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable generation manifest");
            None
        }
    }
}

/// Write `files` under `out_dir`, remove stale files from the previous run
/// and record the new manifest. `on_write` is called after each file lands.
///
/// Files already written when an error occurs are left in place.
pub fn write_tree(
    out_dir: &Path,
    emitter: &'static str,
    files: &[GeneratedFile],
    mut on_write: impl FnMut(&Path),
) -> Result<WriteReport, FerryError> {
    let mut seen = BTreeSet::new();
    for file in files {
        if !is_contained(&file.path) || file.path == MANIFEST_FILE {
            return Err(FerryError::Emit {
                emitter,
                message: format!("refusing to write outside the output tree: '{}'", file.path),
            });
        }
        if !seen.insert(file.path.as_str()) {
            return Err(FerryError::Emit {
                emitter,
                message: format!("'{}' rendered twice", file.path),
            });
        }
    }

    let previous = read_previous_manifest(out_dir);
    std::fs::create_dir_all(out_dir).map_err(|e| FerryError::output_write(out_dir, e))?;

    let mut report = WriteReport::default();
    for file in files {
        let target = out_dir.join(&file.path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FerryError::output_write(parent, e))?;
        }
        std::fs::write(&target, &file.contents).map_err(|e| FerryError::output_write(&target, e))?;
        tracing::debug!(emitter, file = %file.path, "wrote");
        on_write(&target);
        report.written.push(target);
    }

    if let Some(previous) = previous {
        for entry in previous.files {
            if seen.contains(entry.path.as_str()) || !is_contained(&entry.path) {
                continue;
            }
            let stale = out_dir.join(&entry.path);
            match std::fs::remove_file(&stale) {
                Ok(()) => {
                    tracing::debug!(emitter, file = %entry.path, "removed stale file");
                    report.removed.push(stale);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(FerryError::output_write(&stale, e)),
            }
        }
    }

    let manifest = GenerationManifest {
        emitter: emitter.to_string(),
        files: files
            .iter()
            .map(|f| ManifestEntry {
                path: f.path.clone(),
                sha256: f.sha256(),
            })
            .collect(),
    };
    let manifest_path = out_dir.join(MANIFEST_FILE);
    let mut json = serde_json::to_string_pretty(&manifest).map_err(|e| FerryError::Emit {
        emitter,
        message: e.to_string(),
    })?;
    json.push('\n');
    std::fs::write(&manifest_path, json).map_err(|e| FerryError::output_write(&manifest_path, e))?;

    tracing::info!(
        emitter,
        written = report.written.len(),
        removed = report.removed.len(),
        out = %out_dir.display(),
        "emitted tree"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<GeneratedFile> {
        names
            .iter()
            .map(|n| GeneratedFile::new(*n, format!("// {}\n", n)))
            .collect()
    }

    #[test]
    fn test_sha256_hex() {
        let f = GeneratedFile::new("a.ts", "");
        assert_eq!(
            f.sha256(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_write_creates_nested_dirs_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let mut progress = Vec::new();
        let report = write_tree(
            dir.path(),
            "frontend",
            &files(&["src/App.tsx", "src/pages/Welcome.tsx"]),
            |p| progress.push(p.to_path_buf()),
        )
        .unwrap();
        assert_eq!(report.written.len(), 2);
        assert_eq!(progress, report.written);
        assert!(dir.path().join("src/pages/Welcome.tsx").is_file());

        let manifest: GenerationManifest =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap())
                .unwrap();
        assert_eq!(manifest.emitter, "frontend");
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.files[1].path, "src/pages/Welcome.tsx");
    }

    #[test]
    fn test_rerun_removes_stale_files_only() {
        let dir = tempfile::tempdir().unwrap();
        write_tree(dir.path(), "backend", &files(&["a.ts", "b.ts"]), |_| {}).unwrap();
        std::fs::write(dir.path().join("hand-written.ts"), "keep").unwrap();

        let report = write_tree(dir.path(), "backend", &files(&["a.ts"]), |_| {}).unwrap();
        assert_eq!(report.removed, vec![dir.path().join("b.ts")]);
        assert!(!dir.path().join("b.ts").exists());
        assert!(dir.path().join("hand-written.ts").exists());
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        for bad in ["../evil.ts", "/abs.ts", "", MANIFEST_FILE] {
            let err = write_tree(dir.path(), "frontend", &files(&[bad]), |_| {}).unwrap_err();
            assert_eq!(err.kind(), "emit", "{}", bad);
        }
    }

    #[test]
    fn test_duplicate_paths_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_tree(dir.path(), "frontend", &files(&["a.ts", "a.ts"]), |_| {}).unwrap_err();
        assert!(err.to_string().contains("rendered twice"));
    }

    #[test]
    fn test_write_failure_is_output_write() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let err = write_tree(&blocker.join("out"), "frontend", &files(&["a.ts"]), |_| {}).unwrap_err();
        assert_eq!(err.kind(), "output_write");
    }
}
