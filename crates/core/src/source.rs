//! Source provider abstraction for filesystem-independent extraction.
//!
//! The [`SourceProvider`] trait abstracts the legacy application's file tree
//! so the extractors can run against a real checkout ([`FileSystemProvider`])
//! or an in-memory fixture ([`InMemoryProvider`]) in tests.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Read-only view of a legacy application tree.
///
/// `Sync` so per-file extraction can fan out over a rayon pool.
pub trait SourceProvider: Sync {
    /// Raw file content.
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// True if `path` is an existing file or directory.
    fn exists(&self, path: &Path) -> bool;

    /// True if `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Every file under `dir` (recursively) whose extension is `extension`,
    /// sorted by path.
    fn list_files(&self, dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>>;

    /// Read a text file. Content that is not UTF-8, or that contains NUL
    /// bytes, is reported as [`io::ErrorKind::InvalidData`].
    fn read_source(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read_bytes(path)?;
        if bytes.contains(&0) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "binary content (NUL byte)",
            ));
        }
        String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.utf8_error()))
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

// ── Filesystem ──────────────────────────────────────────────────────────────

/// Default filesystem-backed provider.
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }
}

// ── In memory ───────────────────────────────────────────────────────────────

/// In-memory provider for tests.
///
/// Maps normalized paths to raw bytes, so invalid content can be injected.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text file.
    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.insert(path, content.as_bytes().to_vec());
        self
    }

    /// Add a file with arbitrary bytes.
    pub fn with_bytes(mut self, path: impl AsRef<Path>, content: &[u8]) -> Self {
        self.insert(path, content.to_vec());
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, content: Vec<u8>) {
        self.files.insert(Self::normalize_path(path.as_ref()), content);
    }

    /// Normalize a path by resolving `.` and `..` components without
    /// touching the filesystem.
    fn normalize_path(path: &Path) -> PathBuf {
        let mut components = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    components.pop();
                }
                other => components.push(other),
            }
        }
        components.iter().collect()
    }
}

impl SourceProvider for InMemoryProvider {
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        let normalized = Self::normalize_path(path);
        self.files.get(&normalized).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found in memory: {}", normalized.display()),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        let normalized = Self::normalize_path(path);
        self.files.keys().any(|k| k.starts_with(&normalized))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let normalized = Self::normalize_path(path);
        self.files
            .keys()
            .any(|k| k.starts_with(&normalized) && *k != normalized)
    }

    fn list_files(&self, dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
        let normalized = Self::normalize_path(dir);
        Ok(self
            .files
            .keys()
            .filter(|k| k.starts_with(&normalized) && **k != normalized)
            .filter(|k| has_extension(k, extension))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_path_resolves_dot_and_dotdot() {
        let p = Path::new("/a/b/../c/./d");
        assert_eq!(InMemoryProvider::normalize_path(p), PathBuf::from("/a/c/d"));
    }

    #[test]
    fn in_memory_read_source_found() {
        let provider = InMemoryProvider::new().with_file("app/jsp/welcome.jsp", "<title>Hi</title>");
        let content = provider
            .read_source(Path::new("app/jsp/../jsp/welcome.jsp"))
            .unwrap();
        assert_eq!(content, "<title>Hi</title>");
    }

    #[test]
    fn in_memory_read_source_not_found() {
        let provider = InMemoryProvider::new();
        let err = provider.read_source(Path::new("missing.jsp")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn read_source_rejects_invalid_utf8_and_nul() {
        let provider = InMemoryProvider::new()
            .with_bytes("bad.jsp", &[0xff, 0xfe, 0x41])
            .with_bytes("nul.jsp", b"<title>a\0b</title>");
        assert_eq!(
            provider.read_source(Path::new("bad.jsp")).unwrap_err().kind(),
            io::ErrorKind::InvalidData
        );
        assert_eq!(
            provider.read_source(Path::new("nul.jsp")).unwrap_err().kind(),
            io::ErrorKind::InvalidData
        );
    }

    #[test]
    fn in_memory_list_files_sorted_and_filtered() {
        let provider = InMemoryProvider::new()
            .with_file("app/jsp/zeta.jsp", "")
            .with_file("app/jsp/sub/alpha.JSP", "")
            .with_file("app/jsp/readme.txt", "")
            .with_file("app/java/A.java", "");
        let files = provider.list_files(Path::new("app/jsp"), "jsp").unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("app/jsp/sub/alpha.JSP"),
                PathBuf::from("app/jsp/zeta.jsp"),
            ]
        );
        assert!(provider.is_dir(Path::new("app/java")));
        assert!(!provider.exists(Path::new("app/web")));
    }

    #[test]
    fn filesystem_list_files_walks_recursively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        std::fs::write(dir.path().join("b/nested/two.jsp"), "x").unwrap();
        std::fs::write(dir.path().join("one.jsp"), "x").unwrap();
        std::fs::write(dir.path().join("skip.html"), "x").unwrap();

        let files = FileSystemProvider.list_files(dir.path(), "jsp").unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("b/nested/two.jsp"), dir.path().join("one.jsp")]
        );
    }
}
