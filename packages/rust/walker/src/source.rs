//! Document retrieval backends.
//!
//! The walker needs exactly one capability from its environment: fetch the
//! content of a document by name, or report it absent. [`DocumentSource`]
//! is that seam; it may be backed by any storage medium.

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use interplayer_shared::{InterplayerError, Result};

/// Fetch document content by name.
///
/// `Ok(None)` means the document is absent — a normal, non-fatal outcome.
/// `Err` means retrieval itself faulted (I/O failure, not mere absence).
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the full text of the named document, or `None` if absent.
    async fn fetch(&self, name: &str) -> Result<Option<String>>;
}

// ---------------------------------------------------------------------------
// Filesystem source
// ---------------------------------------------------------------------------

/// A source reading documents as files under a root directory.
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`; document names resolve relative to it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentSource for FsSource {
    async fn fetch(&self, name: &str) -> Result<Option<String>> {
        if escapes_root(Path::new(name)) {
            return Err(InterplayerError::Retrieval(format!(
                "document name '{name}' escapes the source root"
            )));
        }

        let path = self.root.join(name);
        debug!(?path, "reading document");

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(InterplayerError::Retrieval(format!(
                "{}: {e}",
                path.display()
            ))),
        }
    }
}

/// Reject names that would resolve outside the source root.
fn escapes_root(name: &Path) -> bool {
    name.components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// An in-memory source, useful for tests and embedded callers.
#[derive(Debug, Clone, Default)]
pub struct MemSource {
    docs: HashMap<String, String>,
    faults: HashSet<String>,
}

impl MemSource {
    /// Create an empty in-memory source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, builder-style.
    pub fn with_doc(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.docs.insert(name.into(), content.into());
        self
    }

    /// Make retrieval of the named document fault, builder-style.
    pub fn with_fault(mut self, name: impl Into<String>) -> Self {
        self.faults.insert(name.into());
        self
    }
}

#[async_trait]
impl DocumentSource for MemSource {
    async fn fetch(&self, name: &str) -> Result<Option<String>> {
        if self.faults.contains(name) {
            return Err(InterplayerError::Retrieval(format!(
                "{name}: injected fault"
            )));
        }
        Ok(self.docs.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fs_source_reads_and_reports_absent() {
        let dir = std::env::temp_dir().join(format!("interplayer-src-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.interplay"), "alpha\n\tdetail\n").unwrap();

        let source = FsSource::new(&dir);
        let content = source.fetch("a.interplay").await.unwrap();
        assert_eq!(content.as_deref(), Some("alpha\n\tdetail\n"));

        let absent = source.fetch("b.interplay").await.unwrap();
        assert!(absent.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn fs_source_rejects_escaping_names() {
        let source = FsSource::new("/tmp");
        let err = source.fetch("../etc/passwd").await.unwrap_err();
        assert!(err.to_string().contains("escapes"));

        let err = source.fetch("/etc/passwd").await.unwrap_err();
        assert!(err.to_string().contains("escapes"));
    }

    #[tokio::test]
    async fn mem_source_faults() {
        let source = MemSource::new()
            .with_doc("ok.interplay", "alpha\n")
            .with_fault("bad.interplay");

        assert!(source.fetch("ok.interplay").await.unwrap().is_some());
        assert!(source.fetch("gone.interplay").await.unwrap().is_none());
        assert!(source.fetch("bad.interplay").await.is_err());
    }
}
