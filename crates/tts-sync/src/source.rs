//! Where the current state comes from.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use tts_types::Collection;

use crate::error::{SyncError, SyncResult};
use crate::locator::Locator;

/// Supplies the live state of the target system, one locator at a time.
#[async_trait]
pub trait StateSource: Send + Sync {
    /// Fetch the current state under `locator`.
    async fn fetch_current_state(&self, locator: &Locator) -> SyncResult<Collection>;
}

// ---------------------------------------------------------------------------
// File-backed source
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
enum Layout {
    /// One `<stem>.json` per locator inside a directory.
    PerLocator(PathBuf),
    /// One file holding every locator; each fetch keeps only the groups
    /// the locator covers.
    Single(PathBuf),
}

/// Reads exported state from JSON files on disk.
#[derive(Clone, Debug)]
pub struct FileSource {
    layout: Layout,
}

impl FileSource {
    /// Read `<dir>/<locator stem>.json` for each locator.
    pub fn dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            layout: Layout::PerLocator(dir.into()),
        }
    }

    /// Read `path` for every locator, restricted to the groups under it.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self {
            layout: Layout::Single(path.into()),
        }
    }

    /// The file consulted for `locator`.
    pub fn path_for(&self, locator: &Locator) -> PathBuf {
        match &self.layout {
            Layout::PerLocator(dir) => dir.join(format!("{}.json", locator.file_stem())),
            Layout::Single(path) => path.clone(),
        }
    }
}

async fn read_document(path: &Path, locator: &Locator) -> SyncResult<Collection> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SyncError::SourceUnavailable {
                locator: locator.to_string(),
                reason: format!("{} does not exist", path.display()),
            })
        }
        Err(e) => return Err(e.into()),
    };
    Ok(Collection::from_json_slice(&bytes)?)
}

#[async_trait]
impl StateSource for FileSource {
    async fn fetch_current_state(&self, locator: &Locator) -> SyncResult<Collection> {
        let path = self.path_for(locator);
        debug!(%locator, path = %path.display(), "reading current state");
        let mut document = read_document(&path, locator).await?;
        if let Layout::Single(_) = self.layout {
            document.groups.retain(|g| locator.covers(&g.path));
        }
        Ok(document)
    }
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// Serves documents held in memory.
#[derive(Clone, Debug, Default)]
pub struct DocumentSource {
    documents: BTreeMap<Locator, Collection>,
    fallback: Option<Collection>,
}

impl DocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for every locator without an explicit entry.
    pub fn for_all(document: Collection) -> Self {
        Self {
            documents: BTreeMap::new(),
            fallback: Some(document),
        }
    }

    /// Serve `document` for `locator`.
    pub fn with(mut self, locator: Locator, document: Collection) -> Self {
        self.documents.insert(locator, document);
        self
    }
}

#[async_trait]
impl StateSource for DocumentSource {
    async fn fetch_current_state(&self, locator: &Locator) -> SyncResult<Collection> {
        self.documents
            .get(locator)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| SyncError::SourceUnavailable {
                locator: locator.to_string(),
                reason: "no document registered".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tts_types::{Group, GroupPath};

    fn doc(subject: &str) -> Collection {
        Collection::new(vec![Group::new(
            GroupPath::new("tripos", "part1", subject),
            "Module",
        )])
    }

    fn loc(s: &str) -> Locator {
        Locator::new(s).unwrap()
    }

    #[tokio::test]
    async fn file_source_reads_per_locator_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("tripos__part1.json"),
            doc("a").to_json().unwrap(),
        )
        .unwrap();

        let source = FileSource::dir(dir.path());
        let got = source.fetch_current_state(&loc("tripos/part1")).await.unwrap();
        assert_eq!(got, doc("a"));
    }

    #[tokio::test]
    async fn file_source_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::dir(dir.path());
        let err = source.fetch_current_state(&loc("tripos/part2")).await.unwrap_err();
        assert!(matches!(err, SyncError::SourceUnavailable { .. }));
    }

    #[tokio::test]
    async fn file_source_bad_json_is_document_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let source = FileSource::single(&path);
        let err = source.fetch_current_state(&loc("tripos")).await.unwrap_err();
        assert!(matches!(err, SyncError::Document(_)));
    }

    #[tokio::test]
    async fn single_file_source_splits_by_locator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        let export = Collection::new(vec![
            Group::new(GroupPath::new("tripos", "part1", "a"), "A"),
            Group::new(GroupPath::new("tripos", "part2", "b"), "B"),
        ]);
        std::fs::write(&path, export.to_json().unwrap()).unwrap();

        let source = FileSource::single(&path);
        let part1 = source.fetch_current_state(&loc("tripos/part1")).await.unwrap();
        let part2 = source.fetch_current_state(&loc("tripos/part2")).await.unwrap();
        assert_eq!(part1.groups, vec![export.groups[0].clone()]);
        assert_eq!(part2.groups, vec![export.groups[1].clone()]);

        let all = source.fetch_current_state(&loc("tripos")).await.unwrap();
        assert_eq!(all, export);
    }

    #[test]
    fn single_file_source_uses_same_path() {
        let source = FileSource::single("/tmp/state.json");
        assert_eq!(source.path_for(&loc("a")), source.path_for(&loc("b/c")));
    }

    #[tokio::test]
    async fn document_source_prefers_explicit_entry() {
        let source = DocumentSource::for_all(doc("fallback")).with(loc("tripos/part1"), doc("a"));
        assert_eq!(source.fetch_current_state(&loc("tripos/part1")).await.unwrap(), doc("a"));
        assert_eq!(
            source.fetch_current_state(&loc("tripos/part2")).await.unwrap(),
            doc("fallback")
        );
    }

    #[tokio::test]
    async fn empty_document_source_is_unavailable() {
        let err = DocumentSource::new()
            .fetch_current_state(&loc("tripos"))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::SourceUnavailable { .. }));
    }
}
