//! Where the generated document goes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;
use tts_types::Collection;

use crate::error::SyncResult;
use crate::locator::Locator;

/// Accepts a generated document for import into the target system.
#[async_trait]
pub trait StateSink: Send + Sync {
    async fn submit(&self, document: &Collection, locators: &[Locator]) -> SyncResult<()>;
}

/// Writes the document as JSON to a file, creating parent directories.
#[derive(Clone, Debug)]
pub struct FileSink {
    path: PathBuf,
    pretty: bool,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// Write compact JSON instead of pretty-printed.
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StateSink for FileSink {
    async fn submit(&self, document: &Collection, locators: &[Locator]) -> SyncResult<()> {
        let json = if self.pretty {
            document.to_json_pretty()?
        } else {
            document.to_json()?
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, json).await?;
        info!(path = %self.path.display(), locators = locators.len(), "wrote import document");
        Ok(())
    }
}

/// One recorded call to [`MemorySink::submit`].
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub document: Collection,
    pub locators: Vec<Locator>,
}

/// Records every submission in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    submissions: Mutex<Vec<Submission>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All submissions so far, oldest first.
    pub async fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().await.clone()
    }
}

#[async_trait]
impl StateSink for MemorySink {
    async fn submit(&self, document: &Collection, locators: &[Locator]) -> SyncResult<()> {
        self.submissions.lock().await.push(Submission {
            document: document.clone(),
            locators: locators.to_vec(),
        });
        Ok(())
    }
}
