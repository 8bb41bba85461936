//! Counts of kept and deleted nodes in a merged document.

use std::fmt;

use serde::{Deserialize, Serialize};
use tts_types::Collection;

/// Kept/deleted counts for one level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub kept: usize,
    pub deleted: usize,
}

impl LevelCounts {
    fn record(&mut self, deleted: bool) {
        if deleted {
            self.deleted += 1;
        } else {
            self.kept += 1;
        }
    }
}

/// Per-level counts for a merged document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSummary {
    pub groups: LevelCounts,
    pub sections: LevelCounts,
    pub items: LevelCounts,
}

impl DeleteSummary {
    /// Total number of deletion markers.
    pub fn total_deleted(&self) -> usize {
        self.groups.deleted + self.sections.deleted + self.items.deleted
    }

    /// Returns `true` if the document deletes nothing.
    pub fn is_additive(&self) -> bool {
        self.total_deleted() == 0
    }
}

impl fmt::Display for DeleteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "groups {}/{}, sections {}/{}, items {}/{} (kept/deleted)",
            self.groups.kept,
            self.groups.deleted,
            self.sections.kept,
            self.sections.deleted,
            self.items.kept,
            self.items.deleted,
        )
    }
}

/// Count kept and deleted nodes at every level.
pub fn summarize(collection: &Collection) -> DeleteSummary {
    let mut summary = DeleteSummary::default();
    for group in &collection.groups {
        summary.groups.record(group.deleted);
        for section in &group.sections {
            summary.sections.record(section.deleted);
            for item in &section.items {
                summary.items.record(item.deleted);
            }
        }
    }
    summary
}
