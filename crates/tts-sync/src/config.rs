use serde::{Deserialize, Serialize};
use tts_merge::MergeConfig;
use tts_schema::SchemaConfig;

/// Configuration for a sync run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Strip the `import-` prefix the target adds to exported item ids.
    pub fix_export_ids: bool,
    /// Plan only; never hand the document to the sink.
    pub dry_run: bool,
    /// Reject fetched or desired states that already carry deletion markers.
    pub validate_snapshots: bool,
    pub merge: MergeConfig,
    /// Rules applied to the generated document.
    pub schema: SchemaConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            fix_export_ids: true,
            dry_run: false,
            validate_snapshots: true,
            merge: MergeConfig::default(),
            schema: SchemaConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Same configuration with `dry_run` set.
    pub fn dry_run(self) -> Self {
        Self {
            dry_run: true,
            ..self
        }
    }
}
