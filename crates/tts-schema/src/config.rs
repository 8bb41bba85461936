use serde::{Deserialize, Serialize};

/// Configuration for the structural validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Longest identifier (path segment, name, or id) accepted, in characters.
    pub max_identifier_len: usize,
    /// Whether nodes may carry a deletion marker.
    pub allow_deletion_markers: bool,
    /// When `true`, every rule is skipped and all documents are accepted.
    pub permissive: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            max_identifier_len: 255,
            allow_deletion_markers: true,
            permissive: false,
        }
    }
}

impl SchemaConfig {
    /// Configuration for plain snapshots, which must not contain deletes.
    pub fn snapshot() -> Self {
        Self {
            allow_deletion_markers: false,
            ..Default::default()
        }
    }

    /// Accept anything.
    pub fn permissive() -> Self {
        Self {
            permissive: true,
            ..Default::default()
        }
    }
}
