use serde::{Deserialize, Serialize};

/// What to do with an item whose key appears in both snapshots.
///
/// Items are leaves, so there is nothing to reconcile: either the future
/// version replaces the current one, or the pairing is treated as a broken
/// invariant (for inputs whose shared items were pruned upstream).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SharedItemPolicy {
    /// Emit a copy of the future item.
    #[default]
    TakeFuture,
    /// Fail with [`MergeError::StructuralInvariant`](crate::MergeError).
    Reject,
}

/// Configuration for the merge engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub shared_items: SharedItemPolicy,
}

impl MergeConfig {
    /// Configuration that rejects items present on both sides.
    pub fn strict() -> Self {
        Self {
            shared_items: SharedItemPolicy::Reject,
        }
    }
}
