use tts_types::Collection;

use crate::config::SchemaConfig;
use crate::error::Violation;

/// A single check in the validation pipeline.
///
/// Rules report every problem they find rather than stopping at the first,
/// so an operator sees the whole picture for one rule at a time.
pub trait SchemaRule: Send + Sync {
    /// Human-readable name of this rule (e.g., "identifier").
    fn name(&self) -> &str;

    /// Inspect the document and return all violations found.
    fn check(&self, collection: &Collection, config: &SchemaConfig) -> Vec<Violation>;
}
