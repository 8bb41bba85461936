use tracing::debug;
use tts_types::Collection;

use crate::config::SchemaConfig;
use crate::error::SchemaViolation;
use crate::rule::SchemaRule;
use crate::rules::{DeletionMarkerRule, IdentifierRule, PayloadRule};

/// Validates a document against the structural schema contract.
///
/// Held by the caller and passed into the merge, so a single validator built
/// at start-up can be reused for every call.
pub trait SchemaValidator: Send + Sync {
    fn validate(&self, collection: &Collection) -> Result<(), SchemaViolation>;
}

impl<F> SchemaValidator for F
where
    F: Fn(&Collection) -> Result<(), SchemaViolation> + Send + Sync,
{
    fn validate(&self, collection: &Collection) -> Result<(), SchemaViolation> {
        self(collection)
    }
}

// ---------------------------------------------------------------------------
// StructuralValidator
// ---------------------------------------------------------------------------

/// An ordered pipeline of [`SchemaRule`]s.
///
/// The pipeline is fail-fast: the first rule reporting any violation stops
/// evaluation and its violations become the error.
pub struct StructuralValidator {
    rules: Vec<Box<dyn SchemaRule>>,
    config: SchemaConfig,
}

impl StructuralValidator {
    /// Create a validator with an empty pipeline.
    pub fn new(config: SchemaConfig) -> Self {
        Self {
            rules: Vec::new(),
            config,
        }
    }

    /// Create a validator with the standard pipeline:
    /// Identifier -> Payload -> DeletionMarker
    pub fn with_default_rules(config: SchemaConfig) -> Self {
        let mut validator = Self::new(config);
        validator.add_rule(Box::new(IdentifierRule));
        validator.add_rule(Box::new(PayloadRule));
        validator.add_rule(Box::new(DeletionMarkerRule));
        validator
    }

    /// A validator that accepts every document.
    pub fn permissive() -> Self {
        Self::new(SchemaConfig::permissive())
    }

    /// Append a rule to the end of the pipeline.
    pub fn add_rule(&mut self, rule: Box<dyn SchemaRule>) {
        self.rules.push(rule);
    }

    /// The current configuration.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Number of rules in the pipeline.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for StructuralValidator {
    fn default() -> Self {
        Self::with_default_rules(SchemaConfig::default())
    }
}

impl SchemaValidator for StructuralValidator {
    fn validate(&self, collection: &Collection) -> Result<(), SchemaViolation> {
        if self.config.permissive {
            return Ok(());
        }

        for rule in &self.rules {
            let violations = rule.check(collection, &self.config);
            if !violations.is_empty() {
                debug!(rule = rule.name(), count = violations.len(), "schema rule failed");
                return Err(SchemaViolation::new(rule.name(), violations));
            }
        }

        Ok(())
    }
}
