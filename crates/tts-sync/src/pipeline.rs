//! End-to-end sync: fetch, prepare, generate deletes, submit.

use tracing::{debug, info, warn};
use tts_merge::{summarize, DeleteGenerator, DeleteSummary};
use tts_schema::{SchemaConfig, SchemaValidator, StructuralValidator};
use tts_types::{canonicalise, concat, digest, fix_export_ids, Collection, ContentDigest};

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::locator::Locator;
use crate::sink::StateSink;
use crate::source::StateSource;

/// Outcome of planning (and possibly submitting) one sync.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncPlan {
    /// Import document: the desired state plus deletion markers.
    pub merged: Collection,
    pub summary: DeleteSummary,
    /// Digest of the canonical current state.
    pub current_digest: ContentDigest,
    /// Digest of the canonical desired state.
    pub future_digest: ContentDigest,
    /// Whether the document was handed to a sink.
    pub submitted: bool,
}

impl SyncPlan {
    /// Returns `true` if the current and desired states already agree.
    pub fn is_noop(&self) -> bool {
        self.current_digest == self.future_digest
    }
}

/// Drives a sync against a source and a sink.
pub struct SyncPipeline {
    config: SyncConfig,
    generator: DeleteGenerator,
    snapshot_validator: StructuralValidator,
    expected_current: Option<ContentDigest>,
}

impl SyncPipeline {
    pub fn new(config: SyncConfig) -> Self {
        let generator = DeleteGenerator::new(
            config.merge.clone(),
            Box::new(StructuralValidator::with_default_rules(config.schema.clone())),
        );
        let snapshot_validator = StructuralValidator::with_default_rules(SchemaConfig {
            allow_deletion_markers: false,
            ..config.schema.clone()
        });
        Self {
            config,
            generator,
            snapshot_validator,
            expected_current: None,
        }
    }

    /// Refuse to plan unless the fetched current state hashes to `digest`,
    /// so a document reviewed earlier is never applied to a moved target.
    pub fn expect_current(mut self, digest: ContentDigest) -> Self {
        self.expected_current = Some(digest);
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Fetch the current state for every locator and build the import
    /// document that moves it to `future`. Nothing is submitted.
    pub async fn plan(
        &self,
        source: &dyn StateSource,
        future: &Collection,
        locators: &[Locator],
    ) -> SyncResult<SyncPlan> {
        if locators.is_empty() {
            return Err(SyncError::NoLocators);
        }

        let mut exports = Vec::with_capacity(locators.len());
        for locator in locators {
            let state = source.fetch_current_state(locator).await?;
            debug!(%locator, groups = state.groups.len(), "fetched current state");
            exports.push(if self.config.fix_export_ids {
                fix_export_ids(&state)
            } else {
                state
            });
        }

        let current = canonicalise(&concat(exports));
        let future = canonicalise(future);
        let current_digest = digest(&current)?;

        if let Some(expected) = self.expected_current {
            if expected != current_digest {
                warn!(%expected, actual = %current_digest, "current state moved");
                return Err(SyncError::StaleCurrentState {
                    expected,
                    actual: current_digest,
                });
            }
        }

        if self.config.validate_snapshots {
            for (what, doc) in [("current", &current), ("future", &future)] {
                if let Err(e) = self.snapshot_validator.validate(doc) {
                    warn!(state = what, error = %e, "snapshot rejected");
                    return Err(e.into());
                }
            }
        }

        let merged = self.generator.generate(&current, &future)?;
        let plan = SyncPlan {
            summary: summarize(&merged),
            current_digest,
            future_digest: digest(&future)?,
            merged,
            submitted: false,
        };

        info!(
            locators = locators.len(),
            current = %plan.current_digest,
            future = %plan.future_digest,
            summary = %plan.summary,
            "planned sync"
        );
        Ok(plan)
    }

    /// Plan, then submit the import document unless configured for a dry run.
    pub async fn run(
        &self,
        source: &dyn StateSource,
        sink: &dyn StateSink,
        future: &Collection,
        locators: &[Locator],
    ) -> SyncResult<SyncPlan> {
        let mut plan = self.plan(source, future, locators).await?;

        if self.config.dry_run {
            info!("dry run, not submitting");
            return Ok(plan);
        }

        sink.submit(&plan.merged, locators).await?;
        plan.submitted = true;
        info!(deleted = plan.summary.total_deleted(), "submitted import document");
        Ok(plan)
    }
}

impl Default for SyncPipeline {
    fn default() -> Self {
        Self::new(SyncConfig::default())
    }
}
