//! Sync pipeline for timetable-sync.
//!
//! Drives one import end to end: read the current state of every target
//! locator from a [`StateSource`], repair exported ids, combine and
//! canonicalise, generate deletes against the desired state, and hand the
//! result to a [`StateSink`] unless running dry.

pub mod config;
pub mod error;
pub mod locator;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use locator::Locator;
pub use pipeline::{SyncPipeline, SyncPlan};
pub use sink::{FileSink, MemorySink, StateSink, Submission};
pub use source::{DocumentSource, FileSource, StateSource};
