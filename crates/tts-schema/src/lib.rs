//! Structural schema validation for timetable-sync documents.
//!
//! Plays the role of the external schema contract: documents are checked
//! before they are merged and again after a merge, so that a tree with
//! deletion markers is still a legal document for the target system.
//!
//! Validation is a pipeline of [`SchemaRule`]s run by a
//! [`StructuralValidator`]. The first rule that reports violations stops the
//! pipeline.

pub mod config;
pub mod error;
pub mod rule;
pub mod rules;
pub mod validator;

pub use config::SchemaConfig;
pub use error::{SchemaViolation, Violation};
pub use rule::SchemaRule;
pub use rules::{DeletionMarkerRule, IdentifierRule, PayloadRule};
pub use validator::{SchemaValidator, StructuralValidator};
