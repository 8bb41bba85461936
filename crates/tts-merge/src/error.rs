//! Error types for the merge crate.

use std::fmt;

use serde::{Deserialize, Serialize};
use tts_schema::SchemaViolation;
use tts_types::Level;

/// Which input snapshot a node came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Current,
    Future,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Future => write!(f, "future"),
        }
    }
}

/// Errors that abort a merge. No partial output is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// Two siblings in one input share a match key. The source data must be
    /// fixed; retrying reproduces the failure.
    #[error("duplicate {level} key in {side} state: {key}")]
    DuplicateKey {
        level: Level,
        side: Side,
        key: String,
    },

    /// The merge reached a state its pairing rules forbid.
    #[error("structural invariant violated for {level} {key}: {reason}")]
    StructuralInvariant {
        level: Level,
        key: String,
        reason: String,
    },

    /// An input or the output failed schema validation.
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
}

impl MergeError {
    /// Returns `true` if the error points at bad input data rather than at
    /// the engine itself.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, Self::StructuralInvariant { .. })
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
