use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no locators given")]
    NoLocators,

    #[error("invalid locator {locator:?}: {reason}")]
    InvalidLocator { locator: String, reason: String },

    #[error("current state unavailable for {locator}: {reason}")]
    SourceUnavailable { locator: String, reason: String },

    #[error("current state changed: expected digest {expected}, found {actual}")]
    StaleCurrentState {
        expected: tts_types::ContentDigest,
        actual: tts_types::ContentDigest,
    },

    #[error("submission failed: {0}")]
    Submission(String),

    #[error("merge error: {0}")]
    Merge(#[from] tts_merge::MergeError),

    #[error("schema error: {0}")]
    Schema(#[from] tts_schema::SchemaViolation),

    #[error("document error: {0}")]
    Document(#[from] tts_types::TypeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SyncResult<T> = Result<T, SyncError>;
