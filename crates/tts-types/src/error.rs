use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// A digest string that is not hex.
    #[error("digest {input:?} is not hex: {reason}")]
    DigestNotHex { input: String, reason: String },

    /// A hex digest of the wrong width.
    #[error("digest must be {expected} bytes, got {actual}")]
    DigestWidth { expected: usize, actual: usize },

    /// A document that could not be read or written as JSON.
    #[error("malformed document: {0}")]
    Document(String),
}

impl From<serde_json::Error> for TypeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Document(err.to_string())
    }
}

pub type TypeResult<T> = Result<T, TypeError>;
