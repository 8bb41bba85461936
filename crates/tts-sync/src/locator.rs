//! Target locators.
//!
//! A locator names the part of the target system an import covers, for
//! example `tripos/part1`. Valid locators:
//! - Must be non-empty
//! - Must not contain whitespace or `\`
//! - Must not contain `..` or `//`
//! - Must not start or end with `/`

use std::fmt;

use serde::{Deserialize, Serialize};
use tts_types::GroupPath;

use crate::error::{SyncError, SyncResult};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locator(String);

impl Locator {
    pub fn new(locator: impl Into<String>) -> SyncResult<Self> {
        let locator = locator.into();
        let reason = if locator.is_empty() {
            Some("must not be empty")
        } else if locator.chars().any(|c| c.is_whitespace() || c == '\\') {
            Some("must not contain whitespace or '\\'")
        } else if locator.contains("..") {
            Some("must not contain '..'")
        } else if locator.contains("//") {
            Some("must not contain '//'")
        } else if locator.starts_with('/') || locator.ends_with('/') {
            Some("must not start or end with '/'")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(SyncError::InvalidLocator {
                locator,
                reason: reason.into(),
            }),
            None => Ok(Self(locator)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if a group at `path` lies under this locator, i.e. the
    /// locator's segments are a prefix of `tripos/part/subject`.
    pub fn covers(&self, path: &GroupPath) -> bool {
        let segments = [path.tripos.as_str(), path.part.as_str(), path.subject.as_str()];
        let wanted: Vec<&str> = self.0.split('/').collect();
        wanted.len() <= segments.len() && wanted.iter().zip(segments).all(|(w, s)| *w == s)
    }

    /// File name stem for this locator, with `/` replaced by `__`.
    pub fn file_stem(&self) -> String {
        self.0.replace('/', "__")
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Locator {
    type Error = SyncError;

    fn try_from(value: String) -> SyncResult<Self> {
        Self::new(value)
    }
}

impl From<Locator> for String {
    fn from(locator: Locator) -> Self {
        locator.0
    }
}

impl std::str::FromStr for Locator {
    type Err = SyncError;

    fn from_str(s: &str) -> SyncResult<Self> {
        Self::new(s)
    }
}
