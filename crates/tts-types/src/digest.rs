use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::model::Collection;
use crate::transform::canonicalise;

/// Domain tag prepended to every document digest.
const DOCUMENT_DOMAIN: &[u8] = b"tts-document-v1:";

/// BLAKE3 digest of a canonicalised document.
///
/// Two documents with the same content produce the same digest regardless of
/// sibling order in their serialized form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> TypeResult<Self> {
        let bytes = hex::decode(s).map_err(|e| TypeError::DigestNotHex {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        if bytes.len() != 32 {
            return Err(TypeError::DigestWidth {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl std::str::FromStr for ContentDigest {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        Self::from_hex(s.trim())
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.short_hex())
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Digest the canonical compact JSON form of `collection`.
pub fn digest(collection: &Collection) -> TypeResult<ContentDigest> {
    let data = serde_json::to_vec(&canonicalise(collection))?;
    let mut hasher = blake3::Hasher::new();
    hasher.update(DOCUMENT_DOMAIN);
    hasher.update(&data);
    Ok(ContentDigest(*hasher.finalize().as_bytes()))
}
