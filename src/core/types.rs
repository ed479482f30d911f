//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ObjectId`] - Content digest identifying a stored object
//! - [`Timestamp`] - Commit timestamp with the fixed log display format
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use strata::core::types::ObjectId;
//!
//! // Valid constructions
//! let id = ObjectId::digest(b"hello");
//! let same = ObjectId::digest(b"hello");
//! assert_eq!(id, same);
//!
//! // Invalid constructions fail at creation time
//! assert!(ObjectId::new("not-a-digest").is_err());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),
}

/// A content digest identifying a stored object.
///
/// Object ids are the SHA-256 hash of an object's serialized encoding,
/// normalized to 64 lowercase hex characters. Because the id is a pure
/// function of content, equal content always yields equal ids and the
/// object store deduplicates for free.
///
/// # Example
///
/// ```
/// use strata::core::types::ObjectId;
///
/// let id = ObjectId::digest(b"some bytes");
/// assert_eq!(id.as_str().len(), 64);
///
/// // Abbreviated form for display
/// let short = id.short(7);
/// assert_eq!(short.len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Create a validated object id from a hex string.
    ///
    /// The id is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidObjectId` unless the string is exactly
    /// 64 hex characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into().to_ascii_lowercase();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Compute the id of a byte sequence.
    ///
    /// This is the single digest primitive everything else builds on:
    /// `ObjectId::digest(encoded bytes)` is an object's identity.
    pub fn digest(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    /// Get an abbreviated form of the id.
    ///
    /// Returns the first `len` characters; if `len` exceeds the id length,
    /// returns the full id.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        if id.len() != 64 {
            return Err(TypeError::InvalidObjectId(format!(
                "expected 64 hex characters, got {}",
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidObjectId(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<String> for ObjectId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A commit timestamp.
///
/// Stored as RFC3339 UTC; displayed in the fixed log format
/// (`Thu Jan 1 00:00:00 1970 +0000`). The root commit pins the Unix
/// epoch so its id is reproducible across repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// The Unix epoch, used only by the root commit.
    pub fn epoch() -> Self {
        Self(DateTime::UNIX_EPOCH)
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%a %b %-d %H:%M:%S %Y %z"))
    }
}
