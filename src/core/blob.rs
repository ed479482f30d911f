//! core::blob
//!
//! Immutable file snapshots.
//!
//! A blob is one file's bytes at one point in time, or a synthesized
//! conflict-marked byte sequence produced by the merge engine. Blob
//! encoding v1 is the raw content itself, so two files with identical
//! bytes share a single stored blob.

use crate::core::error::Result;
use crate::core::object::{ObjectKind, StoreObject};

/// An immutable byte payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    content: Vec<u8>,
}

impl Blob {
    /// Snapshot the given bytes.
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    /// Synthesize a conflict blob from the two sides of a merge.
    ///
    /// The fixed textual template places the current side first and the
    /// given side second; a side absent from the merge contributes an
    /// empty string. Each side's bytes are substituted verbatim.
    ///
    /// # Example
    ///
    /// ```
    /// use strata::core::blob::Blob;
    ///
    /// let ours = Blob::new(b"left\n".to_vec());
    /// let theirs = Blob::new(b"right\n".to_vec());
    /// let merged = Blob::conflict(Some(&ours), Some(&theirs));
    /// assert_eq!(
    ///     merged.content(),
    ///     b"<<<<<<< HEAD\nleft\n=======\nright\n>>>>>>>\n"
    /// );
    /// ```
    pub fn conflict(current: Option<&Blob>, given: Option<&Blob>) -> Self {
        let mut content = Vec::new();
        content.extend_from_slice(b"<<<<<<< HEAD\n");
        if let Some(blob) = current {
            content.extend_from_slice(&blob.content);
        }
        content.extend_from_slice(b"=======\n");
        if let Some(blob) = given {
            content.extend_from_slice(&blob.content);
        }
        content.extend_from_slice(b">>>>>>>\n");
        Self { content }
    }

    /// The payload bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Consume the blob, returning its bytes.
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}

impl StoreObject for Blob {
    const KIND: ObjectKind = ObjectKind::Blob;

    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.content.clone())
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            content: bytes.to_vec(),
        })
    }
}
