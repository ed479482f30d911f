//! core::commit
//!
//! Immutable snapshots of the tracked file set.
//!
//! # Encoding
//!
//! A commit's identity is the digest of its encoded form, so the encoding
//! must be stable: schema-versioned JSON with fields in declaration order
//! and `files` as a `BTreeMap` (sorted keys). A commit is hashed only after
//! its file table is final; nothing mutates it afterwards.
//!
//! # Merge commits
//!
//! A merge commit is an ordinary commit whose `second_parent` is present —
//! there is no separate type. [`Commit::is_merge`] is the discriminator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::core::object::{ObjectKind, StoreObject};
use crate::core::types::{ObjectId, Timestamp};

/// Current commit encoding version.
pub const SCHEMA_VERSION: u32 = 1;

/// The tracked path → blob-id table carried by a commit.
pub type FileTable = BTreeMap<String, ObjectId>;

/// An immutable snapshot of the whole tracked file set plus metadata and
/// parent linkage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Commit {
    /// Encoding version; always [`SCHEMA_VERSION`] when produced here.
    pub schema_version: u32,

    /// Non-empty commit message.
    pub message: String,

    /// Wall-clock creation time; the Unix epoch only for the root commit.
    pub timestamp: Timestamp,

    /// Primary parent; `None` only for the root commit.
    pub parent: Option<ObjectId>,

    /// Second parent, present only on merge commits.
    pub second_parent: Option<ObjectId>,

    /// Tracked path → blob id.
    pub files: FileTable,
}

impl Commit {
    /// The root commit: no parent, empty file table, epoch timestamp.
    pub fn root(message: String, timestamp: Timestamp) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            message,
            timestamp,
            parent: None,
            second_parent: None,
            files: FileTable::new(),
        }
    }

    /// An ordinary commit carrying the given file table.
    pub fn new(message: String, parent: ObjectId, files: FileTable) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            message,
            timestamp: Timestamp::now(),
            parent: Some(parent),
            second_parent: None,
            files,
        }
    }

    /// A merge commit with two parents.
    pub fn merge(
        message: String,
        parent: ObjectId,
        second_parent: ObjectId,
        files: FileTable,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            message,
            timestamp: Timestamp::now(),
            parent: Some(parent),
            second_parent: Some(second_parent),
            files,
        }
    }

    /// Whether this commit was produced by a merge.
    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    /// Whether this is the root commit.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl StoreObject for Commit {
    const KIND: ObjectKind = ObjectKind::Commit;

    fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        let commit: Commit = serde_json::from_slice(bytes)?;
        if commit.schema_version != SCHEMA_VERSION {
            return Err(Error::Corrupt(format!(
                "unsupported commit schema version {}",
                commit.schema_version
            )));
        }
        Ok(commit)
    }
}
