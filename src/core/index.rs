//! core::index
//!
//! The staging index: the pending-change set reconciled into the next
//! commit. Stored as `.strata/index.json`.
//!
//! # Invariant
//!
//! `to_add` and `to_remove` are disjoint. Every mutation here maintains
//! that: recording an addition clears any pending removal of the same path
//! and vice versa.
//!
//! # Lifecycle
//!
//! Created empty at repository initialization; mutated by add/remove
//! operations; drained to empty whenever a commit is created or a
//! checkout/reset/merge materializes a different commit.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::fsutil::atomic_write;
use crate::core::types::ObjectId;

/// Current index encoding version.
pub const SCHEMA_VERSION: u32 = 1;

/// The mutable pending-change set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StagingIndex {
    /// Encoding version; always [`SCHEMA_VERSION`] when produced here.
    pub schema_version: u32,

    /// Paths staged for addition, with the blob id of the staged content.
    pub to_add: BTreeMap<String, ObjectId>,

    /// Paths staged for removal.
    pub to_remove: BTreeSet<String>,
}

impl Default for StagingIndex {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            to_add: BTreeMap::new(),
            to_remove: BTreeSet::new(),
        }
    }
}

impl StagingIndex {
    /// Load the index from disk, or return an empty index if absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Persist the index (atomic: temp + sync + rename).
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        atomic_write(path, json.as_bytes())
    }

    /// Stage a path for addition with the given blob id.
    ///
    /// Clears any pending removal of the path.
    pub fn record_add(&mut self, path: &str, blob: ObjectId) {
        self.to_remove.remove(path);
        self.to_add.insert(path.to_string(), blob);
    }

    /// Stage a path for removal.
    ///
    /// Clears any pending addition of the path.
    pub fn record_remove(&mut self, path: &str) {
        self.to_add.remove(path);
        self.to_remove.insert(path.to_string());
    }

    /// Drop a path from both pending sets.
    ///
    /// Used when staging turns out to be a net no-op (the working copy
    /// already matches the last commit).
    pub fn clear_path(&mut self, path: &str) {
        self.to_add.remove(path);
        self.to_remove.remove(path);
    }

    /// Remove a pending addition, reporting whether one existed.
    pub fn unstage_add(&mut self, path: &str) -> bool {
        self.to_add.remove(path).is_some()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Drain the whole index.
    pub fn clear(&mut self) {
        self.to_add.clear();
        self.to_remove.clear();
    }
}
