//! core::paths
//!
//! Centralized path routing for repository storage locations.
//!
//! # Storage Layout
//!
//! All persistent state lives under `<root>/.strata/`:
//! - `objects/blobs/` - blob payloads, content-addressed
//! - `objects/commits/` - commit records, content-addressed
//! - `branches/` - one file per branch (content = commit id)
//! - `HEAD` - name of the current branch
//! - `index.json` - the staging index
//! - `lock` - exclusive advisory lock file
//!
//! No code outside this module computes `.strata/...` paths directly.
//!
//! # Example
//!
//! ```
//! use strata::core::paths::RepoPaths;
//! use std::path::PathBuf;
//!
//! let paths = RepoPaths::new(PathBuf::from("/work"));
//! assert_eq!(paths.head_path(), PathBuf::from("/work/.strata/HEAD"));
//! assert_eq!(paths.branch_path("master"), PathBuf::from("/work/.strata/branches/master"));
//! ```

use std::path::{Path, PathBuf};

/// Name of the repository state directory.
pub const STRATA_DIR: &str = ".strata";

/// Centralized path routing for repository storage.
///
/// Constructed once per invocation and carried inside the repository
/// handle, replacing any process-global notion of "the current repo".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    /// Root of the working directory (where `.strata/` lives).
    root: PathBuf,
}

impl RepoPaths {
    /// Create path routing rooted at the given working directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The working-directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/.strata/`
    pub fn strata_dir(&self) -> PathBuf {
        self.root.join(STRATA_DIR)
    }

    /// `<root>/.strata/objects/`
    pub fn objects_dir(&self) -> PathBuf {
        self.strata_dir().join("objects")
    }

    /// `<root>/.strata/branches/`
    pub fn branches_dir(&self) -> PathBuf {
        self.strata_dir().join("branches")
    }

    /// `<root>/.strata/branches/<name>`
    pub fn branch_path(&self, name: &str) -> PathBuf {
        self.branches_dir().join(name)
    }

    /// `<root>/.strata/HEAD`
    pub fn head_path(&self) -> PathBuf {
        self.strata_dir().join("HEAD")
    }

    /// `<root>/.strata/index.json`
    pub fn index_path(&self) -> PathBuf {
        self.strata_dir().join("index.json")
    }

    /// `<root>/.strata/lock`
    pub fn lock_path(&self) -> PathBuf {
        self.strata_dir().join("lock")
    }

    /// Whether a repository exists at this root.
    pub fn is_initialized(&self) -> bool {
        self.strata_dir().is_dir()
    }
}
