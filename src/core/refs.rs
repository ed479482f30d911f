//! core::refs
//!
//! Branch and HEAD storage.
//!
//! # Storage
//!
//! Branches are one file each under `.strata/branches/`, whose content is
//! the commit id of the branch tip. `HEAD` holds the *name* of the current
//! branch. These are the only mutable pointers into the object graph.

use std::fs;

use crate::core::error::{Error, Result};
use crate::core::fsutil::atomic_write;
use crate::core::paths::RepoPaths;
use crate::core::types::ObjectId;

/// Access to the branch table and the HEAD pointer.
#[derive(Debug, Clone)]
pub struct RefStore {
    paths: RepoPaths,
}

impl RefStore {
    pub fn new(paths: RepoPaths) -> Self {
        Self { paths }
    }

    /// Create the branches directory.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.paths.branches_dir())?;
        Ok(())
    }

    /// Name of the branch HEAD points at.
    pub fn head_branch(&self) -> Result<String> {
        let name = fs::read_to_string(self.paths.head_path())?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(Error::Corrupt("empty HEAD pointer".into()));
        }
        Ok(name)
    }

    /// Point HEAD at a branch.
    pub fn set_head(&self, name: &str) -> Result<()> {
        atomic_write(&self.paths.head_path(), name.as_bytes())
    }

    /// Whether a branch exists.
    pub fn branch_exists(&self, name: &str) -> bool {
        self.paths.branch_path(name).is_file()
    }

    /// The commit id a branch points at.
    ///
    /// Looking up a missing branch is corruption here; callers that take a
    /// branch name from the user check [`RefStore::branch_exists`] first
    /// and report the appropriate user error.
    pub fn branch_tip(&self, name: &str) -> Result<ObjectId> {
        let path = self.paths.branch_path(name);
        if !path.is_file() {
            return Err(Error::Corrupt(format!("branch {name} has no tip file")));
        }
        let content = fs::read_to_string(&path)?;
        ObjectId::new(content.trim())
            .map_err(|_| Error::Corrupt(format!("branch {name} holds a malformed commit id")))
    }

    /// Move a branch to point at a commit, creating the branch if needed.
    pub fn set_branch_tip(&self, name: &str, id: &ObjectId) -> Result<()> {
        atomic_write(&self.paths.branch_path(name), id.as_str().as_bytes())
    }

    /// Delete a branch file.
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        fs::remove_file(self.paths.branch_path(name))?;
        Ok(())
    }

    /// All branch names, sorted.
    pub fn list_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.paths.branches_dir())? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_refs() -> (tempfile::TempDir, RefStore) {
        let dir = tempfile::tempdir().unwrap();
        let paths = RepoPaths::new(dir.path().to_path_buf());
        fs::create_dir_all(paths.strata_dir()).unwrap();
        let refs = RefStore::new(paths);
        refs.init().unwrap();
        (dir, refs)
    }

    #[test]
    fn head_roundtrip() {
        let (_dir, refs) = test_refs();
        refs.set_head("master").unwrap();
        assert_eq!(refs.head_branch().unwrap(), "master");
    }

    #[test]
    fn branch_tip_roundtrip() {
        let (_dir, refs) = test_refs();
        let id = ObjectId::digest(b"commit");
        refs.set_branch_tip("master", &id).unwrap();
        assert!(refs.branch_exists("master"));
        assert_eq!(refs.branch_tip("master").unwrap(), id);
    }

    #[test]
    fn missing_branch_tip_is_corrupt() {
        let (_dir, refs) = test_refs();
        assert!(matches!(refs.branch_tip("ghost"), Err(Error::Corrupt(_))));
    }

    #[test]
    fn list_is_sorted() {
        let (_dir, refs) = test_refs();
        let id = ObjectId::digest(b"c");
        for name in ["zeta", "alpha", "master"] {
            refs.set_branch_tip(name, &id).unwrap();
        }
        assert_eq!(refs.list_branches().unwrap(), vec!["alpha", "master", "zeta"]);
    }

    #[test]
    fn delete_branch_removes_the_file() {
        let (_dir, refs) = test_refs();
        let id = ObjectId::digest(b"c");
        refs.set_branch_tip("feature", &id).unwrap();
        refs.delete_branch("feature").unwrap();
        assert!(!refs.branch_exists("feature"));
    }
}
