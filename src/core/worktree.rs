//! core::worktree
//!
//! Working-directory scanning and materialization.
//!
//! # Scope
//!
//! The working tree is the set of non-hidden regular files under the
//! repository root, keyed by root-relative path. Any path with a component
//! beginning with `.` is hidden and ignored — which also keeps `.strata/`
//! itself out of every scan.
//!
//! # Untracked-file guard
//!
//! Materializing a target file table refuses to touch the filesystem if it
//! would clobber an untracked file: a present path that the currently
//! checked-out commit does not track is tolerated only when the target
//! table maps it to byte-identical content. The check runs before any
//! write or delete, so a rejected materialization changes nothing.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::blob::Blob;
use crate::core::commit::FileTable;
use crate::core::error::{Error, Result};
use crate::core::object::ObjectStore;

/// Filesystem access for one repository's working directory.
#[derive(Debug, Clone)]
pub struct Worktree {
    root: PathBuf,
}

impl Worktree {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Absolute path for a tracked path.
    pub fn abs(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Whether a tracked path currently exists as a file.
    pub fn exists(&self, rel: &str) -> bool {
        self.abs(rel).is_file()
    }

    /// Read a working file's bytes.
    pub fn read(&self, rel: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.abs(rel))?)
    }

    /// Write a working file, creating parent directories as needed.
    pub fn write(&self, rel: &str, bytes: &[u8]) -> Result<()> {
        let path = self.abs(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Delete a working file if present. Empty parent directories are left
    /// in place.
    pub fn remove(&self, rel: &str) -> Result<()> {
        let path = self.abs(rel);
        if path.is_file() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Every non-hidden file currently present, as sorted relative paths.
    pub fn scan(&self) -> Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        self.scan_dir(&self.root, Path::new(""), &mut found)?;
        Ok(found)
    }

    fn scan_dir(&self, dir: &Path, rel: &Path, found: &mut BTreeSet<String>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }
            let rel_child = rel.join(&name);
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                self.scan_dir(&entry.path(), &rel_child, found)?;
            } else if file_type.is_file() {
                found.insert(rel_child.to_string_lossy().into_owned());
            }
        }
        Ok(())
    }

    /// Update the working directory to match `target`.
    ///
    /// `current` is the file table of the commit currently checked out; it
    /// defines which present files are tracked. Tracked paths absent from
    /// `target` are deleted, every `target` path is written, and anything
    /// else is left untouched.
    ///
    /// # Errors
    ///
    /// [`Error::UntrackedFileInTheWay`] if an untracked file would be
    /// clobbered (see module docs); in that case the filesystem is not
    /// modified at all.
    pub fn materialize(
        &self,
        store: &ObjectStore,
        current: &FileTable,
        target: &FileTable,
    ) -> Result<()> {
        let present = self.scan()?;

        for path in &present {
            if current.contains_key(path) {
                continue;
            }
            // Untracked. Tolerable only if the target rewrites it with the
            // exact bytes it already has.
            match target.get(path) {
                Some(id) => {
                    let blob: Blob = store.get(id)?;
                    if blob.content() != self.read(path)?.as_slice() {
                        return Err(Error::UntrackedFileInTheWay);
                    }
                }
                None => return Err(Error::UntrackedFileInTheWay),
            }
        }

        for path in current.keys() {
            if !target.contains_key(path) {
                self.remove(path)?;
            }
        }
        for (path, id) in target {
            let blob: Blob = store.get(id)?;
            self.write(path, blob.content())?;
        }
        Ok(())
    }
}
