//! core::lock
//!
//! Exclusive repository lock for mutating operations.
//!
//! # Design
//!
//! Every mutating command (add, rm, commit, branch create/delete, checkout,
//! reset, merge) holds the lock for its whole duration, so two `strata`
//! processes never interleave mutations of the branch table, HEAD, or the
//! staging index. The content-addressed object store does not need this
//! protection (identical writes are idempotent); the mutable pointers do.
//!
//! # Invariants
//!
//! - Lock acquisition is non-blocking (fails fast if locked)
//! - The lock is released automatically on drop (RAII pattern)
//! - This is an advisory lock only; it is not a multi-process guarantee

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::core::error::{Error, Result};
use crate::core::paths::RepoPaths;

/// An exclusive lock on the repository.
///
/// The lock is released when this guard is dropped, even if the operation
/// panics.
///
/// # Example
///
/// ```ignore
/// let lock = RepoLock::acquire(&paths)?;
/// assert!(lock.is_held());
/// // ... perform operations ...
/// drop(lock);
/// ```
#[derive(Debug)]
pub struct RepoLock {
    /// Path to the lock file.
    path: PathBuf,
    /// The open file handle with the lock held.
    /// When this is Some, we hold the lock.
    file: Option<File>,
}

impl RepoLock {
    /// Attempt to acquire the repository lock.
    ///
    /// Uses OS-level file locking via `fs2`, which works across processes.
    /// Non-blocking: if another process holds the lock, this returns
    /// [`Error::Locked`] immediately.
    pub fn acquire(paths: &RepoPaths) -> Result<Self> {
        let path = paths.lock_path();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                path,
                file: Some(file),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Err(Error::Locked),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Check if this guard still holds the lock.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock explicitly.
    ///
    /// Called automatically on drop; use this only to release early.
    pub fn release(&mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            FileExt::unlock(&file)?;
        }
        Ok(())
    }
}

impl Drop for RepoLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = FileExt::unlock(&file);
        }
    }
}
