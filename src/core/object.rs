//! core::object
//!
//! Content-addressable object storage.
//!
//! # Design
//!
//! Objects are persisted under `.strata/objects/<kind>/` using a 2-character
//! prefix directory scheme: id `abcdef...` lands at `ab/cdef...`. An object's
//! id is the digest of its encoded bytes, so the store is append-only and
//! deduplicating by construction: re-putting identical content is a no-op
//! success, and no update or delete operation exists. That immutability is
//! what makes ancestry and equality checks by id alone valid.
//!
//! Blobs and commits live in separate regions so an id is always looked up
//! with the kind it was stored under.
//!
//! # Example
//!
//! ```
//! use strata::core::blob::Blob;
//! use strata::core::object::ObjectStore;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = ObjectStore::new(dir.path().to_path_buf());
//!
//! let id = store.put(&Blob::new(b"contents".to_vec())).unwrap();
//! let back: Blob = store.get(&id).unwrap();
//! assert_eq!(back.content(), b"contents");
//! ```

use std::fs;
use std::path::PathBuf;

use crate::core::error::{Error, Result};
use crate::core::types::ObjectId;

/// The kind of a stored object, selecting its storage region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Commit,
}

impl ObjectKind {
    /// Region directory name under `objects/`.
    fn region(self) -> &'static str {
        match self {
            ObjectKind::Blob => "blobs",
            ObjectKind::Commit => "commits",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Blob => write!(f, "blob"),
            ObjectKind::Commit => write!(f, "commit"),
        }
    }
}

/// A value that can be persisted in the object store.
///
/// Each entity pins its own versioned encoding with stable field ordering,
/// so content hashes are reproducible across runs and over time. The
/// contract: `decode(encode(v))` reconstructs `v`, and `encode` is a pure
/// function of the value.
pub trait StoreObject: Sized {
    /// Which storage region this entity lives in.
    const KIND: ObjectKind;

    /// Encode to the canonical byte form that is hashed and persisted.
    fn encode(&self) -> Result<Vec<u8>>;

    /// Decode from the persisted byte form.
    fn decode(bytes: &[u8]) -> Result<Self>;
}

/// The content-addressable object store.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    /// Root path: `.strata/objects/`.
    root: PathBuf,
}

impl ObjectStore {
    /// Create a store rooted at the given `objects/` directory.
    pub fn new(objects_dir: PathBuf) -> Self {
        Self { root: objects_dir }
    }

    /// Create the storage regions on disk.
    pub fn init(&self) -> Result<()> {
        for kind in [ObjectKind::Blob, ObjectKind::Commit] {
            fs::create_dir_all(self.root.join(kind.region()))?;
        }
        Ok(())
    }

    /// Store an object, returning its content id.
    ///
    /// Idempotent: if an object with the same content already exists this
    /// is a no-op returning the existing id.
    pub fn put<T: StoreObject>(&self, value: &T) -> Result<ObjectId> {
        let bytes = value.encode()?;
        let id = ObjectId::digest(&bytes);
        let path = self.object_path(T::KIND, &id);

        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &bytes)?;
        }
        Ok(id)
    }

    /// Retrieve an object by id.
    ///
    /// # Errors
    ///
    /// [`Error::NoSuchCommit`] for a missing commit; a missing blob is
    /// [`Error::Corrupt`], since blob ids are only ever reached through a
    /// commit that promised they exist.
    pub fn get<T: StoreObject>(&self, id: &ObjectId) -> Result<T> {
        let path = self.object_path(T::KIND, id);
        if !path.exists() {
            return Err(match T::KIND {
                ObjectKind::Commit => Error::NoSuchCommit,
                ObjectKind::Blob => Error::Corrupt(format!("missing blob {id}")),
            });
        }
        T::decode(&fs::read(&path)?)
    }

    /// Check whether an object of the given kind exists.
    pub fn contains(&self, kind: ObjectKind, id: &ObjectId) -> bool {
        self.object_path(kind, id).exists()
    }

    /// Enumerate every stored id of a kind, in no particular order.
    pub fn list(&self, kind: ObjectKind) -> Result<Vec<ObjectId>> {
        let region = self.root.join(kind.region());
        let mut ids = Vec::new();
        for prefix_entry in fs::read_dir(&region)? {
            let prefix_entry = prefix_entry?;
            if !prefix_entry.file_type()?.is_dir() {
                continue;
            }
            let prefix = prefix_entry.file_name();
            for entry in fs::read_dir(prefix_entry.path())? {
                let entry = entry?;
                let name = format!(
                    "{}{}",
                    prefix.to_string_lossy(),
                    entry.file_name().to_string_lossy()
                );
                let id = ObjectId::new(&name)
                    .map_err(|_| Error::Corrupt(format!("malformed object name {name}")))?;
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Resolve a commit id prefix to the unique full id.
    ///
    /// A full-length id is checked directly. Shorter prefixes must be at
    /// least [`MIN_PREFIX_LEN`] characters and match exactly one stored
    /// commit.
    pub fn resolve_commit_prefix(&self, prefix: &str) -> Result<ObjectId> {
        if let Ok(id) = ObjectId::new(prefix) {
            return if self.contains(ObjectKind::Commit, &id) {
                Ok(id)
            } else {
                Err(Error::NoSuchCommit)
            };
        }
        if prefix.len() < MIN_PREFIX_LEN || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::NoSuchCommit);
        }

        let prefix = prefix.to_ascii_lowercase();
        let mut matches = self
            .list(ObjectKind::Commit)?
            .into_iter()
            .filter(|id| id.as_str().starts_with(&prefix));

        match (matches.next(), matches.next()) {
            (None, _) => Err(Error::NoSuchCommit),
            (Some(id), None) => Ok(id),
            (Some(_), Some(_)) => Err(Error::AmbiguousCommitPrefix(prefix)),
        }
    }

    /// Filesystem path for an object: `<region>/<2ch>/<62ch>`.
    fn object_path(&self, kind: ObjectKind, id: &ObjectId) -> PathBuf {
        let (prefix, rest) = id.as_str().split_at(2);
        self.root.join(kind.region()).join(prefix).join(rest)
    }
}

/// Minimum accepted length for an abbreviated commit id.
pub const MIN_PREFIX_LEN: usize = 4;
