//! core::ancestry
//!
//! Common-ancestor computation over the commit DAG.
//!
//! # Algorithm
//!
//! To merge `given` into `current`, first collect the full ancestor set of
//! `given` — every commit reachable through `parent` *and* `second_parent`
//! edges, `given` itself included. Then walk outward from `current` in
//! breadth-first order (so in order of increasing distance), again through
//! both parent edges; the first commit found in the set is the split point.
//!
//! Both directions traverse merge parents symmetrically. A walk that only
//! follows the primary chain can miss the true nearest ancestor in
//! histories with overlapping merges.
//!
//! A connected history rooted at a single commit always has a common
//! ancestor; finding none means the repository is corrupt.

use std::collections::{HashSet, VecDeque};

use crate::core::commit::Commit;
use crate::core::error::{Error, Result};
use crate::core::object::ObjectStore;
use crate::core::types::ObjectId;

/// How two commits relate for merging purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeBase {
    /// The given commit is already an ancestor of the current commit;
    /// merging it is a no-op.
    GivenIsAncestor,

    /// The current commit is an ancestor of the given commit; the merge is
    /// a fast-forward (the branch pointer can simply advance).
    CurrentIsAncestor,

    /// A genuine divergence; carries the nearest common ancestor.
    Split(ObjectId),
}

/// Collect every ancestor of `tip`, inclusive, across both parent edges.
pub fn ancestor_set(store: &ObjectStore, tip: &ObjectId) -> Result<HashSet<ObjectId>> {
    let mut seen = HashSet::new();
    let mut pending = vec![tip.clone()];

    while let Some(id) = pending.pop() {
        if !seen.insert(id.clone()) {
            continue;
        }
        let commit: Commit = store.get(&id)?;
        if let Some(parent) = commit.parent {
            pending.push(parent);
        }
        if let Some(second) = commit.second_parent {
            pending.push(second);
        }
    }
    Ok(seen)
}

/// Find the split point between `current` and `given`.
///
/// The caller is expected to have rejected `current == given` already
/// (that is a self-merge, not an ancestry question).
pub fn merge_base(
    store: &ObjectStore,
    current: &ObjectId,
    given: &ObjectId,
) -> Result<MergeBase> {
    let given_ancestors = ancestor_set(store, given)?;

    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(current.clone());

    while let Some(id) = queue.pop_front() {
        if !seen.insert(id.clone()) {
            continue;
        }
        if given_ancestors.contains(&id) {
            return Ok(if id == *given {
                MergeBase::GivenIsAncestor
            } else if id == *current {
                MergeBase::CurrentIsAncestor
            } else {
                MergeBase::Split(id)
            });
        }
        let commit: Commit = store.get(&id)?;
        if let Some(parent) = commit.parent {
            queue.push_back(parent);
        }
        if let Some(second) = commit.second_parent {
            queue.push_back(second);
        }
    }

    Err(Error::Corrupt(format!(
        "commits {} and {} share no ancestor",
        current.short(7),
        given.short(7)
    )))
}
