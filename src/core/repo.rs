//! core::repo
//!
//! The repository handle and every engine operation.
//!
//! # Design
//!
//! A [`Repository`] is an explicit handle holding resolved paths and store
//! accessors, constructed once per invocation and passed into every
//! operation — there is no process-global "current repository". Commands
//! parse arguments, call one operation here, and format the result; all
//! state mutation lives behind this type.
//!
//! Mutating operations hold the exclusive repository lock for their whole
//! duration. Each checks its preconditions before touching any state, so a
//! user error leaves the repository exactly as it was.

use std::path::Path;

use crate::core::ancestry::{self, MergeBase};
use crate::core::blob::Blob;
use crate::core::commit::Commit;
use crate::core::error::{Error, Result};
use crate::core::index::StagingIndex;
use crate::core::lock::RepoLock;
use crate::core::merge;
use crate::core::object::{ObjectKind, ObjectStore};
use crate::core::paths::RepoPaths;
use crate::core::refs::RefStore;
use crate::core::types::{ObjectId, Timestamp};
use crate::core::worktree::Worktree;

/// Branch created by `init`.
pub const DEFAULT_BRANCH: &str = "master";

/// Message of the root commit.
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// One entry of a history listing.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: ObjectId,
    pub commit: Commit,
}

/// What `status` reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// All branch names, sorted.
    pub branches: Vec<String>,
    /// The branch HEAD points at.
    pub current_branch: String,
    /// Paths staged for addition, sorted.
    pub staged: Vec<String>,
    /// Paths staged for removal, sorted.
    pub removed: Vec<String>,
}

/// The result of a merge operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch is already in the current history; nothing to do.
    GivenIsAncestor,
    /// The current branch was behind and its pointer advanced to the given
    /// tip; no merge commit was created.
    FastForward(ObjectId),
    /// A merge commit was created. `conflicts` lists every path that got a
    /// synthesized conflict blob, in path order.
    Merged {
        id: ObjectId,
        conflicts: Vec<String>,
    },
}

/// A handle to one repository: resolved paths plus store accessors.
#[derive(Debug)]
pub struct Repository {
    paths: RepoPaths,
    objects: ObjectStore,
    refs: RefStore,
    worktree: Worktree,
}

impl Repository {
    /// Create a repository in `root`, with the root commit and the default
    /// branch checked out.
    pub fn init(root: &Path) -> Result<Self> {
        let paths = RepoPaths::new(root.to_path_buf());
        if paths.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }

        std::fs::create_dir_all(paths.strata_dir())?;
        let repo = Self::build(paths);
        repo.objects.init()?;
        repo.refs.init()?;

        let root_commit = Commit::root(ROOT_COMMIT_MESSAGE.into(), Timestamp::epoch());
        let root_id = repo.objects.put(&root_commit)?;
        repo.refs.set_branch_tip(DEFAULT_BRANCH, &root_id)?;
        repo.refs.set_head(DEFAULT_BRANCH)?;
        StagingIndex::default().save(&repo.paths.index_path())?;

        Ok(repo)
    }

    /// Open the repository rooted at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        let paths = RepoPaths::new(root.to_path_buf());
        if !paths.is_initialized() {
            return Err(Error::Uninitialized);
        }
        Ok(Self::build(paths))
    }

    fn build(paths: RepoPaths) -> Self {
        let objects = ObjectStore::new(paths.objects_dir());
        let refs = RefStore::new(paths.clone());
        let worktree = Worktree::new(paths.root().to_path_buf());
        Self {
            paths,
            objects,
            refs,
            worktree,
        }
    }

    /// The working-directory root.
    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    /// The object store (read access for callers that format output).
    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Id of the commit HEAD's branch points at.
    pub fn head_id(&self) -> Result<ObjectId> {
        let branch = self.refs.head_branch()?;
        self.refs.branch_tip(&branch)
    }

    fn head_commit(&self) -> Result<(ObjectId, Commit)> {
        let id = self.head_id()?;
        let commit = self.objects.get(&id)?;
        Ok((id, commit))
    }

    /// The current branch's commit chain, most recent first.
    ///
    /// Follows primary parents only; a merge commit appears once and its
    /// second parent's history is not interleaved.
    pub fn log(&self) -> Result<Vec<LogEntry>> {
        let mut entries = Vec::new();
        let mut next = Some(self.head_id()?);
        while let Some(id) = next {
            let commit: Commit = self.objects.get(&id)?;
            next = commit.parent.clone();
            entries.push(LogEntry { id, commit });
        }
        Ok(entries)
    }

    /// Every commit ever stored, in no particular order.
    pub fn global_log(&self) -> Result<Vec<LogEntry>> {
        let mut entries = Vec::new();
        for id in self.objects.list(ObjectKind::Commit)? {
            let commit: Commit = self.objects.get(&id)?;
            entries.push(LogEntry { id, commit });
        }
        Ok(entries)
    }

    /// Ids of all commits whose message is exactly `message`.
    pub fn find(&self, message: &str) -> Result<Vec<ObjectId>> {
        let ids: Vec<ObjectId> = self
            .global_log()?
            .into_iter()
            .filter(|entry| entry.commit.message == message)
            .map(|entry| entry.id)
            .collect();
        if ids.is_empty() {
            return Err(Error::NoCommitWithMessage);
        }
        Ok(ids)
    }

    /// Branches and staged paths, each sorted.
    pub fn status(&self) -> Result<StatusReport> {
        let index = self.load_index()?;
        Ok(StatusReport {
            branches: self.refs.list_branches()?,
            current_branch: self.refs.head_branch()?,
            staged: index.to_add.keys().cloned().collect(),
            removed: index.to_remove.iter().cloned().collect(),
        })
    }

    // ------------------------------------------------------------------
    // Staging
    // ------------------------------------------------------------------

    /// Stage a working file for addition.
    ///
    /// If the file's content already matches what HEAD tracks for the
    /// path, the net effect is to clear any pending add/remove instead.
    pub fn stage_for_add(&self, path: &str) -> Result<()> {
        let _lock = RepoLock::acquire(&self.paths)?;

        if !self.worktree.exists(path) {
            return Err(Error::FileNotFound);
        }
        let blob = Blob::new(self.worktree.read(path)?);
        let blob_id = self.objects.put(&blob)?;

        let (_, head) = self.head_commit()?;
        let mut index = self.load_index()?;
        if head.files.get(path) == Some(&blob_id) {
            index.clear_path(path);
        } else {
            index.record_add(path, blob_id);
        }
        index.save(&self.paths.index_path())
    }

    /// Stage a path for removal.
    ///
    /// Unstages any pending addition; if the path is tracked in HEAD it is
    /// recorded for removal and deleted from the working directory.
    pub fn stage_for_remove(&self, path: &str) -> Result<()> {
        let _lock = RepoLock::acquire(&self.paths)?;

        let (_, head) = self.head_commit()?;
        let mut index = self.load_index()?;

        let was_staged = index.unstage_add(path);
        let tracked = head.files.contains_key(path);
        if !was_staged && !tracked {
            return Err(Error::NothingToRemove);
        }
        if tracked {
            index.record_remove(path);
            self.worktree.remove(path)?;
        }
        index.save(&self.paths.index_path())
    }

    // ------------------------------------------------------------------
    // Commits
    // ------------------------------------------------------------------

    /// Reconcile the staging index into a new commit on HEAD's branch.
    pub fn commit(&self, message: &str) -> Result<ObjectId> {
        let _lock = RepoLock::acquire(&self.paths)?;
        self.commit_locked(message)
    }

    fn commit_locked(&self, message: &str) -> Result<ObjectId> {
        if message.is_empty() {
            return Err(Error::EmptyMessage);
        }
        let mut index = self.load_index()?;
        if index.is_empty() {
            return Err(Error::NothingToCommit);
        }

        let (head_id, head) = self.head_commit()?;
        let mut files = head.files.clone();
        for (path, blob_id) in &index.to_add {
            files.insert(path.clone(), blob_id.clone());
        }
        for path in &index.to_remove {
            files.remove(path);
        }

        let commit = Commit::new(message.into(), head_id, files);
        let id = self.objects.put(&commit)?;

        let branch = self.refs.head_branch()?;
        self.refs.set_branch_tip(&branch, &id)?;
        index.clear();
        index.save(&self.paths.index_path())?;
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Branches
    // ------------------------------------------------------------------

    /// Create a branch pointing at the current commit.
    pub fn create_branch(&self, name: &str) -> Result<()> {
        let _lock = RepoLock::acquire(&self.paths)?;

        validate_branch_name(name)?;
        if self.refs.branch_exists(name) {
            return Err(Error::BranchExists);
        }
        let tip = self.head_id()?;
        self.refs.set_branch_tip(name, &tip)
    }

    /// Delete a branch. The checked-out branch cannot be deleted.
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        let _lock = RepoLock::acquire(&self.paths)?;

        if !self.refs.branch_exists(name) {
            return Err(Error::BranchMissing);
        }
        if self.refs.head_branch()? == name {
            return Err(Error::RemoveCurrentBranch);
        }
        self.refs.delete_branch(name)
    }

    // ------------------------------------------------------------------
    // Checkout and reset
    // ------------------------------------------------------------------

    /// Switch HEAD to another branch, materializing its tip commit.
    pub fn checkout_branch(&self, name: &str) -> Result<()> {
        let _lock = RepoLock::acquire(&self.paths)?;

        if self.refs.head_branch()? == name {
            return Err(Error::CheckoutCurrentBranch);
        }
        if !self.refs.branch_exists(name) {
            return Err(Error::NoSuchBranch);
        }

        let (_, current) = self.head_commit()?;
        let target_id = self.refs.branch_tip(name)?;
        let target: Commit = self.objects.get(&target_id)?;

        self.worktree
            .materialize(&self.objects, &current.files, &target.files)?;
        self.refs.set_head(name)?;
        self.clear_index()
    }

    /// Restore one file from the current commit.
    pub fn checkout_file(&self, path: &str) -> Result<()> {
        let _lock = RepoLock::acquire(&self.paths)?;
        let (_, head) = self.head_commit()?;
        self.restore_file(&head, path)
    }

    /// Restore one file as of the given commit (id or unique prefix).
    pub fn checkout_file_at(&self, commit_id: &str, path: &str) -> Result<()> {
        let _lock = RepoLock::acquire(&self.paths)?;
        let id = self.objects.resolve_commit_prefix(commit_id)?;
        let commit: Commit = self.objects.get(&id)?;
        self.restore_file(&commit, path)
    }

    fn restore_file(&self, commit: &Commit, path: &str) -> Result<()> {
        let blob_id = commit.files.get(path).ok_or(Error::FileNotInCommit)?;
        let blob: Blob = self.objects.get(blob_id)?;
        self.worktree.write(path, blob.content())
    }

    /// Move HEAD's branch to the given commit and materialize it.
    pub fn reset(&self, commit_id: &str) -> Result<()> {
        let _lock = RepoLock::acquire(&self.paths)?;

        let id = self.objects.resolve_commit_prefix(commit_id)?;
        let target: Commit = self.objects.get(&id)?;
        let (_, current) = self.head_commit()?;

        self.worktree
            .materialize(&self.objects, &current.files, &target.files)?;
        let branch = self.refs.head_branch()?;
        self.refs.set_branch_tip(&branch, &id)?;
        self.clear_index()
    }

    // ------------------------------------------------------------------
    // Merge
    // ------------------------------------------------------------------

    /// Merge the given branch into the current one.
    pub fn merge(&self, given_branch: &str) -> Result<MergeOutcome> {
        let _lock = RepoLock::acquire(&self.paths)?;

        if !self.load_index()?.is_empty() {
            return Err(Error::UncommittedChanges);
        }
        if !self.refs.branch_exists(given_branch) {
            return Err(Error::BranchMissing);
        }

        let current_branch = self.refs.head_branch()?;
        let (current_id, current) = self.head_commit()?;
        let given_id = self.refs.branch_tip(given_branch)?;
        if current_id == given_id {
            return Err(Error::SelfMerge);
        }
        let given: Commit = self.objects.get(&given_id)?;

        // Any untracked file aborts the merge before anything is decided.
        for path in self.worktree.scan()? {
            if !current.files.contains_key(&path) {
                return Err(Error::UntrackedFileInTheWay);
            }
        }

        match ancestry::merge_base(&self.objects, &current_id, &given_id)? {
            MergeBase::GivenIsAncestor => Ok(MergeOutcome::GivenIsAncestor),
            MergeBase::CurrentIsAncestor => {
                self.worktree
                    .materialize(&self.objects, &current.files, &given.files)?;
                self.refs.set_branch_tip(&current_branch, &given_id)?;
                self.clear_index()?;
                Ok(MergeOutcome::FastForward(given_id))
            }
            MergeBase::Split(split_id) => {
                let split: Commit = self.objects.get(&split_id)?;
                let resolution = merge::resolve(&split.files, &current.files, &given.files);

                let mut files = resolution.files;
                let mut conflicts = Vec::with_capacity(resolution.conflicts.len());
                for conflict in resolution.conflicts {
                    let ours = self.load_side(&conflict.current)?;
                    let theirs = self.load_side(&conflict.given)?;
                    let merged = Blob::conflict(ours.as_ref(), theirs.as_ref());
                    let blob_id = self.objects.put(&merged)?;
                    files.insert(conflict.path.clone(), blob_id);
                    conflicts.push(conflict.path);
                }

                let message = format!("Merged {given_branch} into {current_branch}.");
                let commit = Commit::merge(message, current_id, given_id, files);
                let id = self.objects.put(&commit)?;

                self.refs.set_branch_tip(&current_branch, &id)?;
                self.worktree
                    .materialize(&self.objects, &current.files, &commit.files)?;
                self.clear_index()?;
                Ok(MergeOutcome::Merged { id, conflicts })
            }
        }
    }

    fn load_side(&self, id: &Option<ObjectId>) -> Result<Option<Blob>> {
        match id {
            Some(id) => Ok(Some(self.objects.get(id)?)),
            None => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Index plumbing
    // ------------------------------------------------------------------

    fn load_index(&self) -> Result<StagingIndex> {
        StagingIndex::load(&self.paths.index_path())
    }

    fn clear_index(&self) -> Result<()> {
        StagingIndex::default().save(&self.paths.index_path())
    }
}

/// A branch name must be usable as a file name under `branches/`.
fn validate_branch_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.starts_with('.')
        || name.contains('/')
        || name.contains('\\')
        || name.chars().any(|c| c.is_ascii_control());
    if bad {
        return Err(Error::Usage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_names_must_be_plain_file_names() {
        assert!(validate_branch_name("feature").is_ok());
        assert!(validate_branch_name("fix-123").is_ok());
        assert!(validate_branch_name("").is_err());
        assert!(validate_branch_name(".hidden").is_err());
        assert!(validate_branch_name("a/b").is_err());
        assert!(validate_branch_name("..").is_err());
    }
}
