//! Integration tests for merging, ancestry, and conflict synthesis.
//!
//! Each scenario builds a small history across two branches in a temp
//! directory, merges, and checks the resulting commit, working tree,
//! and conflict reports.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use strata::core::error::Error;
use strata::core::repo::{MergeOutcome, Repository, DEFAULT_BRANCH};
use strata::core::types::ObjectId;

// =============================================================================
// Test Fixtures
// =============================================================================

struct TestRepo {
    dir: TempDir,
    repo: Repository,
}

impl TestRepo {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let repo = Repository::init(dir.path()).expect("init failed");
        Self { dir, repo }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write_file(&self, name: &str, content: &str) {
        fs::write(self.path().join(name), content).unwrap();
    }

    fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).unwrap()
    }

    fn file_exists(&self, name: &str) -> bool {
        self.path().join(name).is_file()
    }

    fn commit_file(&self, name: &str, content: &str, message: &str) -> ObjectId {
        self.write_file(name, content);
        self.repo.stage_for_add(name).expect("add failed");
        self.repo.commit(message).expect("commit failed")
    }

    fn rm_and_commit(&self, name: &str, message: &str) -> ObjectId {
        self.repo.stage_for_remove(name).expect("rm failed");
        self.repo.commit(message).expect("commit failed")
    }

    fn checkout(&self, branch: &str) {
        self.repo.checkout_branch(branch).expect("checkout failed");
    }

    fn branch(&self, name: &str) {
        self.repo.create_branch(name).expect("branch failed");
    }

    /// Split the history: commit `base` content on master, branch off
    /// `side`, leaving both branches at the split commit.
    fn split_at(&self, name: &str, content: &str) -> ObjectId {
        let split = self.commit_file(name, content, "split");
        self.branch("side");
        split
    }
}

fn expect_merged(outcome: MergeOutcome) -> (ObjectId, Vec<String>) {
    match outcome {
        MergeOutcome::Merged { id, conflicts } => (id, conflicts),
        other => panic!("expected a merge commit, got {other:?}"),
    }
}

// =============================================================================
// Preconditions
// =============================================================================

#[test]
fn merge_unknown_branch_fails() {
    let t = TestRepo::new();
    assert!(matches!(t.repo.merge("ghost"), Err(Error::BranchMissing)));
}

#[test]
fn merge_with_staged_changes_fails() {
    let t = TestRepo::new();
    t.split_at("a.txt", "base");
    t.write_file("a.txt", "pending");
    t.repo.stage_for_add("a.txt").unwrap();

    assert!(matches!(
        t.repo.merge("side"),
        Err(Error::UncommittedChanges)
    ));
}

#[test]
fn merge_branch_at_same_commit_is_self_merge() {
    let t = TestRepo::new();
    t.split_at("a.txt", "base");
    // "side" still points at the same commit as master.
    assert!(matches!(t.repo.merge("side"), Err(Error::SelfMerge)));
}

#[test]
fn merge_with_untracked_file_aborts_untouched() {
    let t = TestRepo::new();
    t.split_at("a.txt", "base");
    t.checkout("side");
    t.commit_file("a.txt", "side version", "change on side");
    t.checkout(DEFAULT_BRANCH);

    t.write_file("stray.txt", "mine");
    let head_before = t.repo.head_id().unwrap();

    assert!(matches!(
        t.repo.merge("side"),
        Err(Error::UntrackedFileInTheWay)
    ));
    assert_eq!(t.repo.head_id().unwrap(), head_before);
    assert_eq!(t.read_file("stray.txt"), "mine");
    assert_eq!(t.read_file("a.txt"), "base");
}

// =============================================================================
// Ancestor / fast-forward outcomes
// =============================================================================

#[test]
fn merging_an_ancestor_branch_is_a_noop() {
    let t = TestRepo::new();
    t.split_at("a.txt", "base");
    // master moves ahead; side stays behind.
    t.commit_file("a.txt", "newer", "ahead");

    let head_before = t.repo.head_id().unwrap();
    assert_eq!(t.repo.merge("side").unwrap(), MergeOutcome::GivenIsAncestor);
    assert_eq!(t.repo.head_id().unwrap(), head_before);
    assert_eq!(t.read_file("a.txt"), "newer");
}

#[test]
fn merging_a_descendant_branch_fast_forwards() {
    let t = TestRepo::new();
    t.split_at("a.txt", "base");
    t.checkout("side");
    let side_tip = t.commit_file("a.txt", "ahead", "side ahead");
    t.checkout(DEFAULT_BRANCH);

    assert_eq!(
        t.repo.merge("side").unwrap(),
        MergeOutcome::FastForward(side_tip.clone())
    );
    // The pointer advanced to the given tip; no merge commit exists.
    assert_eq!(t.repo.head_id().unwrap(), side_tip);
    assert_eq!(t.read_file("a.txt"), "ahead");
    assert!(t.repo.log().unwrap().iter().all(|e| !e.commit.is_merge()));
}

// =============================================================================
// Genuine three-way merges
// =============================================================================

#[test]
fn merge_takes_changes_from_the_given_side() {
    let t = TestRepo::new();
    t.split_at("a.txt", "base");
    t.checkout("side");
    t.commit_file("b.txt", "added on side", "add b");
    t.checkout(DEFAULT_BRANCH);
    t.commit_file("c.txt", "added on master", "add c");

    let (id, conflicts) = expect_merged(t.repo.merge("side").unwrap());
    assert!(conflicts.is_empty());

    // Both sides' additions land; the base file survives untouched.
    assert_eq!(t.read_file("a.txt"), "base");
    assert_eq!(t.read_file("b.txt"), "added on side");
    assert_eq!(t.read_file("c.txt"), "added on master");

    let entries = t.repo.log().unwrap();
    assert_eq!(entries[0].id, id);
    assert_eq!(entries[0].commit.message, "Merged side into master.");
    assert!(entries[0].commit.is_merge());
}

#[test]
fn merge_commit_links_both_parents() {
    let t = TestRepo::new();
    t.split_at("a.txt", "base");
    t.checkout("side");
    let side_tip = t.commit_file("b.txt", "2", "on side");
    t.checkout(DEFAULT_BRANCH);
    let master_tip = t.commit_file("c.txt", "3", "on master");

    let (id, _) = expect_merged(t.repo.merge("side").unwrap());
    let merge_commit: strata::core::commit::Commit = t.repo.objects().get(&id).unwrap();
    assert_eq!(merge_commit.parent, Some(master_tip));
    assert_eq!(merge_commit.second_parent, Some(side_tip));
}

#[test]
fn divergent_edits_synthesize_a_conflict_blob() {
    let t = TestRepo::new();
    let split = t.split_at("file.txt", "base\n");
    t.checkout("side");
    t.commit_file("file.txt", "theirs\n", "side edit");
    t.checkout(DEFAULT_BRANCH);
    t.commit_file("file.txt", "ours\n", "master edit");

    let (id, conflicts) = expect_merged(t.repo.merge("side").unwrap());
    assert_eq!(conflicts, vec!["file.txt".to_string()]);

    // The conflict blob combines both sides, current first.
    assert_eq!(
        t.read_file("file.txt"),
        "<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>>\n"
    );

    // The merge commit references the synthesized blob, not either side's.
    let merge_commit: strata::core::commit::Commit = t.repo.objects().get(&id).unwrap();
    let conflict_blob = &merge_commit.files["file.txt"];
    assert_ne!(conflict_blob, &ObjectId::digest(b"ours\n"));
    assert_ne!(conflict_blob, &ObjectId::digest(b"theirs\n"));
    assert_ne!(conflict_blob, &ObjectId::digest(b"base\n"));

    // Sanity: the split commit still records the original content.
    let split_commit: strata::core::commit::Commit = t.repo.objects().get(&split).unwrap();
    assert_eq!(split_commit.files["file.txt"], ObjectId::digest(b"base\n"));
}

#[test]
fn same_edit_on_both_sides_merges_cleanly() {
    let t = TestRepo::new();
    t.split_at("a.txt", "base");
    t.checkout("side");
    t.commit_file("a.txt", "same new", "side edit");
    t.checkout(DEFAULT_BRANCH);
    t.commit_file("a.txt", "same new", "master edit");

    let (_, conflicts) = expect_merged(t.repo.merge("side").unwrap());
    assert!(conflicts.is_empty());
    assert_eq!(t.read_file("a.txt"), "same new");
}

#[test]
fn divergent_additions_conflict() {
    let t = TestRepo::new();
    t.split_at("base.txt", "base");
    t.checkout("side");
    t.commit_file("new.txt", "theirs\n", "side adds");
    t.checkout(DEFAULT_BRANCH);
    t.commit_file("new.txt", "ours\n", "master adds");

    let (_, conflicts) = expect_merged(t.repo.merge("side").unwrap());
    assert_eq!(conflicts, vec!["new.txt".to_string()]);
    assert_eq!(
        t.read_file("new.txt"),
        "<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>>\n"
    );
}

#[test]
fn deletion_on_given_side_removes_the_file() {
    let t = TestRepo::new();
    t.split_at("doomed.txt", "base");
    t.checkout("side");
    t.rm_and_commit("doomed.txt", "side removes");
    t.checkout(DEFAULT_BRANCH);
    // master needs its own motion so this is not a fast-forward.
    t.commit_file("other.txt", "x", "master adds");

    let (id, conflicts) = expect_merged(t.repo.merge("side").unwrap());
    assert!(conflicts.is_empty());
    assert!(!t.file_exists("doomed.txt"));
    let merge_commit: strata::core::commit::Commit = t.repo.objects().get(&id).unwrap();
    assert!(!merge_commit.files.contains_key("doomed.txt"));
}

#[test]
fn edit_versus_deletion_conflicts_with_one_empty_side() {
    let t = TestRepo::new();
    t.split_at("file.txt", "base\n");
    t.checkout("side");
    t.rm_and_commit("file.txt", "side removes");
    t.checkout(DEFAULT_BRANCH);
    t.commit_file("file.txt", "ours\n", "master edits");

    let (_, conflicts) = expect_merged(t.repo.merge("side").unwrap());
    assert_eq!(conflicts, vec!["file.txt".to_string()]);
    // The absent side contributes an empty string.
    assert_eq!(t.read_file("file.txt"), "<<<<<<< HEAD\nours\n=======\n>>>>>>>\n");
}

#[test]
fn deletion_versus_edit_conflicts_the_other_way() {
    let t = TestRepo::new();
    t.split_at("file.txt", "base\n");
    t.checkout("side");
    t.commit_file("file.txt", "theirs\n", "side edits");
    t.checkout(DEFAULT_BRANCH);
    t.rm_and_commit("file.txt", "master removes");

    let (_, conflicts) = expect_merged(t.repo.merge("side").unwrap());
    assert_eq!(conflicts, vec!["file.txt".to_string()]);
    assert_eq!(t.read_file("file.txt"), "<<<<<<< HEAD\n=======\ntheirs\n>>>>>>>\n");
}

#[test]
fn merge_clears_the_staging_index() {
    let t = TestRepo::new();
    t.split_at("a.txt", "base");
    t.checkout("side");
    t.commit_file("b.txt", "2", "on side");
    t.checkout(DEFAULT_BRANCH);
    t.commit_file("c.txt", "3", "on master");

    expect_merged(t.repo.merge("side").unwrap());
    let status = t.repo.status().unwrap();
    assert!(status.staged.is_empty());
    assert!(status.removed.is_empty());
}

// =============================================================================
// Ancestry through merge commits
// =============================================================================

#[test]
fn merging_across_a_previous_merge_finds_the_right_base() {
    let t = TestRepo::new();
    t.split_at("a.txt", "base");
    t.checkout("side");
    t.commit_file("side.txt", "s", "side work");
    t.checkout(DEFAULT_BRANCH);
    t.commit_file("master.txt", "m", "master work");

    // First merge brings side's history into master.
    expect_merged(t.repo.merge("side").unwrap());

    // side moves on; its history is reachable from master only through
    // the merge commit's second parent.
    t.checkout("side");
    t.commit_file("side2.txt", "s2", "more side work");
    t.checkout(DEFAULT_BRANCH);

    let (_, conflicts) = expect_merged(t.repo.merge("side").unwrap());
    assert!(conflicts.is_empty());
    assert_eq!(t.read_file("side2.txt"), "s2");

    // Merging side yet again: its tip is now an ancestor of master.
    assert_eq!(t.repo.merge("side").unwrap(), MergeOutcome::GivenIsAncestor);
}
