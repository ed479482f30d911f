//! core::merge
//!
//! Three-way merge classification.
//!
//! # Design
//!
//! [`resolve`] compares the file tables of the two branch tips against
//! their common ancestor and classifies every path in the union of the
//! three tables. It is a pure function: the result table is built fresh
//! and none of the inputs are mutated. Conflicts come back as structured
//! entries naming each side's blob (if any); synthesizing and storing the
//! conflict blobs is the repository layer's job, since only it holds the
//! object store.
//!
//! # Classification
//!
//! For a path with ancestor state `s`, current state `c`, given state `g`
//! (each an optional blob id):
//!
//! - absent from the ancestor: both sides added the same content → keep
//!   it; both added different content → conflict; one side added → take
//!   that side.
//! - present in the ancestor: the side that changed wins over the side
//!   that didn't; both changed to the same blob → keep it; both changed
//!   divergently → conflict; deleted on the unchanged side → deletion
//!   stands; changed on one side and deleted on the other → conflict
//!   (content vs. absence).

use crate::core::commit::FileTable;
use crate::core::types::ObjectId;

/// One path the merge could not reconcile automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The conflicting path.
    pub path: String,
    /// Blob on the current side, if the path exists there.
    pub current: Option<ObjectId>,
    /// Blob on the given side, if the path exists there.
    pub given: Option<ObjectId>,
}

/// The outcome of classifying every path of a three-way merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Automatically merged file table. Conflicted paths are *not* present
    /// here; the caller inserts a synthesized conflict blob for each entry
    /// in [`Resolution::conflicts`].
    pub files: FileTable,
    /// Every path needing a conflict blob, in path order.
    pub conflicts: Vec<Conflict>,
}

/// Classify every path in `split ∪ current ∪ given`.
pub fn resolve(split: &FileTable, current: &FileTable, given: &FileTable) -> Resolution {
    let mut files = FileTable::new();
    let mut conflicts = Vec::new();

    let mut paths: Vec<&String> = split.keys().chain(current.keys()).chain(given.keys()).collect();
    paths.sort();
    paths.dedup();

    for path in paths {
        let s = split.get(path);
        let c = current.get(path);
        let g = given.get(path);

        match (s, c, g) {
            // Added on both sides.
            (None, Some(c), Some(g)) if c == g => {
                files.insert(path.clone(), c.clone());
            }
            (None, Some(c), Some(g)) => conflicts.push(Conflict {
                path: path.clone(),
                current: Some(c.clone()),
                given: Some(g.clone()),
            }),

            // Added on one side only.
            (None, Some(c), None) => {
                files.insert(path.clone(), c.clone());
            }
            (None, None, Some(g)) => {
                files.insert(path.clone(), g.clone());
            }
            (None, None, None) => unreachable!("path came from one of the three tables"),

            // Present in the ancestor, surviving on both sides.
            (Some(_), Some(c), Some(g)) if c == g => {
                files.insert(path.clone(), c.clone());
            }
            (Some(s), Some(c), Some(g)) if s == c => {
                // Only the given side changed.
                files.insert(path.clone(), g.clone());
            }
            (Some(s), Some(c), Some(g)) if s == g => {
                // Only the current side changed.
                files.insert(path.clone(), c.clone());
            }
            (Some(_), Some(c), Some(g)) => conflicts.push(Conflict {
                path: path.clone(),
                current: Some(c.clone()),
                given: Some(g.clone()),
            }),

            // Deleted on the given side.
            (Some(s), Some(c), None) if s == c => {} // deletion stands
            (Some(_), Some(c), None) => conflicts.push(Conflict {
                path: path.clone(),
                current: Some(c.clone()),
                given: None,
            }),

            // Deleted on the current side.
            (Some(s), None, Some(g)) if s == g => {} // stays removed
            (Some(_), None, Some(g)) => conflicts.push(Conflict {
                path: path.clone(),
                current: None,
                given: Some(g.clone()),
            }),

            // Deleted on both sides.
            (Some(_), None, None) => {}
        }
    }

    Resolution { files, conflicts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(bytes: &[u8]) -> ObjectId {
        ObjectId::digest(bytes)
    }

    fn table(entries: &[(&str, &[u8])]) -> FileTable {
        entries
            .iter()
            .map(|(path, content)| (path.to_string(), blob(content)))
            .collect()
    }

    fn conflict_paths(resolution: &Resolution) -> Vec<&str> {
        resolution.conflicts.iter().map(|c| c.path.as_str()).collect()
    }

    #[test]
    fn unchanged_everywhere_is_a_noop() {
        let t = table(&[("a", b"1")]);
        let resolution = resolve(&t, &t, &t);
        assert_eq!(resolution.files, t);
        assert!(resolution.conflicts.is_empty());
    }

    #[test]
    fn change_on_one_side_wins() {
        let split = table(&[("a", b"base"), ("b", b"base")]);
        let current = table(&[("a", b"current"), ("b", b"base")]);
        let given = table(&[("a", b"base"), ("b", b"given")]);

        let resolution = resolve(&split, &current, &given);
        assert_eq!(resolution.files["a"], blob(b"current"));
        assert_eq!(resolution.files["b"], blob(b"given"));
        assert!(resolution.conflicts.is_empty());
    }

    #[test]
    fn same_change_on_both_sides_keeps_the_blob() {
        let split = table(&[("a", b"base")]);
        let both = table(&[("a", b"new")]);

        let resolution = resolve(&split, &both, &both);
        assert_eq!(resolution.files["a"], blob(b"new"));
        assert!(resolution.conflicts.is_empty());
    }

    #[test]
    fn divergent_change_conflicts() {
        let split = table(&[("a", b"base")]);
        let current = table(&[("a", b"ours")]);
        let given = table(&[("a", b"theirs")]);

        let resolution = resolve(&split, &current, &given);
        assert!(!resolution.files.contains_key("a"));
        assert_eq!(
            resolution.conflicts,
            vec![Conflict {
                path: "a".into(),
                current: Some(blob(b"ours")),
                given: Some(blob(b"theirs")),
            }]
        );
    }

    #[test]
    fn additions_on_one_side_are_taken() {
        let split = FileTable::new();
        let current = table(&[("ours", b"1")]);
        let given = table(&[("theirs", b"2")]);

        let resolution = resolve(&split, &current, &given);
        assert_eq!(resolution.files, table(&[("ours", b"1"), ("theirs", b"2")]));
        assert!(resolution.conflicts.is_empty());
    }

    #[test]
    fn same_addition_on_both_sides_is_kept() {
        let split = FileTable::new();
        let both = table(&[("a", b"same")]);
        let resolution = resolve(&split, &both, &both);
        assert_eq!(resolution.files["a"], blob(b"same"));
        assert!(resolution.conflicts.is_empty());
    }

    #[test]
    fn divergent_addition_conflicts() {
        let split = FileTable::new();
        let current = table(&[("a", b"ours")]);
        let given = table(&[("a", b"theirs")]);

        let resolution = resolve(&split, &current, &given);
        assert_eq!(conflict_paths(&resolution), vec!["a"]);
    }

    #[test]
    fn deletion_against_unchanged_side_stands() {
        let split = table(&[("gone-in-given", b"1"), ("gone-in-current", b"2")]);
        let current = table(&[("gone-in-given", b"1")]);
        let given = table(&[("gone-in-current", b"2")]);

        let resolution = resolve(&split, &current, &given);
        assert!(resolution.files.is_empty());
        assert!(resolution.conflicts.is_empty());
    }

    #[test]
    fn change_versus_deletion_conflicts_both_ways() {
        let split = table(&[("a", b"base"), ("b", b"base")]);
        // a: changed here, deleted there. b: deleted here, changed there.
        let current = table(&[("a", b"changed")]);
        let given = table(&[("b", b"changed")]);

        let resolution = resolve(&split, &current, &given);
        assert_eq!(conflict_paths(&resolution), vec!["a", "b"]);
        assert_eq!(resolution.conflicts[0].given, None);
        assert_eq!(resolution.conflicts[1].current, None);
    }

    #[test]
    fn deletion_on_both_sides_stays_deleted() {
        let split = table(&[("a", b"base")]);
        let empty = FileTable::new();
        let resolution = resolve(&split, &empty, &empty);
        assert!(resolution.files.is_empty());
        assert!(resolution.conflicts.is_empty());
    }
}
