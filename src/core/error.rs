//! core::error
//!
//! The error taxonomy for engine operations.
//!
//! # Design
//!
//! Every operation returns [`Error`] through the [`Result`] alias. Errors
//! fall into two classes:
//!
//! - **User errors**: expected outcomes of a command run against the wrong
//!   state (nothing staged, unknown branch, untracked file in the way).
//!   Their `Display` text is exactly what the CLI prints; the operation
//!   aborts with no partial state mutation.
//! - **Fatal errors**: I/O failures, undecodable stored objects, a history
//!   with no common ancestor. These indicate corruption or environment
//!   problems outside the engine's control and propagate as unrecoverable
//!   failures ([`Error::is_fatal`]).

use thiserror::Error;

use crate::core::types::TypeError;

/// All errors produced by engine operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrong argument count or shape for a command.
    #[error("Incorrect operands.")]
    Usage,

    /// A command other than `init` ran outside a repository.
    #[error("Not in an initialized Strata directory.")]
    Uninitialized,

    /// `init` ran where a repository already exists.
    #[error("A Strata version-control system already exists in the current directory.")]
    AlreadyInitialized,

    /// The working-directory path given to `add` does not exist.
    #[error("File does not exist.")]
    FileNotFound,

    /// `commit` was given an empty message.
    #[error("Please enter a commit message.")]
    EmptyMessage,

    /// `commit` ran with an empty staging index.
    #[error("No changes added to the commit.")]
    NothingToCommit,

    /// `rm` was given a path neither staged nor tracked.
    #[error("No reason to remove the file.")]
    NothingToRemove,

    /// `find` matched no commit message.
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    /// A commit id (or id prefix) resolved to nothing.
    #[error("No commit with that id exists.")]
    NoSuchCommit,

    /// A commit id prefix matched more than one commit.
    #[error("Ambiguous commit id prefix: {0}.")]
    AmbiguousCommitPrefix(String),

    /// The commit named in a file checkout does not track the path.
    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    /// The branch named in a checkout does not exist.
    #[error("No such branch exists.")]
    NoSuchBranch,

    /// The branch named in `rm-branch` or `merge` does not exist.
    #[error("A branch with that name does not exist.")]
    BranchMissing,

    /// `branch` was given a name already in use.
    #[error("A branch with that name already exists.")]
    BranchExists,

    /// `rm-branch` targeted the checked-out branch.
    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,

    /// `checkout` targeted the branch already checked out.
    #[error("No need to checkout the current branch.")]
    CheckoutCurrentBranch,

    /// `merge` ran with a non-empty staging index.
    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    /// `merge` targeted the current commit.
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    /// Materializing a commit would clobber an untracked file.
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,

    /// Another process holds the repository lock.
    #[error("Another Strata process holds the repository lock.")]
    Locked,

    /// Stored state failed an invariant check.
    #[error("repository corrupted: {0}")]
    Corrupt(String),

    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored object failed to encode or decode.
    #[error("serialization error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error indicates corruption or an environment failure
    /// rather than an expected user-facing condition.
    ///
    /// The CLI prints user errors as plain messages and exits cleanly;
    /// fatal errors propagate with a nonzero exit.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Corrupt(_) | Error::Io(_) | Error::Codec(_))
    }
}

impl From<TypeError> for Error {
    fn from(e: TypeError) -> Self {
        Error::Corrupt(e.to_string())
    }
}

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, Error>;
