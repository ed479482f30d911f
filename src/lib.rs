//! Strata - a tiny content-addressed version-control system
//!
//! Strata snapshots a working directory over time: a content-addressed
//! object store holds immutable blobs and commits, branches are mutable
//! pointers into that graph, and a staging index collects the pending
//! changes reconciled into each new commit. Diverging branches are
//! reconciled with a three-way merge against their nearest common
//! ancestor.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to the engine)
//! - [`core`] - Domain types, stores, and every engine operation
//! - [`ui`] - Output formatting utilities
//!
//! # Correctness Invariants
//!
//! 1. Stored objects are immutable and content-addressed; equal content
//!    has equal identity
//! 2. Branch files, HEAD, and the staging index are the only mutable state
//! 3. User errors abort with no partial state mutation
//! 4. Mutating commands hold the exclusive repository lock

pub mod cli;
pub mod core;
pub mod ui;
