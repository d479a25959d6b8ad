//! # modelink Library
//!
//! This library provides the core functionality for consolidating locally
//! cached machine-learning models into a stable, human-readable symlink
//! layout. It is designed to be used by the `modelink` command-line tool
//! but can also be embedded by other applications that need predictable
//! paths into a HuggingFace-style download cache.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use modelink::linkfs::MemoryLinkFs;
//! use modelink::reconcile::{ensure_alias, AliasOutcome};
//!
//! // An in-memory filesystem standing in for the real one
//! let fs = MemoryLinkFs::new();
//! fs.add_dir("/models/snapshots/abc123");
//!
//! // First run creates the alias, a re-run verifies it
//! let link = Path::new("/models/vllm/openorca-7b");
//! let target = Path::new("/models/snapshots/abc123");
//! assert_eq!(ensure_alias(&fs, link, target).outcome, AliasOutcome::Created);
//! assert_eq!(ensure_alias(&fs, link, target).outcome, AliasOutcome::Verified);
//! ```
//!
//! ## Core Concepts
//!
//! - **Layout (`paths`)**: Resolves the consolidation root and derives the
//!   cache home, the alias areas, the manifest path and the artifact
//!   search roots.
//! - **Discovery (`repos`, `snapshot`, `classify`)**: Enumerates cached
//!   repositories, picks the current snapshot of each, and decides whether
//!   a snapshot is a directly loadable model bundle.
//! - **Naming (`alias`)**: Maps repository identities to alias names via an
//!   injected override table with a synthesized fallback.
//! - **Reconciliation (`reconcile`, `linkfs`)**: Makes one alias link
//!   correct for one target without ever destroying non-link entries,
//!   behind the `LinkFs` trait so it is testable in memory.
//! - **Scanning (`scan`)**: Finds loose single-file artifacts across the
//!   search roots and aliases each unique real file once.
//! - **Manifest (`manifest`)**: Records everything a run observed and did
//!   in one JSON document.
//!
//! The `consolidate` module sequences these into the single end-to-end run
//! the CLI exposes.

pub mod alias;
pub mod classify;
pub mod consolidate;
pub mod defaults;
pub mod error;
pub mod linkfs;
pub mod manifest;
pub mod output;
pub mod paths;
pub mod reconcile;
pub mod repos;
pub mod scan;
pub mod snapshot;

#[cfg(test)]
mod naming_proptest;

pub use error::{Error, Result};
