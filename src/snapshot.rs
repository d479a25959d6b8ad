//! Snapshot location within a cached repository.
//!
//! A cached repository stores its usable file set in a snapshot directory.
//! Selection order, first match wins:
//!
//! 1. A `refs/main` current-reference indirection, resolved to its real
//!    target. If resolution fails (broken link, permission error) the
//!    indirection path itself is returned unresolved rather than failing —
//!    the explicit pointer reflects intentional state even when damaged.
//! 2. The most recently modified subdirectory of `snapshots/`, with ties
//!    broken by directory name so enumeration order never leaks into the
//!    result.
//! 3. Otherwise there is no snapshot, which is a normal outcome, not an
//!    error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::defaults;

/// Resolve the current snapshot directory of a cached repository, if any.
pub fn resolve_snapshot(repo_dir: &Path) -> Option<PathBuf> {
    let current_ref = repo_dir.join("refs").join("main");
    if current_ref.symlink_metadata().is_ok() {
        return Some(fs::canonicalize(&current_ref).unwrap_or(current_ref));
    }

    let snaps_dir = repo_dir.join(defaults::SNAPSHOTS_DIR);
    let entries = fs::read_dir(&snaps_dir).ok()?;

    let mut candidates: Vec<(SystemTime, String, PathBuf)> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let name = entry.file_name().to_string_lossy().into_owned();
        candidates.push((modified, name, path));
    }

    // Newest first; name as the deterministic secondary key.
    candidates.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    candidates.into_iter().next().map(|(_, _, path)| path)
}
