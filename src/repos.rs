//! Discovery of cached model repositories.
//!
//! The cache home contains one directory per downloaded repository, named
//! `models--<org>--<repo>`. Discovery parses the identity out of the
//! directory name, resolves the current snapshot for each repository, and
//! returns the set sorted by directory name so every run visits
//! repositories in the same order.
//!
//! Everything discovered here is externally owned and read-only to
//! modelink.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::defaults;
use crate::snapshot;

/// A discovered repository in the download cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRepository {
    /// Organization identifier parsed from the directory name.
    pub org: String,
    /// Repository name parsed from the directory name.
    pub name: String,
    /// Absolute path of the repository directory.
    pub path: PathBuf,
    /// Resolved current snapshot, absent when the repository has none.
    pub snapshot: Option<PathBuf>,
}

/// Enumerate cached repositories under the cache home, sorted by directory
/// name. A missing or unreadable cache home yields an empty set, not an
/// error.
pub fn discover_repositories(cache_home: &Path) -> Vec<CachedRepository> {
    let entries = match fs::read_dir(cache_home) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    let mut repos = Vec::new();
    for path in dirs {
        let dir_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        let (org, name) = match parse_repo_dir_name(dir_name) {
            Some(identity) => identity,
            None => continue,
        };

        let snapshot = snapshot::resolve_snapshot(&path);
        debug!(
            "discovered cached repository {}/{} (snapshot: {:?})",
            org, name, snapshot
        );
        repos.push(CachedRepository {
            org,
            name,
            path: path.clone(),
            snapshot,
        });
    }
    repos
}

/// Parse `models--<org>--<repo>` into its identity pair. Directory names
/// not matching the pattern are not cached repositories.
fn parse_repo_dir_name(dir_name: &str) -> Option<(String, String)> {
    let rest = dir_name.strip_prefix(defaults::REPO_DIR_PREFIX)?;
    let (org, repo) = rest.split_once(defaults::REPO_DIR_SEPARATOR)?;
    if org.is_empty() || repo.is_empty() {
        return None;
    }
    Some((org.to_string(), repo.to_string()))
}
