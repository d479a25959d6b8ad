//! Consolidation root resolution and on-disk layout.
//!
//! The `Layout` struct captures every path the engine touches under the
//! consolidation root in one place: the cache home it reads, the two alias
//! areas it owns, and the manifest location. Resolution order for the root
//! is explicit override, then the `MODELINK_ROOT` environment variable, then
//! the platform default.
//!
//! Auxiliary search roots for loose-artifact scanning are composed here as
//! well. Candidates that do not exist are silently skipped and duplicates
//! (by canonical directory identity) are dropped; root resolution itself
//! never fails.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::error::{Error, Result};

/// Environment variable overriding the consolidation root.
pub const ROOT_ENV: &str = "MODELINK_ROOT";

/// Environment variable holding extra artifact search paths, delimited by the
/// platform path separator.
pub const SEARCH_PATHS_ENV: &str = "MODELINK_SEARCH_PATHS";

/// How the consolidation root was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSource {
    /// The caller passed an explicit path (CLI flag).
    Explicit,
    /// The path came from the `MODELINK_ROOT` environment variable.
    EnvVar,
    /// Platform default under the user data directory.
    Default,
}

/// Resolved paths for one consolidation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// The consolidation root. Owns everything below except `cache_home`
    /// contents, which are read-only to modelink.
    pub root: PathBuf,
    /// HuggingFace-style download cache scanned for repositories.
    pub cache_home: PathBuf,
    /// Alias area for classified model bundles.
    pub bundle_area: PathBuf,
    /// Alias area for loose single-file artifacts.
    pub artifact_area: PathBuf,
    /// Manifest document location.
    pub manifest_path: PathBuf,
    /// How the root was determined.
    pub source: RootSource,
}

impl Layout {
    fn from_root(root: PathBuf, source: RootSource) -> Self {
        let cache_home = root.join(defaults::CACHE_HOME_DIR);
        let bundle_area = root.join(defaults::BUNDLE_ALIAS_DIR);
        let artifact_area = root.join(defaults::ARTIFACT_ALIAS_DIR);
        let manifest_path = root.join(defaults::MANIFEST_FILE);
        Self {
            root,
            cache_home,
            bundle_area,
            artifact_area,
            manifest_path,
            source,
        }
    }

    /// Resolve the layout from an explicit override, the environment, or the
    /// platform default. Total: absent inputs degrade to the next source.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::from_root(path.to_path_buf(), RootSource::Explicit);
        }
        if let Ok(env_root) = env::var(ROOT_ENV) {
            let trimmed = env_root.trim();
            if !trimmed.is_empty() {
                return Self::from_root(PathBuf::from(trimmed), RootSource::EnvVar);
            }
        }
        Self::from_root(defaults::default_root(), RootSource::Default)
    }

    /// Ensure the two alias areas (and therefore the root) exist.
    ///
    /// This is the single fatal precondition of a run: failure here aborts
    /// before anything is written.
    pub fn ensure(&self) -> Result<()> {
        for area in [&self.bundle_area, &self.artifact_area] {
            fs::create_dir_all(area).map_err(|e| Error::RootCreate {
                path: area.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Compose the auxiliary search roots for loose-artifact scanning, in
    /// fixed order: cache home, root, root parent, `~/models`, then any
    /// explicitly configured extra paths.
    ///
    /// Entries that do not currently exist are skipped; duplicates by
    /// canonical directory identity yield a single entry.
    pub fn search_roots(&self, extra: &[PathBuf]) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = vec![self.cache_home.clone(), self.root.clone()];
        if let Some(parent) = self.root.parent() {
            if parent != self.root.as_path() && !parent.as_os_str().is_empty() {
                candidates.push(parent.to_path_buf());
            }
        }
        if let Some(user_models) = defaults::user_models_dir() {
            candidates.push(user_models);
        }
        candidates.extend(extra.iter().cloned());

        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut roots = Vec::new();
        for candidate in candidates {
            if !candidate.is_dir() {
                continue;
            }
            let identity = fs::canonicalize(&candidate).unwrap_or_else(|_| candidate.clone());
            if seen.insert(identity) {
                roots.push(candidate);
            }
        }
        roots
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "root = {}", self.root.display())?;
        writeln!(f, "cache_home = {}", self.cache_home.display())?;
        writeln!(f, "bundle_area = {}", self.bundle_area.display())?;
        writeln!(f, "artifact_area = {}", self.artifact_area.display())?;
        writeln!(f, "manifest_path = {}", self.manifest_path.display())?;
        write!(f, "root_source = {:?}", self.source)
    }
}

/// Split a delimited search-path list from the environment into paths,
/// dropping empty segments.
pub fn split_search_paths(raw: &str) -> Vec<PathBuf> {
    env::split_paths(raw)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}
