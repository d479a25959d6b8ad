//! Manifest document generation
//!
//! One JSON document per run, written to `<root>/models-manifest.json` as a
//! full overwrite. The manifest reports what the run observed and did:
//! every cached repository, every bundle alias and every artifact alias,
//! including the per-item errors that did not stop the run.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::reconcile::AliasResult;
use crate::repos::CachedRepository;
use crate::scan::ArtifactAlias;

/// One cached repository, whether or not it produced an alias.
#[derive(Debug, Clone, Serialize)]
pub struct RepoSummary {
    pub org: String,
    pub repo: String,
    pub path: String,
    pub snapshot: Option<String>,
}

/// One reconciled alias. `error` is present only when reconciliation could
/// not leave the alias in place.
#[derive(Debug, Clone, Serialize)]
pub struct AliasRecord {
    pub alias: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The full manifest document.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub generated_at: String,
    pub root: String,
    pub hf_repos: Vec<RepoSummary>,
    pub vllm_aliases: Vec<AliasRecord>,
    pub gguf_files: Vec<AliasRecord>,
}

impl Manifest {
    /// Assemble a manifest from the run's observations, timestamped now.
    pub fn new(
        root: &Path,
        repos: &[CachedRepository],
        bundle_aliases: Vec<AliasRecord>,
        artifact_aliases: Vec<AliasRecord>,
    ) -> Self {
        Manifest {
            generated_at: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            root: root.display().to_string(),
            hf_repos: repos.iter().map(RepoSummary::from).collect(),
            vllm_aliases: bundle_aliases,
            gguf_files: artifact_aliases,
        }
    }

    /// Serialize and write the manifest, replacing any previous document.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| Error::ManifestWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl From<&CachedRepository> for RepoSummary {
    fn from(repo: &CachedRepository) -> Self {
        RepoSummary {
            org: repo.org.clone(),
            repo: repo.name.clone(),
            path: repo.path.display().to_string(),
            snapshot: repo.snapshot.as_ref().map(|s| s.display().to_string()),
        }
    }
}

impl AliasRecord {
    /// Record for a named bundle alias.
    pub fn named(alias: &str, result: &AliasResult) -> Self {
        AliasRecord {
            alias: alias.to_string(),
            target: result.target.display().to_string(),
            error: result.outcome.error(),
        }
    }
}

impl From<&ArtifactAlias> for AliasRecord {
    fn from(artifact: &ArtifactAlias) -> Self {
        AliasRecord {
            alias: artifact.alias.clone(),
            target: artifact.target.display().to_string(),
            error: artifact.outcome.error(),
        }
    }
}
