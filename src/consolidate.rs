//! Consolidation run orchestration
//!
//! Sequences one full run: resolve and materialize the layout, alias every
//! loadable cached repository, alias every loose artifact, write the
//! manifest. Only layout materialization and the manifest write are fatal;
//! everything discovered in between degrades to per-item records.

use std::path::PathBuf;

use log::{debug, info};

use crate::alias::AliasTable;
use crate::classify;
use crate::error::Result;
use crate::linkfs::LinkFs;
use crate::manifest::{AliasRecord, Manifest};
use crate::paths::Layout;
use crate::reconcile;
use crate::repos::{self, CachedRepository};
use crate::scan;

/// Inputs for one consolidation run.
#[derive(Debug, Default)]
pub struct ConsolidateOptions {
    /// Explicit root, overriding environment and default.
    pub root: Option<PathBuf>,
    /// Additional artifact search roots, appended after the standard set.
    pub extra_search_paths: Vec<PathBuf>,
    /// Alias override table for bundle naming.
    pub aliases: AliasTable,
}

/// What a run observed and did.
#[derive(Debug)]
pub struct ConsolidateReport {
    /// The layout the run operated on.
    pub layout: Layout,
    /// The manifest as written to disk.
    pub manifest: Manifest,
    /// Bundle alias names created or verified this run, in manifest order.
    pub linked_bundles: Vec<String>,
}

/// Run one consolidation pass end to end.
pub fn execute_consolidation(
    fs: &dyn LinkFs,
    options: &ConsolidateOptions,
) -> Result<ConsolidateReport> {
    let layout = Layout::resolve(options.root.as_deref());
    layout.ensure()?;
    info!("consolidating under {}", layout.root.display());

    let repositories = repos::discover_repositories(&layout.cache_home);
    let bundle_records = link_bundles(fs, &layout, &options.aliases, &repositories);

    let search = layout.search_roots(&options.extra_search_paths);
    debug!("artifact search roots: {search:?}");
    let candidates = scan::collect_artifacts(&search);
    let artifacts = scan::link_artifacts(fs, &candidates, &layout.artifact_area);
    let artifact_records: Vec<AliasRecord> = artifacts.iter().map(AliasRecord::from).collect();

    let linked_bundles = bundle_records
        .iter()
        .filter(|r| r.error.is_none())
        .map(|r| r.alias.clone())
        .collect();

    let manifest = Manifest::new(&layout.root, &repositories, bundle_records, artifact_records);
    manifest.write(&layout.manifest_path)?;

    Ok(ConsolidateReport {
        layout,
        manifest,
        linked_bundles,
    })
}

/// Alias every repository whose snapshot holds a loadable bundle.
fn link_bundles(
    fs: &dyn LinkFs,
    layout: &Layout,
    aliases: &AliasTable,
    repositories: &[CachedRepository],
) -> Vec<AliasRecord> {
    let mut records = Vec::new();
    for repo in repositories {
        let snapshot = match &repo.snapshot {
            Some(snapshot) => snapshot,
            None => {
                debug!("{}/{}: no snapshot, skipping", repo.org, repo.name);
                continue;
            }
        };
        if !classify::is_loadable_bundle(Some(snapshot)) {
            debug!("{}/{}: not a loadable bundle, skipping", repo.org, repo.name);
            continue;
        }

        let alias = aliases.alias_for(&repo.org, &repo.name);
        let link = layout.bundle_area.join(&alias);
        let result = reconcile::ensure_alias(fs, &link, snapshot);
        records.push(AliasRecord::named(&alias, &result));
    }
    records
}
