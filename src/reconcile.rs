//! Idempotent alias link reconciliation.
//!
//! `ensure_alias` makes exactly one alias correct for one target and reports
//! what it did as data. The rules:
//!
//! - nothing at the alias path: create the link;
//! - a link already resolving to the target: leave it alone;
//! - a link resolving elsewhere, or not resolving at all: replace it;
//! - anything that is not a link: never touch it — the name is occupied by
//!   an entry this tool does not own, reported as a conflict.
//!
//! No outcome here is a process-level error. A single alias failure is
//! recorded and the run moves on; running the same reconciliation twice in a
//! row always converges to the same filesystem state.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::linkfs::LinkFs;

/// What reconciling one alias did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasOutcome {
    /// The alias did not exist and was created.
    Created,
    /// The alias already resolved to the desired target; untouched.
    Verified,
    /// A stale or dangling link occupied the name and was replaced.
    Repaired,
    /// A non-link entry occupies the name; left untouched.
    Conflict,
    /// A filesystem operation failed; the reason is recorded.
    Failed(String),
}

impl AliasOutcome {
    /// The error string to record in the manifest, if any.
    pub fn error(&self) -> Option<String> {
        match self {
            AliasOutcome::Conflict => {
                Some("alias path exists and is not a symlink; left untouched".to_string())
            }
            AliasOutcome::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// True for outcomes that left a correct alias in place.
    pub fn is_linked(&self) -> bool {
        matches!(
            self,
            AliasOutcome::Created | AliasOutcome::Verified | AliasOutcome::Repaired
        )
    }
}

/// Result of reconciling one alias link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasResult {
    /// The alias link path.
    pub link: PathBuf,
    /// The fully resolved target the alias points (or should point) at.
    pub target: PathBuf,
    /// What happened.
    pub outcome: AliasOutcome,
}

/// Create, verify or repair a single alias link pointing at `target`.
///
/// The desired target is fully resolved first so the alias never points at a
/// chain of indirections; if resolution fails the target path is used as
/// given. Never panics and never returns an error: every outcome, including
/// filesystem failures, comes back as an [`AliasOutcome`].
pub fn ensure_alias(fs: &dyn LinkFs, link: &Path, target: &Path) -> AliasResult {
    let resolved = fs
        .resolve(target)
        .unwrap_or_else(|_| target.to_path_buf());
    let outcome = reconcile(fs, link, &resolved);

    match &outcome {
        AliasOutcome::Conflict => warn!(
            "alias name {} is occupied by a non-link entry; leaving it untouched",
            link.display()
        ),
        AliasOutcome::Failed(reason) => {
            warn!("alias {} -> {}: {}", link.display(), resolved.display(), reason);
        }
        other => debug!(
            "alias {} -> {}: {:?}",
            link.display(),
            resolved.display(),
            other
        ),
    }

    AliasResult {
        link: link.to_path_buf(),
        target: resolved,
        outcome,
    }
}

fn reconcile(fs: &dyn LinkFs, link: &Path, target: &Path) -> AliasOutcome {
    if !fs.entry_exists(link) {
        return match fs.create_symlink(target, link) {
            Ok(()) => AliasOutcome::Created,
            Err(e) => AliasOutcome::Failed(format!("failed to create alias: {e}")),
        };
    }

    if !fs.is_symlink(link) {
        return AliasOutcome::Conflict;
    }

    if let Ok(current) = fs.resolve(link) {
        if current == *target {
            return AliasOutcome::Verified;
        }
    }

    // Stale or dangling link: replace it at the same name.
    if let Err(e) = fs.remove_link(link) {
        return AliasOutcome::Failed(format!("failed to remove stale alias: {e}"));
    }
    match fs.create_symlink(target, link) {
        Ok(()) => AliasOutcome::Repaired,
        Err(e) => AliasOutcome::Failed(format!("failed to create alias: {e}")),
    }
}
