//! Loose binary artifact scanning and alias linking.
//!
//! Scanning walks every auxiliary search root recursively for single-file
//! model artifacts (by extension) and reconciles one alias per unique
//! resolved target: the same real file reachable through several roots or
//! symlink chains yields exactly one alias.
//!
//! Naming policy: the desired alias is the lower-cased file name. A name
//! already occupied by a live link to a different target is never
//! overwritten — a numeric suffix is inserted before the extension instead,
//! counting up from 2 against the original stem (`model.gguf`,
//! `model-2.gguf`, `model-3.gguf`). A name that already resolves to the
//! same target is reused as-is, which is what keeps re-scans idempotent.
//!
//! Candidate files are enumerated in sorted order per root, roots in their
//! fixed composition order, so suffix assignment never drifts between runs.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::defaults;
use crate::linkfs::LinkFs;
use crate::reconcile::{self, AliasOutcome};

/// Outcome of linking one unique artifact file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactAlias {
    /// Alias name within the artifact area (possibly suffixed).
    pub alias: String,
    /// Fully resolved target file.
    pub target: PathBuf,
    /// What reconciliation did.
    pub outcome: AliasOutcome,
}

/// Recursively enumerate artifact files under the given search roots, in
/// deterministic order: roots as given, entries sorted by file name within
/// each root. Unreadable entries are skipped.
pub fn collect_artifacts(search_roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in search_roots {
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_dir() {
                continue;
            }
            if has_artifact_extension(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    debug!("collected {} artifact candidates", files.len());
    files
}

/// Reconcile one alias per unique resolved target among the candidate
/// files. Every unique file produces one `ArtifactAlias`, failures
/// included; duplicates of an already-seen real path are skipped.
pub fn link_artifacts(
    fs: &dyn LinkFs,
    files: &[PathBuf],
    artifact_area: &Path,
) -> Vec<ArtifactAlias> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut results = Vec::new();

    for file in files {
        let real = fs.resolve(file).unwrap_or_else(|_| file.clone());
        if !seen.insert(real.clone()) {
            continue;
        }

        let desired = match file.file_name() {
            Some(name) => name.to_string_lossy().to_lowercase(),
            None => continue,
        };
        let link = pick_link_name(fs, artifact_area, &desired, &real);
        let result = reconcile::ensure_alias(fs, &link, &real);
        let alias = link
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(desired);

        results.push(ArtifactAlias {
            alias,
            target: result.target,
            outcome: result.outcome,
        });
    }
    results
}

fn has_artifact_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(defaults::ARTIFACT_EXTENSION))
        .unwrap_or(false)
}

/// Choose the alias name for a target: the desired name when it is free or
/// already correct, otherwise the first numerically suffixed variant that
/// is. Dangling links keep their name and are repaired by the reconciler.
fn pick_link_name(fs: &dyn LinkFs, area: &Path, desired: &str, target: &Path) -> PathBuf {
    let (stem, ext) = match desired.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (desired, None),
    };

    let mut link = area.join(desired);
    let mut counter = 2;
    while fs.entry_exists(&link) {
        match fs.resolve(&link) {
            // Already points at this exact file: reuse the name.
            Ok(current) if current == *target => break,
            // Dangling link: the reconciler repairs it in place.
            Err(_) if fs.is_symlink(&link) => break,
            // Live entry for something else: disambiguate.
            _ => {}
        }
        let name = match ext {
            Some(ext) => format!("{stem}-{counter}.{ext}"),
            None => format!("{stem}-{counter}"),
        };
        link = area.join(name);
        counter += 1;
    }
    link
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkfs::MemoryLinkFs;
    use std::fs;
    use tempfile::TempDir;

    // ========================================================================
    // collect_artifacts (host filesystem enumeration)
    // ========================================================================

    #[test]
    fn test_collect_finds_nested_artifacts_only() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("deep/nested")).unwrap();
        fs::write(temp.path().join("deep/nested/model.gguf"), b"x").unwrap();
        fs::write(temp.path().join("top.gguf"), b"y").unwrap();
        fs::write(temp.path().join("weights.safetensors"), b"z").unwrap();

        let files = collect_artifacts(&[temp.path().to_path_buf()]);
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| has_artifact_extension(f)));
    }

    #[test]
    fn test_collect_order_is_deterministic() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bb.gguf"), b"x").unwrap();
        fs::write(temp.path().join("aa.gguf"), b"y").unwrap();
        fs::write(temp.path().join("cc.gguf"), b"z").unwrap();

        let first = collect_artifacts(&[temp.path().to_path_buf()]);
        let second = collect_artifacts(&[temp.path().to_path_buf()]);
        assert_eq!(first, second);

        let names: Vec<_> = first
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["aa.gguf", "bb.gguf", "cc.gguf"]);
    }

    #[test]
    fn test_collect_respects_root_order() {
        let temp_a = TempDir::new().unwrap();
        let temp_b = TempDir::new().unwrap();
        fs::write(temp_a.path().join("z.gguf"), b"x").unwrap();
        fs::write(temp_b.path().join("a.gguf"), b"y").unwrap();

        let files = collect_artifacts(&[
            temp_a.path().to_path_buf(),
            temp_b.path().to_path_buf(),
        ]);
        // First root's files come first even when names sort later.
        assert!(files[0].ends_with("z.gguf"));
        assert!(files[1].ends_with("a.gguf"));
    }

    #[test]
    fn test_collect_missing_root_yields_nothing() {
        let files = collect_artifacts(&[PathBuf::from("/nonexistent/search/root")]);
        assert!(files.is_empty());
    }

    // ========================================================================
    // link_artifacts (alias planning over LinkFs)
    // ========================================================================

    #[test]
    fn test_alias_name_is_lowercased_file_name() {
        let fs = MemoryLinkFs::new();
        fs.add_file("/data/Mistral-7B.Q4.GGUF");

        let results = link_artifacts(
            &fs,
            &[PathBuf::from("/data/Mistral-7B.Q4.GGUF")],
            Path::new("/root/gguf"),
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].alias, "mistral-7b.q4.gguf");
        assert_eq!(results[0].outcome, AliasOutcome::Created);
        assert_eq!(
            fs.link_target("/root/gguf/mistral-7b.q4.gguf"),
            Some(PathBuf::from("/data/Mistral-7B.Q4.GGUF"))
        );
    }

    #[test]
    fn test_same_real_file_linked_once() {
        let fs = MemoryLinkFs::new();
        fs.add_file("/data/model.gguf");
        // A second path reaching the same file through a symlink.
        fs.create_symlink(Path::new("/data/model.gguf"), Path::new("/mirror/model.gguf"))
            .unwrap();

        let results = link_artifacts(
            &fs,
            &[
                PathBuf::from("/data/model.gguf"),
                PathBuf::from("/mirror/model.gguf"),
            ],
            Path::new("/root/gguf"),
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].target, PathBuf::from("/data/model.gguf"));
    }

    #[test]
    fn test_name_collision_gets_numeric_suffix() {
        let fs = MemoryLinkFs::new();
        fs.add_file("/roots/one/model.gguf");
        fs.add_file("/roots/two/model.gguf");

        let results = link_artifacts(
            &fs,
            &[
                PathBuf::from("/roots/one/model.gguf"),
                PathBuf::from("/roots/two/model.gguf"),
            ],
            Path::new("/root/gguf"),
        );

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].alias, "model.gguf");
        assert_eq!(results[1].alias, "model-2.gguf");
        assert_eq!(
            fs.link_target("/root/gguf/model-2.gguf"),
            Some(PathBuf::from("/roots/two/model.gguf"))
        );
    }

    #[test]
    fn test_suffix_counts_against_original_stem() {
        let fs = MemoryLinkFs::new();
        fs.add_file("/roots/one/model.gguf");
        fs.add_file("/roots/two/model.gguf");
        fs.add_file("/roots/three/model.gguf");

        let files = vec![
            PathBuf::from("/roots/one/model.gguf"),
            PathBuf::from("/roots/two/model.gguf"),
            PathBuf::from("/roots/three/model.gguf"),
        ];
        let results = link_artifacts(&fs, &files, Path::new("/root/gguf"));

        let aliases: Vec<&str> = results.iter().map(|r| r.alias.as_str()).collect();
        assert_eq!(aliases, vec!["model.gguf", "model-2.gguf", "model-3.gguf"]);
    }

    #[test]
    fn test_rescan_reuses_existing_names() {
        let fs = MemoryLinkFs::new();
        fs.add_file("/roots/one/model.gguf");
        fs.add_file("/roots/two/model.gguf");
        let files = vec![
            PathBuf::from("/roots/one/model.gguf"),
            PathBuf::from("/roots/two/model.gguf"),
        ];

        let first = link_artifacts(&fs, &files, Path::new("/root/gguf"));
        let second = link_artifacts(&fs, &files, Path::new("/root/gguf"));

        let first_names: Vec<_> = first.iter().map(|r| r.alias.clone()).collect();
        let second_names: Vec<_> = second.iter().map(|r| r.alias.clone()).collect();
        assert_eq!(first_names, second_names);
        assert!(second
            .iter()
            .all(|r| r.outcome == AliasOutcome::Verified));
    }

    #[test]
    fn test_dangling_alias_is_repaired_not_renumbered() {
        let fs = MemoryLinkFs::new();
        fs.add_file("/data/model.gguf");
        // Leftover alias whose target no longer exists.
        fs.create_symlink(
            Path::new("/data/removed.gguf"),
            Path::new("/root/gguf/model.gguf"),
        )
        .unwrap();

        let results = link_artifacts(
            &fs,
            &[PathBuf::from("/data/model.gguf")],
            Path::new("/root/gguf"),
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].alias, "model.gguf");
        assert_eq!(results[0].outcome, AliasOutcome::Repaired);
        assert_eq!(
            fs.link_target("/root/gguf/model.gguf"),
            Some(PathBuf::from("/data/model.gguf"))
        );
    }

    #[test]
    fn test_regular_file_occupying_name_is_not_touched() {
        let fs = MemoryLinkFs::new();
        fs.add_file("/data/model.gguf");
        // Someone parked a real file where the alias would go.
        fs.add_file("/root/gguf/model.gguf");

        let results = link_artifacts(
            &fs,
            &[PathBuf::from("/data/model.gguf")],
            Path::new("/root/gguf"),
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].alias, "model-2.gguf");
        assert_eq!(results[0].outcome, AliasOutcome::Created);
        // The occupant is still a plain file.
        assert!(!fs.is_symlink(Path::new("/root/gguf/model.gguf")));
    }

    #[test]
    fn test_unresolvable_file_recorded_with_given_path() {
        let fs = MemoryLinkFs::new();
        // The candidate is not present in the fake fs at all, so resolution
        // fails and the path is used as given.
        let results = link_artifacts(
            &fs,
            &[PathBuf::from("/gone/model.gguf")],
            Path::new("/root/gguf"),
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].target, PathBuf::from("/gone/model.gguf"));
    }
}
