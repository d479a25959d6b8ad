//! Bundle classification for snapshot directories.
//!
//! A snapshot is alias-worthy only when it looks like a complete, loadable
//! Transformers-style model: a configuration descriptor, at least one
//! recognized tokenizer descriptor, and at least one file matching a
//! recognized weight pattern. All three must hold; there is no partial
//! credit. The check reads one directory listing and does no other I/O.

use std::fs;
use std::path::Path;

use glob::Pattern;

use crate::defaults;

/// Decide whether a snapshot contains a complete loadable model bundle.
///
/// An absent snapshot is never alias-worthy and triggers no directory
/// access.
pub fn is_loadable_bundle(snapshot: Option<&Path>) -> bool {
    let snap = match snapshot {
        Some(path) => path,
        None => return false,
    };
    let entries = match fs::read_dir(snap) {
        Ok(entries) => entries,
        Err(_) => return false,
    };

    let names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();

    let has_config = names.iter().any(|n| n == defaults::CONFIG_DESCRIPTOR);
    let has_tokenizer = names
        .iter()
        .any(|n| defaults::TOKENIZER_DESCRIPTORS.contains(&n.as_str()));

    let weight_patterns: Vec<Pattern> = defaults::WEIGHT_PATTERNS
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();
    let has_weights = names
        .iter()
        .any(|n| weight_patterns.iter().any(|p| p.matches(n)));

    has_config && has_tokenizer && has_weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    fn complete_bundle() -> TempDir {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "config.json");
        touch(temp.path(), "tokenizer.json");
        touch(temp.path(), "model.safetensors");
        temp
    }

    #[test]
    fn test_complete_bundle_is_loadable() {
        let temp = complete_bundle();
        assert!(is_loadable_bundle(Some(temp.path())));
    }

    #[test]
    fn test_absent_snapshot_is_not_loadable() {
        assert!(!is_loadable_bundle(None));
    }

    #[test]
    fn test_missing_directory_is_not_loadable() {
        assert!(!is_loadable_bundle(Some(Path::new(
            "/nonexistent/snapshot/path"
        ))));
    }

    #[test]
    fn test_missing_config_descriptor() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "tokenizer.json");
        touch(temp.path(), "model.safetensors");
        assert!(!is_loadable_bundle(Some(temp.path())));
    }

    #[test]
    fn test_missing_tokenizer_descriptor() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "config.json");
        touch(temp.path(), "model.safetensors");
        assert!(!is_loadable_bundle(Some(temp.path())));
    }

    #[test]
    fn test_missing_weight_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "config.json");
        touch(temp.path(), "tokenizer.json");
        assert!(!is_loadable_bundle(Some(temp.path())));
    }

    #[test]
    fn test_any_tokenizer_descriptor_suffices() {
        for tokenizer in defaults::TOKENIZER_DESCRIPTORS {
            let temp = TempDir::new().unwrap();
            touch(temp.path(), "config.json");
            touch(temp.path(), tokenizer);
            touch(temp.path(), "model.safetensors");
            assert!(
                is_loadable_bundle(Some(temp.path())),
                "expected {tokenizer} to satisfy the tokenizer check"
            );
        }
    }

    #[test]
    fn test_sharded_pytorch_weights_recognized() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "config.json");
        touch(temp.path(), "tokenizer_config.json");
        touch(temp.path(), "pytorch_model-00001-of-00002.bin");
        assert!(is_loadable_bundle(Some(temp.path())));
    }

    #[test]
    fn test_unrelated_bin_file_is_not_a_weight() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "config.json");
        touch(temp.path(), "tokenizer.json");
        touch(temp.path(), "training_args.bin");
        assert!(!is_loadable_bundle(Some(temp.path())));
    }
}
