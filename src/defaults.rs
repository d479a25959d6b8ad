//! Default values and well-known names for modelink.
//!
//! This module provides the centralized constants used across the library and
//! the CLI, ensuring consistency and avoiding duplication: the on-disk layout
//! names under the consolidation root, the classification file sets, and the
//! built-in alias override table.

use std::path::PathBuf;

/// Directory under the root holding the HuggingFace-style download cache.
pub const CACHE_HOME_DIR: &str = "hf-home";

/// Alias area under the root for classified model bundles (vLLM-style).
pub const BUNDLE_ALIAS_DIR: &str = "vllm";

/// Alias area under the root for loose single-file artifacts.
pub const ARTIFACT_ALIAS_DIR: &str = "gguf";

/// Manifest file name, written directly under the root.
pub const MANIFEST_FILE: &str = "models-manifest.json";

/// Name prefix of cached repository directories (`models--<org>--<repo>`).
pub const REPO_DIR_PREFIX: &str = "models--";

/// Separator inside cached repository directory names.
pub const REPO_DIR_SEPARATOR: &str = "--";

/// Snapshot collection directory inside a cached repository.
pub const SNAPSHOTS_DIR: &str = "snapshots";

/// Configuration descriptor a loadable bundle must contain.
pub const CONFIG_DESCRIPTOR: &str = "config.json";

/// Recognized tokenizer descriptor file names (any one suffices).
pub const TOKENIZER_DESCRIPTORS: [&str; 3] =
    ["tokenizer.json", "tokenizer.model", "tokenizer_config.json"];

/// Recognized weight-file glob patterns (either packaging convention counts).
pub const WEIGHT_PATTERNS: [&str; 2] = ["*.safetensors", "pytorch_model*.bin"];

/// File extension identifying loose single-file artifacts.
pub const ARTIFACT_EXTENSION: &str = "gguf";

/// Built-in alias override table: (org, repo) pairs with hand-chosen short
/// names. Pairs not listed here fall back to the synthesized `hf-org-repo`
/// form.
pub const KNOWN_ALIASES: [((&str, &str), &str); 3] = [
    (("Open-Orca", "Mistral-7B-OpenOrca"), "openorca-7b"),
    (
        ("NousResearch", "Nous-Hermes-2-Mistral-7B-DPO"),
        "nous-hermes-7b",
    ),
    (
        ("deepseek-ai", "DeepSeek-Coder-V2-Lite-Instruct"),
        "deepseek-coder",
    ),
];

/// Returns the default consolidation root.
///
/// Uses the platform data directory:
/// - Linux: `~/.local/share/modelink/models` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/modelink/models`
/// - Windows: `{FOLDERID_RoamingAppData}\modelink\models`
///
/// Falls back to `.modelink/models` in the current directory if the platform
/// data directory cannot be determined.
///
/// This can be overridden by the `--root` CLI flag or the `MODELINK_ROOT`
/// environment variable.
pub fn default_root() -> PathBuf {
    match dirs::data_dir() {
        Some(data) => data.join("modelink").join("models"),
        None => PathBuf::from(".modelink").join("models"),
    }
}

/// Returns the conventional per-user loose models directory (`~/models`), if
/// a home directory can be determined. Used as one of the auxiliary search
/// roots for artifact scanning.
pub fn user_models_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("models"))
}
