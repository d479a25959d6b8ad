//! Alias naming for classified model bundles.
//!
//! An `AliasTable` maps exact (organization, repository) pairs to
//! hand-chosen short names. Pairs without an override get the synthesized
//! fallback `hf-<org>-<repo>`, lower-cased. Naming is deterministic and
//! total; collisions are not this layer's concern (the reconciler handles
//! occupied names).
//!
//! The table is an immutable value injected wherever naming happens, so
//! tests can substitute their own mappings instead of patching a global.

use std::collections::HashMap;

/// Prefix of synthesized fallback alias names.
const FALLBACK_PREFIX: &str = "hf";

/// Immutable alias override mapping.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<(String, String), String>,
}

impl AliasTable {
    /// The built-in override table shipped with modelink.
    pub fn builtin() -> Self {
        Self::from_pairs(
            crate::defaults::KNOWN_ALIASES
                .iter()
                .map(|((org, repo), alias)| (*org, *repo, *alias)),
        )
    }

    /// An empty table: every pair gets the synthesized fallback name.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from (org, repo, alias) triples.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(org, repo, alias)| ((org.to_string(), repo.to_string()), alias.to_string()))
            .collect();
        Self { entries }
    }

    /// Look up the configured override for an exact (org, repo) pair.
    pub fn lookup(&self, org: &str, repo: &str) -> Option<&str> {
        self.entries
            .get(&(org.to_string(), repo.to_string()))
            .map(String::as_str)
    }

    /// The canonical alias name for a repository identity: the override if
    /// one is configured, otherwise the lower-cased `hf-<org>-<repo>`
    /// fallback.
    pub fn alias_for(&self, org: &str, repo: &str) -> String {
        match self.lookup(org, repo) {
            Some(alias) => alias.to_string(),
            None => format!("{}-{}-{}", FALLBACK_PREFIX, org, repo).to_lowercase(),
        }
    }
}
