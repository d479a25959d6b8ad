//! Property-based tests for alias naming and repository-name parsing.
//!
//! These tests use proptest to generate random inputs and verify that
//! naming stays deterministic and well-formed for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::alias::AliasTable;
    use proptest::prelude::*;

    // ============================================================================
    // fallback alias name property tests
    // ============================================================================

    proptest! {
        /// Property: alias_for is deterministic (same input = same output)
        #[test]
        fn alias_for_is_deterministic(
            org in "[a-zA-Z0-9_.-]{1,20}",
            repo in "[a-zA-Z0-9_.-]{1,20}",
        ) {
            let table = AliasTable::empty();
            let first = table.alias_for(&org, &repo);
            let second = table.alias_for(&org, &repo);
            prop_assert_eq!(first, second);
        }

        /// Property: fallback names are fully lower-cased
        #[test]
        fn fallback_names_are_lowercase(
            org in "[a-zA-Z0-9_.-]{1,20}",
            repo in "[a-zA-Z0-9_.-]{1,20}",
        ) {
            let name = AliasTable::empty().alias_for(&org, &repo);
            prop_assert_eq!(name.clone(), name.to_lowercase());
        }

        /// Property: fallback names carry the hf- prefix and both identity parts
        #[test]
        fn fallback_names_embed_identity(
            org in "[a-z0-9]{1,20}",
            repo in "[a-z0-9]{1,20}",
        ) {
            let name = AliasTable::empty().alias_for(&org, &repo);
            prop_assert!(name.starts_with("hf-"));
            prop_assert!(name.contains(&org));
            prop_assert!(name.contains(&repo));
        }

        /// Property: an override always wins over the fallback
        #[test]
        fn override_always_wins(
            org in "[a-zA-Z0-9_.-]{1,20}",
            repo in "[a-zA-Z0-9_.-]{1,20}",
            short in "[a-z0-9-]{1,15}",
        ) {
            let table = AliasTable::from_pairs([(org.as_str(), repo.as_str(), short.as_str())]);
            prop_assert_eq!(table.alias_for(&org, &repo), short);
        }

        /// Property: fallback names never contain path separators
        #[test]
        fn fallback_names_are_single_components(
            org in "[a-zA-Z0-9_.-]{1,20}",
            repo in "[a-zA-Z0-9_.-]{1,20}",
        ) {
            let name = AliasTable::empty().alias_for(&org, &repo);
            prop_assert!(!name.contains('/'));
            prop_assert!(!name.contains('\\'));
        }
    }
}
