//! # Activation Table
//!
//! Height-gated availability of drivers. Availability is a consensus
//! parameter: every node must give the same answer for the same
//! `(name, height)`.
//!
//! ## Rules
//!
//! 1. Drivers registered as enabled by default start at height 0.
//! 2. Every other name in `enable_types` is enabled at height 0.
//! 3. Every name in `enable_height` gets exactly that height, whether or
//!    not it appeared in steps 1-2.
//! 4. Anything else is disabled at every height.
//!
//! The table is derived, never edited: the registry rebuilds it from the
//! current configuration and driver table whenever either changes.

use std::collections::BTreeMap;

use crate::config::CryptoConfig;

/// Per-name enable heights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationTable {
    enable_heights: BTreeMap<String, i64>,
}

impl ActivationTable {
    /// Empty table. Every name is disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for a configuration and the set of drivers that are
    /// enabled by default.
    pub fn from_config<'a, I>(config: &CryptoConfig, default_enabled: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut enable_heights: BTreeMap<String, i64> = default_enabled
            .into_iter()
            .map(|name| (name.to_string(), 0))
            .collect();

        for name in &config.enable_types {
            enable_heights.entry(name.clone()).or_insert(0);
        }
        for (name, height) in &config.enable_height {
            enable_heights.insert(name.clone(), *height);
        }

        Self { enable_heights }
    }

    /// Whether `name` is usable at `height`. Unknown names are disabled.
    pub fn is_enabled(&self, name: &str, height: i64) -> bool {
        self.enable_heights
            .get(name)
            .is_some_and(|enable_height| height >= *enable_height)
    }

    /// Configured enable height for `name`, if any.
    pub fn enable_height(&self, name: &str) -> Option<i64> {
        self.enable_heights.get(name).copied()
    }

    /// Every `(name, enable_height)` entry in name order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, i64)> {
        self.enable_heights.iter().map(|(name, h)| (name.as_str(), *h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const DEFAULTS: [&str; 2] = ["secp256k1", "ed25519"];

    fn config(types: &[&str], heights: &[(&str, i64)]) -> CryptoConfig {
        CryptoConfig {
            enable_types: types.iter().map(|s| s.to_string()).collect(),
            enable_height: heights
                .iter()
                .map(|(n, h)| (n.to_string(), *h))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn table(types: &[&str], heights: &[(&str, i64)]) -> ActivationTable {
        ActivationTable::from_config(&config(types, heights), DEFAULTS)
    }

    #[test]
    fn test_defaults() {
        let table = table(&[], &[]);
        assert!(table.is_enabled("secp256k1", 0));
        assert!(table.is_enabled("ed25519", 0));
        assert!(!table.is_enabled("none", 0));
        assert!(!table.is_enabled("none", i64::MAX));
        assert!(!table.is_enabled("unknown", 0));
    }

    #[test]
    fn test_empty_table_disables_everything() {
        let table = ActivationTable::new();
        assert!(!table.is_enabled("secp256k1", 0));
        assert_eq!(table.entries().count(), 0);
    }

    #[test]
    fn test_enable_types_and_heights() {
        let table = table(&["secp256k1", "none"], &[("ed25519", 10), ("none", 100)]);

        assert!(!table.is_enabled("none", 0));
        assert!(!table.is_enabled("none", 99));
        assert!(table.is_enabled("none", 100));
        assert!(table.is_enabled("secp256k1", 0));
        assert!(!table.is_enabled("ed25519", 0));
        assert!(table.is_enabled("ed25519", 10));
    }

    #[test]
    fn test_listed_type_enabled_at_genesis() {
        let table = table(&["bls"], &[]);
        assert_eq!(table.enable_height("bls"), Some(0));
        assert!(table.is_enabled("bls", 0));
    }

    #[test]
    fn test_height_without_enable_type() {
        // Scheduled activation of a name that is not otherwise listed.
        let table = table(&[], &[("bls", 50)]);
        assert!(!table.is_enabled("bls", 49));
        assert!(table.is_enabled("bls", 50));
    }

    #[test]
    fn test_negative_height_queries() {
        assert!(!table(&[], &[]).is_enabled("secp256k1", -1));
    }

    #[test]
    fn test_entries_sorted() {
        let t = table(&["none"], &[]);
        let names: Vec<_> = t.entries().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["ed25519", "none", "secp256k1"]);
    }
}
