//! Country code registry for O(1) code reconciliation
//!
//! WITS extracts identify countries with their own statistical-source codes,
//! while map geometry uses ISO3 codes. The two vocabularies mostly agree but
//! diverge on legacy codes, disputed territories and numeric UN codes. This
//! module holds both directions of the mapping plus an alias table that
//! collapses historical codes onto one canonical code.
//!
//! Lookups never fail: an unresolvable code passes through unchanged, and
//! [`CodeRegistry::log_unknown`] reports it once.

use crate::constants::{ALIAS_GROUPS, CODE_MAPPINGS};
use crate::error::{Result, WitsError};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Bidirectional mapping between statistical-source and geographic codes
#[derive(Debug)]
pub struct CodeRegistry {
    /// Statistical-source code -> geographic code
    forward: HashMap<String, String>,

    /// Geographic code -> statistical-source code
    reverse: HashMap<String, String>,

    /// Alias -> canonical code, self-aliases removed
    aliases: HashMap<String, String>,

    /// Canonical codes that aliases resolve to
    alias_targets: HashSet<String>,

    /// Display names keyed by code
    names: HashMap<String, String>,

    /// Unknown codes already reported
    reported_unknown: Mutex<HashSet<String>>,
}

impl CodeRegistry {
    /// Start an empty registry builder
    pub fn builder() -> CodeRegistryBuilder {
        CodeRegistryBuilder::default()
    }

    /// Registry over the built-in WITS/ISO3 tables
    pub fn builtin() -> Result<Self> {
        let mut builder = Self::builder();
        for (statistical, geographic, name) in CODE_MAPPINGS {
            builder = builder.mapping(*statistical, *geographic, *name);
        }
        for group in ALIAS_GROUPS {
            builder = builder.alias_group(group.canonical, group.name, group.codes);
        }
        builder.build()
    }

    /// Resolve any code to its canonical statistical-source form.
    ///
    /// Resolution order: alias table, primary vocabulary, reverse (geographic)
    /// vocabulary, then passthrough of the uppercased input.
    pub fn normalize(&self, code: &str) -> String {
        let upper = code.to_uppercase();

        if let Some(canonical) = self.aliases.get(&upper) {
            return canonical.clone();
        }

        if self.forward.contains_key(&upper) {
            return upper;
        }

        if let Some(statistical) = self.reverse.get(&upper) {
            return statistical.clone();
        }

        upper
    }

    /// Geographic code for a canonical code; `None` means no known geometry
    pub fn to_geographic(&self, canonical_code: &str) -> Option<&str> {
        self.forward.get(canonical_code).map(String::as_str)
    }

    /// Statistical-source code for a geographic code
    pub fn to_statistical(&self, geographic_code: &str) -> Option<&str> {
        self.reverse.get(geographic_code).map(String::as_str)
    }

    /// Human-readable name, falling back to the code itself
    pub fn resolve_name(&self, code: &str) -> String {
        let normalized = self.normalize(code);
        match self.names.get(&normalized) {
            Some(name) => name.clone(),
            None => code.to_string(),
        }
    }

    /// Whether the code resolves through either vocabulary or the alias table
    pub fn is_known(&self, code: &str) -> bool {
        let upper = code.to_uppercase();
        if self.aliases.contains_key(&upper) {
            return true;
        }

        let normalized = self.normalize(&upper);
        self.forward.contains_key(&normalized)
            || self.reverse.contains_key(&normalized)
            || self.alias_targets.contains(&normalized)
    }

    /// Report whether a code is resolvable, warning the first time an
    /// unknown code is seen.
    pub fn log_unknown(&self, code: &str) -> bool {
        if self.is_known(code) {
            return true;
        }

        let normalized = self.normalize(code);
        let first_sighting = match self.reported_unknown.lock() {
            Ok(mut reported) => reported.insert(normalized.clone()),
            // A poisoned set only means a panic elsewhere; keep reporting
            Err(poisoned) => poisoned.into_inner().insert(normalized.clone()),
        };

        if first_sighting {
            warn!(
                "Missing country code mapping for: {} (normalized: {})",
                code, normalized
            );
        }

        false
    }

    /// Unknown codes reported so far, sorted
    pub fn unknown_codes(&self) -> Vec<String> {
        let reported = match self.reported_unknown.lock() {
            Ok(reported) => reported.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        let mut codes: Vec<String> = reported.into_iter().collect();
        codes.sort();
        codes
    }

    /// Every code in the primary (statistical-source) vocabulary
    pub fn statistical_codes(&self) -> impl Iterator<Item = &str> {
        self.forward.keys().map(String::as_str)
    }

    /// Every alias key
    pub fn alias_codes(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

/// Builder that collects table entries and validates them on `build`
#[derive(Debug, Default)]
pub struct CodeRegistryBuilder {
    mappings: Vec<(String, String, String)>,
    alias_groups: Vec<(String, String, Vec<String>)>,
}

impl CodeRegistryBuilder {
    /// Add a primary vocabulary entry
    pub fn mapping(
        mut self,
        statistical: impl Into<String>,
        geographic: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.mappings.push((
            statistical.into().to_uppercase(),
            geographic.into().to_uppercase(),
            name.into(),
        ));
        self
    }

    /// Add a group of codes that all resolve to `canonical`
    pub fn alias_group(
        mut self,
        canonical: impl Into<String>,
        name: impl Into<String>,
        codes: &[&str],
    ) -> Self {
        self.alias_groups.push((
            canonical.into().to_uppercase(),
            name.into(),
            codes.iter().map(|c| c.to_uppercase()).collect(),
        ));
        self
    }

    /// Build the registry.
    ///
    /// # Errors
    /// Returns `WitsError::RegistryConflict` when two statistical codes share a
    /// geographic code, a code maps to two different targets, or an alias
    /// target would not normalize to itself.
    pub fn build(self) -> Result<CodeRegistry> {
        let mut forward: HashMap<String, String> = HashMap::new();
        let mut reverse: HashMap<String, String> = HashMap::new();
        let mut names: HashMap<String, String> = HashMap::new();

        for (statistical, geographic, name) in self.mappings {
            if let Some(existing) = forward.get(&statistical) {
                if *existing != geographic {
                    return Err(conflict(&statistical, existing, &geographic));
                }
                continue;
            }
            if let Some(existing) = reverse.get(&geographic) {
                if *existing != statistical {
                    return Err(conflict(&geographic, existing, &statistical));
                }
            }

            forward.insert(statistical.clone(), geographic.clone());
            reverse.insert(geographic, statistical.clone());
            names.insert(statistical, name);
        }

        let mut aliases: HashMap<String, String> = HashMap::new();
        let mut alias_targets = HashSet::new();
        let mut dropped_self_aliases = 0usize;

        for (canonical, name, codes) in self.alias_groups {
            names.entry(canonical.clone()).or_insert_with(|| name.clone());
            alias_targets.insert(canonical.clone());

            for code in codes {
                names.entry(code.clone()).or_insert_with(|| name.clone());

                if code == canonical {
                    dropped_self_aliases += 1;
                    continue;
                }

                match aliases.get(&code) {
                    Some(existing) if *existing != canonical => {
                        return Err(conflict(&code, existing, &canonical));
                    }
                    Some(_) => {}
                    None => {
                        aliases.insert(code, canonical.clone());
                    }
                }
            }
        }

        // Canonical targets must be fixed points of normalization
        for target in &alias_targets {
            if let Some(further) = aliases.get(target) {
                return Err(conflict(target, target, further));
            }
            if !forward.contains_key(target) {
                if let Some(statistical) = reverse.get(target) {
                    if statistical != target {
                        return Err(conflict(target, target, statistical));
                    }
                }
            }
        }

        debug!(
            "Built code registry: {} mappings, {} aliases ({} self-aliases dropped)",
            forward.len(),
            aliases.len(),
            dropped_self_aliases
        );

        Ok(CodeRegistry {
            forward,
            reverse,
            aliases,
            alias_targets,
            names,
            reported_unknown: Mutex::new(HashSet::new()),
        })
    }
}

fn conflict(code: &str, first: &str, second: &str) -> WitsError {
    WitsError::RegistryConflict {
        code: code.to_string(),
        first: first.to_string(),
        second: second.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CodeRegistry {
        CodeRegistry::builtin().expect("built-in tables are consistent")
    }

    #[test]
    fn test_builtin_tables_are_consistent() {
        let registry = registry();
        assert_eq!(registry.len(), CODE_MAPPINGS.len());
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_normalize_uppercases_and_passes_through() {
        let registry = registry();
        assert_eq!(registry.normalize("deu"), "DEU");
        assert_eq!(registry.normalize("xyz"), "XYZ");
        // Only case is folded, whitespace is kept on passthrough
        assert_eq!(registry.normalize(" xyz "), " XYZ ");
        assert_eq!(registry.normalize(""), "");
    }

    #[test]
    fn test_normalize_reverse_vocabulary() {
        let registry = registry();
        // The United States is keyed by its numeric UN code in WITS
        assert_eq!(registry.normalize("USA"), "840");
        assert_eq!(registry.normalize("840"), "840");
        assert_eq!(registry.to_geographic("840"), Some("USA"));
        assert_eq!(registry.to_statistical("USA"), Some("840"));
    }

    #[test]
    fn test_alias_collapsing() {
        let registry = registry();
        assert_eq!(registry.normalize("ROM"), registry.normalize("ROU"));
        assert_eq!(registry.normalize("TMP"), registry.normalize("TLS"));
        assert_eq!(registry.normalize("zar"), registry.normalize("COD"));
        assert_eq!(registry.normalize("BUR"), "MMR");
        assert_eq!(registry.normalize("EUN"), "EU");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let registry = registry();
        let codes: Vec<String> = registry
            .statistical_codes()
            .chain(registry.alias_codes())
            .map(str::to_string)
            .chain(["USA", "EU", "WLD", "QQQ"].map(String::from))
            .collect();

        for code in codes {
            let once = registry.normalize(&code);
            assert_eq!(registry.normalize(&once), once, "not idempotent for {}", code);
        }
    }

    #[test]
    fn test_round_trip_through_geographic() {
        let registry = registry();
        for code in registry.statistical_codes() {
            let canonical = registry.normalize(code);
            let geographic = registry
                .to_geographic(&canonical)
                .unwrap_or_else(|| panic!("no geometry for {}", canonical));
            assert_eq!(registry.to_statistical(geographic), Some(canonical.as_str()));
        }
    }

    #[test]
    fn test_resolve_name() {
        let registry = registry();
        assert_eq!(registry.resolve_name("ROM"), "Romania");
        assert_eq!(registry.resolve_name("tmp"), "Timor-Leste");
        assert_eq!(registry.resolve_name("DEU"), "Germany");
        assert_eq!(registry.resolve_name("USA"), "United States");
        assert_eq!(registry.resolve_name("EUN"), "European Union");
        assert_eq!(registry.resolve_name("QQQ"), "QQQ");
    }

    #[test]
    fn test_log_unknown_reports_once() {
        let registry = registry();
        assert!(registry.log_unknown("DEU"));
        assert!(registry.log_unknown("ROM"));
        assert!(registry.log_unknown("EU"));

        assert!(!registry.log_unknown("QQQ"));
        assert!(!registry.log_unknown("qqq"));
        assert!(!registry.log_unknown("ZZZ"));
        assert_eq!(registry.unknown_codes(), vec!["QQQ", "ZZZ"]);
    }

    #[test]
    fn test_build_rejects_shared_geographic_code() {
        let result = CodeRegistry::builder()
            .mapping("AAA", "XXX", "First")
            .mapping("BBB", "XXX", "Second")
            .build();

        match result {
            Err(WitsError::RegistryConflict { code, first, second }) => {
                assert_eq!(code, "XXX");
                assert_eq!(first, "AAA");
                assert_eq!(second, "BBB");
            }
            other => panic!("Expected RegistryConflict, got {:?}", other),
        }
    }

    #[test]
    fn test_build_rejects_alias_with_two_targets() {
        let result = CodeRegistry::builder()
            .mapping("AAA", "AAA", "A")
            .mapping("BBB", "BBB", "B")
            .alias_group("AAA", "A", &["OLD"])
            .alias_group("BBB", "B", &["OLD"])
            .build();

        assert!(matches!(result, Err(WitsError::RegistryConflict { .. })));
    }

    #[test]
    fn test_build_rejects_chained_alias_target() {
        let result = CodeRegistry::builder()
            .mapping("AAA", "AAA", "A")
            .alias_group("AAA", "A", &["MID"])
            .alias_group("MID", "Mid", &["OLD"])
            .build();

        assert!(matches!(result, Err(WitsError::RegistryConflict { .. })));
    }

    #[test]
    fn test_build_deduplicates_repeated_entries() {
        let registry = CodeRegistry::builder()
            .mapping("AAA", "AAA", "A")
            .mapping("aaa", "aaa", "A")
            .alias_group("AAA", "A", &["OLD", "AAA"])
            .alias_group("AAA", "A", &["OLD"])
            .build()
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.alias_codes().count(), 1);
        assert_eq!(registry.normalize("OLD"), "AAA");
        assert_eq!(registry.normalize("AAA"), "AAA");
    }
}
