//! Category/level filtering

use super::error::{LoggerError, Result};
use super::level_table::{LevelTable, Severity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How level names missing from the [`LevelTable`] are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelPolicy {
    /// Unknown names resolve to [`Severity::UNKNOWN`] and always pass the filter
    #[default]
    Lenient,
    /// Unknown names are rejected
    Strict,
}

impl LevelPolicy {
    /// Resolve `name`, rejecting unknown names under [`LevelPolicy::Strict`]
    pub fn resolve(self, table: &LevelTable, name: &str) -> Result<Severity> {
        match (self, table.lookup(name)) {
            (_, Some(severity)) => Ok(severity),
            (LevelPolicy::Lenient, None) => Ok(Severity::UNKNOWN),
            (LevelPolicy::Strict, None) => Err(LoggerError::unknown_level(name)),
        }
    }
}

/// Default threshold plus exact-match per-category overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    default_threshold: Severity,
    categories: HashMap<String, Severity>,
}

impl FilterPolicy {
    pub fn new(default_threshold: Severity) -> Self {
        Self {
            default_threshold,
            categories: HashMap::new(),
        }
    }

    pub fn default_threshold(&self) -> Severity {
        self.default_threshold
    }

    pub fn set_default_threshold(&mut self, threshold: Severity) {
        self.default_threshold = threshold;
    }

    /// Add or overwrite the override for `category`
    pub fn set_category(&mut self, category: impl Into<String>, threshold: Severity) {
        self.categories.insert(category.into(), threshold);
    }

    pub fn category(&self, category: &str) -> Option<Severity> {
        self.categories.get(category).copied()
    }

    /// Threshold in force for `category`
    #[inline]
    pub fn threshold_for(&self, category: &str) -> Severity {
        self.category(category).unwrap_or(self.default_threshold)
    }

    /// A line is printable when its severity does not exceed the threshold
    #[inline]
    pub fn allows(&self, category: &str, severity: Severity) -> bool {
        severity <= self.threshold_for(category)
    }

    pub fn is_printable(&self, table: &LevelTable, category: &str, level: &str) -> bool {
        self.allows(category, table.resolve(level))
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::new(LevelTable::default().resolve("WARN"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warn_policy() -> (LevelTable, FilterPolicy) {
        let table = LevelTable::default();
        let policy = FilterPolicy::new(table.resolve("WARN"));
        (table, policy)
    }

    #[test]
    fn test_default_threshold() {
        let (table, policy) = warn_policy();
        assert!(policy.is_printable(&table, "app", "ERROR"));
        assert!(policy.is_printable(&table, "app", "WARN"));
        assert!(!policy.is_printable(&table, "app", "INFO"));
        assert!(!policy.is_printable(&table, "app", "DEBUG"));
    }

    #[test]
    fn test_override_wins_over_default() {
        let (table, mut policy) = warn_policy();

        // More permissive than the default
        policy.set_category("net", table.resolve("DEBUG"));
        assert!(policy.is_printable(&table, "net", "DEBUG"));

        // More restrictive than the default
        policy.set_category("db", table.resolve("ERROR"));
        assert!(!policy.is_printable(&table, "db", "WARN"));
        assert!(policy.is_printable(&table, "db", "ERROR"));
    }

    #[test]
    fn test_override_is_overwritten() {
        let (table, mut policy) = warn_policy();
        policy.set_category("db", table.resolve("ALL"));
        policy.set_category("db", table.resolve("FATAL"));
        assert_eq!(policy.category("db"), Some(Severity(2)));
        assert!(!policy.is_printable(&table, "db", "ERROR"));
    }

    #[test]
    fn test_categories_are_exact_match() {
        let (table, mut policy) = warn_policy();
        policy.set_category("db.read", table.resolve("ALL"));

        assert!(policy.is_printable(&table, "db.read", "DEBUG"));
        assert!(!policy.is_printable(&table, "db", "DEBUG"));
        assert!(!policy.is_printable(&table, "db.readonly", "DEBUG"));
    }

    #[test]
    fn test_unknown_level_passes() {
        let (table, mut policy) = warn_policy();
        policy.set_category("quiet", table.resolve("OFF"));
        assert!(policy.is_printable(&table, "app", "VERBOSE"));
        assert!(policy.is_printable(&table, "quiet", "VERBOSE"));
    }

    #[test]
    fn test_off_threshold_only_passes_off() {
        let (table, mut policy) = warn_policy();
        policy.set_default_threshold(table.resolve("OFF"));
        assert!(!policy.is_printable(&table, "app", "FATAL"));
        assert!(policy.is_printable(&table, "app", "OFF"));
    }

    #[test]
    fn test_level_policy_resolve() {
        let table = LevelTable::default();
        assert_eq!(
            LevelPolicy::Lenient.resolve(&table, "NOPE").expect("lenient"),
            Severity::UNKNOWN
        );
        assert!(matches!(
            LevelPolicy::Strict.resolve(&table, "NOPE"),
            Err(LoggerError::UnknownLevel { .. })
        ));
        assert_eq!(
            LevelPolicy::Strict.resolve(&table, "INFO").expect("known"),
            Severity(5)
        );
    }
}
