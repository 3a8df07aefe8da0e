//! Level names and their numeric severities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Numeric rank of a level. Smaller values are more severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Severity(pub i32);

impl Severity {
    /// Returned by [`LevelTable::resolve`] for names the table does not know.
    ///
    /// Zero is below every default severity, so an unknown level passes any
    /// positive threshold.
    pub const UNKNOWN: Severity = Severity(0);

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Severity {
    fn from(value: i32) -> Self {
        Severity(value)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default level names, most restrictive first.
pub const DEFAULT_LEVELS: [(&str, i32); 7] = [
    ("OFF", 1),
    ("FATAL", 2),
    ("ERROR", 3),
    ("WARN", 4),
    ("INFO", 5),
    ("DEBUG", 6),
    ("ALL", 7),
];

/// Mapping from level name to [`Severity`].
///
/// Names are matched exactly (case-sensitive). The table is immutable once
/// built; a logger replaces it wholesale instead of editing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: HashMap<String, Severity>,
}

impl LevelTable {
    pub fn new<I, K, V>(levels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Severity>,
    {
        Self {
            levels: levels
                .into_iter()
                .map(|(name, severity)| (name.into(), severity.into()))
                .collect(),
        }
    }

    /// Severity for `name`, or [`Severity::UNKNOWN`] when unmapped
    #[inline]
    pub fn resolve(&self, name: &str) -> Severity {
        self.lookup(name).unwrap_or(Severity::UNKNOWN)
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Severity> {
        self.levels.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.levels.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Severity)> {
        self.levels.iter().map(|(name, sev)| (name.as_str(), *sev))
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::new(DEFAULT_LEVELS)
    }
}

impl<K: Into<String>, V: Into<Severity>> FromIterator<(K, V)> for LevelTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping() {
        let table = LevelTable::default();
        assert_eq!(table.len(), 7);
        assert_eq!(table.resolve("OFF"), Severity(1));
        assert_eq!(table.resolve("WARN"), Severity(4));
        assert_eq!(table.resolve("ALL"), Severity(7));
    }

    #[test]
    fn test_unknown_name_resolves_to_sentinel() {
        let table = LevelTable::default();
        assert_eq!(table.resolve("VERBOSE"), Severity::UNKNOWN);
        assert_eq!(table.lookup("VERBOSE"), None);
        // Names are case-sensitive
        assert_eq!(table.resolve("warn"), Severity::UNKNOWN);
    }

    #[test]
    fn test_custom_table() {
        let table: LevelTable = [("LOUD", 1), ("QUIET", 9)].into_iter().collect();
        assert_eq!(table.resolve("LOUD"), Severity(1));
        assert_eq!(table.resolve("QUIET"), Severity(9));
        assert!(!table.contains("WARN"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::UNKNOWN < Severity(1));
        assert!(Severity(2) < Severity(7));
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let table: LevelTable = serde_json::from_str(r#"{"A": 1, "B": 2}"#).expect("deserialize");
        assert_eq!(table.resolve("B"), Severity(2));
    }
}
