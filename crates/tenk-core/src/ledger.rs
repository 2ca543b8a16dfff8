//! Per-category accumulated practice time.

use indexmap::IndexMap;

use crate::types::{CategoryName, ValidationError};

/// Mapping from category name to accumulated seconds.
///
/// Categories keep the order they were first added in, which is also the
/// order they are listed and saved in.
///
/// Totals only grow, through committed sessions or quick-adds. The only way
/// to remove a category is [`CategoryLedger::reset`], which leaves a single
/// empty `General` bucket behind. A ledger is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLedger {
    totals: IndexMap<CategoryName, u64>,
}

impl Default for CategoryLedger {
    fn default() -> Self {
        Self {
            totals: IndexMap::from([(CategoryName::general(), 0)]),
        }
    }
}

impl CategoryLedger {
    /// Creates a ledger holding only `General` at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from existing totals.
    ///
    /// An empty mapping yields the default ledger.
    pub fn from_totals(totals: IndexMap<CategoryName, u64>) -> Self {
        if totals.is_empty() {
            return Self::default();
        }
        Self { totals }
    }

    /// Inserts `name` with zero seconds if it is not tracked yet.
    pub fn ensure_category(&mut self, name: &CategoryName) {
        self.totals.entry(name.clone()).or_insert(0);
    }

    /// Adds `delta` seconds to `name`, creating the category if needed.
    ///
    /// Negative deltas are ignored.
    pub fn add_seconds(&mut self, name: &CategoryName, delta: i64) {
        let Ok(delta) = u64::try_from(delta) else {
            tracing::debug!(category = %name, delta, "ignoring negative delta");
            return;
        };
        self.ensure_category(name);
        if let Some(total) = self.totals.get_mut(name) {
            *total = total.saturating_add(delta);
        }
    }

    /// Registers a new, empty category.
    ///
    /// Fails without touching the ledger if the trimmed name is empty or
    /// already tracked.
    pub fn add_category(&mut self, name: &str) -> Result<CategoryName, ValidationError> {
        let name = CategoryName::new(name)?;
        if self.totals.contains_key(&name) {
            return Err(ValidationError::DuplicateCategory {
                name: name.into(),
            });
        }
        self.totals.insert(name.clone(), 0);
        Ok(name)
    }

    /// Accumulated seconds for `name`, or 0 if it is unknown.
    pub fn total_of(&self, name: &str) -> u64 {
        self.totals.get(name).copied().unwrap_or(0)
    }

    /// Returns true if `name` is a tracked category.
    pub fn contains(&self, name: &str) -> bool {
        self.totals.contains_key(name)
    }

    /// Sum over all categories, kept for the legacy single-total field.
    pub fn legacy_total(&self) -> u64 {
        self.totals
            .values()
            .fold(0u64, |acc, secs| acc.saturating_add(*secs))
    }

    /// Drops every category and starts over with `General` at zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The earliest added category.
    pub fn first(&self) -> Option<&CategoryName> {
        self.totals.first().map(|(name, _)| name)
    }

    /// Returns the tracked category with this name.
    pub fn get(&self, name: &str) -> Option<&CategoryName> {
        self.totals.get_key_value(name).map(|(key, _)| key)
    }

    /// Number of tracked categories.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Returns true if no category is tracked.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Iterates categories in insertion order with their totals.
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryName, u64)> {
        self.totals.iter().map(|(name, secs)| (name, *secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> CategoryName {
        CategoryName::new(s).unwrap()
    }

    #[test]
    fn test_new_ledger_has_general() {
        let ledger = CategoryLedger::new();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.contains("General"));
        assert_eq!(ledger.total_of("General"), 0);
    }

    #[test]
    fn test_ensure_category_never_overwrites() {
        let mut ledger = CategoryLedger::new();
        ledger.add_seconds(&name("Rust"), 90);
        ledger.ensure_category(&name("Rust"));
        assert_eq!(ledger.total_of("Rust"), 90);
    }

    #[test]
    fn test_add_seconds_creates_and_accumulates() {
        let mut ledger = CategoryLedger::new();
        ledger.add_seconds(&name("Go"), 30);
        ledger.add_seconds(&name("Go"), 12);
        assert_eq!(ledger.total_of("Go"), 42);
    }

    #[test]
    fn test_add_seconds_ignores_negative() {
        let mut ledger = CategoryLedger::new();
        ledger.add_seconds(&name("Go"), -10);
        assert!(!ledger.contains("Go"));
        assert_eq!(ledger.legacy_total(), 0);
    }

    #[test]
    fn test_total_of_unknown_does_not_insert() {
        let ledger = CategoryLedger::new();
        assert_eq!(ledger.total_of("Haskell"), 0);
        assert!(!ledger.contains("Haskell"));
    }

    #[test]
    fn test_legacy_total_sums_all_categories() {
        let mut ledger = CategoryLedger::new();
        ledger.add_seconds(&name("General"), 5);
        ledger.add_seconds(&name("Rust"), 100);
        ledger.add_seconds(&name("Go"), 20);
        assert_eq!(ledger.legacy_total(), 125);
    }

    #[test]
    fn test_reset_leaves_only_general() {
        let mut ledger = CategoryLedger::new();
        ledger.add_seconds(&name("Rust"), 100);
        ledger.reset();
        assert_eq!(ledger, CategoryLedger::new());
    }

    #[test]
    fn test_add_category_rejects_duplicate_and_empty() {
        let mut ledger = CategoryLedger::new();
        ledger.add_seconds(&name("Rust"), 7);

        let before = ledger.clone();
        assert_eq!(
            ledger.add_category(" Rust "),
            Err(ValidationError::DuplicateCategory {
                name: "Rust".to_string()
            })
        );
        assert!(matches!(
            ledger.add_category("  "),
            Err(ValidationError::Empty { .. })
        ));
        assert_eq!(ledger, before);

        let added = ledger.add_category("Zig").unwrap();
        assert_eq!(added.as_str(), "Zig");
        assert_eq!(ledger.total_of("Zig"), 0);
    }

    #[test]
    fn test_from_empty_totals_is_default() {
        assert_eq!(
            CategoryLedger::from_totals(IndexMap::new()),
            CategoryLedger::new()
        );
    }

    #[test]
    fn test_iter_keeps_insertion_order() {
        let mut ledger = CategoryLedger::new();
        ledger.add_seconds(&name("Rust"), 1);
        ledger.add_seconds(&name("Go"), 2);
        ledger.add_seconds(&name("Rust"), 3);
        let names: Vec<_> = ledger.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["General", "Rust", "Go"]);
        assert_eq!(ledger.first().map(CategoryName::as_str), Some("General"));

        let ledger =
            CategoryLedger::from_totals(IndexMap::from([(name("Zig"), 5), (name("Elm"), 9)]));
        assert_eq!(ledger.first().map(CategoryName::as_str), Some("Zig"));
    }
}
