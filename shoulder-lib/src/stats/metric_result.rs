use indexmap::IndexMap;

/// Magnitudes of a metric keyed by project identity, in insertion order.
///
/// Inserting an identity twice keeps its original position and replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricResult {
    entries: IndexMap<String, u64>,
}

impl MetricResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity: impl Into<String>, magnitude: u64) {
        let _ = self.entries.insert(identity.into(), magnitude);
    }

    #[must_use]
    pub fn get(&self, identity: &str) -> Option<u64> {
        self.entries.get(identity).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(identity, magnitude)| (identity.as_str(), *magnitude))
    }

    pub(super) fn into_entries(self) -> IndexMap<String, u64> {
        self.entries
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for MetricResult {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (identity, magnitude) in iter {
            result.insert(identity, magnitude);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_insertion_order() {
        let result: MetricResult = [("b", 1), ("a", 2), ("c", 0)].into_iter().collect();
        let order: Vec<_> = result.iter().map(|(identity, _)| identity).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_keeps_position_and_last_value() {
        let result: MetricResult = [("a", 1), ("b", 2), ("a", 7)].into_iter().collect();
        assert_eq!(result.len(), 2);
        assert_eq!(result.get("a"), Some(7));

        let order: Vec<_> = result.iter().collect();
        assert_eq!(order, [("a", 7), ("b", 2)]);
    }

    #[test]
    fn test_empty() {
        let result = MetricResult::new();
        assert!(result.is_empty());
        assert_eq!(result.get("a"), None);
    }
}
