use super::MetricResult;

/// Order identities by magnitude, largest first.
///
/// Equal magnitudes keep the order in which they were inserted.
#[must_use]
pub fn rank(result: MetricResult) -> Vec<String> {
    let mut entries = result.into_entries();
    entries.sort_by(|_, a, _, b| b.cmp(a));
    entries.into_keys().collect()
}
