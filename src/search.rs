//! In-memory search over driver records.
use crate::source::DriverRecord;

/// Lowercase and trim a raw search term. An empty result matches everything.
pub fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

/// `needle` must already be normalized.
pub fn matches(driver: &DriverRecord, needle: &str) -> bool {
    needle.is_empty()
        || driver.name.to_lowercase().contains(needle)
        || driver.identification.to_lowercase().contains(needle)
}

/// Records whose name or identification contains `term`, in list order.
pub fn filter_records(drivers: &[DriverRecord], term: &str) -> Vec<DriverRecord> {
    let q = normalize(term);
    if q.is_empty() {
        return drivers.to_vec();
    }
    drivers.iter().filter(|d| matches(d, &q)).cloned().collect()
}
