use std::collections::BTreeMap;

/// Count/bytes usage of a single class within one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRecord {
    pub count: u64,
    pub bytes: u64,
}

/// One `***`-delimited snapshot from the class-histogram log.
///
/// The timestamp is the label taken from the delimiter line; it is never
/// parsed as a time value, and snapshots stay in file order.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub timestamp: String,
    pub classes: BTreeMap<String, ClassRecord>,
}

/// Old-generation occupancy captured from one snapshot of the heap log.
///
/// `percentage` keeps its trailing `%` verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapSample {
    pub time: String,
    pub percentage: String,
}
