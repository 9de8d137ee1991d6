//! Series building: reshape the per-snapshot histograms into dense,
//! time-aligned per-class columns.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::log::Histogram;

/// Time-aligned value columns for one class. Both lists always hold one
/// entry per retained snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassSeries {
    pub count: Vec<u64>,
    pub bytes: Vec<u64>,
}

/// Columnar view of the whole run: snapshot timestamps plus one
/// [`ClassSeries`] per class observed in any snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct FlatSeries {
    pub times: Vec<String>,
    pub classes: BTreeMap<String, ClassSeries>,
}

/// Densify a histogram sequence into aligned per-class columns.
///
/// A class missing from a snapshot contributes `0`/`0` at that index
/// (zero usage, not unknown), so every column has exactly `times.len()`
/// entries. Classes iterate in name order, which keeps the report
/// reproducible across runs.
pub fn flatten(histograms: &[Histogram]) -> FlatSeries {
    let times = histograms.iter().map(|h| h.timestamp.clone()).collect();

    let mut names: BTreeSet<&str> = BTreeSet::new();
    for histo in histograms {
        names.extend(histo.classes.keys().map(String::as_str));
    }

    let mut classes = BTreeMap::new();
    for name in names {
        let mut series = ClassSeries {
            count: Vec::with_capacity(histograms.len()),
            bytes: Vec::with_capacity(histograms.len()),
        };
        for histo in histograms {
            match histo.classes.get(name) {
                Some(record) => {
                    series.count.push(record.count);
                    series.bytes.push(record.bytes);
                }
                None => {
                    series.count.push(0);
                    series.bytes.push(0);
                }
            }
        }
        classes.insert(name.to_string(), series);
    }

    FlatSeries { times, classes }
}

/// Population standard deviation over the full value list. Empty input
/// yields 0.0.
pub fn stddev(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|v| *v as f64).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| {
            let d = *v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}
