use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use regex::Regex;

use crate::Result;
use crate::log::row::{ClassRecord, HeapSample, Histogram};

/// Marker prefix of a block-delimiter line; the snapshot timestamp sits
/// between the markers.
const BLOCK_MARKER: &str = "***";

/// Section header preceding the old-generation occupancy line in the
/// heap log. Matched against the whole trimmed line, case-sensitive.
const OLD_GEN_HEADER: &str = "concurrent mark-sweep generation:";

/// Parse a class-histogram log file into the retained snapshot sequence.
pub fn parse_histogram_file(path: &Path) -> Result<Vec<Histogram>> {
    let file = fs::File::open(path)
        .with_context(|| format!("read histogram log file {}", path.display()))?;
    parse_histogram_lines(BufReader::new(file))
}

/// Parse class-histogram log lines.
///
/// Data rows have exactly 4 whitespace-separated columns:
/// ordinal  count  bytes  class-name
///
/// Example:
/// 1:   2011   276608   java.lang.Class
///
/// Anything else between delimiters (header/footer rows, wrong column
/// count, non-numeric or overflowing count/bytes) is skipped; a block
/// that never accumulates a class row is dropped.
pub fn parse_histogram_lines<R: BufRead>(reader: R) -> Result<Vec<Histogram>> {
    // Capture:
    // 1) count: integer
    // 2) bytes: integer
    // 3) class name: final token
    let re = Regex::new(r#"^\S+\s+(\d+)\s+(\d+)\s+(\S+)$"#)?;

    let mut out = Vec::new();
    let mut current: Option<Histogram> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(BLOCK_MARKER) {
            flush_histogram(&mut current, &mut out);
            current = Some(Histogram {
                timestamp: extract_timestamp(line),
                classes: BTreeMap::new(),
            });
            continue;
        }

        let Some(caps) = re.captures(line) else {
            continue;
        };
        // Data row before any delimiter line: malformed input, skipped.
        let Some(block) = current.as_mut() else {
            continue;
        };
        // A digit run too large for u64 fails the whole record; invalid
        // input is never coerced to zero.
        let (Ok(count), Ok(bytes)) = (caps[1].parse::<u64>(), caps[2].parse::<u64>()) else {
            continue;
        };
        // Duplicate class within one block: last occurrence wins.
        block
            .classes
            .insert(caps[3].to_string(), ClassRecord { count, bytes });
    }

    flush_histogram(&mut current, &mut out);
    Ok(out)
}

/// Parse a heap-occupancy log file into the retained sample sequence.
pub fn parse_heap_file(path: &Path) -> Result<Vec<HeapSample>> {
    let file =
        fs::File::open(path).with_context(|| format!("read heap log file {}", path.display()))?;
    parse_heap_lines(BufReader::new(file))
}

/// Parse heap-occupancy log lines.
///
/// Each `***` block lists several generation sections; only the first
/// `<percentage>% used` line after the old-generation header counts. A
/// block that never reaches such a line is dropped.
pub fn parse_heap_lines<R: BufRead>(reader: R) -> Result<Vec<HeapSample>> {
    // Capture: the percentage token (trailing '%' kept), followed by the
    // literal word "used" and nothing else.
    let re = Regex::new(r#"^(\S*%)\s+used$"#)?;

    let mut out = Vec::new();
    let mut time: Option<String> = None;
    let mut percentage: Option<String> = None;
    let mut in_old_gen = false;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(BLOCK_MARKER) {
            flush_heap(&mut time, &mut percentage, &mut out);
            time = Some(extract_timestamp(line));
            in_old_gen = false;
            continue;
        }

        if line == OLD_GEN_HEADER {
            in_old_gen = true;
            continue;
        }

        if !in_old_gen {
            continue;
        }
        if let Some(caps) = re.captures(line) {
            // Occupancy line before any delimiter line: skipped, same as
            // the histogram side.
            if time.is_some() {
                percentage = Some(caps[1].to_string());
            }
            // Disarm so a later generation's line cannot overwrite this one.
            in_old_gen = false;
        }
    }

    flush_heap(&mut time, &mut percentage, &mut out);
    Ok(out)
}

/// Strip every `***` occurrence from a delimiter line; what remains,
/// trimmed, is the snapshot timestamp label.
fn extract_timestamp(line: &str) -> String {
    line.replace(BLOCK_MARKER, " ").trim().to_string()
}

/// Retain a finished histogram block only if it holds at least one class.
fn flush_histogram(current: &mut Option<Histogram>, out: &mut Vec<Histogram>) {
    if let Some(histo) = current.take() {
        if !histo.classes.is_empty() {
            out.push(histo);
        }
    }
}

/// Retain a finished heap block only if both the timestamp and the
/// occupancy percentage were captured.
fn flush_heap(time: &mut Option<String>, percentage: &mut Option<String>, out: &mut Vec<HeapSample>) {
    let time = time.take();
    let percentage = percentage.take();
    if let (Some(time), Some(percentage)) = (time, percentage) {
        out.push(HeapSample { time, percentage });
    }
}
