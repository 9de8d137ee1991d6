use std::io::Write;

use crate::Result;
use crate::log::HeapSample;

/// Write one `<time>\t<percentage>` line per retained heap sample, in
/// file order. The caller owns buffering and the final flush.
pub fn write_heap_series<W: Write>(mut writer: W, samples: &[HeapSample]) -> Result<()> {
    for sample in samples {
        writeln!(writer, "{}\t{}", sample.time, sample.percentage)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(time: &str, percentage: &str) -> HeapSample {
        HeapSample {
            time: time.to_string(),
            percentage: percentage.to_string(),
        }
    }

    #[test]
    fn writes_tab_separated_lines_in_order() {
        let samples = vec![sample("t1", "73.5%"), sample("t2", "80.1%")];

        let mut out = Vec::new();
        write_heap_series(&mut out, &samples).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "t1\t73.5%\nt2\t80.1%\n");
    }

    #[test]
    fn empty_input_writes_nothing() {
        let mut out = Vec::new();
        write_heap_series(&mut out, &[]).unwrap();

        assert_eq!(out, b"");
    }
}
