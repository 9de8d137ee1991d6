use crate::chart::ChartRenderer;
use crate::model::{FlatSeries, stddev};

/// How many classes made it into the report vs. were dropped by the
/// variance filter. Logged by the caller, never written into the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStats {
    pub rendered: usize,
    pub filtered: usize,
}

/// Render the per-class chart report.
///
/// Classes whose count column never changes (standard deviation 0,
/// which covers the all-zero and single-snapshot cases) are dropped.
/// Each retained class gets a bytes chart and a count chart side by
/// side, drawn by the injected chart capability.
///
/// The title and class names are embedded verbatim, without HTML
/// escaping.
pub fn render_histogram_report(
    series: &FlatSeries,
    title: &str,
    chart: &dyn ChartRenderer,
) -> (String, ReportStats) {
    // Kept out of format!() so the braces in the CSS stay literal.
    const STYLE: &str = "<style>* {box-sizing: border-box;}\n\
.column {float: left; width: 50%;}\n\
.row:after {content: \"\"; display: table; clear: both; padding: 10px;}\n\
</style>";

    let mut out = String::new();
    out.push_str("<html><head>\n<title>");
    out.push_str(title);
    out.push_str("</title>\n");
    out.push_str(STYLE);
    out.push_str("</head>\n<body>\n");

    let mut stats = ReportStats {
        rendered: 0,
        filtered: 0,
    };

    for (name, class) in &series.classes {
        if stddev(&class.count) == 0.0 {
            stats.filtered += 1;
            continue;
        }
        stats.rendered += 1;

        out.push_str("<div class=\"row\">\n<h4>");
        out.push_str(name);
        out.push_str("</h4>\n");
        out.push_str(&format!(
            "<div class=\"column\"><h5>bytes</h5><image src=\"{}\"></image></div>\n",
            chart.render(&class.bytes)
        ));
        out.push_str(&format!(
            "<div class=\"column\"><h5>count</h5><image src=\"{}\"></image></div>\n",
            chart.render(&class.count)
        ));
        out.push_str("</div><hr/>\n");
    }

    out.push_str("</body></html>");
    (out, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassSeries;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    /// Chart stub that echoes the series it was fed.
    struct StubChart;

    impl ChartRenderer for StubChart {
        fn render(&self, values: &[u64]) -> String {
            format!("chart:{values:?}")
        }
    }

    fn series(classes: &[(&str, Vec<u64>, Vec<u64>)]) -> FlatSeries {
        let times = classes
            .first()
            .map(|(_, count, _)| (0..count.len()).map(|i| format!("t{i}")).collect())
            .unwrap_or_default();
        FlatSeries {
            times,
            classes: classes
                .iter()
                .map(|(name, count, bytes)| {
                    (
                        name.to_string(),
                        ClassSeries {
                            count: count.clone(),
                            bytes: bytes.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn varying_class_is_rendered_with_both_charts() {
        let flat = series(&[("com.example.Foo", vec![10, 20], vec![1000, 2000])]);

        let (html, stats) = render_histogram_report(&flat, "report", &StubChart);

        assert_eq!(
            stats,
            ReportStats {
                rendered: 1,
                filtered: 0,
            }
        );
        assert!(html.contains("<h4>com.example.Foo</h4>"));
        assert!(html.contains("<h5>bytes</h5><image src=\"chart:[1000, 2000]\"></image>"));
        assert!(html.contains("<h5>count</h5><image src=\"chart:[10, 20]\"></image>"));
    }

    #[test]
    fn constant_count_class_is_filtered_out() {
        let flat = series(&[
            ("Const", vec![5, 5], vec![500, 500]),
            ("Varies", vec![1, 2], vec![8, 16]),
        ]);

        let (html, stats) = render_histogram_report(&flat, "report", &StubChart);

        assert_eq!(
            stats,
            ReportStats {
                rendered: 1,
                filtered: 1,
            }
        );
        assert!(!html.contains("Const"));
        assert!(html.contains("<h4>Varies</h4>"));
    }

    #[test]
    fn constant_bytes_with_varying_count_is_still_rendered() {
        // The filter looks at the count column only.
        let flat = series(&[("Foo", vec![1, 2], vec![64, 64])]);

        let (_, stats) = render_histogram_report(&flat, "report", &StubChart);

        assert_eq!(stats.rendered, 1);
    }

    #[test]
    fn all_zero_class_is_filtered_out() {
        let flat = series(&[("Ghost", vec![0, 0, 0], vec![0, 0, 0])]);

        let (_, stats) = render_histogram_report(&flat, "report", &StubChart);

        assert_eq!(
            stats,
            ReportStats {
                rendered: 0,
                filtered: 1,
            }
        );
    }

    #[test]
    fn single_snapshot_classes_are_filtered_out() {
        let flat = series(&[("Foo", vec![10], vec![1000])]);

        let (_, stats) = render_histogram_report(&flat, "report", &StubChart);

        assert_eq!(stats.filtered, 1);
    }

    #[test]
    fn title_is_embedded_verbatim() {
        let flat = series(&[]);

        let (html, _) = render_histogram_report(&flat, "usage of <b>web01</b>", &StubChart);

        assert!(html.contains("<title>usage of <b>web01</b></title>"));
    }

    #[test]
    fn empty_series_yields_a_bare_document() {
        let flat = series(&[]);

        let (html, stats) = render_histogram_report(&flat, "empty", &StubChart);

        assert_eq!(
            stats,
            ReportStats {
                rendered: 0,
                filtered: 0,
            }
        );
        assert!(html.starts_with("<html><head>"));
        assert!(html.ends_with("</body></html>"));
        assert!(!html.contains("<div class=\"row\">"));
    }
}
