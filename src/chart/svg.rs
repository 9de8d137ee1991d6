//! Inline SVG line charts, emitted as percent-encoded data URIs so the
//! report stays a single self-contained file.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::chart::ChartRenderer;

// Characters that cannot appear raw inside a double-quoted data: URI.
const DATA_URI_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'{')
    .add(b'}');

/// Fixed-size polyline chart scaled to the min/max range of the series.
#[derive(Debug, Clone)]
pub struct SvgChart {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgChart {
    fn default() -> Self {
        Self {
            width: 480,
            height: 160,
        }
    }
}

impl ChartRenderer for SvgChart {
    fn render(&self, values: &[u64]) -> String {
        let svg = self.draw(values);
        format!(
            "data:image/svg+xml,{}",
            utf8_percent_encode(&svg, DATA_URI_SET)
        )
    }
}

impl SvgChart {
    fn draw(&self, values: &[u64]) -> String {
        const PAD: f64 = 6.0;

        let w = f64::from(self.width);
        let h = f64::from(self.height);

        let min = values.iter().copied().min().unwrap_or(0);
        let max = values.iter().copied().max().unwrap_or(0);
        let span = if max > min { (max - min) as f64 } else { 1.0 };
        let step = if values.len() > 1 {
            (w - 2.0 * PAD) / (values.len() - 1) as f64
        } else {
            0.0
        };

        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{}' height='{}'>",
            self.width, self.height
        ));
        out.push_str("<rect width='100%' height='100%' fill='#ffffff' stroke='#cccccc'/>");

        let points: Vec<(f64, f64)> = values
            .iter()
            .copied()
            .enumerate()
            .map(|(i, v)| {
                let x = PAD + step * i as f64;
                let y = h - PAD - ((v - min) as f64 / span) * (h - 2.0 * PAD);
                (x, y)
            })
            .collect();

        match points.as_slice() {
            [] => {}
            [(x, y)] => {
                // A single sample has no line to draw; mark the point.
                out.push_str(&format!(
                    "<circle cx='{x:.1}' cy='{y:.1}' r='2' fill='#2563eb'/>"
                ));
            }
            _ => {
                let path: Vec<String> = points
                    .iter()
                    .map(|(x, y)| format!("{x:.1},{y:.1}"))
                    .collect();
                out.push_str(&format!(
                    "<polyline points='{}' fill='none' stroke='#2563eb' stroke-width='1.5'/>",
                    path.join(" ")
                ));
            }
        }

        if !values.is_empty() {
            out.push_str(&format!(
                "<text x='8' y='14' fill='#666666' font-size='11'>{max}</text>"
            ));
            out.push_str(&format!(
                "<text x='8' y='{:.0}' fill='#666666' font-size='11'>{min}</text>",
                h - 8.0
            ));
        }

        out.push_str("</svg>");
        out
    }
}
