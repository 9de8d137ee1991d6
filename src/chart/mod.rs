//! Chart rendering seam. The report generator only sees the
//! [`ChartRenderer`] trait; the bundled implementation draws inline SVG.

pub mod svg;

pub use svg::SvgChart;

/// Renders an ordered numeric series into a displayable image reference,
/// usable as the `src` of an image tag.
pub trait ChartRenderer {
    fn render(&self, values: &[u64]) -> String;
}
