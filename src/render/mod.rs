//! Output side: the per-class HTML chart report and the tab-separated
//! heap occupancy series.

pub mod heap;
pub mod html;

pub use heap::write_heap_series;
pub use html::{ReportStats, render_histogram_report};
