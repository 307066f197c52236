//! Text renderers for arrangements
//!
//! Plain-text outputs built on the structure layer: presentation slides and
//! chord charts. Page layout and fonts belong to the host.

pub mod slides;
pub mod chord_chart;

pub use slides::{export_slide_text, format_slides, normalize_row, split_into_slides, Slide};
pub use chord_chart::{render_chart, render_line, render_row, ChartRow};
