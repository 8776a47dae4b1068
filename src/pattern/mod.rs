//! Background motifs drawn beneath the text.

/// `draw_pattern` dispatch over [`crate::style::model::PatternKind`].
pub mod draw;
/// Path builders for the individual motifs.
pub mod shapes;

pub use draw::{draw_pattern, pattern_color};
