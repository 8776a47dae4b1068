//! Text layout: font sizing, line splitting and width fitting.

/// Sizing heuristics and the width-fit loop.
pub mod text;

pub use text::{LayoutResult, layout};
