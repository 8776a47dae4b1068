//! Style parameters: the immutable input of every render and export call.

/// Color parsing and formatting for [`crate::Rgba8`].
pub mod color;
/// Style model and validation.
pub mod model;
/// Static catalog of supported output sizes.
pub mod presets;
