//! Encoding sinks.
//!
//! Sinks consume rendered frames in loop order and are driven by the export sequencer.

/// Animated GIF sink built on the `gif` crate.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;

pub use self::gif::GifSink;
pub use sink::{FrameMeta, FrameSink, InMemorySink, SinkConfig};
