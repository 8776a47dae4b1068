//! Kinetype renders short text messages as looping animated reaction images.
//!
//! A [`StyleConfig`] fully describes one animation. The pipeline per frame is:
//!
//! - lay out the text ([`layout::layout`])
//! - evaluate the animation at loop time `t` ([`animation::transform::compute_transform`])
//! - draw background, pattern and text onto a [`Surface`] ([`render_frame`])
//!
//! [`export_animation`] samples one loop at a fixed rate and encodes it through a
//! [`FrameSink`]; [`PreviewLoop`] drives the same renderer from a clock on its own thread.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Animation function table.
pub mod animation;
/// Frame sinks and the GIF codec.
pub mod encode;
/// Text layout engine.
pub mod layout;
/// Background pattern generator.
pub mod pattern;
/// Drawing surfaces and frame composition.
pub mod render;
/// Preview and export sequencing.
pub mod session;
/// Style model, colors and presets.
pub mod style;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, Point, Rect, Rgba8, Vec2,
};
pub use crate::foundation::error::{KinetypeError, KinetypeResult};

pub use crate::animation::transform::{MotionContext, Transform, compute_transform};
pub use crate::encode::{FrameMeta, FrameSink, GifSink, InMemorySink, SinkConfig};
pub use crate::layout::{LayoutResult, layout};
pub use crate::pattern::draw_pattern;
pub use crate::render::{
    CpuSurface, FontFace, FrameRGBA, RecordingSurface, Surface, TextMeasure, binarize_alpha,
    render_frame,
};
pub use crate::session::{
    ExportDriver, ExportOptions, ExportOutput, ExportStatus, ExportTask, PreviewHandle,
    PreviewLoop, export_animation, spawn_export,
};
pub use crate::style::model::{AnimationKind, PatternKind, StyleConfig};
pub use crate::style::presets::PresetSize;
