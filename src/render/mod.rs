//! Drawing surfaces and frame composition.

/// Transparency normalization for palette export.
pub mod alpha;
/// `vello_cpu` rasterizing surface.
pub mod cpu;
/// Display font discovery.
pub mod font;
/// Per-frame composition of background, pattern and text.
pub mod frame;
/// Display-list surface.
pub mod recording;
/// Surface capability traits and frame buffers.
pub mod surface;

pub use alpha::binarize_alpha;
pub use cpu::CpuSurface;
pub use font::FontFace;
pub use frame::render_frame;
pub use recording::{DrawCall, DrawOp, RecordingSurface};
pub use surface::{Checkpoint, FrameRGBA, MonospaceMeasure, Surface, TextMeasure};
