//! Sequencing: the looping preview and the finite export.
//!
//! Preview time comes from a clock; export time comes from the frame index. The two never mix.

/// Finite export driver, GIF export entry point and background export task.
pub mod export;
/// Cancellable looping preview.
pub mod preview;

pub use export::{
    ExportDriver, ExportOptions, ExportOutput, ExportPlan, ExportStatus, ExportTask,
    export_animation, needs_font, output_file_name, spawn_export,
};
pub use preview::{Clock, PreviewFrame, PreviewHandle, PreviewLoop, SystemClock, preview_time};
