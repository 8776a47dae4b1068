use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::encode::gif::{DEFAULT_QUANTIZE_SPEED, GifSink};
use crate::encode::sink::{FrameMeta, FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::layout::text::split_lines;
use crate::render::alpha::binarize_alpha;
use crate::render::cpu::CpuSurface;
use crate::render::font::FontFace;
use crate::render::frame::render_frame;
use crate::render::surface::Surface;
use crate::style::model::StyleConfig;

/// Longest slug kept in output file names.
pub const MAX_SLUG_LEN: usize = 32;

/// Options for [`export_animation`].
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Sampling rate of the exported loop.
    pub fps: Fps,
    /// Explicit font file; otherwise `$KINETYPE_FONT` or the system fallback chain.
    pub font_path: Option<PathBuf>,
    /// Extra directories searched for fonts before system fonts.
    pub font_dirs: Vec<PathBuf>,
    /// Quantizer speed passed to the GIF sink.
    pub quantize_speed: i32,
    /// Date stamped into the file name; today's local date when `None`.
    pub date: Option<chrono::NaiveDate>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            fps: Fps::EXPORT,
            font_path: None,
            font_dirs: Vec::new(),
            quantize_speed: DEFAULT_QUANTIZE_SPEED,
            date: None,
        }
    }
}

/// Frame count and timing of one exported loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportPlan {
    /// Number of frames; at least one.
    pub frame_count: u64,
    /// Display time of each frame in milliseconds.
    pub delay_ms: f32,
}

impl ExportPlan {
    /// Plan a loop of `duration_secs` sampled at `fps`.
    pub fn new(duration_secs: f32, fps: Fps) -> KinetypeResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(KinetypeError::validation(
                "export duration must be finite and > 0",
            ));
        }
        let frame_count = fps.secs_to_frames_round(f64::from(duration_secs)).max(1);
        let delay_ms = (1000.0 * f64::from(duration_secs) / frame_count as f64) as f32;
        Ok(Self {
            frame_count,
            delay_ms,
        })
    }

    /// Loop time of frame `i`.
    pub fn time_of(&self, i: u64) -> f64 {
        i as f64 / self.frame_count as f64
    }
}

/// Finished export.
#[derive(Clone, Debug)]
pub struct ExportOutput {
    /// Encoded GIF file.
    pub bytes: Vec<u8>,
    /// Frames in the file.
    pub frame_count: u64,
    /// Per-frame delay in milliseconds.
    pub delay_ms: f32,
    /// Suggested file name.
    pub file_name: String,
}

/// Counters from one driver run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Frames pushed to the sink.
    pub frames_written: u64,
}

/// Renders every frame of one loop into a sink.
#[derive(Clone, Debug)]
pub struct ExportDriver {
    style: StyleConfig,
    plan: ExportPlan,
    fps: Fps,
}

impl ExportDriver {
    /// Validate `style` and plan its loop at `fps`.
    pub fn new(style: StyleConfig, fps: Fps) -> KinetypeResult<Self> {
        style.validate()?;
        let plan = ExportPlan::new(style.duration_secs, fps)?;
        Ok(Self { style, plan, fps })
    }

    /// The planned frame count and delay.
    pub fn plan(&self) -> ExportPlan {
        self.plan
    }

    /// Render the loop into `sink`.
    pub fn run<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        sink: &mut dyn FrameSink,
    ) -> KinetypeResult<ExportStats> {
        self.run_with_progress(surface, sink, |_| {})
    }

    /// Render the loop into `sink`, calling `progress` with the number of frames written.
    pub fn run_with_progress<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        sink: &mut dyn FrameSink,
        mut progress: impl FnMut(u64),
    ) -> KinetypeResult<ExportStats> {
        let canvas = self.style.canvas;
        if surface.width() != canvas.width || surface.height() != canvas.height {
            return Err(KinetypeError::validation(format!(
                "surface is {}x{}, style canvas is {}x{}",
                surface.width(),
                surface.height(),
                canvas.width,
                canvas.height
            )));
        }

        let transparent = self.style.transparent_background;
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
            frame_count: self.plan.frame_count,
            transparent,
        })?;

        let meta = FrameMeta {
            delay_ms: self.plan.delay_ms,
            transparent,
        };
        let mut stats = ExportStats::default();
        for i in 0..self.plan.frame_count {
            render_frame(
                surface,
                &self.style,
                canvas.width,
                canvas.height,
                self.plan.time_of(i),
            )?;
            let mut frame = surface.read_pixels()?;
            if transparent {
                binarize_alpha(&mut frame.data);
            }
            sink.push_frame(FrameIndex(i), &frame, meta)?;
            stats.frames_written += 1;
            progress(stats.frames_written);
        }

        sink.end()?;
        Ok(stats)
    }
}

/// File-name-safe form of `text`: lowercase ASCII alphanumerics, words joined by `-`.
pub fn slugify(text: &str) -> String {
    let mut out = String::new();
    let mut pending_sep = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c.to_ascii_lowercase());
            if out.len() >= MAX_SLUG_LEN {
                break;
            }
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_sep = true;
        }
    }
    if out.is_empty() {
        out.push_str("text");
    }
    out
}

/// `reaction-{slug}-{w}x{h}-{YYYYMMDD}.gif`.
pub fn output_file_name(style: &StyleConfig, date: chrono::NaiveDate) -> String {
    format!(
        "reaction-{}-{}x{}-{}.gif",
        slugify(&style.text),
        style.canvas.width,
        style.canvas.height,
        date.format("%Y%m%d")
    )
}

/// Whether rendering `style` draws any glyphs.
pub fn needs_font(style: &StyleConfig) -> bool {
    split_lines(&style.text).iter().any(|l| !l.is_empty())
}

fn export_with_progress(
    style: &StyleConfig,
    opts: &ExportOptions,
    progress: impl FnMut(u64),
) -> KinetypeResult<ExportOutput> {
    let driver = ExportDriver::new(style.clone(), opts.fps)?;
    let plan = driver.plan();

    let font = if needs_font(style) {
        Some(FontFace::resolve(
            opts.font_path.as_deref(),
            &opts.font_dirs,
        )?)
    } else {
        None
    };
    let mut surface = CpuSurface::new(style.canvas.width, style.canvas.height, font.as_ref())?;

    let bg = style.background_color;
    let mut sink = GifSink::new()
        .with_speed(opts.quantize_speed)
        .with_matte([bg.r, bg.g, bg.b]);
    let stats = driver.run_with_progress(&mut surface, &mut sink, progress)?;
    let bytes = sink.into_bytes()?;

    let date = opts
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let file_name = output_file_name(style, date);
    tracing::info!(
        frames = stats.frames_written,
        bytes = bytes.len(),
        %file_name,
        "export finished"
    );

    Ok(ExportOutput {
        bytes,
        frame_count: plan.frame_count,
        delay_ms: plan.delay_ms,
        file_name,
    })
}

/// Render `style` to a looping GIF on the CPU.
#[tracing::instrument(skip(style, opts), fields(text = %style.text, width = style.canvas.width, height = style.canvas.height))]
pub fn export_animation(style: &StyleConfig, opts: &ExportOptions) -> KinetypeResult<ExportOutput> {
    export_with_progress(style, opts, |_| {})
}

/// Observable state of an [`ExportTask`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportStatus {
    /// Frames are being rendered and encoded.
    Generating,
    /// The file is ready.
    Finished,
    /// The export stopped with this error message.
    Failed(String),
}

/// Export running on a worker thread.
pub struct ExportTask {
    status: Arc<Mutex<ExportStatus>>,
    frames_done: Arc<AtomicU64>,
    frame_count: u64,
    handle: JoinHandle<KinetypeResult<ExportOutput>>,
}

fn set_status(slot: &Mutex<ExportStatus>, status: ExportStatus) {
    match slot.lock() {
        Ok(mut g) => *g = status,
        Err(poisoned) => *poisoned.into_inner() = status,
    }
}

/// Start exporting `style` on a worker thread.
///
/// The status reads [`ExportStatus::Generating`] before this returns.
pub fn spawn_export(style: StyleConfig, opts: ExportOptions) -> KinetypeResult<ExportTask> {
    let plan = ExportDriver::new(style.clone(), opts.fps)?.plan();
    let status = Arc::new(Mutex::new(ExportStatus::Generating));
    let frames_done = Arc::new(AtomicU64::new(0));

    let worker_status = Arc::clone(&status);
    let worker_frames = Arc::clone(&frames_done);
    let handle = std::thread::Builder::new()
        .name("kinetype-export".to_owned())
        .spawn(move || {
            let res = export_with_progress(&style, &opts, |n| {
                worker_frames.store(n, Ordering::Relaxed);
            });
            match &res {
                Ok(_) => set_status(&worker_status, ExportStatus::Finished),
                Err(e) => set_status(&worker_status, ExportStatus::Failed(e.to_string())),
            }
            res
        })
        .map_err(|e| KinetypeError::render(format!("failed to spawn export thread: {e}")))?;

    Ok(ExportTask {
        status,
        frames_done,
        frame_count: plan.frame_count,
        handle,
    })
}

impl ExportTask {
    /// Current status.
    pub fn status(&self) -> ExportStatus {
        match self.status.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// `(frames written, total frames)`.
    pub fn progress(&self) -> (u64, u64) {
        (self.frames_done.load(Ordering::Relaxed), self.frame_count)
    }

    /// Block until the export finishes.
    pub fn wait(self) -> KinetypeResult<ExportOutput> {
        self.handle
            .join()
            .map_err(|_| KinetypeError::render("export thread panicked"))?
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/export.rs"]
mod tests;
