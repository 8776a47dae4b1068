use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::render::frame::render_frame;
use crate::render::surface::{FrameRGBA, Surface};
use crate::style::model::StyleConfig;

/// Default pause between preview frames.
pub const DEFAULT_REFRESH: Duration = Duration::from_millis(16);

/// Millisecond time source driving the preview.
pub trait Clock: Send + 'static {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Wall-clock time since the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Loop position in `[0, 1)` at `now_ms` for a loop of `duration_secs`.
pub fn preview_time(now_ms: u64, duration_secs: f32) -> f64 {
    let loop_ms = if duration_secs.is_finite() && duration_secs > 0.0 {
        (f64::from(duration_secs) * 1000.0).round().max(1.0) as u64
    } else {
        1
    };
    (now_ms % loop_ms) as f64 / loop_ms as f64
}

/// One rendered preview frame.
#[derive(Clone, Debug)]
pub struct PreviewFrame {
    /// Number of frames rendered before this one.
    pub seq: u64,
    /// Loop time the frame was rendered at.
    pub t: f64,
    /// Pixels, straight alpha, not binarized.
    pub frame: FrameRGBA,
}

/// Looping preview renderer on a dedicated thread.
pub struct PreviewLoop;

impl PreviewLoop {
    /// Start previewing `style` with the wall clock and default refresh interval.
    pub fn start<S, F, C>(
        style: StyleConfig,
        make_surface: F,
        consumer: C,
    ) -> KinetypeResult<PreviewHandle>
    where
        S: Surface + 'static,
        F: FnOnce() -> KinetypeResult<S> + Send + 'static,
        C: FnMut(PreviewFrame) + Send + 'static,
    {
        Self::start_with(style, make_surface, consumer, SystemClock, DEFAULT_REFRESH)
    }

    /// Start previewing with an explicit clock and refresh interval.
    ///
    /// `make_surface` runs on the preview thread, so the surface never crosses threads.
    pub fn start_with<S, F, C, K>(
        style: StyleConfig,
        make_surface: F,
        mut consumer: C,
        clock: K,
        refresh: Duration,
    ) -> KinetypeResult<PreviewHandle>
    where
        S: Surface + 'static,
        F: FnOnce() -> KinetypeResult<S> + Send + 'static,
        C: FnMut(PreviewFrame) + Send + 'static,
        K: Clock,
    {
        style.validate()?;
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let join = std::thread::Builder::new()
            .name("kinetype-preview".to_owned())
            .spawn(move || -> KinetypeResult<u64> {
                let mut surface = make_surface()?;
                let (w, h) = (surface.width(), surface.height());
                let mut seq = 0u64;
                loop {
                    match stop_rx.try_recv() {
                        Err(mpsc::TryRecvError::Empty) => {}
                        _ => break,
                    }
                    let t = preview_time(clock.now_ms(), style.duration_secs);
                    render_frame(&mut surface, &style, w, h, t)?;
                    let frame = surface.read_pixels()?;
                    consumer(PreviewFrame { seq, t, frame });
                    seq += 1;

                    match stop_rx.recv_timeout(refresh) {
                        Err(RecvTimeoutError::Timeout) => {}
                        _ => break,
                    }
                }
                tracing::debug!(frames = seq, "preview stopped");
                Ok(seq)
            })
            .map_err(|e| KinetypeError::render(format!("failed to spawn preview thread: {e}")))?;

        Ok(PreviewHandle {
            stop: Some(stop_tx),
            join: Some(join),
        })
    }
}

/// Owner of a running preview. Dropping it cancels the preview.
pub struct PreviewHandle {
    stop: Option<Sender<()>>,
    join: Option<JoinHandle<KinetypeResult<u64>>>,
}

impl PreviewHandle {
    /// Whether the preview thread has exited (cancelled or failed).
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(|j| j.is_finished())
    }

    /// Stop the preview and wait for its thread.
    ///
    /// Returns the number of frames rendered, or the error that ended the loop early. No frame
    /// is rendered or delivered after this returns.
    pub fn cancel(mut self) -> KinetypeResult<u64> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> KinetypeResult<u64> {
        self.stop.take();
        match self.join.take() {
            Some(j) => j
                .join()
                .map_err(|_| KinetypeError::render("preview thread panicked"))?,
            None => Ok(0),
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            tracing::warn!(error = %e, "preview ended with an error");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview.rs"]
mod tests;
