use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::render::surface::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Frame rate the sequence was sampled at.
    pub fps: Fps,
    /// Frame count the sink should expect.
    pub frame_count: u64,
    /// Whether frames carry binarized transparency.
    pub transparent: bool,
}

/// Per-frame codec metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMeta {
    /// Display time of this frame in milliseconds.
    pub delay_ms: f32,
    /// Whether alpha-0 pixels should be encoded as transparent.
    pub transparent: bool,
}

/// Sink contract for consuming rendered frames in loop order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order, between
/// one `begin` and one `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> KinetypeResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA, meta: FrameMeta)
    -> KinetypeResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> KinetypeResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA, FrameMeta)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA, FrameMeta)] {
        &self.frames
    }

    /// Whether `end` has been called since the last `begin`.
    pub fn is_finished(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> KinetypeResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(
        &mut self,
        idx: FrameIndex,
        frame: &FrameRGBA,
        meta: FrameMeta,
    ) -> KinetypeResult<()> {
        if self.cfg.is_none() {
            return Err(KinetypeError::encode("push_frame called before begin"));
        }
        if let Some((last, _, _)) = self.frames.last()
            && idx <= *last
        {
            return Err(KinetypeError::encode(format!(
                "frame {} pushed after frame {}",
                idx.0, last.0
            )));
        }
        self.frames.push((idx, frame.clone(), meta));
        Ok(())
    }

    fn end(&mut self) -> KinetypeResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
