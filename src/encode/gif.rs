use crate::encode::sink::{FrameMeta, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{KinetypeError, KinetypeResult};
use crate::foundation::math::flatten_over_bg_in_place;
use crate::render::surface::FrameRGBA;

/// NeuQuant sampling factor: 1 is slowest and best, 30 fastest.
pub const DEFAULT_QUANTIZE_SPEED: i32 = 10;

const TRANSPARENT_KEY: [u8; 3] = [0, 0, 0];

struct Encoding {
    encoder: ::gif::Encoder<Vec<u8>>,
    width: u16,
    height: u16,
    last: Option<FrameIndex>,
}

/// Sink that quantizes frames and appends them to a looping GIF held in memory.
///
/// The encoded file is only available after `end`, so a failed export never leaves a partial
/// container behind.
pub struct GifSink {
    speed: i32,
    matte: [u8; 3],
    encoding: Option<Encoding>,
    bytes: Option<Vec<u8>>,
}

impl Default for GifSink {
    fn default() -> Self {
        Self::new()
    }
}

impl GifSink {
    /// Create a sink with the default quantizer speed and a black matte.
    pub fn new() -> Self {
        Self {
            speed: DEFAULT_QUANTIZE_SPEED,
            matte: [0, 0, 0],
            encoding: None,
            bytes: None,
        }
    }

    /// Set the quantizer speed (clamped to `1..=30`).
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed.clamp(1, 30);
        self
    }

    /// Color that partially transparent pixels of opaque frames are flattened onto.
    pub fn with_matte(mut self, rgb: [u8; 3]) -> Self {
        self.matte = rgb;
        self
    }

    /// Finished file bytes. Fails if `end` has not completed.
    pub fn into_bytes(self) -> KinetypeResult<Vec<u8>> {
        self.bytes
            .ok_or_else(|| KinetypeError::encode("gif sink was not finalized"))
    }
}

/// Collapse every alpha-0 pixel onto one key color so they share the single transparent
/// palette entry.
fn key_clear_pixels(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        if px[3] == 0 {
            px[..3].copy_from_slice(&TRANSPARENT_KEY);
        }
    }
}

/// Convert a millisecond delay to GIF centiseconds.
pub fn delay_centis(delay_ms: f32) -> u16 {
    if !delay_ms.is_finite() || delay_ms <= 0.0 {
        return 0;
    }
    (delay_ms / 10.0).round().min(f32::from(u16::MAX)) as u16
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> KinetypeResult<()> {
        let width: u16 = cfg
            .width
            .try_into()
            .map_err(|_| KinetypeError::encode("gif width exceeds u16"))?;
        let height: u16 = cfg
            .height
            .try_into()
            .map_err(|_| KinetypeError::encode("gif height exceeds u16"))?;

        let mut encoder = ::gif::Encoder::new(Vec::new(), width, height, &[])
            .map_err(|e| KinetypeError::encode(format!("failed to start gif: {e}")))?;
        encoder
            .set_repeat(::gif::Repeat::Infinite)
            .map_err(|e| KinetypeError::encode(format!("failed to set gif loop: {e}")))?;

        self.bytes = None;
        self.encoding = Some(Encoding {
            encoder,
            width,
            height,
            last: None,
        });
        Ok(())
    }

    fn push_frame(
        &mut self,
        idx: FrameIndex,
        frame: &FrameRGBA,
        meta: FrameMeta,
    ) -> KinetypeResult<()> {
        let enc = self
            .encoding
            .as_mut()
            .ok_or_else(|| KinetypeError::encode("push_frame called before begin"))?;

        if frame.width != u32::from(enc.width) || frame.height != u32::from(enc.height) {
            return Err(KinetypeError::encode(format!(
                "frame {} is {}x{}, expected {}x{}",
                idx.0, frame.width, frame.height, enc.width, enc.height
            )));
        }
        if frame.data.len() != usize::from(enc.width) * usize::from(enc.height) * 4 {
            return Err(KinetypeError::encode(format!(
                "frame {} has {} bytes of pixel data",
                idx.0,
                frame.data.len()
            )));
        }
        if let Some(last) = enc.last
            && idx <= last
        {
            return Err(KinetypeError::encode(format!(
                "frame {} pushed after frame {}",
                idx.0, last.0
            )));
        }

        let mut pixels = frame.data.clone();
        if meta.transparent {
            key_clear_pixels(&mut pixels);
        } else {
            flatten_over_bg_in_place(&mut pixels, self.matte);
        }

        let mut out =
            ::gif::Frame::from_rgba_speed(enc.width, enc.height, &mut pixels, self.speed);
        out.delay = delay_centis(meta.delay_ms);
        enc.encoder
            .write_frame(&out)
            .map_err(|e| KinetypeError::encode(format!("failed to write frame {}: {e}", idx.0)))?;
        enc.last = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> KinetypeResult<()> {
        let enc = self
            .encoding
            .take()
            .ok_or_else(|| KinetypeError::encode("end called before begin"))?;
        let bytes = enc
            .encoder
            .into_inner()
            .map_err(|e| KinetypeError::encode(format!("failed to finish gif: {e}")))?;
        self.bytes = Some(bytes);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
