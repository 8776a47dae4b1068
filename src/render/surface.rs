use std::ops::{Deref, DerefMut};

use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::KinetypeResult;

/// A rendered frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, not premultiplied.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// A fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Text-measurement capability the layout engine depends on.
pub trait TextMeasure {
    /// Advance width in pixels of `text` set at `font_size_px`.
    fn measure_text(&mut self, text: &str, font_size_px: f32) -> KinetypeResult<f32>;
}

/// Measures every character as a fixed fraction of the font size.
///
/// Used where no real font is loaded; glyph widths of a bold display face average close to
/// `0.6em` for uppercase Latin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    /// Advance per character, in ems.
    pub advance_em: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure_text(&mut self, text: &str, font_size_px: f32) -> KinetypeResult<f32> {
        Ok(text.chars().count() as f32 * self.advance_em * font_size_px)
    }
}

/// 2D drawing surface with a canvas-style state stack.
///
/// The state saved by [`Surface::save`] holds the current transform and global alpha. Text is
/// positioned centered horizontally and vertically on the given point.
pub trait Surface: TextMeasure {
    /// Surface width in pixels.
    fn width(&self) -> u32;
    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Drop all drawing and reset the state stack to identity.
    fn clear(&mut self);
    /// Push a copy of the current state.
    fn save(&mut self);
    /// Pop the most recently saved state. No-op on an empty stack.
    fn restore(&mut self);
    /// Post-multiply the current transform by `affine`.
    fn concat_transform(&mut self, affine: Affine);
    /// Set the opacity multiplier applied to every subsequent paint.
    fn set_global_alpha(&mut self, alpha: f32);

    /// Fill an axis-aligned rectangle (in user space).
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);
    /// Fill a path with the non-zero rule.
    fn fill_path(&mut self, path: &BezPath, color: Rgba8);
    /// Stroke a path with the given line width.
    fn stroke_path(&mut self, path: &BezPath, color: Rgba8, width: f64);
    /// Fill `text` centered on `center`.
    fn fill_text(
        &mut self,
        text: &str,
        center: Point,
        font_size_px: f32,
        color: Rgba8,
    ) -> KinetypeResult<()>;
    /// Stroke the glyph outlines of `text` centered on `center`.
    fn stroke_text(
        &mut self,
        text: &str,
        center: Point,
        font_size_px: f32,
        color: Rgba8,
        width: f64,
    ) -> KinetypeResult<()>;

    /// Whether rounded rectangles are drawn with true rounded corners.
    fn supports_rounded_rect(&self) -> bool {
        true
    }

    /// Read back the composited frame.
    fn read_pixels(&mut self) -> KinetypeResult<FrameRGBA>;

    /// Translate the current transform.
    fn translate(&mut self, offset: Vec2) {
        self.concat_transform(Affine::translate(offset));
    }
}

/// Scoped save/restore of a surface's state.
///
/// Saves on construction and restores on drop, so every exit path (including `?`) leaves the
/// surface state as it was.
pub struct Checkpoint<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> Checkpoint<'a, S> {
    /// Save `surface` state until the returned guard is dropped.
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for Checkpoint<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for Checkpoint<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for Checkpoint<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
