use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{KinetypeError, KinetypeResult};

/// Maximum characters on one line of text.
pub const MAX_LINE_CHARS: usize = 30;
/// Maximum number of text lines.
pub const MAX_LINES: usize = 6;
/// Largest accepted canvas side (the CPU rasterizer addresses pixels with `u16`).
pub const MAX_CANVAS_SIDE: u32 = 4096;
/// Longest accepted loop duration in seconds.
pub const MAX_DURATION_SECS: f32 = 30.0;

/// Foreground motion applied to the text block once per loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    /// Scale breathes around 1.0.
    #[default]
    Pulse,
    /// Full rotation per loop.
    Spin,
    /// Fill hue cycles through the color wheel.
    Rainbow,
    /// Small jitter on both axes.
    Shake,
    /// Horizontal sweep across and off both edges.
    Slide,
    /// Vertical sine bob.
    Bounce,
    /// Scale ramps 0 -> 1 -> 0.
    Grow,
    /// Opacity toggles between full and dim.
    Blink,
}

impl AnimationKind {
    /// All kinds in declaration order.
    pub const ALL: [AnimationKind; 8] = [
        AnimationKind::Pulse,
        AnimationKind::Spin,
        AnimationKind::Rainbow,
        AnimationKind::Shake,
        AnimationKind::Slide,
        AnimationKind::Bounce,
        AnimationKind::Grow,
        AnimationKind::Blink,
    ];
}

/// Decorative background motif.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// No motif.
    #[default]
    None,
    /// Staggered grid of hearts.
    Heart,
    /// Staggered grid of five-point stars.
    Star,
    /// Radial fan of wedges from the center.
    Burst,
    /// Speech-bubble outline.
    Bubble,
}

impl PatternKind {
    /// All kinds in declaration order.
    pub const ALL: [PatternKind; 5] = [
        PatternKind::None,
        PatternKind::Heart,
        PatternKind::Star,
        PatternKind::Burst,
        PatternKind::Bubble,
    ];
}

/// Immutable style parameters for one render or export call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Message to render; `\n` separates lines.
    pub text: String,
    /// Fill color of the glyphs.
    pub text_color: Rgba8,
    /// Background fill used when `transparent_background` is false.
    pub background_color: Rgba8,
    /// Leave the background clear and emit a transparent GIF.
    pub transparent_background: bool,
    /// Foreground motion.
    pub animation: AnimationKind,
    /// Background motif.
    pub pattern: PatternKind,
    /// Output size.
    pub canvas: Canvas,
    /// Loop length in seconds.
    pub duration_secs: f32,
    /// Additive bias applied to the base font size (reference-size pixels).
    pub font_size_offset: i32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            text: "WOW".to_owned(),
            text_color: Rgba8::WHITE,
            background_color: Rgba8::TRANSPARENT,
            transparent_background: true,
            animation: AnimationKind::Pulse,
            pattern: PatternKind::None,
            canvas: Canvas::new(128, 128),
            duration_secs: 2.0,
            font_size_offset: 0,
        }
    }
}

impl StyleConfig {
    /// Parse a style from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> KinetypeResult<Self> {
        let style: StyleConfig = serde_json::from_str(s).context("parse style JSON")?;
        style.validate()?;
        Ok(style)
    }

    /// Read and parse a JSON style file.
    pub fn from_path(path: &Path) -> KinetypeResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read style file '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check the invariants every renderer relies on.
    pub fn validate(&self) -> KinetypeResult<()> {
        let Canvas { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(KinetypeError::validation("canvas width/height must be > 0"));
        }
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(KinetypeError::validation(format!(
                "canvas {width}x{height} exceeds the {MAX_CANVAS_SIDE}px limit"
            )));
        }
        if !self.duration_secs.is_finite()
            || self.duration_secs <= 0.0
            || self.duration_secs > MAX_DURATION_SECS
        {
            return Err(KinetypeError::validation(format!(
                "duration_secs must be in (0, {MAX_DURATION_SECS}], got {}",
                self.duration_secs
            )));
        }

        let lines: Vec<&str> = self.text.split('\n').collect();
        if lines.len() > MAX_LINES {
            return Err(KinetypeError::validation(format!(
                "text has {} lines, at most {MAX_LINES} are allowed",
                lines.len()
            )));
        }
        if let Some(line) = lines
            .iter()
            .find(|l| l.trim_end_matches('\r').chars().count() > MAX_LINE_CHARS)
        {
            return Err(KinetypeError::validation(format!(
                "line \"{line}\" is longer than {MAX_LINE_CHARS} characters"
            )));
        }
        Ok(())
    }

    /// Size-normalization factor for this style's canvas.
    pub fn size_norm(&self) -> f64 {
        self.canvas.size_norm()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/model.rs"]
mod tests;
