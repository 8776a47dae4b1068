use crate::foundation::core::Canvas;
use crate::foundation::error::KinetypeResult;
use crate::render::surface::TextMeasure;
use crate::style::model::AnimationKind;

/// Smallest base size (before size normalization) the offset may push the text to.
pub const MIN_BASE_FONT_PX: i32 = 6;
/// Floor applied when width fitting produces an unusable size.
pub const MIN_READABLE_FONT_PX: f32 = 4.0;
/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.1;
/// Widest a line may be, as a fraction of the canvas width.
pub const MAX_WIDTH_FRACTION: f32 = 0.9;

const FIT_ITERATIONS: usize = 4;

/// Font size and line breaking for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// Uppercased lines, top to bottom. Never empty.
    pub lines: Vec<String>,
    /// Final font size in pixels.
    pub font_size_px: f32,
    /// Distance between consecutive baselines.
    pub line_height_px: f32,
    /// Measured width of the widest line at `font_size_px`.
    pub longest_line_width_px: f32,
    /// `min(width, height) / 128`.
    pub size_norm: f64,
}

/// Uppercase `text` and split it into lines.
///
/// A trailing `\r` on each line is dropped. Empty text yields a single empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.to_uppercase()
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_owned())
        .collect()
}

/// Base font size for a 128px canvas, picked from line count and the longest line's length.
pub fn base_font_size(lines: &[String], font_size_offset: i32) -> i32 {
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let multi_line = lines.len() > 1;

    let mut base: i32 = if longest > 20 {
        14
    } else if longest > 10 || (!multi_line && longest > 8) {
        20
    } else if longest > 5 {
        30
    } else {
        40
    };

    if lines.len() > 3 {
        base = base.min(18);
    } else if lines.len() > 2 {
        base = base.min(24);
    } else if multi_line {
        base = base.min(30);
    }

    base.saturating_add(font_size_offset).max(MIN_BASE_FONT_PX)
}

fn longest_width<M: TextMeasure + ?Sized>(
    measure: &mut M,
    lines: &[String],
    font_size_px: f32,
) -> KinetypeResult<f32> {
    let mut longest = 0.0f32;
    for line in lines {
        if line.is_empty() {
            continue;
        }
        longest = longest.max(measure.measure_text(line, font_size_px)?);
    }
    Ok(longest)
}

/// Lay out `text` on a `canvas_width x canvas_height` canvas.
///
/// Lines wider than 90% of the canvas shrink the font until they fit, except under
/// [`AnimationKind::Slide`] where the text is meant to travel past the edges.
pub fn layout<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    canvas_width: u32,
    canvas_height: u32,
    font_size_offset: i32,
    animation: AnimationKind,
) -> KinetypeResult<LayoutResult> {
    let lines = split_lines(text);
    let size_norm = Canvas::new(canvas_width, canvas_height).size_norm();

    let base = base_font_size(&lines, font_size_offset);
    let mut font_size_px = (f64::from(base) * size_norm) as f32;
    let mut longest = longest_width(measure, &lines, font_size_px)?;

    if animation != AnimationKind::Slide {
        let max_allowed = MAX_WIDTH_FRACTION * canvas_width as f32;
        for _ in 0..FIT_ITERATIONS {
            if longest <= max_allowed {
                break;
            }
            let next = font_size_px * (max_allowed / longest);
            if !next.is_finite() || next < MIN_READABLE_FONT_PX {
                font_size_px = MIN_READABLE_FONT_PX;
                longest = longest_width(measure, &lines, font_size_px)?;
                break;
            }
            tracing::trace!(from = font_size_px, to = next, "shrinking text to fit");
            font_size_px = next;
            longest = longest_width(measure, &lines, font_size_px)?;
        }
    }

    Ok(LayoutResult {
        lines,
        font_size_px,
        line_height_px: font_size_px * LINE_HEIGHT_FACTOR,
        longest_line_width_px: longest,
        size_norm,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
