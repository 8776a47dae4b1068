use crate::animation::transform::{MotionContext, compute_transform};
use crate::foundation::core::{Point, Rect, Rgba8, Vec2};
use crate::foundation::error::KinetypeResult;
use crate::layout::text::layout;
use crate::pattern::draw::draw_pattern;
use crate::render::surface::{Checkpoint, Surface};
use crate::style::model::StyleConfig;

/// Outline color drawn behind the text fill.
pub const OUTLINE_COLOR: Rgba8 = Rgba8::BLACK;

/// Composite one frame of `style` at loop time `t` onto `surface`.
///
/// `width` and `height` describe the canvas being drawn; normally the surface size. The
/// surface is cleared first and its state stack is left as it was found.
#[tracing::instrument(level = "trace", skip(surface, style))]
pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    style: &StyleConfig,
    width: u32,
    height: u32,
    t: f64,
) -> KinetypeResult<()> {
    surface.clear();

    if !style.transparent_background {
        surface.fill_rect(
            Rect::new(0.0, 0.0, f64::from(width), f64::from(height)),
            style.background_color,
        );
    }

    draw_pattern(
        surface,
        style.pattern,
        width,
        height,
        t,
        style.animation,
        style.transparent_background,
    );

    let laid = layout(
        surface,
        &style.text,
        width,
        height,
        style.font_size_offset,
        style.animation,
    )?;
    let transform = compute_transform(
        style.animation,
        t,
        MotionContext {
            size_norm: laid.size_norm,
            surface_width: f64::from(width),
            longest_line_width: f64::from(laid.longest_line_width_px),
        },
    );

    let fill = transform.fill_or(style.text_color);
    let outline = !(style.transparent_background && style.text_color.is_black());
    let outline_width = 2.0 * laid.size_norm;

    let mut s = Checkpoint::new(surface);
    s.translate(Vec2::new(f64::from(width) / 2.0, f64::from(height) / 2.0));
    s.concat_transform(transform.to_affine());
    if let Some(alpha) = transform.alpha {
        s.set_global_alpha(alpha);
    }

    let line_h = f64::from(laid.line_height_px);
    let start_y = -(laid.lines.len() as f64 * line_h) / 2.0 + line_h / 2.0;
    for (i, line) in laid.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let center = Point::new(0.0, start_y + i as f64 * line_h);
        if outline {
            s.stroke_text(line, center, laid.font_size_px, OUTLINE_COLOR, outline_width)?;
        }
        s.fill_text(line, center, laid.font_size_px, fill)?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
