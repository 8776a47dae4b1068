use crate::animation::transform::burst_rotation;
use crate::foundation::core::{Canvas, Rgba8};
use crate::pattern::shapes::{
    bubble_path, burst_path, heart_path, scatter_centers, scatter_shape_size, star_path,
};
use crate::render::surface::Surface;
use crate::style::model::{AnimationKind, PatternKind};

/// Paint for motifs: white, strong over transparency and faint over an opaque background.
pub fn pattern_color(transparent_background: bool) -> Rgba8 {
    Rgba8::WHITE.with_opacity(if transparent_background { 0.8 } else { 0.15 })
}

/// Draw `pattern` over the whole `width x height` canvas at loop time `t`.
///
/// Draws in the surface's current user space; callers keep the transform at identity.
pub fn draw_pattern<S: Surface + ?Sized>(
    surface: &mut S,
    pattern: PatternKind,
    width: u32,
    height: u32,
    t: f64,
    animation: AnimationKind,
    transparent_background: bool,
) {
    let canvas = Canvas::new(width, height);
    let (w, h) = (f64::from(width), f64::from(height));
    let color = pattern_color(transparent_background);

    match pattern {
        PatternKind::None => {}
        PatternKind::Burst => {
            let path = burst_path(canvas.center(), w.max(h), burst_rotation(animation, t));
            surface.fill_path(&path, color);
        }
        PatternKind::Bubble => {
            let rounded = surface.supports_rounded_rect();
            let norm = canvas.size_norm();
            if let Some(path) = bubble_path(w, h, norm, rounded) {
                surface.stroke_path(&path, color, 3.0 * norm);
            }
        }
        PatternKind::Heart | PatternKind::Star => {
            let size = scatter_shape_size(w, h);
            for c in scatter_centers(w, h) {
                let path = if pattern == PatternKind::Heart {
                    heart_path(c, size)
                } else {
                    star_path(c, size)
                };
                surface.fill_path(&path, color);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/draw.rs"]
mod tests;
