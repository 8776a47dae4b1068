use std::f64::consts::{PI, TAU};

use crate::foundation::core::{Affine, Rgba8, Vec2};
use crate::style::model::AnimationKind;

/// Per-frame motion of the text block, relative to the canvas center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Translation in pixels.
    pub translate: Vec2,
    /// Scale factors.
    pub scale: Vec2,
    /// Clockwise rotation in radians.
    pub rotation_rad: f64,
    /// Opacity multiplier, when the kind animates opacity.
    pub alpha: Option<f32>,
    /// Fill color that replaces the configured text color.
    pub fill: Option<Rgba8>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation_rad: 0.0,
            alpha: None,
            fill: None,
        }
    }
}

impl Transform {
    /// Compose as `translate * rotate * scale`.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translate)
            * Affine::rotate(self.rotation_rad)
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Fill color for this frame: the override if present, else `base`.
    pub fn fill_or(&self, base: Rgba8) -> Rgba8 {
        self.fill.unwrap_or(base)
    }
}

/// Frame-level measurements some kinds depend on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionContext {
    /// Size-normalization factor (`min(w, h) / 128`).
    pub size_norm: f64,
    /// Surface width in pixels.
    pub surface_width: f64,
    /// Width of the longest laid-out line in pixels.
    pub longest_line_width: f64,
}

/// Wrap `t` into `[0, 1)`.
pub fn wrap_time(t: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    let w = t.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if w >= 1.0 { 0.0 } else { w }
}

/// Map an animation kind and normalized time to the frame's transform.
pub fn compute_transform(kind: AnimationKind, t: f64, motion: MotionContext) -> Transform {
    let t = wrap_time(t);
    let identity = Transform::default();

    match kind {
        AnimationKind::Pulse => {
            let s = 1.0 + 0.2 * (TAU * t).sin();
            Transform {
                scale: Vec2::new(s, s),
                ..identity
            }
        }
        AnimationKind::Spin => Transform {
            rotation_rad: TAU * t,
            ..identity
        },
        AnimationKind::Shake => Transform {
            translate: Vec2::new(5.0 * (4.0 * TAU * t).sin(), 3.0 * (3.0 * TAU * t).cos())
                * motion.size_norm,
            ..identity
        },
        AnimationKind::Rainbow => Transform {
            fill: Some(Rgba8::from_hsl(360.0 * t, 1.0, 0.5)),
            ..identity
        },
        AnimationKind::Slide => {
            let full_range = motion.surface_width + motion.longest_line_width;
            Transform {
                translate: Vec2::new(full_range / 2.0 - t * full_range, 0.0),
                ..identity
            }
        }
        AnimationKind::Bounce => Transform {
            translate: Vec2::new(0.0, 10.0 * (TAU * t).sin() * motion.size_norm),
            ..identity
        },
        AnimationKind::Grow => {
            let s = if t < 0.5 { 2.0 * t } else { 2.0 * (1.0 - t) };
            Transform {
                scale: Vec2::new(s, s),
                ..identity
            }
        }
        AnimationKind::Blink => Transform {
            alpha: Some(if t < 0.5 { 1.0 } else { 0.2 }),
            ..identity
        },
    }
}

/// Extra rotation of the burst pattern's ray fan at time `t`.
///
/// Only Spin and Rainbow drive the background; other kinds leave it still.
pub fn burst_rotation(kind: AnimationKind, t: f64) -> f64 {
    match kind {
        AnimationKind::Spin | AnimationKind::Rainbow => wrap_time(t) * PI,
        AnimationKind::Pulse
        | AnimationKind::Shake
        | AnimationKind::Slide
        | AnimationKind::Bounce
        | AnimationKind::Grow
        | AnimationKind::Blink => 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transform.rs"]
mod tests;
