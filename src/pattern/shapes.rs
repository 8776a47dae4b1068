use std::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{RoundedRect, Shape as _};

use crate::foundation::core::{BezPath, Point, Rect};

/// Number of wedges in the burst fan.
pub const BURST_RAYS: usize = 20;
/// Angular width of one burst wedge.
pub const BURST_WEDGE_SPAN: f64 = PI / BURST_RAYS as f64 * 0.5;
/// Rows in the scatter grid.
pub const SCATTER_ROWS: usize = 4;
/// Columns in the scatter grid.
pub const SCATTER_COLS: usize = 5;
/// Shape size as a fraction of the smaller cell side.
pub const SCATTER_SHAPE_FRACTION: f64 = 0.3;
/// Distance between the canvas edge and the bubble body.
pub const BUBBLE_INSET_PX: f64 = 10.0;

/// Wedge fan around `center`, every wedge reaching out to `radius`.
///
/// Wedge `i` starts at angle `rotation + i * 2π / 20` and spans [`BURST_WEDGE_SPAN`].
pub fn burst_path(center: Point, radius: f64, rotation: f64) -> BezPath {
    let mut p = BezPath::new();
    for i in 0..BURST_RAYS {
        let a0 = rotation + i as f64 * TAU / BURST_RAYS as f64;
        let a1 = a0 + BURST_WEDGE_SPAN;
        p.move_to(center);
        p.line_to(center + radius * kurbo::Vec2::new(a0.cos(), a0.sin()));
        p.line_to(center + radius * kurbo::Vec2::new(a1.cos(), a1.sin()));
        p.close_path();
    }
    p
}

/// Heart of width and height `size` centered on `c`, built from four cubic segments.
pub fn heart_path(c: Point, size: f64) -> BezPath {
    let s = size;
    let (x, y) = (c.x, c.y);
    let mut p = BezPath::new();
    p.move_to((x, y - 0.2 * s));
    p.curve_to((x, y - 0.5 * s), (x - 0.5 * s, y - 0.5 * s), (x - 0.5 * s, y - 0.2 * s));
    p.curve_to((x - 0.5 * s, y + 0.1 * s), (x, y + 0.3 * s), (x, y + 0.5 * s));
    p.curve_to((x, y + 0.3 * s), (x + 0.5 * s, y + 0.1 * s), (x + 0.5 * s, y - 0.2 * s));
    p.curve_to((x + 0.5 * s, y - 0.5 * s), (x, y - 0.5 * s), (x, y - 0.2 * s));
    p.close_path();
    p
}

/// Five-point star of diameter `size` centered on `c`, first point straight up.
///
/// Inner vertices sit at half the outer radius.
pub fn star_path(c: Point, size: f64) -> BezPath {
    let outer = size / 2.0;
    let inner = outer / 2.0;
    let mut p = BezPath::new();
    for i in 0..10 {
        let r = if i % 2 == 0 { outer } else { inner };
        let a = -FRAC_PI_2 + i as f64 * PI / 5.0;
        let v = Point::new(c.x + r * a.cos(), c.y + r * a.sin());
        if i == 0 {
            p.move_to(v);
        } else {
            p.line_to(v);
        }
    }
    p.close_path();
    p
}

/// Cell centers of the staggered scatter grid; odd rows shift right by half a cell.
pub fn scatter_centers(width: f64, height: f64) -> Vec<Point> {
    let cell_w = width / SCATTER_COLS as f64;
    let cell_h = height / SCATTER_ROWS as f64;
    let mut out = Vec::with_capacity(SCATTER_ROWS * SCATTER_COLS);
    for row in 0..SCATTER_ROWS {
        let shift = if row % 2 == 1 { cell_w / 2.0 } else { 0.0 };
        for col in 0..SCATTER_COLS {
            out.push(Point::new(
                (col as f64 + 0.5) * cell_w + shift,
                (row as f64 + 0.5) * cell_h,
            ));
        }
    }
    out
}

/// Size of one scatter shape on a `width x height` canvas.
pub fn scatter_shape_size(width: f64, height: f64) -> f64 {
    let cell_w = width / SCATTER_COLS as f64;
    let cell_h = height / SCATTER_ROWS as f64;
    SCATTER_SHAPE_FRACTION * cell_w.min(cell_h)
}

/// Speech-bubble outline: body inset from the edges plus a tail under its bottom edge.
///
/// `size_norm` scales the corner radius and the tail. Returns `None` when the canvas is too
/// small to hold a body.
pub fn bubble_path(width: f64, height: f64, size_norm: f64, rounded: bool) -> Option<BezPath> {
    let tail_h = 12.0 * size_norm;
    let tail_half_w = 10.0 * size_norm;
    let body = Rect::new(
        BUBBLE_INSET_PX,
        BUBBLE_INSET_PX,
        width - BUBBLE_INSET_PX,
        height - BUBBLE_INSET_PX - tail_h,
    );
    if body.width() <= 0.0 || body.height() <= 0.0 {
        return None;
    }

    let mut p = if rounded {
        let radius = (16.0 * size_norm).min(body.width().min(body.height()) / 2.0);
        RoundedRect::from_rect(body, radius).to_path(0.1)
    } else {
        body.to_path(0.1)
    };

    let cx = body.center().x;
    p.move_to((cx - tail_half_w, body.y1));
    p.line_to((cx, body.y1 + tail_h));
    p.line_to((cx + tail_half_w, body.y1));
    Some(p)
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/shapes.rs"]
mod tests;
