use super::*;
use kurbo::{PathEl, Shape};

fn count(p: &BezPath, pred: impl Fn(&PathEl) -> bool) -> usize {
    p.elements().iter().filter(|el| pred(el)).count()
}

#[test]
fn burst_has_twenty_closed_wedges() {
    let p = burst_path(Point::new(100.0, 100.0), 200.0, 0.0);
    assert_eq!(count(&p, |e| matches!(e, PathEl::MoveTo(_))), BURST_RAYS);
    assert_eq!(count(&p, |e| matches!(e, PathEl::ClosePath)), BURST_RAYS);
}

#[test]
fn burst_first_wedge_follows_rotation() {
    let c = Point::new(0.0, 0.0);
    let rot = std::f64::consts::FRAC_PI_2;
    let p = burst_path(c, 10.0, rot);
    let PathEl::LineTo(first) = p.elements()[1] else {
        panic!("expected line");
    };
    assert!((first.x - 0.0).abs() < 1e-9);
    assert!((first.y - 10.0).abs() < 1e-9);
}

#[test]
fn heart_uses_four_cubics_within_its_box() {
    let p = heart_path(Point::new(50.0, 50.0), 20.0);
    assert_eq!(count(&p, |e| matches!(e, PathEl::CurveTo(..))), 4);
    let bb = p.bounding_box();
    assert!(bb.x0 >= 40.0 - 1e-9 && bb.x1 <= 60.0 + 1e-9);
    assert!(bb.y1 <= 60.0 + 1e-9);
}

#[test]
fn star_alternates_outer_and_inner_radius() {
    let c = Point::new(0.0, 0.0);
    let p = star_path(c, 20.0);
    let pts: Vec<Point> = p
        .elements()
        .iter()
        .filter_map(|e| match e {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(pts.len(), 10);
    for (i, v) in pts.iter().enumerate() {
        let r = v.distance(c);
        let want = if i % 2 == 0 { 10.0 } else { 5.0 };
        assert!((r - want).abs() < 1e-9, "vertex {i}: {r}");
    }
    assert!((pts[0].y + 10.0).abs() < 1e-9);
}

#[test]
fn scatter_grid_is_staggered() {
    let c = scatter_centers(100.0, 80.0);
    assert_eq!(c.len(), SCATTER_ROWS * SCATTER_COLS);
    assert_eq!(c[0], Point::new(10.0, 10.0));
    assert_eq!(c[SCATTER_COLS], Point::new(20.0, 30.0));
    assert!((scatter_shape_size(100.0, 80.0) - 6.0).abs() < 1e-9);
}

#[test]
fn bubble_sits_inside_the_inset() {
    let p = bubble_path(128.0, 128.0, 1.0, true).unwrap();
    let bb = p.bounding_box();
    assert!((bb.x0 - BUBBLE_INSET_PX).abs() < 1e-6);
    assert!((bb.y0 - BUBBLE_INSET_PX).abs() < 1e-6);
    assert!((bb.x1 - (128.0 - BUBBLE_INSET_PX)).abs() < 1e-6);
    assert!((bb.y1 - (128.0 - BUBBLE_INSET_PX)).abs() < 1e-6);
}

#[test]
fn bubble_fallback_is_a_plain_rectangle() {
    let rounded = bubble_path(128.0, 128.0, 1.0, true).unwrap();
    let plain = bubble_path(128.0, 128.0, 1.0, false).unwrap();
    assert!(count(&rounded, |e| matches!(e, PathEl::CurveTo(..))) > 0);
    assert_eq!(count(&plain, |e| matches!(e, PathEl::CurveTo(..))), 0);
}

#[test]
fn bubble_skipped_on_tiny_canvas() {
    assert!(bubble_path(16.0, 16.0, 0.125, true).is_none());
}
