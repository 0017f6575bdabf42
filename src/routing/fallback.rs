use crate::ir::{Axis, Point, Side};

/// Direct orthogonal route from the origin to `(dx, dy)` without looking at
/// obstacles: one bend when the docking sides lie on different axes, two
/// bends through the shared midline when they lie on the same axis.
pub fn fallback_route(dx: f32, dy: f32, source_side: Side, dest_side: Side) -> Vec<Point> {
    let start = Point::ORIGIN;
    let end = Point::new(dx, dy);
    match (source_side.axis(), dest_side.axis()) {
        (Axis::Horizontal, Axis::Vertical) => vec![start, Point::new(dx, 0.0), end],
        (Axis::Vertical, Axis::Horizontal) => vec![start, Point::new(0.0, dy), end],
        (Axis::Horizontal, Axis::Horizontal) => {
            let mid_x = dx / 2.0;
            vec![start, Point::new(mid_x, 0.0), Point::new(mid_x, dy), end]
        }
        (Axis::Vertical, Axis::Vertical) => {
            let mid_y = dy / 2.0;
            vec![start, Point::new(0.0, mid_y), Point::new(dx, mid_y), end]
        }
    }
}
