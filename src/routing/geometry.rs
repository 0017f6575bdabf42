use crate::ir::{Axis, Point, Rect};

/// Coordinates closer than this are treated as equal when testing alignment.
pub(crate) const EPSILON: f32 = 1e-4;

pub(crate) fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

pub fn inflate(rect: &Rect, margin: f32) -> Rect {
    rect.inflate(margin)
}

pub fn manhattan(a: Point, b: Point) -> f32 {
    a.manhattan(b)
}

/// Axis of an axis-aligned segment, `None` for a zero-length or diagonal one.
pub(crate) fn segment_axis(a: Point, b: Point) -> Option<Axis> {
    let same_x = approx_eq(a.x, b.x);
    let same_y = approx_eq(a.y, b.y);
    match (same_x, same_y) {
        (true, false) => Some(Axis::Vertical),
        (false, true) => Some(Axis::Horizontal),
        _ => None,
    }
}

/// True when the axis-aligned segment `a`-`b` runs through the interior of
/// `rect`. Segments lying on the boundary, or only touching it with an
/// endpoint, do not cross.
pub fn segment_crosses_rect_interior(a: Point, b: Point, rect: &Rect) -> bool {
    if approx_eq(a.y, b.y) {
        let y = a.y;
        if y <= rect.y || y >= rect.bottom() {
            return false;
        }
        let lo = a.x.min(b.x);
        let hi = a.x.max(b.x);
        lo.max(rect.x) < hi.min(rect.right())
    } else if approx_eq(a.x, b.x) {
        let x = a.x;
        if x <= rect.x || x >= rect.right() {
            return false;
        }
        let lo = a.y.min(b.y);
        let hi = a.y.max(b.y);
        lo.max(rect.y) < hi.min(rect.bottom())
    } else {
        // Not produced by the router; treat via bounding boxes.
        let lo_x = a.x.min(b.x);
        let hi_x = a.x.max(b.x);
        let lo_y = a.y.min(b.y);
        let hi_y = a.y.max(b.y);
        lo_x.max(rect.x) < hi_x.min(rect.right()) && lo_y.max(rect.y) < hi_y.min(rect.bottom())
    }
}

/// Inclusive containment, grown by `tolerance` on every side.
pub fn point_in_rect(rect: &Rect, point: Point, tolerance: f32) -> bool {
    point.x >= rect.x - tolerance
        && point.x <= rect.right() + tolerance
        && point.y >= rect.y - tolerance
        && point.y <= rect.bottom() + tolerance
}

pub fn path_length(points: &[Point]) -> f32 {
    points.windows(2).map(|seg| manhattan(seg[0], seg[1])).sum()
}

pub fn path_bend_count(points: &[Point]) -> usize {
    points
        .windows(3)
        .filter(|w| {
            let first = segment_axis(w[0], w[1]);
            let second = segment_axis(w[1], w[2]);
            first.is_some() && second.is_some() && first != second
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn horizontal_segment_through_rect_crosses() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(segment_crosses_rect_interior(p(0.0, 15.0), p(40.0, 15.0), &rect));
        assert!(segment_crosses_rect_interior(p(15.0, 15.0), p(40.0, 15.0), &rect));
    }

    #[test]
    fn boundary_and_endpoint_touching_do_not_cross() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        // Along the top edge.
        assert!(!segment_crosses_rect_interior(p(0.0, 10.0), p(40.0, 10.0), &rect));
        // Ends exactly on the left edge.
        assert!(!segment_crosses_rect_interior(p(0.0, 15.0), p(10.0, 15.0), &rect));
        // Vertical along the right edge.
        assert!(!segment_crosses_rect_interior(p(30.0, 0.0), p(30.0, 40.0), &rect));
    }

    #[test]
    fn vertical_segment_beside_rect_does_not_cross() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(!segment_crosses_rect_interior(p(5.0, 0.0), p(5.0, 40.0), &rect));
        assert!(segment_crosses_rect_interior(p(20.0, 0.0), p(20.0, 40.0), &rect));
        assert!(!segment_crosses_rect_interior(p(20.0, 0.0), p(20.0, 5.0), &rect));
    }

    #[test]
    fn point_in_rect_is_inclusive_with_tolerance() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(point_in_rect(&rect, p(10.0, 10.0), 0.0));
        assert!(point_in_rect(&rect, p(10.4, 5.0), 0.5));
        assert!(!point_in_rect(&rect, p(10.6, 5.0), 0.5));
    }

    #[test]
    fn counts_bends_and_length() {
        let path = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(20.0, 10.0)];
        assert_eq!(path_bend_count(&path), 2);
        assert!(approx_eq(path_length(&path), 30.0));
    }
}
