use crate::ir::Point;

use super::geometry::approx_eq;

fn collinear(a: Point, b: Point, c: Point) -> bool {
    (approx_eq(a.x, b.x) && approx_eq(b.x, c.x)) || (approx_eq(a.y, b.y) && approx_eq(b.y, c.y))
}

fn near(a: Point, b: Point, tolerance: f32) -> bool {
    (a.x - b.x).hypot(a.y - b.y) < tolerance
}

fn aligned(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) || approx_eq(a.y, b.y)
}

/// Moves `point` onto a horizontal or vertical line through `target` while
/// keeping its axis-aligned link to `anchor`. The move must stay under `tolerance`.
fn realign(point: Point, target: Point, anchor: Point, tolerance: f32) -> Option<Point> {
    if approx_eq(point.x, anchor.x) && (point.y - target.y).abs() < tolerance {
        return Some(Point::new(point.x, target.y));
    }
    if approx_eq(point.y, anchor.y) && (point.x - target.x).abs() < tolerance {
        return Some(Point::new(target.x, point.y));
    }
    None
}

/// Removes interior point `idx`. When its neighbours would be joined by a
/// diagonal, one of them is shifted onto a shared line first; the endpoints
/// never move. Returns false when the point has to stay.
fn drop_point(points: &mut Vec<Point>, idx: usize, tolerance: f32) -> bool {
    let prev = points[idx - 1];
    let next = points[idx + 1];
    if !aligned(prev, next) {
        if idx + 2 < points.len()
            && let Some(moved) = realign(next, prev, points[idx + 2], tolerance)
        {
            points[idx + 1] = moved;
        } else if idx >= 2
            && let Some(moved) = realign(prev, next, points[idx - 2], tolerance)
        {
            points[idx - 1] = moved;
        } else {
            return false;
        }
    }
    points.remove(idx);
    true
}

/// Drops interior points lying on the line through their neighbours.
pub fn remove_collinear(points: &[Point]) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    out.push(points[0]);
    for idx in 1..points.len() - 1 {
        let prev = out[out.len() - 1];
        if collinear(prev, points[idx], points[idx + 1]) {
            continue;
        }
        out.push(points[idx]);
    }
    out.push(points[points.len() - 1]);
    out
}

/// Collapses runs of points closer than `tolerance`. The first and last
/// points are kept exactly and a path never shrinks below two points.
/// Segments stay axis-aligned, so a jog shorter than `tolerance` survives
/// when the endpoints themselves are offset by less than that.
pub fn merge_close_points(points: &[Point], tolerance: f32) -> Vec<Point> {
    let mut out = points.to_vec();
    let mut idx = 1;
    while idx + 1 < out.len() {
        if near(out[idx - 1], out[idx], tolerance) && drop_point(&mut out, idx, tolerance) {
            continue;
        }
        idx += 1;
    }
    // The last point is fixed, so its close predecessor goes instead.
    while out.len() > 2 {
        let idx = out.len() - 2;
        if !(near(out[idx], out[idx + 1], tolerance) && drop_point(&mut out, idx, tolerance)) {
            break;
        }
    }
    out
}

pub fn simplify(points: &[Point], tolerance: f32) -> Vec<Point> {
    let pass = remove_collinear(points);
    let pass = merge_close_points(&pass, tolerance);
    remove_collinear(&pass)
}

/// Wraps a searched antenna-to-antenna path with the true endpoints and simplifies it.
pub(crate) fn compose(origin: Point, searched: &[Point], dest: Point, tolerance: f32) -> Vec<Point> {
    let mut points = Vec::with_capacity(searched.len() + 2);
    points.push(origin);
    points.extend_from_slice(searched);
    points.push(dest);
    simplify(&points, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn removes_points_on_straight_runs() {
        let path = [p(0.0, 0.0), p(10.0, 0.0), p(20.0, 0.0), p(20.0, 10.0), p(20.0, 30.0)];
        assert_eq!(remove_collinear(&path), vec![p(0.0, 0.0), p(20.0, 0.0), p(20.0, 30.0)]);
    }

    #[test]
    fn merges_near_duplicates_but_keeps_endpoints() {
        let path = [p(0.0, 0.0), p(0.2, 0.0), p(0.2, 40.0), p(60.0, 40.0), p(60.3, 40.0)];
        let merged = merge_close_points(&path, 0.5);
        assert_eq!(merged, vec![p(0.0, 0.0), p(0.0, 40.0), p(60.3, 40.0)]);
    }

    #[test]
    fn collapsed_jog_realigns_the_next_bend() {
        let path = [p(0.0, 0.0), p(100.0, 0.0), p(100.0, 0.3), p(200.0, 0.3), p(200.0, 80.0)];
        assert_eq!(
            simplify(&path, 0.5),
            vec![p(0.0, 0.0), p(200.0, 0.0), p(200.0, 80.0)]
        );
    }

    #[test]
    fn collapsed_jog_before_the_end_realigns_the_previous_bend() {
        let path = [p(0.0, 0.0), p(0.0, 50.0), p(150.0, 50.0), p(150.0, 90.0), p(150.3, 90.0)];
        assert_eq!(
            simplify(&path, 0.5),
            vec![p(0.0, 0.0), p(0.0, 50.0), p(150.3, 50.0), p(150.3, 90.0)]
        );
    }

    #[test]
    fn offset_endpoints_keep_a_short_jog() {
        let path = [p(0.0, 0.0), p(200.0, 0.0), p(200.0, 0.3), p(400.0, 0.3)];
        let merged = simplify(&path, 0.5);
        assert_eq!(merged, path.to_vec());
        for seg in merged.windows(2) {
            assert!(aligned(seg[0], seg[1]), "diagonal {seg:?}");
        }
    }

    #[test]
    fn closeness_is_euclidean() {
        assert!(near(p(0.0, 0.0), p(0.3, 0.3), 0.5));
        assert!(!near(p(0.0, 0.0), p(0.4, 0.4), 0.5));
    }

    #[test]
    fn zero_length_path_keeps_two_points() {
        let path = [p(0.0, 0.0), p(0.0, 0.0), p(0.0, 0.0), p(0.0, 0.0)];
        assert_eq!(simplify(&path, 0.5), vec![p(0.0, 0.0), p(0.0, 0.0)]);
    }

    #[test]
    fn compose_wraps_antennas_with_true_endpoints() {
        let searched = [p(30.0, 0.0), p(100.0, 0.0), p(100.0, 80.0), p(370.0, 80.0)];
        let route = compose(p(0.0, 0.0), &searched, p(400.0, 80.0), 0.5);
        assert_eq!(
            route,
            vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 80.0), p(400.0, 80.0)]
        );
    }
}
