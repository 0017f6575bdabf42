use crate::ir::{Arrow, Point, Rect, Shape, Side};

/// Coordinate frame requested from [`collect_obstacles`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    World,
    /// Relative to the given world point, normally the source anchor.
    RelativeTo(Point),
}

/// Docking sides for an arrow from `source` to `dest`, chosen from the
/// offset between the two centres. Ties go to the vertical pair.
pub fn default_sides(source: &Rect, dest: &Rect) -> (Side, Side) {
    let from = source.center();
    let to = dest.center();
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dy.abs() >= dx.abs() {
        if dy >= 0.0 {
            (Side::Bottom, Side::Top)
        } else {
            (Side::Top, Side::Bottom)
        }
    } else if dx >= 0.0 {
        (Side::Right, Side::Left)
    } else {
        (Side::Left, Side::Right)
    }
}

pub fn anchor_point(rect: &Rect, side: Side, t: f32) -> Point {
    match side {
        Side::Top => Point::new(rect.x + rect.width * t, rect.y),
        Side::Bottom => Point::new(rect.x + rect.width * t, rect.bottom()),
        Side::Left => Point::new(rect.x, rect.y + rect.height * t),
        Side::Right => Point::new(rect.right(), rect.y + rect.height * t),
    }
}

/// Anchor pushed outward along the side's normal by `margin`.
pub fn antenna_point(anchor: Point, side: Side, margin: f32) -> Point {
    let (nx, ny) = side.normal();
    anchor.offset(nx * margin, ny * margin)
}

/// Number of arrow ends already docked on `(element_id, side)`.
pub fn side_load(arrows: &[Arrow], element_id: &str, side: Side) -> usize {
    arrows
        .iter()
        .map(|arrow| {
            usize::from(arrow.start.is_on(element_id, side))
                + usize::from(arrow.end.is_on(element_id, side))
        })
        .sum()
}

/// `t` for the `index`-th (zero based) of `count` arrows sharing a side.
pub fn slot_t(index: usize, count: usize) -> f32 {
    (index + 1) as f32 / (count + 1) as f32
}

/// Slot for a new arrow joining `(element_id, side)`: the last position of
/// the distribution for one more arrow than is currently docked there.
pub fn connect_slot(arrows: &[Arrow], element_id: &str, side: Side) -> f32 {
    let count = side_load(arrows, element_id, side);
    slot_t(count, count + 1)
}

/// True bounds of every shape not listed in `exclude_ids`.
pub fn collect_obstacles(shapes: &[Shape], exclude_ids: &[&str], frame: Frame) -> Vec<Rect> {
    shapes
        .iter()
        .filter(|shape| !exclude_ids.contains(&shape.id.as_str()))
        .map(|shape| match frame {
            Frame::World => shape.bounds,
            Frame::RelativeTo(origin) => shape.bounds.translate(-origin.x, -origin.y),
        })
        .collect()
}
