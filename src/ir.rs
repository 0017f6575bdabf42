use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Point) -> f32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Axis-aligned rectangle. `x`/`y` is the top-left corner. Negative sizes
/// are clamped to zero, also when read from a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RectFile")]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Deserialize)]
struct RectFile {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl From<RectFile> for Rect {
    fn from(raw: RectFile) -> Self {
        Rect::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn inflate(&self, margin: f32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + margin * 2.0,
            height: self.height + margin * 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// Axis of the lead-out segment leaving this side.
    pub fn axis(self) -> Axis {
        match self {
            Side::Left | Side::Right => Axis::Horizontal,
            Side::Top | Side::Bottom => Axis::Vertical,
        }
    }

    pub fn normal(self) -> (f32, f32) {
        match self {
            Side::Top => (0.0, -1.0),
            Side::Bottom => (0.0, 1.0),
            Side::Left => (-1.0, 0.0),
            Side::Right => (1.0, 0.0),
        }
    }

}

/// Where one end of an arrow is docked: a shape, one of its sides and the
/// fractional position `t` along that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub element_id: String,
    pub side: Side,
    pub t: f32,
}

impl Connection {
    pub fn new(element_id: impl Into<String>, side: Side, t: f32) -> Self {
        Self {
            element_id: element_id.into(),
            side,
            t: t.clamp(0.0, 1.0),
        }
    }

    pub fn is_on(&self, element_id: &str, side: Side) -> bool {
        self.side == side && self.element_id == element_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Diamond,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: String,
    #[serde(default)]
    pub kind: ShapeKind,
    pub bounds: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub id: String,
    pub start: Connection,
    pub end: Connection,
    /// World position of the source anchor; `points` are relative to it.
    #[serde(default)]
    pub origin: Point,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl Arrow {
    pub fn world_points(&self) -> Vec<Point> {
        self.points
            .iter()
            .map(|p| p.offset(self.origin.x, self.origin.y))
            .collect()
    }

    pub fn touches(&self, element_id: &str) -> bool {
        self.start.element_id == element_id || self.end.element_id == element_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub arrows: Vec<Arrow>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    /// Union of all shape bounds and arrow points, if the scene is not empty.
    pub fn bounds(&self) -> Option<Rect> {
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for shape in &self.shapes {
            min_x = min_x.min(shape.bounds.x);
            min_y = min_y.min(shape.bounds.y);
            max_x = max_x.max(shape.bounds.right());
            max_y = max_y.max(shape.bounds.bottom());
        }
        for arrow in &self.arrows {
            for p in arrow.world_points() {
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
        }
        if min_x == f32::MAX {
            return None;
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inflate_grows_every_side() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0).inflate(5.0);
        assert_eq!(rect, Rect::new(5.0, 15.0, 110.0, 60.0));
    }

    #[test]
    fn side_axes_follow_lead_out() {
        assert_eq!(Side::Left.axis(), Axis::Horizontal);
        assert_eq!(Side::Top.axis(), Axis::Vertical);
        assert_eq!(Side::Right.normal(), (1.0, 0.0));
    }

    #[test]
    fn scene_deserializes_camel_case_connections() {
        let raw = r#"{
            "shapes": [{"id": "a", "bounds": {"x": 0, "y": 0, "width": 10, "height": 10}}],
            "arrows": [{
                "id": "e1",
                "start": {"elementId": "a", "side": "right", "t": 0.5},
                "end": {"elementId": "a", "side": "top", "t": 0.25}
            }]
        }"#;
        let scene: Scene = serde_json::from_str(raw).unwrap();
        assert_eq!(scene.shapes[0].kind, ShapeKind::Rectangle);
        assert!(scene.arrows[0].start.is_on("a", Side::Right));
        assert!(scene.arrows[0].points.is_empty());
    }

    #[test]
    fn negative_sizes_in_scene_files_are_clamped() {
        let raw = r#"{"shapes": [{"id": "a", "bounds": {"x": 5, "y": 6, "width": -40, "height": -1}}]}"#;
        let scene: Scene = serde_json::from_str(raw).unwrap();
        assert_eq!(scene.shapes[0].bounds, Rect::new(5.0, 6.0, 0.0, 0.0));
        assert_eq!(scene.shapes[0].bounds.width, 0.0);
    }

    #[test]
    fn world_points_shift_by_origin() {
        let arrow = Arrow {
            id: "e".to_string(),
            start: Connection::new("a", Side::Right, 0.5),
            end: Connection::new("b", Side::Left, 0.5),
            origin: Point::new(100.0, 50.0),
            points: vec![Point::ORIGIN, Point::new(20.0, 0.0)],
        };
        assert_eq!(arrow.world_points()[1], Point::new(120.0, 50.0));
    }
}
