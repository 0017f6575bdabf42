use std::collections::{BTreeMap, HashMap};

use crate::ir::{Axis, Point, Rect, Side};

use super::geometry::{point_in_rect, segment_crosses_rect_interior};

/// Rounded integer coordinates used to merge near-equal floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct PointKey(i64, i64);

impl PointKey {
    pub(crate) fn new(point: Point, precision: f32) -> Self {
        Self(coord_key(point.x, precision), coord_key(point.y, precision))
    }
}

fn coord_key(value: f32, precision: f32) -> i64 {
    (value as f64 * precision as f64).round() as i64
}

/// Geometry of one routing call, in the frame where the source anchor is the origin.
#[derive(Debug, Clone)]
pub(crate) struct GraphInput<'a> {
    pub(crate) origin: Point,
    pub(crate) dest: Point,
    pub(crate) source_antenna: Point,
    pub(crate) source_side: Side,
    pub(crate) dest_antenna: Point,
    pub(crate) dest_side: Side,
    pub(crate) source_rect: Option<Rect>,
    pub(crate) dest_rect: Option<Rect>,
    /// True bounds of every other shape.
    pub(crate) obstacles: &'a [Rect],
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct GraphOptions {
    pub(crate) margin: f32,
    pub(crate) precision: f32,
    pub(crate) embed_tolerance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GraphEdge {
    pub(crate) to: usize,
    pub(crate) weight: f32,
    pub(crate) axis: Axis,
}

/// Sparse orthogonal visibility graph. Nodes live in an arena and edges
/// refer to them by index.
#[derive(Debug, Clone, Default)]
pub(crate) struct VisibilityGraph {
    pub(crate) nodes: Vec<Point>,
    pub(crate) adjacency: Vec<Vec<GraphEdge>>,
    index: HashMap<PointKey, usize>,
    precision: f32,
}

impl VisibilityGraph {
    fn with_precision(precision: f32) -> Self {
        Self {
            precision,
            ..Default::default()
        }
    }

    /// Inserts `point` unless a node with the same rounded key exists.
    fn insert(&mut self, point: Point) -> usize {
        let key = PointKey::new(point, self.precision);
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(point);
        self.adjacency.push(Vec::new());
        self.index.insert(key, idx);
        idx
    }

    fn link(&mut self, a: usize, b: usize, axis: Axis) {
        let pa = self.nodes[a];
        let pb = self.nodes[b];
        let weight = match axis {
            Axis::Horizontal => (pb.x - pa.x).abs(),
            Axis::Vertical => (pb.y - pa.y).abs(),
        };
        self.adjacency[a].push(GraphEdge { to: b, weight, axis });
        self.adjacency[b].push(GraphEdge { to: a, weight, axis });
    }

    pub(crate) fn node_at(&self, point: Point) -> Option<usize> {
        self.index.get(&PointKey::new(point, self.precision)).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}

/// Sorted coordinates with near-duplicates (same rounded key) removed.
fn sorted_unique(mut values: Vec<f32>, precision: f32) -> Vec<f32> {
    values.retain(|v| v.is_finite());
    values.sort_by(f32::total_cmp);
    values.dedup_by(|a, b| coord_key(*a, precision) == coord_key(*b, precision));
    values
}

fn midpoints(cells: &[f32]) -> Vec<f32> {
    cells.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Rulers {
    pub(crate) vertical: Vec<f32>,
    pub(crate) horizontal: Vec<f32>,
}

/// Candidate waypoint coordinates: every edge of the inflated rectangles plus
/// the lead-out line of each antenna.
pub(crate) fn collect_rulers(input: &GraphInput<'_>, inflated: &[Rect], precision: f32) -> Rulers {
    let mut vertical = Vec::with_capacity(inflated.len() * 2 + 2);
    let mut horizontal = Vec::with_capacity(inflated.len() * 2 + 2);
    for rect in inflated {
        vertical.push(rect.x);
        vertical.push(rect.right());
        horizontal.push(rect.y);
        horizontal.push(rect.bottom());
    }
    for (antenna, side) in [
        (input.source_antenna, input.source_side),
        (input.dest_antenna, input.dest_side),
    ] {
        match side.axis() {
            Axis::Vertical => vertical.push(antenna.x),
            Axis::Horizontal => horizontal.push(antenna.y),
        }
    }
    Rulers {
        vertical: sorted_unique(vertical, precision),
        horizontal: sorted_unique(horizontal, precision),
    }
}

fn search_bounds(input: &GraphInput<'_>, rulers: &Rulers, margin: f32) -> Rect {
    let fixed = [input.origin, input.dest, input.source_antenna, input.dest_antenna];
    let mut min_x = fixed.iter().map(|p| p.x).fold(f32::MAX, f32::min);
    let mut max_x = fixed.iter().map(|p| p.x).fold(f32::MIN, f32::max);
    let mut min_y = fixed.iter().map(|p| p.y).fold(f32::MAX, f32::min);
    let mut max_y = fixed.iter().map(|p| p.y).fold(f32::MIN, f32::max);
    for &x in &rulers.vertical {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    for &y in &rulers.horizontal {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y).inflate(margin)
}

fn candidate_points(rulers: &Rulers, bounds: &Rect, precision: f32) -> Vec<Point> {
    let mut cell_xs = rulers.vertical.clone();
    cell_xs.extend([bounds.x, bounds.right()]);
    let cell_xs = sorted_unique(cell_xs, precision);
    let mut cell_ys = rulers.horizontal.clone();
    cell_ys.extend([bounds.y, bounds.bottom()]);
    let cell_ys = sorted_unique(cell_ys, precision);
    let mid_xs = midpoints(&cell_xs);
    let mid_ys = midpoints(&cell_ys);

    let mut points = Vec::with_capacity(
        (rulers.vertical.len() + mid_xs.len()) * (rulers.horizontal.len() + mid_ys.len()),
    );
    for &x in &rulers.vertical {
        for &y in &rulers.horizontal {
            points.push(Point::new(x, y));
        }
        for &y in &mid_ys {
            points.push(Point::new(x, y));
        }
    }
    for &x in &mid_xs {
        for &y in &rulers.horizontal {
            points.push(Point::new(x, y));
        }
        for &y in &mid_ys {
            points.push(Point::new(x, y));
        }
    }
    points
}

/// Builds the visibility graph for one routing call.
pub(crate) fn build_graph(input: &GraphInput<'_>, options: GraphOptions) -> VisibilityGraph {
    let precision = options.precision;
    let inflated_others: Vec<Rect> = input
        .obstacles
        .iter()
        .map(|rect| rect.inflate(options.margin))
        .collect();
    let mut inflated_all = inflated_others.clone();
    inflated_all.extend(input.source_rect.map(|r| r.inflate(options.margin)));
    inflated_all.extend(input.dest_rect.map(|r| r.inflate(options.margin)));

    let rulers = collect_rulers(input, &inflated_all, precision);
    let bounds = search_bounds(input, &rulers, options.margin);
    let candidates = candidate_points(&rulers, &bounds, precision);

    let antenna_keys = [
        PointKey::new(input.source_antenna, precision),
        PointKey::new(input.dest_antenna, precision),
    ];
    let embedded_in: Vec<Rect> = input.source_rect.iter().chain(input.dest_rect.iter()).copied().collect();

    let mut graph = VisibilityGraph::with_precision(precision);
    // Antennas first so their exact coordinates win deduplication.
    graph.insert(input.source_antenna);
    graph.insert(input.dest_antenna);
    for point in candidates {
        if antenna_keys.contains(&PointKey::new(point, precision)) {
            continue;
        }
        if embedded_in
            .iter()
            .any(|rect| point_in_rect(rect, point, options.embed_tolerance))
        {
            continue;
        }
        graph.insert(point);
    }

    // Source/destination block with their true bounds, everything else inflated.
    let mut blockers = inflated_others;
    blockers.extend(embedded_in);

    let mut columns: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    let mut rows: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (idx, point) in graph.nodes.iter().enumerate() {
        columns.entry(coord_key(point.x, precision)).or_default().push(idx);
        rows.entry(coord_key(point.y, precision)).or_default().push(idx);
    }

    for (lines, axis) in [(columns, Axis::Vertical), (rows, Axis::Horizontal)] {
        for (_, mut members) in lines {
            members.sort_by(|&a, &b| {
                let (pa, pb) = (graph.nodes[a], graph.nodes[b]);
                match axis {
                    Axis::Vertical => pa.y.total_cmp(&pb.y),
                    Axis::Horizontal => pa.x.total_cmp(&pb.x),
                }
            });
            for pair in members.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let (pa, pb) = (graph.nodes[a], graph.nodes[b]);
                let blocked = blockers
                    .iter()
                    .any(|rect| segment_crosses_rect_interior(pa, pb, rect));
                if !blocked {
                    graph.link(a, b, axis);
                }
            }
        }
    }

    log::trace!(
        "visibility graph: {} rulers x {} rulers, {} nodes, {} edges",
        rulers.vertical.len(),
        rulers.horizontal.len(),
        graph.len(),
        graph.edge_count()
    );
    graph
}
