//! Obstacle-aware orthogonal arrow routing.
//!
//! Every call works in a local frame whose origin is the source anchor:
//! the docking sides produce two antenna points, the obstacles produce a
//! sparse visibility graph between them, a bend-penalised Dijkstra search
//! walks that graph and the result is wrapped with the true endpoints and
//! simplified. When any stage cannot produce a usable path the direct L/Z
//! route from [`fallback_route`] is returned instead, so routing never fails.

pub mod anchor;
mod compose;
pub mod fallback;
pub mod geometry;
mod graph;
mod queue;
mod search;

use serde::{Deserialize, Serialize};

use crate::config::RouterConfig;
use crate::ir::{Point, Rect, Side};

pub use anchor::{
    Frame, anchor_point, antenna_point, collect_obstacles, connect_slot, default_sides, side_load,
    slot_t,
};
pub use compose::{merge_close_points, remove_collinear, simplify};
pub use fallback::fallback_route;
pub use geometry::{
    inflate, manhattan, path_bend_count, path_length, point_in_rect, segment_crosses_rect_interior,
};

use graph::{GraphInput, GraphOptions, build_graph};
use search::shortest_path;

/// Input of a single routing call. Rectangles are in the arrow-local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub dx: f32,
    pub dy: f32,
    pub source_side: Side,
    pub dest_side: Side,
    #[serde(default)]
    pub source_rect: Option<Rect>,
    #[serde(default)]
    pub dest_rect: Option<Rect>,
    #[serde(default)]
    pub obstacles: Vec<Rect>,
}

impl RouteRequest {
    /// Builds a request between two docked shapes given in world coordinates.
    /// Returns the world-space source anchor together with the request.
    pub fn between(
        source: &Rect,
        source_side: Side,
        source_t: f32,
        dest: &Rect,
        dest_side: Side,
        dest_t: f32,
        obstacles: &[Rect],
    ) -> (Point, Self) {
        let origin = anchor_point(source, source_side, source_t);
        let target = anchor_point(dest, dest_side, dest_t);
        let local = |rect: &Rect| rect.translate(-origin.x, -origin.y);
        let request = Self {
            dx: target.x - origin.x,
            dy: target.y - origin.y,
            source_side,
            dest_side,
            source_rect: Some(local(source)),
            dest_rect: Some(local(dest)),
            obstacles: obstacles.iter().map(local).collect(),
        };
        (origin, request)
    }

    pub fn dest(&self) -> Point {
        Point::new(self.dx, self.dy)
    }

    fn is_degenerate(&self) -> bool {
        let finite_rect = |rect: &Rect| {
            rect.x.is_finite() && rect.y.is_finite() && rect.width.is_finite() && rect.height.is_finite()
        };
        !self.dx.is_finite()
            || !self.dy.is_finite()
            || (self.dx == 0.0 && self.dy == 0.0)
            || self.source_rect.iter().any(|r| !finite_rect(r))
            || self.dest_rect.iter().any(|r| !finite_rect(r))
            || self.obstacles.iter().any(|r| !finite_rect(r))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackReason {
    /// No obstacles were supplied, so the direct route is already right.
    NoObstacles,
    /// Zero-length or non-finite input.
    Degenerate,
    /// An antenna point did not make it into the graph.
    MissingAntenna,
    /// The search never reached the destination antenna.
    Unreachable,
    /// Composition left fewer than two points.
    Collapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "reason")]
pub enum RouteOutcome {
    Composed,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub points: Vec<Point>,
    pub outcome: RouteOutcome,
}

impl RouteResult {
    fn fallback(request: &RouteRequest, config: &RouterConfig, reason: FallbackReason) -> Self {
        log::debug!(
            "fallback route ({reason:?}) for dx={} dy={} {:?}->{:?}",
            request.dx,
            request.dy,
            request.source_side,
            request.dest_side
        );
        let direct = fallback_route(request.dx, request.dy, request.source_side, request.dest_side);
        Self {
            points: simplify(&direct, config.merge_tolerance),
            outcome: RouteOutcome::Fallback(reason),
        }
    }
}

/// Routes one arrow and reports which terminal state was reached.
pub fn route(request: &RouteRequest, config: &RouterConfig) -> RouteResult {
    if request.is_degenerate() {
        return RouteResult::fallback(request, config, FallbackReason::Degenerate);
    }
    if request.obstacles.is_empty() {
        return RouteResult::fallback(request, config, FallbackReason::NoObstacles);
    }

    let origin = Point::ORIGIN;
    let dest = request.dest();
    let input = GraphInput {
        origin,
        dest,
        source_antenna: antenna_point(origin, request.source_side, config.antenna_margin),
        source_side: request.source_side,
        dest_antenna: antenna_point(dest, request.dest_side, config.antenna_margin),
        dest_side: request.dest_side,
        source_rect: request.source_rect,
        dest_rect: request.dest_rect,
        obstacles: &request.obstacles,
    };
    let graph = build_graph(
        &input,
        GraphOptions {
            margin: config.obstacle_margin,
            precision: config.key_precision,
            embed_tolerance: config.embed_tolerance,
        },
    );

    let (Some(start), Some(goal)) = (graph.node_at(input.source_antenna), graph.node_at(input.dest_antenna))
    else {
        return RouteResult::fallback(request, config, FallbackReason::MissingAntenna);
    };
    let Some(path) = shortest_path(&graph, start, goal, config.bend_penalty) else {
        return RouteResult::fallback(request, config, FallbackReason::Unreachable);
    };

    let searched: Vec<Point> = path.into_iter().map(|idx| graph.nodes[idx]).collect();
    let points = compose::compose(origin, &searched, dest, config.merge_tolerance);
    if points.len() < 2 {
        return RouteResult::fallback(request, config, FallbackReason::Collapsed);
    }
    RouteResult {
        points,
        outcome: RouteOutcome::Composed,
    }
}

/// Routes one arrow. The result has at least two points, starts at `(0, 0)`
/// and ends at `(dx, dy)`.
pub fn compute_route(request: &RouteRequest, config: &RouterConfig) -> Vec<Point> {
    route(request, config).points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(dx: f32, dy: f32, source_side: Side, dest_side: Side) -> RouteRequest {
        RouteRequest {
            dx,
            dy,
            source_side,
            dest_side,
            source_rect: None,
            dest_rect: None,
            obstacles: Vec::new(),
        }
    }

    #[test]
    fn no_obstacles_takes_direct_route() {
        let config = RouterConfig::default();
        let result = route(&request(300.0, 150.0, Side::Right, Side::Top), &config);
        assert_eq!(result.outcome, RouteOutcome::Fallback(FallbackReason::NoObstacles));
        assert_eq!(
            result.points,
            vec![Point::ORIGIN, Point::new(300.0, 0.0), Point::new(300.0, 150.0)]
        );
    }

    #[test]
    fn zero_offset_is_degenerate_but_total() {
        let config = RouterConfig::default();
        let mut req = request(0.0, 0.0, Side::Right, Side::Left);
        req.obstacles.push(Rect::new(50.0, 50.0, 10.0, 10.0));
        let result = route(&req, &config);
        assert_eq!(result.outcome, RouteOutcome::Fallback(FallbackReason::Degenerate));
        assert_eq!(result.points, vec![Point::ORIGIN, Point::ORIGIN]);
    }

    #[test]
    fn non_finite_input_falls_back() {
        let config = RouterConfig::default();
        let req = request(f32::NAN, 10.0, Side::Right, Side::Left);
        let result = route(&req, &config);
        assert_eq!(result.outcome, RouteOutcome::Fallback(FallbackReason::Degenerate));
        assert!(result.points.len() >= 2);
    }

    #[test]
    fn between_moves_rects_into_local_frame() {
        let source = Rect::new(100.0, 100.0, 100.0, 60.0);
        let dest = Rect::new(500.0, 300.0, 100.0, 60.0);
        let other = Rect::new(300.0, 100.0, 50.0, 50.0);
        let (origin, req) = RouteRequest::between(&source, Side::Right, 0.5, &dest, Side::Left, 0.5, &[other]);
        assert_eq!(origin, Point::new(200.0, 130.0));
        assert_eq!(req.dest(), Point::new(300.0, 200.0));
        assert_eq!(req.source_rect, Some(Rect::new(-100.0, -30.0, 100.0, 60.0)));
        assert_eq!(req.obstacles, vec![Rect::new(100.0, -30.0, 50.0, 50.0)]);
    }

    #[test]
    fn routes_around_obstacle_with_search() {
        let config = RouterConfig::default();
        let source = Rect::new(0.0, 0.0, 100.0, 60.0);
        let dest = Rect::new(500.0, 0.0, 100.0, 60.0);
        let blocker = Rect::new(250.0, -20.0, 60.0, 100.0);
        let (_, req) = RouteRequest::between(&source, Side::Right, 0.5, &dest, Side::Left, 0.5, &[blocker]);
        let result = route(&req, &config);
        assert_eq!(result.outcome, RouteOutcome::Composed);
        let local_blocker = req.obstacles[0];
        for seg in result.points.windows(2) {
            assert!(!segment_crosses_rect_interior(seg[0], seg[1], &local_blocker));
        }
        assert_eq!(result.points.first(), Some(&Point::ORIGIN));
        assert_eq!(result.points.last(), Some(&req.dest()));
    }
}
