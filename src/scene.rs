//! Canvas-level operations on a [`Scene`] snapshot.

use rayon::prelude::*;
use thiserror::Error;

use crate::config::RouterConfig;
use crate::ir::{Arrow, Connection, Point, Rect, Scene, Shape, ShapeKind, Side};
use crate::routing::{
    Frame, RouteRequest, collect_obstacles, compute_route, connect_slot, default_sides, slot_t,
};

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("unknown shape `{0}`")]
    UnknownShape(String),
    #[error("unknown arrow `{0}`")]
    UnknownArrow(String),
    #[error("cannot connect shape `{0}` to itself")]
    SelfConnection(String),
    #[error("invalid scene: {0}")]
    Parse(String),
    #[error("cannot serialize scene: {0}")]
    Serialize(String),
}

/// Source of element ids, supplied by the caller.
pub trait IdGenerator {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Deterministic `prefix-N` ids.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{prefix}-{}", self.next)
    }
}

/// Random v4 UUIDs; the prefix is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self, _prefix: &str) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

impl Scene {
    /// Parses a scene from JSON or JSON5 text.
    pub fn from_json5(input: &str) -> Result<Self, SceneError> {
        json5::from_str(input).map_err(|err| SceneError::Parse(err.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, SceneError> {
        serde_json::to_string_pretty(self).map_err(|err| SceneError::Serialize(err.to_string()))
    }

    fn fresh_id(&self, ids: &mut dyn IdGenerator, prefix: &str) -> String {
        loop {
            let id = ids.next_id(prefix);
            let taken = self.shapes.iter().any(|s| s.id == id) || self.arrows.iter().any(|a| a.id == id);
            if !taken {
                return id;
            }
        }
    }

    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        bounds: Rect,
        label: Option<String>,
        ids: &mut dyn IdGenerator,
    ) -> &Shape {
        let id = self.fresh_id(ids, "shape");
        self.shapes.push(Shape {
            id,
            kind,
            bounds,
            label,
        });
        &self.shapes[self.shapes.len() - 1]
    }

    fn bounds_of(&self, id: &str) -> Result<Rect, SceneError> {
        self.shape(id)
            .map(|shape| shape.bounds)
            .ok_or_else(|| SceneError::UnknownShape(id.to_string()))
    }

    /// Routes `arrow` against the current shapes without modifying the scene.
    /// Returns the world-space source anchor and the relative points.
    pub fn route_arrow(&self, arrow: &Arrow, config: &RouterConfig) -> Result<(Point, Vec<Point>), SceneError> {
        let source = self.bounds_of(&arrow.start.element_id)?;
        let dest = self.bounds_of(&arrow.end.element_id)?;
        let obstacles = collect_obstacles(
            &self.shapes,
            &[arrow.start.element_id.as_str(), arrow.end.element_id.as_str()],
            Frame::World,
        );
        let (origin, request) = RouteRequest::between(
            &source,
            arrow.start.side,
            arrow.start.t,
            &dest,
            arrow.end.side,
            arrow.end.t,
            &obstacles,
        );
        Ok((origin, compute_route(&request, config)))
    }

    /// Re-spreads every arrow end docked on `(element_id, side)` to
    /// `k/(n+1)` in scene order. Returns the indices of arrows touched.
    fn redistribute(&mut self, element_id: &str, side: Side) -> Vec<usize> {
        let mut ends: Vec<(usize, bool)> = Vec::new();
        for (idx, arrow) in self.arrows.iter().enumerate() {
            if arrow.start.is_on(element_id, side) {
                ends.push((idx, true));
            }
            if arrow.end.is_on(element_id, side) {
                ends.push((idx, false));
            }
        }
        let count = ends.len();
        for (slot, &(idx, is_start)) in ends.iter().enumerate() {
            let arrow = &mut self.arrows[idx];
            let connection = if is_start { &mut arrow.start } else { &mut arrow.end };
            connection.t = slot_t(slot, count);
        }
        ends.into_iter().map(|(idx, _)| idx).collect()
    }

    fn reroute_index(&mut self, idx: usize, config: &RouterConfig) -> Result<(), SceneError> {
        let (origin, points) = self.route_arrow(&self.arrows[idx], config)?;
        let arrow = &mut self.arrows[idx];
        arrow.origin = origin;
        arrow.points = points;
        Ok(())
    }

    /// Adds an arrow between two shapes, docking it on the default sides at
    /// the next free slot and re-routing arrows whose slot shifted.
    pub fn connect(
        &mut self,
        from: &str,
        to: &str,
        ids: &mut dyn IdGenerator,
        config: &RouterConfig,
    ) -> Result<&Arrow, SceneError> {
        if from == to {
            return Err(SceneError::SelfConnection(from.to_string()));
        }
        let source = self.bounds_of(from)?;
        let dest = self.bounds_of(to)?;
        let (source_side, dest_side) = default_sides(&source, &dest);
        let start = Connection::new(from, source_side, connect_slot(&self.arrows, from, source_side));
        let end = Connection::new(to, dest_side, connect_slot(&self.arrows, to, dest_side));
        let id = self.fresh_id(ids, "arrow");
        log::debug!("connect {id}: {from}:{source_side:?}@{} -> {to}:{dest_side:?}@{}", start.t, end.t);

        self.arrows.push(Arrow {
            id,
            start,
            end,
            origin: Point::ORIGIN,
            points: Vec::new(),
        });
        let new_idx = self.arrows.len() - 1;

        let mut touched = self.redistribute(from, source_side);
        touched.extend(self.redistribute(to, dest_side));
        touched.push(new_idx);
        touched.sort_unstable();
        touched.dedup();
        for idx in touched {
            self.reroute_index(idx, config)?;
        }
        Ok(&self.arrows[new_idx])
    }

    /// Recomputes one arrow from its persisted connections.
    pub fn reroute(&mut self, arrow_id: &str, config: &RouterConfig) -> Result<&Arrow, SceneError> {
        let idx = self
            .arrows
            .iter()
            .position(|arrow| arrow.id == arrow_id)
            .ok_or_else(|| SceneError::UnknownArrow(arrow_id.to_string()))?;
        self.reroute_index(idx, config)?;
        Ok(&self.arrows[idx])
    }

    /// Recomputes every arrow. Each route reads the same snapshot, so they
    /// are computed in parallel and applied together.
    pub fn reroute_all(&mut self, config: &RouterConfig) -> Result<(), SceneError> {
        let routes = self
            .arrows
            .par_iter()
            .map(|arrow| self.route_arrow(arrow, config))
            .collect::<Result<Vec<_>, _>>()?;
        for (arrow, (origin, points)) in self.arrows.iter_mut().zip(routes) {
            arrow.origin = origin;
            arrow.points = points;
        }
        log::debug!("rerouted {} arrows", self.arrows.len());
        Ok(())
    }

    /// Moves a shape's top-left corner and re-routes the arrows attached to it.
    pub fn move_shape(&mut self, id: &str, x: f32, y: f32, config: &RouterConfig) -> Result<(), SceneError> {
        let shape = self
            .shapes
            .iter_mut()
            .find(|shape| shape.id == id)
            .ok_or_else(|| SceneError::UnknownShape(id.to_string()))?;
        shape.bounds.x = x;
        shape.bounds.y = y;
        let attached: Vec<usize> = self
            .arrows
            .iter()
            .enumerate()
            .filter(|(_, arrow)| arrow.touches(id))
            .map(|(idx, _)| idx)
            .collect();
        for idx in attached {
            self.reroute_index(idx, config)?;
        }
        Ok(())
    }
}
