use crate::config::RouterConfig;
use crate::ir::{Point, Scene, Side};
use crate::routing::{
    FallbackReason, Frame, RouteOutcome, RouteRequest, collect_obstacles, path_bend_count,
    path_length, route,
};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDump {
    pub shape_count: usize,
    pub arrows: Vec<ArrowDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowDump {
    pub id: String,
    pub from: String,
    pub to: String,
    pub start_side: Side,
    pub end_side: Side,
    pub start_t: f32,
    pub end_t: f32,
    pub origin: [f32; 2],
    pub points: Vec<[f32; 2]>,
    pub bends: usize,
    pub length: f32,
    pub outcome: RouteOutcome,
}

fn pair(point: &Point) -> [f32; 2] {
    [point.x, point.y]
}

impl RouteDump {
    /// Routes every arrow of `scene` again and records the outcome of each
    /// call next to the stored geometry. Arrows whose shapes are missing are
    /// reported with a degenerate outcome and their stored points.
    pub fn from_scene(scene: &Scene, config: &RouterConfig) -> Self {
        let arrows = scene
            .arrows
            .iter()
            .map(|arrow| {
                let source = scene.shape(&arrow.start.element_id);
                let dest = scene.shape(&arrow.end.element_id);
                let outcome = match (source, dest) {
                    (Some(source), Some(dest)) => {
                        let obstacles = collect_obstacles(
                            &scene.shapes,
                            &[source.id.as_str(), dest.id.as_str()],
                            Frame::World,
                        );
                        let (_, request) = RouteRequest::between(
                            &source.bounds,
                            arrow.start.side,
                            arrow.start.t,
                            &dest.bounds,
                            arrow.end.side,
                            arrow.end.t,
                            &obstacles,
                        );
                        route(&request, config).outcome
                    }
                    _ => RouteOutcome::Fallback(FallbackReason::Degenerate),
                };
                ArrowDump {
                    id: arrow.id.clone(),
                    from: arrow.start.element_id.clone(),
                    to: arrow.end.element_id.clone(),
                    start_side: arrow.start.side,
                    end_side: arrow.end.side,
                    start_t: arrow.start.t,
                    end_t: arrow.end.t,
                    origin: pair(&arrow.origin),
                    points: arrow.points.iter().map(pair).collect(),
                    bends: path_bend_count(&arrow.points),
                    length: path_length(&arrow.points),
                    outcome,
                }
            })
            .collect();
        RouteDump {
            shape_count: scene.shapes.len(),
            arrows,
        }
    }
}

pub fn write_route_dump(path: Option<&Path>, scene: &Scene, config: &RouterConfig) -> anyhow::Result<()> {
    let dump = RouteDump::from_scene(scene, config);
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
    }
    Ok(())
}
