use ortho_arrows::{Point, RouteOutcome, RouteRequest, RouterConfig, Scene, route};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArrowRouteOptions {
    margin: Option<f32>,
    antenna_margin: Option<f32>,
    obstacle_margin: Option<f32>,
    bend_penalty: Option<bool>,
}

#[derive(Debug, Serialize)]
struct RouteResponse {
    points: Vec<Point>,
    outcome: RouteOutcome,
}

fn build_router_config(options: ArrowRouteOptions) -> RouterConfig {
    let mut config = RouterConfig::default();
    if let Some(margin) = options.margin {
        config = config.with_margin(margin);
    }
    if let Some(antenna_margin) = options.antenna_margin {
        config.antenna_margin = antenna_margin.max(0.0);
    }
    if let Some(obstacle_margin) = options.obstacle_margin {
        config.obstacle_margin = obstacle_margin.max(0.0);
    }
    if let Some(bend_penalty) = options.bend_penalty {
        config.bend_penalty = bend_penalty;
    }
    config
}

fn reroute_scene(scene_json: &str, options: ArrowRouteOptions) -> Result<String, String> {
    let mut scene = Scene::from_json5(scene_json).map_err(|error| error.to_string())?;
    scene
        .reroute_all(&build_router_config(options))
        .map_err(|error| error.to_string())?;
    scene.to_json_pretty().map_err(|error| error.to_string())
}

fn route_request(request_json: &str) -> Result<String, String> {
    let request: RouteRequest =
        serde_json::from_str(request_json).map_err(|error| error.to_string())?;
    let result = route(&request, &RouterConfig::default());
    let response = RouteResponse {
        points: result.points,
        outcome: result.outcome,
    };
    serde_json::to_string(&response).map_err(|error| error.to_string())
}

/// Re-routes every arrow of a scene and returns the updated scene.
#[wasm_bindgen]
pub fn route_scene_json(scene_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<ArrowRouteOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        ArrowRouteOptions::default()
    };
    reroute_scene(scene_json, options).map_err(|error| JsValue::from_str(&error))
}

/// Routes a single request given in the arrow-local frame.
#[wasm_bindgen]
pub fn compute_route_json(request_json: &str) -> Result<String, JsValue> {
    route_request(request_json).map_err(|error| JsValue::from_str(&error))
}
