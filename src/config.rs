use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Length of the perpendicular lead-out from a shape face.
    pub antenna_margin: f32,
    /// Clearance added around every obstacle.
    pub obstacle_margin: f32,
    /// Consecutive points closer than this are merged.
    pub merge_tolerance: f32,
    /// Grace distance when deciding whether a waypoint sits inside a shape.
    pub embed_tolerance: f32,
    /// Multiplier applied before rounding coordinates into graph keys.
    pub key_precision: f32,
    pub bend_penalty: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            antenna_margin: 30.0,
            obstacle_margin: 30.0,
            merge_tolerance: 0.5,
            embed_tolerance: 0.5,
            key_precision: 100.0,
            bend_penalty: true,
        }
    }
}

impl RouterConfig {
    /// Uses `margin` for both the antenna lead-out and obstacle clearance.
    pub fn with_margin(mut self, margin: f32) -> Self {
        let margin = margin.max(0.0);
        self.antenna_margin = margin;
        self.obstacle_margin = margin;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            padding: 40.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub router: RouterConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::canvas_default();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            router: RouterConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    router: Option<RouterConfigFile>,
    render: Option<RenderConfigFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    shape_fill: Option<String>,
    shape_stroke: Option<String>,
    text_color: Option<String>,
    line_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouterConfigFile {
    margin: Option<f32>,
    antenna_margin: Option<f32>,
    obstacle_margin: Option<f32>,
    merge_tolerance: Option<f32>,
    embed_tolerance: Option<f32>,
    key_precision: Option<f32>,
    bend_penalty: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    background: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "dark" => config.theme = Theme::dark(),
            "default" | "light" => config.theme = Theme::canvas_default(),
            other => log::warn!("unknown theme {other:?}, keeping default"),
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.shape_fill {
            config.theme.shape_fill = v;
        }
        if let Some(v) = vars.shape_stroke {
            config.theme.shape_stroke = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v.clone();
            config.render.background = v;
        }
    }

    if let Some(router) = parsed.router {
        if let Some(v) = router.margin {
            config.router = config.router.with_margin(v);
        }
        if let Some(v) = router.antenna_margin {
            config.router.antenna_margin = v.max(0.0);
        }
        if let Some(v) = router.obstacle_margin {
            config.router.obstacle_margin = v.max(0.0);
        }
        if let Some(v) = router.merge_tolerance {
            config.router.merge_tolerance = v.max(0.0);
        }
        if let Some(v) = router.embed_tolerance {
            config.router.embed_tolerance = v.max(0.0);
        }
        if let Some(v) = router.key_precision
            && v > 0.0
        {
            config.router.key_precision = v;
        }
        if let Some(v) = router.bend_penalty {
            config.router.bend_penalty = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v.max(0.0);
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    Ok(config)
}
