#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod render;
pub mod route_dump;
pub mod routing;
pub mod scene;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderConfig, RouterConfig, load_config};
pub use ir::{Arrow, Connection, Point, Rect, Scene, Shape, ShapeKind, Side};
pub use render::render_svg;
pub use routing::{RouteOutcome, RouteRequest, RouteResult, compute_route, route};
pub use scene::{IdGenerator, SceneError, SequentialIds, UuidIds};
pub use theme::Theme;
