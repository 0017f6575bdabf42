use crate::config::RenderConfig;
use crate::ir::{Point, Rect, Scene, Shape, ShapeKind};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Renders shapes and routed arrows as a standalone SVG document.
pub fn render_svg(scene: &Scene, theme: &Theme, config: &RenderConfig) -> String {
    let pad = config.padding;
    let bounds = scene.bounds().unwrap_or(Rect::new(0.0, 0.0, 200.0, 200.0));
    let view_x = bounds.x - pad;
    let view_y = bounds.y - pad;
    let width = (bounds.width + pad * 2.0).max(1.0);
    let height = (bounds.height + pad * 2.0).max(1.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"{view_x:.2} {view_y:.2} {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect x=\"{view_x:.2}\" y=\"{view_y:.2}\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");

    for shape in &scene.shapes {
        svg.push_str(&shape_svg(shape, theme));
    }

    for arrow in &scene.arrows {
        if arrow.points.len() < 2 {
            continue;
        }
        svg.push_str(&format!(
            "<path data-id=\"{}\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.4\" marker-end=\"url(#arrow)\"/>",
            escape_xml(&arrow.id),
            points_to_path(&arrow.world_points()),
            theme.line_color
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn shape_svg(shape: &Shape, theme: &Theme) -> String {
    let b = &shape.bounds;
    let c = b.center();
    let mut out = match shape.kind {
        ShapeKind::Rectangle => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"6\" ry=\"6\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            b.x, b.y, b.width, b.height, theme.shape_fill, theme.shape_stroke
        ),
        ShapeKind::Ellipse => format!(
            "<ellipse cx=\"{:.2}\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            c.x,
            c.y,
            b.width / 2.0,
            b.height / 2.0,
            theme.shape_fill,
            theme.shape_stroke
        ),
        ShapeKind::Diamond => format!(
            "<polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            c.x,
            b.y,
            b.right(),
            c.y,
            c.x,
            b.bottom(),
            b.x,
            c.y,
            theme.shape_fill,
            theme.shape_stroke
        ),
        // Text shapes have no outline.
        ShapeKind::Text => String::new(),
    };
    if let Some(label) = shape.label.as_deref().filter(|l| !l.trim().is_empty()) {
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            c.x,
            c.y,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.text_color,
            escape_xml(label)
        ));
    }
    out
}

fn points_to_path(points: &[Point]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].x, points[0].y));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.x, point.y));
    }
    d
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
