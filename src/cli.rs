use crate::config::{Config, load_config};
use crate::ir::Scene;
use crate::render::{render_svg, write_output_svg};
use crate::route_dump::write_route_dump;
use crate::scene::SequentialIds;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "arrows", version, about = "Route orthogonal arrows between canvas shapes")]
pub struct Args {
    /// Scene file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Antenna length and obstacle clearance
    #[arg(short = 'm', long = "margin")]
    pub margin: Option<f32>,

    /// Add an arrow between two shapes, as FROM:TO (repeatable)
    #[arg(long = "connect", value_parser = parse_link)]
    pub connect: Vec<(String, String)>,

    /// Recompute every existing arrow before output
    #[arg(long = "reroute")]
    pub reroute: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

fn parse_link(raw: &str) -> Result<(String, String), String> {
    let (from, to) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got `{raw}`"))?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(format!("expected FROM:TO, got `{raw}`"));
    }
    Ok((from.to_string(), to.to_string()))
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(margin) = args.margin {
        config.router = config.router.with_margin(margin);
    }

    let input = read_input(args.input.as_deref())?;
    let mut scene = Scene::from_json5(&input)?;
    apply_edits(&mut scene, &args, &config)?;

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&scene, &config.theme, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => write_png(&scene, &config, args.output.as_deref())?,
        OutputFormat::Json => {
            write_route_dump(args.output.as_deref(), &scene, &config.router)?;
        }
    }
    Ok(())
}

fn apply_edits(scene: &mut Scene, args: &Args, config: &Config) -> Result<()> {
    if args.reroute {
        scene.reroute_all(&config.router)?;
    }
    let mut ids = SequentialIds::starting_at(scene.arrows.len() as u64);
    for (from, to) in &args.connect {
        let arrow = scene.connect(from, to, &mut ids, &config.router)?;
        log::info!("added {} with {} points", arrow.id, arrow.points.len());
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(scene: &Scene, config: &Config, output: Option<&Path>) -> Result<()> {
    let output = output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
    let svg = render_svg(scene, &config.theme, &config.render);
    crate::render::write_output_png(&svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_scene: &Scene, _config: &Config, _output: Option<&Path>) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_connect_links() {
        assert_eq!(parse_link("a:b"), Ok(("a".to_string(), "b".to_string())));
        assert_eq!(parse_link(" a : b "), Ok(("a".to_string(), "b".to_string())));
        assert!(parse_link("ab").is_err());
        assert!(parse_link(":b").is_err());
    }

    #[test]
    fn args_accept_repeated_connect() {
        let args = Args::try_parse_from([
            "arrows", "-i", "scene.json5", "-e", "json", "--connect", "a:b", "--connect", "b:c",
            "--reroute",
        ])
        .unwrap();
        assert_eq!(args.connect.len(), 2);
        assert!(args.reroute);
        assert!(matches!(args.output_format, OutputFormat::Json));
    }

    #[test]
    fn apply_edits_connects_shapes() {
        let mut scene = Scene::from_json5(
            r#"{shapes: [
                {id: 'a', bounds: {x: 0, y: 0, width: 100, height: 60}},
                {id: 'b', bounds: {x: 300, y: 0, width: 100, height: 60}},
            ]}"#,
        )
        .unwrap();
        let args = Args::try_parse_from(["arrows", "--connect", "a:b"]).unwrap();
        apply_edits(&mut scene, &args, &Config::default()).unwrap();
        assert_eq!(scene.arrows.len(), 1);
        assert_eq!(scene.arrows[0].id, "arrow-1");
    }
}
