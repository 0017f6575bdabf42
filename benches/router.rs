use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ortho_arrows::routing::default_sides;
use ortho_arrows::{
    Rect, RouteRequest, RouterConfig, Scene, SequentialIds, Shape, ShapeKind, compute_route,
};
use std::hint::black_box;

fn shape_grid(rows: usize, cols: usize) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            // Stagger odd rows so corridors are not all aligned.
            let shift = if row % 2 == 1 { 60.0 } else { 0.0 };
            shapes.push(Shape {
                id: format!("n{row}_{col}"),
                kind: ShapeKind::Rectangle,
                bounds: Rect::new(col as f32 * 220.0 + shift, row as f32 * 170.0, 120.0, 70.0),
                label: None,
            });
        }
    }
    shapes
}

fn corner_request(shapes: &[Shape]) -> RouteRequest {
    let source = &shapes[0];
    let dest = &shapes[shapes.len() - 1];
    let (source_side, dest_side) = default_sides(&source.bounds, &dest.bounds);
    let others: Vec<Rect> = shapes[1..shapes.len() - 1].iter().map(|s| s.bounds).collect();
    let (_, request) = RouteRequest::between(
        &source.bounds,
        source_side,
        0.5,
        &dest.bounds,
        dest_side,
        0.5,
        &others,
    );
    request
}

fn connected_scene(rows: usize, cols: usize, arrows: usize) -> Scene {
    let config = RouterConfig::default();
    let mut scene = Scene::new();
    scene.shapes = shape_grid(rows, cols);
    let ids: Vec<String> = scene.shapes.iter().map(|s| s.id.clone()).collect();
    let mut id_gen = SequentialIds::default();
    let mut count = 0usize;
    'outer: for (i, from) in ids.iter().enumerate() {
        for to in ids.iter().skip(i + 2).step_by(3) {
            if count >= arrows {
                break 'outer;
            }
            scene
                .connect(from, to, &mut id_gen, &config)
                .expect("grid shapes exist");
            count += 1;
        }
    }
    scene
}

fn bench_single_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_route");
    let config = RouterConfig::default();
    for (rows, cols) in [(2, 2), (4, 4), (6, 8), (10, 10)] {
        let request = corner_request(&shape_grid(rows, cols));
        let name = format!("{rows}x{cols}");
        group.bench_with_input(BenchmarkId::from_parameter(name), &request, |b, data| {
            b.iter(|| {
                let points = compute_route(black_box(data), &config);
                black_box(points.len());
            });
        });
    }
    group.finish();
}

fn bench_bend_penalty_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("bend_penalty");
    let request = corner_request(&shape_grid(6, 8));
    for penalize in [true, false] {
        let config = RouterConfig {
            bend_penalty: penalize,
            ..RouterConfig::default()
        };
        let name = if penalize { "penalized" } else { "plain" };
        group.bench_with_input(BenchmarkId::from_parameter(name), &request, |b, data| {
            b.iter(|| black_box(compute_route(black_box(data), &config)));
        });
    }
    group.finish();
}

fn bench_reroute_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("reroute_all");
    group.sample_size(20);
    let config = RouterConfig::default();
    for (rows, cols, arrows) in [(3, 4, 10), (6, 6, 40), (8, 10, 120)] {
        let scene = connected_scene(rows, cols, arrows);
        let name = format!("{rows}x{cols}_{arrows}");
        group.bench_with_input(BenchmarkId::from_parameter(name), &scene, |b, data| {
            b.iter(|| {
                let mut scene = data.clone();
                scene.reroute_all(&config).expect("reroute failed");
                black_box(scene.arrows.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_route, bench_bend_penalty_modes, bench_reroute_all);
criterion_main!(benches);
