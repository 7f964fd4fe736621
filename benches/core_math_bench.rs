use criterion::{Criterion, criterion_group, criterion_main};
use seqplot::api::{HeadlessHost, PanelConfig, SequencePanel, build_render_frame};
use seqplot::core::{AxisConvention, CoordinateMapper, MappingConfig, Viewport};
use seqplot::render::{NullRenderer, RenderFrame};
use std::hint::black_box;

fn samples(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            (t * 0.01).sin() * 50.0 + t * 0.002
        })
        .collect()
}

fn bench_mapper_round_trip(c: &mut Criterion) {
    let values = samples(1_000);
    let mapper = CoordinateMapper::resolve(
        MappingConfig {
            padding: 50.0,
            axis_convention: AxisConvention::BottomUp,
            fixed_scale: None,
        },
        Viewport::new(1920, 1080),
        &values,
    )
    .expect("valid mapper");

    c.bench_function("mapper_round_trip", |b| {
        b.iter(|| {
            let y = mapper.value_to_y(black_box(12.345));
            let _ = mapper.y_to_value(y);
        })
    });
}

fn bench_build_frame_10k(c: &mut Criterion) {
    let values = samples(10_000);
    let config = PanelConfig::default();

    c.bench_function("build_render_frame_10k", |b| {
        b.iter(|| {
            let _ = build_render_frame(&config, black_box(&values), Viewport::new(1920, 1080))
                .expect("frame");
        })
    });
}

fn bench_drag_move_10k(c: &mut Criterion) {
    let values = samples(10_000);
    let mut host: HeadlessHost<RenderFrame> = HeadlessHost::new(Viewport::new(1920, 1080));
    let mut panel = SequencePanel::mount(
        NullRenderer::default(),
        PanelConfig::default(),
        values.clone(),
        &mut host,
    )
    .expect("panel");
    let marker = panel.mapper().expect("mapper").map(5_000, values[5_000]);
    panel.on_pointer_down(&mut host, marker.x, marker.y);

    c.bench_function("drag_move_and_rebuild_10k", |b| {
        let mut y = marker.y;
        b.iter(|| {
            y = if y > 500.0 { 300.0 } else { y + 1.0 };
            panel.on_pointer_move(&mut host, marker.x, black_box(y), true);
            panel.paint(&mut host);
        })
    });
}

criterion_group!(
    benches,
    bench_mapper_round_trip,
    bench_build_frame_10k,
    bench_drag_move_10k
);
criterion_main!(benches);
