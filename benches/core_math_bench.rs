use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tchart::api::{ChartEngine, ChartEngineConfig};
use tchart::core::{
    ChartDataset, RangeAggregator, SelectionWindow, Series, SeriesColor, Viewport, ViewportMapper,
    VisibilitySet,
};
use tchart::render::NullRenderer;

const POINTS: usize = 10_000;

fn wide_dataset() -> Arc<ChartDataset> {
    let axis: Vec<i64> = (0..POINTS as i64).map(|day| day * 86_400_000).collect();
    let series = (0..4)
        .map(|index| {
            let values = (0..POINTS as i64)
                .map(|i| (i * (index + 3) * 7_919) % 1_000 + index * 50)
                .collect();
            Series::new(format!("#{index}"), SeriesColor::rgb(0x3d, 0xc2, 0x3f), values)
        })
        .collect();
    Arc::new(ChartDataset::new(axis, series).expect("valid generated dataset"))
}

fn bench_viewport_mapping_10k(c: &mut Criterion) {
    let mut mapper = ViewportMapper::new(POINTS);
    let zoomed = SelectionWindow::new(0.25, 0.5).expect("valid selection");
    let wider = SelectionWindow::new(0.25, 0.75).expect("valid selection");

    c.bench_function("viewport_mapping_10k", |b| {
        b.iter(|| {
            let _ = mapper.update(black_box(zoomed), black_box(1_920.0));
            let _ = mapper.update(black_box(wider), black_box(1_920.0));
        })
    });
}

fn bench_range_aggregation_10k(c: &mut Criterion) {
    let aggregator = RangeAggregator::new(wide_dataset());
    let visibility = VisibilitySet::all_visible(4);

    c.bench_function("range_aggregation_10k", |b| {
        b.iter(|| {
            let _ = aggregator.compute_range(black_box(0), black_box(POINTS - 1), &visibility);
        })
    });
}

fn bench_engine_build_frames(c: &mut Criterion) {
    let config = ChartEngineConfig::new(Viewport::new(1_920, 720), Viewport::new(1_920, 96))
        .with_initial_selection(SelectionWindow::new(0.8, 1.0).expect("valid selection"));
    let mut engine = ChartEngine::new(NullRenderer::default(), config, wide_dataset())
        .expect("engine init");
    engine.detail_pointer_move(960.0, 300.0);

    c.bench_function("engine_build_frames_10k", |b| {
        b.iter(|| {
            let frames = engine.build_frames();
            black_box(frames);
        })
    });
}

criterion_group!(
    benches,
    bench_viewport_mapping_10k,
    bench_range_aggregation_10k,
    bench_engine_build_frames
);
criterion_main!(benches);
