//! Benchmarks for the star-field frame cycle
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use loadwatch::chart::{ChartData, ChartSession, LineChartStyle, TextBackend};
use loadwatch::starfield::{RecordingSurface, StarField};
use loadwatch::StarfieldConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn create_field(stars: usize) -> StarField<StdRng> {
    let config = StarfieldConfig {
        star_count: stars,
        ..StarfieldConfig::default()
    };
    let mut field = StarField::new(config, 1280.0, 160.0, StdRng::seed_from_u64(1)).unwrap();
    // Warm up so every trail is full
    for _ in 0..60 {
        field.update();
    }
    field
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("starfield");

    for stars in [80, 800] {
        group.throughput(Throughput::Elements(stars as u64));

        group.bench_function(format!("update_{}", stars), |b| {
            let mut field = create_field(stars);
            b.iter(|| field.update())
        });

        group.bench_function(format!("draw_{}", stars), |b| {
            let field = create_field(stars);
            let mut surface = RecordingSurface::new();
            b.iter(|| field.draw(black_box(&mut surface)))
        });

        group.bench_function(format!("tick_and_draw_{}", stars), |b| {
            let mut field = create_field(stars);
            let mut surface = RecordingSurface::new();
            let mut now_ms = 0.0;
            b.iter(|| {
                now_ms += 16.7;
                field.tick(black_box(now_ms));
                field.draw(&mut surface);
            })
        });
    }

    group.finish();
}

fn bench_chart(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart");

    // The endpoint keeps at most 40 samples per server
    let data = ChartData::new(
        (0..40).map(|i| format!("12:{:02}", i)).collect(),
        (0..40).map(|i| (i * 7 % 100) as f64).collect(),
    );
    let body = serde_json::to_vec(&data).unwrap();

    group.bench_function("decode_40", |b| {
        b.iter(|| ChartData::from_json(black_box(&body)).unwrap())
    });

    group.bench_function("apply_40", |b| {
        let mut session = ChartSession::new(TextBackend::default(), LineChartStyle::default());
        b.iter(|| session.apply(black_box(&data)).unwrap())
    });

    group.bench_function("chartjs_config_40", |b| {
        let style = LineChartStyle::default();
        b.iter(|| style.chartjs_config(black_box(&data)))
    });

    group.finish();
}

criterion_group!(benches, bench_frame, bench_chart);
criterion_main!(benches);
