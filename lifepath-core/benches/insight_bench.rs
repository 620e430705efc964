//! Criterion benchmarks for insight generation over synthetic canvases.

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lifepath_core::canvas::{default_categories, CanvasPosition, EventCanvas, NewEvent};
use lifepath_core::insights::generate_insights;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn synthetic_canvas(event_count: usize) -> EventCanvas {
    let categories = default_categories();
    let mut canvas = EventCanvas::new();
    for i in 0..event_count {
        let category = categories[i % categories.len()].clone();
        canvas.add_event(
            NewEvent {
                title: format!("event {i}"),
                description: String::new(),
                date: base_time() - Duration::days((i % 700) as i64),
                category,
                position: CanvasPosition::default(),
                satisfaction: (i % 5 + 1) as u8,
                financial_impact: None,
                photos: Vec::new(),
                mood: None,
                prediction_id: None,
                tags: Vec::new(),
                is_private: false,
            },
            base_time(),
        );
    }
    canvas
}

fn bench_insight_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("insight_generation");
    for size in [10usize, 100, 1_000] {
        let canvas = synthetic_canvas(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &canvas, |b, canvas| {
            b.iter(|| generate_insights(black_box(&canvas.events), base_time()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insight_generation);
criterion_main!(benches);
