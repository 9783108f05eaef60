use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wepc_core::PcoordArray;
use wepc_load::{parse_table, track_states, LabelSeed, TrackerSettings};
use wepc_system::{SystemConfig, WeSystem};

fn sample_segment(frames: usize) -> PcoordArray {
    let rows = (0..frames)
        .map(|frame| vec![(frame % 17) as f32 * 0.8, 1.5])
        .collect();
    PcoordArray::from_rows(rows).unwrap()
}

fn bench_track(c: &mut Criterion) {
    let system = WeSystem::initialize(SystemConfig::default()).unwrap();
    let settings = TrackerSettings::from_system(&system);
    let raw = sample_segment(settings.frames);

    c.bench_function("track_states_segment", |b| {
        b.iter(|| {
            track_states(
                black_box(&raw),
                system.state_table(),
                &settings,
                LabelSeed::Inherited(1),
            )
            .unwrap()
        })
    });

    let text: String = (0..settings.frames)
        .map(|frame| format!("{:.4} 1.5000\n", frame as f32 * 0.8))
        .collect();
    c.bench_function("parse_table_segment", |b| {
        b.iter(|| parse_table(black_box(&text)).unwrap())
    });
}

criterion_group!(benches, bench_track);
criterion_main!(benches);
