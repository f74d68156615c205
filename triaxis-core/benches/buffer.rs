use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use triaxis_core::{CircularBuffer, Sample, StatisticsEngine};

fn push_and_average(c: &mut Criterion) {
    let mut group = c.benchmark_group("window");
    for capacity in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("push_average", capacity), &capacity, |b, &cap| {
            let mut buffer = CircularBuffer::with_capacity(cap).unwrap();
            let mut i = 0u32;
            b.iter(|| {
                i = i.wrapping_add(1);
                let v = (i % 200) as f32 / 100.0 - 1.0;
                buffer.push(Sample::new(v, -v, v * 0.5));
                black_box(buffer.windowed_average().unwrap())
            });
        });
    }
    group.finish();
}

fn record(c: &mut Criterion) {
    c.bench_function("statistics_record", |b| {
        let mut engine = StatisticsEngine::default();
        b.iter(|| engine.record(black_box(Sample::new(0.25, -0.5, 0.75))).unwrap());
    });
}

criterion_group!(benches, push_and_average, record);
criterion_main!(benches);
