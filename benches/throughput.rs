use {
    criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput},
    rkscan::{window_hash, Config, Scanner},
};
const STREAM_LEN: usize = 1 << 20;
const WINDOW: usize = 16;
fn stream() -> Vec<u8> {
    let mut x = 0x9e37_79b9u32;
    (0..STREAM_LEN)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        })
        .collect()
}
fn scanner(bytes: &[u8], lanes: usize, chunk_windows: usize) -> Scanner {
    let config = Config::builder()
        .with_window_length(WINDOW)
        .with_target(window_hash(&bytes[1000..1000 + WINDOW], 31))
        .with_lane_count(lanes)
        .with_chunk_windows(chunk_windows)
        .build()
        .unwrap();
    Scanner::new(config)
}
fn lane_count(c: &mut Criterion) {
    let bytes = stream();
    let mut group = c.benchmark_group("lane_count");
    group.throughput(Throughput::Bytes(STREAM_LEN as u64));
    for lanes in [1, 2, 4, 8] {
        let scanner = scanner(&bytes, lanes, 32);
        group.bench_with_input(BenchmarkId::from_parameter(lanes), &lanes, |b, _lanes| {
            b.iter(|| scanner.count(&bytes[..]).unwrap());
        });
    }
    group.finish();
}
fn chunk_windows(c: &mut Criterion) {
    let bytes = stream();
    let mut group = c.benchmark_group("chunk_windows");
    group.throughput(Throughput::Bytes(STREAM_LEN as u64));
    for chunk_windows in [1, 8, 32, 256] {
        let scanner = scanner(&bytes, 2, chunk_windows);
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_windows),
            &chunk_windows,
            |b, _chunk_windows| {
                b.iter(|| scanner.count(&bytes[..]).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, lane_count, chunk_windows,);
criterion_main!(benches);
