//! Performance benchmarks for progress frame decoding
//!
//! Compares decoding a whole body at once against feeding it in network-sized chunks.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use analyst::sse::{decode_frames, FrameDecoder};

/// Generate a body of `frames` progress frames followed by a result frame
fn generate_body(frames: usize) -> String {
    let mut body: String = (0..frames)
        .map(|i| {
            format!(
                "data: {{\"progress\": {}, \"stage\": \"Searching source {} of {}\"}}\n\n",
                i * 100 / frames.max(1),
                i + 1,
                frames
            )
        })
        .collect();
    body.push_str(
        "data: {\"progress\": 100, \"stage\": \"Done\", \"result\": {\"summary\": \"Strong team and a large market.\", \"investment_score\": 8, \"sources\": [\"https://a.example\", \"https://b.example\"]}}\n\n",
    );
    body
}

/// Benchmark decoding a complete body in one call
fn bench_decode_whole_body(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_whole_body");

    for size in [1, 10, 100, 1000].iter() {
        let body = generate_body(*size);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_frames", size)),
            &body,
            |b, body| {
                b.iter(|| {
                    let decoded = decode_frames(black_box(body));
                    black_box(decoded)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the incremental decoder with small chunks, the worst case for re-scanning
fn bench_incremental_chunks(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_incremental");
    let body = generate_body(1000);
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [16, 256, 4096].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_byte_chunks", chunk_size)),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut decoder = FrameDecoder::new();
                    let mut events = 0;
                    for chunk in body.as_bytes().chunks(chunk_size) {
                        events += decoder.push_bytes(black_box(chunk)).len();
                    }
                    events += decoder.finish().len();
                    black_box(events)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decode_whole_body, bench_incremental_chunks);
criterion_main!(benches);
