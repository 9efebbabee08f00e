use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use std::sync::Arc;

use verdex::{
    MemorySegment, MemorySegmentBuilder, SegmentSnapshot, Version, VersionIndex, VersionResolver,
};

fn build_segment(doc_count: u64) -> Arc<MemorySegment> {
    let mut builder = MemorySegmentBuilder::new();
    for i in 0..doc_count {
        builder.append(format!("doc-{:012}", i).into_bytes(), Version::new(i + 1));
    }
    Arc::new(builder.build())
}

fn bench_index_build(c: &mut Criterion) {
    let counts = [1_000u64, 10_000, 100_000];

    let mut group = c.benchmark_group("index_build");
    for &count in &counts {
        let segment = build_segment(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &segment, |b, segment| {
            b.iter(|| {
                black_box(VersionIndex::build(segment.as_ref()).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_resolve_hit(c: &mut Criterion) {
    let counts = [1_000u64, 10_000, 100_000];

    let mut group = c.benchmark_group("resolve_hit");
    for &count in &counts {
        let segments = [SegmentSnapshot::new(build_segment(count), None)];
        let resolver = VersionResolver::new();
        let id = format!("doc-{:012}", count / 2).into_bytes();
        resolver.resolve(&id, &segments).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(count), &id, |b, id| {
            b.iter(|| {
                black_box(resolver.resolve(id, &segments).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_resolve_miss(c: &mut Criterion) {
    let counts = [1_000u64, 10_000, 100_000];

    let mut group = c.benchmark_group("resolve_miss");
    for &count in &counts {
        let segments = [SegmentSnapshot::new(build_segment(count), None)];
        let resolver = VersionResolver::new();
        let id = b"missing-identifier".to_vec();
        resolver.resolve(&id, &segments).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(count), &id, |b, id| {
            b.iter(|| {
                black_box(resolver.resolve(id, &segments).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_resolve_multi_segment(c: &mut Criterion) {
    let segment_counts = [2usize, 8, 32];
    let docs_per_segment = 10_000u64;

    let mut group = c.benchmark_group("resolve_multi_segment");
    for &segment_count in &segment_counts {
        let mut segments = Vec::with_capacity(segment_count);
        for s in 0..segment_count {
            let mut builder = MemorySegmentBuilder::new();
            for i in 0..docs_per_segment {
                builder.append(
                    format!("doc-{}-{:012}", s, i).into_bytes(),
                    Version::new(i + 1),
                );
            }
            segments.push(SegmentSnapshot::new(Arc::new(builder.build()), None));
        }

        // the probe lives in the oldest segment, every newer one must miss
        let id = format!("doc-{}-{:012}", segment_count - 1, 0).into_bytes();
        let resolver = VersionResolver::new();
        resolver.resolve(&id, &segments).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(segment_count),
            &id,
            |b, id| {
                b.iter(|| {
                    black_box(resolver.resolve(id, &segments).unwrap());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_index_build,
    bench_resolve_hit,
    bench_resolve_miss,
    bench_resolve_multi_segment
);
criterion_main!(benches);
