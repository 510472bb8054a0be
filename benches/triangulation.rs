//! Benchmarks for triangulation and Voronoi construction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use dualmesh::io::write_diagram;
use dualmesh::{triangulate, voronoi, Site};
use std::collections::HashSet;

/// Generates distinct random integer sites in a square of side `extent`.
fn generate_random_sites(count: usize, extent: u64, seed: u64) -> Vec<Site> {
    let mut sites = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(count);
    let mut state = seed;

    while sites.len() < count {
        // xorshift for deterministic random
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let x = (state % extent) as i64;

        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let y = (state % extent) as i64;

        if seen.insert((x, y)) {
            sites.push(Site::new(sites.len() as u32 + 1, x, y));
        }
    }

    sites
}

fn bench_triangulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate");

    for size in [50, 200, 500] {
        let sites = generate_random_sites(size, 10_000, 12345);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &sites, |b, sites| {
            b.iter(|| triangulate(black_box(sites)))
        });
    }

    group.finish();
}

fn bench_voronoi(c: &mut Criterion) {
    let mut group = c.benchmark_group("voronoi");

    for size in [50, 200, 500] {
        let sites = generate_random_sites(size, 10_000, 67890);
        let Ok(tri) = triangulate(&sites) else {
            continue;
        };
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tri, |b, tri| {
            b.iter(|| voronoi(black_box(tri)))
        });
    }

    group.finish();
}

fn bench_write_diagram(c: &mut Criterion) {
    let sites = generate_random_sites(200, 10_000, 424242);
    let Ok(diagram) = triangulate(&sites).and_then(|tri| voronoi(&tri)) else {
        return;
    };

    c.bench_function("write_diagram_200", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(64 * 1024);
            write_diagram(&mut out, black_box(&diagram)).map(|_| out.len())
        })
    });
}

criterion_group!(benches, bench_triangulate, bench_voronoi, bench_write_diagram);
criterion_main!(benches);
