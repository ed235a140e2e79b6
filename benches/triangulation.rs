use criterion::{Criterion, black_box, criterion_group, criterion_main};
use voroprism::{Ring, triangulate};

/// Regular n-gon centered on the origin.
fn regular_ring(n: usize) -> Ring {
    let mut vertices = Vec::with_capacity(n * 2);
    for i in 0..n {
        let angle = (i as f64 / n as f64) * std::f64::consts::TAU;
        vertices.push(100.0 * angle.cos());
        vertices.push(100.0 * angle.sin());
    }
    Ring::new(vertices).unwrap()
}

/// Comb-shaped ring: half the vertices are reflex, so the ear scan cannot
/// shortcut through convex-only geometry.
fn comb_ring(teeth: usize) -> Ring {
    let mut vertices = Vec::new();
    for i in 0..teeth {
        let x = i as f64 * 2.0;
        vertices.push(x);
        vertices.push(0.0);
        vertices.push(x + 1.0);
        vertices.push(10.0);
    }
    vertices.push(teeth as f64 * 2.0);
    vertices.push(-5.0);
    vertices.push(-1.0);
    vertices.push(-5.0);
    Ring::new(vertices).unwrap()
}

fn benchmark_triangulate_convex(c: &mut Criterion) {
    let ring = regular_ring(256);
    c.bench_function("triangulate_convex_256", |b| {
        b.iter(|| black_box(triangulate(black_box(&ring)).unwrap()))
    });
}

fn benchmark_triangulate_concave(c: &mut Criterion) {
    let ring = comb_ring(64);
    c.bench_function("triangulate_comb_64_teeth", |b| {
        b.iter(|| black_box(triangulate(black_box(&ring)).unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_triangulate_convex,
    benchmark_triangulate_concave
);
criterion_main!(benches);
