//! Criterion benchmarks for the sector visibility build.
//!
//! Run with: `cargo bench`; `RUST_LOG=info cargo bench` also prints
//! the build's phase logs.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point3;
use sectorvis::mesh::{box_shell, StaticMesh};
use sectorvis::{build_sector_set, BuildParams, SectorMetrics};

/// One enclosing hall with a row of interior pillar boxes: every
/// sector samples successfully and most long pairs get vetoed by a
/// pillar, which is the shape of a real build.
fn pillared_hall() -> StaticMesh {
    let mut chunks = vec![box_shell(
        Point3::new(-1.0, -1.0, -21.0),
        Point3::new(21.0, 5.0, 1.0),
    )];
    for i in 0..4 {
        let x = 4.0 + i as f32 * 4.0;
        chunks.push(box_shell(
            Point3::new(x, -1.0, -14.0),
            Point3::new(x + 1.0, 5.0, -6.0),
        ));
    }
    StaticMesh::from_chunks(chunks)
}

fn hall_params(attempts: u32) -> BuildParams {
    let mut params = BuildParams::new(SectorMetrics {
        sector_count: [5, 1, 5],
        sector_size: [4.0, 4.0, 4.0],
        root_origin: [0.0, 0.0, 0.0],
    });
    params.attempts_per_sector = attempts;
    params.seed = 42;
    params
}

fn bench_build(c: &mut Criterion) {
    let _ = env_logger::try_init();
    c.bench_function("build_5x1x5_100_attempts", |b| {
        let params = hall_params(100);
        b.iter(|| {
            let mut mesh = pillared_hall();
            build_sector_set(&params, &mut mesh)
        });
    });

    c.bench_function("build_5x1x5_1000_attempts", |b| {
        let params = hall_params(1000);
        b.iter(|| {
            let mut mesh = pillared_hall();
            build_sector_set(&params, &mut mesh)
        });
    });
}

fn bench_sampling_only(c: &mut Criterion) {
    let _ = env_logger::try_init();
    c.bench_function("sample_all_sectors_5x1x5", |b| {
        let params = hall_params(1000);
        let mut mesh = pillared_hall();
        mesh.build_collision_faces();
        b.iter(|| sectorvis::sampling::sample_all_sectors(&params, &mesh));
    });
}

criterion_group!(benches, bench_build, bench_sampling_only);
criterion_main!(benches);
