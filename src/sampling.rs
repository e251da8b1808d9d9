//! Rejection sampling of sector interior points.
//!
//! Each sector gets a fixed budget of uniform draws inside its box;
//! draws landing outside the solid volume are discarded. Empty result
//! sets are a normal outcome for sectors outside the mesh (exterior
//! sky) or buried in wall matter. Sectors run in parallel, each on its
//! own PRNG stream, so the accepted sets are deterministic for a given
//! seed.

use log::debug;
use nalgebra::Point3;
use rayon::prelude::*;

use crate::mesh::StaticMesh;
use crate::prng::Pcg32;
use crate::types::{BuildParams, SectorMetrics};

/// Uniform draw inside the sector box, Z drawn downward per the
/// grid's sign convention.
fn random_point_in_sector(
    metrics: &SectorMetrics,
    origin: &Point3<f32>,
    rng: &mut Pcg32,
) -> Point3<f32> {
    Point3::new(
        origin.x + rng.next_float() * metrics.sector_size[0],
        origin.y + rng.next_float() * metrics.sector_size[1],
        origin.z - rng.next_float() * metrics.sector_size[2],
    )
}

/// Accepted interior points for one sector, in insertion order.
pub fn sample_sector(
    metrics: &SectorMetrics,
    origin: &Point3<f32>,
    mesh: &StaticMesh,
    rng: &mut Pcg32,
    attempts: u32,
) -> Vec<Point3<f32>> {
    let mut points = Vec::new();
    for _ in 0..attempts {
        let point = random_point_in_sector(metrics, origin, rng);
        if mesh.point_in_volume(&point) {
            points.push(point);
        }
    }
    points
}

/// Sample every sector of the grid, indexed by flattened sector
/// index. Stream `i` of the build seed drives sector `i`, so the
/// result is independent of rayon's scheduling.
pub fn sample_all_sectors(params: &BuildParams, mesh: &StaticMesh) -> Vec<Vec<Point3<f32>>> {
    let metrics = &params.metrics;
    let sectors: Vec<(u32, Point3<f32>)> = metrics.sectors().collect();

    let sets: Vec<Vec<Point3<f32>>> = sectors
        .par_iter()
        .map(|&(index, origin)| {
            let mut rng = Pcg32::new(params.seed, index as u64);
            sample_sector(metrics, &origin, mesh, &mut rng, params.attempts_per_sector)
        })
        .collect();

    for (index, set) in sets.iter().enumerate() {
        if !set.is_empty() && (set.len() as u32) < params.min_points_per_sector {
            debug!(
                "sector {index}: thin sample set, {} of {} attempts accepted",
                set.len(),
                params.attempts_per_sector
            );
        }
    }
    sets
}
