//! Visibility graph construction.
//!
//! Orchestrates the whole offline build: collision-face
//! precomputation, per-sector interior sampling, then the pairwise
//! line-of-sight pass over every ordered pair of distinct sectors.
//! The pair pass dominates cost — (sector count)² × line tests in the
//! worst case — and parallelizes per sector-A row: each row owns its
//! output list, so the merge into the final `SectorSet` is
//! contention-free.

use log::info;
use nalgebra::Point3;
use rayon::prelude::*;

use crate::los::line_occluded;
use crate::mesh::{CollisionLine, StaticMesh};
use crate::sampling::sample_all_sectors;
use crate::types::{BuildParams, Sector, SectorSet};

/// Decide one ordered sector pair from its sample sets.
///
/// Conservative all-or-nothing: one occluded sample pair vetoes the
/// sector pair outright, one unoccluded pair proves it visible. Both
/// rules short-circuit, so the first testable sample pair settles the
/// question; a sector with no accepted samples can prove nothing and
/// the pair stays invisible. Both orderings of a pair test the same
/// segment, so the built relation comes out symmetric.
fn sector_pair_visible(
    a_points: &[Point3<f32>],
    b_points: &[Point3<f32>],
    mesh: &StaticMesh,
) -> bool {
    match (a_points.first(), b_points.first()) {
        (Some(p), Some(q)) => !line_occluded(&CollisionLine::between(*p, *q), mesh),
        _ => false,
    }
}

/// Close the relation under symmetry: wherever row A lists B, make
/// row B list A.
pub(crate) fn symmetrize(rows: &mut [Vec<u32>]) {
    let edges: Vec<(u32, u32)> = rows
        .iter()
        .enumerate()
        .flat_map(|(a, row)| row.iter().map(move |&b| (a as u32, b)))
        .collect();
    for (a, b) in edges {
        let back = &mut rows[b as usize];
        if !back.contains(&a) {
            back.push(a);
        }
    }
}

/// Run the full offline build and return the persistable `SectorSet`.
///
/// Invokes [`StaticMesh::build_collision_faces`] itself (idempotent),
/// so callers only need a mesh with vertices and indices loaded. A
/// mesh with zero collision faces is accepted and yields the
/// trivially-empty graph; a grid that misses the mesh yields empty
/// sample sets and likewise an empty graph. Neither is an error.
pub fn build_sector_set(params: &BuildParams, mesh: &mut StaticMesh) -> SectorSet {
    mesh.build_collision_faces();
    info!(
        "visibility build: {} sectors, {} collision faces",
        params.metrics.sector_total(),
        mesh.face_count()
    );

    let points_by_sector = sample_all_sectors(params, mesh);
    let populated = points_by_sector.iter().filter(|s| !s.is_empty()).count();
    info!(
        "sampling complete: {populated} of {} sectors hold interior points",
        points_by_sector.len()
    );

    let metrics = params.metrics;
    let total = metrics.sector_total() as usize;
    let centers: Vec<Point3<f32>> = (0..total).map(|i| metrics.sector_center(i as u32)).collect();
    let mesh = &*mesh;

    let mut rows: Vec<Vec<u32>> = (0..total)
        .into_par_iter()
        .map(|a| {
            let mut row = Vec::new();
            for b in 0..total {
                if a == b {
                    continue;
                }
                if let Some(cutoff) = params.max_pair_distance {
                    if (centers[a] - centers[b]).norm() > cutoff {
                        continue;
                    }
                }
                if sector_pair_visible(&points_by_sector[a], &points_by_sector[b], mesh) {
                    row.push(b as u32);
                }
            }
            row
        })
        .collect();

    if params.symmetrize {
        symmetrize(&mut rows);
    }
    for row in &mut rows {
        row.sort_unstable();
        row.dedup();
    }

    let edge_count: usize = rows.iter().map(Vec::len).sum();
    info!("pair phase complete: {edge_count} visible sector pairs");

    let sectors = metrics
        .sectors()
        .zip(rows)
        .map(|((_, origin), visible_sector_indexes)| Sector {
            origin: [origin.x, origin.y, origin.z],
            visible_sector_indexes,
        })
        .collect();

    SectorSet { metrics, sectors }
}
