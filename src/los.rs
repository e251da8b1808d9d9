//! Line-of-sight occlusion testing.
//!
//! Conservative on purpose: any intersecting face anywhere along the
//! segment blocks line of sight, front side or back. This only gates
//! a coarse precomputation, so no transparency or two-sided material
//! awareness applies. Cost is linear in the face count; the build is
//! offline and one-shot, so no acceleration structure beyond the
//! per-chunk bounds check.

use crate::mesh::{intersect_line_face, CollisionLine, FaceIntersection, StaticMesh};

/// True if any collision face of any chunk intersects the segment.
/// Short-circuits on the first hit; chunks whose bounds the segment
/// cannot touch are skipped outright.
pub fn line_occluded(line: &CollisionLine, mesh: &StaticMesh) -> bool {
    for chunk in &mesh.chunks {
        if let Some(aabb) = &chunk.aabb {
            if !aabb.touches_segment(line) {
                continue;
            }
        }
        for face in &chunk.collision_faces {
            if intersect_line_face(line, face) != FaceIntersection::None {
                return true;
            }
        }
    }
    false
}
