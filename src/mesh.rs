//! Static world mesh collision geometry.
//!
//! Render data is out of scope; this module carries only what the
//! visibility build consumes: per-chunk collision faces precomputed
//! from the triangle soup, segment-vs-face classification, and a
//! crossing-parity point-in-volume test against a point known to lie
//! outside all mesh extremities.

use nalgebra::{Point3, Vector3};

/// Distances below this are treated as on-plane / parallel.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Classification of a segment against a single collision face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceIntersection {
    None,
    /// Hit entering against the face normal.
    FrontSide,
    /// Hit leaving along the face normal.
    BackSide,
}

/// A triangular occluder with its plane and inward edge planes
/// precomputed by [`StaticMesh::build_collision_faces`].
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionFace {
    pub points: [Point3<f32>; 3],
    /// Unit plane normal, right-hand rule over the winding.
    pub normal: Vector3<f32>,
    /// Plane offset: `normal · p = offset` for p on the face.
    pub offset: f32,
    /// Inward-facing edge plane normals, one per edge.
    edge_normals: [Vector3<f32>; 3],
    /// Edge plane offsets matching `edge_normals`.
    edge_offsets: [f32; 3],
}

impl CollisionFace {
    /// Derive a face from three vertices. Degenerate (zero-area)
    /// triangles yield `None` and are dropped from the collision set.
    pub fn from_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Option<Self> {
        let cross = (b - a).cross(&(c - a));
        let len = cross.norm();
        if len <= PLANE_EPSILON {
            return None;
        }
        let normal = cross / len;
        let offset = normal.dot(&a.coords);

        let points = [a, b, c];
        let mut edge_normals = [Vector3::zeros(); 3];
        let mut edge_offsets = [0.0f32; 3];
        for i in 0..3 {
            let j = (i + 1) % 3;
            // normal × edge points into the triangle
            let inward = normal.cross(&(points[j] - points[i]));
            edge_normals[i] = inward;
            edge_offsets[i] = inward.dot(&points[i].coords);
        }

        Some(CollisionFace {
            points,
            normal,
            offset,
            edge_normals,
            edge_offsets,
        })
    }

    /// True if a point already on the face plane lies within the
    /// triangle, with `edge_eps` of slop outside the edges.
    fn contains_planar_point(&self, p: &Point3<f32>, edge_eps: f32) -> bool {
        for i in 0..3 {
            if self.edge_normals[i].dot(&p.coords) - self.edge_offsets[i] < -edge_eps {
                return false;
            }
        }
        true
    }
}

/// A line segment with the derived fields the intersection test
/// needs. Transient: rebuilt per test, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct CollisionLine {
    pub from: Point3<f32>,
    pub to: Point3<f32>,
    /// Unit direction from `from` to `to`; zero if the segment is
    /// degenerate.
    pub direction: Vector3<f32>,
    pub length: f32,
}

impl CollisionLine {
    pub fn between(from: Point3<f32>, to: Point3<f32>) -> Self {
        let delta = to - from;
        let length = delta.norm();
        let direction = if length > PLANE_EPSILON {
            delta / length
        } else {
            Vector3::zeros()
        };
        CollisionLine {
            from,
            to,
            direction,
            length,
        }
    }
}

fn classify_with_edge_eps(
    line: &CollisionLine,
    face: &CollisionFace,
    edge_eps: f32,
) -> FaceIntersection {
    let denom = face.normal.dot(&line.direction);
    if denom.abs() < PLANE_EPSILON {
        return FaceIntersection::None;
    }
    let t = (face.offset - face.normal.dot(&line.from.coords)) / denom;
    if t < 0.0 || t > line.length {
        return FaceIntersection::None;
    }
    let hit = line.from + line.direction * t;
    if !face.contains_planar_point(&hit, edge_eps) {
        return FaceIntersection::None;
    }
    if denom < 0.0 {
        FaceIntersection::FrontSide
    } else {
        FaceIntersection::BackSide
    }
}

/// Classify a segment against one face.
///
/// `FrontSide` means the segment pierces the face against its normal,
/// `BackSide` along it. Segments parallel to the face plane (including
/// coplanar ones) never intersect. Edges are inclusive with a small
/// tolerance: a grazing hit still counts for occlusion.
pub fn intersect_line_face(line: &CollisionLine, face: &CollisionFace) -> FaceIntersection {
    classify_with_edge_eps(line, face, PLANE_EPSILON)
}

/// Axis-aligned bounding box of one chunk's collision faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f32>>) -> Option<Self> {
        let mut min = Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);
        let mut any = false;
        for p in points {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
            any = true;
        }
        any.then_some(Aabb { min, max })
    }

    /// Slab test: can the segment touch this box at all? Purely a
    /// pruning check; a `true` from a box containing no intersecting
    /// face is harmless.
    pub fn touches_segment(&self, line: &CollisionLine) -> bool {
        let mut t_min = 0.0f32;
        let mut t_max = line.length;
        for axis in 0..3 {
            let d = line.direction[axis];
            let o = line.from[axis];
            if d.abs() < PLANE_EPSILON {
                if o < self.min[axis] - PLANE_EPSILON || o > self.max[axis] + PLANE_EPSILON {
                    return false;
                }
            } else {
                let inv = 1.0 / d;
                let mut t0 = (self.min[axis] - o) * inv;
                let mut t1 = (self.max[axis] - o) * inv;
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }
                t_min = t_min.max(t0);
                t_max = t_max.min(t1);
                if t_min > t_max {
                    return false;
                }
            }
        }
        true
    }
}

/// One geometry chunk of the world static mesh. `collision_faces` and
/// `aabb` are empty until [`StaticMesh::build_collision_faces`] runs.
#[derive(Debug, Clone, Default)]
pub struct MeshChunk {
    pub vertices: Vec<Point3<f32>>,
    /// Triangle list, three vertex indices per face.
    pub indices: Vec<[u32; 3]>,
    pub collision_faces: Vec<CollisionFace>,
    pub aabb: Option<Aabb>,
}

impl MeshChunk {
    pub fn new(vertices: Vec<Point3<f32>>, indices: Vec<[u32; 3]>) -> Self {
        MeshChunk {
            vertices,
            indices,
            collision_faces: Vec::new(),
            aabb: None,
        }
    }
}

/// The static world mesh, reduced to its collision geometry. Read-only
/// for the duration of a build once the faces are precomputed.
#[derive(Debug, Clone, Default)]
pub struct StaticMesh {
    pub chunks: Vec<MeshChunk>,
    /// A point strictly outside every chunk's extremities, anchor of
    /// the crossing-parity volume test. Set by
    /// [`StaticMesh::build_collision_faces`].
    pub outside_point: Option<Point3<f32>>,
}

impl StaticMesh {
    pub fn from_chunks(chunks: Vec<MeshChunk>) -> Self {
        StaticMesh {
            chunks,
            outside_point: None,
        }
    }

    /// Precompute per-chunk collision faces, chunk bounds, and the
    /// outside anchor point. Derived purely from vertices and indices,
    /// so repeated invocations yield the identical face set.
    pub fn build_collision_faces(&mut self) {
        let mut mesh_max = Point3::new(0.0f32, 0.0, 0.0);
        for chunk in &mut self.chunks {
            chunk.collision_faces.clear();
            for tri in &chunk.indices {
                let a = chunk.vertices[tri[0] as usize];
                let b = chunk.vertices[tri[1] as usize];
                let c = chunk.vertices[tri[2] as usize];
                if let Some(face) = CollisionFace::from_points(a, b, c) {
                    chunk.collision_faces.push(face);
                }
            }
            chunk.aabb = Aabb::from_points(chunk.vertices.iter());
            if let Some(aabb) = &chunk.aabb {
                for axis in 0..3 {
                    mesh_max[axis] = mesh_max[axis].max(aabb.max[axis]);
                }
            }
        }
        // Skewed offsets keep the parity segment off axis-aligned
        // face edges.
        self.outside_point = Some(Point3::new(
            mesh_max.x + 1.31,
            mesh_max.y + 2.17,
            mesh_max.z + 3.57,
        ));
    }

    /// Total collision faces across all chunks.
    pub fn face_count(&self) -> usize {
        self.chunks.iter().map(|c| c.collision_faces.len()).sum()
    }

    /// True iff the point lies strictly inside the closed solid the
    /// collision geometry encloses: a segment from the point to the
    /// outside anchor crosses the mesh surface an odd number of times.
    /// Well-defined for points arbitrarily far outside the bounds (the
    /// segment then crosses nothing, or an even number of faces).
    pub fn point_in_volume(&self, point: &Point3<f32>) -> bool {
        let Some(outside) = self.outside_point else {
            return false;
        };
        let line = CollisionLine::between(*point, outside);
        let mut crossings = 0usize;
        for chunk in &self.chunks {
            if let Some(aabb) = &chunk.aabb {
                if !aabb.touches_segment(&line) {
                    continue;
                }
            }
            for face in &chunk.collision_faces {
                // Exact edges here: the occlusion tolerance would
                // double-count a crossing that grazes an edge shared
                // by two faces, flipping the parity.
                if classify_with_edge_eps(&line, face, 0.0) != FaceIntersection::None {
                    crossings += 1;
                }
            }
        }
        crossings % 2 == 1
    }
}

/// Watertight box shell (12 triangles, outward winding). The smallest
/// useful world mesh: a single room whose interior is the solid
/// volume.
pub fn box_shell(min: Point3<f32>, max: Point3<f32>) -> MeshChunk {
    let v = vec![
        Point3::new(min.x, min.y, min.z), // 0
        Point3::new(max.x, min.y, min.z), // 1
        Point3::new(max.x, max.y, min.z), // 2
        Point3::new(min.x, max.y, min.z), // 3
        Point3::new(min.x, min.y, max.z), // 4
        Point3::new(max.x, min.y, max.z), // 5
        Point3::new(max.x, max.y, max.z), // 6
        Point3::new(min.x, max.y, max.z), // 7
    ];
    let indices = vec![
        // -Z
        [0, 2, 1],
        [0, 3, 2],
        // +Z
        [4, 5, 6],
        [4, 6, 7],
        // -X
        [0, 4, 7],
        [0, 7, 3],
        // +X
        [1, 2, 6],
        [1, 6, 5],
        // -Y
        [0, 1, 5],
        [0, 5, 4],
        // +Y
        [3, 7, 6],
        [3, 6, 2],
    ];
    MeshChunk::new(v, indices)
}
