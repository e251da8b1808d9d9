//! Offline sector-to-sector visibility precomputation.
//!
//! Partitions world space into a fixed grid of axis-aligned sectors,
//! rejection-samples points interior to the static world mesh per
//! sector, and line-of-sight tests sample pairs across sectors to
//! emit a per-sector potentially-visible-set graph. The runtime
//! culling system consumes the persisted [`SectorSet`] uncritically;
//! the build runs once, offline, from finalized geometry.
//!
//! ```
//! use nalgebra::Point3;
//! use sectorvis::{build_sector_set, BuildParams, SectorMetrics};
//! use sectorvis::mesh::{box_shell, StaticMesh};
//!
//! let mut mesh = StaticMesh::from_chunks(vec![box_shell(
//!     Point3::new(-1.0, -1.0, -9.0),
//!     Point3::new(9.0, 5.0, 1.0),
//! )]);
//! let params = BuildParams::new(SectorMetrics {
//!     sector_count: [2, 1, 2],
//!     sector_size: [4.0, 4.0, 4.0],
//!     root_origin: [0.0, 0.0, 0.0],
//! });
//! let set = build_sector_set(&params, &mut mesh);
//! let json = set.to_json().unwrap();
//! # assert!(!json.is_empty());
//! ```

pub mod builder;
pub mod grid;
pub mod los;
pub mod mesh;
pub mod prng;
pub mod sampling;
pub mod types;

pub use builder::build_sector_set;
pub use types::{BuildParams, Sector, SectorMetrics, SectorSet};
