//! Data types for the sector visibility build.
//!
//! Every persisted struct derives Serialize + Deserialize so the
//! finished `SectorSet` can round-trip through the JSON artifact the
//! runtime visibility manager loads.

use serde::{Deserialize, Serialize};

/// Grid geometry: how world space is partitioned into sectors.
///
/// Immutable once configured; the sector boxes tile the volume
/// `[root_origin, root_origin + sector_count * sector_size]`
/// componentwise, with the Z axis running in the negative world-Z
/// direction as the sector-Z index increases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorMetrics {
    /// Sectors per axis.
    pub sector_count: [u32; 3],
    /// World units per sector edge, per axis.
    pub sector_size: [f32; 3],
    /// World position of sector (0, 0, 0)'s corner.
    pub root_origin: [f32; 3],
}

/// One cell of the visibility partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    /// World-space corner of the cell.
    pub origin: [f32; 3],
    /// Flattened indices of the sectors this one can see. Sorted and
    /// duplicate-free; never contains the sector's own index
    /// (self-visibility is implicit at runtime).
    pub visible_sector_indexes: Vec<u32>,
}

/// The build artifact: metrics plus one `Sector` per flattened index.
///
/// Built once, offline, from a finalized static mesh; immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSet {
    pub metrics: SectorMetrics,
    pub sectors: Vec<Sector>,
}

impl SectorSet {
    /// Serialize for persistence.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load a previously persisted set.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn default_attempts_per_sector() -> u32 {
    1000
}

fn default_min_points_per_sector() -> u32 {
    1
}

/// Build-time configuration. Everything here is fixed for the
/// duration of a build; nothing is runtime-mutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildParams {
    pub metrics: SectorMetrics,
    /// Random draws attempted per sector. The accepted set is usually
    /// smaller and may legitimately be empty.
    #[serde(default = "default_attempts_per_sector")]
    pub attempts_per_sector: u32,
    /// Sectors accepting fewer points than this (but more than zero)
    /// are reported in the log. Diagnostic only; a thin or empty
    /// sample set never fails the build.
    #[serde(default = "default_min_points_per_sector")]
    pub min_points_per_sector: u32,
    /// PRNG seed. The same seed reproduces the same `SectorSet` bit
    /// for bit, independent of worker scheduling.
    #[serde(default)]
    pub seed: u64,
    /// Close the visibility relation under symmetry (A sees B implies
    /// B sees A) before returning. With the current single-sample
    /// pair decision both directions already test the same segment,
    /// so this is an explicit guarantee rather than a behavior
    /// change; it only alters output under a pair policy that tests
    /// more than one sample pair.
    #[serde(default)]
    pub symmetrize: bool,
    /// Skip sector pairs whose centers are further apart than this,
    /// before any sample testing. `None` tests every pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pair_distance: Option<f32>,
}

impl BuildParams {
    /// Params with the default sampling budget for the given grid.
    pub fn new(metrics: SectorMetrics) -> Self {
        BuildParams {
            metrics,
            attempts_per_sector: default_attempts_per_sector(),
            min_points_per_sector: default_min_points_per_sector(),
            seed: 0,
            symmetrize: false,
            max_pair_distance: None,
        }
    }
}
