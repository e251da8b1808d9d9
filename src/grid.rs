//! Sector grid enumeration and index math.
//!
//! Both the sampling phase and the pair phase walk the grid through
//! [`SectorMetrics::sectors`], which guarantees identical indexing
//! between phases: outer axis X, then Y, then Z, with the flattened
//! index `x * (count_y * count_z) + y * count_z + z`.

use nalgebra::Point3;

use crate::types::SectorMetrics;

impl SectorMetrics {
    /// Number of sectors in the grid.
    pub fn sector_total(&self) -> u32 {
        self.sector_count[0] * self.sector_count[1] * self.sector_count[2]
    }

    /// Flattened index of the sector at (x, y, z).
    pub fn flatten_index(&self, x: u32, y: u32, z: u32) -> u32 {
        x * (self.sector_count[1] * self.sector_count[2]) + y * self.sector_count[2] + z
    }

    /// Grid coordinate of a flattened index.
    pub fn unflatten_index(&self, index: u32) -> [u32; 3] {
        let cy = self.sector_count[1];
        let cz = self.sector_count[2];
        [index / (cy * cz), (index / cz) % cy, index % cz]
    }

    /// World-space corner of the sector at (x, y, z). Increasing
    /// sector-Z index moves in the negative world-Z direction.
    pub fn sector_origin(&self, x: u32, y: u32, z: u32) -> Point3<f32> {
        Point3::new(
            self.root_origin[0] + x as f32 * self.sector_size[0],
            self.root_origin[1] + y as f32 * self.sector_size[1],
            self.root_origin[2] - z as f32 * self.sector_size[2],
        )
    }

    /// World-space center of the sector with the given flattened
    /// index; the pair pre-filter measures distances between centers.
    pub fn sector_center(&self, index: u32) -> Point3<f32> {
        let [x, y, z] = self.unflatten_index(index);
        let origin = self.sector_origin(x, y, z);
        Point3::new(
            origin.x + self.sector_size[0] * 0.5,
            origin.y + self.sector_size[1] * 0.5,
            origin.z - self.sector_size[2] * 0.5,
        )
    }

    /// Enumerate every sector exactly once as (flattened index,
    /// world-space origin), in fixed traversal order.
    pub fn sectors(&self) -> SectorIter<'_> {
        SectorIter {
            metrics: self,
            next: 0,
            total: self.sector_total(),
        }
    }
}

pub struct SectorIter<'a> {
    metrics: &'a SectorMetrics,
    next: u32,
    total: u32,
}

impl Iterator for SectorIter<'_> {
    type Item = (u32, Point3<f32>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let [x, y, z] = self.metrics.unflatten_index(index);
        Some((index, self.metrics.sector_origin(x, y, z)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SectorIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> SectorMetrics {
        SectorMetrics {
            sector_count: [5, 2, 5],
            sector_size: [4.0, 4.0, 4.0],
            root_origin: [-10.0, 0.0, 10.0],
        }
    }

    #[test]
    fn flatten_round_trip() {
        let m = metrics();
        for x in 0..m.sector_count[0] {
            for y in 0..m.sector_count[1] {
                for z in 0..m.sector_count[2] {
                    let idx = m.flatten_index(x, y, z);
                    assert_eq!(m.unflatten_index(idx), [x, y, z]);
                }
            }
        }
    }

    #[test]
    fn traversal_order_is_x_outer_z_inner() {
        let m = metrics();
        let indexes: Vec<u32> = m.sectors().map(|(i, _)| i).collect();
        assert_eq!(indexes.len(), 50);
        // Sequential flattened indexes == x-outer, y, z-inner order.
        assert_eq!(indexes, (0..50).collect::<Vec<u32>>());
        assert_eq!(m.flatten_index(0, 0, 1), 1);
        assert_eq!(m.flatten_index(0, 1, 0), 5);
        assert_eq!(m.flatten_index(1, 0, 0), 10);
    }

    #[test]
    fn origins_follow_negative_z_convention() {
        let m = metrics();
        assert_eq!(m.sector_origin(0, 0, 0), Point3::new(-10.0, 0.0, 10.0));
        assert_eq!(m.sector_origin(1, 0, 0), Point3::new(-6.0, 0.0, 10.0));
        assert_eq!(m.sector_origin(0, 1, 0), Point3::new(-10.0, 4.0, 10.0));
        assert_eq!(m.sector_origin(0, 0, 1), Point3::new(-10.0, 0.0, 6.0));
    }

    #[test]
    fn sectors_tile_without_gaps_or_overlaps() {
        let m = metrics();
        // Componentwise, cell [k] must span exactly [k*size, (k+1)*size]
        // from the root, so adjacent cells share a boundary and the
        // union covers root..root + count*size (negated on Z).
        for (index, origin) in m.sectors() {
            let [x, y, z] = m.unflatten_index(index);
            assert_eq!(origin.x, m.root_origin[0] + x as f32 * m.sector_size[0]);
            assert_eq!(origin.y, m.root_origin[1] + y as f32 * m.sector_size[1]);
            assert_eq!(origin.z, m.root_origin[2] - z as f32 * m.sector_size[2]);
        }
        let last = m.sector_origin(4, 1, 4);
        assert_eq!(last.x + m.sector_size[0], 10.0);
        assert_eq!(last.y + m.sector_size[1], 8.0);
        assert_eq!(last.z - m.sector_size[2], -10.0);
    }

    #[test]
    fn sector_center_is_box_midpoint() {
        let m = metrics();
        let c = m.sector_center(0);
        assert_eq!(c, Point3::new(-8.0, 2.0, 8.0));
    }

    #[test]
    fn empty_grid_enumerates_nothing() {
        let m = SectorMetrics {
            sector_count: [0, 2, 5],
            sector_size: [4.0, 4.0, 4.0],
            root_origin: [0.0, 0.0, 0.0],
        };
        assert_eq!(m.sector_total(), 0);
        assert_eq!(m.sectors().count(), 0);
    }
}
