//! Conversion between view directions and cells of a square contribution grid.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::{octahedron, ContribError, Result};

/// Cell of a `map_size × map_size` grid. `u` is the column, `v` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridIndex {
    pub u: usize,
    pub v: usize,
}

impl GridIndex {
    pub fn new(u: usize, v: usize) -> Self {
        Self { u, v }
    }

    /// Offset of this cell in a row-major grid of the given size.
    pub fn linear(&self, map_size: usize) -> Result<usize> {
        self.check_bounds(map_size)?;
        Ok(self.v * map_size + self.u)
    }

    /// Inverse of [`GridIndex::linear`].
    pub fn from_linear(index: usize, map_size: usize) -> Result<Self> {
        let num_values = map_size * map_size;
        if index >= num_values {
            return Err(ContribError::range("grid offset", index, num_values));
        }
        Ok(Self::new(index % map_size, index / map_size))
    }

    pub fn check_bounds(&self, map_size: usize) -> Result<()> {
        if self.u >= map_size {
            return Err(ContribError::range("grid column", self.u, map_size));
        }
        if self.v >= map_size {
            return Err(ContribError::range("grid row", self.v, map_size));
        }
        Ok(())
    }
}

/// Returns the grid cell whose center is closest to the encoded direction.
pub fn index_from_direction(direction: DVec3, map_size: usize) -> Result<GridIndex> {
    if map_size == 0 {
        return Err(ContribError::InvalidInput("map size must be positive".into()));
    }

    let uv = octahedron::encode(direction)? * map_size as f64 - DVec2::splat(0.5);

    // Clamp before the cast so that -0.5 rounding away from zero stays in range
    let max = (map_size - 1) as f64;
    let u = uv.x.round().clamp(0.0, max) as usize;
    let v = uv.y.round().clamp(0.0, max) as usize;

    Ok(GridIndex::new(u, v))
}

/// Returns the direction through the center of the given grid cell.
pub fn direction_from_index(index: GridIndex, map_size: usize) -> Result<DVec3> {
    index.check_bounds(map_size)?;

    let uv = (DVec2::new(index.u as f64, index.v as f64) + DVec2::splat(0.5)) / map_size as f64;
    Ok(octahedron::decode(uv))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_direction_roundtrip() {
        let map_sizes = [16, 32, 64, 128, 256, 512, 1024];

        for map_size in map_sizes {
            for v in 0..map_size {
                for u in 0..map_size {
                    let index = GridIndex::new(u, v);
                    let dir = direction_from_index(index, map_size).unwrap();
                    assert_eq!(index_from_direction(dir, map_size).unwrap(), index);
                }
            }
        }
    }

    #[test]
    fn test_direction_from_index_out_of_range() {
        let err = direction_from_index(GridIndex::new(16, 0), 16).unwrap_err();
        assert!(matches!(err, ContribError::Range { what: "grid column", .. }));

        let err = direction_from_index(GridIndex::new(0, 20), 16).unwrap_err();
        assert!(matches!(err, ContribError::Range { index: 20, limit: 16, .. }));
    }

    #[test]
    fn test_index_from_direction_clamps_to_grid() {
        // The lower pole encodes to the far corner, exactly on the grid border
        let index = index_from_direction(-DVec3::Z, 8).unwrap();
        assert_eq!(index, GridIndex::new(7, 7));

        let index = index_from_direction(DVec3::new(0.0, -1.0, 0.0), 8).unwrap();
        assert_eq!(index.v, 0);
    }

    #[test]
    fn test_index_from_direction_rejects_zero_size() {
        assert!(matches!(
            index_from_direction(DVec3::Z, 0),
            Err(ContribError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_linear_offset_is_row_major() {
        let index = GridIndex::new(3, 2);
        assert_eq!(index.linear(10).unwrap(), 23);
        assert_eq!(GridIndex::from_linear(23, 10).unwrap(), index);
        assert!(GridIndex::from_linear(100, 10).is_err());
    }

    #[test]
    fn test_grid_index_serialization_roundtrip() {
        let original = GridIndex::new(12, 34);

        let json = serde_json::to_string(&original).unwrap();
        let restored: GridIndex = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, original);
    }
}
