use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::grid_index::{self, GridIndex};
use crate::{ContribError, Result};

/// Size and camera angle of one contribution map.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct MapDescriptor {
    /// Width and height of the square grid.
    pub map_size: usize,
    /// Camera field of view in radians. 0 means orthographic.
    pub camera_angle: f32,
}

impl MapDescriptor {
    pub fn new(map_size: usize, camera_angle: f32) -> Self {
        Self {
            map_size,
            camera_angle,
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn num_values(&self) -> usize {
        self.map_size * self.map_size
    }

    pub fn index_from_direction(&self, direction: DVec3) -> Result<GridIndex> {
        grid_index::index_from_direction(direction, self.map_size)
    }

    pub fn direction_from_index(&self, index: GridIndex) -> Result<DVec3> {
        grid_index::direction_from_index(index, self.map_size)
    }

    pub fn linear_index(&self, index: GridIndex) -> Result<usize> {
        index.linear(self.map_size)
    }
}

/// Pixel contribution for every view direction at one camera angle.
///
/// Each cell of the square grid is a view direction under the octahedral
/// projection; its value is the fraction of the screen covered by the object
/// when viewed from that direction, in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct ContributionMap {
    descriptor: MapDescriptor,
    values: Vec<f32>,
}

impl ContributionMap {
    /// Creates a map from row-major values. The value count must be
    /// `map_size²` and the size must be positive.
    pub fn new(descriptor: MapDescriptor, values: Vec<f32>) -> Result<Self> {
        if descriptor.map_size == 0 {
            return Err(ContribError::InvalidInput("map size must be positive".into()));
        }
        if values.len() != descriptor.num_values() {
            return Err(ContribError::InvalidInput(format!(
                "expected {} values for a {}x{} map, got {}",
                descriptor.num_values(),
                descriptor.map_size,
                descriptor.map_size,
                values.len()
            )));
        }

        Ok(Self { descriptor, values })
    }

    /// Creates a map with every cell set to `value`.
    pub fn filled(descriptor: MapDescriptor, value: f32) -> Result<Self> {
        Self::new(descriptor, vec![value; descriptor.num_values()])
    }

    #[inline]
    pub fn descriptor(&self) -> MapDescriptor {
        self.descriptor
    }

    #[inline]
    pub fn map_size(&self) -> usize {
        self.descriptor.map_size
    }

    #[inline]
    pub fn camera_angle(&self) -> f32 {
        self.descriptor.camera_angle
    }

    /// Row-major cell values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn value_at_index(&self, index: GridIndex) -> Result<f32> {
        Ok(self.values[self.descriptor.linear_index(index)?])
    }

    /// Value at column `x`, row `y`.
    pub fn value_at(&self, x: usize, y: usize) -> Result<f32> {
        self.value_at_index(GridIndex::new(x, y))
    }

    /// Value of the cell the given camera direction falls into.
    pub fn value_for_direction(&self, direction: DVec3) -> Result<f32> {
        self.value_at_index(self.descriptor.index_from_direction(direction)?)
    }
}
