use pixelcontrib_core::{ContributionMapSet, DVec3, GridIndex, MapDescriptor, Result};

use crate::interpolator::{check_preconditions, AngleInterpolator};
use crate::sphere_interpolate::SphereEstimator;

struct AngleEntry<S> {
    descriptor: MapDescriptor,
    estimator: S,
}

/// One sphere estimator per stored camera angle.
///
/// Queries are answered only for angles that match a stored map exactly;
/// any other angle yields a contribution of 0. There is no blending across
/// angles.
pub struct PerAngle<S> {
    entries: Vec<AngleEntry<S>>,
    /// Largest map size in the set; bounds grid positions at unknown angles.
    max_map_size: usize,
}

impl<S: SphereEstimator> PerAngle<S> {
    pub fn new(maps: &ContributionMapSet) -> Result<Self> {
        check_preconditions(S::KIND, maps)?;

        let entries = maps
            .iter()
            .map(|map| -> Result<AngleEntry<S>> {
                Ok(AngleEntry {
                    descriptor: map.descriptor(),
                    estimator: S::from_map(map)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let max_map_size = maps.iter().map(|m| m.map_size()).max().unwrap_or(0);

        Ok(Self {
            entries,
            max_map_size,
        })
    }

    /// Camera angles with an estimator, in set order.
    pub fn angles(&self) -> impl Iterator<Item = f32> + '_ {
        self.entries.iter().map(|e| e.descriptor.camera_angle)
    }

    /// The estimator for exactly `angle`, if one was built.
    pub fn estimator(&self, angle: f32) -> Option<&S> {
        self.entry(angle).map(|e| &e.estimator)
    }

    fn entry(&self, angle: f32) -> Option<&AngleEntry<S>> {
        self.entries
            .iter()
            .find(|e| e.descriptor.camera_angle == angle)
    }
}

impl<S: SphereEstimator> AngleInterpolator for PerAngle<S> {
    fn name(&self) -> &'static str {
        S::KIND.config().display_name
    }

    fn interpolate(&self, angle: f32, position: GridIndex) -> Result<f32> {
        let Some(entry) = self.entry(angle) else {
            position.check_bounds(self.max_map_size)?;
            return Ok(0.0);
        };

        let direction = entry.descriptor.direction_from_index(position)?;
        entry.estimator.estimate(direction)
    }

    fn interpolate_direction(&self, angle: f32, direction: DVec3) -> Result<f32> {
        match self.entry(angle) {
            Some(entry) => entry.estimator.estimate(direction),
            None => Ok(0.0),
        }
    }
}
