//! Measures how far an interpolator deviates from the stored samples.

use pixelcontrib_core::{ContributionMap, ContributionMapSet, GridIndex, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::interpolator::AngleInterpolator;

/// Error statistics of one error map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
    pub camera_angle: f32,
    pub max_error: f32,
    pub mean_error: f32,
}

/// Absolute difference between the interpolated and the stored value for
/// every cell of every map.
///
/// The result has one map per input map with the same size and angle. Maps
/// are evaluated in parallel; the first interpolator error is returned.
pub fn compute_error<I>(interpolator: &I, maps: &ContributionMapSet) -> Result<ContributionMapSet>
where
    I: AngleInterpolator + ?Sized,
{
    let error_maps = maps
        .maps()
        .par_iter()
        .map(|map| error_map(interpolator, map))
        .collect::<Result<Vec<_>>>()?;

    let errors = ContributionMapSet::new(error_maps);
    for summary in summarize_error(&errors) {
        log::info!(
            "{} error at {:.2} deg: max={:.6}, mean={:.6}",
            interpolator.name(),
            summary.camera_angle.to_degrees(),
            summary.max_error,
            summary.mean_error
        );
    }

    Ok(errors)
}

fn error_map<I>(interpolator: &I, map: &ContributionMap) -> Result<ContributionMap>
where
    I: AngleInterpolator + ?Sized,
{
    let size = map.map_size();
    let angle = map.camera_angle();

    let values = map
        .values()
        .iter()
        .enumerate()
        .map(|(i, &stored)| {
            let position = GridIndex::new(i % size, i / size);
            Ok((interpolator.interpolate(angle, position)? - stored).abs())
        })
        .collect::<Result<Vec<f32>>>()?;

    ContributionMap::new(map.descriptor(), values)
}

/// Maximum and mean of each map in an error set.
pub fn summarize_error(errors: &ContributionMapSet) -> Vec<ErrorSummary> {
    errors
        .iter()
        .map(|map| {
            let values = map.values();
            let max_error = values.iter().fold(0f32, |a, &b| a.max(b));
            let sum: f64 = values.iter().map(|&v| v as f64).sum();

            ErrorSummary {
                camera_angle: map.camera_angle(),
                max_error,
                mean_error: (sum / values.len() as f64) as f32,
            }
        })
        .collect()
}
