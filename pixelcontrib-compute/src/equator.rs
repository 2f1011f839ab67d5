//! Contribution values along the equator of a single map.

use std::f32::consts::{FRAC_PI_2, TAU};

use pixelcontrib_core::{ContributionMap, DVec3, Result};

fn equator_value(map: &ContributionMap, azimuth: f32) -> Result<f32> {
    let azimuth = azimuth as f64;
    map.value_for_direction(DVec3::new(azimuth.cos(), azimuth.sin(), 0.0))
}

/// Value of the cell hit by `(cos a, sin a, 0)` for each azimuth `a`.
pub fn equator_series(map: &ContributionMap, azimuths: &[f32]) -> Result<Vec<f32>> {
    azimuths.iter().map(|&a| equator_value(map, a)).collect()
}

/// Like [`equator_series`], but every value is a linear blend of the samples
/// at the enclosing quarter turns.
pub fn equator_series_linear(map: &ContributionMap, azimuths: &[f32]) -> Result<Vec<f32>> {
    azimuths
        .iter()
        .map(|&azimuth| {
            let prev = (azimuth / FRAC_PI_2).floor() * FRAC_PI_2;
            let next = (prev + FRAC_PI_2).clamp(0.0, TAU);

            let prev_value = equator_value(map, prev)?;
            if next == prev {
                return Ok(prev_value);
            }
            let next_value = equator_value(map, next)?;

            let t = (azimuth - prev) / (next - prev);
            Ok(prev_value * (1.0 - t) + next_value * t)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelcontrib_core::{GridIndex, MapDescriptor};
    use std::f32::consts::PI;

    /// Map whose value at each cell is the x component of its direction.
    fn x_map(size: usize) -> ContributionMap {
        let descriptor = MapDescriptor::new(size, 0.0);
        let values = (0..descriptor.num_values())
            .map(|i| {
                let dir = descriptor
                    .direction_from_index(GridIndex::new(i % size, i / size))
                    .unwrap();
                dir.x as f32
            })
            .collect();
        ContributionMap::new(descriptor, values).unwrap()
    }

    #[test]
    fn constant_map_gives_constant_series() {
        let map = ContributionMap::filled(MapDescriptor::new(16, 0.3), 0.4).unwrap();
        let azimuths = [0.0, 0.5, PI, 4.0, 6.0];

        assert_eq!(equator_series(&map, &azimuths).unwrap(), vec![0.4; 5]);
        for value in equator_series_linear(&map, &azimuths).unwrap() {
            assert!((value - 0.4).abs() < 1e-6);
        }
    }

    #[test]
    fn series_follows_the_map() {
        let map = x_map(128);
        let series = equator_series(&map, &[0.0, PI]).unwrap();

        // Cell centers sit slightly off the axis
        assert!(series[0] > 0.9);
        assert!(series[1] < -0.9);
    }

    #[test]
    fn linear_series_hits_quarter_turn_samples() {
        let map = x_map(64);
        let quarter_turns = [0.0, FRAC_PI_2, PI];

        let direct = equator_series(&map, &quarter_turns).unwrap();
        let linear = equator_series_linear(&map, &quarter_turns).unwrap();
        for (d, l) in direct.iter().zip(&linear) {
            assert!((d - l).abs() < 1e-5);
        }
    }

    #[test]
    fn linear_series_is_between_neighbours() {
        let map = x_map(64);
        let series = equator_series_linear(&map, &[FRAC_PI_2 / 2.0]).unwrap();
        let ends = equator_series(&map, &[0.0, FRAC_PI_2]).unwrap();

        let mid = (ends[0] + ends[1]) / 2.0;
        assert!((series[0] - mid).abs() < 1e-5);
    }

    #[test]
    fn full_turn_uses_the_start_sample() {
        let map = x_map(32);
        let series = equator_series_linear(&map, &[TAU]).unwrap();
        let start = equator_series(&map, &[0.0]).unwrap();

        assert!((series[0] - start[0]).abs() < 1e-5);
    }

    #[test]
    fn empty_azimuths_give_empty_series() {
        let map = x_map(8);
        assert!(equator_series(&map, &[]).unwrap().is_empty());
        assert!(equator_series_linear(&map, &[]).unwrap().is_empty());
    }
}
