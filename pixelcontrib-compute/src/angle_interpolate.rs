//! Interpolation across camera angles at a fixed view direction.
//!
//! These schemes ignore the neighbourhood of a cell and only blend the values
//! that the same cell has in a few of the stored maps.

use glam::{DMat2, DVec2};
use pixelcontrib_core::{
    ContribError, ContributionMap, ContributionMapSet, DVec3, GridIndex, InterpolatorKind, Result,
};

use crate::interpolator::{check_preconditions, AngleInterpolator};

/// Returns the first and last map of the set after checking that they can be
/// blended cell by cell.
fn end_maps(
    kind: InterpolatorKind,
    maps: &ContributionMapSet,
) -> Result<(&ContributionMap, &ContributionMap)> {
    check_preconditions(kind, maps)?;

    let first = maps.get_map(0)?;
    let last = maps.get_map(maps.size() - 1)?;
    check_same_size(first, last)?;

    Ok((first, last))
}

fn check_same_size(a: &ContributionMap, b: &ContributionMap) -> Result<()> {
    if a.map_size() != b.map_size() {
        return Err(ContribError::Configuration(format!(
            "maps at angles {} and {} have different sizes ({} and {})",
            a.camera_angle(),
            b.camera_angle(),
            a.map_size(),
            b.map_size()
        )));
    }
    Ok(())
}

/// Linear blend between the first and last map, parametrized by the angle.
pub struct LinearAngle<'a> {
    first_map: &'a ContributionMap,
    last_map: &'a ContributionMap,
}

impl<'a> LinearAngle<'a> {
    pub fn new(maps: &'a ContributionMapSet) -> Result<Self> {
        let (first_map, last_map) = end_maps(InterpolatorKind::Linear, maps)?;

        if first_map.camera_angle() == last_map.camera_angle() {
            return Err(ContribError::Configuration(format!(
                "first and last map share the angle {}",
                first_map.camera_angle()
            )));
        }

        Ok(Self {
            first_map,
            last_map,
        })
    }
}

impl AngleInterpolator for LinearAngle<'_> {
    fn name(&self) -> &'static str {
        InterpolatorKind::Linear.config().display_name
    }

    fn interpolate(&self, angle: f32, position: GridIndex) -> Result<f32> {
        let first_value = self.first_map.value_at_index(position)?;
        let last_value = self.last_map.value_at_index(position)?;

        let first_angle = self.first_map.camera_angle();
        let last_angle = self.last_map.camera_angle();

        let f = (angle - first_angle) / (last_angle - first_angle);
        Ok(first_value * (1.0 - f) + last_value * f)
    }

    fn interpolate_direction(&self, angle: f32, direction: DVec3) -> Result<f32> {
        let position = self.first_map.descriptor().index_from_direction(direction)?;
        self.interpolate(angle, position)
    }
}

/// Like [`LinearAngle`], but parametrized by `tan(angle / 2)`, which tracks
/// how the projected size of an object grows with the field of view.
pub struct TangentAngle<'a> {
    first_map: &'a ContributionMap,
    last_map: &'a ContributionMap,
    tan_first: f32,
    tan_last: f32,
}

impl<'a> TangentAngle<'a> {
    pub fn new(maps: &'a ContributionMapSet) -> Result<Self> {
        let (first_map, last_map) = end_maps(InterpolatorKind::Tangent, maps)?;

        let tan_first = (first_map.camera_angle() / 2.0).tan();
        let tan_last = (last_map.camera_angle() / 2.0).tan();
        if tan_first == tan_last || !(tan_last - tan_first).is_finite() {
            return Err(ContribError::Configuration(format!(
                "angles {} and {} cannot be told apart by their half-angle tangents",
                first_map.camera_angle(),
                last_map.camera_angle()
            )));
        }

        Ok(Self {
            first_map,
            last_map,
            tan_first,
            tan_last,
        })
    }
}

impl AngleInterpolator for TangentAngle<'_> {
    fn name(&self) -> &'static str {
        InterpolatorKind::Tangent.config().display_name
    }

    fn interpolate(&self, angle: f32, position: GridIndex) -> Result<f32> {
        let first_value = self.first_map.value_at_index(position)?;
        let last_value = self.last_map.value_at_index(position)?;

        let a = (angle / 2.0).tan();
        let t = (a - self.tan_first) / (self.tan_last - self.tan_first);

        Ok(first_value * (1.0 - t) + last_value * t)
    }

    fn interpolate_direction(&self, angle: f32, direction: DVec3) -> Result<f32> {
        let position = self.first_map.descriptor().index_from_direction(direction)?;
        self.interpolate(angle, position)
    }
}

/// Quadratic polynomial in the angle through the first (orthographic),
/// middle and last map.
pub struct QuadraticAngle<'a> {
    first_map: &'a ContributionMap,
    middle_map: &'a ContributionMap,
    last_map: &'a ContributionMap,

    /// Inverse of the system `a·x² + b·x = y − y₀` at the middle and last angle.
    inverse: DMat2,
}

impl<'a> QuadraticAngle<'a> {
    pub fn new(maps: &'a ContributionMapSet) -> Result<Self> {
        let (first_map, last_map) = end_maps(InterpolatorKind::Quadratic, maps)?;
        let middle_map = maps.get_map(maps.size() / 2)?;
        check_same_size(first_map, middle_map)?;

        let x1 = middle_map.camera_angle() as f64;
        let x2 = last_map.camera_angle() as f64;
        if !(0.0 < x1 && x1 < x2) {
            log::warn!("Quadratic interpolator got unordered angles 0, {}, {}", x1, x2);
            return Err(ContribError::Configuration(format!(
                "angles must be strictly ascending, got 0, {}, {}",
                x1, x2
            )));
        }

        let mat = DMat2::from_cols(DVec2::new(x1 * x1, x2 * x2), DVec2::new(x1, x2));
        let det = mat.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(ContribError::Configuration(format!(
                "angles {} and {} give a singular system",
                x1, x2
            )));
        }

        Ok(Self {
            first_map,
            middle_map,
            last_map,
            inverse: mat.inverse(),
        })
    }

    /// Coefficients `(a, b, c)` of the polynomial for one cell.
    pub fn coefficients(&self, position: GridIndex) -> Result<(f64, f64, f64)> {
        let y0 = self.first_map.value_at_index(position)? as f64;
        let y1 = self.middle_map.value_at_index(position)? as f64;
        let y2 = self.last_map.value_at_index(position)? as f64;

        // x0 = 0, so the constant term is the orthographic value
        let c = y0;
        let ab = self.inverse * DVec2::new(y1 - c, y2 - c);

        Ok((ab.x, ab.y, c))
    }
}

impl AngleInterpolator for QuadraticAngle<'_> {
    fn name(&self) -> &'static str {
        InterpolatorKind::Quadratic.config().display_name
    }

    fn interpolate(&self, angle: f32, position: GridIndex) -> Result<f32> {
        let (a, b, c) = self.coefficients(position)?;
        let x = angle as f64;

        Ok((a * x * x + b * x + c) as f32)
    }

    fn interpolate_direction(&self, angle: f32, direction: DVec3) -> Result<f32> {
        let position = self.first_map.descriptor().index_from_direction(direction)?;
        self.interpolate(angle, position)
    }
}
