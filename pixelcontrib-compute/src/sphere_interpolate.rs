//! Estimators that approximate a single contribution map from a handful of
//! samples on the view sphere.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use pixelcontrib_core::{
    cartesian_to_polar, polar_to_cartesian, ContribError, ContributionMap, DVec3,
    InterpolatorKind, Result,
};

/// Approximates the contribution of one map for arbitrary view directions.
pub trait SphereEstimator: Sized + Send + Sync {
    const KIND: InterpolatorKind;

    /// Samples whatever the estimator needs from `map`.
    fn from_map(map: &ContributionMap) -> Result<Self>;

    fn estimate(&self, direction: DVec3) -> Result<f32>;
}

/// Projects a direction onto the octahedron |x| + |y| + |z| = 1.
fn onto_octahedron(direction: DVec3) -> Result<DVec3> {
    let norm = direction.x.abs() + direction.y.abs() + direction.z.abs();
    if !norm.is_finite() || norm == 0.0 {
        return Err(ContribError::InvalidInput(format!(
            "cannot estimate contribution for direction {direction}"
        )));
    }
    Ok(direction / norm)
}

fn sample(map: &ContributionMap, x: f64, y: f64, z: f64) -> Result<f32> {
    map.value_for_direction(DVec3::new(x, y, z))
}

/// One value per coordinate axis, each the mean of the two opposite axis
/// directions. A direction is weighted by its octahedral coordinates
/// `|x| + |y| + |z| = 1`, so the weights always sum to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValuePerAxis {
    x_axis: f32,
    y_axis: f32,
    z_axis: f32,
}

impl SphereEstimator for ValuePerAxis {
    const KIND: InterpolatorKind = InterpolatorKind::ValuePerAxis;

    fn from_map(map: &ContributionMap) -> Result<Self> {
        Ok(Self {
            x_axis: (sample(map, -1.0, 0.0, 0.0)? + sample(map, 1.0, 0.0, 0.0)?) / 2.0,
            y_axis: (sample(map, 0.0, -1.0, 0.0)? + sample(map, 0.0, 1.0, 0.0)?) / 2.0,
            z_axis: (sample(map, 0.0, 0.0, -1.0)? + sample(map, 0.0, 0.0, 1.0)?) / 2.0,
        })
    }

    fn estimate(&self, direction: DVec3) -> Result<f32> {
        let p = onto_octahedron(direction)?.abs();

        Ok(self.x_axis * p.x as f32 + self.y_axis * p.y as f32 + self.z_axis * p.z as f32)
    }
}

/// Barycentric blend over the eight faces of the octahedron, using the values
/// at its six vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Barycentric {
    /// Value at (0, 0, 1).
    top_value: f32,
    /// Value at (0, 0, -1).
    bottom_value: f32,
    /// Values at (1, 0, 0), (0, 1, 0), (-1, 0, 0), (0, -1, 0).
    equator_values: [f32; 4],
}

impl Barycentric {
    fn pole_value(&self, p: DVec3) -> f32 {
        if p.z >= 0.0 {
            self.top_value
        } else {
            self.bottom_value
        }
    }

    /// Equator vertex values on the x and y side of `p`.
    fn equator_values_for(&self, p: DVec3) -> (f32, f32) {
        let x_value = if p.x >= 0.0 {
            self.equator_values[0]
        } else {
            self.equator_values[2]
        };
        let y_value = if p.y >= 0.0 {
            self.equator_values[1]
        } else {
            self.equator_values[3]
        };
        (x_value, y_value)
    }

    fn sample_vertices(map: &ContributionMap) -> Result<Self> {
        Ok(Self {
            top_value: sample(map, 0.0, 0.0, 1.0)?,
            bottom_value: sample(map, 0.0, 0.0, -1.0)?,
            equator_values: [
                sample(map, 1.0, 0.0, 0.0)?,
                sample(map, 0.0, 1.0, 0.0)?,
                sample(map, -1.0, 0.0, 0.0)?,
                sample(map, 0.0, -1.0, 0.0)?,
            ],
        })
    }
}

impl SphereEstimator for Barycentric {
    const KIND: InterpolatorKind = InterpolatorKind::Barycentric;

    fn from_map(map: &ContributionMap) -> Result<Self> {
        Self::sample_vertices(map)
    }

    fn estimate(&self, direction: DVec3) -> Result<f32> {
        let p = onto_octahedron(direction)?;

        // |x| and |y| are already two barycentric coordinates of the face
        let x = p.x.abs() as f32;
        let y = p.y.abs() as f32;
        let z = 1.0 - x - y;

        let (x_value, y_value) = self.equator_values_for(p);
        Ok(self.pole_value(p) * z + x_value * x + y_value * y)
    }
}

/// Like [`Barycentric`], but each face is split into three sub-triangles
/// around its center, which is sampled as well.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarycentricFine {
    vertices: Barycentric,
    /// Face centers of the upper half: (1, 1, 1), (-1, 1, 1), (-1, -1, 1), (1, -1, 1).
    top_centers: [f32; 4],
    /// Face centers of the lower half, same order with z = -1.
    bottom_centers: [f32; 4],
}

impl BarycentricFine {
    fn center_value(&self, p: DVec3) -> f32 {
        let centers = if p.z >= 0.0 {
            &self.top_centers
        } else {
            &self.bottom_centers
        };

        match (p.x >= 0.0, p.y >= 0.0) {
            (true, true) => centers[0],
            (false, true) => centers[1],
            (false, false) => centers[2],
            (true, false) => centers[3],
        }
    }
}

impl SphereEstimator for BarycentricFine {
    const KIND: InterpolatorKind = InterpolatorKind::BarycentricFine;

    fn from_map(map: &ContributionMap) -> Result<Self> {
        let centers = |z: f64| -> Result<[f32; 4]> {
            Ok([
                sample(map, 1.0, 1.0, z)?,
                sample(map, -1.0, 1.0, z)?,
                sample(map, -1.0, -1.0, z)?,
                sample(map, 1.0, -1.0, z)?,
            ])
        };

        Ok(Self {
            vertices: Barycentric::sample_vertices(map)?,
            top_centers: centers(1.0)?,
            bottom_centers: centers(-1.0)?,
        })
    }

    fn estimate(&self, direction: DVec3) -> Result<f32> {
        let p = onto_octahedron(direction)?;

        let x = p.x.abs() as f32;
        let y = p.y.abs() as f32;
        let z = 1.0 - x - y;

        let center = self.center_value(p);
        let pole = self.vertices.pole_value(p);
        let (x_value, y_value) = self.vertices.equator_values_for(p);

        // The smallest barycentric coordinate selects the sub-triangle that
        // lies opposite of its vertex. The center M = (A + B + C) / 3 takes
        // three times that coordinate as weight.
        let value = if x <= y && x <= z {
            3.0 * x * center + (y - x) * y_value + (z - x) * pole
        } else if y <= x && y <= z {
            3.0 * y * center + (x - y) * x_value + (z - y) * pole
        } else {
            3.0 * z * center + (x - z) * x_value + (y - z) * y_value
        };

        Ok(value)
    }
}

/// Latitude rows from the south to the north pole, with the number of evenly
/// spaced azimuth samples in each row.
pub const SPHERE_GRID_ROWS: [usize; 5] = [1, 6, 8, 6, 1];

/// Bilinear interpolation on a latitude/azimuth grid sampled from the map.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereGrid {
    /// Samples of all rows, back to back.
    values: Vec<f32>,
    /// Start of each row in `values`, plus the total length.
    row_pointers: Vec<usize>,
}

impl SphereGrid {
    fn with_rows(num_values_per_row: &[usize], map: &ContributionMap) -> Result<Self> {
        let num_rows = num_values_per_row.len();

        let mut row_pointers = Vec::with_capacity(num_rows + 1);
        row_pointers.push(0);
        let mut sum = 0;
        for num_values in num_values_per_row {
            sum += num_values;
            row_pointers.push(sum);
        }

        let dx = PI / (num_rows - 1) as f64;
        let mut values = Vec::with_capacity(sum);
        for (r, &num_values) in num_values_per_row.iter().enumerate() {
            let beta = r as f64 * dx - FRAC_PI_2;
            let da = TAU / num_values as f64;
            for i in 0..num_values {
                let dir = polar_to_cartesian(i as f64 * da, beta);
                values.push(map.value_for_direction(dir)?);
            }
        }

        Ok(Self {
            values,
            row_pointers,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.row_pointers.len() - 1
    }

    pub fn row_values(&self, row: usize) -> &[f32] {
        &self.values[self.row_pointers[row]..self.row_pointers[row + 1]]
    }

    /// Linear interpolation of values evenly spaced on the unit circle,
    /// starting at azimuth 0.
    fn interpolate_on_circle(values: &[f32], alpha: f64) -> f32 {
        if values.len() == 1 {
            return values[0];
        }

        let alpha = alpha.rem_euclid(TAU);
        let dx = TAU / values.len() as f64;

        let i0 = ((alpha / dx).floor() as usize).min(values.len() - 1);
        let i1 = (i0 + 1) % values.len();
        let t = ((alpha - i0 as f64 * dx) / dx) as f32;

        values[i0] * (1.0 - t) + values[i1] * t
    }
}

impl SphereEstimator for SphereGrid {
    const KIND: InterpolatorKind = InterpolatorKind::SphereGrid;

    fn from_map(map: &ContributionMap) -> Result<Self> {
        Self::with_rows(&SPHERE_GRID_ROWS, map)
    }

    fn estimate(&self, direction: DVec3) -> Result<f32> {
        let length = direction.length();
        if !length.is_finite() || length == 0.0 {
            return Err(ContribError::InvalidInput(format!(
                "cannot estimate contribution for direction {direction}"
            )));
        }

        let (alpha, beta) = cartesian_to_polar(direction / length);
        let beta = (beta + FRAC_PI_2).clamp(0.0, PI);

        let num_rows = self.num_rows();
        let dx = PI / (num_rows - 1) as f64;
        let row = ((beta / dx).floor() as usize).min(num_rows - 1);

        let row0 = Self::interpolate_on_circle(self.row_values(row), alpha);
        if row + 1 >= num_rows {
            return Ok(row0);
        }

        let row1 = Self::interpolate_on_circle(self.row_values(row + 1), alpha);
        let t = ((beta - row as f64 * dx) / dx) as f32;
        Ok(row0 * (1.0 - t) + row1 * t)
    }
}
