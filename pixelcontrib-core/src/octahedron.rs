//! Octahedral projection between unit directions and the unit square.
//!
//! A direction is projected onto the 1-norm sphere (the octahedron), the lower
//! hemisphere is folded outwards over the four corners of the upper one, and
//! the resulting square [-1, 1]² is rescaled to [0, 1]².

use glam::{DVec2, DVec3};

use crate::{ContribError, Result};

/// Folds one component of a lower-hemisphere point onto the corner triangles.
/// `sign(0)` is treated as positive.
#[inline]
fn fold(v1: f64, v2: f64) -> f64 {
    (1.0 - v2.abs()) * if v1 >= 0.0 { 1.0 } else { -1.0 }
}

/// Encodes a direction into octahedral coordinates in [0, 1]².
///
/// The direction does not need to be normalized, but it must be finite and
/// non-zero.
pub fn encode(direction: DVec3) -> Result<DVec2> {
    if !direction.is_finite() || direction == DVec3::ZERO {
        return Err(ContribError::InvalidInput(format!(
            "cannot encode degenerate direction {direction}"
        )));
    }

    // Scale to the largest component first so the length cannot overflow
    let n = (direction / direction.abs().max_element()).normalize();
    let abs_sum = n.x.abs() + n.y.abs() + n.z.abs();

    let mut p = DVec2::new(n.x / abs_sum, n.y / abs_sum);
    if n.z < 0.0 {
        p = DVec2::new(fold(p.x, p.y), fold(p.y, p.x));
    }

    Ok(p * 0.5 + DVec2::splat(0.5))
}

/// Decodes octahedral coordinates in [0, 1]² back into a unit direction.
pub fn decode(coord: DVec2) -> DVec3 {
    let p = coord * 2.0 - DVec2::ONE;
    let z = 1.0 - p.x.abs() - p.y.abs();

    let (x, y) = if z >= 0.0 {
        (p.x, p.y)
    } else {
        (fold(p.x, p.y), fold(p.y, p.x))
    };

    DVec3::new(x, y, z).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    /// 21 elevations from pole to pole, 20 azimuths each.
    fn sphere_samples() -> Vec<DVec3> {
        let num = 20;
        let mut result = Vec::new();
        for i in 0..=num {
            let beta = i as f64 / num as f64 * PI - FRAC_PI_2;
            let r = beta.cos();
            for j in 0..num {
                let alpha = j as f64 / num as f64 * 2.0 * PI;
                result.push(DVec3::new(alpha.cos() * r, alpha.sin() * r, beta.sin()));
            }
        }
        result
    }

    #[test]
    fn encode_decode_roundtrip_over_sphere() {
        for dir in sphere_samples() {
            let coord = encode(dir).unwrap();
            assert!((0.0..=1.0).contains(&coord.x), "u out of range for {dir}");
            assert!((0.0..=1.0).contains(&coord.y), "v out of range for {dir}");

            let decoded = decode(coord);
            let angle_error = (1.0 - dir.dot(decoded)).abs();
            assert!(
                angle_error <= 1e-6,
                "Decoding error {} too high for {}",
                angle_error,
                dir
            );
        }
    }

    #[test]
    fn poles_map_to_center_and_corner() {
        let top = encode(DVec3::Z).unwrap();
        assert!((top - DVec2::splat(0.5)).length() < 1e-12);

        // The lower pole folds onto the corners of the square
        let bottom = encode(-DVec3::Z).unwrap();
        assert!((bottom - DVec2::ONE).length() < 1e-12);
        assert!((decode(DVec2::ZERO) - -DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn equator_maps_to_diamond_edge() {
        let coord = encode(DVec3::X).unwrap();
        assert!((coord - DVec2::new(1.0, 0.5)).length() < 1e-12);

        let coord = encode(DVec3::new(0.0, -1.0, 0.0)).unwrap();
        assert!((coord - DVec2::new(0.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn encode_ignores_input_length() {
        let a = encode(DVec3::new(1.0, 2.0, -3.0)).unwrap();
        let b = encode(DVec3::new(10.0, 20.0, -30.0)).unwrap();
        assert!((a - b).length() < 1e-12);
    }

    #[test]
    fn encode_handles_huge_and_tiny_vectors() {
        let expected = encode(DVec3::new(1.0, 1.0, 0.0)).unwrap();

        // Lengths overflow or underflow when computed directly
        let huge = encode(DVec3::new(1e200, 1e200, 0.0)).unwrap();
        let tiny = encode(DVec3::new(1e-200, 1e-200, 0.0)).unwrap();
        assert!((huge - expected).length() < 1e-12);
        assert!((tiny - expected).length() < 1e-12);
    }

    #[test]
    fn encode_rejects_infinite_components() {
        let err = encode(DVec3::new(f64::INFINITY, 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, ContribError::InvalidInput(_)));
    }

    #[test]
    fn encode_rejects_zero_vector() {
        let err = encode(DVec3::ZERO).unwrap_err();
        assert!(matches!(err, ContribError::InvalidInput(_)));
    }

    #[test]
    fn encode_rejects_nan() {
        let err = encode(DVec3::new(f64::NAN, 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, ContribError::InvalidInput(_)));
    }
}
