use glam::DVec3;
use std::f64::consts::TAU;

/// Converts polar coordinates on the unit sphere to a direction.
///
/// * `alpha` - azimuth in the x-y plane, measured from the x-axis.
/// * `beta` - elevation, where 0 is the equator and ±π/2 are the poles.
pub fn polar_to_cartesian(alpha: f64, beta: f64) -> DVec3 {
    DVec3::new(beta.cos() * alpha.cos(), beta.cos() * alpha.sin(), beta.sin())
}

/// Converts a direction into `(alpha, beta)` with alpha in [0, 2π) and beta
/// in [-π/2, π/2]. Alpha is 0 at the poles.
pub fn cartesian_to_polar(p: DVec3) -> (f64, f64) {
    let r = (p.x * p.x + p.y * p.y).sqrt();

    let alpha = if r < 5e-8 {
        0.0
    } else {
        let alpha = p.y.atan2(p.x);
        if alpha < 0.0 {
            alpha + TAU
        } else {
            alpha
        }
    };

    (alpha, p.z.atan2(r))
}
