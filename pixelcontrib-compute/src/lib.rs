//! Estimators for pixel contributions at camera angles between the stored
//! samples, and tools to measure how well they do.

pub mod angle_interpolate;
pub mod equator;
pub mod error_analysis;
pub mod interpolator;
pub mod per_angle;
pub mod sphere_interpolate;

pub use angle_interpolate::{LinearAngle, QuadraticAngle, TangentAngle};
pub use equator::{equator_series, equator_series_linear};
pub use error_analysis::{compute_error, summarize_error, ErrorSummary};
pub use interpolator::{AngleInterpolator, Interpolator};
pub use per_angle::PerAngle;
pub use sphere_interpolate::{
    Barycentric, BarycentricFine, SphereEstimator, SphereGrid, ValuePerAxis, SPHERE_GRID_ROWS,
};

// Re-export core types for convenience
pub use pixelcontrib_core::*;
