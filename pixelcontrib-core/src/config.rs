//! Interpolator configuration.
//!
//! Static description of every interpolation scheme, used by the compute
//! layer to validate a map set before building an interpolator and by
//! front-ends to list the available schemes.

use serde::{Deserialize, Serialize};

/// Closed set of interpolation schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolatorKind {
    /// Linear in the camera angle between the first and last map.
    Linear,
    /// Linear in tan(angle / 2) between the first and last map.
    Tangent,
    /// Quadratic polynomial through the first, middle and last map.
    Quadratic,
    /// One averaged value per coordinate axis, exact angles only.
    ValuePerAxis,
    /// Barycentric blend over the octahedron faces, exact angles only.
    Barycentric,
    /// Barycentric blend over face sub-triangles, exact angles only.
    BarycentricFine,
    /// Bilinear blend over a latitude grid, exact angles only.
    SphereGrid,
}

/// Configuration for an interpolation scheme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterpolatorConfig {
    /// Unique identifier
    pub id: &'static str,
    /// Human-readable name for display
    pub display_name: &'static str,
    pub kind: InterpolatorKind,
    /// Minimum number of maps the scheme needs.
    pub min_maps: usize,
    /// Whether the first map must be the orthographic (angle 0) one.
    pub requires_orthographic_base: bool,
}

impl InterpolatorConfig {
    /// Whether the scheme blends across camera angles rather than looking
    /// up a map with exactly the queried angle.
    pub fn blends_angles(&self) -> bool {
        matches!(
            self.kind,
            InterpolatorKind::Linear | InterpolatorKind::Tangent | InterpolatorKind::Quadratic
        )
    }
}

pub static INTERPOLATOR_CONFIGS: &[InterpolatorConfig] = &[
    InterpolatorConfig {
        id: "linear",
        display_name: "Linear",
        kind: InterpolatorKind::Linear,
        min_maps: 2,
        requires_orthographic_base: false,
    },
    InterpolatorConfig {
        id: "tangent",
        display_name: "Angle",
        kind: InterpolatorKind::Tangent,
        min_maps: 2,
        requires_orthographic_base: false,
    },
    InterpolatorConfig {
        id: "quadratic",
        display_name: "Quadratic",
        kind: InterpolatorKind::Quadratic,
        min_maps: 3,
        requires_orthographic_base: true,
    },
    InterpolatorConfig {
        id: "value-per-axis",
        display_name: "Value per Axis",
        kind: InterpolatorKind::ValuePerAxis,
        min_maps: 1,
        requires_orthographic_base: false,
    },
    InterpolatorConfig {
        id: "barycentric",
        display_name: "Barycentric",
        kind: InterpolatorKind::Barycentric,
        min_maps: 1,
        requires_orthographic_base: false,
    },
    InterpolatorConfig {
        id: "barycentric-fine",
        display_name: "Barycentric (fine)",
        kind: InterpolatorKind::BarycentricFine,
        min_maps: 1,
        requires_orthographic_base: false,
    },
    InterpolatorConfig {
        id: "sphere-grid",
        display_name: "Sphere Grid",
        kind: InterpolatorKind::SphereGrid,
        min_maps: 1,
        requires_orthographic_base: false,
    },
];

/// Look up an interpolator configuration by ID.
pub fn get_interpolator_config(id: &str) -> Option<&'static InterpolatorConfig> {
    INTERPOLATOR_CONFIGS.iter().find(|c| c.id == id)
}

impl InterpolatorKind {
    /// The configuration entry for this kind.
    pub fn config(self) -> &'static InterpolatorConfig {
        // Every kind has exactly one entry in the table
        INTERPOLATOR_CONFIGS
            .iter()
            .find(|c| c.kind == self)
            .unwrap_or(&INTERPOLATOR_CONFIGS[0])
    }
}
