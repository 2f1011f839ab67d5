use pixelcontrib_core::{
    ContribError, ContributionMapSet, DVec3, GridIndex, InterpolatorKind, Result,
};

use crate::angle_interpolate::{LinearAngle, QuadraticAngle, TangentAngle};
use crate::per_angle::PerAngle;
use crate::sphere_interpolate::{Barycentric, BarycentricFine, SphereGrid, ValuePerAxis};

/// Estimates the pixel contribution at a camera angle that may not be one of
/// the stored samples.
///
/// Implementations are bound to their samples at construction and answer
/// queries without side effects, so one instance can be shared across threads.
pub trait AngleInterpolator: Send + Sync {
    /// Human-readable name of the scheme.
    fn name(&self) -> &'static str;

    /// Contribution for the view direction of a grid cell at `angle`.
    fn interpolate(&self, angle: f32, position: GridIndex) -> Result<f32>;

    /// Contribution for an arbitrary view direction at `angle`.
    fn interpolate_direction(&self, angle: f32, direction: DVec3) -> Result<f32>;
}

/// All interpolation schemes behind one type.
pub enum Interpolator<'a> {
    Linear(LinearAngle<'a>),
    Tangent(TangentAngle<'a>),
    Quadratic(QuadraticAngle<'a>),
    ValuePerAxis(PerAngle<ValuePerAxis>),
    Barycentric(PerAngle<Barycentric>),
    BarycentricFine(PerAngle<BarycentricFine>),
    SphereGrid(PerAngle<SphereGrid>),
}

impl<'a> Interpolator<'a> {
    /// Builds the interpolator of the given kind over `maps`.
    pub fn new(kind: InterpolatorKind, maps: &'a ContributionMapSet) -> Result<Self> {
        let interpolator = match kind {
            InterpolatorKind::Linear => Self::Linear(LinearAngle::new(maps)?),
            InterpolatorKind::Tangent => Self::Tangent(TangentAngle::new(maps)?),
            InterpolatorKind::Quadratic => Self::Quadratic(QuadraticAngle::new(maps)?),
            InterpolatorKind::ValuePerAxis => Self::ValuePerAxis(PerAngle::new(maps)?),
            InterpolatorKind::Barycentric => Self::Barycentric(PerAngle::new(maps)?),
            InterpolatorKind::BarycentricFine => Self::BarycentricFine(PerAngle::new(maps)?),
            InterpolatorKind::SphereGrid => Self::SphereGrid(PerAngle::new(maps)?),
        };

        log::debug!(
            "Built {} interpolator over {} maps",
            interpolator.name(),
            maps.size()
        );
        Ok(interpolator)
    }

    pub fn kind(&self) -> InterpolatorKind {
        match self {
            Self::Linear(_) => InterpolatorKind::Linear,
            Self::Tangent(_) => InterpolatorKind::Tangent,
            Self::Quadratic(_) => InterpolatorKind::Quadratic,
            Self::ValuePerAxis(_) => InterpolatorKind::ValuePerAxis,
            Self::Barycentric(_) => InterpolatorKind::Barycentric,
            Self::BarycentricFine(_) => InterpolatorKind::BarycentricFine,
            Self::SphereGrid(_) => InterpolatorKind::SphereGrid,
        }
    }

    fn inner(&self) -> &dyn AngleInterpolator {
        match self {
            Self::Linear(i) => i,
            Self::Tangent(i) => i,
            Self::Quadratic(i) => i,
            Self::ValuePerAxis(i) => i,
            Self::Barycentric(i) => i,
            Self::BarycentricFine(i) => i,
            Self::SphereGrid(i) => i,
        }
    }
}

impl AngleInterpolator for Interpolator<'_> {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn interpolate(&self, angle: f32, position: GridIndex) -> Result<f32> {
        self.inner().interpolate(angle, position)
    }

    fn interpolate_direction(&self, angle: f32, direction: DVec3) -> Result<f32> {
        self.inner().interpolate_direction(angle, direction)
    }
}

/// Rejects map sets that do not satisfy the configured minimum map count or
/// orthographic base for `kind`.
pub(crate) fn check_preconditions(kind: InterpolatorKind, maps: &ContributionMapSet) -> Result<()> {
    let config = kind.config();

    if maps.size() < config.min_maps {
        log::warn!(
            "{} interpolator needs {} maps, got {}",
            config.display_name,
            config.min_maps,
            maps.size()
        );
        return Err(ContribError::Configuration(format!(
            "at least {} contribution maps are required for the {} interpolator, got {}",
            config.min_maps,
            config.display_name,
            maps.size()
        )));
    }

    if config.requires_orthographic_base {
        let first_angle = maps.get_map(0)?.camera_angle();
        if first_angle != 0.0 {
            log::warn!(
                "{} interpolator needs an orthographic first map, got angle {}",
                config.display_name,
                first_angle
            );
            return Err(ContribError::Configuration(format!(
                "the first angle must be 0 for the {} interpolator, got {}",
                config.display_name, first_angle
            )));
        }
    }

    Ok(())
}
