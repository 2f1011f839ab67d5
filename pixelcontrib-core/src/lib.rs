//! Storage and direction encoding for pixel contribution maps.
//!
//! A contribution map stores, for every view direction on the sphere, the
//! fraction of the screen an object covers. Directions are flattened onto a
//! square grid with the octahedral projection; a set holds one map per
//! camera angle and is persisted in the PCMP binary layout.

pub mod config;
pub mod contribution_map;
pub mod error;
pub mod grid_index;
pub mod map_set;
pub mod octahedron;
pub mod pcmp;
pub mod polar;

pub use config::{
    get_interpolator_config, InterpolatorConfig, InterpolatorKind, INTERPOLATOR_CONFIGS,
};
pub use contribution_map::{ContributionMap, MapDescriptor};
pub use error::{ContribError, Result};
pub use grid_index::{direction_from_index, index_from_direction, GridIndex};
pub use map_set::ContributionMapSet;
pub use pcmp::{parse, PCMP_HEADER_LEN, PCMP_MAGIC, PCMP_VERSION};
pub use polar::{cartesian_to_polar, polar_to_cartesian};

// Direction and coordinate types used throughout the public API
pub use glam::{DVec2, DVec3};
