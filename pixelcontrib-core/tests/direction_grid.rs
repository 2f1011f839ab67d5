use std::f64::consts::{FRAC_PI_2, PI};

use pixelcontrib_core::octahedron::{decode, encode};
use pixelcontrib_core::{
    cartesian_to_polar, direction_from_index, index_from_direction, polar_to_cartesian,
    ContribError, ContributionMap, ContributionMapSet, DVec3, GridIndex, MapDescriptor,
};

fn sphere_directions() -> Vec<DVec3> {
    let mut dirs = Vec::new();
    for i in 0..=20 {
        let beta = -FRAC_PI_2 + PI * i as f64 / 20.0;
        for j in 0..20 {
            let alpha = 2.0 * PI * j as f64 / 20.0;
            dirs.push(polar_to_cartesian(alpha, beta));
        }
    }
    dirs
}

// ============================================================================
// Octahedral encoding
// ============================================================================

#[test]
fn encoding_stays_in_unit_square() {
    for dir in sphere_directions() {
        let c = encode(dir).unwrap();
        assert!((0.0..=1.0).contains(&c.x), "{:?} -> {:?}", dir, c);
        assert!((0.0..=1.0).contains(&c.y), "{:?} -> {:?}", dir, c);
    }
}

#[test]
fn decode_inverts_encode_on_the_sphere() {
    for dir in sphere_directions() {
        let back = decode(encode(dir).unwrap());
        assert!((back - dir).length() < 1e-6, "{:?} -> {:?}", dir, back);
    }
}

#[test]
fn zero_direction_cannot_be_encoded() {
    assert!(matches!(
        encode(DVec3::ZERO),
        Err(ContribError::InvalidInput(_))
    ));
}

// ============================================================================
// Grid indexing
// ============================================================================

#[test]
fn every_cell_round_trips_exactly() {
    for size in [16usize, 32, 64, 128, 256, 512, 1024] {
        for v in 0..size {
            for u in 0..size {
                let index = GridIndex::new(u, v);
                let dir = direction_from_index(index, size).unwrap();
                assert_eq!(index_from_direction(dir, size).unwrap(), index);
            }
        }
    }
}

#[test]
fn sphere_directions_land_inside_the_grid() {
    let size = 37;
    for dir in sphere_directions() {
        let index = index_from_direction(dir, size).unwrap();
        assert!(index.u < size && index.v < size);
    }
}

#[test]
fn out_of_grid_indices_are_rejected() {
    assert!(matches!(
        direction_from_index(GridIndex::new(64, 0), 64),
        Err(ContribError::Range { .. })
    ));
    assert!(matches!(
        direction_from_index(GridIndex::new(0, 64), 64),
        Err(ContribError::Range { .. })
    ));
}

#[test]
fn polar_round_trip_away_from_poles() {
    for (alpha, beta) in [(0.3, 0.2), (2.0, -1.0), (5.5, 0.0), (PI, 1.2)] {
        let (a, b) = cartesian_to_polar(polar_to_cartesian(alpha, beta));
        assert!((a - alpha).abs() < 1e-9);
        assert!((b - beta).abs() < 1e-9);
    }
}

// ============================================================================
// Angle-blended lookup
// ============================================================================

#[test]
fn direction_lookup_blends_enclosing_maps() {
    let set = ContributionMapSet::from_maps(vec![
        ContributionMap::filled(MapDescriptor::new(16, 1.0), 0.8).unwrap(),
        ContributionMap::filled(MapDescriptor::new(16, 0.0), 0.2).unwrap(),
    ]);
    let dir = DVec3::new(0.3, -0.5, 0.8);

    assert!((set.contribution_for_direction(dir, 0.0).unwrap() - 0.2).abs() < 1e-6);
    assert!((set.contribution_for_direction(dir, 1.0).unwrap() - 0.8).abs() < 1e-6);

    let mid = set.contribution_for_direction(dir, 0.5).unwrap();
    assert!(mid > 0.2 && mid < 0.8);

    // Beyond the stored range the nearest map is used
    assert!((set.contribution_for_direction(dir, 1.4).unwrap() - 0.8).abs() < 1e-6);
}
