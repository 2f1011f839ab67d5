use glam::DVec3;

use crate::{ContribError, ContributionMap, Result};

/// Ordered collection of contribution maps, one per camera angle.
///
/// The set owns all grid data. Interpolators and analyzers borrow from it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContributionMapSet {
    maps: Vec<ContributionMap>,
}

impl ContributionMapSet {
    /// Wraps the maps in the given order.
    pub fn new(maps: Vec<ContributionMap>) -> Self {
        Self { maps }
    }

    /// Wraps the maps sorted by ascending camera angle.
    pub fn from_maps(mut maps: Vec<ContributionMap>) -> Self {
        maps.sort_by(|a, b| a.camera_angle().total_cmp(&b.camera_angle()));
        Self { maps }
    }

    /// Number of maps.
    pub fn size(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn maps(&self) -> &[ContributionMap] {
        &self.maps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContributionMap> {
        self.maps.iter()
    }

    pub fn get_map(&self, index: usize) -> Result<&ContributionMap> {
        self.maps
            .get(index)
            .ok_or_else(|| ContribError::range("map index", index, self.maps.len()))
    }

    /// Value at column `x`, row `y` of map `index`.
    pub fn get_value_at(&self, index: usize, x: usize, y: usize) -> Result<f32> {
        self.get_map(index)?.value_at(x, y)
    }

    /// Value of one cell in every map, in set order.
    pub fn values_at_position(&self, x: usize, y: usize) -> Result<Vec<f32>> {
        self.maps.iter().map(|map| map.value_at(x, y)).collect()
    }

    /// Contribution for a camera direction at an arbitrary camera angle.
    ///
    /// Blends the two maps whose angles enclose `angle` using the tangent of
    /// the half angles. Angles outside the stored range use the nearest map.
    /// The maps must be sorted by ascending angle.
    pub fn contribution_for_direction(&self, direction: DVec3, angle: f32) -> Result<f32> {
        if self.maps.is_empty() {
            return Err(ContribError::Configuration(
                "cannot look up a contribution in an empty map set".into(),
            ));
        }

        let (i0, i1) = self.enclosing_maps(angle);
        let map0 = &self.maps[i0];
        let p0 = map0.value_for_direction(direction)?;

        let Some(i1) = i1 else {
            return Ok(p0);
        };
        let map1 = &self.maps[i1];
        let p1 = map1.value_for_direction(direction)?;

        let a0 = (map0.camera_angle() / 2.0).tan();
        let a1 = (map1.camera_angle() / 2.0).tan();
        if a1 == a0 {
            return Ok(p0);
        }
        let a = (angle / 2.0).tan();

        let t = (a1 - a) / (a1 - a0);
        Ok(p0 * t + p1 * (1.0 - t))
    }

    /// Index of the map at or below `angle` and, if `angle` is not beyond
    /// either end, the index of the next map.
    fn enclosing_maps(&self, angle: f32) -> (usize, Option<usize>) {
        for (i, map) in self.maps.iter().enumerate() {
            if map.camera_angle() > angle || i + 1 >= self.maps.len() {
                return (i, None);
            }

            if self.maps[i + 1].camera_angle() >= angle {
                return (i, Some(i + 1));
            }
        }

        (self.maps.len() - 1, None)
    }
}

impl<'a> IntoIterator for &'a ContributionMapSet {
    type Item = &'a ContributionMap;
    type IntoIter = std::slice::Iter<'a, ContributionMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.maps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapDescriptor;

    fn constant_map(size: usize, angle: f32, value: f32) -> ContributionMap {
        ContributionMap::filled(MapDescriptor::new(size, angle), value).unwrap()
    }

    fn three_map_set() -> ContributionMapSet {
        ContributionMapSet::new(vec![
            constant_map(8, 0.0, 0.1),
            constant_map(8, 0.5, 0.3),
            constant_map(8, 1.0, 0.6),
        ])
    }

    #[test]
    fn test_get_map_out_of_range() {
        let set = three_map_set();
        assert_eq!(set.size(), 3);
        assert!(set.get_map(2).is_ok());
        assert!(matches!(
            set.get_map(3),
            Err(ContribError::Range { what: "map index", index: 3, limit: 3 })
        ));
    }

    #[test]
    fn test_get_value_at_checks_position() {
        let set = three_map_set();
        assert_eq!(set.get_value_at(1, 7, 7).unwrap(), 0.3);
        assert!(matches!(
            set.get_value_at(1, 8, 0),
            Err(ContribError::Range { .. })
        ));
    }

    #[test]
    fn test_from_maps_sorts_by_angle() {
        let set = ContributionMapSet::from_maps(vec![
            constant_map(4, 1.0, 0.6),
            constant_map(4, 0.0, 0.1),
            constant_map(4, 0.5, 0.3),
        ]);

        let angles: Vec<f32> = set.iter().map(|m| m.camera_angle()).collect();
        assert_eq!(angles, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_new_keeps_given_order() {
        let set = ContributionMapSet::new(vec![
            constant_map(4, 1.0, 0.6),
            constant_map(4, 0.0, 0.1),
        ]);
        assert_eq!(set.get_map(0).unwrap().camera_angle(), 1.0);
    }

    #[test]
    fn test_values_at_position() {
        let set = three_map_set();
        assert_eq!(set.values_at_position(2, 3).unwrap(), vec![0.1, 0.3, 0.6]);
    }

    #[test]
    fn test_contribution_for_direction_exact_and_out_of_range() {
        let set = three_map_set();
        let dir = DVec3::new(0.3, -0.2, 0.9);

        for map in &set {
            let expected = map.value_for_direction(dir).unwrap();
            let actual = set.contribution_for_direction(dir, map.camera_angle()).unwrap();
            assert_eq!(actual, expected);
        }

        // Beyond the last angle the last map is used unchanged
        assert_eq!(set.contribution_for_direction(dir, 1.1).unwrap(), 0.6);
    }

    #[test]
    fn test_contribution_for_direction_blends_between_angles() {
        let set = three_map_set();
        let value = set.contribution_for_direction(DVec3::X, 0.75).unwrap();
        assert!(value > 0.3 && value < 0.6, "value {value} not between samples");
    }

    #[test]
    fn test_contribution_for_direction_empty_set() {
        let set = ContributionMapSet::default();
        assert!(matches!(
            set.contribution_for_direction(DVec3::Z, 0.0),
            Err(ContribError::Configuration(_))
        ));
    }
}
