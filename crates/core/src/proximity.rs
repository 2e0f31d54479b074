//! Nearest-exhibit resolution.

use crate::Exhibit;
use glam::Vec3;

/// Find the exhibit closest to `query` that lies within `max_distance`.
///
/// Distances are Euclidean. An exhibit replaces the current best only when it
/// is strictly closer, so on ties the earlier exhibit wins.
pub fn find_nearest(query: Vec3, exhibits: &[Exhibit], max_distance: f32) -> Option<&Exhibit> {
    let mut nearest = None;
    let mut nearest_dist = f32::INFINITY;
    for exhibit in exhibits {
        let dist = exhibit.position.distance(query);
        if dist < nearest_dist && dist <= max_distance {
            nearest = Some(exhibit);
            nearest_dist = dist;
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CreatureId, DEFAULT_MAX_DISTANCE};
    use proptest::prelude::*;

    fn exhibit(id: &str, x: f32) -> Exhibit {
        Exhibit {
            id: CreatureId::new(id),
            position: Vec3::new(x, 0.0, 0.0),
        }
    }

    #[test]
    fn picks_closest_within_radius() {
        let exhibits = [
            exhibit("far", 9.0),
            exhibit("edge", 7.0),
            exhibit("mid", 5.0),
            exhibit("near", 3.0),
        ];
        let found = find_nearest(Vec3::ZERO, &exhibits, DEFAULT_MAX_DISTANCE).unwrap();
        assert_eq!(found.id.as_str(), "near");
    }

    #[test]
    fn radius_is_inclusive() {
        let exhibits = [exhibit("edge", 7.0), exhibit("far", 9.0)];
        let found = find_nearest(Vec3::ZERO, &exhibits, 7.0).unwrap();
        assert_eq!(found.id.as_str(), "edge");
    }

    #[test]
    fn out_of_range_or_empty_yields_none() {
        assert!(find_nearest(Vec3::ZERO, &[], 7.0).is_none());
        assert!(find_nearest(Vec3::ZERO, &[exhibit("far", 9.0)], 7.0).is_none());
    }

    #[test]
    fn ties_go_to_first_in_order() {
        let exhibits = [exhibit("left", -4.0), exhibit("right", 4.0)];
        let found = find_nearest(Vec3::ZERO, &exhibits, 7.0).unwrap();
        assert_eq!(found.id.as_str(), "left");
    }

    #[test]
    fn distance_uses_all_three_axes() {
        let exhibits = [
            Exhibit {
                id: CreatureId::new("diagonal"),
                position: Vec3::new(4.0, 4.0, 4.0),
            },
            exhibit("axis", 6.5),
        ];
        // |(4,4,4)| is about 6.93, so the axis exhibit at 6.5 wins.
        let found = find_nearest(Vec3::ZERO, &exhibits, 7.0).unwrap();
        assert_eq!(found.id.as_str(), "axis");
    }

    proptest! {
        #[test]
        fn winner_is_in_range_and_minimal(
            xs in proptest::collection::vec(-20.0f32..20.0, 0..12),
            max in 0.0f32..15.0,
        ) {
            let exhibits: Vec<_> = xs
                .iter()
                .enumerate()
                .map(|(i, x)| exhibit(&i.to_string(), *x))
                .collect();
            match find_nearest(Vec3::ZERO, &exhibits, max) {
                Some(found) => {
                    let d = found.position.length();
                    prop_assert!(d <= max);
                    for other in &exhibits {
                        prop_assert!(other.position.length() >= d);
                    }
                }
                None => {
                    for other in &exhibits {
                        prop_assert!(other.position.length() > max);
                    }
                }
            }
        }
    }
}
