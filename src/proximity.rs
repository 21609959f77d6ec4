use crate::model::{LatLon, StudySpot};

/// Degrees on each axis, roughly 70-90m at campus latitudes.
pub const DEFAULT_THRESHOLD_DEG: f64 = 0.0008;

/// Bounding-box proximity. No geodesic distance and no hysteresis, so a user
/// sitting right on the edge will flicker in and out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityDetector {
    pub threshold_deg: f64,
}

impl Default for ProximityDetector {
    fn default() -> Self {
        Self {
            threshold_deg: DEFAULT_THRESHOLD_DEG,
        }
    }
}

impl ProximityDetector {
    pub fn new(threshold_deg: f64) -> Self {
        Self { threshold_deg }
    }

    pub fn is_at(&self, user: LatLon, spot: &StudySpot) -> bool {
        (user.lat - spot.position.lat).abs() < self.threshold_deg
            && (user.lon - spot.position.lon).abs() < self.threshold_deg
    }

    /// `(spot, at)` for every spot, in input order.
    pub fn check<'a>(
        &self,
        user: LatLon,
        spots: &'a [StudySpot],
    ) -> impl Iterator<Item = (&'a StudySpot, bool)> + 'a {
        let detector = *self;
        spots.iter().map(move |spot| (spot, detector.is_at(user, spot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{STUDY_SPOTS, find_spot};
    use proptest::prelude::*;

    #[test]
    fn standing_on_the_library() {
        let detector = ProximityDetector::default();
        let user = LatLon::new(40.9153, -73.1230);
        let result: Vec<_> = detector
            .check(user, &STUDY_SPOTS)
            .map(|(s, at)| (s.id, at))
            .collect();
        // union is 0.002042 away in latitude
        assert_eq!(result, vec![("library", true), ("union", false)]);
    }

    #[test]
    fn one_axis_outside_is_enough_to_miss() {
        let detector = ProximityDetector::default();
        let union = find_spot("union").unwrap();
        let p = union.position;
        assert!(detector.is_at(LatLon::new(p.lat + 0.0007, p.lon - 0.0007), union));
        assert!(!detector.is_at(LatLon::new(p.lat + 0.0009, p.lon), union));
        assert!(!detector.is_at(LatLon::new(p.lat, p.lon - 0.0009), union));
    }

    #[test]
    fn exactly_on_the_threshold_is_outside() {
        // at the origin the offsets are exact, with no rounding in the subtraction
        let origin = StudySpot {
            id: "origin",
            position: LatLon::new(0.0, 0.0),
            name: "Origin",
            default_status: crate::model::StatusValue::Vacant,
        };
        let detector = ProximityDetector::default();
        assert!(!detector.is_at(LatLon::new(0.0008, 0.0), &origin));
        assert!(!detector.is_at(LatLon::new(0.0, -0.0008), &origin));
        assert!(!detector.is_at(LatLon::new(-0.0008, 0.0008), &origin));
        assert!(detector.is_at(LatLon::new(0.00079, -0.00079), &origin));
    }

    #[test]
    fn threshold_is_configurable() {
        let library = find_spot("library").unwrap();
        let user = LatLon::new(library.position.lat + 0.001, library.position.lon);
        assert!(!ProximityDetector::default().is_at(user, library));
        assert!(ProximityDetector::new(0.002).is_at(user, library));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_inside_box_is_at(
            dlat in -0.00079f64..0.00079f64,
            dlon in -0.00079f64..0.00079f64,
        ) {
            let detector = ProximityDetector::default();
            for spot in &STUDY_SPOTS {
                let user = LatLon::new(spot.position.lat + dlat, spot.position.lon + dlon);
                prop_assert!(detector.is_at(user, spot));
            }
        }

        #[test]
        fn prop_outside_on_either_axis_is_not_at(
            inside in -0.00079f64..0.00079f64,
            outside in 0.00081f64..1.0f64,
            negative in any::<bool>(),
            lat_axis in any::<bool>(),
        ) {
            let detector = ProximityDetector::default();
            let off = if negative { -outside } else { outside };
            for spot in &STUDY_SPOTS {
                let (dlat, dlon) = if lat_axis { (off, inside) } else { (inside, off) };
                let user = LatLon::new(spot.position.lat + dlat, spot.position.lon + dlon);
                prop_assert!(!detector.is_at(user, spot));
            }
        }
    }
}
