//! Nearest-station lookup.

use crate::domain::{Point, Station};

/// Find the station closest to `point` and its distance in meters.
///
/// Returns `None` when `stations` is empty. When several stations are
/// exactly equidistant, any of them may be returned; callers must not rely
/// on which.
pub fn nearest_station<'a, I>(point: &Point, stations: I) -> Option<(&'a Station, f64)>
where
    I: IntoIterator<Item = &'a Station>,
{
    stations
        .into_iter()
        .map(|station| (station, point.distance(&station.location)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Line, StationKey, StationName};

    fn station(name: &str, x: f64, y: f64) -> Station {
        Station::new(
            name,
            StationKey::new(
                StationName::normalize(name).unwrap(),
                Line::parse("1").unwrap(),
            ),
            Point::new(x, y).unwrap(),
        )
    }

    #[test]
    fn empty_set_has_no_nearest() {
        let origin = Point::new(0.0, 0.0).unwrap();
        let stations: Vec<Station> = Vec::new();
        assert!(nearest_station(&origin, &stations).is_none());
    }

    #[test]
    fn coincident_point_snaps_with_zero_distance() {
        let stations = vec![station("S1", 0.0, 0.0), station("S2", 1000.0, 0.0)];
        let at_s2 = Point::new(1000.0, 0.0).unwrap();

        let (nearest, distance) = nearest_station(&at_s2, &stations).unwrap();
        assert_eq!(nearest.display_name, "S2");
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn picks_minimum_distance() {
        let stations = vec![
            station("Far", 5000.0, 5000.0),
            station("Near", 100.0, 0.0),
            station("Mid", 0.0, 700.0),
        ];
        let origin = Point::new(0.0, 0.0).unwrap();

        let (nearest, distance) = nearest_station(&origin, &stations).unwrap();
        assert_eq!(nearest.display_name, "Near");
        assert_eq!(distance, 100.0);
    }

    #[test]
    fn exact_tie_returns_one_of_the_tied() {
        let stations = vec![station("West", -500.0, 0.0), station("East", 500.0, 0.0)];
        let origin = Point::new(0.0, 0.0).unwrap();

        let (nearest, distance) = nearest_station(&origin, &stations).unwrap();
        assert!(["West", "East"].contains(&nearest.display_name.as_str()));
        assert_eq!(distance, 500.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Line, StationKey, StationName};
    use proptest::prelude::*;

    fn coords() -> impl Strategy<Value = (f64, f64)> {
        (-1.0e6..1.0e6f64, -1.0e6..1.0e6f64)
    }

    proptest! {
        /// No station is strictly closer than the one returned
        #[test]
        fn nearest_is_minimal(points in proptest::collection::vec(coords(), 1..40), query in coords()) {
            let stations: Vec<Station> = points
                .iter()
                .enumerate()
                .map(|(i, (x, y))| {
                    Station::new(
                        format!("S{i}"),
                        StationKey::new(
                            StationName::normalize(&format!("S{i}")).unwrap(),
                            Line::parse("1").unwrap(),
                        ),
                        Point::new(*x, *y).unwrap(),
                    )
                })
                .collect();
            let query = Point::new(query.0, query.1).unwrap();

            let (_, best) = nearest_station(&query, &stations).unwrap();
            for station in &stations {
                prop_assert!(best <= query.distance(&station.location));
            }
        }
    }
}
