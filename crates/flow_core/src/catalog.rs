//! Static reference data: destinations, nearby facilities and canned routes.

use crate::model::{
    Destination, FacilityKind, Location, NavigationRoute, NearbyFacility, TransportType,
};

/// Accuracy radius (metres) recorded for catalog facility positions.
const CATALOG_ACCURACY_M: f64 = 5.0;

fn destination(key: &str, name: &str, latitude: f64, longitude: f64) -> Destination {
    Destination {
        key: key.to_string(),
        name: name.to_string(),
        latitude,
        longitude,
    }
}

pub fn default_destinations() -> Vec<Destination> {
    vec![
        destination("somnath", "Somnath Temple", 20.8880, 70.4017),
        destination("dwarka", "Dwarkadhish Temple", 22.2394, 68.9678),
        destination("ambaji", "Ambaji Temple", 24.0208, 72.8678),
        destination("pavagadh", "Pavagadh Temple", 22.4854, 73.5314),
    ]
}

#[allow(clippy::too_many_arguments)]
fn facility(
    name: &str,
    kind: FacilityKind,
    distance: &str,
    walking_time: &str,
    latitude: f64,
    longitude: f64,
    available: Option<bool>,
    rating: Option<f64>,
) -> NearbyFacility {
    NearbyFacility {
        name: name.to_string(),
        kind,
        distance: distance.to_string(),
        walking_time: walking_time.to_string(),
        location: Location::new(latitude, longitude, CATALOG_ACCURACY_M),
        available,
        rating,
    }
}

pub fn default_facilities() -> Vec<NearbyFacility> {
    use FacilityKind::*;
    vec![
        facility(
            "Temple Parking Lot A",
            Parking,
            "200m",
            "2 min",
            20.8885,
            70.4020,
            Some(true),
            Some(4.2),
        ),
        facility(
            "Temple Parking Lot B",
            Parking,
            "450m",
            "5 min",
            20.8875,
            70.4025,
            Some(false),
            Some(4.0),
        ),
        facility(
            "Prasadam Restaurant",
            Restaurant,
            "300m",
            "3 min",
            20.8890,
            70.4015,
            None,
            Some(4.5),
        ),
        facility(
            "Temple Medical Center",
            Medical,
            "150m",
            "2 min",
            20.8883,
            70.4019,
            None,
            Some(4.8),
        ),
        facility(
            "Pilgrim Rest House",
            Accommodation,
            "800m",
            "10 min",
            20.8870,
            70.4010,
            Some(true),
            Some(4.1),
        ),
        facility(
            "State Bank ATM",
            Atm,
            "250m",
            "3 min",
            20.8888,
            70.4022,
            Some(true),
            None,
        ),
    ]
}

/// The canned route for `transport`, addressed to `destination_name`.
pub fn canned_route(destination_name: &str, transport: TransportType) -> NavigationRoute {
    let (distance, duration, steps): (&str, &str, &[&str]) = match transport {
        TransportType::Walking => (
            "2.3 km",
            "28 minutes",
            &[
                "Head northeast on Main Road",
                "Turn right onto Temple Street",
                "Continue straight for 1.5 km",
                "Turn left at the temple complex entrance",
                "Destination will be on your right",
            ],
        ),
        TransportType::Driving => (
            "12.7 km",
            "18 minutes",
            &[
                "Head north on Highway 101",
                "Take exit 23 toward Temple Road",
                "Turn right onto Temple Road",
                "Follow signs to main parking area",
                "Park in designated visitor parking",
            ],
        ),
        TransportType::Transit => (
            "15.2 km",
            "45 minutes",
            &[
                "Walk to Central Bus Stand (5 min)",
                "Take Bus Route 42 toward Temple District",
                "Get off at Temple Gate stop (35 min)",
                "Walk to temple entrance (5 min)",
            ],
        ),
    };
    NavigationRoute {
        destination: destination_name.to_string(),
        distance: distance.to_string(),
        duration: duration.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        transport,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_keys_are_unique() {
        let destinations = default_destinations();
        for (i, a) in destinations.iter().enumerate() {
            assert!(destinations[i + 1..].iter().all(|b| b.key != a.key));
        }
    }

    #[test]
    fn transit_route_has_four_steps() {
        let route = canned_route("Ambaji Temple", TransportType::Transit);
        assert_eq!(route.steps.len(), 4);
        assert_eq!(route.destination, "Ambaji Temple");
        assert_eq!(route.transport, TransportType::Transit);
    }
}
