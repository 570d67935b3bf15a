pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in kilometers between two coordinate pairs,
/// computed with the haversine formula.
pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_coordinates() {
        assert_eq!(haversine_distance(12.9727, 79.1605, 12.9727, 79.1605), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_distance(54.32, 10.12, 53.55, 9.99);
        let back = haversine_distance(53.55, 9.99, 54.32, 10.12);
        assert!((there - back).abs() < 1e-9);
    }
}
