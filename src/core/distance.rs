use crate::models::Facility;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push the haversine term just outside [0, 1] for
    // coincident or antipodal points; clamp before the inverse trig.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Attach the great-circle distance from the search origin to a facility.
///
/// Facilities without a resolvable coordinate are left untouched; the
/// pipeline filters them out before ranking.
pub fn annotate_distance(origin: (f64, f64), mut facility: Facility) -> Facility {
    if let (Some(lat), Some(lon)) = (facility.lat, facility.lon) {
        facility.distance_km = Some(haversine_distance(origin.0, origin.1, lat, lon));
    }
    facility
}
