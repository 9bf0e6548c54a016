/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree, used by the flat-earth approximation
const KM_PER_DEGREE: f64 = 111.0;

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

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
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Distance between two possibly-missing coordinate pairs
///
/// Returns `f64::INFINITY` when any of the four values is absent or exactly
/// `0.0`. Records that were never geocoded are stored with zero coordinates, so
/// zero counts as missing, which also means points on the equator or the prime
/// meridian are treated as unknown.
#[inline]
pub fn geo_distance(
    lat1: Option<f64>,
    lon1: Option<f64>,
    lat2: Option<f64>,
    lon2: Option<f64>,
) -> f64 {
    match (lat1, lon1, lat2, lon2) {
        (Some(lat1), Some(lon1), Some(lat2), Some(lon2))
            if [lat1, lon1, lat2, lon2].iter().all(|c| *c != 0.0) =>
        {
            haversine_distance(lat1, lon1, lat2, lon2)
        }
        _ => f64::INFINITY,
    }
}

/// Planar distance used by radius search: euclidean degrees times 111 km
#[inline]
pub fn approximate_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    ((lat2 - lat1).powi(2) + (lon2 - lon1).powi(2)).sqrt() * KM_PER_DEGREE
}

/// Calculate a bounding box around a center point
///
/// This is much faster than Haversine for pre-filtering.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
///
/// Any point within `radius_km` by [`approximate_distance_km`] lies inside the box.
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE;

    // 1 degree longitude varies by latitude
    let lon_delta = radius_km / (KM_PER_DEGREE * lat.to_radians().cos().abs());

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat && lat <= bbox.max_lat && lon >= bbox.min_lon && lon <= bbox.max_lon
}

/// Round to two decimal places
#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
