use crate::core::classifier::SpecializationSet;
use crate::core::distance::{approximate_distance_km, is_within_bounding_box, BoundingBox};
use crate::models::Doctor;

/// Keep doctors practising one of the needed specializations
///
/// Falls back to general practitioners when nobody matches. Input order is
/// preserved in both cases.
pub fn filter_by_specialization(candidates: Vec<Doctor>, needed: &SpecializationSet) -> Vec<Doctor> {
    let (matching, rest): (Vec<Doctor>, Vec<Doctor>) = candidates
        .into_iter()
        .partition(|doctor| needed.contains(&doctor.specialization));

    if !matching.is_empty() {
        return matching;
    }

    tracing::debug!("No specialist for {:?}, falling back to general practice", needed);
    rest.into_iter().filter(Doctor::is_general_practice).collect()
}

/// Case-insensitive substring match on specialization and city
///
/// A `None` criterion matches everything. Doctors without a city never match
/// a city criterion.
#[inline]
pub fn matches_search(doctor: &Doctor, specialization: Option<&str>, city: Option<&str>) -> bool {
    if let Some(spec) = specialization {
        if !contains_ignore_case(&doctor.specialization, spec) {
            return false;
        }
    }

    if let Some(city) = city {
        match doctor.city() {
            Some(doctor_city) if contains_ignore_case(doctor_city, city) => {}
            _ => return false,
        }
    }

    true
}

#[inline]
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Approximate distance to the doctor if it falls inside the search radius
///
/// Doctors without stored coordinates are placed at (0, 0).
#[inline]
pub fn within_radius(
    doctor: &Doctor,
    lat: f64,
    lng: f64,
    radius_km: f64,
    bbox: &BoundingBox,
) -> Option<f64> {
    let (doc_lat, doc_lng) = doctor.coordinates();
    let doc_lat = doc_lat.unwrap_or(0.0);
    let doc_lng = doc_lng.unwrap_or(0.0);

    // Stage 1: cheap box check
    if !is_within_bounding_box(doc_lat, doc_lng, bbox) {
        return None;
    }

    // Stage 2: exact radius check
    let distance = approximate_distance_km(lat, lng, doc_lat, doc_lng);
    (distance <= radius_km).then_some(distance)
}
