use crate::core::classifier::SpecializationSet;
use crate::core::distance::{geo_distance, round2};
use crate::models::{Doctor, Location, Severity};

/// Distance points awarded when the patient gave no location
const NO_LOCATION_DISTANCE_SCORE: f64 = 15.0;

/// Per-factor points behind a match score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// 0, 20 or 40
    pub specialization: f64,
    /// 0 to 30
    pub distance: f64,
    /// 0 to 20
    pub rating: f64,
    /// 0 or 10
    pub availability: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        round2(self.specialization + self.distance + self.rating + self.availability)
    }
}

/// Calculate a match score (0-100) for a doctor
///
/// Scoring formula:
/// score = (
///     specialization   # 40 exact match, 20 general practice
///     + distance       # up to 30, closer = higher, 15 without a patient location
///     + rating         # up to 20
///     + availability   # 10 when accepting new patients
/// )
///
/// `severity` is accepted for callers that already carry it but does not
/// change the score.
pub fn calculate_match_score(
    doctor: &Doctor,
    needed: &SpecializationSet,
    patient_location: Option<&Location>,
    severity: Severity,
) -> f64 {
    score_breakdown(doctor, needed, patient_location, severity).total()
}

pub fn score_breakdown(
    doctor: &Doctor,
    needed: &SpecializationSet,
    patient_location: Option<&Location>,
    _severity: Severity,
) -> ScoreBreakdown {
    let distance = match patient_location {
        Some(location) => calculate_distance_score(doctor_distance(doctor, location)),
        None => NO_LOCATION_DISTANCE_SCORE,
    };

    ScoreBreakdown {
        specialization: calculate_specialization_score(doctor, needed),
        distance,
        rating: calculate_rating_score(doctor.rating()),
        availability: if doctor.accepting_new_patients() { 10.0 } else { 0.0 },
    }
}

/// Great-circle distance from patient to doctor, infinite when unknown
#[inline]
pub fn doctor_distance(doctor: &Doctor, patient: &Location) -> f64 {
    let (lat, lng) = doctor.coordinates();
    geo_distance(Some(patient.lat), Some(patient.lng), lat, lng)
}

#[inline]
fn calculate_specialization_score(doctor: &Doctor, needed: &SpecializationSet) -> f64 {
    if needed.contains(&doctor.specialization) {
        40.0
    } else if doctor.is_general_practice() {
        20.0
    } else {
        0.0
    }
}

/// Step function over distance in km
#[inline]
fn calculate_distance_score(distance_km: f64) -> f64 {
    if distance_km < 5.0 {
        30.0
    } else if distance_km < 10.0 {
        25.0
    } else if distance_km < 20.0 {
        15.0
    } else if distance_km < 50.0 {
        5.0
    } else {
        0.0
    }
}

#[inline]
fn calculate_rating_score(rating: f64) -> f64 {
    if rating >= 4.5 {
        20.0
    } else if rating >= 4.0 {
        15.0
    } else if rating >= 3.5 {
        10.0
    } else if rating >= 3.0 {
        5.0
    } else {
        0.0
    }
}
