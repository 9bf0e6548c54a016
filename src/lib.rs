//! CuraSyn Match - symptom triage and doctor matching core
//!
//! Classifies free-text symptom reports into medical specializations,
//! screens them for emergencies, and ranks doctors from a directory snapshot
//! by a weighted specialization/distance/rating/availability score.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{
    geo_distance, haversine_distance, EmergencyDetector, MatchLimits, MatchResult, Matcher,
    SpecializationClassifier, SpecializationSet, Taxonomy, Triage,
};
pub use models::{Doctor, DoctorMatch, EmergencyAssessment, EmergencyKind, Location, Severity, SymptomReport};
pub use services::DoctorDirectory;
