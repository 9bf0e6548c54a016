// Core algorithm exports
pub mod classifier;
pub mod distance;
pub mod emergency;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod taxonomy;
pub mod triage;

pub use classifier::{SpecializationClassifier, SpecializationSet};
pub use distance::{approximate_distance_km, calculate_bounding_box, geo_distance, haversine_distance, is_within_bounding_box, BoundingBox};
pub use emergency::EmergencyDetector;
pub use filters::{filter_by_specialization, matches_search, within_radius};
pub use matcher::{MatchLimits, MatchResult, Matcher};
pub use scoring::{calculate_match_score, score_breakdown, ScoreBreakdown};
pub use taxonomy::{EmergencyRule, SpecializationRule, Taxonomy};
pub use triage::Triage;
