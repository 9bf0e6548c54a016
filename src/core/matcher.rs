use std::sync::Arc;
use crate::core::{
    classifier::{SpecializationClassifier, SpecializationSet},
    filters::filter_by_specialization,
    scoring::{calculate_match_score, doctor_distance},
    taxonomy::Taxonomy,
};
use crate::models::{Doctor, DoctorMatch, Location, SymptomReport};

/// Result cap for the full intake path
pub const DEFAULT_MATCH_LIMIT: usize = 10;

/// Result cap for the quick-match path
pub const QUICK_MATCH_LIMIT: usize = 5;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub specializations: SpecializationSet,
    pub matches: Vec<DoctorMatch>,
    pub total_candidates: usize,
}

/// How many matches each call path returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLimits {
    pub default_limit: usize,
    pub quick_limit: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_MATCH_LIMIT,
            quick_limit: QUICK_MATCH_LIMIT,
        }
    }
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Classify the report into specializations
/// 2. Filter candidates by specialization, falling back to general practice
/// 3. Score each doctor and measure distance
/// 4. Stable sort by score and truncate
#[derive(Debug, Clone)]
pub struct Matcher {
    classifier: SpecializationClassifier,
    limits: MatchLimits,
}

impl Matcher {
    pub fn new(taxonomy: Arc<Taxonomy>, limits: MatchLimits) -> Self {
        Self {
            classifier: SpecializationClassifier::new(taxonomy),
            limits,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Arc::new(Taxonomy::default()), MatchLimits::default())
    }

    pub fn limits(&self) -> MatchLimits {
        self.limits
    }

    pub fn classifier(&self) -> &SpecializationClassifier {
        &self.classifier
    }

    /// Find doctors for a symptom report
    ///
    /// # Arguments
    /// * `report` - Symptoms, severity and optional AI analysis
    /// * `candidates` - Snapshot of the doctor directory
    /// * `patient_location` - Where the patient is, if known
    /// * `limit` - Maximum number of matches to return
    ///
    /// # Returns
    /// MatchResult with matches ordered by score; equal scores keep candidate order
    pub fn find_matches(
        &self,
        report: &SymptomReport,
        candidates: Vec<Doctor>,
        patient_location: Option<&Location>,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        // Stage 1: specializations from symptoms and analysis
        let specializations = self.classifier.classify(&report.symptoms, report.analysis());

        // Stage 2: specialization filter
        let doctors = filter_by_specialization(candidates, &specializations);

        tracing::debug!(
            "Scoring {} of {} candidates for {:?}",
            doctors.len(),
            total_candidates,
            specializations
        );

        // Stage 3: score and measure
        let mut matches: Vec<DoctorMatch> = doctors
            .into_iter()
            .map(|doctor| {
                let match_score = calculate_match_score(
                    &doctor,
                    &specializations,
                    patient_location,
                    report.severity,
                );

                let distance = patient_location
                    .map(|location| doctor_distance(&doctor, location))
                    .filter(|d| d.is_finite());

                DoctorMatch {
                    doctor,
                    match_score,
                    distance,
                }
            })
            .collect();

        // Stage 4: sort_by is stable, so ties keep candidate order
        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        matches.truncate(limit);

        MatchResult {
            specializations,
            matches,
            total_candidates,
        }
    }

    /// Full intake path: report location, default limit
    pub fn match_report(&self, report: &SymptomReport, candidates: Vec<Doctor>) -> MatchResult {
        self.find_matches(
            report,
            candidates,
            report.location.as_ref(),
            self.limits.default_limit,
        )
    }

    /// Quick path: report location, quick limit
    pub fn quick_match(&self, report: &SymptomReport, candidates: Vec<Doctor>) -> MatchResult {
        self.find_matches(
            report,
            candidates,
            report.location.as_ref(),
            self.limits.quick_limit,
        )
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(result: &MatchResult) -> Vec<&str> {
        result
            .matches
            .iter()
            .filter_map(|m| m.doctor.id.as_deref())
            .collect()
    }

    #[test]
    fn test_headache_scenario() {
        let matcher = Matcher::with_defaults();
        let report = SymptomReport::new(["mild headache"]);
        let candidates = vec![Doctor::new("n1", "Neurology")
            .with_rating(4.6)
            .with_accepting_new_patients(true)];

        let result = matcher.match_report(&report, candidates);

        assert!(result.specializations.contains("Neurology"));
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].match_score, 85.0);
        assert_eq!(result.matches[0].distance, None);
    }

    #[test]
    fn test_empty_candidates() {
        let matcher = Matcher::with_defaults();
        let result = matcher.match_report(&SymptomReport::new(["cough"]), vec![]);

        assert!(result.matches.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[test]
    fn test_sorted_and_stable() {
        let matcher = Matcher::with_defaults();
        let report = SymptomReport::new(["skin rash"]);

        let candidates = vec![
            Doctor::new("a", "Dermatology").with_rating(3.0),
            Doctor::new("b", "Dermatology").with_rating(4.8),
            Doctor::new("c", "Dermatology").with_rating(3.2),
            Doctor::new("d", "Dermatology").with_rating(4.9),
            Doctor::new("e", "Dermatology").with_rating(3.0),
        ];

        let result = matcher.match_report(&report, candidates);

        // b and d tie at 85, a/c/e tie at 70
        assert_eq!(ids(&result), vec!["b", "d", "a", "c", "e"]);
        for pair in result.matches.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
    }

    #[test]
    fn test_limits() {
        let matcher = Matcher::with_defaults();
        let report = SymptomReport::new(["feeling tired"]);
        let candidates: Vec<Doctor> = (0..15)
            .map(|i| Doctor::new(i.to_string(), "General Practice"))
            .collect();

        assert_eq!(matcher.match_report(&report, candidates.clone()).matches.len(), 10);
        assert_eq!(matcher.quick_match(&report, candidates.clone()).matches.len(), 5);
        assert_eq!(matcher.find_matches(&report, candidates, None, 3).matches.len(), 3);

        let custom = Matcher::new(
            Arc::new(Taxonomy::default()),
            MatchLimits { default_limit: 2, quick_limit: 1 },
        );
        let candidates = vec![
            Doctor::new("1", "General Practice"),
            Doctor::new("2", "General Practice"),
            Doctor::new("3", "General Practice"),
        ];
        assert_eq!(custom.match_report(&report, candidates.clone()).matches.len(), 2);
        assert_eq!(custom.quick_match(&report, candidates).matches.len(), 1);
    }

    #[test]
    fn test_distance_reported() {
        let matcher = Matcher::with_defaults();
        let report = SymptomReport::new(["sinus pressure"]).with_location(Location::new(40.7128, -74.0060));

        let candidates = vec![
            Doctor::new("far", "ENT").with_coordinates(41.5, -74.0),
            Doctor::new("near", "ENT").with_coordinates(40.72, -74.01),
            Doctor::new("nowhere", "ENT"),
        ];

        let result = matcher.match_report(&report, candidates);

        assert_eq!(ids(&result), vec!["near", "far", "nowhere"]);
        assert!(result.matches[0].distance.unwrap() < 2.0);
        assert!(result.matches[1].distance.unwrap() > 50.0);
        assert_eq!(result.matches[2].distance, None);
    }
}
