use std::sync::Arc;
use crate::core::{
    emergency::EmergencyDetector,
    matcher::{MatchLimits, Matcher},
    taxonomy::Taxonomy,
};
use crate::models::{Doctor, IntakeOutcome, SymptomReport};

/// Symptom intake: emergency screening first, doctor matching otherwise
#[derive(Debug, Clone)]
pub struct Triage {
    detector: EmergencyDetector,
    matcher: Matcher,
}

impl Triage {
    pub fn new(taxonomy: Arc<Taxonomy>, limits: MatchLimits) -> Self {
        Self {
            detector: EmergencyDetector::new(taxonomy.clone()),
            matcher: Matcher::new(taxonomy, limits),
        }
    }

    pub fn detector(&self) -> &EmergencyDetector {
        &self.detector
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Assess a report against a directory snapshot
    ///
    /// Matching is skipped entirely when an emergency is detected; the
    /// outcome then carries no doctors.
    pub fn assess(&self, report: &SymptomReport, candidates: Vec<Doctor>) -> IntakeOutcome {
        let emergency = self.detector.detect(&report.symptoms);
        let emergency_type = emergency.primary_kind();

        let (specializations, matched_doctors) = if emergency.is_emergency {
            tracing::info!(
                "Emergency {:?} detected, skipping doctor matching",
                emergency_type
            );
            (Vec::new(), Vec::new())
        } else {
            let result = self.matcher.match_report(report, candidates);
            (result.specializations.into_vec(), result.matches)
        };

        IntakeOutcome {
            report_id: uuid::Uuid::new_v4(),
            emergency_detected: emergency.is_emergency,
            emergency_type,
            emergency,
            ai_analysis: report.ai_analysis.clone(),
            specializations,
            matched_doctors,
            created_at: chrono::Utc::now(),
        }
    }
}

impl Default for Triage {
    fn default() -> Self {
        Self::new(Arc::new(Taxonomy::default()), MatchLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmergencyKind;

    fn doctors() -> Vec<Doctor> {
        vec![
            Doctor::new("c1", "Cardiology").with_rating(4.7),
            Doctor::new("g1", "General Practice").with_rating(4.0),
        ]
    }

    #[test]
    fn test_emergency_short_circuits_matching() {
        let triage = Triage::default();
        let report = SymptomReport::new(["chest pain", "shortness of breath"]);

        let outcome = triage.assess(&report, doctors());

        assert!(outcome.emergency_detected);
        assert_eq!(outcome.emergency_type, Some(EmergencyKind::HeartAttack));
        assert!(outcome.matched_doctors.is_empty());
        assert!(outcome.specializations.is_empty());
    }

    #[test]
    fn test_non_emergency_matches() {
        let triage = Triage::default();
        let report = SymptomReport::new(["heart palpitations"])
            .with_analysis("Likely benign arrhythmia");

        let outcome = triage.assess(&report, doctors());

        assert!(!outcome.emergency_detected);
        assert_eq!(outcome.emergency_type, None);
        assert_eq!(outcome.ai_analysis.as_deref(), Some("Likely benign arrhythmia"));
        assert!(outcome.specializations.contains(&"Cardiology".to_string()));
        assert_eq!(outcome.matched_doctors.len(), 1);
        assert_eq!(outcome.matched_doctors[0].doctor.id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_report_ids_unique() {
        let triage = Triage::default();
        let report = SymptomReport::new(["cough"]);

        let a = triage.assess(&report, vec![]);
        let b = triage.assess(&report, vec![]);
        assert_ne!(a.report_id, b.report_id);
    }
}
