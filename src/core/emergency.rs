use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use crate::core::classifier::{contains_any, symptom_text};
use crate::core::taxonomy::Taxonomy;
use crate::models::requests::indicator_set;
use crate::models::{
    EmergencyAssessment, EmergencyFinding, EmergencyKind, EmergencyRequest, FindingSeverity,
};

pub const CALL_EMERGENCY: &str = "Call 911 immediately";
pub const SCHEDULE_APPOINTMENT: &str = "Schedule appointment with doctor";

/// Action attached to strokes flagged by the facial model
pub const FACIAL_STROKE_ACTION: &str = "Call 911 immediately. Note time symptoms started.";

/// Flags symptom reports that need emergency services rather than an appointment
#[derive(Debug, Clone)]
pub struct EmergencyDetector {
    taxonomy: Arc<Taxonomy>,
}

impl EmergencyDetector {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Detect emergencies in typed symptoms
    ///
    /// Findings follow the taxonomy's rule order.
    pub fn detect<S: AsRef<str>>(&self, symptoms: &[S]) -> EmergencyAssessment {
        let haystack = symptom_text(symptoms);

        let findings: Vec<EmergencyFinding> = self
            .taxonomy
            .emergencies
            .iter()
            .filter(|rule| contains_any(&haystack, &rule.keywords))
            .map(|rule| EmergencyFinding {
                kind: rule.kind,
                severity: FindingSeverity::Critical,
                action: rule.action().to_string(),
            })
            .collect();

        if !findings.is_empty() {
            tracing::debug!(
                "Emergency detected: {:?}",
                findings.iter().map(|f| f.kind.as_str()).collect::<Vec<_>>()
            );
        }

        assessment(findings, None)
    }

    /// Detect a stroke from the facial model's indicators
    ///
    /// Any set indicator counts; the values are echoed back unchanged.
    pub fn detect_facial(&self, indicators: &BTreeMap<String, Value>) -> EmergencyAssessment {
        if !indicators.values().any(indicator_set) {
            return assessment(Vec::new(), None);
        }

        tracing::debug!("Facial stroke indicators present: {:?}", indicators);

        let finding = EmergencyFinding {
            kind: EmergencyKind::Stroke,
            severity: FindingSeverity::Critical,
            action: FACIAL_STROKE_ACTION.to_string(),
        };
        assessment(vec![finding], Some(indicators.clone()))
    }

    /// Typed symptoms take precedence; facial analysis is only consulted without them
    pub fn detect_request(&self, request: &EmergencyRequest) -> EmergencyAssessment {
        if !request.symptoms.is_empty() {
            return self.detect(&request.symptoms);
        }

        match &request.facial_analysis {
            Some(facial) => self.detect_facial(&facial.stroke_indicators),
            None => assessment(Vec::new(), None),
        }
    }
}

impl Default for EmergencyDetector {
    fn default() -> Self {
        Self::new(Arc::new(Taxonomy::default()))
    }
}

fn assessment(
    emergencies: Vec<EmergencyFinding>,
    facial_indicators: Option<BTreeMap<String, Value>>,
) -> EmergencyAssessment {
    let is_emergency = !emergencies.is_empty();
    let recommendation = if is_emergency { CALL_EMERGENCY } else { SCHEDULE_APPOINTMENT };

    EmergencyAssessment {
        is_emergency,
        emergencies,
        recommendation: recommendation.to_string(),
        facial_indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FacialAnalysis;
    use serde_json::json;

    fn kinds(assessment: &EmergencyAssessment) -> Vec<EmergencyKind> {
        assessment.emergencies.iter().map(|f| f.kind).collect()
    }

    #[test]
    fn test_heart_attack_detected() {
        let detector = EmergencyDetector::default();
        let result = detector.detect(&["chest pain", "shortness of breath"]);

        assert!(result.is_emergency);
        assert_eq!(kinds(&result), vec![EmergencyKind::HeartAttack]);
        assert_eq!(result.recommendation, CALL_EMERGENCY);
        assert_eq!(result.emergencies[0].severity, FindingSeverity::Critical);
        assert_eq!(
            result.emergencies[0].action,
            "Call 911. Chew aspirin if available. Sit down and stay calm."
        );
    }

    #[test]
    fn test_findings_follow_taxonomy_order() {
        let detector = EmergencyDetector::default();
        let result = detector.detect(&["Passed out", "facial droop"]);

        assert_eq!(kinds(&result), vec![EmergencyKind::Stroke, EmergencyKind::Unconscious]);
    }

    #[test]
    fn test_no_emergency() {
        let detector = EmergencyDetector::default();
        let result = detector.detect(&["mild headache"]);

        assert!(!result.is_emergency);
        assert!(result.emergencies.is_empty());
        assert_eq!(result.recommendation, SCHEDULE_APPOINTMENT);
    }

    #[test]
    fn test_analysis_is_not_searched() {
        // only the symptom list feeds the detector
        let detector = EmergencyDetector::default();
        let result = detector.detect(&["sore knee"]);
        assert!(!result.is_emergency);
    }

    #[test]
    fn test_facial_indicators() {
        let detector = EmergencyDetector::default();

        let mut indicators = BTreeMap::new();
        indicators.insert("facial_droop".to_string(), json!(false));
        indicators.insert("asymmetry".to_string(), json!(0.0));
        assert!(!detector.detect_facial(&indicators).is_emergency);

        indicators.insert("mouth_asymmetry".to_string(), json!(true));
        let result = detector.detect_facial(&indicators);
        assert!(result.is_emergency);
        assert_eq!(kinds(&result), vec![EmergencyKind::Stroke]);
        assert_eq!(result.emergencies[0].action, FACIAL_STROKE_ACTION);
        assert_eq!(result.facial_indicators, Some(indicators));
    }

    #[test]
    fn test_request_prefers_symptoms() {
        let detector = EmergencyDetector::default();

        let mut facial = FacialAnalysis::default();
        facial.stroke_indicators.insert("facial_droop".to_string(), json!(true));

        let request = EmergencyRequest {
            symptoms: vec!["itchy skin".to_string()],
            facial_analysis: Some(facial.clone()),
        };
        assert!(!detector.detect_request(&request).is_emergency);

        let request = EmergencyRequest {
            symptoms: vec![],
            facial_analysis: Some(facial),
        };
        assert!(detector.detect_request(&request).is_emergency);

        assert!(!detector.detect_request(&EmergencyRequest::default()).is_emergency);
    }

    #[test]
    fn test_client_payload_is_stroke() {
        let detector = EmergencyDetector::default();
        let request: EmergencyRequest = serde_json::from_str(
            r#"{"facial_analysis": {"stroke_indicators": {"asymmetry": 6.5, "facialDrop": true, "eyeAsymmetry": false, "detected": true}}}"#,
        )
        .unwrap();

        let result = detector.detect_request(&request);
        assert!(result.is_emergency);
        assert_eq!(kinds(&result), vec![EmergencyKind::Stroke]);

        let echoed = result.facial_indicators.unwrap();
        assert_eq!(echoed["asymmetry"], json!(6.5));
        assert_eq!(echoed["eyeAsymmetry"], json!(false));
    }

    #[test]
    fn test_numeric_asymmetry_alone() {
        let detector = EmergencyDetector::default();

        let mut indicators = BTreeMap::new();
        indicators.insert("asymmetry".to_string(), json!(3.2));
        indicators.insert("detected".to_string(), json!(false));
        assert!(detector.detect_facial(&indicators).is_emergency);
    }
}
