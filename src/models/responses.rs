use serde::{Deserialize, Serialize};
use crate::models::domain::{DoctorMatch, EmergencyAssessment, EmergencyKind};

/// Result of running a symptom report through triage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeOutcome {
    pub report_id: uuid::Uuid,
    pub emergency_detected: bool,
    pub emergency_type: Option<EmergencyKind>,
    pub emergency: EmergencyAssessment,
    pub ai_analysis: Option<String>,
    pub specializations: Vec<String>,
    /// Empty whenever an emergency was detected
    pub matched_doctors: Vec<DoctorMatch>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Response for a match request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub specializations: Vec<String>,
    pub matches: Vec<DoctorMatch>,
    pub total_candidates: usize,
}

/// Numbers shown on the emergency screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContacts {
    pub emergency: String,
    pub poison_control: String,
    pub suicide_prevention: String,
    pub crisis_text_line: String,
}

impl Default for EmergencyContacts {
    fn default() -> Self {
        Self {
            emergency: "911".to_string(),
            poison_control: "1-800-222-1222".to_string(),
            suicide_prevention: "988".to_string(),
            crisis_text_line: "Text HOME to 741741".to_string(),
        }
    }
}
