use serde::{Deserialize, Serialize};
use crate::models::EmergencyKind;

/// Keywords that route a report to one specialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecializationRule {
    pub specialization: String,
    pub keywords: Vec<String>,
}

/// Keywords that flag one emergency kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyRule {
    pub kind: EmergencyKind,
    pub keywords: Vec<String>,
    /// Overrides the kind's built-in action text
    #[serde(default)]
    pub action: Option<String>,
}

impl EmergencyRule {
    pub fn action(&self) -> &str {
        self.action
            .as_deref()
            .unwrap_or_else(|| self.kind.default_action())
    }
}

/// Keyword tables shared by both classifiers
///
/// Rule order is significant: classifiers report matches in the order the
/// rules are declared here. Keywords are stored lower-cased and matched as
/// plain substrings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub specializations: Vec<SpecializationRule>,
    pub emergencies: Vec<EmergencyRule>,
}

impl Taxonomy {
    pub fn new(specializations: Vec<SpecializationRule>, emergencies: Vec<EmergencyRule>) -> Self {
        Self {
            specializations,
            emergencies,
        }
        .normalized()
    }

    fn normalized(mut self) -> Self {
        for rule in &mut self.specializations {
            lowercase_all(&mut rule.keywords);
        }
        for rule in &mut self.emergencies {
            lowercase_all(&mut rule.keywords);
        }
        self
    }
}

fn lowercase_all(keywords: &mut Vec<String>) {
    keywords.retain(|k| !k.trim().is_empty());
    for keyword in keywords.iter_mut() {
        *keyword = keyword.to_lowercase();
    }
}

fn rule(specialization: &str, keywords: &[&str]) -> SpecializationRule {
    SpecializationRule {
        specialization: specialization.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

fn emergency(kind: EmergencyKind, keywords: &[&str]) -> EmergencyRule {
    EmergencyRule {
        kind,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        action: None,
    }
}

pub fn default_specialization_rules() -> Vec<SpecializationRule> {
    vec![
        rule("Cardiology", &["heart", "chest pain", "palpitation", "blood pressure"]),
        rule("Neurology", &["headache", "dizziness", "numbness", "stroke", "seizure"]),
        rule("Orthopedics", &["bone", "joint", "fracture", "sprain", "back pain"]),
        rule("Dermatology", &["skin", "rash", "acne", "itch"]),
        rule("Pulmonology", &["breathing", "cough", "asthma", "chest"]),
        rule("Gastroenterology", &["stomach", "abdominal", "nausea", "diarrhea"]),
        rule("ENT", &["ear", "nose", "throat", "hearing", "sinus"]),
        rule("Ophthalmology", &["eye", "vision", "sight"]),
        rule("Pediatrics", &["child", "infant", "baby"]),
    ]
}

pub fn default_emergency_rules() -> Vec<EmergencyRule> {
    vec![
        emergency(
            EmergencyKind::Stroke,
            &[
                "facial droop",
                "arm weakness",
                "speech difficulty",
                "sudden numbness",
                "confusion",
                "trouble seeing",
                "severe headache",
                "loss of balance",
            ],
        ),
        emergency(
            EmergencyKind::HeartAttack,
            &[
                "chest pain",
                "shortness of breath",
                "pain in arm",
                "jaw pain",
                "cold sweat",
                "nausea",
                "lightheaded",
            ],
        ),
        emergency(
            EmergencyKind::SevereAllergicReaction,
            &["difficulty breathing", "swelling", "hives", "throat closing"],
        ),
        emergency(
            EmergencyKind::SevereBleeding,
            &["heavy bleeding", "blood loss", "deep cut"],
        ),
        emergency(
            EmergencyKind::Unconscious,
            &["unconscious", "unresponsive", "passed out"],
        ),
    ]
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new(default_specialization_rules(), default_emergency_rules())
    }
}
