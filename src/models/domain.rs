use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use validator::Validate;

/// Specialization every report falls back to when no keyword matches
pub const GENERAL_PRACTICE: &str = "General Practice";

/// Reads an explicit `null` as the type's default, same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keeps a present `null` distinct from a missing key
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Patient or doctor position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Self-reported severity of a symptom report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    #[default]
    Moderate,
    Severe,
}

/// How the symptoms were captured on the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    #[default]
    Text,
    Voice,
    Visual,
}

/// A patient's symptom report as submitted for triage
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SymptomReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub input_method: InputMethod,
    /// May be empty; classification then falls back to general practice
    #[serde(default, deserialize_with = "null_as_default")]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    /// Free-text guidance returned by the AI model, if any
    #[serde(default)]
    pub ai_analysis: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub location: Option<Location>,
}

impl SymptomReport {
    pub fn new<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symptoms: symptoms.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_analysis(mut self, analysis: impl Into<String>) -> Self {
        self.ai_analysis = Some(analysis.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// AI analysis text, empty when the model gave none
    pub fn analysis(&self) -> &str {
        self.ai_analysis.as_deref().unwrap_or("")
    }
}

/// Raw coordinates as stored on a doctor record; either half may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// Practice address of a doctor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorLocation {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// Weekly schedule plus intake flag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    /// `None` when the key is missing, `Some(None)` for an explicit `null`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub accepting_new_patients: Option<Option<bool>>,
    /// Weekday keys (`monday`, ...) mapped to opening slots
    #[serde(flatten)]
    pub schedule: BTreeMap<String, Value>,
}

/// Doctor record from the directory snapshot
///
/// Every field is optional on the wire; helpers apply the defaults the
/// scorer relies on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialization: String,
    #[serde(default)]
    pub hospital: Option<String>,
    #[serde(default)]
    pub location: Option<DoctorLocation>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub availability: Option<Availability>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub consultation_fee: Option<f64>,
    /// Fields this crate does not interpret, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Doctor {
    pub fn new(id: impl Into<String>, specialization: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            specialization: specialization.into(),
            ..Self::default()
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        let location = self.location.get_or_insert_with(DoctorLocation::default);
        location.coordinates = Some(Coordinates {
            lat: Some(lat),
            lng: Some(lng),
        });
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        let location = self.location.get_or_insert_with(DoctorLocation::default);
        location.city = Some(city.into());
        self
    }

    pub fn with_accepting_new_patients(mut self, accepting: bool) -> Self {
        let availability = self.availability.get_or_insert_with(Availability::default);
        availability.accepting_new_patients = Some(Some(accepting));
        self
    }

    /// Stored coordinates, `(None, None)` when the record has none
    pub fn coordinates(&self) -> (Option<f64>, Option<f64>) {
        self.location
            .as_ref()
            .and_then(|l| l.coordinates)
            .map(|c| (c.lat, c.lng))
            .unwrap_or((None, None))
    }

    pub fn city(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.city.as_deref())
    }

    /// Rating, defaulting to 0 when unrated
    pub fn rating(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Intake flag: true when the key is missing, false when it is `null`
    pub fn accepting_new_patients(&self) -> bool {
        match self.availability.as_ref().and_then(|a| a.accepting_new_patients) {
            None => true,
            Some(flag) => flag.unwrap_or(false),
        }
    }

    pub fn is_general_practice(&self) -> bool {
        self.specialization == GENERAL_PRACTICE
    }
}

/// A scored doctor returned by the matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorMatch {
    #[serde(flatten)]
    pub doctor: Doctor,
    pub match_score: f64,
    /// Kilometres to the patient; `None` when either side has no usable position
    pub distance: Option<f64>,
}

/// A doctor returned by radius search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyDoctor {
    #[serde(flatten)]
    pub doctor: Doctor,
    pub distance: f64,
}

/// Emergency categories recognised by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyKind {
    Stroke,
    HeartAttack,
    SevereAllergicReaction,
    SevereBleeding,
    Unconscious,
}

impl EmergencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyKind::Stroke => "stroke",
            EmergencyKind::HeartAttack => "heart_attack",
            EmergencyKind::SevereAllergicReaction => "severe_allergic_reaction",
            EmergencyKind::SevereBleeding => "severe_bleeding",
            EmergencyKind::Unconscious => "unconscious",
        }
    }

    /// First-aid instruction shown with a finding of this kind
    pub fn default_action(&self) -> &'static str {
        match self {
            EmergencyKind::Stroke => {
                "Call 911 immediately. Note time symptoms started. DO NOT drive yourself."
            }
            EmergencyKind::HeartAttack => {
                "Call 911. Chew aspirin if available. Sit down and stay calm."
            }
            EmergencyKind::SevereAllergicReaction => "Call 911. Use EpiPen if available.",
            EmergencyKind::SevereBleeding => {
                "Call 911. Apply pressure to wound. Elevate if possible."
            }
            EmergencyKind::Unconscious => {
                "Call 911 immediately. Check breathing. Begin CPR if trained."
            }
        }
    }
}

impl fmt::Display for EmergencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    #[default]
    Critical,
}

/// One detected emergency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyFinding {
    #[serde(rename = "type")]
    pub kind: EmergencyKind,
    pub severity: FindingSeverity,
    pub action: String,
}

/// Outcome of emergency detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyAssessment {
    pub is_emergency: bool,
    pub emergencies: Vec<EmergencyFinding>,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facial_indicators: Option<BTreeMap<String, Value>>,
}

impl EmergencyAssessment {
    /// Kind of the first finding, if any
    pub fn primary_kind(&self) -> Option<EmergencyKind> {
        self.emergencies.first().map(|f| f.kind)
    }
}
