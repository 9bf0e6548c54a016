use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use validator::Validate;

/// Request to list doctors around a point
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    /// Search radius in metres
    #[serde(default = "default_radius_m")]
    #[validate(range(min = 0.0))]
    pub radius: f64,
    #[serde(default)]
    pub specialization: Option<String>,
}

pub fn default_radius_m() -> f64 {
    5000.0
}

impl NearbyRequest {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            radius: default_radius_m(),
            specialization: None,
        }
    }
}

/// Free-text directory search; both criteria are optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Output of the client-side facial model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacialAnalysis {
    /// Indicator name (`facialDrop`, `asymmetry`, ...) to the model's raw value
    #[serde(default)]
    pub stroke_indicators: BTreeMap<String, Value>,
}

impl FacialAnalysis {
    /// True when any indicator is set
    pub fn any_indicator(&self) -> bool {
        self.stroke_indicators.values().any(indicator_set)
    }
}

/// `true`, a non-zero number, or a non-empty string, array or object
pub fn indicator_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Emergency check from typed symptoms or facial analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmergencyRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub facial_analysis: Option<FacialAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_default_radius() {
        let req: NearbyRequest = serde_json::from_str(r#"{"lat": 40.7, "lng": -74.0}"#).unwrap();
        assert_eq!(req.radius, 5000.0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_nearby_negative_radius_rejected() {
        let mut req = NearbyRequest::new(40.7, -74.0);
        req.radius = -1.0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_emergency_request_facial_only() {
        let req: EmergencyRequest = serde_json::from_str(
            r#"{"facial_analysis": {"stroke_indicators": {"facial_droop": true}}}"#,
        )
        .unwrap();
        assert!(req.symptoms.is_empty());
        assert_eq!(
            req.facial_analysis.unwrap().stroke_indicators.get("facial_droop"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn test_client_facial_payload() {
        let req: EmergencyRequest = serde_json::from_str(
            r#"{"facial_analysis": {"stroke_indicators": {"asymmetry": 6.5, "facialDrop": true, "eyeAsymmetry": false, "detected": true}}}"#,
        )
        .unwrap();

        let facial = req.facial_analysis.unwrap();
        assert_eq!(facial.stroke_indicators.len(), 4);
        assert!(facial.any_indicator());
    }

    #[test]
    fn test_indicator_truthiness() {
        use serde_json::json;

        for value in [json!(true), json!(6.5), json!(-1), json!("left"), json!([0]), json!({"a": 1})] {
            assert!(indicator_set(&value), "{} should be set", value);
        }
        for value in [json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({}), Value::Null] {
            assert!(!indicator_set(&value), "{} should be unset", value);
        }
    }
}
