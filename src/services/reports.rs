use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;
use validator::Validate;
use crate::models::{EmergencyRequest, NearbyRequest, SymptomReport};

/// Errors that can occur when reading a request file
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Failed to read request file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid request JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, IntakeError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Parse and validate a symptom report
pub fn parse_report(json: &str) -> Result<SymptomReport, IntakeError> {
    let report: SymptomReport = serde_json::from_str(json)?;
    report.validate()?;
    Ok(report)
}

pub fn load_report<P: AsRef<Path>>(path: P) -> Result<SymptomReport, IntakeError> {
    let report: SymptomReport = read_json(path)?;
    report.validate()?;
    Ok(report)
}

pub fn load_emergency_request<P: AsRef<Path>>(path: P) -> Result<EmergencyRequest, IntakeError> {
    read_json(path)
}

pub fn validate_nearby(request: &NearbyRequest) -> Result<(), IntakeError> {
    request.validate()?;
    Ok(())
}
