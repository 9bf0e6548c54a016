// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Availability, Coordinates, Doctor, DoctorLocation, DoctorMatch, EmergencyAssessment,
    EmergencyFinding, EmergencyKind, FindingSeverity, InputMethod, Location, NearbyDoctor,
    Severity, SymptomReport, GENERAL_PRACTICE,
};
pub use requests::{EmergencyRequest, FacialAnalysis, NearbyRequest, SearchQuery};
pub use responses::{EmergencyContacts, IntakeOutcome, MatchResponse};
