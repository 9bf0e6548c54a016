// Service exports
pub mod directory;
pub mod reports;

pub use directory::{DirectoryError, DirectoryLimits, DoctorDirectory};
pub use reports::{load_emergency_request, load_report, parse_report, validate_nearby, IntakeError};
