use clap::{Parser, Subcommand};
use curasyn_match::config::Settings;
use curasyn_match::models::{EmergencyContacts, MatchResponse, NearbyRequest, SearchQuery};
use curasyn_match::services::{
    load_emergency_request, load_report, validate_nearby, DoctorDirectory,
};
use curasyn_match::{EmergencyDetector, Matcher, Triage};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "curasyn-match")]
#[command(about = "Symptom triage and doctor matching")]
struct Cli {
    /// Settings file; defaults to config/default.toml plus CURASYN__ variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a symptom report for emergencies, then match doctors
    Intake {
        /// Doctor directory snapshot (JSON array)
        #[arg(long)]
        doctors: PathBuf,
        /// Symptom report (JSON)
        #[arg(long)]
        report: PathBuf,
    },
    /// Rank doctors for a symptom report
    Match {
        #[arg(long)]
        doctors: PathBuf,
        #[arg(long)]
        report: PathBuf,
        /// Use the short result list
        #[arg(long)]
        quick: bool,
    },
    /// Check typed symptoms or facial analysis for emergencies
    Emergency {
        /// Emergency request (JSON with `symptoms` and/or `facial_analysis`)
        #[arg(long)]
        request: PathBuf,
    },
    /// Doctors around a point
    Nearby {
        #[arg(long)]
        doctors: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Radius in metres
        #[arg(long)]
        radius: Option<f64>,
        #[arg(long)]
        specialization: Option<String>,
    },
    /// Case-insensitive search by specialization and city
    Search {
        #[arg(long)]
        doctors: PathBuf,
        #[arg(long)]
        specialization: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Emergency phone numbers
    Contacts,
}

fn init_logging(settings: &Settings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    match log_format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match loaded {
        Ok(settings) => {
            init_logging(&settings);
            settings
        }
        Err(e) => {
            init_logging(&Settings::default());
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let taxonomy = settings.taxonomy();
    let limits = settings.match_limits();
    let directory_limits = settings.directory_limits();

    info!("Configuration loaded, match limits: {:?}", limits);

    match cli.command {
        Commands::Intake { doctors, report } => {
            let directory = DoctorDirectory::from_json_file(&doctors, directory_limits)?;
            let report = load_report(&report)?;

            let triage = Triage::new(taxonomy, limits);
            let outcome = triage.assess(&report, directory.snapshot());

            info!(
                "Report {} triaged: emergency={}, {} doctors matched",
                outcome.report_id,
                outcome.emergency_detected,
                outcome.matched_doctors.len()
            );
            print_json(&outcome)?;
        }
        Commands::Match { doctors, report, quick } => {
            let directory = DoctorDirectory::from_json_file(&doctors, directory_limits)?;
            let report = load_report(&report)?;

            let matcher = Matcher::new(taxonomy, limits);
            let result = if quick {
                matcher.quick_match(&report, directory.snapshot())
            } else {
                matcher.match_report(&report, directory.snapshot())
            };

            info!(
                "Returning {} matches (from {} candidates)",
                result.matches.len(),
                result.total_candidates
            );
            print_json(&MatchResponse {
                specializations: result.specializations.into_vec(),
                matches: result.matches,
                total_candidates: result.total_candidates,
            })?;
        }
        Commands::Emergency { request } => {
            let request = load_emergency_request(&request)?;
            let assessment = EmergencyDetector::new(taxonomy).detect_request(&request);
            print_json(&assessment)?;
        }
        Commands::Nearby { doctors, lat, lng, radius, specialization } => {
            let request = NearbyRequest {
                lat,
                lng,
                radius: radius.unwrap_or(settings.matching.nearby_radius_m),
                specialization,
            };
            validate_nearby(&request)?;

            let directory = DoctorDirectory::from_json_file(&doctors, directory_limits)?;
            print_json(&directory.nearby(&request))?;
        }
        Commands::Search { doctors, specialization, city } => {
            let directory = DoctorDirectory::from_json_file(&doctors, directory_limits)?;
            print_json(&directory.search(&SearchQuery { specialization, city }))?;
        }
        Commands::Contacts => {
            print_json(&EmergencyContacts::default())?;
        }
    }

    Ok(())
}
