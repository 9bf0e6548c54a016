use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use crate::core::distance::{calculate_bounding_box, round2};
use crate::core::filters::{matches_search, within_radius};
use crate::models::{Doctor, NearbyDoctor, NearbyRequest, SearchQuery};

/// Errors that can occur when loading a directory snapshot
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read directory file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid directory JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result caps for directory queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryLimits {
    /// Listing and free-text search
    pub search_limit: usize,
    /// Radius search
    pub nearby_limit: usize,
}

impl Default for DirectoryLimits {
    fn default() -> Self {
        Self {
            search_limit: 50,
            nearby_limit: 10,
        }
    }
}

/// Read-only snapshot of the doctor directory
///
/// Cloning is cheap; all clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct DoctorDirectory {
    doctors: Arc<Vec<Doctor>>,
    limits: DirectoryLimits,
}

impl DoctorDirectory {
    pub fn new(doctors: Vec<Doctor>, limits: DirectoryLimits) -> Self {
        Self {
            doctors: Arc::new(doctors),
            limits,
        }
    }

    /// Load a JSON array of doctor records
    pub fn from_json_str(json: &str, limits: DirectoryLimits) -> Result<Self, DirectoryError> {
        let doctors: Vec<Doctor> = serde_json::from_str(json)?;
        Ok(Self::new(doctors, limits))
    }

    pub fn from_json_file<P: AsRef<Path>>(
        path: P,
        limits: DirectoryLimits,
    ) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let directory = Self::from_json_str(&json, limits)?;

        tracing::info!(
            "Loaded {} doctors from {}",
            directory.len(),
            path.display()
        );

        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    /// Every record, in load order
    pub fn all(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Owned copy of the snapshot for the matcher
    pub fn snapshot(&self) -> Vec<Doctor> {
        self.doctors.to_vec()
    }

    pub fn find(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id.as_deref() == Some(id))
    }

    /// Doctors with exactly this specialization, or everyone when `None`
    pub fn by_specialization(&self, specialization: Option<&str>) -> Vec<Doctor> {
        self.doctors
            .iter()
            .filter(|d| specialization.map_or(true, |s| d.specialization == s))
            .take(self.limits.search_limit)
            .cloned()
            .collect()
    }

    /// Case-insensitive search on specialization and city
    pub fn search(&self, query: &SearchQuery) -> Vec<Doctor> {
        self.doctors
            .iter()
            .filter(|d| {
                matches_search(d, query.specialization.as_deref(), query.city.as_deref())
            })
            .take(self.limits.search_limit)
            .cloned()
            .collect()
    }

    /// Doctors within `request.radius` metres, nearest first
    ///
    /// Distances use the flat-earth approximation and are rounded to two
    /// decimals before sorting.
    pub fn nearby(&self, request: &NearbyRequest) -> Vec<NearbyDoctor> {
        let radius_km = request.radius / 1000.0;
        let bbox = calculate_bounding_box(request.lat, request.lng, radius_km);

        let mut nearby: Vec<NearbyDoctor> = self
            .doctors
            .iter()
            .filter(|d| {
                request
                    .specialization
                    .as_deref()
                    .map_or(true, |s| d.specialization == s)
            })
            .filter_map(|d| {
                within_radius(d, request.lat, request.lng, radius_km, &bbox).map(|distance| {
                    NearbyDoctor {
                        doctor: d.clone(),
                        distance: round2(distance),
                    }
                })
            })
            .collect();

        nearby.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        nearby.truncate(self.limits.nearby_limit);

        tracing::debug!(
            "Found {} doctors within {}m of ({}, {})",
            nearby.len(),
            request.radius,
            request.lat,
            request.lng
        );

        nearby
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> DoctorDirectory {
        DoctorDirectory::new(
            vec![
                Doctor::new("1", "Cardiology").with_city("New York").with_coordinates(40.72, -74.0),
                Doctor::new("2", "General Practice").with_city("Brooklyn").with_coordinates(40.70, -74.0),
                Doctor::new("3", "Cardiology").with_city("Boston").with_coordinates(42.36, -71.06),
                Doctor::new("4", "Dermatology").with_city("New York").with_coordinates(40.71, -74.0),
                Doctor::new("5", "Neurology"),
            ],
            DirectoryLimits::default(),
        )
    }

    fn ids<'a>(doctors: impl IntoIterator<Item = &'a Doctor>) -> Vec<&'a str> {
        doctors.into_iter().filter_map(|d| d.id.as_deref()).collect()
    }

    #[test]
    fn test_null_fields_do_not_fail_the_snapshot() {
        let dir = DoctorDirectory::from_json_str(
            r#"[{"_id": "a", "specialization": "Neurology"}, {"_id": "b", "specialization": null, "name": null}]"#,
            DirectoryLimits::default(),
        )
        .unwrap();

        assert_eq!(dir.len(), 2);
        let b = dir.find("b").unwrap();
        assert_eq!(b.specialization, "");
        assert_eq!(b.name, "");
    }

    #[test]
    fn test_by_specialization() {
        let dir = directory();
        assert_eq!(ids(&dir.by_specialization(Some("Cardiology"))), vec!["1", "3"]);
        assert_eq!(dir.by_specialization(None).len(), 5);
        assert!(dir.by_specialization(Some("cardiology")).is_empty());
    }

    #[test]
    fn test_search_limit() {
        let doctors = (0..60).map(|i| Doctor::new(i.to_string(), "ENT")).collect();
        let dir = DoctorDirectory::new(doctors, DirectoryLimits::default());
        assert_eq!(dir.search(&SearchQuery::default()).len(), 50);
    }

    #[test]
    fn test_search() {
        let dir = directory();
        let query = SearchQuery {
            specialization: Some("cardio".to_string()),
            city: Some("new york".to_string()),
        };
        assert_eq!(ids(&dir.search(&query)), vec!["1"]);
    }

    #[test]
    fn test_nearby_sorted_and_filtered() {
        let dir = directory();
        let request = NearbyRequest::new(40.704, -74.0);

        let nearby = dir.nearby(&request);
        assert_eq!(ids(nearby.iter().map(|n| &n.doctor)), vec!["2", "4", "1"]);
        assert_eq!(nearby[0].distance, 0.44);
        assert_eq!(nearby[1].distance, 0.67);

        let mut request = request;
        request.specialization = Some("Cardiology".to_string());
        assert_eq!(ids(dir.nearby(&request).iter().map(|n| &n.doctor)), vec!["1"]);
    }

    #[test]
    fn test_find() {
        let dir = directory();
        assert_eq!(dir.find("3").map(|d| d.specialization.as_str()), Some("Cardiology"));
        assert!(dir.find("missing").is_none());
    }

    #[test]
    fn test_invalid_json() {
        let err = DoctorDirectory::from_json_str("{not json", DirectoryLimits::default());
        assert!(matches!(err, Err(DirectoryError::JsonError(_))));
    }
}
