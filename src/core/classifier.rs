use serde::Serialize;
use std::sync::Arc;
use crate::core::taxonomy::Taxonomy;
use crate::models::GENERAL_PRACTICE;

/// Non-empty set of specializations a report should be routed to
///
/// Kept in taxonomy order so that output is stable across calls. Built only
/// by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpecializationSet(Vec<String>);

impl SpecializationSet {
    /// The fallback set, `{"General Practice"}`
    pub fn general_practice() -> Self {
        Self(vec![GENERAL_PRACTICE.to_string()])
    }

    pub fn contains(&self, specialization: &str) -> bool {
        self.0.iter().any(|s| s == specialization)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true: the set always holds at least one entry
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Lower-cased symptoms joined with single spaces
pub(crate) fn symptom_text<S: AsRef<str>>(symptoms: &[S]) -> String {
    symptoms
        .iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when any keyword occurs anywhere in the haystack
///
/// No tokenisation: "ear" matches inside "heart".
#[inline]
pub(crate) fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

/// Maps symptom text to medical specializations by keyword
#[derive(Debug, Clone)]
pub struct SpecializationClassifier {
    taxonomy: Arc<Taxonomy>,
}

impl SpecializationClassifier {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Specializations whose keywords appear in the symptoms or the AI analysis
    pub fn classify<S: AsRef<str>>(&self, symptoms: &[S], analysis: &str) -> SpecializationSet {
        let haystack = format!("{} {}", symptom_text(symptoms), analysis.to_lowercase());

        let matches: Vec<String> = self
            .taxonomy
            .specializations
            .iter()
            .filter(|rule| contains_any(&haystack, &rule.keywords))
            .map(|rule| rule.specialization.clone())
            .collect();

        if matches.is_empty() {
            SpecializationSet::general_practice()
        } else {
            SpecializationSet(matches)
        }
    }
}

impl Default for SpecializationClassifier {
    fn default() -> Self {
        Self::new(Arc::new(Taxonomy::default()))
    }
}
