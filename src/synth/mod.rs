//! Synthetic training-set generation from per-disease reference data.
//!
//! Each disease contributes one canonical vitals record and a list of
//! symptom phrases; the generator expands them into many noisy labeled rows
//! so a classifier sees within-class variance instead of one point per label.

pub mod range;

pub use range::*;

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{SymptomCatalog, VitalKind};
use crate::schema::{build_feature_vector, FeatureSchema, FeatureVector, SchemaError};

#[derive(Error, Debug)]
pub enum SynthError {
    /// A disease with an empty phrase list is caller-supplied bad data, not a
    /// runtime transient.
    #[error("disease '{0}' has no symptom phrases")]
    NoSymptoms(String),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Reference vitals for one disease, as raw text fields.
///
/// Each field holds whatever the source table said: a range ("126-200"),
/// the literal "normal"/"n/a", or free text. Resolution to numbers happens
/// per sample in [`parse_vital_value`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalSpec {
    pub fasting_blood_sugar: String,
    pub random_blood_sugar: String,
    pub hba1c: String,
    pub systolic_bp: String,
    pub diastolic_bp: String,
}

impl VitalSpec {
    pub fn field(&self, kind: VitalKind) -> &str {
        match kind {
            VitalKind::FastingBloodSugar => &self.fasting_blood_sugar,
            VitalKind::RandomBloodSugar => &self.random_blood_sugar,
            VitalKind::Hba1c => &self.hba1c,
            VitalKind::SystolicBp => &self.systolic_bp,
            VitalKind::DiastolicBp => &self.diastolic_bp,
        }
    }

    /// A spec where every vital reads "normal".
    pub fn all_normal() -> Self {
        VitalSpec {
            fasting_blood_sugar: "normal".into(),
            random_blood_sugar: "normal".into(),
            hba1c: "normal".into(),
            systolic_bp: "normal".into(),
            diastolic_bp: "normal".into(),
        }
    }
}

/// Everything known about one disease: exactly one vitals record plus its
/// associated free-text symptom phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseProfile {
    pub disease: String,
    pub vitals: VitalSpec,
    pub symptoms: Vec<String>,
}

/// One labeled sample, consumed in bulk by an external trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRow {
    pub disease: String,
    pub features: FeatureVector,
}

/// Bounds on the per-sample symptom phrase subset.
const MIN_PHRASES: usize = 2;
const MAX_PHRASES: usize = 5;

/// Expand disease profiles into noisy labeled rows.
///
/// Per sample: every vital is re-parsed through [`parse_vital_value`] (fresh
/// noise each time, never cached), a without-replacement subset of the
/// disease's phrases is drawn (size uniform between 2 and min(5, available),
/// clamped down when fewer than 2 phrases exist), and each catalog symptom is
/// set to 1 iff any selected phrase contains its canonical name with
/// underscores read as spaces. Total rows = profiles × `samples_per_disease`.
///
/// `samples_per_disease` is a tuning knob, not a contract; counts below
/// roughly 20 leave too little within-class variance for a classifier to
/// learn from.
pub fn generate_samples<R: Rng + ?Sized>(
    profiles: &[DiseaseProfile],
    samples_per_disease: usize,
    catalog: &SymptomCatalog,
    rng: &mut R,
) -> Result<Vec<TrainingRow>, SynthError> {
    let schema = FeatureSchema::with_symptoms(catalog);
    let mut rows = Vec::with_capacity(profiles.len() * samples_per_disease);

    for profile in profiles {
        if profile.symptoms.is_empty() {
            return Err(SynthError::NoSymptoms(profile.disease.clone()));
        }

        for _ in 0..samples_per_disease {
            let mut vitals = HashMap::with_capacity(VitalKind::ALL.len());
            for kind in VitalKind::ALL {
                let value = parse_vital_value(profile.vitals.field(kind), rng);
                vitals.insert(kind.as_str().to_string(), value);
            }

            let selected = select_phrases(&profile.symptoms, rng);
            let mut symptoms = HashMap::with_capacity(catalog.len());
            for rule in catalog.rules() {
                let needle = rule.name.replace('_', " ");
                let hit = selected
                    .iter()
                    .any(|phrase| phrase.to_lowercase().contains(&needle));
                symptoms.insert(rule.name.clone(), u8::from(hit));
            }

            let features = build_feature_vector(&vitals, &symptoms, &schema)?;
            rows.push(TrainingRow {
                disease: profile.disease.clone(),
                features,
            });
        }
        tracing::debug!(disease = %profile.disease, samples_per_disease, "expanded disease profile");
    }

    tracing::info!(
        rows = rows.len(),
        diseases = profiles.len(),
        "synthetic training set ready"
    );
    Ok(rows)
}

/// Draw a without-replacement phrase subset for one sample.
fn select_phrases<'a, R: Rng + ?Sized>(phrases: &'a [String], rng: &mut R) -> Vec<&'a String> {
    let max = phrases.len().min(MAX_PHRASES);
    let min = MIN_PHRASES.min(max);
    let count = rng.gen_range(min..=max);
    phrases.choose_multiple(rng, count).collect()
}
