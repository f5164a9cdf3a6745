//! Classifier seam and ranked prediction output.
//!
//! The classifier itself (training, persistence) lives outside this crate;
//! this module owns only the boundary: a mock-friendly trait and the policy
//! for turning a raw probability vector into the short list shown to a user.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::FeatureVector;

/// Ranking policy for presented predictions.
pub mod thresholds {
    /// How many top predictions are kept.
    pub const TOP_PREDICTIONS: usize = 3;

    /// Predictions below this probability are not worth showing.
    pub const MIN_PROBABILITY: f64 = 0.05;
}

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("classifier returned {got} probabilities for {expected} classes")]
    LengthMismatch { expected: usize, got: usize },

    #[error("classifier error: {0}")]
    Classifier(String),
}

/// Trained-classifier abstraction (allows mocking for tests).
pub trait Classifier {
    /// Class labels, in the classifier's own fixed order.
    fn classes(&self) -> &[String];

    /// One probability per class for a single feature vector, aligned with
    /// `classes()`.
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>, PredictError>;
}

/// One (disease, probability) entry of a ranked prediction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub disease: String,
    pub probability: f64,
}

/// Rank class probabilities into the presented result list: descending by
/// probability, truncated to [`thresholds::TOP_PREDICTIONS`], entries below
/// [`thresholds::MIN_PROBABILITY`] dropped.
pub fn rank_predictions(
    classes: &[String],
    probabilities: &[f64],
) -> Result<Vec<Prediction>, PredictError> {
    if classes.len() != probabilities.len() {
        return Err(PredictError::LengthMismatch {
            expected: classes.len(),
            got: probabilities.len(),
        });
    }

    let mut ranked: Vec<Prediction> = classes
        .iter()
        .zip(probabilities)
        .map(|(disease, &probability)| Prediction {
            disease: disease.clone(),
            probability,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(thresholds::TOP_PREDICTIONS);
    ranked.retain(|p| p.probability > thresholds::MIN_PROBABILITY);

    Ok(ranked)
}

/// Run a classifier on one feature vector and rank its output.
pub fn predict<C: Classifier + ?Sized>(
    model: &C,
    features: &FeatureVector,
) -> Result<Vec<Prediction>, PredictError> {
    let probabilities = model.predict_proba(features)?;
    let ranked = rank_predictions(model.classes(), &probabilities)?;
    tracing::debug!(
        candidates = model.classes().len(),
        kept = ranked.len(),
        "ranked predictions"
    );
    Ok(ranked)
}
