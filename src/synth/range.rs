//! Vital reference-text parsing with injected noise.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

/// Noise parameters for synthetic vital values.
pub mod noise {
    /// Band sampled when the reference text reads "normal" or "n/a".
    /// A spread rather than one literal, so the model cannot overfit to a
    /// single constant standing in for "no abnormality signal".
    pub const NORMAL_LOW: f64 = 90.0;
    pub const NORMAL_HIGH: f64 = 110.0;

    /// Half-width of the uniform perturbation around an explicit number.
    pub const PERTURBATION: f64 = 5.0;

    /// Value used when the text has neither a number nor a normal marker.
    pub const FALLBACK: f64 = 100.0;
}

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("Invalid number pattern"));

/// Resolve one vital reference text ("126-200", "normal", "140/90 mmHg", …)
/// to a concrete numeric value.
///
/// Every call draws fresh noise from `rng`, so repeated samples from the
/// same reference spread out instead of collapsing onto one literal. Total
/// over any string; unparseable text falls back to [`noise::FALLBACK`].
pub fn parse_vital_value<R: Rng + ?Sized>(raw: &str, rng: &mut R) -> f64 {
    let lowered = raw.to_lowercase();

    if lowered.contains("normal") || lowered.contains("n/a") {
        return rng.gen_range(noise::NORMAL_LOW..noise::NORMAL_HIGH);
    }

    if let Some(m) = FIRST_NUMBER.find(&lowered) {
        let base: f64 = m.as_str().parse().unwrap_or(noise::FALLBACK);
        return base + rng.gen_range(-noise::PERTURBATION..noise::PERTURBATION);
    }

    noise::FALLBACK
}
