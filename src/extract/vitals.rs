//! Vitals extraction from free text.

use std::collections::HashMap;

use crate::catalog::VitalCatalog;

/// Extract the five numeric vitals from free text.
///
/// The input is lowercased once, then each catalog rule tries its surface
/// forms in declared order; the first accepted match wins. A vital with no
/// match gets its documented default (fasting blood sugar 100, random blood
/// sugar 120, HbA1c 5.5, systolic 120, diastolic 80). The output always
/// contains exactly one entry per catalog vital.
pub fn extract_vitals(text: &str, catalog: &VitalCatalog) -> HashMap<String, f64> {
    let lowered = text.to_lowercase();
    let mut vitals = HashMap::with_capacity(catalog.rules().len());

    for rule in catalog.rules() {
        let value = match rule.capture(&lowered) {
            Some(found) => {
                tracing::debug!(vital = rule.kind.as_str(), value = found, "vital matched");
                found
            }
            None => rule.kind.default_value(),
        };
        vitals.insert(rule.kind.as_str().to_string(), value);
    }

    vitals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> HashMap<String, f64> {
        extract_vitals(text, VitalCatalog::standard())
    }

    #[test]
    fn mentioned_vitals_are_exact_and_missing_ones_default() {
        let vitals = extract("fasting blood sugar: 140, systolic bp: 150/95");
        assert_eq!(vitals["fasting_blood_sugar"], 140.0);
        assert_eq!(vitals["systolic_bp"], 150.0);
        assert_eq!(vitals["diastolic_bp"], 95.0);
        // Not mentioned: documented defaults, with no noise on this path.
        assert_eq!(vitals["random_blood_sugar"], 120.0);
        assert_eq!(vitals["hba1c"], 5.5);
    }

    #[test]
    fn empty_text_yields_all_defaults() {
        let vitals = extract("");
        assert_eq!(vitals.len(), 5);
        assert_eq!(vitals["fasting_blood_sugar"], 100.0);
        assert_eq!(vitals["random_blood_sugar"], 120.0);
        assert_eq!(vitals["hba1c"], 5.5);
        assert_eq!(vitals["systolic_bp"], 120.0);
        assert_eq!(vitals["diastolic_bp"], 80.0);
    }

    #[test]
    fn extraction_is_case_insensitive() {
        let vitals = extract("FBS: 126 and HbA1c: 7.2");
        assert_eq!(vitals["fasting_blood_sugar"], 126.0);
        assert_eq!(vitals["hba1c"], 7.2);
    }

    #[test]
    fn abbreviated_forms_are_recognized() {
        let vitals = extract("rbs: 180, bp: 130/85");
        assert_eq!(vitals["random_blood_sugar"], 180.0);
        assert_eq!(vitals["systolic_bp"], 130.0);
        assert_eq!(vitals["diastolic_bp"], 85.0);
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "blood pressure: 145/90, blood sugar: 210";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn always_exactly_five_keys() {
        for text in ["", "gibberish 123", "bp: 120/80 fever cough", "a1c a1c a1c"] {
            let vitals = extract(text);
            assert_eq!(vitals.len(), 5, "wrong key count for {text:?}");
            for value in vitals.values() {
                assert!(value.is_finite());
            }
        }
    }
}
