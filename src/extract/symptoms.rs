//! Symptom extraction from free text.

use std::collections::HashMap;

use crate::catalog::SymptomCatalog;

/// Extract binary symptom flags from free text.
///
/// Total over the fixed catalog: the output holds every canonical symptom
/// name, 1 if any of its synonyms occurs as a substring of the lowercased
/// input, else 0. Never a sparse or partial map.
pub fn extract_symptoms(text: &str, catalog: &SymptomCatalog) -> HashMap<String, u8> {
    let lowered = text.to_lowercase();
    let mut symptoms = HashMap::with_capacity(catalog.len());

    let mut detected = 0usize;
    for rule in catalog.rules() {
        let flag = u8::from(rule.matches(&lowered));
        detected += usize::from(flag);
        symptoms.insert(rule.name.clone(), flag);
    }
    tracing::debug!(detected, total = catalog.len(), "symptoms extracted");

    symptoms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> HashMap<String, u8> {
        extract_symptoms(text, SymptomCatalog::standard())
    }

    #[test]
    fn synonyms_flag_their_canonical_symptom() {
        let symptoms = extract("I have fever, headache, and feeling very tired");
        assert_eq!(symptoms["fever"], 1);
        assert_eq!(symptoms["headache"], 1);
        // "tired" is a listed fatigue synonym.
        assert_eq!(symptoms["fatigue"], 1);
        assert_eq!(symptoms["cough"], 0);
        assert_eq!(symptoms["chest_pain"], 0);
    }

    #[test]
    fn empty_text_yields_all_zeros() {
        let symptoms = extract("");
        assert_eq!(symptoms.len(), 20);
        assert!(symptoms.values().all(|&flag| flag == 0));
    }

    #[test]
    fn output_is_total_and_binary_for_any_input() {
        for text in ["", "no complaints", "fever fever fever", "chest pain and dizzy spells"] {
            let symptoms = extract(text);
            assert_eq!(symptoms.len(), 20, "wrong key count for {text:?}");
            assert!(symptoms.values().all(|&flag| flag <= 1));
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let symptoms = extract("Severe HEADACHE with Blurred Vision");
        assert_eq!(symptoms["headache"], 1);
        assert_eq!(symptoms["blurred_vision"], 1);
    }

    #[test]
    fn multi_word_synonyms_match_as_substrings() {
        let symptoms = extract("shortness of breath after climbing stairs, pins and needles in my hands");
        assert_eq!(symptoms["shortness_of_breath"], 1);
        assert_eq!(symptoms["tingling"], 1);
    }

    #[test]
    fn overlapping_text_can_fire_multiple_symptoms() {
        // "weakness" is both its own symptom and a fatigue synonym.
        let symptoms = extract("general weakness");
        assert_eq!(symptoms["weakness"], 1);
        assert_eq!(symptoms["fatigue"], 1);
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "runny nose, sneezing, sore throat";
        assert_eq!(extract(text), extract(text));
    }
}
