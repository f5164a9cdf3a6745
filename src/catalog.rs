//! Declared match catalogs: vital regex patterns and symptom synonym lists.
//!
//! Both catalogs are explicit ordered configuration rather than ad hoc inline
//! patterns, so the matching policy (first-accepted-match-wins, synonym lists)
//! is auditable and testable apart from the extraction driver.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The five numeric vitals carried by the feature schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalKind {
    FastingBloodSugar,
    RandomBloodSugar,
    Hba1c,
    SystolicBp,
    DiastolicBp,
}

impl VitalKind {
    /// Schema order: vitals appear first in the feature schema, in this order.
    pub const ALL: [VitalKind; 5] = [
        VitalKind::FastingBloodSugar,
        VitalKind::RandomBloodSugar,
        VitalKind::Hba1c,
        VitalKind::SystolicBp,
        VitalKind::DiastolicBp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VitalKind::FastingBloodSugar => "fasting_blood_sugar",
            VitalKind::RandomBloodSugar => "random_blood_sugar",
            VitalKind::Hba1c => "hba1c",
            VitalKind::SystolicBp => "systolic_bp",
            VitalKind::DiastolicBp => "diastolic_bp",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fasting_blood_sugar" => Some(VitalKind::FastingBloodSugar),
            "random_blood_sugar" => Some(VitalKind::RandomBloodSugar),
            "hba1c" => Some(VitalKind::Hba1c),
            "systolic_bp" => Some(VitalKind::SystolicBp),
            "diastolic_bp" => Some(VitalKind::DiastolicBp),
            _ => None,
        }
    }

    /// Value substituted when free text never mentions this vital.
    pub fn default_value(self) -> f64 {
        match self {
            VitalKind::FastingBloodSugar => 100.0,
            VitalKind::RandomBloodSugar => 120.0,
            VitalKind::Hba1c => 5.5,
            VitalKind::SystolicBp => 120.0,
            VitalKind::DiastolicBp => 80.0,
        }
    }
}

/// One compiled surface form for a vital.
#[derive(Debug)]
pub struct VitalPattern {
    regex: Regex,
    /// Capture group holding the numeric value.
    value_group: usize,
    /// Capture group that, when present in a match, disqualifies that match.
    /// Keeps the bare "blood sugar" fallback from firing inside a qualified
    /// mention like "fasting blood sugar: 140".
    qualifier_group: Option<usize>,
}

impl VitalPattern {
    /// First accepted match in `text`, parsed as a float.
    ///
    /// Matches carrying the qualifier group are skipped; the scan continues
    /// past them so a later unqualified mention can still win.
    pub fn capture(&self, text: &str) -> Option<f64> {
        for caps in self.regex.captures_iter(text) {
            if let Some(group) = self.qualifier_group {
                if caps.get(group).is_some() {
                    continue;
                }
            }
            if let Some(value) = caps.get(self.value_group) {
                if let Ok(parsed) = value.as_str().parse::<f64>() {
                    return Some(parsed);
                }
            }
        }
        None
    }
}

/// Ordered surface forms for one vital. The first pattern that yields an
/// accepted match wins; later patterns are never consulted.
#[derive(Debug)]
pub struct VitalRule {
    pub kind: VitalKind,
    patterns: Vec<VitalPattern>,
}

impl VitalRule {
    pub fn new(kind: VitalKind, patterns: Vec<VitalPattern>) -> Self {
        VitalRule { kind, patterns }
    }

    /// Try patterns in declared order against (already lowercased) text.
    pub fn capture(&self, text: &str) -> Option<f64> {
        self.patterns.iter().find_map(|p| p.capture(text))
    }
}

/// The declared, ordered vital pattern catalog.
#[derive(Debug)]
pub struct VitalCatalog {
    rules: Vec<VitalRule>,
}

impl VitalCatalog {
    pub fn new(rules: Vec<VitalRule>) -> Self {
        VitalCatalog { rules }
    }

    pub fn rules(&self) -> &[VitalRule] {
        &self.rules
    }

    /// The canonical catalog: one rule per `VitalKind`, in schema order.
    pub fn standard() -> &'static VitalCatalog {
        &STANDARD_VITALS
    }
}

static STANDARD_VITALS: LazyLock<VitalCatalog> = LazyLock::new(|| {
    VitalCatalog::new(vec![
        VitalRule::new(
            VitalKind::FastingBloodSugar,
            vec![
                pattern(r"fasting[_\s]*blood[_\s]*sugar[:\s]*(\d+\.?\d*)"),
                pattern(r"\bfbs[:\s]*(\d+\.?\d*)"),
            ],
        ),
        VitalRule::new(
            VitalKind::RandomBloodSugar,
            vec![
                pattern(r"random[_\s]*blood[_\s]*sugar[:\s]*(\d+\.?\d*)"),
                pattern(r"\brbs[:\s]*(\d+\.?\d*)"),
                // Bare fallback. Must not fire on mentions already claimed by
                // the fasting/random forms, hence the qualifier group.
                guarded_pattern(r"((?:fasting|random)[_\s]+)?blood[_\s]*sugar[:\s]*(\d+\.?\d*)", 2, 1),
            ],
        ),
        VitalRule::new(
            VitalKind::Hba1c,
            vec![
                pattern(r"hba1c[:\s]*(\d+\.?\d*)"),
                pattern(r"\ba1c[:\s]*(\d+\.?\d*)"),
            ],
        ),
        VitalRule::new(
            VitalKind::SystolicBp,
            vec![
                pattern(r"systolic[_\s]*(?:bp|blood[_\s]*pressure)[:\s]*(\d+\.?\d*)"),
                pattern(r"\bbp[:\s]*(\d+\.?\d*)\s*/"),
                pattern(r"blood[_\s]*pressure[:\s]*(\d+\.?\d*)"),
            ],
        ),
        VitalRule::new(
            VitalKind::DiastolicBp,
            vec![
                pattern(r"diastolic[_\s]*(?:bp|blood[_\s]*pressure)[:\s]*(\d+\.?\d*)"),
                // Diastolic anchors on the group after the slash; the slash is
                // required so a lone "bp: 150" never donates its digits here.
                pattern(r"\bbp[:\s]*\d+\.?\d*\s*/\s*(\d+\.?\d*)"),
                pattern(r"blood[_\s]*pressure[:\s]*\d+\.?\d*\s*/\s*(\d+\.?\d*)"),
            ],
        ),
    ])
});

fn pattern(regex_str: &str) -> VitalPattern {
    VitalPattern {
        regex: Regex::new(regex_str).expect("Invalid vital pattern"),
        value_group: 1,
        qualifier_group: None,
    }
}

fn guarded_pattern(regex_str: &str, value_group: usize, qualifier_group: usize) -> VitalPattern {
    VitalPattern {
        regex: Regex::new(regex_str).expect("Invalid vital pattern"),
        value_group,
        qualifier_group: Some(qualifier_group),
    }
}

/// Canonical symptom name plus the surface phrases that flag it.
/// Synonyms must be lowercase; input text is lowercased before matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomRule {
    pub name: String,
    pub synonyms: Vec<String>,
}

impl SymptomRule {
    /// True if any synonym occurs as a substring of (lowercased) text.
    pub fn matches(&self, text: &str) -> bool {
        self.synonyms.iter().any(|s| text.contains(s.as_str()))
    }
}

/// The fixed, closed, ordered symptom catalog. Extraction never produces a
/// symptom name outside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomCatalog {
    rules: Vec<SymptomRule>,
}

impl SymptomCatalog {
    pub fn new(rules: Vec<SymptomRule>) -> Self {
        SymptomCatalog { rules }
    }

    pub fn rules(&self) -> &[SymptomRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Canonical names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// The canonical 20-symptom catalog.
    pub fn standard() -> &'static SymptomCatalog {
        &STANDARD_SYMPTOMS
    }
}

static STANDARD_SYMPTOMS: LazyLock<SymptomCatalog> = LazyLock::new(|| {
    SymptomCatalog::new(vec![
        symptom("fever", &["fever", "high temperature", "pyrexia"]),
        symptom("cough", &["cough", "coughing"]),
        symptom("headache", &["headache", "head pain", "migraine"]),
        symptom("fatigue", &["fatigue", "tired", "weakness", "exhausted"]),
        symptom("chest_pain", &["chest pain", "chest discomfort"]),
        symptom(
            "shortness_of_breath",
            &["shortness of breath", "breathless", "difficulty breathing", "dyspnea"],
        ),
        symptom("dizziness", &["dizziness", "dizzy", "lightheaded"]),
        symptom("nosebleeds", &["nosebleed", "nose bleed", "bleeding nose"]),
        symptom("sore_throat", &["sore throat", "throat pain"]),
        symptom("runny_nose", &["runny nose", "nasal discharge"]),
        symptom("sneezing", &["sneeze", "sneezing"]),
        symptom("muscle_aches", &["muscle ache", "body ache", "muscle pain"]),
        symptom("increased_thirst", &["thirst", "thirsty", "increased thirst"]),
        symptom(
            "frequent_urination",
            &["frequent urination", "urinating often", "pee often"],
        ),
        symptom(
            "blurred_vision",
            &["blurred vision", "blurry vision", "vision problem"],
        ),
        symptom("weight_loss", &["weight loss", "losing weight"]),
        symptom("numbness", &["numbness", "numb"]),
        symptom("tingling", &["tingling", "pins and needles"]),
        symptom("weakness", &["weakness", "weak"]),
        symptom("hunger", &["hunger", "hungry", "increased appetite"]),
    ])
});

fn symptom(name: &str, synonyms: &[&str]) -> SymptomRule {
    SymptomRule {
        name: name.to_string(),
        synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
    }
}
