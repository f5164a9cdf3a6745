//! The declared feature schema shared by training and inference.
//!
//! Three of the original data sources redefined the column set independently;
//! here there is exactly one declared, ordered schema, and every feature
//! vector is validated against it at the boundary instead of trusted
//! implicitly. Column order is part of the model contract: downstream
//! consumers may operate on raw numeric arrays, not named columns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{SymptomCatalog, VitalKind};

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("feature vector is missing schema column '{0}'")]
    MissingColumn(String),

    #[error("key '{0}' is not a column of the declared schema")]
    UnexpectedKey(String),

    #[error("key '{0}' was supplied as both a vital and a symptom")]
    DuplicateKey(String),
}

/// What a column holds: a numeric vital or a 0/1 symptom flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Binary,
}

/// One declared schema column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// The ordered column list a trained model expects as input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<Column>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        FeatureSchema { columns }
    }

    /// Canonical layout: the five vitals in `VitalKind::ALL` order, then the
    /// catalog symptoms in catalog order.
    pub fn with_symptoms(symptoms: &SymptomCatalog) -> Self {
        let mut columns: Vec<Column> = VitalKind::ALL
            .iter()
            .map(|kind| Column {
                name: kind.as_str().to_string(),
                kind: ColumnKind::Numeric,
            })
            .collect();
        columns.extend(symptoms.names().map(|name| Column {
            name: name.to_string(),
            kind: ColumnKind::Binary,
        }));
        FeatureSchema { columns }
    }

    /// Schema over the standard symptom catalog.
    pub fn standard() -> Self {
        Self::with_symptoms(SymptomCatalog::standard())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }
}

/// A complete, ordered, fully-populated row matching a schema.
///
/// Construction goes through [`build_feature_vector`] only, so a value exists
/// for every column by the time a model sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values aligned with `columns()`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.values[i])
    }
}

/// Merge extracted vitals and symptoms into one row in schema order.
///
/// Fails loudly on any drift between the maps and the declared schema:
/// an extra key, a missing column, or a name claimed by both maps. Silently
/// dropping or reordering columns here would corrupt every downstream
/// prediction.
pub fn build_feature_vector(
    vitals: &HashMap<String, f64>,
    symptoms: &HashMap<String, u8>,
    schema: &FeatureSchema,
) -> Result<FeatureVector, SchemaError> {
    for key in vitals.keys() {
        if !schema.contains(key) {
            return Err(SchemaError::UnexpectedKey(key.clone()));
        }
        if symptoms.contains_key(key) {
            return Err(SchemaError::DuplicateKey(key.clone()));
        }
    }
    for key in symptoms.keys() {
        if !schema.contains(key) {
            return Err(SchemaError::UnexpectedKey(key.clone()));
        }
    }

    let mut columns = Vec::with_capacity(schema.len());
    let mut values = Vec::with_capacity(schema.len());
    for column in schema.columns() {
        let value = match vitals.get(&column.name) {
            Some(v) => *v,
            None => match symptoms.get(&column.name) {
                Some(flag) => f64::from(*flag),
                None => return Err(SchemaError::MissingColumn(column.name.clone())),
            },
        };
        columns.push(column.name.clone());
        values.push(value);
    }

    Ok(FeatureVector { columns, values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VitalCatalog;
    use crate::extract::{extract_symptoms, extract_vitals};

    fn full_maps() -> (HashMap<String, f64>, HashMap<String, u8>) {
        let vitals = extract_vitals("bp: 120/80", VitalCatalog::standard());
        let symptoms = extract_symptoms("fever and cough", SymptomCatalog::standard());
        (vitals, symptoms)
    }

    #[test]
    fn standard_schema_is_vitals_then_symptoms() {
        let schema = FeatureSchema::standard();
        assert_eq!(schema.len(), 25);
        assert_eq!(schema.columns()[0].name, "fasting_blood_sugar");
        assert_eq!(schema.columns()[4].name, "diastolic_bp");
        assert_eq!(schema.columns()[5].name, "fever");
        assert_eq!(schema.columns()[24].name, "hunger");
        for column in &schema.columns()[..5] {
            assert_eq!(column.kind, ColumnKind::Numeric);
        }
        for column in &schema.columns()[5..] {
            assert_eq!(column.kind, ColumnKind::Binary);
        }
    }

    #[test]
    fn vector_follows_schema_order() {
        let (vitals, symptoms) = full_maps();
        let schema = FeatureSchema::standard();
        let vector = build_feature_vector(&vitals, &symptoms, &schema).unwrap();

        let expected: Vec<&str> = schema.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(vector.columns(), expected.as_slice());
        assert_eq!(vector.get("systolic_bp"), Some(120.0));
        assert_eq!(vector.get("diastolic_bp"), Some(80.0));
        assert_eq!(vector.get("fever"), Some(1.0));
        assert_eq!(vector.get("hunger"), Some(0.0));
    }

    #[test]
    fn serialized_columns_keep_schema_order() {
        let (vitals, symptoms) = full_maps();
        let vector = build_feature_vector(&vitals, &symptoms, &FeatureSchema::standard()).unwrap();
        let json = serde_json::to_value(&vector).unwrap();
        assert_eq!(json["columns"][0], "fasting_blood_sugar");
        assert_eq!(json["columns"][24], "hunger");
        assert_eq!(json["values"].as_array().unwrap().len(), 25);
    }

    #[test]
    fn unexpected_vital_key_is_rejected() {
        let (mut vitals, symptoms) = full_maps();
        vitals.insert("heart_rate".into(), 72.0);
        let err = build_feature_vector(&vitals, &symptoms, &FeatureSchema::standard()).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedKey(key) if key == "heart_rate"));
    }

    #[test]
    fn unexpected_symptom_key_is_rejected() {
        let (vitals, mut symptoms) = full_maps();
        symptoms.insert("itching".into(), 1);
        let err = build_feature_vector(&vitals, &symptoms, &FeatureSchema::standard()).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedKey(key) if key == "itching"));
    }

    #[test]
    fn missing_column_is_rejected() {
        let (mut vitals, symptoms) = full_maps();
        vitals.remove("hba1c");
        let err = build_feature_vector(&vitals, &symptoms, &FeatureSchema::standard()).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn(name) if name == "hba1c"));
    }

    #[test]
    fn key_in_both_maps_is_rejected() {
        let (mut vitals, symptoms) = full_maps();
        vitals.insert("fever".into(), 1.0);
        let err = build_feature_vector(&vitals, &symptoms, &FeatureSchema::standard()).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateKey(key) if key == "fever"));
    }

    #[test]
    fn custom_symptom_catalog_shrinks_schema() {
        let catalog = SymptomCatalog::new(vec![crate::catalog::SymptomRule {
            name: "fever".into(),
            synonyms: vec!["fever".into()],
        }]);
        let schema = FeatureSchema::with_symptoms(&catalog);
        assert_eq!(schema.len(), 6);
        assert_eq!(schema.columns()[5].name, "fever");
    }
}
