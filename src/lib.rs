//! Prodroma turns sparse disease reference data and free-text patient input
//! into the fixed feature schema a tabular disease classifier consumes.
//!
//! Two independent pipelines share one declared schema:
//! - [`synth`] expands a per-disease vitals record and symptom phrase list
//!   into many noisy labeled training rows.
//! - [`extract`] normalizes free-text vitals and symptom sentences into the
//!   same schema at prediction time.
//!
//! The classifier itself is an external capability; [`predict`] holds the
//! trait seam and the ranking policy for its output. Extracted values are
//! heuristic, not clinically validated.

pub mod catalog;
pub mod extract;
pub mod predict;
pub mod schema;
pub mod synth;
