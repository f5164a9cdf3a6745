//! Free-text feature extraction.
//!
//! Converts one arbitrary sentence about vitals and one about symptoms into
//! the exact feature schema a trained model consumes. Both functions are
//! total over any input string: nothing is ever rejected, missing mentions
//! fall back to documented defaults.

pub mod symptoms;
pub mod vitals;

pub use symptoms::*;
pub use vitals::*;
