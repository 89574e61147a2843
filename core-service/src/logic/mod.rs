//! Logic Module - Feature Extraction & Inference
//!
//! - `features/` - URL → fixed-width feature record
//! - `model/` - classifier artifact, threshold, prediction service

pub mod features;
pub mod model;
