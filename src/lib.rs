// Frond: leaf-image analysis and small text-matching tools
//
// This is the library root. Each module corresponds to a major subsystem:
// feature extraction, classification, and the two text helpers.

pub mod classify;
pub mod config;
pub mod error;
pub mod features;
pub mod output;
pub mod pipeline;
pub mod qa;
pub mod status;
pub mod textmatch;
pub mod visual;
