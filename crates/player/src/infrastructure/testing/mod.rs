//! Test fixtures shared by unit tests across the crate

pub mod fixtures;

pub use fixtures::{api_failure, sample_case, sample_case_json, scene_json};
