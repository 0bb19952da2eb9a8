//! Application services
//!
//! Typed use-case wrappers over the backend REST API. Services depend on the
//! `RawApiPort` trait, not on the reqwest adapter.

pub mod case_service;
pub mod prompt_testing_service;
pub mod usage_service;

pub use case_service::CaseService;
pub use prompt_testing_service::PromptTestingService;
pub use usage_service::UsageService;
