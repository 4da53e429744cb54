//! Municipal e-services: the residency-certificate eligibility questionnaire and the
//! resident-certificate self-lookup, plus the configuration and telemetry they share.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
