//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep UI layers decoupled from storage and fallback details.

pub mod result_service;
pub mod survey_service;
