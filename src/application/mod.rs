//! Application layer services implementing the conversion workflow.
//!
//! Services consume the renderer traits from [`crate::domain::renderer`] and
//! provide a clean API for HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::conversion_service::ConversionService`] - Single and batch page conversion

pub mod services;
