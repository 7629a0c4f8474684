//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`browser`] - Chromium implementation of the page renderer
//! - [`archive`] - ZIP packaging of rendered documents

pub mod archive;
pub mod browser;
