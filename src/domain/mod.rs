//! Domain layer containing conversion entities and renderer contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Conversion results and batch outcomes
//! - [`renderer`] - Browser session traits implemented by the infrastructure layer
//!
//! The domain layer has no dependency on HTTP or on a concrete browser.

pub mod entities;
pub mod renderer;
