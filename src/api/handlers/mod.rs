//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint.

pub mod batch_pdf;
pub mod generate_pdf;
pub mod health;

pub use batch_pdf::batch_pdf_handler;
pub use generate_pdf::generate_pdf_handler;
pub use health::health_handler;
