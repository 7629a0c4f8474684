//! # web2pdf
//!
//! Converts web pages into PDF documents through headless Chromium, one at a
//! time or in batches packed into a ZIP archive.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Conversion entities and renderer traits
//! - **Application Layer** ([`application`]) - Single and batch conversion orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Chromium renderer and ZIP archive
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - Browser UI
//!
//! ## Quick Start
//!
//! ```bash
//! export CHROME_EXECUTABLE=/usr/bin/chromium   # optional, auto-detected otherwise
//! cargo run
//!
//! curl -X POST localhost:3000/generate-pdf \
//!      -H 'Content-Type: application/json' \
//!      -d '{"url":"https://example.com"}' -o page.pdf
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod logging;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ConversionService;
    pub use crate::domain::entities::{BatchOutcome, ConversionResult, ConversionStatus, RenderedPdf};
    pub use crate::domain::renderer::{PageRenderer, RenderError, RenderSession};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
