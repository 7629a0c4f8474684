//! Headless browser integration.
//!
//! - [`ChromiumRenderer`] - Launches Chromium sessions via `chromiumoxide`
//! - [`BrowserOptions`] - Timeout, paper size and sandbox settings

mod chromium;
mod options;

pub use chromium::{ChromiumRenderer, ChromiumSession, resolve_executable};
pub use options::{BrowserOptions, PaperFormat};
