//! Page renderer contracts.
//!
//! A [`PageRenderer`] launches a headless browser and hands out a
//! [`RenderSession`]. The session is an explicit handle: callers pass it into
//! every render call and must call [`RenderSession::close`] exactly once when
//! they are done with it.
//!
//! # Implementations
//!
//! - [`crate::infrastructure::browser::ChromiumRenderer`] - Chromium over the DevTools protocol
//! - Test mocks available with `cfg(test)`

use async_trait::async_trait;
use url::Url;

/// Errors produced while launching a browser or rendering a page.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Navigation timeout of {seconds}s exceeded")]
    Timeout { seconds: u64 },

    #[error("PDF export failed: {0}")]
    Export(String),

    #[error("Browser error: {0}")]
    Browser(String),
}

impl RenderError {
    /// Stable machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::InvalidUrl(_) => "invalid_url",
            RenderError::Launch(_) => "launch",
            RenderError::Navigation(_) => "navigation",
            RenderError::Timeout { .. } => "timeout",
            RenderError::Export(_) => "export",
            RenderError::Browser(_) => "browser",
        }
    }
}

/// Factory for browser sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Starts a browser process and returns a session bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Launch`] if the browser cannot be started.
    async fn launch(&self) -> Result<Box<dyn RenderSession>, RenderError>;

    /// Cheap readiness probe that does not start a browser.
    ///
    /// The Chromium implementation only checks that an executable resolves.
    async fn health_check(&self) -> bool;
}

/// A live browser session.
///
/// One tab is opened and closed per [`render`](RenderSession::render) call;
/// the browser process lives until [`close`](RenderSession::close).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RenderSession: Send {
    /// Navigates to `url`, waits for the network to settle and exports the
    /// page as a PDF document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Navigation`] for unreachable hosts,
    /// [`RenderError::Timeout`] when the page does not settle in time and
    /// [`RenderError::Export`] when printing fails.
    async fn render(&mut self, url: &Url) -> Result<Vec<u8>, RenderError>;

    /// Terminates the browser process.
    async fn close(&mut self) -> Result<(), RenderError>;
}
