//! Chromium-backed renderer driven over the DevTools protocol.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    EventLifecycleEvent, FrameId, PrintToPdfParams, SetLifecycleEventsEnabledParams,
};
use futures::{Stream, StreamExt};
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use super::options::BrowserOptions;
use crate::domain::renderer::{PageRenderer, RenderError, RenderSession};

/// Lifecycle event Chromium emits once no more than two requests are in flight.
const NETWORK_ALMOST_IDLE: &str = "networkAlmostIdle";

/// Launches one headless Chromium process per session.
pub struct ChromiumRenderer {
    options: Arc<BrowserOptions>,
}

impl ChromiumRenderer {
    pub fn new(options: BrowserOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn launch(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        let profile_dir = tempfile::Builder::new()
            .prefix("web2pdf-profile-")
            .tempdir()
            .map_err(|e| RenderError::Launch(format!("profile directory: {e}")))?;

        let mut builder = BrowserConfig::builder()
            .request_timeout(self.options.navigation_timeout)
            .user_data_dir(profile_dir.path())
            .arg("--disable-gpu")
            .arg("--disable-extensions")
            .arg("--disable-dev-shm-usage")
            .arg("--hide-scrollbars")
            .arg("--mute-audio")
            .arg("--no-first-run")
            .arg("--no-default-browser-check");

        if self.options.no_sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(path) = resolve_executable(self.options.executable.as_ref()) {
            builder = builder.chrome_executable(path);
        }

        let config = builder.build().map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {:?}", e);
                }
            }
            debug!("Browser event handler task completed");
        });

        info!("Browser session launched");

        Ok(Box::new(ChromiumSession {
            browser,
            handler: EventLoop::new(handler_task),
            options: self.options.clone(),
            _profile_dir: profile_dir,
        }))
    }

    async fn health_check(&self) -> bool {
        resolve_executable(self.options.executable.as_ref()).is_some()
    }
}

/// The spawned CDP handler task of one browser.
///
/// Stopped at most once; dropping a loop that is still running aborts it.
struct EventLoop(Option<JoinHandle<()>>);

impl EventLoop {
    fn new(task: JoinHandle<()>) -> Self {
        Self(Some(task))
    }

    fn is_stopped(&self) -> bool {
        self.0.is_none()
    }

    /// Aborts the task. Returns `false` if it was already stopped.
    fn stop(&mut self) -> bool {
        match self.0.take() {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        if self.stop() {
            warn!("Browser session dropped without close - aborting handler task");
        }
    }
}

/// A running Chromium process plus its CDP event loop.
///
/// The handler task is aborted on [`close`](RenderSession::close), or on drop
/// if `close` was never called. The browser process is killed when
/// [`Browser`] drops; the profile directory is removed afterwards.
pub struct ChromiumSession {
    browser: Browser,
    handler: EventLoop,
    options: Arc<BrowserOptions>,
    _profile_dir: TempDir,
}

impl ChromiumSession {
    /// Navigates `page` and prints it, bounded by the navigation timeout.
    async fn print(&self, page: &Page, url: &Url) -> Result<Vec<u8>, RenderError> {
        let timeout = self.options.navigation_timeout;

        tokio::time::timeout(timeout, navigate_until_idle(page, url))
            .await
            .map_err(|_| RenderError::Timeout {
                seconds: timeout.as_secs(),
            })??;

        let (paper_width, paper_height) = self.options.paper_format.dimensions_inches();
        let params = PrintToPdfParams {
            print_background: Some(self.options.print_background),
            paper_width: Some(paper_width),
            paper_height: Some(paper_height),
            ..Default::default()
        };

        page.pdf(params)
            .await
            .map_err(|e| RenderError::Export(e.to_string()))
    }
}

#[async_trait]
impl RenderSession for ChromiumSession {
    async fn render(&mut self, url: &Url) -> Result<Vec<u8>, RenderError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))?;

        let result = self.print(&page, url).await;

        if let Err(e) = page.close().await {
            warn!(url = %url, "Failed to close tab: {}", e);
        }

        result
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        if self.handler.is_stopped() {
            return Ok(());
        }

        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| RenderError::Browser(e.to_string()));

        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser process: {}", e);
        }

        self.handler.stop();
        info!("Browser session closed");

        result
    }
}

/// Navigates to `url` and waits for the main frame's network to go almost idle.
async fn navigate_until_idle(page: &Page, url: &Url) -> Result<(), RenderError> {
    let lifecycle = page
        .event_listener::<EventLifecycleEvent>()
        .await
        .map_err(|e| RenderError::Browser(e.to_string()))?;

    page.execute(SetLifecycleEventsEnabledParams::new(true))
        .await
        .map_err(|e| RenderError::Browser(e.to_string()))?;

    let main_frame = page
        .mainframe()
        .await
        .map_err(|e| RenderError::Browser(e.to_string()))?;

    page.goto(url.as_str())
        .await
        .map_err(|e| RenderError::Navigation(e.to_string()))?;

    wait_for_idle(lifecycle, main_frame.as_ref()).await?;

    debug!(url = %url, "Page settled");
    Ok(())
}

/// Consumes lifecycle events until the main frame's navigation goes almost idle.
///
/// Events that arrive before the navigation's `init` belong to the initial
/// `about:blank` document and are skipped, as are events from other frames.
/// A stream that ends first means the page went away mid-navigation.
async fn wait_for_idle<S>(events: S, main_frame: Option<&FrameId>) -> Result<(), RenderError>
where
    S: Stream<Item = Arc<EventLifecycleEvent>>,
{
    let mut events = std::pin::pin!(events);
    let mut navigated = false;

    while let Some(event) = events.next().await {
        if main_frame.is_some_and(|id| *id != event.frame_id) {
            continue;
        }
        match event.name.as_str() {
            "init" => navigated = true,
            NETWORK_ALMOST_IDLE if navigated => return Ok(()),
            _ => {}
        }
    }

    Err(RenderError::Navigation(
        "page closed before the network went idle".to_string(),
    ))
}

/// Returns the configured executable if it exists, otherwise the first
/// Chromium found in well-known locations or on `PATH`.
pub fn resolve_executable(configured: Option<&PathBuf>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Some(path.clone());
        }
        warn!(path = %path.display(), "Configured browser executable does not exist");
        return None;
    }

    let candidates: &[&str] = if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ]
    } else {
        &[
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/snap/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    };

    if let Some(path) = candidates.iter().map(PathBuf::from).find(|p| p.exists()) {
        return Some(path);
    }

    let names = ["chromium", "chromium-browser", "google-chrome", "chrome"];
    std::env::var_os("PATH").and_then(|paths| {
        std::env::split_paths(&paths)
            .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
            .find(|p| p.is_file())
    })
}
