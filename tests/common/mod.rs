#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;
use web2pdf::domain::renderer::{PageRenderer, RenderError, RenderSession};
use web2pdf::routes::router;
use web2pdf::state::AppState;

/// Minimal bytes that look like a PDF.
pub const FAKE_PDF: &[u8] = b"%PDF-1.7\n%fake\n";

/// Counters shared between a [`FakeRenderer`] and its sessions.
#[derive(Debug, Default)]
pub struct Calls {
    pub launches: AtomicUsize,
    pub renders: AtomicUsize,
    pub closes: AtomicUsize,
}

impl Calls {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

/// In-process renderer: URLs listed in `failures` fail with the given
/// message, every other URL renders to [`FAKE_PDF`].
#[derive(Default)]
pub struct FakeRenderer {
    pub calls: Arc<Calls>,
    failures: Arc<HashMap<String, String>>,
    launch_error: Option<String>,
    healthy: bool,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self {
            healthy: true,
            ..Default::default()
        }
    }

    pub fn failing(mut self, url: &str, message: &str) -> Self {
        Arc::make_mut(&mut self.failures).insert(url.to_string(), message.to_string());
        self
    }

    pub fn failing_launch(mut self, message: &str) -> Self {
        self.launch_error = Some(message.to_string());
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    async fn launch(&self) -> Result<Box<dyn RenderSession>, RenderError> {
        self.calls.launches.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.launch_error {
            return Err(RenderError::Launch(message.clone()));
        }
        Ok(Box::new(FakeSession {
            calls: self.calls.clone(),
            failures: self.failures.clone(),
        }))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

struct FakeSession {
    calls: Arc<Calls>,
    failures: Arc<HashMap<String, String>>,
}

#[async_trait]
impl RenderSession for FakeSession {
    async fn render(&mut self, url: &Url) -> Result<Vec<u8>, RenderError> {
        self.calls.renders.fetch_add(1, Ordering::SeqCst);
        match self.failures.get(url.as_str()) {
            Some(message) => Err(RenderError::Navigation(message.clone())),
            None => Ok(FAKE_PDF.to_vec()),
        }
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        self.calls.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Builds a test server around the application routes.
pub fn create_test_server(renderer: FakeRenderer) -> (TestServer, Arc<Calls>) {
    create_test_server_with_limit(renderer, 100)
}

pub fn create_test_server_with_limit(
    renderer: FakeRenderer,
    max_batch_urls: usize,
) -> (TestServer, Arc<Calls>) {
    let calls = renderer.calls.clone();
    let state = AppState::new(Arc::new(renderer), max_batch_urls);
    let server = TestServer::new(router(state)).unwrap();
    (server, calls)
}
