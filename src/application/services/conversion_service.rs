//! Single and batch web page conversion.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use url::Url;

use crate::domain::entities::{BatchOutcome, ConversionResult, RenderedPdf};
use crate::domain::renderer::{PageRenderer, RenderError, RenderSession};
use crate::error::AppError;
use crate::infrastructure::archive::ArchiveBundle;
use crate::utils::file_name::{batch_file_name, single_file_name};

/// Orchestrates browser sessions for one request at a time.
///
/// Every call launches its own session and closes it exactly once before
/// returning, whatever happened in between. Batch URLs are rendered strictly
/// in input order, one after another, through that single session.
pub struct ConversionService {
    renderer: Arc<dyn PageRenderer>,
    max_batch_urls: usize,
}

impl ConversionService {
    /// Creates a new conversion service.
    pub fn new(renderer: Arc<dyn PageRenderer>, max_batch_urls: usize) -> Self {
        Self {
            renderer,
            max_batch_urls,
        }
    }

    pub fn max_batch_urls(&self) -> usize {
        self.max_batch_urls
    }

    /// Whether the renderer finds its browser executable. Does not start a browser.
    pub async fn renderer_healthy(&self) -> bool {
        self.renderer.health_check().await
    }

    /// Converts one URL into a PDF.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute
    /// HTTP(S) URL, and [`AppError::Render`] if the browser fails to launch
    /// or to render the page. No retry is attempted.
    pub async fn convert_single(&self, url: &str) -> Result<RenderedPdf, AppError> {
        let target = parse_target(url)
            .map_err(|e| AppError::bad_request(e.to_string(), json!({ "url": url })))?;

        let mut session = self.renderer.launch().await?;

        info!(url = %target, "Rendering page");
        let rendered = session.render(&target).await;
        close_session(session.as_mut()).await;

        let bytes = rendered?;
        let file_name = single_file_name(url);
        info!(url = %target, file_name = %file_name, size = bytes.len(), "Page rendered");

        Ok(RenderedPdf { file_name, bytes })
    }

    /// Converts every URL in `urls` and packs the successes into one archive.
    ///
    /// A failed URL is recorded as an `error` result and never aborts the
    /// batch. If every URL fails, the archive is still valid with zero
    /// entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `urls` is empty or exceeds the
    /// configured maximum, [`AppError::Render`] if the browser cannot be
    /// launched and [`AppError::Internal`] if the archive cannot be written.
    pub async fn convert_batch(&self, urls: &[String]) -> Result<BatchOutcome, AppError> {
        if urls.is_empty() {
            return Err(AppError::bad_request("No URLs provided", json!({})));
        }
        if urls.len() > self.max_batch_urls {
            return Err(AppError::bad_request(
                format!(
                    "Too many URLs: this server accepts at most {} per batch (configurable via MAX_BATCH_URLS)",
                    self.max_batch_urls
                ),
                json!({ "max": self.max_batch_urls, "received": urls.len(), "setting": "MAX_BATCH_URLS" }),
            ));
        }

        let mut session = self.renderer.launch().await?;
        let mut bundle = ArchiveBundle::new();

        let mut results = Vec::with_capacity(urls.len());
        for (index, url) in urls.iter().enumerate() {
            let attempt = render_item(session.as_mut(), url).await;
            results.push(record(&mut bundle, url, index, attempt));
        }

        close_session(session.as_mut()).await;

        if bundle.is_empty() {
            warn!(total = urls.len(), "Batch produced no documents");
        }
        let entries = bundle.len();

        let outcome = BatchOutcome {
            results,
            archive: bundle.finish()?,
        };

        let summary = outcome.summary();
        info!(
            total = summary.total,
            successful = summary.successful,
            failed = summary.failed,
            entries,
            "Batch finished"
        );

        Ok(outcome)
    }
}

/// Parses a conversion target. Only absolute HTTP(S) URLs are accepted.
pub fn parse_target(url: &str) -> Result<Url, RenderError> {
    let parsed = Url::parse(url).map_err(|e| RenderError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(RenderError::InvalidUrl(format!(
            "{url}: unsupported scheme '{scheme}'"
        ))),
    }
}

async fn render_item(session: &mut dyn RenderSession, url: &str) -> Result<Vec<u8>, RenderError> {
    let target = parse_target(url)?;
    info!(url = %target, "Rendering page");
    session.render(&target).await
}

/// Files a successful render into the bundle and turns the attempt into a result.
fn record(
    bundle: &mut ArchiveBundle,
    url: &str,
    index: usize,
    attempt: Result<Vec<u8>, RenderError>,
) -> ConversionResult {
    match attempt {
        Ok(bytes) => {
            let file_name = batch_file_name(url, index);
            info!(url, index, file_name = %file_name, size = bytes.len(), "Page rendered");
            bundle.insert(file_name.clone(), bytes);
            ConversionResult::done(url, file_name)
        }
        Err(e) => {
            warn!(url, index, kind = e.kind(), "Page failed: {}", e);
            ConversionResult::failed(url, e.to_string())
        }
    }
}

async fn close_session(session: &mut dyn RenderSession) {
    if let Err(e) = session.close().await {
        warn!("Failed to close browser session: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ConversionStatus;
    use crate::domain::renderer::{MockPageRenderer, MockRenderSession};
    use std::io::Cursor;
    use zip::ZipArchive;

    fn service_with(session: MockRenderSession) -> ConversionService {
        let mut renderer = MockPageRenderer::new();
        renderer
            .expect_launch()
            .times(1)
            .return_once(move || Ok(Box::new(session) as Box<dyn RenderSession>));
        ConversionService::new(Arc::new(renderer), 100)
    }

    fn archive_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_convert_single_success() {
        let mut session = MockRenderSession::new();
        session
            .expect_render()
            .withf(|url| url.as_str() == "https://a.test/foo/bar")
            .times(1)
            .returning(|_| Ok(b"%PDF-1.7".to_vec()));
        session.expect_close().times(1).returning(|| Ok(()));

        let service = service_with(session);
        let pdf = service.convert_single("https://a.test/foo/bar").await.unwrap();

        assert_eq!(pdf.file_name, "bar.pdf");
        assert_eq!(pdf.bytes, b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_convert_single_render_failure_still_closes() {
        let mut session = MockRenderSession::new();
        session
            .expect_render()
            .times(1)
            .returning(|_| Err(RenderError::Navigation("net::ERR_NAME_NOT_RESOLVED".into())));
        session.expect_close().times(1).returning(|| Ok(()));

        let service = service_with(session);
        let err = service.convert_single("https://a.test/x").await.unwrap_err();

        assert!(matches!(err, AppError::Render { .. }));
        assert!(err.message().contains("ERR_NAME_NOT_RESOLVED"));
    }

    #[tokio::test]
    async fn test_convert_single_rejects_invalid_url_without_launching() {
        let mut renderer = MockPageRenderer::new();
        renderer.expect_launch().times(0);
        let service = ConversionService::new(Arc::new(renderer), 100);

        let err = service.convert_single("not a url").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = service.convert_single("file:///etc/passwd").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_convert_single_launch_failure() {
        let mut renderer = MockPageRenderer::new();
        renderer
            .expect_launch()
            .times(1)
            .returning(|| Err(RenderError::Launch("no chromium".into())));
        let service = ConversionService::new(Arc::new(renderer), 100);

        let err = service.convert_single("https://a.test/x").await.unwrap_err();
        assert!(matches!(err, AppError::Render { .. }));
    }

    #[tokio::test]
    async fn test_convert_batch_isolates_failures() {
        let mut session = MockRenderSession::new();
        session.expect_render().times(2).returning(|url| {
            if url.path() == "/x" {
                Ok(b"%PDF-x".to_vec())
            } else {
                Err(RenderError::Timeout { seconds: 30 })
            }
        });
        session.expect_close().times(1).returning(|| Ok(()));

        let service = service_with(session);
        let outcome = service
            .convert_batch(&urls(&["https://a.test/x", "https://a.test/y"]))
            .await
            .unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].status, ConversionStatus::Done);
        assert_eq!(outcome.results[0].file_name.as_deref(), Some("x-1.pdf"));
        assert_eq!(outcome.results[1].status, ConversionStatus::Error);
        assert!(outcome.results[1].error.as_deref().unwrap().contains("30"));
        assert_eq!(archive_names(&outcome.archive), vec!["x-1.pdf"]);
    }

    #[tokio::test]
    async fn test_convert_batch_all_failed_returns_empty_archive() {
        let mut session = MockRenderSession::new();
        session
            .expect_render()
            .times(3)
            .returning(|_| Err(RenderError::Navigation("refused".into())));
        session.expect_close().times(1).returning(|| Ok(()));

        let service = service_with(session);
        let outcome = service
            .convert_batch(&urls(&[
                "https://a.test/1",
                "https://a.test/2",
                "https://a.test/3",
            ]))
            .await
            .unwrap();

        assert!(outcome.results.iter().all(|r| !r.is_done()));
        assert!(archive_names(&outcome.archive).is_empty());
        assert_eq!(outcome.summary().failed, 3);
    }

    #[tokio::test]
    async fn test_convert_batch_invalid_url_is_per_item_error() {
        let mut session = MockRenderSession::new();
        session
            .expect_render()
            .times(1)
            .returning(|_| Ok(b"%PDF".to_vec()));
        session.expect_close().times(1).returning(|| Ok(()));

        let service = service_with(session);
        let outcome = service
            .convert_batch(&urls(&["not a url", "https://a.test/ok"]))
            .await
            .unwrap();

        assert_eq!(outcome.results[0].status, ConversionStatus::Error);
        assert!(
            outcome.results[0]
                .error
                .as_deref()
                .unwrap()
                .starts_with("Invalid URL")
        );
        assert_eq!(outcome.results[1].file_name.as_deref(), Some("ok-2.pdf"));
    }

    #[tokio::test]
    async fn test_convert_batch_preserves_input_order() {
        let mut session = MockRenderSession::new();
        let mut seq = mockall::Sequence::new();
        for path in ["/c", "/a", "/b"] {
            session
                .expect_render()
                .withf(move |url| url.path() == path)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(b"%PDF".to_vec()));
        }
        session.expect_close().times(1).returning(|| Ok(()));

        let service = service_with(session);
        let outcome = service
            .convert_batch(&urls(&[
                "https://a.test/c",
                "https://a.test/a",
                "https://a.test/b",
            ]))
            .await
            .unwrap();

        let returned: Vec<_> = outcome.results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            returned,
            vec!["https://a.test/c", "https://a.test/a", "https://a.test/b"]
        );
        assert_eq!(
            archive_names(&outcome.archive),
            vec!["c-1.pdf", "a-2.pdf", "b-3.pdf"]
        );
    }

    #[tokio::test]
    async fn test_convert_batch_same_slug_gets_distinct_entries() {
        let mut session = MockRenderSession::new();
        session
            .expect_render()
            .times(2)
            .returning(|_| Ok(b"%PDF".to_vec()));
        session.expect_close().times(1).returning(|| Ok(()));

        let service = service_with(session);
        let outcome = service
            .convert_batch(&urls(&["https://a.test/docs", "https://b.test/docs"]))
            .await
            .unwrap();

        assert_eq!(
            archive_names(&outcome.archive),
            vec!["docs-1.pdf", "docs-2.pdf"]
        );
    }

    #[tokio::test]
    async fn test_convert_batch_close_error_is_not_fatal() {
        let mut session = MockRenderSession::new();
        session
            .expect_render()
            .times(1)
            .returning(|_| Ok(b"%PDF".to_vec()));
        session
            .expect_close()
            .times(1)
            .returning(|| Err(RenderError::Browser("already gone".into())));

        let service = service_with(session);
        let outcome = service
            .convert_batch(&urls(&["https://a.test/x"]))
            .await
            .unwrap();

        assert_eq!(outcome.summary().successful, 1);
    }

    #[tokio::test]
    async fn test_convert_batch_rejects_empty_and_oversized() {
        let mut renderer = MockPageRenderer::new();
        renderer.expect_launch().times(0);
        let service = ConversionService::new(Arc::new(renderer), 2);

        let err = service.convert_batch(&[]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = service
            .convert_batch(&urls(&["https://a/1", "https://a/2", "https://a/3"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.message().contains("at most 2"));
        assert!(err.message().contains("MAX_BATCH_URLS"));
    }

    #[test]
    fn test_parse_target_schemes() {
        assert!(parse_target("https://a.test/x").is_ok());
        assert!(parse_target("http://a.test").is_ok());
        assert!(matches!(
            parse_target("ftp://a.test/x"),
            Err(RenderError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_target("a.test/x"),
            Err(RenderError::InvalidUrl(_))
        ));
    }
}
