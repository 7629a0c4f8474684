mod common;

use common::{FakeRenderer, create_test_server_with_limit};

#[tokio::test]
async fn test_index_renders_both_tabs() {
    let (server, _calls) = create_test_server_with_limit(FakeRenderer::new(), 25);

    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("id=\"single-form\""));
    assert!(html.contains("id=\"batch-form\""));
    assert!(html.contains("at most 25"));
}
