mod harness;

use harness::config::ConfigBuilder;
use harness::server::TestServer;

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let uploads = tempfile::tempdir().unwrap();
    let config = ConfigBuilder::new(uploads.path()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn health_endpoint_disabled() {
    let uploads = tempfile::tempdir().unwrap();
    let config = ConfigBuilder::new(uploads.path()).without_health().build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn index_serves_upload_page() {
    let uploads = tempfile::tempdir().unwrap();
    let config = ConfigBuilder::new(uploads.path()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/")).send().await.unwrap();

    assert_eq!(resp.status(), 200);
    let content_type = resp.headers()["content-type"].to_str().unwrap().to_owned();
    assert!(content_type.starts_with("text/html"));
    let body = resp.text().await.unwrap();
    assert!(body.contains("audio_file"));
    assert!(body.contains("/process"));
}

#[tokio::test]
async fn upload_dir_is_created_at_startup() {
    let root = tempfile::tempdir().unwrap();
    let uploads = root.path().join("nested").join("uploads");
    let config = ConfigBuilder::new(&uploads).build();

    let _server = TestServer::start(config).await.unwrap();

    assert!(uploads.is_dir());
}
