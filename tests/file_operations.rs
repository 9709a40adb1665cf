//! Request-level tests for the write and config endpoints.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use corganize::{ClientConfig, CorganizeClient, CorganizeError, FileRecord};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CorganizeClient {
    CorganizeClient::new(&server.uri(), "test-key").unwrap()
}

#[tokio::test]
async fn test_create_files_posts_array_and_returns_json() {
    let mock_server = MockServer::start().await;

    let files = vec![
        FileRecord::with_id("f1").with_field("filename", "a.mp4"),
        FileRecord::with_id("f2").with_field("filename", "b.mp4"),
    ];
    let response = json!({ "created": ["f1", "f2"], "skipped": [] });

    Mock::given(method("POST"))
        .and(path("/files/bulk"))
        .and(header("apikey", "test-key"))
        .and(body_json(json!([
            { "fileid": "f1", "filename": "a.mp4" },
            { "fileid": "f2", "filename": "b.mp4" }
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).create_files(&files).await.unwrap();

    assert_eq!(result, response);
}

#[tokio::test]
async fn test_create_files_error_message_is_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/files/bulk"))
        .respond_with(ResponseTemplate::new(500).set_body_string("duplicate key: f1"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .create_files(&[FileRecord::with_id("f1")])
        .await
        .unwrap_err();

    match err {
        CorganizeError::ApiError {
            message,
            status_code,
        } => {
            assert_eq!(message, "duplicate key: f1");
            assert_eq!(status_code, 500);
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_update_file_patches_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/files"))
        .and(header("apikey", "test-key"))
        .and(body_json(json!({ "fileid": "f1", "isactive": true })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let file = FileRecord::with_id("f1").with_field("isactive", true);
    client_for(&mock_server).update_file(&file).await.unwrap();
}

#[tokio::test]
async fn test_update_file_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(404).set_body_string("file not found: f9"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .update_file(&FileRecord::with_id("f9"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("file not found: f9"));
}

#[tokio::test]
async fn test_delete_files_body_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/files"))
        .and(header("apikey", "test-key"))
        .and(body_json(json!({ "fileids": ["id1", "id2"] })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    client_for(&mock_server)
        .delete_files(&["id1", "id2"])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_single_file_uses_same_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/files"))
        .and(body_json(json!({ "fileids": ["id1"] })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    client_for(&mock_server).delete_file("id1").await.unwrap();
}

#[tokio::test]
async fn test_delete_files_rejects_non_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let ids = vec!["id1".to_string()];
    let err = client_for(&mock_server).delete_files(&ids).await.unwrap_err();

    assert_eq!(err.status_code(), Some(403));
    // Empty body falls back to the status line
    assert!(err.to_string().contains("HTTP 403"));
}

#[tokio::test]
async fn test_get_user_config() {
    let mock_server = MockServer::start().await;

    let config = json!({ "userid": "u1", "maxactivefiles": 20 });
    Mock::given(method("GET"))
        .and(path("/config"))
        .and(header("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&config))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_user_config().await.unwrap();

    assert_eq!(result, config);
}

#[tokio::test]
async fn test_get_user_config_server_error_has_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).get_user_config().await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_base_url_with_path_and_trailing_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = format!("{}/api/", mock_server.uri());
    let client = CorganizeClient::new(&base, "test-key").unwrap();

    assert_eq!(client.get_user_config().await.unwrap(), json!({}));
}

#[tokio::test]
async fn test_custom_user_agent_from_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config"))
        .and(header("user-agent", "catalog-sync/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new(mock_server.uri(), "test-key").with_user_agent("catalog-sync/2.0");
    let client = CorganizeClient::with_config(config).unwrap();

    client.get_user_config().await.unwrap();
}

#[tokio::test]
async fn test_transport_error_is_propagated() {
    // Nothing listens on the discard port
    let client = CorganizeClient::new("http://127.0.0.1:9", "test-key").unwrap();

    let err = client.get_user_config().await.unwrap_err();

    assert!(matches!(err, CorganizeError::HttpError(_)), "got {err:?}");
}

#[tokio::test]
async fn test_sub_second_timeout_allows_fast_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "userid": "u1" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config =
        ClientConfig::new(mock_server.uri(), "test-key").with_timeout(Duration::from_millis(500));
    let client = CorganizeClient::with_config(config).unwrap();

    assert_eq!(client.get_user_config().await.unwrap(), json!({ "userid": "u1" }));
}

#[tokio::test]
async fn test_sub_second_timeout_expires_on_slow_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config =
        ClientConfig::new(mock_server.uri(), "test-key").with_timeout(Duration::from_millis(200));
    let client = CorganizeClient::with_config(config).unwrap();

    let err = client.get_user_config().await.unwrap_err();
    match err {
        CorganizeError::HttpError(e) => assert!(e.is_timeout(), "got {e:?}"),
        other => panic!("expected HttpError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_truncated_error_body_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Promises 100 body bytes, sends 5, then hangs up
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let _ = socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\n\r\nshort")
            .await;
        let _ = socket.shutdown().await;
    });

    let client = CorganizeClient::new(&format!("http://{addr}"), "test-key").unwrap();
    let err = client.get_user_config().await.unwrap_err();

    assert!(matches!(err, CorganizeError::HttpError(_)), "got {err:?}");
}
