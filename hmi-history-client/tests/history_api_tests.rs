/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Round trips against a one-shot local HTTP server.

use hmi_history_client::{HistoryApiClient, HistoryError, HistoryQuery, HistorySource};
use hmi_types::Tag;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves exactly one request with the given status line and body, and
/// returns the raw request head it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });
    (format!("http://{addr}/api/history"), handle)
}

fn pid_tags() -> Vec<Tag> {
    vec!["tic1.pid.pv".into(), "tic1.sp".into()]
}

#[tokio::test]
async fn cursor_page_is_decoded_and_query_is_sent() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"rows":[{"tag":"tic1.pid.pv","ts":1000,"value":180.5},{"tag":"tic1.sp","timestamp":1000,"value":225}],"end":1000}"#,
    )
    .await;
    let client = HistoryApiClient::new(&url);

    let page = client
        .fetch(&HistoryQuery::cursor(&pid_tags(), 300, Some(500.0)))
        .await
        .unwrap();

    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[1].value, 225.0);
    assert_eq!(page.end, Some(1000.0));

    let request = server.await.unwrap();
    let request_line = request.lines().next().unwrap();
    assert!(request_line.starts_with("GET /api/history?"), "{request_line}");
    assert!(request_line.contains("tags=tic1.pid.pv%2Ctic1.sp"), "{request_line}");
    assert!(request_line.contains("limit=300"), "{request_line}");
    assert!(request_line.contains("after=500"), "{request_line}");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (url, server) = serve_once("503 Service Unavailable", r#"{"error":"historian offline"}"#).await;
    let client = HistoryApiClient::new(&url);

    let err = client
        .fetch(&HistoryQuery::range(&pid_tags(), 0.0, 1000.0))
        .await
        .unwrap_err();

    match err {
        HistoryError::Status { status, body } => {
            assert_eq!(status, 503);
            assert!(body.contains("historian offline"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (url, server) = serve_once("200 OK", r#"{"rows": 12}"#).await;
    let client = HistoryApiClient::new(&url);

    let err = client
        .fetch(&HistoryQuery::range(&pid_tags(), 0.0, 1000.0))
        .await
        .unwrap_err();

    assert!(matches!(err, HistoryError::Decode(_)), "{err:?}");
    server.await.unwrap();
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HistoryApiClient::new(&format!("http://{addr}/api/history"));

    let err = client
        .fetch(&HistoryQuery::range(&pid_tags(), 0.0, 1000.0))
        .await
        .unwrap_err();

    assert!(matches!(err, HistoryError::Network(_)), "{err:?}");
}
