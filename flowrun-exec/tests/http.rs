use std::time::Duration;

use flowrun_exec::executor::http::{HttpClient, HttpError, ReqwestHttpClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve one canned HTTP/1.1 response on a loopback port and return its base URL.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn get_returns_status_and_body() {
    let base = serve_once("200 OK", r#"{"current_weather":{"temperature":21.5}}"#).await;
    let client = ReqwestHttpClient::default();

    let resp = client
        .get(&format!("{base}/forecast?lat=1"), Duration::from_secs(5), 1024)
        .await
        .unwrap();
    assert_eq!(resp.status, 200);
    assert!(resp.is_success());
    let body: serde_json::Value = serde_json::from_slice(&resp.body).unwrap();
    assert_eq!(body["current_weather"]["temperature"], 21.5);
}

#[tokio::test]
async fn non_success_status_is_returned_not_raised() {
    let base = serve_once("503 Service Unavailable", "{}").await;
    let resp = ReqwestHttpClient::default()
        .get(&base, Duration::from_secs(5), 1024)
        .await
        .unwrap();
    assert_eq!(resp.status, 503);
    assert!(!resp.is_success());
}

#[tokio::test]
async fn enforces_response_size_limit() {
    let base = serve_once("200 OK", r#"{"padding":"xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"}"#).await;
    let err = ReqwestHttpClient::default()
        .get(&base, Duration::from_secs(5), 16)
        .await
        .unwrap_err();
    assert_eq!(err, HttpError::ResponseTooLarge { max_bytes: 16 });
}

#[tokio::test]
async fn enforces_size_limit_on_chunked_body() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let head = "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ntransfer-encoding: chunked\r\n\r\n";
        let _ = socket.write_all(head.as_bytes()).await;
        for _ in 0..8 {
            let _ = socket.write_all(b"10\r\n0123456789abcdef\r\n").await;
        }
        let _ = socket.write_all(b"0\r\n\r\n").await;
        let _ = socket.shutdown().await;
    });

    let url = format!("http://{addr}");
    let err = ReqwestHttpClient::default()
        .get(&url, Duration::from_secs(5), 40)
        .await
        .unwrap_err();
    assert_eq!(err, HttpError::ResponseTooLarge { max_bytes: 40 });
}

#[tokio::test]
async fn reads_chunked_body_within_limit() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let head = "HTTP/1.1 200 OK\r\ntransfer-encoding: chunked\r\n\r\n";
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.write_all(b"6\r\n{\"a\":1\r\n1\r\n}\r\n0\r\n\r\n").await;
        let _ = socket.shutdown().await;
    });

    let resp = ReqwestHttpClient::default()
        .get(&format!("http://{addr}"), Duration::from_secs(5), 64)
        .await
        .unwrap();
    assert_eq!(resp.body, br#"{"a":1}"#);
}

#[tokio::test]
async fn rejects_invalid_url() {
    let err = ReqwestHttpClient::default()
        .get("not a url", Duration::from_secs(5), 1024)
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::InvalidUrl(_)));
}

#[tokio::test]
async fn times_out_on_silent_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let err = ReqwestHttpClient::default()
        .get(&format!("http://{addr}"), Duration::from_millis(200), 1024)
        .await
        .unwrap_err();
    assert_eq!(err, HttpError::Timeout);
}
