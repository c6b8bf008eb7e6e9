//! Tests for the service client wire behavior
//!
//! Each test spins up a one-shot canned-response HTTP server on
//! 127.0.0.1:0 and drives the real client against it, capturing the raw
//! request for assertions on method, path, and multipart fields.

use crate::{Error, SelectedImage, ServiceClient};
use prism_types::ArtifactKind;
use std::io::{Read, Write};
use std::sync::mpsc;

/// Serve exactly one canned response, returning the base URL and a
/// receiver yielding the raw request that arrived.
fn one_shot_server(response: String) -> (String, mpsc::Receiver<String>) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let request = read_full_request(&mut stream);
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
            let _ = tx.send(request);
        }
    });

    (format!("http://{addr}"), rx)
}

/// Read headers plus a Content-Length-delimited body.
fn read_full_request(stream: &mut std::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            return String::from_utf8_lossy(&buf).into_owned();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn http_response(status: u16, reason: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn test_image() -> SelectedImage {
    SelectedImage::new("photo.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]).unwrap()
}

#[tokio::test]
async fn test_generate_success_parses_result() {
    let body = r#"{"preset_id":"p1","style_description":"Film Noir","xmp_url":"/x/p1.xmp","preview_url":"/x/p1.jpg"}"#;
    let (base, rx) = one_shot_server(http_response(200, "OK", "application/json", body));

    let client = ServiceClient::new(&base).unwrap();
    let result = client.generate(&test_image(), "Film Noir").await.unwrap();

    assert_eq!(result.preset_id, "p1");
    assert_eq!(result.style_description, "Film Noir");
    assert_eq!(result.xmp_url, "/x/p1.xmp");
    assert_eq!(result.preview_url, "/x/p1.jpg");

    let request = rx.recv().unwrap();
    assert!(request.starts_with("POST /generate_preset/ HTTP/1.1"));
    assert!(request.contains("name=\"file\""));
    assert!(request.contains("filename=\"photo.jpg\""));
    assert!(request.contains("image/jpeg"));
    assert!(request.contains("name=\"style_description\""));
    assert!(request.contains("Film Noir"));
}

#[tokio::test]
async fn test_generate_failure_surfaces_detail() {
    let (base, _rx) = one_shot_server(http_response(
        500,
        "Internal Server Error",
        "application/json",
        r#"{"detail":"bad image"}"#,
    ));

    let client = ServiceClient::new(&base).unwrap();
    let err = client.generate(&test_image(), "vintage").await.unwrap_err();

    match err {
        Error::Server { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "bad image");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_failure_without_json_body_falls_back() {
    let (base, _rx) = one_shot_server(http_response(502, "Bad Gateway", "text/plain", "nope"));

    let client = ServiceClient::new(&base).unwrap();
    let err = client.generate(&test_image(), "soft").await.unwrap_err();

    match err {
        Error::Server { status, detail } => {
            assert_eq!(status, 502);
            assert_eq!(detail, "Bad Gateway");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_artifact_requests_result_url() {
    let (base, rx) = one_shot_server(http_response(
        200,
        "OK",
        "application/octet-stream",
        "XMPDATA",
    ));

    let client = ServiceClient::new(&base).unwrap();
    let result = super::fixtures::sample_result();
    let bytes = client
        .fetch_artifact(ArtifactKind::Xmp, &result)
        .await
        .unwrap();

    assert_eq!(bytes, b"XMPDATA");
    let request = rx.recv().unwrap();
    assert!(request.starts_with("GET /x/p1.xmp HTTP/1.1"));
}

#[tokio::test]
async fn test_fetch_artifact_failure_is_server_error() {
    let (base, _rx) = one_shot_server(http_response(
        404,
        "Not Found",
        "application/json",
        r#"{"detail":"Preset not found"}"#,
    ));

    let client = ServiceClient::new(&base).unwrap();
    let result = super::fixtures::sample_result();
    let err = client
        .fetch_artifact(ArtifactKind::Preview, &result)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Server { status: 404, .. }));
}

#[tokio::test]
async fn test_recommend_success() {
    let (base, rx) = one_shot_server(http_response(
        200,
        "OK",
        "application/json",
        r#"{"preset":"moody","confidence_score":0.91}"#,
    ));

    let client = ServiceClient::new(&base).unwrap();
    let recommendation = client.recommend(&test_image()).await.unwrap();

    assert_eq!(recommendation.preset, "moody");
    assert!((recommendation.confidence_score - 0.91).abs() < f64::EPSILON);
    assert!(rx.recv().unwrap().starts_with("POST /recommend_preset/ HTTP/1.1"));
}

#[tokio::test]
async fn test_recommend_swallows_failures() {
    let (base, _rx) = one_shot_server(http_response(
        500,
        "Internal Server Error",
        "application/json",
        r#"{"detail":"no model"}"#,
    ));

    let client = ServiceClient::new(&base).unwrap();
    assert!(client.recommend(&test_image()).await.is_none());
}

#[tokio::test]
async fn test_recommend_swallows_connection_refused() {
    // Bind then drop to get a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ServiceClient::new(&format!("http://{addr}")).unwrap();
    assert!(client.recommend(&test_image()).await.is_none());
}

#[tokio::test]
async fn test_list_files_parses_listing() {
    let body = r#"{"files":[{"filename":"preview_p1.jpg","style_description":"Generated preset","upload_time":"2026-01-05T10:00:00"}]}"#;
    let (base, rx) = one_shot_server(http_response(200, "OK", "application/json", body));

    let client = ServiceClient::new(&base).unwrap();
    let listing = client.list_files().await.unwrap();

    assert_eq!(listing.files.len(), 1);
    assert_eq!(listing.files[0].filename, "preview_p1.jpg");
    assert!(rx.recv().unwrap().starts_with("GET /files/ HTTP/1.1"));
}

#[tokio::test]
async fn test_delete_file_uses_delete_method() {
    let (base, rx) = one_shot_server(http_response(200, "OK", "application/json", "{}"));

    let client = ServiceClient::new(&base).unwrap();
    client.delete_file("preview_p1.jpg").await.unwrap();

    assert!(rx.recv().unwrap().starts_with("DELETE /files/preview_p1.jpg HTTP/1.1"));
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = ServiceClient::new("http://localhost:8000/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000");
}
