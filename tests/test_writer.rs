mod common;

use std::io::Write;

use common::parse_wire_response;
use tokio::io::AsyncReadExt;
use fileserve::http::response::{Response, ResponseBuilder, StatusCode};
use fileserve::http::writer::{BODY_CHUNK_SIZE, ResponseWriter, serialize_head};

async fn write_to_vec(response: Response) -> (Vec<u8>, u64) {
    let mut out = Vec::new();
    let mut writer = ResponseWriter::new(response);
    let sent = writer.write_to_stream(&mut out).await.unwrap();
    (out, sent)
}

#[test]
fn test_status_line_has_no_reason_phrase() {
    let response = ResponseBuilder::new(StatusCode::NotFound).build();
    let head = serialize_head(&response);

    assert_eq!(head, b"HTTP/1.1 404\n");
}

#[tokio::test]
async fn test_response_without_body_has_no_blank_line() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("X-Test", "yes")
        .build();

    let (out, sent) = write_to_vec(response).await;

    assert_eq!(out, b"HTTP/1.1 200\nX-Test: yes\n");
    assert_eq!(sent, 0);
}

#[tokio::test]
async fn test_response_with_body() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .body("hello")
        .build();

    let (out, sent) = write_to_vec(response).await;
    let text = String::from_utf8(out.clone()).unwrap();

    assert!(text.starts_with("HTTP/1.1 200\n"));
    assert!(text.contains("Content-Type: text/plain\n"));
    assert!(text.contains("Content-Length: 5\n"));
    assert!(text.ends_with("\n\nhello"));
    assert_eq!(sent, 5);

    let wire = parse_wire_response(&out);
    assert_eq!(wire.status, 200);
    assert_eq!(wire.body.as_deref(), Some(&b"hello"[..]));
}

#[tokio::test]
async fn test_not_found_serialization() {
    let (out, _) = write_to_vec(Response::not_found()).await;
    let wire = parse_wire_response(&out);

    assert_eq!(wire.version, "HTTP/1.1");
    assert_eq!(wire.status, 404);
    assert_eq!(wire.header("Content-Type"), Some("text/html"));
    assert!(wire.body_text().contains("404 Not Found"));
    assert_eq!(
        wire.header("Content-Length"),
        Some(wire.body.as_ref().unwrap().len().to_string().as_str())
    );
}

#[tokio::test]
async fn test_file_response_round_trip() {
    // Larger than one chunk and not a multiple of it.
    let contents: Vec<u8> = (0..BODY_CHUNK_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&contents).unwrap();

    let file = tokio::fs::File::open(tmp.path()).await.unwrap();
    let len = file.metadata().await.unwrap().len();
    let (out, sent) = write_to_vec(Response::file(file, len)).await;
    let wire = parse_wire_response(&out);

    assert_eq!(wire.status, 200);
    assert_eq!(wire.header("Content-Length"), Some(contents.len().to_string().as_str()));
    assert_eq!(wire.body.as_deref(), Some(contents.as_slice()));
    assert_eq!(sent, contents.len() as u64);
}

#[tokio::test]
async fn test_empty_file_round_trip() {
    let tmp = tempfile::NamedTempFile::new().unwrap();

    let file = tokio::fs::File::open(tmp.path()).await.unwrap();
    let (out, sent) = write_to_vec(Response::file(file, 0)).await;
    let wire = parse_wire_response(&out);

    assert_eq!(wire.header("Content-Length"), Some("0"));
    assert_eq!(wire.body.as_deref(), Some(&b""[..]));
    assert_eq!(sent, 0);
}

#[tokio::test]
async fn test_write_error_is_reported() {
    let (client, mut server) = tokio::io::duplex(16);
    drop(client);

    let mut writer = ResponseWriter::new(Response::not_found());
    let result = writer.write_to_stream(&mut server).await;

    assert!(matches!(result, Err(fileserve::Error::Io(_))));
    assert!(!writer.body_pending());
}

#[tokio::test]
async fn test_file_is_released_when_client_disconnects_mid_body() {
    let contents = vec![7u8; BODY_CHUNK_SIZE * 64];
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&contents).unwrap();

    // Far smaller than the file, so the writer blocks until the client reads.
    let (mut client, mut server) = tokio::io::duplex(256);
    let reader = tokio::spawn(async move {
        let mut buf = vec![0u8; BODY_CHUNK_SIZE * 2];
        client.read_exact(&mut buf).await.unwrap();
        // Dropping the client closes the connection halfway through the body.
    });

    let file = tokio::fs::File::open(tmp.path()).await.unwrap();
    let len = file.metadata().await.unwrap().len();
    let mut writer = ResponseWriter::new(Response::file(file, len));
    assert!(writer.body_pending());

    let result = writer.write_to_stream(&mut server).await;
    reader.await.unwrap();

    assert!(matches!(result, Err(fileserve::Error::Io(_))));
    assert!(!writer.body_pending());
}
