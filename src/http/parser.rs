use std::collections::HashMap;

use thiserror::Error;

use crate::http::request::{Method, Request};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid HTTP start line.")]
    InvalidStartLine,
    #[error("Invalid HTTP method: {0}.")]
    InvalidMethod(String),
}

/// Parses the bytes of a single read into a [`Request`].
///
/// Lines are separated by `\n`; a trailing `\r` is dropped from each line.
/// Everything after the start line is treated as headers and no body is
/// attached, whatever `Content-Length` says.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let text = String::from_utf8_lossy(buf);
    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    // Request line
    let start_line = lines.next().unwrap_or_default();
    let mut parts = start_line.split(' ');

    let (method_str, target, version) = match (parts.next(), parts.next(), parts.next()) {
        (Some(m), Some(t), Some(v)) => (m, t, v),
        _ => return Err(ParseError::InvalidStartLine),
    };

    let method = Method::from_str(method_str)
        .ok_or_else(|| ParseError::InvalidMethod(method_str.to_string()))?;

    let (path, query) = parse_target(target);
    let headers = parse_headers(lines);

    Ok(Request {
        method,
        path: path.to_string(),
        query,
        version: version.to_string(),
        headers,
    })
}

/// Splits a request target into its path and query parameters.
///
/// A query segment without `=` is kept with an empty value; empty segments
/// are dropped.
pub fn parse_target(target: &str) -> (&str, HashMap<String, String>) {
    let mut query = HashMap::new();

    let Some((path, query_str)) = target.split_once('?') else {
        return (target, query);
    };

    for segment in query_str.split('&').filter(|s| !s.is_empty()) {
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        query.insert(key.to_string(), value.to_string());
    }

    (path, query)
}

fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        headers.insert(key.trim().to_string(), value.to_string());
    }

    headers
}
