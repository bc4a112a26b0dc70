#![allow(dead_code)]

use std::collections::HashMap;

use tracing::Level;

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// A response as it appeared on the wire.
#[derive(Debug)]
pub struct WireResponse {
    pub version: String,
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl WireResponse {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(self.body.as_deref().unwrap_or_default()).into_owned()
    }
}

/// Splits serialized response bytes back into their parts.
pub fn parse_wire_response(bytes: &[u8]) -> WireResponse {
    let (head, body) = match bytes.windows(2).position(|w| w == b"\n\n") {
        Some(pos) => (&bytes[..pos + 1], Some(bytes[pos + 2..].to_vec())),
        None => (bytes, None),
    };

    let head = String::from_utf8(head.to_vec()).expect("response head is not UTF-8");
    let mut lines = head.lines();

    let status_line = lines.next().expect("missing status line");
    let (version, status) = status_line.split_once(' ').expect("malformed status line");

    let headers = lines
        .filter_map(|line| line.split_once(": "))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    WireResponse {
        version: version.to_string(),
        status: status.parse().expect("status is not a number"),
        headers,
        body,
    }
}
