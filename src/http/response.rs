use std::collections::HashMap;
use std::fmt::Write as _;

use bytes::Bytes;
use tokio::fs::File;

pub const HTTP_VERSION: &str = "HTTP/1.1";

const PAGE_TITLE: &str = "Simple HTTP Server";

/// HTTP status codes produced by the server.
///
/// Only the numeric code goes on the wire; the reason phrase is used for
/// logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use fileserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
        }
    }
}

/// The source of a response body.
#[derive(Debug)]
pub enum Body {
    /// A finite in-memory byte sequence.
    Full(Bytes),
    /// An open file, read lazily while the response is written.
    File(File),
}

/// An HTTP response waiting to be written to a client.
///
/// A `File` body is owned by the response: it is closed when the response
/// (or the writer that took it over) is dropped.
#[derive(Debug)]
pub struct Response {
    /// Protocol version for the status line
    pub version: String,
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers as key-value pairs
    pub headers: HashMap<String, String>,
    /// Response body, if any
    pub body: Option<Body>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body("hello")
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Option<Body>,
    body_len: Option<u64>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: None,
            body_len: None,
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets an in-memory body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        self.body_len = Some(body.len() as u64);
        self.body = Some(Body::Full(body));
        self
    }

    /// Sets a file body of `len` bytes.
    pub fn file(mut self, file: File, len: u64) -> Self {
        self.body_len = Some(len);
        self.body = Some(Body::File(file));
        self
    }

    /// Builds the final Response.
    ///
    /// Sets Content-Length from the body, replacing any value given through
    /// [`header`](Self::header). Responses without a body get no
    /// Content-Length.
    pub fn build(mut self) -> Response {
        if let Some(len) = self.body_len {
            self.headers.insert("Content-Length".to_string(), len.to_string());
        }

        Response {
            version: HTTP_VERSION.to_string(),
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates the 404 page.
    pub fn not_found() -> Self {
        let mut html = page_header();
        html.push_str("\t\t404 Not Found\n");
        html.push_str(PAGE_FOOTER);

        ResponseBuilder::new(StatusCode::NotFound)
            .header("Content-Type", "text/html")
            .body(html)
            .build()
    }

    /// Creates an HTML listing of `entries` in the directory at the
    /// normalized request path `dir_path`.
    ///
    /// A `..` entry is always listed first. Links in the root listing are
    /// `./name`; elsewhere they are absolute so they resolve the same way
    /// whether or not the browser's URL ends in `/`.
    pub fn directory_listing<S: AsRef<str>>(dir_path: &str, entries: &[S]) -> Self {
        let mut html = page_header();

        let prefix = match dir_path {
            "." => ".".to_string(),
            _ => format!("/{}", dir_path),
        };
        let names = std::iter::once("..").chain(entries.iter().map(|e| e.as_ref()));
        for name in names {
            let _ = writeln!(html, "\t\t<a href=\"{}/{}\">{}</a><br>", prefix, name, name);
        }
        html.push_str(PAGE_FOOTER);

        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/html")
            .body(html)
            .build()
    }

    /// Creates a download response streaming `file`, whose size was `len`
    /// bytes when it was opened.
    pub fn file(file: File, len: u64) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Connection", "close")
            .header("Content-Disposition", "attachment")
            .header("Content-Type", "application/octet-stream")
            .file(file, len)
            .build()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// The Content-Length header as a number, if present and valid.
    pub fn content_length(&self) -> Option<u64> {
        self.header("Content-Length").and_then(|v| v.parse().ok())
    }
}

const PAGE_FOOTER: &str = "\t</body>\n</html>\n";

fn page_header() -> String {
    format!(
        "<html>\n\t<head>\n\t\t<title>{}</title>\n\t</head>\n\t<body>\n",
        PAGE_TITLE
    )
}
