use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};
use crate::http::response::{Body, Response};

/// Bodies are copied to the client in chunks of this size.
pub const BODY_CHUNK_SIZE: usize = 1024;

/// Serializes the status line and headers.
///
/// The format is deliberately simpler than RFC 7230: lines end in a bare
/// `\n`, there is no reason phrase, and the blank line separating headers
/// from the body is only written when there is a body.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!("{} {}\n", resp.version, resp.status.as_u16());
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\n");
    }

    // Header/body separator
    if resp.body.is_some() {
        buf.extend_from_slice(b"\n");
    }

    buf
}

/// Writes one response to a stream.
///
/// The writer owns the response body. It is released as soon as
/// [`write_to_stream`](Self::write_to_stream) returns, whether the write
/// succeeded or not.
pub struct ResponseWriter {
    head: Vec<u8>,
    written: usize,
    body: Option<Body>,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        let head = serialize_head(&response);
        Self {
            head,
            written: 0,
            body: response.body,
        }
    }

    /// Whether the body is still owned by the writer.
    pub fn body_pending(&self) -> bool {
        self.body.is_some()
    }

    /// Writes the head and then the body, returning the number of body bytes
    /// written.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        // Dropped on every return path, including a failed head write.
        let body = self.body.take();

        while self.written < self.head.len() {
            let n = stream.write(&self.head[self.written..]).await?;

            if n == 0 {
                return Err(write_zero());
            }

            self.written += n;
        }

        let sent = match body {
            None => 0,
            Some(Body::Full(bytes)) => {
                for chunk in bytes.chunks(BODY_CHUNK_SIZE) {
                    stream.write_all(chunk).await?;
                }
                bytes.len() as u64
            }
            Some(Body::File(mut file)) => {
                let mut chunk = BytesMut::with_capacity(BODY_CHUNK_SIZE);
                let mut sent = 0u64;
                loop {
                    chunk.clear();
                    let n = file.read_buf(&mut chunk).await?;
                    if n == 0 {
                        break;
                    }
                    stream.write_all(&chunk).await?;
                    sent += n as u64;
                }
                sent
            }
        };

        stream.flush().await?;
        Ok(sent)
    }
}

fn write_zero() -> Error {
    Error::Io(std::io::Error::new(
        std::io::ErrorKind::WriteZero,
        "connection closed while writing",
    ))
}
