use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};
use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::resolver::Resolve;

/// Handles a single request/response exchange on one stream.
pub struct Connection<S, R> {
    stream: S,
    resolver: Arc<R>,
    read_buffer_size: usize,
    state: ConnectionState,
}

/// Progress through one exchange. Transitions only move forward; a failure
/// at any step goes straight to `Closed`.
#[derive(Debug)]
pub enum ConnectionState {
    Opened,
    RequestRead(BytesMut),
    RequestParsed(Request),
    ResponseResolved(Response),
    ResponseSent,
    Closed,
}

impl<S, R> Connection<S, R>
where
    S: AsyncRead + AsyncWrite + Unpin,
    R: Resolve,
{
    pub fn new(stream: S, resolver: Arc<R>, read_buffer_size: usize) -> Self {
        Self {
            stream,
            resolver,
            read_buffer_size,
            state: ConnectionState::Opened,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Runs the exchange to completion.
    ///
    /// On error nothing further is written to the client; the caller decides
    /// how to report the failure. Dropping the connection closes the stream.
    pub async fn run(&mut self) -> Result<()> {
        let res = self.advance().await;
        if res.is_err() {
            self.state = ConnectionState::Closed;
        }
        res
    }

    async fn advance(&mut self) -> Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Opened => {
                    let buf = self.read_request().await?;
                    self.state = ConnectionState::RequestRead(buf);
                }

                ConnectionState::RequestRead(buf) => {
                    let request = parse_http_request(&buf)?;
                    tracing::debug!(
                        method = %request.method,
                        path = %request.path,
                        version = %request.version,
                        "Request parsed"
                    );
                    self.state = ConnectionState::RequestParsed(request);
                }

                ConnectionState::RequestParsed(request) => {
                    let response = self.resolver.resolve(&request).await?;
                    self.state = ConnectionState::ResponseResolved(response);
                }

                ConnectionState::ResponseResolved(response) => {
                    let status = response.status;
                    let mut writer = ResponseWriter::new(response);
                    let sent = writer.write_to_stream(&mut self.stream).await?;
                    tracing::debug!(
                        status = status.as_u16(),
                        reason = status.reason_phrase(),
                        body_bytes = sent,
                        "Response sent"
                    );
                    self.state = ConnectionState::ResponseSent;
                }

                ConnectionState::ResponseSent => {
                    // The response is already out; a failed close only
                    // means the peer went away first.
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Performs the single read that makes up the request.
    ///
    /// There is no attempt to gather a request split over several reads.
    async fn read_request(&mut self) -> Result<BytesMut> {
        let mut buf = BytesMut::with_capacity(self.read_buffer_size);
        let n = self.stream.read_buf(&mut buf).await?;

        if n == 0 {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed before a request was received",
            )));
        }

        Ok(buf)
    }
}
