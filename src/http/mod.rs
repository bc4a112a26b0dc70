//! HTTP protocol implementation.
//!
//! A reduced HTTP/1.1: one request per connection, no request bodies, and
//! bare `\n` line endings on the wire.
//!
//! # Architecture
//!
//! - **`connection`**: drives one exchange on an accepted stream
//! - **`parser`**: parses the bytes of a request
//! - **`request`**: request representation
//! - **`response`**: response representation, builder and the stock pages
//! - **`writer`**: serializes and writes responses
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Opened    │ ← Single read of the request bytes
//!        └──────┬──────┘
//!               ▼
//!        ┌──────────────────┐
//!        │   RequestRead    │ ← Parse
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │  RequestParsed   │ ← Resolve
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │ ResponseResolved │ ← Write
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │   ResponseSent   │ ← Shut down the stream
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! A failure in any state skips straight to `Closed` without writing a
//! response.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use fileserve::http::connection::Connection;
//! use fileserve::resolver::FsResolver;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let resolver = Arc::new(FsResolver::new("."));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let resolver = resolver.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, resolver, 1024);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
