//! Mapping requests to responses.
//!
//! The connection handler only knows the [`Resolve`] trait. [`FsResolver`]
//! is the implementation used by the server; tests substitute their own.

use std::future::Future;

use crate::error::Result;
use crate::http::request::Request;
use crate::http::response::Response;

pub mod fs;

pub use fs::FsResolver;

/// Produces the response for a request.
///
/// Implementations are shared between all connection tasks, so they must
/// not rely on per-connection state.
pub trait Resolve: Send + Sync + 'static {
    fn resolve(&self, request: &Request) -> impl Future<Output = Result<Response>> + Send;
}
