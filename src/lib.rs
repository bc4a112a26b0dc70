//! fileserve - a small static file server
//!
//! Serves files and directory listings from a local directory over a
//! reduced form of HTTP/1.1.

pub mod config;
pub mod error;
pub mod http;
pub mod resolver;
pub mod server;

pub use error::{Error, Result};
