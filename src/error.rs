//! Error types shared across the server.

use std::path::PathBuf;

use thiserror::Error;

use crate::http::parser::ParseError;

/// Everything that can go wrong while serving.
///
/// Per-connection failures (`Protocol`, `Io`) end handling of that one
/// connection only. `NotFound` never reaches a client as an error: the
/// resolver turns it into a 404 page. `Bind` and `Config` are fatal at
/// startup.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Protocol(#[from] ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the failure was caused by the peer sending something we could
    /// not understand, as opposed to a local or transport failure.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Protocol(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
