//! TCP listener and connection admission.

pub mod limiter;
pub mod listener;

pub use limiter::{ConnectionLimiter, ConnectionPermit};
pub use listener::{run, serve};
