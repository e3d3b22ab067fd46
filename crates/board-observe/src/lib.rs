//! Logging setup shared by board binaries.
//!
//! Library crates only emit `tracing` events; binaries call [`logger_init`] once at startup.

mod logger;
pub use logger::*;
