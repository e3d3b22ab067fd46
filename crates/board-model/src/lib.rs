//! Wire and domain types of the board REST API.
//!
//! Everything here is transport-agnostic: `board-client` moves these types over HTTP,
//! `board-dashboard` turns the chart types into series.

mod domain;
pub use domain::*;

mod error;
pub use error::{SessionError, ValidationError};
