//! Common error handling for the change intake service
//!
//! Request-level failures (rejected change payloads) are modelled inside the
//! server crate and never leave the HTTP handler. This crate only covers the
//! faults that end the process: bad configuration, a port that cannot be
//! bound, or the server loop failing.
//!
//! # Example
//!
//! ```rust
//! use error_common::{Result, ServiceError};
//!
//! fn parse_port(raw: &str) -> Result<u16> {
//!     raw.parse()
//!         .map_err(|e| ServiceError::Config(format!("invalid port {raw:?}: {e}")))
//! }
//!
//! assert!(parse_port("8080").is_ok());
//! assert!(parse_port("http").is_err());
//! ```

pub mod types;

pub use types::*;
