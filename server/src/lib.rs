//! # Server
//!
//! The HTTP boundary of the folio chat service.
//!
//! One JSON endpoint (`POST /api/chat`) runs the retrieval pipeline; CORS
//! is wide open so the static portfolio site can call it from any origin.
//! Every failure — missing credential, bad input, provider outage — is
//! translated to a generic error body at this boundary; internal detail is
//! logged, never echoed to the caller.

pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{AppState, build_router};
