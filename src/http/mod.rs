//! Axum HTTP server for the program type API.
//!
//! Handlers parse and validate requests, resolve the caller's identity from
//! a bearer token, and delegate to `db::services` for the business rules.
//! The router wires the endpoints together with CORS, gzip compression and
//! request tracing.

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
