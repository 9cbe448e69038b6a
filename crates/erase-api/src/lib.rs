//! Axum HTTP callback server.
//!
//! This crate provides:
//! - The `/callback` webhook endpoint for pipeline completion events
//! - A `/health` liveness probe
//! - Configuration, application state, and error-to-response mapping

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
