//! Daily quest API server library.
//!
//! Exposes config, state, error handling and routes so integration tests and
//! the binary entrypoint share one router.

pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
