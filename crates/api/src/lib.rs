//! Annotator API server library.
//!
//! Exposes the building blocks (config, state, error handling, session
//! store, routes) so integration tests and the binary entrypoint can both
//! access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod session;
pub mod state;
