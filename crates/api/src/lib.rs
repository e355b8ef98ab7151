//! Inkpress API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! workflow engines, WebSocket infrastructure) so integration tests and the
//! binary entrypoint can both access them.

pub mod auth;
pub mod broadcast;
pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod response;
pub mod routes;
pub mod state;
pub mod workflow;
pub mod ws;
