//! Library crate for scoreboard-back, exposing modules for binaries and integration tests.

pub mod config;
/// Persistence backends and the saved session model.
pub mod dao;
pub mod domain;
/// Wire types for HTTP and SSE payloads.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// axum routers.
pub mod routes;
/// Route logic and background tasks.
pub mod services;
/// Scoreboard controller and shared application state.
pub mod state;
pub mod timer;
