//! Request and response payloads shared by routes and SSE.

/// Health check payloads.
pub mod health;
/// Scoreboard snapshot and operation payloads.
pub mod scoreboard;
/// Display preference payloads.
pub mod settings;
/// Server-Sent Events payloads.
pub mod sse;
