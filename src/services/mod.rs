/// Buzzer playback on clock expiry.
pub mod buzzer_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Score, clock and dialog operations exposed over HTTP.
pub mod scoreboard_service;
/// Display preferences persisted alongside the session.
pub mod settings_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
