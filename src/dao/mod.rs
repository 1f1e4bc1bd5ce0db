/// Key/value backends holding the persisted session and settings.
pub mod kv_store;
/// Session model restored at startup.
pub mod models;
/// Storage error types shared by every backend.
pub mod storage;
