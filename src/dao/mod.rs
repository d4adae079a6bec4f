/// Persisted document layouts.
pub mod models;
/// Snapshot persistence of user statistics.
pub mod snapshot_store;
/// Storage error types shared by snapshot stores.
pub mod storage;
