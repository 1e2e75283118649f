// Adapters layer: concrete implementations for external systems (storage, sqlite).

pub mod sqlite;
pub mod storage;
