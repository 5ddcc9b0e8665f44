pub mod in_memory_relay;
pub mod migrations;
pub mod sqlite_relay;

pub use in_memory_relay::InMemoryRelay;
pub use sqlite_relay::SqliteRelay;
