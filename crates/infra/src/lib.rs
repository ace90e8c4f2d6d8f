//! Infrastructure layer: record storage and configuration.

pub mod config;
pub mod store;

pub use config::{ConfigError, HomepageHandler, ServerConfig};
pub use store::{InMemoryRecordStore, RecordStore};
