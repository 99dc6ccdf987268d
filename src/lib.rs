//! Music Catalog Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog_store;
pub mod config;
pub mod server;
pub mod sqlite_persistence;
pub mod stats;

// Re-export commonly used types for convenience
pub use catalog_store::{CatalogStore, SqliteCatalogStore};
pub use server::{run_server, Environment, RequestsLoggingLevel, ServerConfig};
