// Movie Catalog - Core Library
// Exposes all modules for use in the CLI and tests

pub mod config;
pub mod error;
pub mod fetcher;
pub mod menu;
pub mod movie;
pub mod report;
pub mod stats;
pub mod storage;
pub mod webpage;

// Re-export commonly used types
pub use config::{Config, DisplayConfig, OmdbConfig, StorageBackend, StorageConfig, Tone, WebpageConfig};
pub use error::CatalogError;
pub use fetcher::{LookupResult, MetadataLookup, OmdbClient};
pub use menu::{Command, Menu, MenuState};
pub use movie::{parse_rating, validate_title, Catalog, MovieRecord, NO_POSTER};
pub use stats::{average, best, median, summarize, worst, Summary};
pub use storage::{JsonStorage, MovieStorage, SqlStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
