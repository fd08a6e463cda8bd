// 💾 Storage Adapter
// Every mutation is load whole catalog → mutate → persist whole catalog.

pub mod json;
pub mod sql;

pub use json::JsonStorage;
pub use sql::SqlStorage;

use crate::config::{StorageBackend, StorageConfig};
use crate::movie::{Catalog, MovieRecord};
use anyhow::Result;

pub trait MovieStorage {
    /// Snapshot of the full catalog
    fn list(&self) -> Result<Catalog>;

    /// Insert, or overwrite a movie with the same title
    fn add(&self, title: &str, year: i32, rating: f64, poster_url: &str) -> Result<()>;

    /// Returns false (and changes nothing) when the title is absent
    fn delete(&self, title: &str) -> Result<bool>;

    /// Changes the rating only. Returns false when the title is absent.
    fn update(&self, title: &str, rating: f64) -> Result<bool>;

    fn get(&self, title: &str) -> Result<Option<MovieRecord>> {
        Ok(self.list()?.get(title).cloned())
    }
}

/// Open the backend named by the configuration.
/// An unreadable database degrades to an empty in-memory catalog; the file is left as is.
pub fn open(config: &StorageConfig) -> Result<Box<dyn MovieStorage>> {
    let path = config.resolved_path();
    tracing::debug!(backend = ?config.backend, path = %path.display(), "opening storage");

    Ok(match config.backend {
        StorageBackend::Json => Box::new(JsonStorage::new(path)),
        StorageBackend::Sql => match SqlStorage::open(&path) {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %format!("{:#}", e),
                    "database unreadable, using an empty in-memory catalog (changes will not be saved)"
                );
                Box::new(SqlStorage::open_in_memory()?)
            }
        },
    })
}
