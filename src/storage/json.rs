// JSON file backend: { "<title>": { "rating", "year", "poster_url" } }

use super::MovieStorage;
use crate::movie::{Catalog, MovieRecord, NO_POSTER};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct StoredMovie {
    rating: f64,
    year: i32,
    // Files written before posters were tracked have no poster_url
    #[serde(default = "default_poster")]
    poster_url: String,
}

fn default_poster() -> String {
    NO_POSTER.to_string()
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files load as an empty catalog
    fn load(&self) -> Catalog {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "no catalog file, starting empty");
                return Catalog::new();
            }
        };

        match decode(&contents) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "catalog file is corrupt, treating as empty");
                Catalog::new()
            }
        }
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        let encoded = encode(catalog)?;
        fs::write(&self.path, encoded)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), movies = catalog.len(), "catalog saved");
        Ok(())
    }
}

fn decode(contents: &str) -> Result<Catalog> {
    let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(contents)?;

    raw.into_iter()
        .map(|(title, value)| {
            let stored: StoredMovie = serde_json::from_value(value)
                .with_context(|| format!("Malformed entry for '{}'", title))?;
            Ok(MovieRecord {
                title,
                year: stored.year,
                rating: stored.rating,
                poster_url: stored.poster_url,
            })
        })
        .collect()
}

fn encode(catalog: &Catalog) -> Result<Vec<u8>> {
    let mut map = serde_json::Map::new();
    for movie in catalog {
        let stored = StoredMovie {
            rating: movie.rating,
            year: movie.year,
            poster_url: movie.poster_url.clone(),
        };
        map.insert(movie.title.clone(), serde_json::to_value(stored)?);
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    map.serialize(&mut ser)?;
    Ok(buf)
}

impl MovieStorage for JsonStorage {
    fn list(&self) -> Result<Catalog> {
        Ok(self.load())
    }

    fn add(&self, title: &str, year: i32, rating: f64, poster_url: &str) -> Result<()> {
        let mut catalog = self.load();
        catalog.upsert(MovieRecord::new(title, year, rating, poster_url));
        self.save(&catalog)
    }

    fn delete(&self, title: &str) -> Result<bool> {
        let mut catalog = self.load();
        if !catalog.remove(title) {
            return Ok(false);
        }
        self.save(&catalog)?;
        Ok(true)
    }

    fn update(&self, title: &str, rating: f64) -> Result<bool> {
        let mut catalog = self.load();
        if !catalog.set_rating(title, rating) {
            return Ok(false);
        }
        self.save(&catalog)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("nope.json"));
        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();

        let storage = JsonStorage::new(&path);
        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_add_then_list() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("data.json"));

        storage.add("Inception", 2010, 8.8, "url1").unwrap();
        storage.add("Up", 2009, 8.3, "url2").unwrap();
        storage.add("Inception", 2010, 9.1, "url1").unwrap();

        let catalog = storage.list().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.titles(), vec!["Inception", "Up"]);
        assert_eq!(
            catalog.get("Inception"),
            Some(&MovieRecord::new("Inception", 2010, 9.1, "url1"))
        );
    }

    #[test]
    fn test_delete_and_update() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("data.json"));
        storage.add("Inception", 2010, 8.8, "url1").unwrap();
        storage.add("Up", 2009, 8.3, "url2").unwrap();

        assert!(storage.update("Up", 5.5).unwrap());
        assert!(!storage.update("Alien", 5.5).unwrap());
        assert_eq!(
            storage.get("Up").unwrap(),
            Some(MovieRecord::new("Up", 2009, 5.5, "url2"))
        );

        let before = storage.list().unwrap();
        assert!(!storage.delete("Alien").unwrap());
        assert_eq!(storage.list().unwrap(), before);

        assert!(storage.delete("Inception").unwrap());
        assert_eq!(storage.list().unwrap().titles(), vec!["Up"]);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("data.json"));
        let catalog: Catalog = vec![
            MovieRecord::new("Zodiac", 2007, 7.7, "z"),
            MovieRecord::new("Alien", 1979, 8.5, NO_POSTER),
            MovieRecord::new("Memento", 2000, 8.4, "m"),
        ]
        .into_iter()
        .collect();

        storage.save(&catalog).unwrap();
        assert_eq!(storage.list().unwrap(), catalog);
    }

    #[test]
    fn test_legacy_file_without_posters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{ "Up": { "rating": 8.3, "year": 2009 } }"#).unwrap();

        let storage = JsonStorage::new(&path);
        let up = storage.get("Up").unwrap().unwrap();
        assert_eq!(up.poster_url, NO_POSTER);
    }

    #[test]
    fn test_file_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let storage = JsonStorage::new(&path);
        storage.add("Up", 2009, 8.3, "url2").unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["Up"]["rating"], 8.3);
        assert_eq!(value["Up"]["year"], 2009);
        assert_eq!(value["Up"]["poster_url"], "url2");
    }
}
