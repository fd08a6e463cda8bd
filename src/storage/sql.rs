// SQLite backend - one row per movie, insertion order = row id

use super::MovieStorage;
use crate::movie::{Catalog, MovieRecord};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

pub struct SqlStorage {
    conn: Connection,
}

impl SqlStorage {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database {}", db_path.display()))?;
        // Enable WAL mode for crash recovery
        conn.pragma_update(None, "journal_mode", "WAL")?;
        setup_database(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        Ok(Self { conn })
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))?;
        Ok(count)
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS movies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT UNIQUE NOT NULL,
            year INTEGER NOT NULL,
            rating REAL NOT NULL,
            poster_url TEXT NOT NULL DEFAULT 'N/A'
        )",
        [],
    )?;

    Ok(())
}

impl MovieStorage for SqlStorage {
    fn list(&self) -> Result<Catalog> {
        let mut stmt = self
            .conn
            .prepare("SELECT title, year, rating, poster_url FROM movies ORDER BY id")?;

        let movies = stmt
            .query_map([], |row| {
                Ok(MovieRecord {
                    title: row.get(0)?,
                    year: row.get(1)?,
                    rating: row.get(2)?,
                    poster_url: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(movies.into_iter().collect())
    }

    fn add(&self, title: &str, year: i32, rating: f64, poster_url: &str) -> Result<()> {
        // Upsert keeps the original row id, so an overwritten movie keeps its place
        self.conn.execute(
            "INSERT INTO movies (title, year, rating, poster_url)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(title) DO UPDATE SET
                year = excluded.year,
                rating = excluded.rating,
                poster_url = excluded.poster_url",
            params![title, year, rating, poster_url],
        )?;
        tracing::debug!(title, "movie stored");
        Ok(())
    }

    fn delete(&self, title: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM movies WHERE title = ?1", params![title])?;
        Ok(affected > 0)
    }

    fn update(&self, title: &str, rating: f64) -> Result<bool> {
        let affected = self.conn.execute(
            "UPDATE movies SET rating = ?1 WHERE title = ?2",
            params![rating, title],
        )?;
        Ok(affected > 0)
    }
}
