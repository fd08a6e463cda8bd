// 🎬 Movie Records + Catalog Snapshot
// A catalog is the whole collection, keyed by title, in insertion order.
// Storage backends hand out snapshots; nothing else owns the data.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Poster value used when the lookup service has no poster
pub const NO_POSTER: &str = "N/A";

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

// ============================================================================
// MOVIE RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Identity key - unique within the catalog
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub poster_url: String,
}

impl MovieRecord {
    pub fn new(title: &str, year: i32, rating: f64, poster_url: &str) -> Self {
        Self {
            title: title.to_string(),
            year,
            rating,
            poster_url: poster_url.to_string(),
        }
    }

    pub fn has_poster(&self) -> bool {
        !self.poster_url.is_empty() && self.poster_url != NO_POSTER
    }
}

/// Whole ratings keep one decimal ("8.0"), others print as-is ("8.55")
pub fn format_rating(rating: f64) -> String {
    format!("{:?}", rating)
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieRecord> {
        self.movies.iter()
    }

    pub fn get(&self, title: &str) -> Option<&MovieRecord> {
        self.movies.iter().find(|m| m.title == title)
    }

    /// Insert or overwrite by title. An overwritten record keeps its position.
    pub fn upsert(&mut self, record: MovieRecord) {
        match self.movies.iter_mut().find(|m| m.title == record.title) {
            Some(existing) => *existing = record,
            None => self.movies.push(record),
        }
    }

    /// Returns false when the title is absent
    pub fn remove(&mut self, title: &str) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.title != title);
        self.movies.len() != before
    }

    /// Changes only the rating. Returns false when the title is absent.
    pub fn set_rating(&mut self, title: &str, rating: f64) -> bool {
        match self.movies.iter_mut().find(|m| m.title == title) {
            Some(movie) => {
                movie.rating = rating;
                true
            }
            None => false,
        }
    }

    pub fn titles(&self) -> Vec<&str> {
        self.movies.iter().map(|m| m.title.as_str()).collect()
    }

    pub fn ratings(&self) -> Vec<f64> {
        self.movies.iter().map(|m| m.rating).collect()
    }
}

impl FromIterator<MovieRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = MovieRecord>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for record in iter {
            catalog.upsert(record);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MovieRecord;
    type IntoIter = std::slice::Iter<'a, MovieRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

// ============================================================================
// INPUT VALIDATION
// ============================================================================

/// Trim a user-entered title, rejecting blanks
pub fn validate_title(input: &str) -> Result<String, CatalogError> {
    let title = input.trim();
    if title.is_empty() {
        return Err(CatalogError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Parse a user-entered rating and check it lies in [0, 10]
pub fn parse_rating(input: &str) -> Result<f64, CatalogError> {
    let trimmed = input.trim();
    let rating: f64 = trimmed
        .parse()
        .map_err(|_| CatalogError::InvalidRating(trimmed.to_string()))?;

    if rating.is_nan() {
        return Err(CatalogError::InvalidRating(trimmed.to_string()));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CatalogError::RatingOutOfRange(rating));
    }

    Ok(rating)
}
