// ⚠️ Catalog Errors - what the user gets told
// Plumbing failures (I/O, SQLite) travel as anyhow::Error; these are the
// outcomes a menu handler reports and then returns to the loop.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Movie name cannot be empty.")]
    EmptyTitle,

    #[error("Please enter a valid number for the rating (got '{0}')")]
    InvalidRating(String),

    #[error("Rating must be between 0 and 10 (got {0})")]
    RatingOutOfRange(f64),

    #[error("Movie {0} not found")]
    MovieNotFound(String),

    #[error("Movie {0} not found on OMDB.")]
    LookupFailed(String),

    #[error("Invalid data format - {0}")]
    InvalidLookupData(String),

    #[error("The catalog is empty")]
    EmptyCatalog,

    #[error("{} not found.", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("Could not read template {}: {reason}", .path.display())]
    TemplateRead { path: PathBuf, reason: String },

    #[error("Could not write {}: {reason}", .path.display())]
    OutputWrite { path: PathBuf, reason: String },
}
