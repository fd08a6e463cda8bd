// 🖨️ Text views over a catalog snapshot
// Views return records or lines; the menu decides how to print them.

use crate::error::CatalogError;
use crate::movie::{format_rating, Catalog, MovieRecord};
use rand::seq::SliceRandom;
use rand::Rng;

/// Count line followed by one line per movie, catalog order
pub fn listing(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::with_capacity(catalog.len() + 1);
    lines.push(format!("{} movies in total", catalog.len()));
    lines.extend(catalog.iter().map(format_listing_line));
    lines
}

pub fn format_listing_line(movie: &MovieRecord) -> String {
    format!(
        "{} ({}): {} {}",
        movie.title, movie.year, format_rating(movie.rating), movie.poster_url
    )
}

/// "Title: Rating - 8.8 | Year - 2010"
pub fn format_rated_line(movie: &MovieRecord) -> String {
    format!(
        "{}: Rating - {} | Year - {}",
        movie.title, format_rating(movie.rating), movie.year
    )
}

/// Bullet used under the best/worst headings of the stats screen
pub fn format_summary_line(movie: &MovieRecord) -> String {
    format!(
        "- {} ({}), {}, {}",
        movie.title, format_rating(movie.rating), movie.year, movie.poster_url
    )
}

pub fn format_pick(movie: &MovieRecord) -> String {
    format!(
        "Your movie for tonight: {}, it's rated {} from year {}, poster: {}",
        movie.title, format_rating(movie.rating), movie.year, movie.poster_url
    )
}

/// Case-insensitive substring match on the title
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a MovieRecord> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .collect()
}

/// Highest rating first; ties keep catalog order
pub fn sorted_by_rating(catalog: &Catalog) -> Vec<&MovieRecord> {
    let mut movies: Vec<&MovieRecord> = catalog.iter().collect();
    movies.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    movies
}

/// Uniform pick over all titles
pub fn pick_random<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    rng: &mut R,
) -> Result<&'a MovieRecord, CatalogError> {
    let movies: Vec<&MovieRecord> = catalog.iter().collect();
    movies
        .choose(rng)
        .copied()
        .ok_or(CatalogError::EmptyCatalog)
}
