// 🌐 Static webpage generation
// Literal placeholder substitution into a template file. A missing
// template aborts before anything is written.

use crate::error::CatalogError;
use crate::movie::{format_rating, Catalog, MovieRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
pub const GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// One `<li>` grid cell. "N/A" posters render with an empty src.
pub fn render_movie(movie: &MovieRecord) -> String {
    let poster = if movie.has_poster() {
        escape_html(&movie.poster_url)
    } else {
        String::new()
    };
    let title = escape_html(&movie.title);

    format!(
        r#"<li>
            <div class="movie">
                <img class="movie-poster" src="{poster}" alt="Poster for {title}">
                <div class="movie-title">{title}</div>
                <div class="movie-year">{year}</div>
                <div class="movie-rating">Rating: {rating}</div>
            </div>
        </li>"#,
        poster = poster,
        title = title,
        year = movie.year,
        rating = format_rating(movie.rating),
    )
}

pub fn render(template: &str, page_title: &str, catalog: &Catalog) -> String {
    let grid = catalog
        .iter()
        .map(render_movie)
        .collect::<Vec<_>>()
        .join("\n");

    template
        .replace(TITLE_PLACEHOLDER, &escape_html(page_title))
        .replace(GRID_PLACEHOLDER, &grid)
}

/// Render the catalog into `output_path`. Returns the number of movies written.
pub fn generate(
    template_path: &Path,
    output_path: &Path,
    page_title: &str,
    catalog: &Catalog,
) -> Result<usize, CatalogError> {
    let template = fs::read_to_string(template_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::TemplateNotFound(template_path.to_path_buf()),
        _ => CatalogError::TemplateRead {
            path: template_path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let html = render(&template, page_title, catalog);
    fs::write(output_path, html).map_err(|e| CatalogError::OutputWrite {
        path: output_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::info!(output = %output_path.display(), movies = catalog.len(), "webpage generated");
    Ok(catalog.len())
}
