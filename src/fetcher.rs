// 🔎 Metadata Lookup - free-text title → {title, year, rating, poster}
// One blocking request, no retries. Every failure collapses into None.

use crate::config::OmdbConfig;
use crate::error::CatalogError;
use crate::movie::MovieRecord;
use serde::Deserialize;
use std::time::Duration;

/// Raw fields as the lookup service reports them
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub title: String,
    /// e.g. "2010" or "2005–2013"
    pub year: String,
    /// e.g. "8.8/10"
    pub rating: String,
    pub poster_url: String,
}

impl LookupResult {
    /// Year = leading 4 characters, rating = numerator of "X/10".
    /// The rating must be finite but is not range-checked on this path.
    pub fn into_record(self) -> Result<MovieRecord, CatalogError> {
        let year_digits: String = self.year.chars().take(4).collect();
        let year: i32 = year_digits.parse().map_err(|_| {
            CatalogError::InvalidLookupData(format!("invalid year '{}'", self.year))
        })?;

        let numerator = self.rating.split('/').next().unwrap_or_default().trim();
        let rating: f64 = numerator.parse().map_err(|_| {
            CatalogError::InvalidLookupData(format!("invalid rating '{}'", self.rating))
        })?;
        // NaN/inf cannot be stored as JSON numbers
        if !rating.is_finite() {
            return Err(CatalogError::InvalidLookupData(format!(
                "invalid rating '{}'",
                self.rating
            )));
        }

        Ok(MovieRecord {
            title: self.title,
            year,
            rating,
            poster_url: self.poster_url,
        })
    }
}

pub trait MetadataLookup {
    fn fetch(&self, title: &str) -> Option<LookupResult>;
}

// ============================================================================
// OMDB CLIENT
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbResponse {
    response: String,
    title: Option<String>,
    year: Option<String>,
    poster: Option<String>,
    #[serde(default)]
    ratings: Vec<OmdbRating>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbRating {
    #[allow(dead_code)]
    source: String,
    value: String,
}

impl OmdbResponse {
    fn into_lookup(self) -> Option<LookupResult> {
        if !self.response.eq_ignore_ascii_case("true") {
            tracing::debug!(error = ?self.error, "OMDb reported no match");
            return None;
        }

        // First rating source is IMDb ("X/10"); bare imdbRating is the fallback
        let rating = match self.ratings.into_iter().next() {
            Some(r) => r.value,
            None => format!("{}/10", self.imdb_rating.filter(|r| r != "N/A")?),
        };

        Some(LookupResult {
            title: self.title?,
            year: self.year?,
            rating,
            poster_url: self.poster.unwrap_or_else(|| crate::movie::NO_POSTER.to_string()),
        })
    }
}

pub struct OmdbClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OmdbClient {
    pub fn new(config: &OmdbConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, title: &str) -> Result<OmdbResponse, String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| format!("no API key configured (set {})", crate::config::API_KEY_ENV))?;

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", api_key), ("t", title)])
            .send()
            .map_err(|e| e.to_string())?;

        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }

        resp.json::<OmdbResponse>().map_err(|e| e.to_string())
    }
}

impl MetadataLookup for OmdbClient {
    fn fetch(&self, title: &str) -> Option<LookupResult> {
        match self.request(title) {
            Ok(body) => body.into_lookup(),
            Err(reason) => {
                tracing::warn!(title, %reason, "movie lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(year: &str, rating: &str) -> LookupResult {
        LookupResult {
            title: "Inception".to_string(),
            year: year.to_string(),
            rating: rating.to_string(),
            poster_url: "url1".to_string(),
        }
    }

    #[test]
    fn test_into_record() {
        let record = lookup("2010", "8.8/10").into_record().unwrap();
        assert_eq!(record, MovieRecord::new("Inception", 2010, 8.8, "url1"));
    }

    #[test]
    fn test_year_range_takes_first_four() {
        let record = lookup("2005–2013", "7.0/10").into_record().unwrap();
        assert_eq!(record.year, 2005);
    }

    #[test]
    fn test_malformed_fields() {
        assert!(matches!(
            lookup("N/A", "8.8/10").into_record(),
            Err(CatalogError::InvalidLookupData(_))
        ));
        assert!(matches!(
            lookup("2010", "N/A").into_record(),
            Err(CatalogError::InvalidLookupData(_))
        ));
        for rating in ["NaN/10", "inf/10", "-inf/10"] {
            assert!(matches!(
                lookup("2010", rating).into_record(),
                Err(CatalogError::InvalidLookupData(_))
            ));
        }
    }

    #[test]
    fn test_decode_omdb_payload() {
        let body = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Poster": "https://example.com/inception.jpg",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "8.8/10"},
                {"Source": "Rotten Tomatoes", "Value": "87%"}
            ],
            "imdbRating": "8.8",
            "Response": "True"
        }"#;
        let parsed: OmdbResponse = serde_json::from_str(body).unwrap();
        let result = parsed.into_lookup().unwrap();

        assert_eq!(result.title, "Inception");
        assert_eq!(result.year, "2010");
        assert_eq!(result.rating, "8.8/10");
        assert_eq!(result.poster_url, "https://example.com/inception.jpg");
    }

    #[test]
    fn test_decode_falls_back_to_imdb_rating() {
        let body = r#"{"Title": "Up", "Year": "2009", "imdbRating": "8.3", "Response": "True"}"#;
        let parsed: OmdbResponse = serde_json::from_str(body).unwrap();
        let result = parsed.into_lookup().unwrap();

        assert_eq!(result.rating, "8.3/10");
        assert_eq!(result.poster_url, "N/A");
    }

    #[test]
    fn test_decode_not_found() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let parsed: OmdbResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.into_lookup().is_none());
    }

    #[test]
    fn test_missing_api_key_is_none() {
        let client = OmdbClient::new(&OmdbConfig::default()).unwrap();
        assert!(client.fetch("Inception").is_none());
    }
}
