// 📊 Statistics Engine - pure functions over a catalog snapshot
// Empty input is an explicit EmptyCatalog error, never a NaN or a panic.

use crate::error::CatalogError;
use crate::movie::{Catalog, MovieRecord};

pub fn average(ratings: &[f64]) -> Result<f64, CatalogError> {
    if ratings.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }
    Ok(ratings.iter().sum::<f64>() / ratings.len() as f64)
}

pub fn median(ratings: &[f64]) -> Result<f64, CatalogError> {
    if ratings.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    let mut sorted = ratings.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// All movies sharing the top rating, in catalog order
pub fn best(catalog: &Catalog) -> Result<Vec<&MovieRecord>, CatalogError> {
    let max = catalog
        .iter()
        .map(|m| m.rating)
        .max_by(|a, b| a.total_cmp(b))
        .ok_or(CatalogError::EmptyCatalog)?;

    Ok(catalog.iter().filter(|m| m.rating == max).collect())
}

/// All movies sharing the bottom rating, in catalog order
pub fn worst(catalog: &Catalog) -> Result<Vec<&MovieRecord>, CatalogError> {
    let min = catalog
        .iter()
        .map(|m| m.rating)
        .min_by(|a, b| a.total_cmp(b))
        .ok_or(CatalogError::EmptyCatalog)?;

    Ok(catalog.iter().filter(|m| m.rating == min).collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary<'a> {
    pub average: f64,
    pub median: f64,
    pub best: Vec<&'a MovieRecord>,
    pub worst: Vec<&'a MovieRecord>,
}

pub fn summarize(catalog: &Catalog) -> Result<Summary<'_>, CatalogError> {
    let ratings = catalog.ratings();
    Ok(Summary {
        average: average(&ratings)?,
        median: median(&ratings)?,
        best: best(catalog)?,
        worst: worst(catalog)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sample() -> Catalog {
        vec![
            MovieRecord::new("Inception", 2010, 8.8, "url1"),
            MovieRecord::new("Up", 2009, 8.3, "url2"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_summary_scenario() {
        let catalog = sample();
        let summary = summarize(&catalog).unwrap();

        assert!(approx(summary.average, 8.55));
        assert!(approx(summary.median, 8.55));
        assert_eq!(summary.best.len(), 1);
        assert_eq!(summary.best[0].title, "Inception");
        assert_eq!(summary.worst.len(), 1);
        assert_eq!(summary.worst[0].title, "Up");
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
        assert_eq!(median(&[7.0]).unwrap(), 7.0);
    }

    #[test]
    fn test_median_ignores_input_order() {
        let ratings = [6.1, 9.0, 2.5, 7.7, 5.0, 8.8];
        let expected = median(&ratings).unwrap();

        let mut reversed = ratings;
        reversed.reverse();
        let mut rotated = ratings;
        rotated.rotate_left(2);

        assert_eq!(median(&reversed).unwrap(), expected);
        assert_eq!(median(&rotated).unwrap(), expected);
    }

    #[test]
    fn test_ties_kept_in_catalog_order() {
        let catalog: Catalog = vec![
            MovieRecord::new("B", 2000, 9.0, "b"),
            MovieRecord::new("A", 2001, 5.0, "a"),
            MovieRecord::new("C", 2002, 9.0, "c"),
            MovieRecord::new("D", 2003, 5.0, "d"),
        ]
        .into_iter()
        .collect();

        let best_titles: Vec<&str> = best(&catalog).unwrap().iter().map(|m| m.title.as_str()).collect();
        let worst_titles: Vec<&str> = worst(&catalog).unwrap().iter().map(|m| m.title.as_str()).collect();

        assert_eq!(best_titles, vec!["B", "C"]);
        assert_eq!(worst_titles, vec!["A", "D"]);
    }

    #[test]
    fn test_best_worst_match_extremes() {
        let catalog: Catalog = vec![
            MovieRecord::new("X", 2000, 3.3, "x"),
            MovieRecord::new("Y", 2000, 7.1, "y"),
            MovieRecord::new("Z", 2000, 4.4, "z"),
        ]
        .into_iter()
        .collect();

        assert!(best(&catalog).unwrap().iter().all(|m| m.rating == 7.1));
        assert!(worst(&catalog).unwrap().iter().all(|m| m.rating == 3.3));
    }

    #[test]
    fn test_empty_catalog_guarded() {
        let empty = Catalog::new();
        assert_eq!(average(&[]), Err(CatalogError::EmptyCatalog));
        assert_eq!(median(&[]), Err(CatalogError::EmptyCatalog));
        assert_eq!(best(&empty), Err(CatalogError::EmptyCatalog));
        assert_eq!(worst(&empty), Err(CatalogError::EmptyCatalog));
        assert!(summarize(&empty).is_err());
    }
}
