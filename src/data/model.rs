use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Column names of the movie dataset (exact-match header keys).
pub mod columns {
    pub const TITLE: &str = "title";
    pub const YEAR: &str = "year";
    pub const BUDGET: &str = "budget";
    pub const REVENUE: &str = "revenue";
    pub const PROFIT_MARGIN: &str = "profit_margin";
    pub const VOTE_AVERAGE: &str = "vote_average";
    pub const VOTE_COUNT: &str = "vote_count";
    pub const POPULARITY: &str = "popularity";
    pub const ORIGINAL_LANGUAGE: &str = "original_language";
    pub const GENRES: &str = "genres";
    /// Name used for the genre column by the cleaned source dataset.
    pub const GENRES_ALIAS: &str = "genres_list";
    pub const PRODUCTION_COMPANIES: &str = "production_companies";
    pub const PRODUCTION_COUNTRIES: &str = "production_countries";

    /// Columns every input must carry. `genres` may appear as `genres_list`.
    pub const REQUIRED: &[&str] = &[
        TITLE,
        YEAR,
        BUDGET,
        REVENUE,
        GENRES,
        VOTE_AVERAGE,
        VOTE_COUNT,
        POPULARITY,
        ORIGINAL_LANGUAGE,
        PRODUCTION_COMPANIES,
        PRODUCTION_COUNTRIES,
    ];

    /// Export column order.
    pub const ALL: &[&str] = &[
        TITLE,
        YEAR,
        BUDGET,
        REVENUE,
        PROFIT_MARGIN,
        VOTE_AVERAGE,
        VOTE_COUNT,
        POPULARITY,
        ORIGINAL_LANGUAGE,
        GENRES,
        PRODUCTION_COMPANIES,
        PRODUCTION_COUNTRIES,
    ];
}

/// Sorted, deduplicated genre names of one movie.
pub type GenreSet = BTreeSet<String>;

// ---------------------------------------------------------------------------
// MovieRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single film after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Missing titles are kept; title search simply never matches them.
    pub title: Option<String>,
    pub year: i32,
    /// Non-negative, currency units.
    pub budget: f64,
    /// Non-negative; zero is a valid value, not "missing".
    pub revenue: f64,
    pub profit_margin: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    pub original_language: Option<String>,
    pub genres: GenreSet,
    pub production_companies: Vec<String>,
    pub production_countries: Vec<String>,
}

impl MovieRecord {
    /// Minimal record, mostly useful for building fixtures.
    pub fn new(title: &str, year: i32) -> Self {
        MovieRecord {
            title: Some(title.to_string()),
            year,
            budget: 0.0,
            revenue: 0.0,
            profit_margin: None,
            vote_average: None,
            vote_count: None,
            popularity: None,
            original_language: None,
            genres: GenreSet::new(),
            production_companies: Vec::new(),
            production_countries: Vec::new(),
        }
    }

    /// Title for display, with a placeholder when missing.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("<untitled>")
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.contains(genre)
    }
}

/// `(revenue - budget) / revenue`, undefined for zero revenue.
pub fn derive_profit_margin(budget: f64, revenue: f64) -> Option<f64> {
    (revenue > 0.0).then(|| (revenue - budget) / revenue)
}

// ---------------------------------------------------------------------------
// MovieTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset with derived indices. Immutable after construction,
/// so the genre catalog can never go stale.
#[derive(Debug, Clone, Default)]
pub struct MovieTable {
    movies: Vec<MovieRecord>,
    genre_catalog: BTreeSet<String>,
}

impl MovieTable {
    /// Build the table and its genre catalog.
    pub fn from_movies(movies: Vec<MovieRecord>) -> Self {
        let genre_catalog = movies
            .iter()
            .flat_map(|m| m.genres.iter().cloned())
            .collect();
        MovieTable {
            movies,
            genre_catalog,
        }
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Sorted set of every distinct genre in the dataset.
    pub fn genre_catalog(&self) -> &BTreeSet<String> {
        &self.genre_catalog
    }

    /// `(min, max)` release year, `None` for an empty table.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.movies.iter().map(|m| m.year).min()?;
        let max = self.movies.iter().map(|m| m.year).max()?;
        Some((min, max))
    }

    /// Largest revenue in the table (0 when empty).
    pub fn max_revenue(&self) -> f64 {
        self.movies.iter().map(|m| m.revenue).fold(0.0, f64::max)
    }

    /// Number of movies.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, year: i32, genres: &[&str]) -> MovieRecord {
        MovieRecord {
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..MovieRecord::new(title, year)
        }
    }

    #[test]
    fn catalog_is_sorted_and_distinct() {
        let table = MovieTable::from_movies(vec![
            movie("A", 2001, &["Drama", "Action"]),
            movie("B", 1999, &["Action"]),
            movie("C", 2010, &[]),
        ]);
        let catalog: Vec<&str> = table.genre_catalog().iter().map(String::as_str).collect();
        assert_eq!(catalog, vec!["Action", "Drama"]);
        assert_eq!(table.year_bounds(), Some((1999, 2010)));
    }

    #[test]
    fn empty_table_has_no_bounds() {
        let table = MovieTable::default();
        assert!(table.is_empty());
        assert_eq!(table.year_bounds(), None);
        assert_eq!(table.max_revenue(), 0.0);
        assert!(table.genre_catalog().is_empty());
    }

    #[test]
    fn profit_margin_requires_revenue() {
        assert_eq!(derive_profit_margin(50.0, 200.0), Some(0.75));
        assert_eq!(derive_profit_margin(50.0, 0.0), None);
    }
}
