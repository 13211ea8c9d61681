use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{MovieRecord, MovieTable};
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// View – an immutable row subset of a table
// ---------------------------------------------------------------------------

/// A filtered subset of a [`MovieTable`], kept as ascending row indices.
///
/// Views never copy or mutate movies; every filter returns a new view.
#[derive(Debug, Clone)]
pub struct View<'a> {
    table: &'a MovieTable,
    rows: Vec<usize>,
}

impl<'a> View<'a> {
    /// All rows of the table.
    pub fn all(table: &'a MovieTable) -> Self {
        View {
            table,
            rows: (0..table.len()).collect(),
        }
    }

    /// Rebuild a view from previously computed row indices.
    /// Out-of-range indices are dropped; order and duplicates are normalized.
    pub fn from_rows(table: &'a MovieTable, rows: &[usize]) -> Self {
        let rows: BTreeSet<usize> = rows.iter().copied().filter(|&i| i < table.len()).collect();
        View {
            table,
            rows: rows.into_iter().collect(),
        }
    }

    pub fn table(&self) -> &'a MovieTable {
        self.table
    }

    /// Row indices into the base table, ascending.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<usize> {
        self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a MovieRecord> + '_ {
        let movies = self.table.movies();
        self.rows.iter().map(move |&i| &movies[i])
    }

    /// Keep the rows matching `predicate`.
    pub fn retain<F>(&self, predicate: F) -> View<'a>
    where
        F: Fn(&MovieRecord) -> bool,
    {
        let movies = self.table.movies();
        View {
            table: self.table,
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|&i| predicate(&movies[i]))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl MovieTable {
    /// Unfiltered view over the whole table.
    pub fn view(&self) -> View<'_> {
        View::all(self)
    }
}

// ---------------------------------------------------------------------------
// Filter predicates
// ---------------------------------------------------------------------------

/// A single row predicate. Construct ranges with [`Filter::year_range`] and
/// [`Filter::revenue_range`] so bounds are validated up front.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `min <= year <= max`
    YearRange { min: i32, max: i32 },
    /// `min <= revenue <= max`
    RevenueRange { min: f64, max: f64 },
    /// The movie has this genre.
    Genre(String),
    /// The movie has at least one of these genres.
    AnyGenre(BTreeSet<String>),
    /// Case-insensitive title substring; holds the lowercased needle.
    TitleContains(String),
}

impl Filter {
    pub fn year_range(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(DatasetError::invalid_range("year", min, max));
        }
        Ok(Filter::YearRange { min, max })
    }

    pub fn revenue_range(min: f64, max: f64) -> Result<Self> {
        // `!(min <= max)` also rejects NaN bounds.
        if !(min <= max) {
            return Err(DatasetError::invalid_range("revenue", min, max));
        }
        Ok(Filter::RevenueRange { min, max })
    }

    pub fn genre(genre: &str) -> Self {
        Filter::Genre(genre.to_string())
    }

    pub fn any_genre<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::AnyGenre(genres.into_iter().map(Into::into).collect())
    }

    pub fn title_contains(query: &str) -> Self {
        Filter::TitleContains(query.to_lowercase())
    }

    pub fn matches(&self, movie: &MovieRecord) -> bool {
        match self {
            Filter::YearRange { min, max } => (*min..=*max).contains(&movie.year),
            Filter::RevenueRange { min, max } => *min <= movie.revenue && movie.revenue <= *max,
            Filter::Genre(genre) => movie.has_genre(genre),
            Filter::AnyGenre(genres) => movie.genres.iter().any(|g| genres.contains(g)),
            Filter::TitleContains(needle) => movie
                .title
                .as_ref()
                .is_some_and(|t| t.to_lowercase().contains(needle.as_str())),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter operations
// ---------------------------------------------------------------------------

/// Rows with `min_year <= year <= max_year`.
pub fn filter_by_year_range<'a>(view: &View<'a>, min_year: i32, max_year: i32) -> Result<View<'a>> {
    let filter = Filter::year_range(min_year, max_year)?;
    Ok(view.retain(|m| filter.matches(m)))
}

/// Rows with `min_revenue <= revenue <= max_revenue`.
pub fn filter_by_revenue_range<'a>(
    view: &View<'a>,
    min_revenue: f64,
    max_revenue: f64,
) -> Result<View<'a>> {
    let filter = Filter::revenue_range(min_revenue, max_revenue)?;
    Ok(view.retain(|m| filter.matches(m)))
}

pub fn filter_by_genre<'a>(view: &View<'a>, genre: &str) -> View<'a> {
    let filter = Filter::genre(genre);
    view.retain(|m| filter.matches(m))
}

/// Union semantics: a movie matches when it has *any* of the genres.
/// An empty selection matches nothing.
pub fn filter_by_any_genre<'a>(view: &View<'a>, genres: &BTreeSet<String>) -> View<'a> {
    view.retain(|m| m.genres.iter().any(|g| genres.contains(g)))
}

/// Case-insensitive substring match; movies without a title never match.
pub fn search_by_title<'a>(view: &View<'a>, query: &str) -> View<'a> {
    let filter = Filter::title_contains(query);
    view.retain(|m| filter.matches(m))
}

/// Intersection of all filters (AND). Order does not matter.
pub fn compose_filters<'a>(view: &View<'a>, filters: &[Filter]) -> View<'a> {
    view.retain(|m| filters.iter().all(|f| f.matches(m)))
}

// ---------------------------------------------------------------------------
// FilterParams – explicit per-session filter configuration
// ---------------------------------------------------------------------------

/// Year range preselected by the dashboard.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (2000, 2015);
/// Revenue range preselected by the dashboard.
pub const DEFAULT_REVENUE_RANGE: (f64, f64) = (0.0, 100_000_000.0);

/// Every filter knob the presentation layer can set. `None` / empty means the
/// corresponding filter is inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    pub year_range: Option<(i32, i32)>,
    pub revenue_range: Option<(f64, f64)>,
    /// Selected genres, combined with OR.
    pub genres: BTreeSet<String>,
    pub title_query: String,
}

impl FilterParams {
    /// Dashboard defaults clamped to what the table actually contains.
    pub fn defaults_for(table: &MovieTable) -> Self {
        let year_range = table.year_bounds().map(|(lo, hi)| {
            let (min, max) = (
                DEFAULT_YEAR_RANGE.0.clamp(lo, hi),
                DEFAULT_YEAR_RANGE.1.clamp(lo, hi),
            );
            if min < max {
                (min, max)
            } else {
                (lo, hi)
            }
        });

        let max_revenue = table.max_revenue();
        let revenue_range = Some((
            DEFAULT_REVENUE_RANGE.0,
            DEFAULT_REVENUE_RANGE.1.min(max_revenue),
        ));

        FilterParams {
            year_range,
            revenue_range,
            genres: BTreeSet::new(),
            title_query: String::new(),
        }
    }

    /// Translate the active knobs into validated predicates.
    pub fn to_filters(&self) -> Result<Vec<Filter>> {
        let mut filters = Vec::new();
        if let Some((min, max)) = self.year_range {
            filters.push(Filter::year_range(min, max)?);
        }
        if let Some((min, max)) = self.revenue_range {
            filters.push(Filter::revenue_range(min, max)?);
        }
        if !self.genres.is_empty() {
            filters.push(Filter::any_genre(self.genres.iter().cloned()));
        }
        let query = self.title_query.trim();
        if !query.is_empty() {
            filters.push(Filter::title_contains(query));
        }
        Ok(filters)
    }

    pub fn apply<'a>(&self, table: &'a MovieTable) -> Result<View<'a>> {
        let filters = self.to_filters()?;
        Ok(compose_filters(&table.view(), &filters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: Option<&str>, year: i32, revenue: f64, genres: &[&str]) -> MovieRecord {
        let mut m = MovieRecord::new("", year);
        m.title = title.map(str::to_string);
        m.revenue = revenue;
        m.genres = genres.iter().map(|g| g.to_string()).collect();
        m
    }

    fn scenario_table() -> MovieTable {
        MovieTable::from_movies(vec![
            movie(Some("A"), 2000, 10.0, &["Action"]),
            movie(Some("B"), 2000, 20.0, &["Drama"]),
            movie(Some("C"), 2005, 30.0, &["Action", "Drama"]),
        ])
    }

    fn mixed_table() -> MovieTable {
        MovieTable::from_movies(vec![
            movie(Some("Alpha"), 1998, 0.0, &["Comedy"]),
            movie(Some("Drama Queen"), 2000, 5.0e6, &["Drama"]),
            movie(None, 2000, 7.0e6, &["Drama", "Action"]),
            movie(Some("Zeta"), 2003, 0.0, &[]),
            movie(Some("omega"), 2003, 1.2e8, &["Action"]),
            movie(Some("Beta"), 2010, 9.0e7, &["Horror", "Comedy"]),
        ])
    }

    fn titles(view: &View<'_>) -> Vec<String> {
        view.iter().map(|m| m.display_title().to_string()).collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn any_genre_scenario() {
        let table = scenario_table();
        let view = filter_by_any_genre(&table.view(), &set(&["Action"]));
        assert_eq!(titles(&view), vec!["A", "C"]);
    }

    #[test]
    fn year_range_is_closed() {
        let table = mixed_table();
        let view = filter_by_year_range(&table.view(), 2000, 2000).unwrap();
        assert_eq!(view.rows(), &[1, 2]);
        assert!(view.iter().all(|m| m.year == 2000));

        let view = filter_by_year_range(&table.view(), 1998, 2003).unwrap();
        assert_eq!(view.len(), 5);
    }

    #[test]
    fn zero_revenue_range() {
        let table = mixed_table();
        let view = filter_by_revenue_range(&table.view(), 0.0, 0.0).unwrap();
        assert_eq!(titles(&view), vec!["Alpha", "Zeta"]);

        let scenario = scenario_table();
        let empty = filter_by_revenue_range(&scenario.view(), 0.0, 0.0).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let table = mixed_table();
        let err = filter_by_year_range(&table.view(), 2010, 2000).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRange { field: "year", .. }));

        let err = filter_by_revenue_range(&table.view(), 10.0, 1.0).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRange { field: "revenue", .. }));

        assert!(Filter::revenue_range(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn range_filters_commute() {
        let table = mixed_table();
        let base = table.view();
        let year_ranges = [(1990, 2020), (2000, 2003), (2003, 2003), (2011, 2020)];
        let revenue_ranges = [(0.0, 0.0), (0.0, 1.0e7), (5.0e6, 1.2e8), (1.0e9, 2.0e9)];

        for &(ylo, yhi) in &year_ranges {
            for &(rlo, rhi) in &revenue_ranges {
                let year_first = filter_by_year_range(&base, ylo, yhi).unwrap();
                let year_first = filter_by_revenue_range(&year_first, rlo, rhi).unwrap();

                let revenue_first = filter_by_revenue_range(&base, rlo, rhi).unwrap();
                let revenue_first = filter_by_year_range(&revenue_first, ylo, yhi).unwrap();

                assert_eq!(year_first.rows(), revenue_first.rows());
            }
        }
    }

    #[test]
    fn any_genre_is_union_of_single_genres() {
        let table = mixed_table();
        let base = table.view();
        let selected = set(&["Action", "Comedy"]);

        let any = filter_by_any_genre(&base, &selected);
        let action = filter_by_genre(&base, "Action");
        let comedy = filter_by_genre(&base, "Comedy");

        let union: BTreeSet<usize> = action.rows().iter().chain(comedy.rows()).copied().collect();
        let any_rows: BTreeSet<usize> = any.rows().iter().copied().collect();
        assert_eq!(any_rows, union);
        assert!(any.iter().all(|m| m.has_genre("Action") || m.has_genre("Comedy")));
    }

    #[test]
    fn empty_genre_selection_matches_nothing() {
        let table = mixed_table();
        assert!(filter_by_any_genre(&table.view(), &BTreeSet::new()).is_empty());
        assert!(filter_by_genre(&table.view(), "Western").is_empty());
    }

    #[test]
    fn title_search_is_case_insensitive_and_skips_missing_titles() {
        let table = scenario_table();
        let view = search_by_title(&table.view(), "a");
        assert_eq!(titles(&view), vec!["A"]);

        let table = mixed_table();
        let view = search_by_title(&table.view(), "A");
        assert_eq!(titles(&view), vec!["Alpha", "Drama Queen", "Zeta", "omega", "Beta"]);

        let view = search_by_title(&table.view(), "");
        assert_eq!(view.len(), 5);
    }

    #[test]
    fn composition_is_conjunctive() {
        let table = mixed_table();
        let filters = vec![
            Filter::year_range(2000, 2010).unwrap(),
            Filter::revenue_range(1.0, 1.0e8).unwrap(),
            Filter::any_genre(["Drama", "Horror"]),
        ];
        let view = compose_filters(&table.view(), &filters);
        assert_eq!(view.rows(), &[1, 2, 5]);

        let reversed: Vec<Filter> = filters.iter().rev().cloned().collect();
        assert_eq!(compose_filters(&table.view(), &reversed).rows(), view.rows());
    }

    #[test]
    fn filtering_leaves_table_untouched() {
        let table = mixed_table();
        let before = table.movies().to_vec();
        let _ = filter_by_year_range(&table.view(), 2000, 2000).unwrap();
        let _ = search_by_title(&table.view(), "zeta");
        assert_eq!(table.movies(), before.as_slice());
    }

    #[test]
    fn params_defaults_are_clamped() {
        let table = mixed_table();
        let params = FilterParams::defaults_for(&table);
        assert_eq!(params.year_range, Some((2000, 2010)));
        assert_eq!(params.revenue_range, Some((0.0, 1.0e8)));

        let old = MovieTable::from_movies(vec![movie(Some("Old"), 1950, 1.0, &[])]);
        let params = FilterParams::defaults_for(&old);
        assert_eq!(params.year_range, Some((1950, 1950)));
        assert_eq!(params.apply(&old).unwrap().len(), 1);
    }

    #[test]
    fn params_apply_all_knobs() {
        let table = mixed_table();
        let params = FilterParams {
            year_range: Some((1990, 2020)),
            revenue_range: None,
            genres: set(&["Drama"]),
            title_query: "  queen ".into(),
        };
        assert_eq!(params.apply(&table).unwrap().rows(), &[1]);

        let params = FilterParams {
            year_range: Some((2020, 1990)),
            ..FilterParams::default()
        };
        assert!(params.apply(&table).is_err());

        assert_eq!(FilterParams::default().apply(&table).unwrap().len(), table.len());
    }

    #[test]
    fn view_from_rows_normalizes_indices() {
        let table = mixed_table();
        let view = View::from_rows(&table, &[4, 1, 1, 99]);
        assert_eq!(view.rows(), &[1, 4]);
    }
}
