use std::collections::{BTreeMap, HashMap};

use super::filter::View;
use super::model::MovieRecord;

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Numeric columns that can be aggregated or ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumericColumn {
    Budget,
    #[default]
    Revenue,
    ProfitMargin,
    VoteAverage,
    VoteCount,
    Popularity,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 6] = [
        NumericColumn::Budget,
        NumericColumn::Revenue,
        NumericColumn::ProfitMargin,
        NumericColumn::VoteAverage,
        NumericColumn::VoteCount,
        NumericColumn::Popularity,
    ];

    /// The movie's value, `None` when missing.
    pub fn value(self, movie: &MovieRecord) -> Option<f64> {
        match self {
            NumericColumn::Budget => Some(movie.budget),
            NumericColumn::Revenue => Some(movie.revenue),
            NumericColumn::ProfitMargin => movie.profit_margin,
            NumericColumn::VoteAverage => movie.vote_average,
            NumericColumn::VoteCount => movie.vote_count.map(|v| v as f64),
            NumericColumn::Popularity => movie.popularity,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NumericColumn::Budget => "Budget",
            NumericColumn::Revenue => "Revenue",
            NumericColumn::ProfitMargin => "Profit margin",
            NumericColumn::VoteAverage => "Vote average",
            NumericColumn::VoteCount => "Vote count",
            NumericColumn::Popularity => "Popularity",
        }
    }
}

/// Categorical columns a movie can be grouped by. Genres, companies and
/// countries hold several values per movie; language holds at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryColumn {
    Genres,
    ProductionCompanies,
    ProductionCountries,
    OriginalLanguage,
}

impl CategoryColumn {
    pub fn values(self, movie: &MovieRecord) -> Vec<&str> {
        match self {
            CategoryColumn::Genres => movie.genres.iter().map(String::as_str).collect(),
            CategoryColumn::ProductionCompanies => {
                movie.production_companies.iter().map(String::as_str).collect()
            }
            CategoryColumn::ProductionCountries => {
                movie.production_countries.iter().map(String::as_str).collect()
            }
            CategoryColumn::OriginalLanguage => {
                movie.original_language.as_deref().into_iter().collect()
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryColumn::Genres => "Genres",
            CategoryColumn::ProductionCompanies => "Production companies",
            CategoryColumn::ProductionCountries => "Production countries",
            CategoryColumn::OriginalLanguage => "Languages",
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregator {
    Mean,
    Sum,
    /// Number of present (non-missing) values.
    Count,
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    /// `None` for a group that received no values.
    fn finish(self, aggregator: Aggregator) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(match aggregator {
            Aggregator::Mean => self.sum / self.count as f64,
            Aggregator::Sum => self.sum,
            Aggregator::Count => self.count as f64,
        })
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Aggregate `column` per release year, ascending by year.
///
/// Years without a value to aggregate are omitted, never zero-filled.
pub fn group_by_year(
    view: &View<'_>,
    column: NumericColumn,
    aggregator: Aggregator,
) -> BTreeMap<i32, f64> {
    let mut groups: BTreeMap<i32, Accumulator> = BTreeMap::new();
    for movie in view.iter() {
        groups.entry(movie.year).or_default().push(column.value(movie));
    }
    groups
        .into_iter()
        .filter_map(|(year, acc)| acc.finish(aggregator).map(|v| (year, v)))
        .collect()
}

/// Number of movies per release year.
pub fn movies_per_year(view: &View<'_>) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for movie in view.iter() {
        *counts.entry(movie.year).or_insert(0) += 1;
    }
    counts
}

/// Aggregate `column` per category value. A movie with several values
/// contributes to each of them. Ordered by first occurrence.
pub fn group_by_category(
    view: &View<'_>,
    key: CategoryColumn,
    column: NumericColumn,
    aggregator: Aggregator,
) -> Vec<(String, f64)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Accumulator> = HashMap::new();

    for movie in view.iter() {
        let value = column.value(movie);
        for label in key.values(movie) {
            let acc = groups.entry(label.to_string()).or_insert_with(|| {
                order.push(label.to_string());
                Accumulator::default()
            });
            acc.push(value);
        }
    }

    order
        .into_iter()
        .filter_map(|label| {
            let value = groups.get(&label)?.finish(aggregator)?;
            Some((label, value))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// Occurrence counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueCounts {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl ValueCounts {
    pub fn add(&mut self, value: &str) {
        match self.index.get(value) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(value.to_string(), self.entries.len());
                self.entries.push((value.to_string(), 1));
            }
        }
    }

    pub fn get(&self, value: &str) -> usize {
        self.index.get(value).map_or(0, |&i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries.iter().map(|(v, c)| (v.as_str(), *c))
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Leaderboard of the `n` most (or least) frequent values.
    pub fn top_n(&self, n: usize, ascending: bool) -> Vec<(String, f64)> {
        rank(
            self.entries.iter().map(|(v, c)| (v.clone(), *c as f64)).collect(),
            n,
            ascending,
        )
    }
}

/// Count every individual value of a multi-valued column: a movie made in
/// three countries adds one to each of them. Empty fields add nothing.
pub fn explode_multi_valued(view: &View<'_>, column: CategoryColumn) -> ValueCounts {
    let mut counts = ValueCounts::default();
    for movie in view.iter() {
        for value in column.values(movie) {
            counts.add(value);
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Keep the first `n` entries after a stable sort by value, so ties stay in
/// input order.
fn rank(mut entries: Vec<(String, f64)>, n: usize, ascending: bool) -> Vec<(String, f64)> {
    if ascending {
        entries.sort_by(|a, b| a.1.total_cmp(&b.1));
    } else {
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    }
    entries.truncate(n);
    entries
}

/// Top `n` movies of the view by `column`, labelled by title. Movies missing
/// the value are left out.
pub fn top_n(
    view: &View<'_>,
    column: NumericColumn,
    n: usize,
    ascending: bool,
) -> Vec<(String, f64)> {
    let entries = view
        .iter()
        .filter_map(|m| column.value(m).map(|v| (m.display_title().to_string(), v)))
        .collect();
    rank(entries, n, ascending)
}

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram between the column's min and max. Every bin is
/// half-open except the last, which also holds the maximum.
pub fn histogram(view: &View<'_>, column: NumericColumn, bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = view.iter().filter_map(|m| column.value(m)).collect();
    if bins == 0 || values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max - min <= f64::EPSILON * max.abs().max(1.0) {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in values {
        let i = (((v - min) / width) as usize).min(bins - 1);
        out[i].count += 1;
    }
    out
}

/// `[x, y]` pairs for movies that have both values.
pub fn scatter_points(view: &View<'_>, x: NumericColumn, y: NumericColumn) -> Vec<[f64; 2]> {
    view.iter()
        .filter_map(|m| Some([x.value(m)?, y.value(m)?]))
        .collect()
}
