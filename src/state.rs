use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use movie_scope::data::aggregate::NumericColumn;
use movie_scope::data::export::write_csv;
use movie_scope::data::filter::{FilterParams, View};
use movie_scope::data::loader::{load_file, LoadedDataset};
use movie_scope::data::model::MovieTable;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Central panel tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Leaderboards,
    Distributions,
    Table,
}

/// The full UI state, independent of rendering.
///
/// Filter knobs live in `params` and are handed to the engine explicitly on
/// every change; nothing else holds filter state.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is opened).
    pub dataset: Option<MovieTable>,

    /// Where `dataset` came from.
    pub source: Option<PathBuf>,

    /// Current sidebar selections.
    pub params: FilterParams,

    /// Rows passing `params` (cached).
    pub visible_indices: Vec<usize>,

    /// Genre charted on its own in the overview.
    pub focus_genre: Option<String>,

    /// Stable colour per genre.
    pub genre_colors: Option<ColorMap>,

    pub tab: Tab,

    /// Column shown in the distributions histogram.
    pub histogram_column: NumericColumn,

    /// Rows dropped while loading the current dataset.
    pub skipped_rows: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load a file and make it the current dataset. Errors land in the status line.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(loaded) => self.set_dataset(loaded, path.to_path_buf()),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, reset filters to the dashboard defaults.
    pub fn set_dataset(&mut self, loaded: LoadedDataset, source: PathBuf) {
        let LoadedDataset { table, skipped } = loaded;

        self.params = FilterParams::defaults_for(&table);
        self.focus_genre = table.genre_catalog().iter().next().cloned();
        self.genre_colors = Some(ColorMap::new(table.genre_catalog()));
        self.skipped_rows = skipped.len();
        self.status_message = (!skipped.is_empty())
            .then(|| format!("{} malformed rows were skipped", skipped.len()));
        self.dataset = Some(table);
        self.source = Some(source);
        self.refilter();
    }

    /// Recompute `visible_indices` after a filter change. An invalid range
    /// keeps the previous result and is reported in the status line.
    pub fn refilter(&mut self) {
        let Some(table) = &self.dataset else {
            return;
        };
        match self.params.apply(table) {
            Ok(view) => {
                log::debug!("Filter matched {} of {} movies", view.len(), table.len());
                self.visible_indices = view.into_rows();
                if self
                    .status_message
                    .as_deref()
                    .is_some_and(|m| m.starts_with("Invalid"))
                {
                    self.status_message = None;
                }
            }
            Err(e) => {
                log::warn!("Rejected filter parameters: {e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// One-line description of the loaded dataset for the top bar.
    pub fn summary(&self) -> Option<String> {
        let table = self.dataset.as_ref()?;
        let name = self
            .source
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "dataset".into(), |n| n.to_string_lossy());
        let mut text = format!(
            "{name}: {} movies loaded, {} rows",
            table.len(),
            self.visible_indices.len()
        );
        if self.skipped_rows > 0 {
            text.push_str(&format!(", {} skipped", self.skipped_rows));
        }
        Some(text)
    }

    /// The filtered rows as an engine view.
    pub fn visible(&self) -> Option<View<'_>> {
        self.dataset
            .as_ref()
            .map(|table| View::from_rows(table, &self.visible_indices))
    }

    /// Toggle one genre in the multi-select.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.params.genres.remove(genre) {
            self.params.genres.insert(genre.to_string());
        }
        self.refilter();
    }

    /// Select every genre of the catalog.
    pub fn select_all_genres(&mut self) {
        if let Some(table) = &self.dataset {
            self.params.genres = table.genre_catalog().clone();
            self.refilter();
        }
    }

    /// Clear the genre selection (no genre constraint).
    pub fn clear_genres(&mut self) {
        self.params.genres.clear();
        self.refilter();
    }

    /// Write the filtered rows as CSV.
    pub fn export_visible(&self, path: &Path) -> Result<usize> {
        let view = self.visible().context("no dataset loaded")?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        write_csv(&view, std::io::BufWriter::new(file)).context("writing CSV export")?;
        log::info!("Exported {} movies to {}", view.len(), path.display());
        Ok(view.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_scope::data::model::MovieRecord;

    fn loaded() -> LoadedDataset {
        let mut a = MovieRecord::new("Alpha", 2001);
        a.revenue = 10.0;
        a.genres = ["Drama".to_string()].into_iter().collect();
        let mut b = MovieRecord::new("Beta", 2012);
        b.revenue = 20.0;
        b.genres = ["Action".to_string()].into_iter().collect();
        let c = MovieRecord::new("Gamma", 1990);

        LoadedDataset {
            table: MovieTable::from_movies(vec![a, b, c]),
            skipped: Vec::new(),
        }
    }

    #[test]
    fn new_dataset_applies_defaults() {
        let mut state = AppState::default();
        state.set_dataset(loaded(), PathBuf::from("movies.csv"));

        assert_eq!(state.params.year_range, Some((2000, 2012)));
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.focus_genre.as_deref(), Some("Action"));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn genre_toggles_refilter() {
        let mut state = AppState::default();
        state.set_dataset(loaded(), PathBuf::from("movies.csv"));

        state.toggle_genre("Action");
        assert_eq!(state.visible_indices, vec![1]);
        state.toggle_genre("Drama");
        assert_eq!(state.visible_indices, vec![0, 1]);
        state.toggle_genre("Action");
        assert_eq!(state.visible_indices, vec![0]);
        state.clear_genres();
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn invalid_range_keeps_previous_rows() {
        let mut state = AppState::default();
        state.set_dataset(loaded(), PathBuf::from("movies.csv"));

        state.params.year_range = Some((2012, 2000));
        state.refilter();
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Invalid year range"));

        state.params.year_range = Some((1980, 2000));
        state.refilter();
        assert_eq!(state.visible_indices, vec![2]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn summary_names_source_and_skipped_rows() {
        let mut state = AppState::default();
        assert_eq!(state.summary(), None);

        let mut dataset = loaded();
        dataset.skipped.push(movie_scope::data::loader::RowIssue {
            row: 4,
            reason: "year: missing value".to_string(),
        });
        state.set_dataset(dataset, PathBuf::from("/data/movies.csv"));

        assert_eq!(
            state.summary().as_deref(),
            Some("movies.csv: 3 movies loaded, 2 rows, 1 skipped")
        );
        assert_eq!(state.status_message.as_deref(), Some("1 malformed rows were skipped"));
    }

    #[test]
    fn missing_file_sets_status() {
        let mut state = AppState::default();
        state.open_path(Path::new("/nonexistent/movies.csv"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.as_deref().unwrap_or("").contains("File not found"));
    }
}
