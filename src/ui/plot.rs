use eframe::egui::{self, Color32, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use movie_scope::data::aggregate::{
    explode_multi_valued, group_by_year, histogram, movies_per_year, scatter_points, top_n,
    Aggregator, CategoryColumn, NumericColumn,
};
use movie_scope::data::filter::{filter_by_genre, View};

use crate::state::AppState;

const LEADERBOARD_SIZE: usize = 10;
const HISTOGRAM_BINS: usize = 30;
const GENRE_TABLE_HEIGHT: f32 = 180.0;

fn placeholder(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a movie dataset to start  (File → Open…)");
    });
}

fn row_count_label(ui: &mut Ui, view: &View<'_>) {
    ui.heading(format!("{} rows", view.len()));
}

// ---------------------------------------------------------------------------
// Overview tab
// ---------------------------------------------------------------------------

/// Movies per year for the focus genre, then yearly mean revenue and
/// mean profit margin over the filtered rows.
pub fn overview(ui: &mut Ui, state: &AppState) {
    let Some(view) = state.visible() else {
        placeholder(ui);
        return;
    };
    row_count_label(ui, &view);

    if let Some(genre) = &state.focus_genre {
        let full = view.table().view();
        let per_genre = filter_by_genre(&full, genre);
        let color = state
            .genre_colors
            .as_ref()
            .map_or(Color32::from_rgb(128, 0, 128), |c| c.color_for(genre));

        ui.strong(format!("Movies per year – {genre} ({} movies)", per_genre.len()));
        let bars: Vec<Bar> = movies_per_year(&per_genre)
            .into_iter()
            .map(|(year, n)| Bar::new(year as f64, n as f64).width(0.8))
            .collect();

        Plot::new("movies_per_year")
            .height(220.0)
            .x_axis_label("Year")
            .y_axis_label("Movies")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(genre).color(color));
            });

        genre_movies(ui, &per_genre);
    }

    ui.separator();
    ui.strong("Mean revenue per year (M$)");
    let revenue_bars: Vec<Bar> = group_by_year(&view, NumericColumn::Revenue, Aggregator::Mean)
        .into_iter()
        .map(|(year, mean)| Bar::new(year as f64, mean / 1e6).width(0.8))
        .collect();
    Plot::new("mean_revenue_per_year")
        .height(200.0)
        .x_axis_label("Year")
        .y_axis_label("Mean revenue (M$)")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(revenue_bars)
                    .name("Mean revenue")
                    .color(Color32::from_rgb(70, 110, 220)),
            );
        });

    ui.strong("Mean profit margin per year (%)");
    let margin: PlotPoints = group_by_year(&view, NumericColumn::ProfitMargin, Aggregator::Mean)
        .into_iter()
        .map(|(year, mean)| [year as f64, mean * 100.0])
        .collect();
    Plot::new("profit_margin_per_year")
        .height(200.0)
        .x_axis_label("Year")
        .y_axis_label("Profit margin (%)")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(margin).name("Profit margin").color(Color32::RED).width(1.5));
        });
}

/// Compact list of the focus genre's movies under its chart.
fn genre_movies(ui: &mut Ui, view: &View<'_>) {
    ui.push_id("focus_genre_movies", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(GENRE_TABLE_HEIGHT)
            .column(Column::auto().at_least(220.0))
            .column(Column::auto().at_least(50.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for name in ["Title", "Year", "Revenue (M$)"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                let rows: Vec<_> = view.iter().collect();
                body.rows(18.0, rows.len(), |mut row| {
                    let movie = rows[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(movie.display_title());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(movie.year.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.1}", movie.revenue / 1e6));
                    });
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Leaderboards tab
// ---------------------------------------------------------------------------

fn leaderboard(ui: &mut Ui, id: &str, title: &str, rows: &[(String, f64)], precision: usize) {
    ui.strong(title);
    egui::Grid::new(id).striped(true).num_columns(3).show(ui, |ui: &mut Ui| {
        for (rank, (label, value)) in rows.iter().enumerate() {
            ui.label(format!("{}.", rank + 1));
            ui.label(label);
            ui.label(format!("{value:.precision$}"));
            ui.end_row();
        }
    });
    if rows.is_empty() {
        ui.weak("0 rows");
    }
    ui.add_space(8.0);
}

pub fn leaderboards(ui: &mut Ui, state: &AppState) {
    let Some(view) = state.visible() else {
        placeholder(ui);
        return;
    };
    row_count_label(ui, &view);

    egui::ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.columns(2, |cols| {
            let popular = top_n(&view, NumericColumn::Popularity, LEADERBOARD_SIZE, false);
            leaderboard(&mut cols[0], "top_popularity", "Most popular", &popular, 2);

            let rated = top_n(&view, NumericColumn::VoteAverage, LEADERBOARD_SIZE, false);
            leaderboard(&mut cols[0], "top_rated", "Highest rated", &rated, 1);

            for (col, column) in [
                (0, CategoryColumn::OriginalLanguage),
                (1, CategoryColumn::ProductionCompanies),
                (1, CategoryColumn::ProductionCountries),
            ] {
                let counts = explode_multi_valued(&view, column).top_n(LEADERBOARD_SIZE, false);
                leaderboard(&mut cols[col], column.label(), column.label(), &counts, 0);
            }
        });

        ui.separator();
        ui.strong(format!("{} share", CategoryColumn::Genres.label()));
        let genres = explode_multi_valued(&view, CategoryColumn::Genres);
        let total = genres.total().max(1) as f64;
        let bars: Vec<Bar> = genres
            .top_n(genres.len(), false)
            .into_iter()
            .enumerate()
            .map(|(i, (genre, n))| {
                let fill = state
                    .genre_colors
                    .as_ref()
                    .map_or(Color32::LIGHT_BLUE, |c| c.color_for(&genre));
                Bar::new(i as f64, n / total * 100.0)
                    .width(0.8)
                    .name(genre)
                    .fill(fill)
            })
            .collect();
        Plot::new("genre_share")
            .height(240.0)
            .y_axis_label("% of genre tags")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Genres"));
            });
    });
}

// ---------------------------------------------------------------------------
// Distributions tab
// ---------------------------------------------------------------------------

/// Money columns are charted in millions.
fn display_scale(column: NumericColumn) -> (f64, &'static str) {
    match column {
        NumericColumn::Budget | NumericColumn::Revenue => (1e6, " (M$)"),
        NumericColumn::ProfitMargin => (0.01, " (%)"),
        _ => (1.0, ""),
    }
}

pub fn distributions(ui: &mut Ui, state: &mut AppState) {
    let mut column = state.histogram_column;
    egui::ComboBox::from_label("Histogram column")
        .selected_text(column.label())
        .show_ui(ui, |ui: &mut Ui| {
            for candidate in NumericColumn::ALL {
                ui.selectable_value(&mut column, candidate, candidate.label());
            }
        });
    state.histogram_column = column;

    let Some(view) = state.visible() else {
        placeholder(ui);
        return;
    };
    row_count_label(ui, &view);

    let (scale, unit) = display_scale(column);
    let axis = format!("{}{unit}", column.label());
    ui.strong(format!("{axis} distribution"));
    let bars: Vec<Bar> = histogram(&view, column, HISTOGRAM_BINS)
        .into_iter()
        .map(|bin| {
            let (lo, hi) = (bin.lower / scale, bin.upper / scale);
            Bar::new((lo + hi) / 2.0, bin.count as f64).width((hi - lo).max(0.01))
        })
        .collect();
    Plot::new("value_histogram")
        .height(220.0)
        .x_axis_label(axis)
        .y_axis_label("Movies")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Movies").color(Color32::LIGHT_GREEN));
        });

    ui.strong("Budget vs revenue (M$)");
    let points: PlotPoints = scatter_points(&view, NumericColumn::Budget, NumericColumn::Revenue)
        .into_iter()
        .map(|[b, r]| [b / 1e6, r / 1e6])
        .collect();
    Plot::new("budget_vs_revenue")
        .legend(Legend::default())
        .x_axis_label("Budget (M$)")
        .y_axis_label("Revenue (M$)")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .radius(2.0)
                    .name("Movies")
                    .color(Color32::LIGHT_BLUE),
            );
        });
}
