use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};
use movie_scope::data::model::MovieRecord;

use crate::state::AppState;

const HEADERS: [&str; 8] = [
    "Title",
    "Year",
    "Budget (M$)",
    "Revenue (M$)",
    "Vote avg",
    "Popularity",
    "Language",
    "Genres",
];

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map(|v| format!("{v:.precision$}")).unwrap_or_default()
}

fn cells(movie: &MovieRecord) -> [String; 8] {
    [
        movie.display_title().to_string(),
        movie.year.to_string(),
        format!("{:.1}", movie.budget / 1e6),
        format!("{:.1}", movie.revenue / 1e6),
        optional(movie.vote_average, 1),
        optional(movie.popularity, 2),
        movie.original_language.clone().unwrap_or_default(),
        movie.genres.iter().cloned().collect::<Vec<_>>().join(", "),
    ]
}

/// Render the filtered rows.
pub fn movie_table(ui: &mut Ui, state: &AppState) {
    let Some(view) = state.visible() else {
        ui.label("No dataset loaded.");
        return;
    };
    ui.heading(format!("{} rows", view.len()));

    let rows = view.rows();
    let movies = view.table().movies();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::initial(240.0).at_least(80.0))
        .columns(Column::auto(), HEADERS.len() - 2)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let movie = &movies[rows[row.index()]];
                for text in cells(movie) {
                    row.col(|ui| {
                        ui.label(text);
                    });
                }
            });
        });
}
