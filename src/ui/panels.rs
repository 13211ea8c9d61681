use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};
use movie_scope::data::export::EXPORT_FILE_NAME;

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Copy what we need so we can mutate state inside the scroll area.
    let (year_lo, year_hi) = table.year_bounds().unwrap_or((1900, 2030));
    let max_revenue_m = table.max_revenue() / 1e6;
    let catalog: Vec<String> = table.genre_catalog().iter().cloned().collect();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Release year ----
            ui.strong("Release year");
            let (mut from, mut to) = state.params.year_range.unwrap_or((year_lo, year_hi));
            let year_changed = ui
                .add(Slider::new(&mut from, year_lo..=year_hi).text("from"))
                .changed()
                | ui
                    .add(Slider::new(&mut to, year_lo..=year_hi).text("to"))
                    .changed();
            if year_changed {
                state.params.year_range = Some((from, to));
                changed = true;
            }
            ui.separator();

            // ---- Revenue (millions) ----
            ui.strong("Revenue");
            let (lo, hi) = state.params.revenue_range.unwrap_or((0.0, max_revenue_m * 1e6));
            let (mut lo_m, mut hi_m) = (lo / 1e6, hi / 1e6);
            let revenue_changed = ui
                .add(Slider::new(&mut lo_m, 0.0..=max_revenue_m).text("min").suffix(" M$"))
                .changed()
                | ui
                    .add(Slider::new(&mut hi_m, 0.0..=max_revenue_m).text("max").suffix(" M$"))
                    .changed();
            if revenue_changed {
                state.params.revenue_range = Some((lo_m * 1e6, hi_m * 1e6));
                changed = true;
            }
            ui.separator();

            // ---- Title search ----
            ui.strong("Title search");
            let search = egui::TextEdit::singleline(&mut state.params.title_query)
                .hint_text("Title contains…");
            changed |= ui.add(search).changed();
            ui.separator();

            // ---- Genres (any of) ----
            let header_text = format!("Genres  ({}/{})", state.params.genres.len(), catalog.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("genres")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_genres();
                        }
                        if ui.small_button("None").clicked() {
                            state.clear_genres();
                        }
                    });
                    if state.params.genres.is_empty() {
                        ui.weak("No genre selected: all genres shown");
                    }

                    for genre in &catalog {
                        let mut checked = state.params.genres.contains(genre);
                        let mut text = RichText::new(genre);
                        if let Some(colors) = &state.genre_colors {
                            text = text.color(colors.color_for(genre));
                        }
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_genre(genre);
                        }
                    }
                });
            ui.separator();

            // ---- Focus genre for the per-year chart ----
            ui.strong("Focus genre");
            let current = state.focus_genre.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("focus_genre")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for genre in &catalog {
                        if ui.selectable_label(current == *genre, genre).clicked() {
                            state.focus_genre = Some(genre.clone());
                        }
                    }
                });
        });

    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for (tab, label) in [
            (Tab::Overview, "Overview"),
            (Tab::Leaderboards, "Leaderboards"),
            (Tab::Distributions, "Distributions"),
            (Tab::Table, "Table"),
        ] {
            ui.selectable_value(&mut state.tab, tab, label);
        }

        ui.separator();

        if let Some(summary) = state.summary() {
            ui.label(summary);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open movie dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered movies")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.export_visible(&path) {
            Ok(n) => {
                state.status_message = Some(format!("Exported {n} rows to {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
