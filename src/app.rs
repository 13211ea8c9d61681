use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MovieScopeApp {
    pub state: AppState,
}

impl MovieScopeApp {
    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for MovieScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Overview => {
                egui::ScrollArea::vertical().show(ui, |ui| plot::overview(ui, &self.state));
            }
            Tab::Leaderboards => plot::leaderboards(ui, &self.state),
            Tab::Distributions => plot::distributions(ui, &mut self.state),
            Tab::Table => table::movie_table(ui, &self.state),
        });
    }
}
