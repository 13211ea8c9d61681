mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::MovieScopeApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

/// Dataset opened when no path is given and the file exists.
const DEFAULT_DATASET: &str = "Data/Data_Movies_clear.csv";

/// Interactive movie dataset explorer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Movie dataset to open on startup (.csv, .json or .parquet)
    path: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::default();
    let path = args
        .path
        .or_else(|| Some(PathBuf::from(DEFAULT_DATASET)).filter(|p| p.exists()));
    if let Some(path) = path {
        state.open_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Movie Scope – Movie Data Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(MovieScopeApp::with_state(state)))),
    )
}
