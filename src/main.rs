mod app;
mod config;
mod drag;
mod error;
mod loader;
mod overlay;
mod picker;
mod screen;
mod surface;

use app::EditorApp;
use config::Settings;
use eframe::egui;
use std::path::PathBuf;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load();
    let startup = std::env::args_os().nth(1).map(PathBuf::from);

    let title = match &startup {
        Some(path) => format!(
            "image-editor - {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ),
        None => "image-editor".to_string(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_size.0, settings.window_size.1])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(EditorApp::new(cc, settings, startup)))),
    )
}
