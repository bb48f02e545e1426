pub mod app;
mod http;

use eframe::{self, egui};
use picfeed_core::FeedStore;

pub use app::PicfeedApp;

/// Launches the egui application with default window options.
pub fn run_frontend(store: FeedStore) -> Result<(), eframe::Error> {
    run_frontend_with_options(store, default_native_options())
}

/// Launches the egui app with caller-provided options.
pub fn run_frontend_with_options(
    store: FeedStore,
    options: eframe::NativeOptions,
) -> Result<(), eframe::Error> {
    let _ = env_logger::builder().is_test(false).try_init();
    eframe::run_native(
        "Picfeed",
        options,
        Box::new(move |cc| Ok(Box::new(PicfeedApp::new(cc, store)))),
    )
}

pub fn default_native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 820.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn core_tracing_subscriber_accepts_log_records() {
        picfeed_core::telemetry::init_tracing();
        assert!(log::max_level() >= log::LevelFilter::Warn);
    }
}
