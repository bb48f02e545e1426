use eframe::egui::{self, Color32};

use super::super::state::{ImageCache, ImageJob, ImageStatus};

/// Draws the image cached under `key`, queueing a load from `source` the
/// first time it is seen. New jobs are appended to `jobs`.
pub(crate) fn show_cached_image(
    ui: &mut egui::Ui,
    images: &mut ImageCache,
    key: &str,
    source: &str,
    max_width: f32,
    jobs: &mut Vec<ImageJob>,
) -> Option<egui::Response> {
    match images.status(ui.ctx(), key) {
        Some(ImageStatus::Ready(texture)) => Some(
            ui.add(
                egui::Image::from_texture(&texture)
                    .max_width(max_width)
                    .sense(egui::Sense::click()),
            ),
        ),
        Some(ImageStatus::Failed(err)) => {
            ui.colored_label(Color32::LIGHT_RED, format!("Image failed: {err}"));
            None
        }
        Some(ImageStatus::Loading) => {
            ui.add(egui::Spinner::new());
            None
        }
        None => {
            jobs.extend(images.request(key, source));
            ui.add(egui::Spinner::new());
            None
        }
    }
}

pub(crate) fn show_avatar(
    ui: &mut egui::Ui,
    images: &mut ImageCache,
    key: &str,
    source: &str,
    jobs: &mut Vec<ImageJob>,
) {
    let size = egui::vec2(32.0, 32.0);
    match images.status(ui.ctx(), key) {
        Some(ImageStatus::Ready(texture)) => {
            ui.add(
                egui::Image::from_texture(&texture)
                    .fit_to_exact_size(size)
                    .rounding(16.0),
            );
        }
        status => {
            if status.is_none() {
                jobs.extend(images.request(key, source));
            }
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            ui.painter()
                .circle_filled(rect.center(), 16.0, ui.visuals().faint_bg_color);
        }
    }
}
