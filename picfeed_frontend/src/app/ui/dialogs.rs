use eframe::egui::{self, Align2, Color32, Context};
use picfeed_core::composer::ComposerPhase;

use super::super::PicfeedApp;

impl PicfeedApp {
    pub(crate) fn render_create_post_dialog(&mut self, ctx: &Context) {
        if !self.composer.is_open() {
            return;
        }

        let mut window_open = true;
        let mut should_close = false;
        let mut should_submit = false;
        let mut should_pick = false;

        egui::Window::new("New Post")
            .open(&mut window_open)
            .collapsible(false)
            .resizable(false)
            .default_width(400.0)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Caption");
                ui.add(
                    egui::TextEdit::multiline(&mut self.composer.caption)
                        .desired_rows(3)
                        .hint_text("Write a caption..."),
                );
                ui.add_space(6.0);
                ui.label("Image URL (optional)");
                ui.add(
                    egui::TextEdit::singleline(&mut self.composer.image_url)
                        .hint_text("https://..."),
                );
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Upload image…").clicked() {
                        should_pick = true;
                    }
                    if self.composer.phase() == ComposerPhase::PreviewLoading {
                        ui.add(egui::Spinner::new());
                        ui.label("Loading preview...");
                    }
                });
                if let Some(err) = self.composer.upload_error() {
                    ui.colored_label(Color32::LIGHT_RED, format!("Could not use that file: {err}"));
                }

                if let Some(preview) = self.composer.preview() {
                    let texture = self.preview_texture.get_or_insert_with(|| {
                        let color = egui::ColorImage::from_rgba_unmultiplied(preview.size, &preview.pixels);
                        ctx.load_texture("composer_preview", color, egui::TextureOptions::default())
                    });
                    ui.add(egui::Image::from_texture(&*texture).max_width(360.0));
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Share").clicked() {
                        should_submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_pick {
            self.spawn_pick_upload();
        }
        if should_submit {
            self.submit_post();
        } else if should_close || !window_open {
            self.close_composer();
        }
    }
}
