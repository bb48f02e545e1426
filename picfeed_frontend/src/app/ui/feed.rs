use chrono::Utc;
use eframe::egui::{self, Color32, RichText};
use picfeed_core::intake::is_data_url;

use super::super::state::{avatar_key, post_image_key};
use super::super::{format_timestamp, likes_label, FeedAction, PicfeedApp};
use super::images::{show_avatar, show_cached_image};

const IMAGE_MAX_WIDTH: f32 = 480.0;

impl PicfeedApp {
    pub(crate) fn render_feed(&mut self, ui: &mut egui::Ui) -> Vec<FeedAction> {
        let mut actions = Vec::new();
        let mut jobs = Vec::new();
        let now = Utc::now();

        let posts = self.store.posts();
        let images = &mut self.images;
        let drafts = &mut self.comment_drafts;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if posts.is_empty() {
                    ui.label("No posts yet. Share one to get started.");
                }

                for post in posts {
                    egui::Frame::group(ui.style())
                        .fill(ui.visuals().extreme_bg_color)
                        .inner_margin(egui::vec2(12.0, 8.0))
                        .show(ui, |ui| {
                            ui.set_max_width(IMAGE_MAX_WIDTH + 24.0);
                            ui.horizontal(|ui| {
                                show_avatar(ui, images, &avatar_key(&post.avatar), &post.avatar, &mut jobs);
                                ui.label(RichText::new(&post.user).strong());
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.button("🗑").on_hover_text("Delete post").clicked() {
                                            actions.push(FeedAction::Delete(post.id));
                                        }
                                        ui.label(format_timestamp(post.created_at, now));
                                    },
                                );
                            });

                            let key = post_image_key(post.id);
                            if let Some(response) =
                                show_cached_image(ui, images, &key, &post.image, IMAGE_MAX_WIDTH, &mut jobs)
                            {
                                if !is_data_url(&post.image) {
                                    let response = response.on_hover_text("Open in browser");
                                    if response.clicked() {
                                        actions.push(FeedAction::OpenImage(post.image.clone()));
                                    }
                                }
                            }

                            ui.horizontal(|ui| {
                                let heart = if post.liked {
                                    RichText::new("♥").color(Color32::from_rgb(237, 73, 86))
                                } else {
                                    RichText::new("♡")
                                };
                                if ui.button(heart.size(18.0)).clicked() {
                                    actions.push(FeedAction::ToggleLike(post.id));
                                }
                                ui.label(RichText::new(likes_label(post.likes)).strong());
                            });

                            if !post.caption.is_empty() {
                                ui.horizontal_wrapped(|ui| {
                                    ui.label(RichText::new(&post.user).strong());
                                    ui.label(&post.caption);
                                });
                            }

                            for comment in &post.comments {
                                ui.horizontal_wrapped(|ui| {
                                    ui.label(RichText::new(&comment.user).strong());
                                    ui.label(&comment.text);
                                });
                            }

                            let draft = drafts.entry(post.id).or_default();
                            ui.horizontal(|ui| {
                                let response = ui.add(
                                    egui::TextEdit::singleline(draft)
                                        .hint_text("Add a comment...")
                                        .desired_width(IMAGE_MAX_WIDTH - 60.0),
                                );
                                let submitted = response.lost_focus()
                                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                                let can_post = !draft.trim().is_empty();
                                if ui.add_enabled(can_post, egui::Button::new("Post")).clicked()
                                    || (submitted && can_post)
                                {
                                    actions.push(FeedAction::Comment(post.id));
                                }
                            });
                        });
                    ui.add_space(8.0);
                }
            });

        self.start_image_jobs(jobs);
        actions
    }
}
