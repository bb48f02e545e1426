use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, Utc};
use eframe::egui::{self, Context, TextureHandle};
use log::info;
use picfeed_core::composer::Composer;
use picfeed_core::FeedStore;

mod confirm;
mod messages;
mod state;
mod tasks;
mod ui;

pub use confirm::NativeConfirm;
use messages::AppMessage;
use state::{ImageCache, ImageJob};

const RESET_PROMPT: &str = "Reset the feed to the sample post? Posts you created will be removed.";

pub struct PicfeedApp {
    store: FeedStore,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    ctx: Context,
    composer: Composer,
    preview_texture: Option<TextureHandle>,
    comment_drafts: HashMap<i64, String>,
    images: ImageCache,
    info_banner: Option<String>,
}

/// What a click in the feed asked for. Applied after the frame's borrows of
/// the store end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FeedAction {
    ToggleLike(i64),
    Comment(i64),
    Delete(i64),
    OpenImage(String),
}

impl PicfeedApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: FeedStore) -> Self {
        let (tx, rx) = mpsc::channel();
        info!("starting with {} posts", store.posts().len());
        Self {
            store,
            tx,
            rx,
            ctx: cc.egui_ctx.clone(),
            composer: Composer::default(),
            preview_texture: None,
            comment_drafts: HashMap::new(),
            images: ImageCache::default(),
            info_banner: None,
        }
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }

    pub(crate) fn request_image(&mut self, key: &str, source: &str) {
        let jobs = self.images.request(key, source);
        self.start_image_jobs(jobs);
    }

    fn start_image_jobs(&mut self, jobs: Vec<ImageJob>) {
        for job in jobs {
            tasks::load_image(self.tx.clone(), self.ctx.clone(), job.key, job.source);
        }
    }

    fn spawn_pick_upload(&mut self) {
        tasks::pick_upload(self.tx.clone(), self.ctx.clone());
    }

    fn submit_post(&mut self) {
        let Some(draft) = self.composer.submit() else {
            return;
        };
        self.preview_texture = None;
        let id = self.store.create_post(draft);
        self.info_banner = Some("Post shared".into());
        info!("created post {id}");
    }

    fn close_composer(&mut self) {
        self.composer.close();
        self.preview_texture = None;
    }

    fn apply_feed_action(&mut self, action: FeedAction) {
        match action {
            FeedAction::ToggleLike(id) => {
                self.store.toggle_like(id);
            }
            FeedAction::Comment(id) => {
                let text = self.comment_drafts.get(&id).cloned().unwrap_or_default();
                if self.store.add_comment(id, &text).is_some() {
                    self.comment_drafts.remove(&id);
                }
            }
            FeedAction::Delete(id) => {
                if self.store.delete_post(id, &mut NativeConfirm) {
                    self.comment_drafts.remove(&id);
                    self.images.forget(&state::post_image_key(id));
                    self.info_banner = Some("Post deleted".into());
                }
            }
            FeedAction::OpenImage(url) => {
                if let Err(err) = open::that(&url) {
                    log::warn!("failed to open {url}: {err}");
                }
            }
        }
    }

    fn reset_feed(&mut self) {
        use picfeed_core::Confirm;
        if !NativeConfirm.confirm(RESET_PROMPT) {
            return;
        }
        self.store.reset();
        self.comment_drafts.clear();
        self.images.clear();
        self.info_banner = Some("Feed reset".into());
    }
}

impl eframe::App for PicfeedApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        egui::TopBottomPanel::top("top_controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Picfeed");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Reset feed").clicked() {
                        self.reset_feed();
                    }
                    if ui.button("New Post").clicked() {
                        self.composer.open();
                    }
                });
            });

            if let Some(message) = self.info_banner.clone() {
                let mut dismiss = false;
                egui::Frame::group(ui.style())
                    .fill(ui.visuals().extreme_bg_color)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(message.as_str());
                            if ui.button("Dismiss").clicked() {
                                dismiss = true;
                            }
                        });
                    });
                if dismiss {
                    self.info_banner = None;
                }
            }
        });

        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            actions = self.render_feed(ui);
        });
        for action in actions {
            self.apply_feed_action(action);
        }

        self.render_create_post_dialog(ctx);
    }
}

/// Short relative time for post headers, falling back to a date after a week.
pub(crate) fn format_timestamp(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    if elapsed.num_seconds() < 60 {
        "just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 7 {
        format!("{}d ago", elapsed.num_days())
    } else {
        created_at.format("%b %d, %Y").to_string()
    }
}

pub(crate) fn likes_label(likes: u32) -> String {
    if likes == 1 {
        "1 like".to_string()
    } else {
        format!("{likes} likes")
    }
}
