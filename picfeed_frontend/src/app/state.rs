use std::collections::{HashMap, HashSet, VecDeque};

use eframe::egui::{self, TextureHandle};
use picfeed_core::intake::DecodedPixels;

/// Maximum number of concurrent image loads.
pub const MAX_CONCURRENT_DOWNLOADS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub key: String,
    /// Remote URL or inline `data:` URL.
    pub source: String,
}

/// FIFO of image loads with a cap on how many run at once.
#[derive(Debug)]
pub struct DownloadQueue {
    queue: VecDeque<ImageJob>,
    active: usize,
    limit: usize,
}

impl Default for DownloadQueue {
    fn default() -> Self {
        Self::with_limit(MAX_CONCURRENT_DOWNLOADS)
    }
}

impl DownloadQueue {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            active: 0,
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, job: ImageJob) {
        self.queue.push_back(job);
    }

    /// Pops as many jobs as the limit allows and counts them as running.
    pub fn start_ready(&mut self) -> Vec<ImageJob> {
        let mut started = Vec::new();
        while self.active < self.limit {
            let Some(job) = self.queue.pop_front() else {
                break;
            };
            self.active += 1;
            started.push(job);
        }
        started
    }

    /// Drops a job that has not started yet. Returns whether one was queued.
    pub fn cancel(&mut self, key: &str) -> bool {
        let before = self.queue.len();
        self.queue.retain(|job| job.key != key);
        self.queue.len() != before
    }

    pub fn complete(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

/// Texture cache for post images and avatars, keyed by [`post_image_key`] /
/// [`avatar_key`].
#[derive(Default)]
pub struct ImageCache {
    pub textures: HashMap<String, TextureHandle>,
    pub loading: HashSet<String>,
    pub pending: HashMap<String, DecodedPixels>,
    pub errors: HashMap<String, String>,
    pub queue: DownloadQueue,
    /// Keys forgotten while their load was running; the result is dropped
    /// when it arrives.
    discarded: HashSet<String>,
}

pub enum ImageStatus {
    Ready(TextureHandle),
    Loading,
    Failed(String),
}

impl ImageCache {
    /// Queues a load unless one is already known for `key`. Returns the jobs
    /// that may start now.
    pub fn request(&mut self, key: &str, source: &str) -> Vec<ImageJob> {
        let known = self.loading.contains(key)
            || self.textures.contains_key(key)
            || self.pending.contains_key(key)
            || self.errors.contains_key(key);
        if !known {
            self.loading.insert(key.to_string());
            self.queue.push(ImageJob {
                key: key.to_string(),
                source: source.to_string(),
            });
        }
        self.queue.start_ready()
    }

    /// Records a finished load and returns the jobs it unblocked.
    pub fn finish(&mut self, key: String, result: Result<DecodedPixels, String>) -> Vec<ImageJob> {
        if !self.discarded.remove(&key) {
            self.loading.remove(&key);
            match result {
                Ok(pixels) => {
                    self.pending.insert(key, pixels);
                }
                Err(err) => {
                    self.errors.insert(key, err);
                }
            }
        }
        self.queue.complete();
        self.queue.start_ready()
    }

    /// Uploads pending pixels on first use. Must run on the UI thread.
    pub fn status(&mut self, ctx: &egui::Context, key: &str) -> Option<ImageStatus> {
        if let Some(texture) = self.textures.get(key) {
            return Some(ImageStatus::Ready(texture.clone()));
        }
        if let Some(decoded) = self.pending.remove(key) {
            let color = egui::ColorImage::from_rgba_unmultiplied(decoded.size, &decoded.pixels);
            let texture = ctx.load_texture(key, color, egui::TextureOptions::default());
            self.textures.insert(key.to_string(), texture.clone());
            return Some(ImageStatus::Ready(texture));
        }
        if let Some(err) = self.errors.get(key) {
            return Some(ImageStatus::Failed(err.clone()));
        }
        if self.loading.contains(key) {
            return Some(ImageStatus::Loading);
        }
        None
    }

    pub fn forget(&mut self, key: &str) {
        self.textures.remove(key);
        self.pending.remove(key);
        self.errors.remove(key);
        if self.loading.remove(key) && !self.queue.cancel(key) {
            self.discarded.insert(key.to_string());
        }
    }

    /// Forgets every image. Loads already running still release their
    /// queue slot when they finish.
    pub fn clear(&mut self) {
        let loading: Vec<String> = self.loading.iter().cloned().collect();
        for key in loading {
            self.forget(&key);
        }
        self.textures.clear();
        self.pending.clear();
        self.errors.clear();
    }
}

pub fn post_image_key(post_id: i64) -> String {
    format!("post:{post_id}")
}

pub fn avatar_key(url: &str) -> String {
    format!("avatar:{url}")
}
