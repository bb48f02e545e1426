use tracing::{debug, info, warn};

use crate::error::FeedError;
use crate::feed::{Confirm, Feed};
use crate::models::{Post, PostDraft};
use crate::seed::seed_posts;
use crate::storage::PersistenceSink;

pub const DEFAULT_STORAGE_KEY: &str = "picfeed_posts";

pub fn try_deserialize(text: &str) -> Result<Vec<Post>, FeedError> {
    serde_json::from_str(text).map_err(FeedError::Parse)
}

pub fn serialize(posts: &[Post]) -> Result<String, FeedError> {
    serde_json::to_string(posts).map_err(FeedError::Serialize)
}

/// Owns the feed and mirrors every change into a [`PersistenceSink`].
pub struct FeedStore {
    feed: Feed,
    sink: Box<dyn PersistenceSink>,
    key: String,
    placeholder_image: String,
}

impl FeedStore {
    /// Hydrates from the sink, substituting seed data when the stored blob
    /// is missing or unusable.
    pub fn load(
        sink: Box<dyn PersistenceSink>,
        key: impl Into<String>,
        placeholder_image: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let feed = match sink.get(&key) {
            Ok(Some(text)) => match try_deserialize(&text) {
                Ok(posts) => {
                    info!(count = posts.len(), "loaded persisted feed");
                    Feed::new(posts)
                }
                Err(err) => {
                    warn!(error = %err, "discarding persisted feed, using seed data");
                    Feed::new(seed_posts())
                }
            },
            Ok(None) => {
                info!("no persisted feed, using seed data");
                Feed::new(seed_posts())
            }
            Err(err) => {
                warn!(error = %err, "failed to read persisted feed, using seed data");
                Feed::new(seed_posts())
            }
        };
        Self {
            feed,
            sink,
            key,
            placeholder_image: placeholder_image.into(),
        }
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn posts(&self) -> &[Post] {
        self.feed.posts()
    }

    pub fn create_post(&mut self, draft: PostDraft) -> i64 {
        let id = self.feed.create_post(draft, &self.placeholder_image);
        self.persist();
        id
    }

    pub fn toggle_like(&mut self, id: i64) -> bool {
        let changed = self.feed.toggle_like(id);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn add_comment(&mut self, id: i64, text: &str) -> Option<i64> {
        let comment_id = self.feed.add_comment(id, text);
        if comment_id.is_some() {
            self.persist();
        }
        comment_id
    }

    pub fn delete_post(&mut self, id: i64, confirm: &mut impl Confirm) -> bool {
        let removed = self.feed.delete_post(id, confirm);
        if removed {
            self.persist();
        }
        removed
    }

    /// Clears the stored blob and returns to the seed collection.
    pub fn reset(&mut self) {
        if let Err(err) = self.sink.remove(&self.key) {
            warn!(error = %err, "failed to clear persisted feed");
        }
        self.feed = Feed::new(seed_posts());
        info!("feed reset to seed data");
    }

    /// Writes the whole collection under the store key. Failures are logged
    /// and otherwise ignored.
    fn persist(&self) {
        let text = match serialize(self.feed.posts()) {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "failed to serialize feed");
                return;
            }
        };
        match self.sink.set(&self.key, &text) {
            Ok(()) => debug!(bytes = text.len(), "persisted feed"),
            Err(err) => warn!(error = %err, "failed to persist feed"),
        }
    }
}
