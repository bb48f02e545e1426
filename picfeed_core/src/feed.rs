use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{Comment, Post, PostDraft, LOCAL_AVATAR, LOCAL_USER};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this post?";

/// Synchronous yes/no gate in front of destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Ordered post collection, newest first.
///
/// Every mutation reports whether it changed anything so callers can skip
/// persisting no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    posts: Vec<Post>,
}

impl Feed {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn create_post(&mut self, draft: PostDraft, placeholder: &str) -> i64 {
        self.create_post_at(draft, placeholder, Utc::now())
    }

    pub fn create_post_at(&mut self, draft: PostDraft, placeholder: &str, now: DateTime<Utc>) -> i64 {
        let id = self.fresh_id(now);
        let image = draft.resolve_image(placeholder);
        let post = Post {
            id,
            user: LOCAL_USER.to_string(),
            avatar: LOCAL_AVATAR.to_string(),
            image,
            caption: draft.caption,
            likes: 0,
            liked: false,
            comments: Vec::new(),
            created_at: now,
        };
        self.posts.insert(0, post);
        debug!(post_id = id, "created post");
        id
    }

    pub fn toggle_like(&mut self, id: i64) -> bool {
        let Some(post) = self.posts.iter_mut().find(|post| post.id == id) else {
            return false;
        };
        if post.liked {
            post.likes = post.likes.saturating_sub(1);
        } else {
            post.likes = post.likes.saturating_add(1);
        }
        post.liked = !post.liked;
        debug!(post_id = id, liked = post.liked, likes = post.likes, "toggled like");
        true
    }

    /// Appends a comment authored by the local user. Blank text and unknown
    /// posts are ignored; returns the new comment id otherwise.
    pub fn add_comment(&mut self, id: i64, text: &str) -> Option<i64> {
        self.add_comment_at(id, text, Utc::now())
    }

    pub fn add_comment_at(&mut self, id: i64, text: &str, now: DateTime<Utc>) -> Option<i64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let comment_id = self.fresh_id(now);
        let post = self.posts.iter_mut().find(|post| post.id == id)?;
        post.comments.push(Comment {
            id: comment_id,
            user: LOCAL_USER.to_string(),
            text: text.to_string(),
        });
        debug!(post_id = id, comment_id, "added comment");
        Some(comment_id)
    }

    pub fn delete_post(&mut self, id: i64, confirm: &mut impl Confirm) -> bool {
        let Some(index) = self.posts.iter().position(|post| post.id == id) else {
            return false;
        };
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(post_id = id, "delete declined");
            return false;
        }
        self.posts.remove(index);
        debug!(post_id = id, "deleted post");
        true
    }

    /// Timestamp-derived id, bumped past every post and comment id in use.
    fn fresh_id(&self, now: DateTime<Utc>) -> i64 {
        let largest = self
            .posts
            .iter()
            .flat_map(|post| std::iter::once(post.id).chain(post.comments.iter().map(|c| c.id)))
            .max()
            .unwrap_or(0);
        now.timestamp_millis().max(largest.saturating_add(1))
    }
}

impl From<Vec<Post>> for Feed {
    fn from(posts: Vec<Post>) -> Self {
        Self::new(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_posts;
    use std::collections::HashSet;

    const PLACEHOLDER: &str = "https://example.test/placeholder.png";

    fn draft(caption: &str) -> PostDraft {
        PostDraft {
            caption: caption.into(),
            ..Default::default()
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn create_post_prepends_with_local_defaults() {
        let mut feed = Feed::new(seed_posts());
        let id = feed.create_post(draft("hello"), PLACEHOLDER);
        let first = &feed.posts()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.user, LOCAL_USER);
        assert_eq!(first.likes, 0);
        assert!(!first.liked);
        assert!(first.comments.is_empty());
        assert_eq!(first.image, PLACEHOLDER);
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn creation_order_is_newest_first() {
        let mut feed = Feed::default();
        let p1 = feed.create_post(draft("one"), PLACEHOLDER);
        let p2 = feed.create_post(draft("two"), PLACEHOLDER);
        let ids: Vec<i64> = feed.posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p2, p1]);
    }

    #[test]
    fn ids_stay_unique_within_the_same_instant() {
        let mut feed = Feed::new(seed_posts());
        let now = fixed_now();
        let mut ids = HashSet::new();
        for i in 0..5 {
            ids.insert(feed.create_post_at(draft(&i.to_string()), PLACEHOLDER, now));
        }
        assert_eq!(ids.len(), 5);
        let target = feed.posts()[0].id;
        let c1 = feed.add_comment_at(target, "a", now).unwrap();
        let c2 = feed.add_comment_at(target, "b", now).unwrap();
        assert_ne!(c1, c2);
    }

    #[test]
    fn empty_caption_is_allowed() {
        let mut feed = Feed::default();
        feed.create_post(draft(""), PLACEHOLDER);
        assert_eq!(feed.posts()[0].caption, "");
    }

    #[test]
    fn double_toggle_restores_original_state() {
        let mut feed = Feed::new(seed_posts());
        let before = feed.clone();
        assert!(feed.toggle_like(1));
        assert_eq!(feed.get(1).unwrap().likes, 25);
        assert!(feed.get(1).unwrap().liked);
        assert!(feed.toggle_like(1));
        assert_eq!(feed, before);
    }

    #[test]
    fn likes_stay_within_zero_and_one_from_fresh_post() {
        let mut feed = Feed::default();
        let id = feed.create_post(draft("x"), PLACEHOLDER);
        for _ in 0..9 {
            feed.toggle_like(id);
            let post = feed.get(id).unwrap();
            assert!(post.likes <= 1);
            assert_eq!(post.likes == 1, post.liked);
        }
    }

    #[test]
    fn unlike_never_goes_negative() {
        let mut seed = seed_posts();
        seed[0].likes = 0;
        seed[0].liked = true;
        let mut feed = Feed::new(seed);
        feed.toggle_like(1);
        assert_eq!(feed.get(1).unwrap().likes, 0);
        assert!(!feed.get(1).unwrap().liked);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut feed = Feed::new(seed_posts());
        let before = feed.clone();
        assert!(!feed.toggle_like(999));
        assert_eq!(feed, before);
    }

    #[test]
    fn comments_append_in_order() {
        let mut feed = Feed::new(seed_posts());
        let original = feed.get(1).unwrap().comments.clone();
        for (n, text) in ["first", "second", "third"].iter().enumerate() {
            feed.add_comment(1, text).unwrap();
            let comments = &feed.get(1).unwrap().comments;
            assert_eq!(comments.len(), original.len() + n + 1);
            assert_eq!(&comments[..original.len()], &original[..]);
            let last = comments.last().unwrap();
            assert_eq!(last.text, *text);
            assert_eq!(last.user, LOCAL_USER);
        }
    }

    #[test]
    fn comment_text_is_trimmed() {
        let mut feed = Feed::new(seed_posts());
        feed.add_comment(1, "  nice  ").unwrap();
        assert_eq!(feed.get(1).unwrap().comments.last().unwrap().text, "nice");
    }

    #[test]
    fn blank_comment_is_rejected() {
        let mut feed = Feed::new(seed_posts());
        let before = feed.clone();
        assert_eq!(feed.add_comment(1, "   "), None);
        assert_eq!(feed.add_comment(1, ""), None);
        assert_eq!(feed, before);
    }

    #[test]
    fn comment_on_unknown_post_is_noop() {
        let mut feed = Feed::new(seed_posts());
        let before = feed.clone();
        assert_eq!(feed.add_comment(42, "hello"), None);
        assert_eq!(feed, before);
    }

    #[test]
    fn declined_delete_leaves_feed_unchanged() {
        let mut feed = Feed::new(seed_posts());
        feed.create_post(draft("keep me"), PLACEHOLDER);
        let before = feed.clone();
        let mut prompts = Vec::new();
        let removed = feed.delete_post(1, &mut |prompt: &str| {
            prompts.push(prompt.to_string());
            false
        });
        assert!(!removed);
        assert_eq!(feed, before);
        assert_eq!(prompts, vec![DELETE_PROMPT.to_string()]);
    }

    #[test]
    fn accepted_delete_removes_exactly_one_post() {
        let mut feed = Feed::new(seed_posts());
        let a = feed.create_post(draft("a"), PLACEHOLDER);
        let b = feed.create_post(draft("b"), PLACEHOLDER);
        assert!(feed.delete_post(a, &mut |_: &str| true));
        let ids: Vec<i64> = feed.posts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b, 1]);
    }

    #[test]
    fn delete_unknown_id_does_not_prompt() {
        let mut feed = Feed::new(seed_posts());
        let mut asked = false;
        assert!(!feed.delete_post(999, &mut |_: &str| {
            asked = true;
            true
        }));
        assert!(!asked);
        assert_eq!(feed.len(), 1);
    }
}
