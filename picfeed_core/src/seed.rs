//! Fixed collection shown on first launch or when stored data is unusable.

use chrono::{TimeZone, Utc};

use crate::models::{Comment, Post};

pub fn seed_posts() -> Vec<Post> {
    vec![Post {
        id: 1,
        user: "travel_diaries".into(),
        avatar: "https://i.pravatar.cc/150?img=5".into(),
        image: "https://picsum.photos/id/1018/600/600".into(),
        caption: "Exploring the mountains this weekend".into(),
        likes: 24,
        liked: false,
        comments: vec![
            Comment {
                id: 1,
                user: "hiker_jane".into(),
                text: "Stunning view!".into(),
            },
            Comment {
                id: 2,
                user: "photo_mike".into(),
                text: "Where is this?".into(),
            },
        ],
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .single()
            .unwrap_or_default(),
    }]
}
