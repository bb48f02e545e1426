use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author handle used for everything created on this machine.
pub const LOCAL_USER: &str = "you";

/// Avatar shown next to locally authored posts.
pub const LOCAL_AVATAR: &str = "https://i.pravatar.cc/150?u=picfeed-you";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user: String,
    pub avatar: String,
    /// Remote URL or a `data:` URL produced by the upload path.
    pub image: String,
    pub caption: String,
    pub likes: u32,
    pub liked: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub user: String,
    pub text: String,
}

/// What the creation form hands to [`crate::feed::Feed::create_post`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub caption: String,
    pub image_url: String,
    /// Inline data URL from an uploaded file, if one finished decoding.
    pub uploaded_image: Option<String>,
}

impl PostDraft {
    /// Uploaded data wins over a typed URL, which wins over the placeholder.
    pub fn resolve_image(&self, placeholder: &str) -> String {
        if let Some(data) = &self.uploaded_image {
            return data.clone();
        }
        let url = self.image_url.trim();
        if url.is_empty() {
            placeholder.to_string()
        } else {
            url.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDER: &str = "https://example.test/placeholder.png";

    #[test]
    fn upload_takes_priority_over_url() {
        let draft = PostDraft {
            caption: String::new(),
            image_url: "https://example.test/a.jpg".into(),
            uploaded_image: Some("data:image/png;base64,AAAA".into()),
        };
        assert_eq!(draft.resolve_image(PLACEHOLDER), "data:image/png;base64,AAAA");
    }

    #[test]
    fn url_used_when_no_upload() {
        let draft = PostDraft {
            image_url: "  https://example.test/a.jpg ".into(),
            ..Default::default()
        };
        assert_eq!(draft.resolve_image(PLACEHOLDER), "https://example.test/a.jpg");
    }

    #[test]
    fn blank_url_falls_back_to_placeholder() {
        let draft = PostDraft {
            image_url: "   ".into(),
            ..Default::default()
        };
        assert_eq!(draft.resolve_image(PLACEHOLDER), PLACEHOLDER);
    }

    #[test]
    fn serialized_shape_uses_camel_case() {
        let post = Post {
            id: 7,
            user: "you".into(),
            avatar: "a".into(),
            image: "i".into(),
            caption: "c".into(),
            likes: 0,
            liked: false,
            comments: vec![],
            created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
