use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored field names used in filters.
pub mod fields {
    pub const ID: &str = "ID";
    pub const SLUG: &str = "Slug";
    pub const AUTHOR_ID: &str = "AuthorID";
    pub const IS_PUBLISHED: &str = "IsPublished";
}

/// Derive the URL slug of a title: lowercased, every space replaced by a hyphen.
///
/// No other characters are touched and collisions are not handled.
pub fn build_slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Post entity - a single blog post.
///
/// The serialized field names are part of the public wire format and are also
/// the field names used in stored documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Post {
    #[serde(rename = "ID")]
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    #[serde(rename = "Abstract")]
    pub abstract_text: String,
    pub content_raw: String,
    #[serde(rename = "AuthorID")]
    pub author_id: String,
    /// Stored as-is; nothing increments it yet.
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: bool,
    pub last_edited_by: Option<String>,
}

impl Post {
    /// Create a new draft post.
    pub fn new(
        author_id: impl Into<String>,
        title: String,
        abstract_text: String,
        content_raw: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: build_slug(&title),
            title,
            abstract_text,
            content_raw,
            author_id: author_id.into(),
            version: 1,
            created_at: now,
            updated_at: now,
            published_at: None,
            is_published: false,
            last_edited_by: None,
        }
    }

    /// Replace the raw content. The slug is left alone.
    pub fn update_content(&mut self, body: String, editor: impl Into<String>) {
        self.content_raw = body;
        self.last_edited_by = Some(editor.into());
        self.updated_at = after(self.updated_at);
    }

    /// Publish the post. Returns `false` if it was already published, in which
    /// case nothing changes.
    pub fn publish(&mut self) -> bool {
        if self.is_published {
            return false;
        }

        self.published_at = Some(after(self.updated_at));
        self.is_published = true;
        true
    }
}

/// Current time, bumped past `previous` when the clock has not moved on.
fn after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
