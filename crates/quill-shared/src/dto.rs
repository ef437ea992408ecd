//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Serialize};

/// Request to create a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Abstract", default)]
    pub abstract_text: String,
    #[serde(rename = "ContentRaw", default)]
    pub content_raw: String,
}

/// Request to replace the content of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(rename = "Body")]
    pub body: String,
}

/// Query string of the listing endpoint.
///
/// Values are kept as raw strings so malformed numbers can be reported with
/// the standard error envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub from: Option<String>,
    pub size: Option<String>,
    #[serde(rename = "showDrafts")]
    pub show_drafts: Option<String>,
}
