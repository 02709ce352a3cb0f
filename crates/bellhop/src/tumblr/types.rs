//! Tumblr API v2 wire types.
//!
//! Only the fields the sync pipeline reads are declared. Per-post fields other
//! than `id` are `Option`s: Tumblr emits `null` for many of them and omits
//! others, and one malformed post must not reject the page it arrived in.
//!
//! API docs: https://www.tumblr.com/docs/en/api/v2

use serde::Deserialize;

/// Every response is wrapped as `{"meta": {...}, "response": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub msg: String,
}

/// Error bodies carry `meta` but `response` may be `[]`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub meta: Meta,
}

/// `GET /blog/{blog}/posts`
#[derive(Debug, Clone, Deserialize)]
pub struct BlogPosts {
    #[serde(default)]
    pub total_posts: u64,
    #[serde(default)]
    pub posts: Vec<TumblrPost>,
}

/// `GET /user/likes`
#[derive(Debug, Clone, Deserialize)]
pub struct Likes {
    #[serde(default)]
    pub liked_count: u64,
    #[serde(default)]
    pub liked_posts: Vec<TumblrPost>,
}

/// `GET /user/following`
#[derive(Debug, Clone, Deserialize)]
pub struct Following {
    #[serde(default)]
    pub total_blogs: u64,
    #[serde(default)]
    pub blogs: Vec<TumblrBlog>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TumblrPost {
    pub id: i64,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub blog_name: Option<String>,
    pub post_url: Option<String>,
    pub source_url: Option<String>,
    pub source_title: Option<String>,
    #[serde(default)]
    pub note_count: i64,
    /// `2006-01-02 15:04:05 GMT`
    pub date: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub reblog_key: Option<String>,

    // link
    pub url: Option<String>,
    // text
    pub title: Option<String>,
    pub body: Option<String>,
    // photo
    #[serde(default)]
    pub photos: Vec<TumblrPhoto>,
    // video
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TumblrPhoto {
    pub caption: Option<String>,
    pub original_size: Option<PhotoSize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TumblrBlog {
    pub name: String,
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
}
