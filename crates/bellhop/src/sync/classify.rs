//! Mapping of remote posts onto the canonical post plus typed child records.
//!
//! Pure data transformation: nothing here touches storage or the network.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use sea_orm::Set;
use thiserror::Error;

use crate::entity::post_status::PostStatus;
use crate::entity::post_type::PostType;
use crate::entity::{link, photo, post, text, video};
use crate::platform::RemotePost;

/// Layout of the date part of remote timestamps; a zone name follows it.
const REMOTE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const MIN_ZONE_LEN: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("unsupported post type: {0}")]
    UnsupportedType(String),

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

/// Parse `YYYY-MM-DD HH:MM:SS ZONE`.
///
/// The zone must be an upper-case abbreviation of at least three letters
/// (`GMT`, `UTC`, `EST`). Every abbreviation is read as UTC, which is what the
/// service reports.
pub fn parse_remote_timestamp(value: &str) -> Result<DateTime<FixedOffset>, ClassifyError> {
    let invalid = |reason: &str| ClassifyError::InvalidTimestamp {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let (datetime, zone) = value
        .trim()
        .rsplit_once(' ')
        .ok_or_else(|| invalid("missing zone"))?;
    if zone.len() < MIN_ZONE_LEN || !zone.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(invalid("zone must be an upper-case abbreviation"));
    }

    let naive = NaiveDateTime::parse_from_str(datetime, REMOTE_DATE_FORMAT)
        .map_err(|e| invalid(&e.to_string()))?;
    Ok(naive.and_utc().fixed_offset())
}

/// Canonical post fields, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub status: PostStatus,
    pub source: String,
    pub post_type: PostType,
    pub released_at: DateTime<FixedOffset>,
    pub category: String,
    pub external_id: String,
    pub external_url: String,
    pub source_url: String,
    pub source_category: String,
    pub likes: i64,
    pub summary: String,
}

impl NewPost {
    pub fn to_active_model(&self, now: DateTime<FixedOffset>) -> post::ActiveModel {
        post::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            status: Set(self.status),
            sfw: Set(false),
            source: Set(self.source.clone()),
            post_type: Set(self.post_type),
            released_at: Set(self.released_at),
            category: Set(self.category.clone()),
            external_id: Set(self.external_id.clone()),
            external_url: Set(self.external_url.clone()),
            source_url: Set(self.source_url.clone()),
            source_category: Set(self.source_category.clone()),
            likes: Set(self.likes),
            summary: Set(self.summary.clone()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub url: String,
}

impl NewLink {
    pub fn to_active_model(&self, post_id: i32, now: DateTime<FixedOffset>) -> link::ActiveModel {
        link::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            post_id: Set(post_id),
            url: Set(self.url.clone()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewText {
    pub title: String,
    pub body: String,
}

impl NewText {
    pub fn to_active_model(&self, post_id: i32, now: DateTime<FixedOffset>) -> text::ActiveModel {
        text::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            post_id: Set(post_id),
            title: Set(self.title.clone()),
            body: Set(self.body.clone()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoto {
    pub caption: String,
    pub external_url: String,
}

impl NewPhoto {
    pub fn to_active_model(&self, post_id: i32, now: DateTime<FixedOffset>) -> photo::ActiveModel {
        photo::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            post_id: Set(post_id),
            caption: Set(self.caption.clone()),
            external_url: Set(self.external_url.clone()),
            sfw: Set(false),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    pub external_url: String,
    pub thumbnail_url: String,
}

impl NewVideo {
    pub fn to_active_model(&self, post_id: i32, now: DateTime<FixedOffset>) -> video::ActiveModel {
        video::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            post_id: Set(post_id),
            external_url: Set(self.external_url.clone()),
            thumbnail_url: Set(self.thumbnail_url.clone()),
            ..Default::default()
        }
    }
}

/// Typed child records of a post, one variant per supported type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostContent {
    Link(NewLink),
    Text(NewText),
    /// One record per attached image; may be empty.
    Photos(Vec<NewPhoto>),
    Video(NewVideo),
}

impl PostContent {
    #[must_use]
    pub fn post_type(&self) -> PostType {
        match self {
            PostContent::Link(_) => PostType::Link,
            PostContent::Text(_) => PostType::Text,
            PostContent::Photos(_) => PostType::Photo,
            PostContent::Video(_) => PostType::Video,
        }
    }

    /// Remote URLs whose bytes get mirrored locally.
    #[must_use]
    pub fn attachment_urls(&self) -> Vec<&str> {
        match self {
            PostContent::Link(_) | PostContent::Text(_) => Vec::new(),
            PostContent::Photos(photos) => {
                photos.iter().map(|p| p.external_url.as_str()).collect()
            }
            PostContent::Video(v) => vec![v.external_url.as_str(), v.thumbnail_url.as_str()],
        }
    }
}

/// A remote post ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPost {
    pub post: NewPost,
    pub content: PostContent,
    /// Tag names to attach; always empty for queued posts.
    pub tags: Vec<String>,
}

/// Map a remote post onto storable records.
///
/// The type tag is checked before the timestamp, so an unsupported post is
/// reported as such even when its date is also malformed.
pub fn classify(
    remote: &RemotePost,
    source: &str,
    status: PostStatus,
) -> Result<ClassifiedPost, ClassifyError> {
    let post_type: PostType = remote
        .post_type
        .parse()
        .map_err(|_| ClassifyError::UnsupportedType(remote.post_type.clone()))?;

    let released_at = parse_remote_timestamp(&remote.date)?;

    let content = match post_type {
        PostType::Link => PostContent::Link(NewLink {
            url: remote.url.clone(),
        }),
        PostType::Text => PostContent::Text(NewText {
            title: remote.title.clone(),
            body: remote.body.clone(),
        }),
        PostType::Photo => PostContent::Photos(
            remote
                .photos
                .iter()
                .map(|p| NewPhoto {
                    caption: p.caption.clone(),
                    external_url: p.original_url.clone(),
                })
                .collect(),
        ),
        PostType::Video => PostContent::Video(NewVideo {
            external_url: remote.video_url.clone(),
            thumbnail_url: remote.thumbnail_url.clone(),
        }),
    };

    let tags = if status == PostStatus::Approved {
        remote.tags.clone()
    } else {
        Vec::new()
    };

    Ok(ClassifiedPost {
        post: NewPost {
            status,
            source: source.to_string(),
            post_type,
            released_at,
            category: remote.blog_name.clone(),
            external_id: remote.id.to_string(),
            external_url: remote.post_url.clone(),
            source_url: remote.source_url.clone(),
            source_category: remote.source_title.clone(),
            likes: remote.note_count,
            summary: remote.summary.clone(),
        },
        content,
        tags,
    })
}

/// Current time as stored in `created_at`/`updated_at`.
pub(crate) fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}
