//! Conversion from Tumblr wire types to platform-agnostic types.

use crate::platform::{RemoteBlog, RemotePhoto, RemotePost};

use super::types::{TumblrBlog, TumblrPhoto, TumblrPost};

impl From<TumblrPhoto> for RemotePhoto {
    fn from(photo: TumblrPhoto) -> Self {
        Self {
            caption: photo.caption.unwrap_or_default(),
            original_url: photo.original_size.map(|s| s.url).unwrap_or_default(),
        }
    }
}

impl From<TumblrPost> for RemotePost {
    fn from(post: TumblrPost) -> Self {
        Self {
            id: post.id,
            post_type: post.post_type.unwrap_or_default(),
            blog_name: post.blog_name.unwrap_or_default(),
            post_url: post.post_url.unwrap_or_default(),
            source_url: post.source_url.unwrap_or_default(),
            source_title: post.source_title.unwrap_or_default(),
            note_count: post.note_count,
            date: post.date.unwrap_or_default(),
            summary: post.summary.unwrap_or_default(),
            tags: post.tags,
            reblog_key: post.reblog_key.unwrap_or_default(),
            url: post.url.unwrap_or_default(),
            title: post.title.unwrap_or_default(),
            body: post.body.unwrap_or_default(),
            photos: post.photos.into_iter().map(RemotePhoto::from).collect(),
            video_url: post.video_url.unwrap_or_default(),
            thumbnail_url: post.thumbnail_url.unwrap_or_default(),
        }
    }
}

impl From<TumblrBlog> for RemoteBlog {
    fn from(blog: TumblrBlog) -> Self {
        Self {
            name: blog.name,
            url: blog.url,
            title: blog.title.unwrap_or_default(),
            description: blog.description.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tumblr::types::PhotoSize;

    #[test]
    fn test_null_fields_become_empty() {
        let post = TumblrPost {
            id: 9,
            post_type: Some("text".to_string()),
            blog_name: Some("b".to_string()),
            post_url: Some("https://b.tumblr.com/post/9".to_string()),
            source_url: None,
            source_title: None,
            note_count: 0,
            date: None,
            summary: None,
            tags: vec![],
            reblog_key: Some("k".to_string()),
            url: None,
            title: None,
            body: Some("<p>hi</p>".to_string()),
            photos: vec![TumblrPhoto {
                caption: None,
                original_size: Some(PhotoSize {
                    url: "https://x/p.jpg".to_string(),
                    width: None,
                    height: None,
                }),
            }],
            video_url: None,
            thumbnail_url: None,
        };

        let remote = RemotePost::from(post);
        assert_eq!(remote.title, "");
        assert_eq!(remote.body, "<p>hi</p>");
        assert_eq!(remote.source_url, "");
        assert_eq!(remote.date, "");
        assert_eq!(remote.photos[0].caption, "");
        assert_eq!(remote.photos[0].original_url, "https://x/p.jpg");
    }
}
