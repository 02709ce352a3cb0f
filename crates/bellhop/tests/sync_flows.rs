//! End-to-end tests for the three sync flows against in-memory SQLite, a
//! recording fake platform and a fake HTTP transport for media downloads.
//!
//! Key scenarios tested:
//! - Re-running content sync creates no duplicates and no extra remote calls
//! - Photo posts fan out to one row and one file per attachment
//! - A bad attachment URL leaves no rows and no files
//! - Pagination requests offsets 0, 20, 40 for 45 items
//! - Subscription import replaces, export replays in insertion order

#![cfg(all(feature = "sqlite", feature = "migrate"))]

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bellhop::connect_and_migrate;
use bellhop::entity::post_status::PostStatus;
use bellhop::entity::post_type::PostType;
use bellhop::entity::subscription;
use bellhop::http::{HttpError, HttpRequest, HttpResponse, HttpTransport};
use bellhop::media::{Downloader, MediaStore};
use bellhop::platform::{
    BlogPlatform, Page, PageRequest, PlatformError, RemoteBlog, RemotePhoto, RemotePost, Result,
};
use bellhop::repository;
use bellhop::sync::{Collection, ProgressCallback, SyncError, SyncProgress, Syncer};
use bellhop::{Photo, Video};
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use tempfile::TempDir;

const BLOG: &str = "someblog";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    ListPosts(PageRequest),
    ListLikes(PageRequest),
    ListFollowing(PageRequest),
    Delete(i64),
    Unlike(i64, String),
    Follow(String),
}

/// In-memory remote service. Collections are sliced by offset/limit and the
/// total is the collection length. Clones share the call log.
#[derive(Clone, Default)]
struct FakePlatform {
    posts: Vec<RemotePost>,
    likes: Vec<RemotePost>,
    following: Vec<RemoteBlog>,
    failing_follows: HashSet<String>,
    fail_mutations: bool,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakePlatform {
    fn record(&self, call: Call) {
        self.calls.lock().expect("lock").push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    fn slice<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
        let total = items.len() as u64;
        if page.is_probe() {
            return Page::new(total, Vec::new());
        }
        let start = (page.offset as usize).min(items.len());
        let end = (start + page.limit as usize).min(items.len());
        Page::new(total, items[start..end].to_vec())
    }

    fn mutation(&self) -> Result<()> {
        if self.fail_mutations {
            Err(PlatformError::api(403, "mutation rejected"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BlogPlatform for FakePlatform {
    fn source_name(&self) -> &'static str {
        "tumblr"
    }

    async fn list_posts(&self, blog: &str, page: PageRequest) -> Result<Page<RemotePost>> {
        assert_eq!(blog, BLOG);
        self.record(Call::ListPosts(page));
        Ok(FakePlatform::slice(&self.posts, page))
    }

    async fn list_likes(&self, page: PageRequest) -> Result<Page<RemotePost>> {
        self.record(Call::ListLikes(page));
        Ok(FakePlatform::slice(&self.likes, page))
    }

    async fn list_following(&self, page: PageRequest) -> Result<Page<RemoteBlog>> {
        self.record(Call::ListFollowing(page));
        Ok(FakePlatform::slice(&self.following, page))
    }

    async fn delete_post(&self, blog: &str, id: i64) -> Result<()> {
        assert_eq!(blog, BLOG);
        self.record(Call::Delete(id));
        self.mutation()
    }

    async fn unlike(&self, id: i64, reblog_key: &str) -> Result<()> {
        self.record(Call::Unlike(id, reblog_key.to_string()));
        self.mutation()
    }

    async fn follow(&self, url: &str) -> Result<()> {
        self.record(Call::Follow(url.to_string()));
        if self.failing_follows.contains(url) {
            return Err(PlatformError::transport("connection reset"));
        }
        Ok(())
    }
}

/// Serves every GET with the URL as the body, except URLs marked missing.
#[derive(Default)]
struct FakeMedia {
    missing: HashSet<String>,
    fetched: Mutex<Vec<String>>,
}

#[async_trait]
impl HttpTransport for FakeMedia {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, HttpError> {
        self.fetched.lock().expect("lock").push(request.url.clone());
        let status = if self.missing.contains(&request.url) {
            404
        } else {
            200
        };
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: request.url.into_bytes(),
        })
    }
}

struct Harness {
    db: Arc<DatabaseConnection>,
    platform: FakePlatform,
    media: Arc<FakeMedia>,
    dir: TempDir,
}

impl Harness {
    async fn new(platform: FakePlatform) -> Self {
        Self::with_media(platform, FakeMedia::default()).await
    }

    async fn with_media(platform: FakePlatform, media: FakeMedia) -> Self {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Self {
            db: Arc::new(db),
            platform,
            media: Arc::new(media),
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    fn media_root(&self) -> &Path {
        self.dir.path()
    }

    fn syncer(&self) -> Syncer<FakePlatform> {
        Syncer::builder()
            .platform(self.platform.clone())
            .database(Arc::clone(&self.db))
            .media_store(MediaStore::new(self.media_root()))
            .downloader(Downloader::new(self.media.clone()))
            .blog(BLOG)
            .build()
            .expect("build syncer")
    }

    fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.media_root())
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    async fn post_count(&self) -> u64 {
        repository::posts::count(&self.db).await.expect("count")
    }
}

fn remote(id: i64, post_type: &str) -> RemotePost {
    RemotePost {
        id,
        post_type: post_type.to_string(),
        blog_name: BLOG.to_string(),
        post_url: format!("https://{BLOG}.tumblr.com/post/{id}"),
        date: "2024-05-06 07:08:09 GMT".to_string(),
        reblog_key: format!("key{id}"),
        ..RemotePost::default()
    }
}

fn text(id: i64) -> RemotePost {
    RemotePost {
        title: format!("title {id}"),
        body: format!("body {id}"),
        ..remote(id, "text")
    }
}

fn photo(id: i64, urls: &[&str]) -> RemotePost {
    RemotePost {
        photos: urls
            .iter()
            .enumerate()
            .map(|(i, u)| RemotePhoto {
                caption: format!("caption {i}"),
                original_url: (*u).to_string(),
            })
            .collect(),
        ..remote(id, "photo")
    }
}

fn video(id: i64) -> RemotePost {
    RemotePost {
        video_url: format!("https://va.media.example.com/{id}.mp4"),
        thumbnail_url: format!("https://media.example.com/{id}_thumb.jpg"),
        ..remote(id, "video")
    }
}

fn blog(name: &str) -> RemoteBlog {
    RemoteBlog {
        name: name.to_string(),
        url: format!("https://{name}.tumblr.com/"),
        title: format!("{name} title"),
        description: String::new(),
    }
}

async fn add_subscription(db: &DatabaseConnection, name: &str) {
    let now = Utc::now().fixed_offset();
    repository::subscriptions::insert(
        db,
        subscription::ActiveModel {
            created_at: Set(now),
            updated_at: Set(now),
            blog_name: Set(name.to_string()),
            source: Set("tumblr".to_string()),
            url: Set(format!("https://{name}.tumblr.com/")),
            description: Set(String::new()),
            title: Set(name.to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("insert subscription");
}

async fn tag_names(db: &DatabaseConnection, post_id: i32) -> Vec<String> {
    let mut names: Vec<String> = repository::tags::tags_for_post(db, post_id)
        .await
        .expect("tags")
        .into_iter()
        .map(|t| t.name)
        .collect();
    names.sort();
    names
}

// ─── Content sync ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_content_sync_is_idempotent() {
    let h = Harness::new(FakePlatform {
        posts: vec![text(1), photo(2, &["https://media.example.com/2.jpg"]), video(3)],
        likes: vec![text(10), remote(11, "link")],
        ..FakePlatform::default()
    })
    .await;

    let first = h.syncer().sync_content().await.expect("first sync");
    assert_eq!(first.saved(), 5);
    assert_eq!(first.failed(), 0);
    assert_eq!(h.post_count().await, 5);
    let files_after_first = h.files();
    let calls_after_first = h.platform.calls().len();

    let second = h.syncer().sync_content().await.expect("second sync");
    assert_eq!(second.saved(), 0);
    assert_eq!(second.posts.skipped_existing, 3);
    assert_eq!(second.likes.skipped_existing, 2);
    assert_eq!(h.post_count().await, 5);
    assert_eq!(h.files(), files_after_first);

    let new_calls = &h.platform.calls()[calls_after_first..];
    assert!(
        new_calls
            .iter()
            .all(|c| matches!(c, Call::ListPosts(_) | Call::ListLikes(_))),
        "already stored items must not be mutated remotely: {new_calls:?}"
    );
}

#[tokio::test]
async fn test_photo_post_fans_out_per_attachment() {
    let urls = [
        "https://media.example.com/a.jpg",
        "https://media.example.com/b.png",
        "https://media.example.com/c",
    ];
    let h = Harness::new(FakePlatform {
        posts: vec![photo(7, &urls)],
        ..FakePlatform::default()
    })
    .await;

    let report = h.syncer().sync_content().await.expect("sync");
    assert_eq!(report.posts.saved, 1);

    let post = repository::posts::find_by_external_id(&h.db, "tumblr", "7")
        .await
        .expect("query")
        .expect("post stored");
    assert_eq!(post.post_type, PostType::Photo);

    let photos = repository::media::photos_for_post(&h.db, post.id)
        .await
        .expect("photos");
    assert_eq!(photos.len(), 3);
    assert!(photos.iter().all(|p| p.post_id == post.id && !p.sfw));
    assert_eq!(
        photos.iter().map(|p| p.external_url.as_str()).collect::<Vec<_>>(),
        urls
    );

    let expected: Vec<String> = {
        let mut names = vec![
            format!("photo_{}.jpg", photos[0].id),
            format!("photo_{}.png", photos[1].id),
            format!("photo_{}", photos[2].id),
        ];
        names.sort();
        names
    };
    assert_eq!(h.files(), expected);

    let first = std::fs::read(h.media_root().join(format!("photo_{}.jpg", photos[0].id)))
        .expect("read file");
    assert_eq!(first, urls[0].as_bytes());
}

#[tokio::test]
async fn test_video_post_writes_video_and_thumbnail() {
    let h = Harness::new(FakePlatform {
        posts: vec![video(30)],
        ..FakePlatform::default()
    })
    .await;

    h.syncer().sync_content().await.expect("sync");

    let videos = Video::find().all(&*h.db).await.expect("videos");
    assert_eq!(videos.len(), 1);
    let id = videos[0].id;
    assert_eq!(
        h.files(),
        vec![format!("video_{id}.mp4"), format!("video_{id}_thumbnail.jpg")]
    );
}

#[tokio::test]
async fn test_bad_attachment_url_writes_nothing() {
    let h = Harness::new(FakePlatform {
        posts: vec![
            photo(1, &["https://media.example.com/ok.jpg", ""]),
            photo(2, &["not a url"]),
            text(3),
        ],
        ..FakePlatform::default()
    })
    .await;

    let report = h.syncer().sync_content().await.expect("sync");
    assert_eq!(report.posts.saved, 1);
    assert_eq!(report.posts.failed, 2);
    assert_eq!(report.posts.errors.len(), 2);

    assert_eq!(h.post_count().await, 1);
    assert!(Photo::find().all(&*h.db).await.expect("photos").is_empty());
    assert!(h.files().is_empty());
    assert!(h.media.fetched.lock().expect("lock").is_empty());

    let deletes: Vec<_> = h
        .platform
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Delete(_)))
        .collect();
    assert_eq!(deletes, vec![Call::Delete(3)]);
}

#[tokio::test]
async fn test_download_failure_keeps_row_and_fails_item() {
    let missing = "https://media.example.com/gone.jpg".to_string();
    let h = Harness::with_media(
        FakePlatform {
            posts: vec![photo(5, &["https://media.example.com/here.jpg", &missing])],
            ..FakePlatform::default()
        },
        FakeMedia {
            missing: HashSet::from([missing.clone()]),
            ..FakeMedia::default()
        },
    )
    .await;

    let report = h.syncer().sync_content().await.expect("sync");
    assert_eq!(report.posts.saved, 0);
    assert_eq!(report.posts.failed, 1);

    // No rollback: the post, both photo rows attempted so far and the first
    // file remain.
    assert_eq!(h.post_count().await, 1);
    assert_eq!(Photo::find().all(&*h.db).await.expect("photos").len(), 2);
    assert_eq!(h.files().len(), 1);
    assert!(!h.platform.calls().iter().any(|c| matches!(c, Call::Delete(_))));
}

#[tokio::test]
async fn test_pagination_covers_declared_total() {
    let h = Harness::new(FakePlatform {
        posts: (1..=45).map(text).collect(),
        ..FakePlatform::default()
    })
    .await;

    let report = h.syncer().sync_content().await.expect("sync");
    assert_eq!(report.posts.total, 45);
    assert_eq!(report.posts.fetched, 45);
    assert_eq!(report.posts.saved, 45);

    let offsets: Vec<(u64, u64)> = h
        .platform
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::ListPosts(p) => Some((p.offset, p.limit)),
            _ => None,
        })
        .collect();
    assert_eq!(offsets, vec![(0, 0), (0, 20), (20, 20), (40, 20)]);

    let likes: Vec<_> = h
        .platform
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::ListLikes(_)))
        .collect();
    assert_eq!(likes, vec![Call::ListLikes(PageRequest::probe())]);
}

#[tokio::test]
async fn test_remote_cleanup_after_save() {
    let h = Harness::new(FakePlatform {
        posts: vec![text(1), text(2)],
        likes: vec![text(20)],
        ..FakePlatform::default()
    })
    .await;

    h.syncer().sync_content().await.expect("sync");

    let mutations: Vec<Call> = h
        .platform
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Delete(_) | Call::Unlike(..)))
        .collect();
    assert_eq!(
        mutations,
        vec![
            Call::Delete(1),
            Call::Delete(2),
            Call::Unlike(20, "key20".to_string()),
        ]
    );

    let liked = repository::posts::find_by_external_id(&h.db, "tumblr", "20")
        .await
        .expect("query")
        .expect("liked post stored");
    assert_eq!(liked.status, PostStatus::Queued);
    let own = repository::posts::find_by_external_id(&h.db, "tumblr", "1")
        .await
        .expect("query")
        .expect("own post stored");
    assert_eq!(own.status, PostStatus::Approved);
}

#[tokio::test]
async fn test_remote_cleanup_failures_are_counted_not_fatal() {
    let h = Harness::new(FakePlatform {
        posts: vec![text(1)],
        likes: vec![text(2)],
        fail_mutations: true,
        ..FakePlatform::default()
    })
    .await;

    let report = h.syncer().sync_content().await.expect("sync");
    assert_eq!(report.saved(), 2);
    assert_eq!(report.posts.remote_mutation_failures, 1);
    assert_eq!(report.likes.remote_mutation_failures, 1);
    assert_eq!(report.failed(), 0);
}

#[tokio::test]
async fn test_tags_attached_for_approved_posts_only() {
    let tagged = |id: i64| RemotePost {
        tags: vec!["cats".to_string(), "art".to_string(), "cats".to_string()],
        ..text(id)
    };
    let h = Harness::new(FakePlatform {
        posts: vec![tagged(1), tagged(2)],
        likes: vec![tagged(3)],
        ..FakePlatform::default()
    })
    .await;

    h.syncer().sync_content().await.expect("sync");

    let one = repository::posts::find_by_external_id(&h.db, "tumblr", "1")
        .await
        .expect("query")
        .expect("post 1");
    let two = repository::posts::find_by_external_id(&h.db, "tumblr", "2")
        .await
        .expect("query")
        .expect("post 2");
    let liked = repository::posts::find_by_external_id(&h.db, "tumblr", "3")
        .await
        .expect("query")
        .expect("post 3");

    assert_eq!(tag_names(&h.db, one.id).await, vec!["art", "cats"]);
    assert_eq!(tag_names(&h.db, two.id).await, vec!["art", "cats"]);
    assert!(tag_names(&h.db, liked.id).await.is_empty());

    let all_tags = bellhop::Tag::find().all(&*h.db).await.expect("tags");
    assert_eq!(all_tags.len(), 2);
}

#[tokio::test]
async fn test_unsupported_and_undated_posts_are_skipped() {
    let h = Harness::new(FakePlatform {
        posts: vec![
            remote(1, "quote"),
            RemotePost {
                date: "last tuesday".to_string(),
                ..text(2)
            },
            text(3),
        ],
        ..FakePlatform::default()
    })
    .await;

    let report = h.syncer().sync_content().await.expect("sync");
    assert_eq!(report.posts.saved, 1);
    assert_eq!(report.posts.failed, 2);
    assert!(report.posts.errors[0].contains("unsupported post type: quote"));
    assert!(report.posts.errors[1].contains("invalid timestamp"));
    assert_eq!(h.post_count().await, 1);

    // Unsaved items stay on the remote side for the next run.
    let deletes: Vec<_> = h
        .platform
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Delete(_)))
        .collect();
    assert_eq!(deletes, vec![Call::Delete(3)]);
}

#[tokio::test]
async fn test_content_sync_emits_progress() {
    let h = Harness::new(FakePlatform {
        posts: vec![text(1)],
        likes: vec![text(1)],
        ..FakePlatform::default()
    })
    .await;

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let callback: ProgressCallback = Box::new(move |event| {
        sink.lock().expect("lock").push(event);
    });
    let syncer = Syncer::builder()
        .platform(h.platform.clone())
        .database(Arc::clone(&h.db))
        .media_store(MediaStore::new(h.media_root()))
        .downloader(Downloader::new(h.media.clone()))
        .blog(BLOG)
        .progress(Arc::new(callback))
        .build()
        .expect("build");

    syncer.sync_content().await.expect("sync");

    let events = events.lock().expect("lock");
    assert!(events.iter().any(|e| matches!(
        e,
        SyncProgress::SavedPost { collection: Collection::BlogPosts, external_id, .. } if external_id == "1"
    )));
    // The liked copy shares the external id, so it is deduplicated.
    assert!(events.iter().any(|e| matches!(
        e,
        SyncProgress::SkippedExisting { collection: Collection::Likes, .. }
    )));
    assert!(matches!(
        events.last(),
        Some(SyncProgress::CollectionComplete {
            collection: Collection::Likes,
            ..
        })
    ));
}

// ─── Subscriptions ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_import_replaces_existing_subscriptions() {
    let h = Harness::new(FakePlatform {
        following: (0..23).map(|i| blog(&format!("blog{i}"))).collect(),
        ..FakePlatform::default()
    })
    .await;
    for name in ["a", "b", "c", "d", "e"] {
        add_subscription(&h.db, name).await;
    }

    let report = h.syncer().import_subscriptions().await.expect("import");
    assert_eq!(report.removed, 5);
    assert_eq!(report.total, 23);
    assert_eq!(report.saved, 23);

    let subs = repository::subscriptions::list(&h.db).await.expect("list");
    assert_eq!(subs.len(), 23);
    assert_eq!(subs[0].blog_name, "blog0");
    assert_eq!(subs[22].blog_name, "blog22");
    assert!(subs.iter().all(|s| s.source == "tumblr"));
    assert_eq!(subs[0].url, "https://blog0.tumblr.com/");
}

#[tokio::test]
async fn test_export_follows_in_insertion_order() {
    let h = Harness::new(FakePlatform::default()).await;
    for name in ["zeta", "alpha", "mid"] {
        add_subscription(&h.db, name).await;
    }

    let report = h.syncer().export_subscriptions().await.expect("export");
    assert_eq!(report.total, 3);
    assert_eq!(report.followed, 3);
    assert_eq!(
        h.platform.calls(),
        vec![
            Call::Follow("https://zeta.tumblr.com/".to_string()),
            Call::Follow("https://alpha.tumblr.com/".to_string()),
            Call::Follow("https://mid.tumblr.com/".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_export_stops_at_failed_follow() {
    let h = Harness::new(FakePlatform {
        failing_follows: HashSet::from(["https://b.tumblr.com/".to_string()]),
        ..FakePlatform::default()
    })
    .await;
    for name in ["a", "b", "c"] {
        add_subscription(&h.db, name).await;
    }

    let err = h
        .syncer()
        .export_subscriptions()
        .await
        .expect_err("follow failure is fatal");
    assert!(matches!(err, SyncError::Platform(PlatformError::Transport { .. })));
    assert_eq!(h.platform.calls().len(), 2);
}
