//! Tumblr API client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::TumblrError;
use super::oauth::{OAuthCredentials, OAuthSigner};
use super::types::{BlogPosts, Envelope, ErrorEnvelope, Following, Likes};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::platform::{self, BlogPlatform, Page, PageRequest, RemoteBlog, RemotePost};

/// Default API root.
pub const TUMBLR_API_BASE: &str = "https://api.tumblr.com/v2";

/// Value stored in the `source` column for rows from Tumblr.
pub const TUMBLR_SOURCE: &str = "tumblr";

/// Tumblr API client. Every request is OAuth1-signed.
#[derive(Clone)]
pub struct TumblrClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    signer: OAuthSigner,
}

impl TumblrClient {
    /// Create a client backed by reqwest with a 30 second timeout.
    pub fn new(credentials: OAuthCredentials) -> Result<Self, TumblrError> {
        let transport = ReqwestTransport::with_timeout(StdDuration::from_secs(30))
            .map_err(|e| TumblrError::Config(e.to_string()))?;
        Ok(Self::new_with_transport(credentials, Arc::new(transport)))
    }

    pub fn new_with_transport(
        credentials: OAuthCredentials,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            base_url: TUMBLR_API_BASE.to_string(),
            signer: OAuthSigner::new(credentials),
        }
    }

    /// Point the client at another API root (trailing slashes are trimmed).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The HTTP transport, shared with the media downloader.
    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        Arc::clone(&self.transport)
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<String, TumblrError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| TumblrError::Config(format!("invalid API URL for {path}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url.into())
    }

    /// Offset/limit parameters; omitted entirely for probe requests.
    fn page_params(page: PageRequest) -> Vec<(&'static str, String)> {
        if page.is_probe() {
            Vec::new()
        } else {
            vec![
                ("limit", page.limit.to_string()),
                ("offset", page.offset.to_string()),
            ]
        }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TumblrError> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| TumblrError::Http(e.to_string()))?;

        if !response.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&response.body)
                .map(|env| env.meta.msg)
                .unwrap_or_else(|_| String::from_utf8_lossy(&response.body).to_string());
            return Err(TumblrError::Api {
                status: response.status,
                message,
            });
        }
        Ok(response)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TumblrError> {
        let url = self.url(path, query)?;
        let auth = self
            .signer
            .authorization_header(HttpMethod::Get, &url, &[])?;
        let request = HttpRequest::get(url)
            .with_header("Accept", "application/json")
            .with_header("Authorization", auth);

        let response = self.send(request).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&response.body)?;
        Ok(envelope.response)
    }

    async fn post(&self, path: &str, form: &[(&str, &str)]) -> Result<(), TumblrError> {
        let url = self.url(path, &[])?;
        let auth = self
            .signer
            .authorization_header(HttpMethod::Post, &url, form)?;
        let request = HttpRequest::post_form(url, form)
            .with_header("Accept", "application/json")
            .with_header("Authorization", auth);

        self.send(request).await?;
        Ok(())
    }

    /// `GET /blog/{blog}/posts`
    pub async fn blog_posts(&self, blog: &str, page: PageRequest) -> Result<BlogPosts, TumblrError> {
        let mut query = vec![("api_key", self.signer.consumer_key().to_string())];
        query.extend(Self::page_params(page));
        self.get(&format!("/blog/{blog}/posts"), &query).await
    }

    /// `GET /user/likes`
    pub async fn user_likes(&self, page: PageRequest) -> Result<Likes, TumblrError> {
        self.get("/user/likes", &Self::page_params(page)).await
    }

    /// `GET /user/following`
    pub async fn user_following(&self, page: PageRequest) -> Result<Following, TumblrError> {
        self.get("/user/following", &Self::page_params(page)).await
    }

    /// `POST /blog/{blog}/post/delete`
    pub async fn post_delete(&self, blog: &str, id: i64) -> Result<(), TumblrError> {
        let id = id.to_string();
        self.post(&format!("/blog/{blog}/post/delete"), &[("id", &id)])
            .await
    }

    /// `POST /user/unlike`
    pub async fn user_unlike(&self, id: i64, reblog_key: &str) -> Result<(), TumblrError> {
        let id = id.to_string();
        self.post("/user/unlike", &[("id", &id), ("reblog_key", reblog_key)])
            .await
    }

    /// `POST /user/follow`
    pub async fn user_follow(&self, url: &str) -> Result<(), TumblrError> {
        self.post("/user/follow", &[("url", url)]).await
    }
}

#[async_trait]
impl BlogPlatform for TumblrClient {
    fn source_name(&self) -> &'static str {
        TUMBLR_SOURCE
    }

    async fn list_posts(&self, blog: &str, page: PageRequest) -> platform::Result<Page<RemotePost>> {
        let resp = self.blog_posts(blog, page).await?;
        Ok(Page::new(
            resp.total_posts,
            resp.posts.into_iter().map(RemotePost::from).collect(),
        ))
    }

    async fn list_likes(&self, page: PageRequest) -> platform::Result<Page<RemotePost>> {
        let resp = self.user_likes(page).await?;
        Ok(Page::new(
            resp.liked_count,
            resp.liked_posts.into_iter().map(RemotePost::from).collect(),
        ))
    }

    async fn list_following(&self, page: PageRequest) -> platform::Result<Page<RemoteBlog>> {
        let resp = self.user_following(page).await?;
        Ok(Page::new(
            resp.total_blogs,
            resp.blogs.into_iter().map(RemoteBlog::from).collect(),
        ))
    }

    async fn delete_post(&self, blog: &str, id: i64) -> platform::Result<()> {
        Ok(self.post_delete(blog, id).await?)
    }

    async fn unlike(&self, id: i64, reblog_key: &str) -> platform::Result<()> {
        Ok(self.user_unlike(id, reblog_key).await?)
    }

    async fn follow(&self, url: &str) -> platform::Result<()> {
        Ok(self.user_follow(url).await?)
    }
}
