//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! Tumblr authenticates every API call with a pre-issued access token; there
//! is no interactive token exchange here.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use percent_encoding::utf8_percent_encode;
use sha1::Sha1;
use url::Url;

use super::error::TumblrError;
use crate::http::{HttpMethod, RFC3986_UNRESERVED};

type HmacSha1 = Hmac<Sha1>;

fn encode(s: &str) -> String {
    utf8_percent_encode(s, RFC3986_UNRESERVED).to_string()
}

/// Consumer and access-token credentials.
#[derive(Clone)]
pub struct OAuthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

impl std::fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

/// Produces `Authorization` header values for signed requests.
#[derive(Debug, Clone)]
pub struct OAuthSigner {
    credentials: OAuthCredentials,
}

impl OAuthSigner {
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self { credentials }
    }

    pub fn consumer_key(&self) -> &str {
        &self.credentials.consumer_key
    }

    /// Sign a request with a fresh nonce and the current time.
    ///
    /// `form` holds url-encoded body parameters, which are part of the
    /// signature base string; query parameters are taken from `url`.
    pub fn authorization_header(
        &self,
        method: HttpMethod,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<String, TumblrError> {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.authorization_header_with(method, url, form, &nonce, &timestamp)
    }

    pub(crate) fn authorization_header_with(
        &self,
        method: HttpMethod,
        url: &str,
        form: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> Result<String, TumblrError> {
        let mut oauth_params = vec![
            ("oauth_consumer_key", self.credentials.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.credentials.token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let signature = self.signature(method, url, form, &oauth_params)?;
        oauth_params.push(("oauth_signature", signature.as_str()));
        oauth_params.sort_unstable();

        let fields = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {fields}"))
    }

    fn signature(
        &self,
        method: HttpMethod,
        url: &str,
        form: &[(&str, &str)],
        oauth_params: &[(&str, &str)],
    ) -> Result<String, TumblrError> {
        let parsed = Url::parse(url).map_err(|e| TumblrError::Config(format!("{url}: {e}")))?;
        let base = signature_base(method, &parsed, form, oauth_params);

        let key = format!(
            "{}&{}",
            encode(&self.credentials.consumer_secret),
            encode(&self.credentials.token_secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| TumblrError::Config(e.to_string()))?;
        mac.update(base.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// `METHOD&base_url&normalized_params`, each part percent-encoded.
fn signature_base(
    method: HttpMethod,
    url: &Url,
    form: &[(&str, &str)],
    oauth_params: &[(&str, &str)],
) -> String {
    let mut base_url = format!(
        "{}://{}",
        url.scheme(),
        url.host_str().unwrap_or_default().to_ascii_lowercase()
    );
    if let Some(port) = url.port() {
        base_url.push_str(&format!(":{port}"));
    }
    base_url.push_str(url.path());

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (encode(&k), encode(&v)))
        .chain(form.iter().map(|(k, v)| (encode(k), encode(v))))
        .chain(oauth_params.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    params.sort();

    let normalized = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.as_str(),
        encode(&base_url),
        encode(&normalized)
    )
}
