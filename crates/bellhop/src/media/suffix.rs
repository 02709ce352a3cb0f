use std::sync::LazyLock;

use regex::Regex;

/// `http(s)://host/.../name.ext[?query]`, capturing `ext` (2 to 6 alphanumerics).
static SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://).+/.+\.([a-zA-Z0-9]{2,6})(?:[?#].*)?$")
        .expect("Invalid suffix regex")
});

/// File extension of the resource a URL points at, including the leading dot.
///
/// Returns an empty string when the URL has no path segment or no
/// recognizable extension.
#[must_use]
pub fn derive_suffix(url: &str) -> String {
    SUFFIX_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|ext| format!(".{}", ext.as_str()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path() {
        assert_eq!(derive_suffix("http://x/a/b/name.jpg"), ".jpg");
        assert_eq!(
            derive_suffix("https://64.media.tumblr.com/abc/tumblr_o1_1280.png"),
            ".png"
        );
    }

    #[test]
    fn test_query_and_fragment_are_ignored() {
        assert_eq!(derive_suffix("http://x/name.jpeg?q=1#f"), ".jpeg");
        assert_eq!(derive_suffix("https://x/clip.mp4#t=10"), ".mp4");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(derive_suffix("http://x"), "");
        assert_eq!(derive_suffix("http://x/"), "");
        assert_eq!(derive_suffix("https://x/video/12345"), "");
    }

    #[test]
    fn test_not_a_url() {
        assert_eq!(derive_suffix("not a url"), "");
        assert_eq!(derive_suffix("ftp://x/name.jpg"), "");
        assert_eq!(derive_suffix(""), "");
    }

    #[test]
    fn test_extension_length_bounds() {
        assert_eq!(derive_suffix("http://x/name.a"), "");
        assert_eq!(derive_suffix("http://x/name.abcdefg"), "");
        assert_eq!(derive_suffix("http://x/name.webm"), ".webm");
    }
}
