//! Target URL validation.

use url::Url;

/// Parses `input` as an absolute `http` or `https` URL.
///
/// Accepts any string without panicking. The parser strips embedded tabs and
/// newlines and percent-encodes other control characters, so the serialized
/// form (`Url::as_str`) is always a valid `Location` header value.
///
/// # Examples
///
/// ```ignore
/// assert!(parse_http_url("https://example.com/a").is_some());
/// assert!(parse_http_url("ftp://example.com").is_none());
/// assert!(parse_http_url("not-a-url").is_none());
/// ```
pub fn parse_http_url(input: &str) -> Option<Url> {
    Url::parse(input)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid_url(input: &str) -> bool {
        parse_http_url(input).is_some()
    }

    #[test]
    fn test_accepts_http_and_https() {
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("https://example.com/a?b=c#d"));
        assert!(is_valid_url("HTTPS://EXAMPLE.COM:8443/Path"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("javascript:alert(1)"));
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("file:///etc/passwd"));
    }

    #[test]
    fn test_rejects_relative_and_garbage() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("/relative/path"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("\u{0}\u{1}"));
    }

    #[test]
    fn test_parse_normalizes_control_characters() {
        let url = parse_http_url("https://example.com/a\nb\tc").unwrap();
        assert_eq!(url.as_str(), "https://example.com/abc");

        let url = parse_http_url("https://example.com/a\u{7}b").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a%07b");
        assert!(axum::http::HeaderValue::from_str(url.as_str()).is_ok());
    }

    #[test]
    fn test_parse_serializes_root_path() {
        let url = parse_http_url("HTTPS://Example.COM").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }
}
