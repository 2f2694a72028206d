use url::Url;

/// Extracts the host from a URL
///
/// Returns the lowercase host portion of the URL, or None if the URL has
/// no host (which should not happen for valid HTTP(S) URLs).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use quotemill::url::extract_host;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a URL belongs to the given origin host
///
/// The comparison is case-insensitive and ignores the port: a crawl seeded
/// on `example.com` may follow `example.com:8080` pagination but never a
/// different host.
pub fn same_host(url: &Url, origin_host: &str) -> bool {
    extract_host(url)
        .map(|h| h.eq_ignore_ascii_case(origin_host))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_host() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://www.goodreads.com/quotes").unwrap();
        assert_eq!(extract_host(&url), Some("www.goodreads.com".to_string()));
    }

    #[test]
    fn test_extract_host_ignores_port() {
        let url = Url::parse("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(extract_host(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_same_host_match() {
        let url = Url::parse("https://example.com/page/2/").unwrap();
        assert!(same_host(&url, "example.com"));
    }

    #[test]
    fn test_same_host_case_insensitive() {
        let url = Url::parse("https://EXAMPLE.com/").unwrap();
        assert!(same_host(&url, "example.com"));
    }

    #[test]
    fn test_same_host_rejects_other_host() {
        let url = Url::parse("https://other.com/page").unwrap();
        assert!(!same_host(&url, "example.com"));
    }

    #[test]
    fn test_same_host_rejects_subdomain() {
        let url = Url::parse("https://blog.example.com/").unwrap();
        assert!(!same_host(&url, "example.com"));
    }
}
