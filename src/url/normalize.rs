use crate::UrlError;
use url::Url;

/// Normalizes an operator-supplied seed URL
///
/// # Normalization Steps
///
/// 1. Prepend `https://` when no scheme is present
/// 2. Parse the URL; reject if malformed
/// 3. Require an `http` or `https` scheme
/// 4. Require a host
/// 5. Remove the fragment (same-page anchors would defeat the visited set)
///
/// # Arguments
///
/// * `seed` - The seed URL string as typed by the operator
///
/// # Returns
///
/// * `Ok(Url)` - Normalized absolute URL
/// * `Err(UrlError)` - Failed to parse or normalize the URL
///
/// # Examples
///
/// ```
/// use quotemill::url::normalize_seed;
///
/// let url = normalize_seed("quotes.toscrape.com/page/1/").unwrap();
/// assert_eq!(url.as_str(), "https://quotes.toscrape.com/page/1/");
/// ```
pub fn normalize_seed(seed: &str) -> Result<Url, UrlError> {
    let seed = seed.trim();

    let with_scheme = if seed.contains("://") {
        seed.to_string()
    } else {
        format!("https://{}", seed)
    };

    let mut url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}
