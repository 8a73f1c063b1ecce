//! Source-URL validation helpers

use crate::error::FbgetError;
use url::Url;

/// Validate that a submitted link is a syntactically plausible media page URL.
///
/// Accepts any absolute http(s) URL with a host. The resolver does not care
/// which site the page lives on, only that the input could be fetched.
pub fn validate_source_url(raw: &str) -> Result<Url, FbgetError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FbgetError::InvalidInput(
            "Please paste a media link first".to_string(),
        ));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| FbgetError::InvalidInput(format!("Not a valid link: {}", e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FbgetError::InvalidInput(format!(
            "Unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none() {
        return Err(FbgetError::InvalidInput("Link has no host".to_string()));
    }

    Ok(parsed)
}

/// Extract a short tag identifying the source site, e.g.
/// `https://www.facebook.com/watch/?v=1` -> `facebook`.
pub fn source_tag(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.split('.').next().map(str::to_string)
}

/// Source tag of a raw link, if it validates
pub fn source_tag_of(raw: &str) -> Option<String> {
    validate_source_url(raw).ok().as_ref().and_then(source_tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_source_url() {
        assert!(validate_source_url("https://www.facebook.com/watch/?v=123").is_ok());
        assert!(validate_source_url("http://example.com/clip").is_ok());

        // Surrounding whitespace is tolerated
        assert!(validate_source_url("  https://example.com/watch?v=1  ").is_ok());
    }

    #[test]
    fn test_validate_source_url_rejects_blank() {
        assert!(validate_source_url("").is_err());
        assert!(validate_source_url("   ").is_err());
    }

    #[test]
    fn test_validate_source_url_rejects_malformed() {
        assert!(validate_source_url("not-a-url").is_err());
        assert!(validate_source_url("ftp://example.com/file").is_err());
        assert!(validate_source_url("https://").is_err());
    }

    #[test]
    fn test_source_tag() {
        let url = Url::parse("https://www.facebook.com/watch/?v=1").unwrap();
        assert_eq!(source_tag(&url).unwrap(), "facebook");

        let url = Url::parse("https://example.com/watch?v=1").unwrap();
        assert_eq!(source_tag(&url).unwrap(), "example");
    }

    #[test]
    fn test_source_tag_of_raw_input() {
        assert_eq!(
            source_tag_of("https://www.facebook.com/watch/?v=1").unwrap(),
            "facebook"
        );
        assert_eq!(source_tag_of("not a link"), None);
        assert_eq!(source_tag_of(""), None);
    }
}
