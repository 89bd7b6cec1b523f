//! Träwelling API v1 endpoint URLs

use crate::error::{Error, Result};
use url::Url;

/// Build an absolute URL from the base URL and path segments.
///
/// Segments are percent-encoded, so a username can never change the path shape.
fn build(base_url: &str, segments: &[&str]) -> Result<String> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|()| Error::invalid_value("base_url", format!("'{base_url}' cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

/// Identity endpoint returning the authenticated user
pub fn identity_url(base_url: &str) -> Result<String> {
    build(base_url, &["api", "v1", "auth", "user"])
}

/// Paginated status history of a user (the page goes in the query string)
pub fn statuses_url(base_url: &str, username: &str) -> Result<String> {
    build(base_url, &["api", "v1", "user", username, "statuses"])
}
