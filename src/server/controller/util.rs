use axum::http::{HeaderMap, HeaderValue};

/// Set when a response contains data pulled from upstream by this request, so
/// clients can tell freshly synced data from previously stored data.
pub static AUTO_FETCHED_HEADER: &str = "x-auto-fetched";

pub fn auto_fetched_headers(fetched: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if fetched {
        headers.insert(AUTO_FETCHED_HEADER, HeaderValue::from_static("true"));
    }
    headers
}
