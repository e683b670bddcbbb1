//! Development header set
//!
//! Permissive CORS plus "never cache" headers, stamped onto every response
//! after the handler has built it.

use hyper::header::{HeaderMap, HeaderName, HeaderValue};

/// The fixed header set, in the order it is written (names lowercase)
pub const DEV_HEADERS: [(&str, &str); 6] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    ("access-control-allow-headers", "*"),
    ("cache-control", "no-cache, no-store, must-revalidate"),
    ("pragma", "no-cache"),
    ("expires", "0"),
];

/// Insert the dev headers, replacing any value the handler set for the same name
pub fn apply_dev_headers(headers: &mut HeaderMap) {
    for (name, value) in DEV_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE};

    #[test]
    fn test_apply_overrides_existing_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("https://a.test"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/css"));

        apply_dev_headers(&mut headers);

        assert_eq!(headers.len(), 7);
        assert_eq!(headers[CACHE_CONTROL], "no-cache, no-store, must-revalidate");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers.get_all(CACHE_CONTROL).iter().count(), 1);
        // handler headers outside the set are untouched
        assert_eq!(headers[CONTENT_TYPE], "text/css");
    }
}
