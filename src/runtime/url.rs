//! Browser locations and route path normalization.
//!
//! - Internal matching: always decoded (human-readable)
//! - Browser boundary: locations stay percent-encoded, as the browser reports them

use std::borrow::Cow;
use std::fmt;

use percent_encoding::percent_decode_str;
use url::Url;

/// An absolute browser location (`window.location`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(Url);

impl Location {
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        Url::parse(href).map(Self)
    }

    /// Resolve `target` relative to this location.
    pub fn join(&self, target: &str) -> Result<Self, url::ParseError> {
        self.0.join(target).map(Self)
    }

    #[inline]
    pub fn href(&self) -> &str {
        self.0.as_str()
    }

    /// Percent-encoded path, always starting with `/`.
    #[inline]
    pub fn pathname(&self) -> &str {
        self.0.path()
    }

    /// Query string without `?`.
    pub fn search(&self) -> Option<&str> {
        self.0.query().filter(|q| !q.is_empty())
    }

    /// Fragment identifier without `#`.
    pub fn hash(&self) -> Option<&str> {
        self.0.fragment().filter(|f| !f.is_empty())
    }

    /// Address shown in the URL bar for this location: normalized path plus
    /// query and fragment (`/blog/?a=1#top` -> `/blog?a=1#top`).
    pub fn display(&self) -> String {
        let mut shown = normalize_route_path(self.pathname()).to_string();
        if let Some(search) = self.search() {
            shown.push('?');
            shown.push_str(search);
        }
        if let Some(hash) = self.hash() {
            shown.push('#');
            shown.push_str(hash);
        }
        shown
    }

    /// Same origin and same URL-bar address, so `/blog/` matches `/blog`.
    pub fn same_address(&self, other: &Location) -> bool {
        self.0.origin() == other.0.origin() && self.display() == other.display()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.href())
    }
}

/// Strip one trailing `/` or `/index`; an empty result is the root.
///
/// `/blog/` -> `/blog`, `/blog/index` -> `/blog`, `/` -> `/`
pub fn normalize_route_path(path: &str) -> &str {
    for suffix in ["/", "/index"] {
        if let Some(stripped) = path.strip_suffix(suffix) {
            return if stripped.is_empty() { "/" } else { stripped };
        }
    }
    if path.is_empty() { "/" } else { path }
}

/// Decode percent-encoding, keeping the input when it is not valid UTF-8.
pub fn decode(encoded: &str) -> Cow<'_, str> {
    percent_decode_str(encoded)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(encoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(href: &str) -> Location {
        Location::parse(href).unwrap()
    }

    #[test]
    fn test_normalize_route_path() {
        assert_eq!(normalize_route_path("/"), "/");
        assert_eq!(normalize_route_path(""), "/");
        assert_eq!(normalize_route_path("/index"), "/");
        assert_eq!(normalize_route_path("/blog/"), "/blog");
        assert_eq!(normalize_route_path("/blog/index"), "/blog");
        assert_eq!(normalize_route_path("/blog/post"), "/blog/post");
        assert_eq!(normalize_route_path("/reindex"), "/reindex");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("/caf%C3%A9"), "/café");
        assert_eq!(decode("/plain"), "/plain");
        assert_eq!(decode("/bad%FF"), "/bad%FF");
    }

    #[test]
    fn test_location_parts() {
        let location = at("http://localhost:3000/blog/?page=2#intro");
        assert_eq!(location.pathname(), "/blog/");
        assert_eq!(location.search(), Some("page=2"));
        assert_eq!(location.hash(), Some("intro"));
        assert_eq!(location.display(), "/blog?page=2#intro");
    }

    #[test]
    fn test_location_join() {
        let location = at("http://localhost/blog/post");
        assert_eq!(location.join("/about").unwrap().href(), "http://localhost/about");
        assert_eq!(location.join("other").unwrap().pathname(), "/blog/other");
        assert_eq!(location.join("#top").unwrap().hash(), Some("top"));
    }

    #[test]
    fn test_empty_hash_is_none() {
        assert_eq!(at("http://localhost/a#").hash(), None);
        assert_eq!(at("http://localhost/a?").search(), None);
    }

    #[test]
    fn test_same_address() {
        let blog = at("http://localhost/blog");
        assert!(blog.same_address(&at("http://localhost/blog/")));
        assert!(blog.same_address(&at("http://localhost/blog/index")));
        assert!(!blog.same_address(&at("http://localhost/blog#top")));
        assert!(!blog.same_address(&at("http://localhost/blog?page=2")));
        assert!(!blog.same_address(&at("http://example.com/blog")));
    }
}
