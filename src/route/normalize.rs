//! Source path -> canonical route path.
//!
//! # Examples
//!
//! ```text
//! index.tsx            -> /           (slug: index, /index.html, /index.rsc)
//! about.mdx            -> /about      (slug: about, /about.html, /about.rsc)
//! blog/index.tsx       -> /blog       (slug: blog,  /blog.html,  /blog.rsc)
//! one/two/page.md      -> /one/two/page
//! ```

use super::RouteError;

/// Recognized page source extensions (without the dot).
pub const PAGE_EXTENSIONS: &[&str] = &["tsx", "mdx", "ts", "jsx", "js", "md"];

/// Canonical path of the root route.
pub const ROOT_PATH: &str = "/";

/// Slug used for the root route.
pub const ROOT_SLUG: &str = "index";

/// Suffix of document addresses.
pub const DOCUMENT_SUFFIX: &str = ".html";

/// Suffix of fragment addresses.
pub const FRAGMENT_SUFFIX: &str = ".rsc";

/// Characters that cannot appear in a page path, in addition to whitespace.
///
/// Bundlers emit such file names verbatim, so they can never be matched back to a URL.
const DISALLOWED_CHARS: &[char] = &['\\', '?', '#', ':', '*', '<', '>', '|', '!', '$', '%'];

const INDEX_STEM: &str = "index";

/// A validated, canonicalized page path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
    pub path: String,
    pub slug: String,
    pub document: String,
    pub fragment: String,
}

impl NormalizedPath {
    #[inline]
    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }

    /// Number of `/`-separated segments (root has zero).
    pub fn depth(&self) -> usize {
        self.path.split('/').filter(|s| !s.is_empty()).count()
    }
}

/// Check whether a file name carries a recognized page extension.
pub fn is_page_file(file: &str) -> bool {
    PAGE_EXTENSIONS.iter().any(|ext| {
        file.strip_suffix(ext)
            .is_some_and(|rest| rest.ends_with('.') && rest.len() > 1)
    })
}

/// Remove a recognized page extension, leaving other paths untouched.
pub fn strip_extension(file: &str) -> &str {
    PAGE_EXTENSIONS
        .iter()
        .find_map(|ext| file.strip_suffix(ext)?.strip_suffix('.'))
        .unwrap_or(file)
}

/// Validate and canonicalize one base-relative page path.
pub fn normalize(raw: &str) -> Result<NormalizedPath, RouteError> {
    if let Some(ch) = raw
        .chars()
        .find(|c| c.is_whitespace() || DISALLOWED_CHARS.contains(c))
    {
        return Err(RouteError::Validation {
            path: raw.to_string(),
            ch,
        });
    }

    let stem = strip_extension(raw).trim_start_matches('/');
    if stem.is_empty() {
        return Err(RouteError::EmptyPath);
    }

    let stem = if stem == INDEX_STEM {
        ""
    } else {
        stem.strip_suffix("/index").unwrap_or(stem)
    };

    if stem.is_empty() {
        return Ok(root());
    }

    let slug = stem.rsplit('/').next().unwrap_or(stem);
    Ok(NormalizedPath {
        path: format!("/{stem}"),
        slug: slug.to_string(),
        document: format!("/{stem}{DOCUMENT_SUFFIX}"),
        fragment: format!("/{stem}{FRAGMENT_SUFFIX}"),
    })
}

/// The root route. Addresses use an explicit index file name, never a bare `/`.
pub(super) fn root() -> NormalizedPath {
    NormalizedPath {
        path: ROOT_PATH.to_string(),
        slug: ROOT_SLUG.to_string(),
        document: format!("/{INDEX_STEM}{DOCUMENT_SUFFIX}"),
        fragment: format!("/{INDEX_STEM}{FRAGMENT_SUFFIX}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("index.tsx"), "index");
        assert_eq!(strip_extension("blog/[slug].tsx"), "blog/[slug]");
        assert_eq!(strip_extension("notes.md"), "notes");
        assert_eq!(strip_extension("notes.mdx"), "notes");
        assert_eq!(strip_extension("style.css"), "style.css");
        assert_eq!(strip_extension("README"), "README");
    }

    #[test]
    fn test_is_page_file() {
        assert!(is_page_file("index.tsx"));
        assert!(is_page_file("blog/post.md"));
        assert!(!is_page_file("style.css"));
        assert!(!is_page_file("tsx"));
        assert!(!is_page_file(".md"));
    }

    #[test]
    fn test_normalize_root() {
        let root = normalize("index.tsx").unwrap();
        assert!(root.is_root());
        assert_eq!(root.slug, ROOT_SLUG);
        assert_eq!(root.document, "/index.html");
        assert_eq!(root.fragment, "/index.rsc");
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_normalize_page() {
        let page = normalize("one/two/page.md").unwrap();
        assert_eq!(page.path, "/one/two/page");
        assert_eq!(page.slug, "page");
        assert_eq!(page.document, "/one/two/page.html");
        assert_eq!(page.fragment, "/one/two/page.rsc");
        assert_eq!(page.depth(), 3);
    }

    #[test]
    fn test_normalize_directory_index() {
        let blog = normalize("blog/index.js").unwrap();
        assert_eq!(blog.path, "/blog");
        assert_eq!(blog.slug, "blog");
        assert_eq!(blog.document, "/blog.html");
        assert_eq!(blog.fragment, "/blog.rsc");
    }

    #[test]
    fn test_index_only_collapses_as_last_segment() {
        let page = normalize("index/about.tsx").unwrap();
        assert_eq!(page.path, "/index/about");

        let page = normalize("reindex.tsx").unwrap();
        assert_eq!(page.path, "/reindex");
    }

    #[test]
    fn test_normalize_rejects_disallowed_chars() {
        for raw in [
            "my page.tsx",
            "tab\there.tsx",
            "a\\b.tsx",
            "what?.tsx",
            "c#.md",
            "a:b.tsx",
            "glob*.tsx",
            "<x>.tsx",
            "pipe|.tsx",
            "bang!.tsx",
            "$dollar.tsx",
            "100%.tsx",
        ] {
            match normalize(raw) {
                Err(RouteError::Validation { path, .. }) => assert_eq!(path, raw),
                other => panic!("expected validation error for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_normalize_reports_offending_char() {
        let err = normalize("blog/hello world.md").unwrap_err();
        assert!(matches!(err, RouteError::Validation { ch: ' ', .. }));
    }

    #[test]
    fn test_normalize_empty() {
        assert!(matches!(normalize(""), Err(RouteError::EmptyPath)));
        assert!(matches!(normalize(".tsx"), Err(RouteError::EmptyPath)));
    }
}
