//! Page discovery from a glob pattern.
//!
//! ```text
//! pattern: src/pages/**/*.{tsx,mdx}
//! base:    src/pages/
//! found:   src/pages/index.tsx, src/pages/blog/post.mdx
//! result:  ["blog/post.mdx", "index.tsx"]
//! ```

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use jwalk::WalkDir;

use crate::route::{RouteError, is_page_file};

const MAGIC_CHARS: &[char] = &['*', '?', '{', '['];

const IGNORED_FILES: &[&str] = &[".DS_Store"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Directory part of a glob: everything before the first glob character,
/// cut back to the last `/`.
///
/// `src/pages/**/*.tsx` -> `src/pages/`, `pages/a*.md` -> `pages/`, `*.md` -> ``
pub fn glob_base(pattern: &str) -> &str {
    let literal = pattern
        .find(MAGIC_CHARS)
        .map_or(pattern, |index| &pattern[..index]);
    literal.rfind('/').map_or("", |slash| &literal[..=slash])
}

/// Expand `{a,b}` groups into separate patterns.
///
/// `src/{pages,docs}/*.{md,tsx}` -> 4 patterns
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close) = matching_brace(pattern, open) else {
        return vec![pattern.to_string()];
    };

    let (prefix, suffix) = (&pattern[..open], &pattern[close + 1..]);
    split_alternatives(&pattern[open + 1..close])
        .into_iter()
        .flat_map(|alt| expand_braces(&format!("{prefix}{alt}{suffix}")))
        .collect()
}

fn matching_brace(pattern: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in pattern[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on top-level commas only, so nested groups survive for the next round.
fn split_alternatives(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let (mut depth, mut start) = (0usize, 0usize);
    for (i, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

/// Collect page files matching `pattern` under `root`.
///
/// Returns base-relative, `/`-separated paths sorted lexicographically.
pub fn scan_pages(pattern: &str, root: &Path) -> Result<Vec<String>, RouteError> {
    let pages_dir = pages_dir(pattern, root);
    if !pages_dir.is_dir() {
        return Err(RouteError::PagesDirMissing(pages_dir));
    }

    let patterns = expand_braces(pattern.trim_start_matches("./"))
        .into_iter()
        .map(|expanded| {
            Pattern::new(&expanded).map_err(|source| RouteError::Pattern {
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let base = glob_base(pattern.trim_start_matches("./"));
    let mut files: Vec<String> = WalkDir::new(&pages_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .filter_map(|e| relative_slash_path(&e.path(), root))
        .filter(|rel| is_page_file(rel))
        .filter(|rel| patterns.iter().any(|p| p.matches_with(rel, MATCH_OPTIONS)))
        .filter_map(|rel| rel.strip_prefix(base).map(str::to_string))
        .collect();

    if files.is_empty() {
        return Err(RouteError::EmptyMatch {
            pattern: pattern.to_string(),
            root: root.to_path_buf(),
        });
    }

    files.sort();
    crate::debug!("scan"; "found {} page files under {}", files.len(), pages_dir.display());
    Ok(files)
}

/// Absolute directory the pattern walks from.
pub fn pages_dir(pattern: &str, root: &Path) -> PathBuf {
    root.join(glob_base(pattern.trim_start_matches("./")))
}

/// Root-relative path with `/` separators regardless of platform.
fn relative_slash_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<_>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}
