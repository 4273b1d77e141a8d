//! Segment-wise path pattern matching.
//!
//! Patterns are plain paths whose segments may capture (`:id`) or swallow
//! the remainder (`*`). Matching is prefix-based unless `exact` is set,
//! case-insensitive unless `sensitive` is set, and ignores trailing slashes
//! unless `strict` is set.

use crate::models::RouteMatch;

/// Match-precision flags taken from a route definition.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchOptions {
    /// Require the pattern to consume the full pathname.
    pub exact: bool,
    /// Case-sensitive segment comparison.
    pub sensitive: bool,
    /// A pattern with a trailing slash only matches pathnames with one.
    pub strict: bool,
}

/// Match `pathname` against `pattern`.
///
/// Returns the captured parameters and whether the match consumed the full
/// pathname. The catch-all pattern `*` matches any pathname.
pub fn match_path(pattern: &str, pathname: &str, opts: MatchOptions) -> Option<RouteMatch> {
    if pattern == "*" {
        return Some(RouteMatch {
            pattern: pattern.to_string(),
            params: Vec::new(),
            exact: true,
        });
    }

    if opts.strict && pattern.ends_with('/') && pattern != "/" && !pathname.ends_with('/') {
        return None;
    }

    let pat_segs: Vec<&str> = segments(pattern);
    let path_segs: Vec<&str> = segments(pathname);

    if pat_segs.len() > path_segs.len() {
        return None;
    }

    let mut params = Vec::new();
    let mut consumed = 0;

    for (pat, seg) in pat_segs.iter().zip(path_segs.iter()) {
        if *pat == "*" {
            // Catch-all segment swallows the remainder.
            consumed = path_segs.len();
            break;
        }
        if let Some(name) = pat.strip_prefix(':') {
            params.push((name.to_string(), (*seg).to_string()));
        } else {
            let matched = if opts.sensitive {
                pat == seg
            } else {
                pat.eq_ignore_ascii_case(seg)
            };
            if !matched {
                return None;
            }
        }
        consumed += 1;
    }

    let full = consumed == path_segs.len();
    if opts.exact && !full {
        return None;
    }

    Some(RouteMatch {
        pattern: pattern.to_string(),
        params,
        exact: full,
    })
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
