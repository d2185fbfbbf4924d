//! Registration path normalization.
//!
//! # Responsibilities
//! - Join a base path and a relative path
//! - Collapse `.`/`..` segments and runs of `/` or `*`
//! - Extract `:name` parameter names into an ordered list
//!
//! # Design Decisions
//! - Never rejects input; a malformed pattern simply matches nothing
//! - The canonical pattern replaces every `:name` segment with a lone `:`

pub(crate) const SLASH: u8 = b'/';
pub(crate) const WILDCARD: u8 = b'*';
pub(crate) const PARAM: u8 = b':';

/// A registration path after joining and normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanPath {
    /// Joined path with parameter names intact. Nested groups build on this.
    pub base: String,
    /// Canonical pattern used to build the tree.
    pub pattern: String,
    /// Parameter names in declaration order.
    pub param_keys: Vec<String>,
}

/// Join `base_path` and `relative_path` into a canonical pattern.
///
/// A trailing slash survives only when the relative path (or the base path,
/// if the relative path is empty) ends with one.
pub fn parse_clean_path(base_path: &str, relative_path: &str) -> CleanPath {
    let trailing_slash = if relative_path.is_empty() {
        base_path.ends_with('/')
    } else {
        relative_path.ends_with('/')
    };

    let joined = format!("{base_path}{relative_path}");
    if joined.is_empty() {
        return CleanPath::default();
    }

    // Always end with a slash while scanning so every parameter segment is
    // terminated; removed again below when it was not asked for.
    let mut path = clean(&joined);
    if !path.ends_with('/') {
        path.push('/');
    }

    let mut base = String::with_capacity(path.len());
    for c in path.chars() {
        if (c == '/' || c == '*') && base.ends_with(c) {
            continue;
        }
        base.push(c);
    }

    let mut pattern = String::with_capacity(base.len());
    let mut param_keys = Vec::new();
    let mut copied = 0;
    let mut cursor = 0;
    while let Some(offset) = base[cursor..].find("/:") {
        let marker = cursor + offset + 1;
        let end = base[marker..]
            .find('/')
            .map_or(base.len(), |n| marker + n);
        pattern.push_str(&base[copied..=marker]);
        param_keys.push(base[marker + 1..end].to_owned());
        copied = end;
        cursor = end;
    }
    pattern.push_str(&base[copied..]);

    if !trailing_slash {
        trim_slash(&mut base);
        trim_slash(&mut pattern);
    }

    CleanPath {
        base,
        pattern,
        param_keys,
    }
}

fn trim_slash(s: &mut String) {
    if s.ends_with('/') {
        s.pop();
    }
}

/// Lexical path cleaning: drops empty and `.` segments and resolves `..`.
/// A rooted `..` at the top is discarded.
fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            s => parts.push(s),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_route() {
        let p = parse_clean_path("/", "/user/new");
        assert_eq!(p.pattern, "/user/new");
        assert_eq!(p.base, "/user/new");
        assert!(p.param_keys.is_empty());
    }

    #[test]
    fn test_params_replaced_by_marker() {
        let p = parse_clean_path("/", "/item/:id/detail/:sub");
        assert_eq!(p.pattern, "/item/:/detail/:");
        assert_eq!(p.base, "/item/:id/detail/:sub");
        assert_eq!(p.param_keys, vec!["id", "sub"]);
    }

    #[test]
    fn test_trailing_slash_preserved() {
        assert_eq!(parse_clean_path("/", "/user/").pattern, "/user/");
        assert_eq!(parse_clean_path("/api/", "").pattern, "/api/");
        assert_eq!(parse_clean_path("/api/", "users").pattern, "/api/users");
        assert_eq!(parse_clean_path("/", "/").pattern, "/");
    }

    #[test]
    fn test_collapses_separators_and_wildcards() {
        assert_eq!(parse_clean_path("/", "//files///**").pattern, "/files/*");
        assert_eq!(parse_clean_path("/", "/a/./b/../c").pattern, "/a/c");
        assert_eq!(parse_clean_path("/", "/../x").pattern, "/x");
    }

    #[test]
    fn test_group_base_keeps_param_names() {
        let group = parse_clean_path("/", "/user/:id");
        let p = parse_clean_path(&group.base, "/posts/:post");
        assert_eq!(p.pattern, "/user/:/posts/:");
        assert_eq!(p.param_keys, vec!["id", "post"]);
    }

    #[test]
    fn test_colon_inside_segment_is_literal() {
        let p = parse_clean_path("/", "/v1:batch");
        assert_eq!(p.pattern, "/v1:batch");
        assert!(p.param_keys.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_clean_path("", ""), CleanPath::default());
    }
}
