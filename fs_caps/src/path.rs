//! Slash-separated path helpers
//!
//! Paths handled here are plain strings using `/` as the only separator.
//! Nothing is normalized: `.` and `..` are ordinary elements.

/// A path split into its parent and final element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPath<'a> {
    /// Everything before the separator preceding the leaf, without that
    /// separator. Empty when the leaf has no parent in the string.
    pub parent: &'a str,
    /// The final element, with trailing separators removed
    pub leaf: &'a str,
}

/// Splits a path into parent and leaf
///
/// Trailing separators are ignored. Returns `None` when nothing but
/// separators (or nothing at all) is left.
///
/// # Examples
///
/// ```
/// use fs_caps::path::split_parent;
///
/// let split = split_parent("docs/notes/todo.txt").unwrap();
/// assert_eq!(split.parent, "docs/notes");
/// assert_eq!(split.leaf, "todo.txt");
///
/// let split = split_parent("docs/notes//").unwrap();
/// assert_eq!(split.parent, "docs");
/// assert_eq!(split.leaf, "notes");
///
/// assert!(split_parent("///").is_none());
/// ```
pub fn split_parent(path: &str) -> Option<SplitPath<'_>> {
    let bytes = path.as_bytes();

    // Skip trailing separators
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b'/' {
        end -= 1;
    }
    if end == 0 {
        return None;
    }

    // Scan back over the last element
    let mut start = end;
    while start > 0 && bytes[start - 1] != b'/' {
        start -= 1;
    }

    let parent = if start > 0 { &path[..start - 1] } else { "" };
    Some(SplitPath {
        parent,
        leaf: &path[start..end],
    })
}

/// True for a parent that needs no creation: empty, or the root alone
pub fn is_trivial_parent(parent: &str) -> bool {
    parent.is_empty() || parent.bytes().all(|b| b == b'/')
}

/// Joins a directory and a name with a single separator
///
/// An empty directory or `.` yields the name unchanged.
pub fn join(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        return name.to_string();
    }
    format!("{}/{}", dir, name)
}

/// Returns the final element, or `.` for an empty or root-only path
pub fn base_name(path: &str) -> &str {
    match split_parent(path) {
        Some(split) => split.leaf,
        None => ".",
    }
}

/// Validates a single directory entry name
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/') && !name.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_path() {
        let split = split_parent("todo.txt").unwrap();
        assert_eq!(split.parent, "");
        assert_eq!(split.leaf, "todo.txt");
    }

    #[test]
    fn test_split_nested_path() {
        let split = split_parent("a/b/c").unwrap();
        assert_eq!(split.parent, "a/b");
        assert_eq!(split.leaf, "c");
    }

    #[test]
    fn test_split_path_with_leading_slash() {
        let split = split_parent("/docs").unwrap();
        assert_eq!(split.parent, "");
        assert_eq!(split.leaf, "docs");
        assert!(is_trivial_parent(split.parent));
    }

    #[test]
    fn test_split_path_with_double_leading_slash() {
        let split = split_parent("//docs").unwrap();
        assert_eq!(split.parent, "/");
        assert!(is_trivial_parent(split.parent));
    }

    #[test]
    fn test_split_path_with_trailing_slashes() {
        let split = split_parent("a/b///").unwrap();
        assert_eq!(split.parent, "a");
        assert_eq!(split.leaf, "b");
    }

    #[test]
    fn test_split_keeps_dot_elements() {
        let split = split_parent("foo/.").unwrap();
        assert_eq!(split.parent, "foo");
        assert_eq!(split.leaf, ".");
    }

    #[test]
    fn test_empty_and_separator_only_paths() {
        assert!(split_parent("").is_none());
        assert!(split_parent("/").is_none());
        assert!(split_parent("////").is_none());
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "a"), "a");
        assert_eq!(join(".", "a"), "a");
        assert_eq!(join("docs", "a"), "docs/a");
        assert_eq!(join("docs/", "a"), "docs/a");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a/b/c.txt"), "c.txt");
        assert_eq!(base_name("a/"), "a");
        assert_eq!(base_name(""), ".");
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("todo.txt"));
        assert!(is_valid_name("my-file"));

        assert!(!is_valid_name(""));
        assert!(!is_valid_name("."));
        assert!(!is_valid_name(".."));
        assert!(!is_valid_name("has/slash"));
        assert!(!is_valid_name("has\0null"));
    }
}
