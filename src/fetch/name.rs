// src/fetch/name.rs
// =============================================================================
// This module derives a local file name from a URL path.
//
// The rule is simple: the name of a page or image is the last non-empty
// segment of its URL path. A trailing slash therefore falls back to the
// segment before it:
//
//   /guides/setup      -> "setup"
//   /guides/setup/     -> "setup"
//   /img/pic.png       -> "pic.png"
//   /                  -> no name (the bare root has no segment)
//
// The bare root is the caller's problem: the extractor filters root links
// out before they ever reach a fetch, and the fetchers turn a missing name
// into an error for the one URL nobody filters (the start URL).
// =============================================================================

// Derives the local name for a URL path
//
// Parameters:
//   path: the path component of a URL (e.g. "/guides/setup/")
//
// Returns: Some(last non-empty segment), or None for "/" and ""
pub fn local_name(path: &str) -> Option<&str> {
    // Splitting "/a/b/" on '/' yields ["", "a", "b", ""]; walking from the
    // back and skipping empty entries lands on the right segment either way
    path.rsplit('/').find(|segment| !segment.is_empty())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<&str> instead of String?
//    - The name is a slice of the path the caller already owns
//    - No allocation happens here; callers call .to_string() if they need one
//    - None makes the "no name exists" case impossible to ignore
//
// 2. What is rsplit?
//    - Like split, but walks the string from the end
//    - Combined with find() it stops at the first match, so we never look
//      at more segments than necessary
//
// 3. Why not std::path::Path?
//    - URL paths always use '/' regardless of the operating system
//    - Path would use the platform separator and normalize differently
//      on Windows
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_segment() {
        assert_eq!(local_name("/guides/setup"), Some("setup"));
        assert_eq!(local_name("/page1"), Some("page1"));
    }

    #[test]
    fn test_trailing_separator_falls_back() {
        assert_eq!(local_name("/a/b/"), Some("b"));
        assert_eq!(local_name("/docs/page/"), Some("page"));
    }

    #[test]
    fn test_single_segment() {
        assert_eq!(local_name("/setup/"), Some("setup"));
        assert_eq!(local_name("setup"), Some("setup"));
    }

    #[test]
    fn test_image_name_keeps_extension() {
        assert_eq!(local_name("/img/pic.png"), Some("pic.png"));
    }

    #[test]
    fn test_root_has_no_name() {
        assert_eq!(local_name("/"), None);
        assert_eq!(local_name(""), None);
        assert_eq!(local_name("//"), None);
    }
}
