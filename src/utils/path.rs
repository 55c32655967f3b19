use std::path::{Component, Path, PathBuf};

/// Turn a content file's path (relative to the content root) into a
/// root-relative URL path.
///
/// `index.md` maps to `/`, `about.md` to `/about` and `blog/index.html`
/// to `/blog`.
pub fn url_path_for_file<P: AsRef<Path>>(relative: P) -> String {
    let relative = relative.as_ref();
    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    if let Some(last) = segments.pop() {
        let stem = Path::new(&last)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or(last);
        if stem != "index" {
            segments.push(stem);
        }
    }

    format!("/{}", segments.join("/"))
}

/// Normalize a root-relative URL path: collapse repeated slashes and
/// drop a trailing slash (except for the root itself).
pub fn normalize_url_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Whether a URL path contains `.` or `..` segments, or a backslash that
/// could act as a separator once the path becomes a file name.
pub fn has_unsafe_segments(url_path: &str) -> bool {
    url_path.contains('\\')
        || url_path.split('/').any(|segment| segment == "." || segment == "..")
}

/// Whether a relative output path stays below the directory it is joined to
pub fn is_contained(relative: &Path) -> bool {
    relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
}

/// File (relative to an output directory) that holds the head fragment
/// for a URL path. The root maps to `index.html`.
pub fn fragment_file_for(url_path: &str) -> PathBuf {
    let normalized = normalize_url_path(url_path);
    let trimmed = normalized.trim_start_matches('/');
    if trimmed.is_empty() {
        PathBuf::from("index.html")
    } else {
        PathBuf::from(format!("{}.html", trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_path_for_file() {
        assert_eq!(url_path_for_file("index.md"), "/");
        assert_eq!(url_path_for_file("about.md"), "/about");
        assert_eq!(url_path_for_file("blog/index.html"), "/blog");
        assert_eq!(url_path_for_file("services/seo.md"), "/services/seo");
    }

    #[test]
    fn test_normalize_url_path() {
        assert_eq!(normalize_url_path("/"), "/");
        assert_eq!(normalize_url_path("//about//"), "/about");
        assert_eq!(normalize_url_path("blog/post/"), "/blog/post");
    }

    #[test]
    fn test_fragment_file_for() {
        assert_eq!(fragment_file_for("/"), PathBuf::from("index.html"));
        assert_eq!(fragment_file_for("/about"), PathBuf::from("about.html"));
        assert_eq!(fragment_file_for("/blog/post/"), PathBuf::from("blog/post.html"));
    }

    #[test]
    fn test_has_unsafe_segments() {
        assert!(has_unsafe_segments("/../../escaped"));
        assert!(has_unsafe_segments("/blog/./post"));
        assert!(has_unsafe_segments("/blog/.."));
        assert!(has_unsafe_segments("/a\\..\\b"));
        assert!(!has_unsafe_segments("/"));
        assert!(!has_unsafe_segments("/blog/.well-known/post..v2"));
    }

    #[test]
    fn test_is_contained() {
        assert!(is_contained(&fragment_file_for("/blog/post")));
        assert!(!is_contained(&fragment_file_for("/../../escaped")));
        assert!(!is_contained(Path::new("/etc/passwd.html")));
    }
}
