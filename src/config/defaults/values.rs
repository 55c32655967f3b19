use std::path::PathBuf;

/// Default source directory
pub fn default_source() -> PathBuf {
    PathBuf::from(".")
}

/// Default destination directory
pub fn default_destination() -> PathBuf {
    PathBuf::from("_site")
}

/// Default pages file, relative to the source directory
pub fn default_content_path() -> PathBuf {
    PathBuf::from("pages.yml")
}

/// Default sitemap file name
pub fn default_sitemap_file() -> String {
    "sitemap.xml".to_string()
}

/// Default robots file name
pub fn default_robots_file() -> String {
    "robots.txt".to_string()
}

/// Directory (inside the destination) holding per-page head fragments
pub fn default_meta_dir() -> String {
    "_meta".to_string()
}

/// Default server host
pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    4000
}

pub fn default_true() -> bool {
    true
}
