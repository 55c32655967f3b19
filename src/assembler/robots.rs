use crate::config::RobotsRule;

/// Render robots.txt from the authored rules, optionally pointing
/// crawlers at the sitemap.
pub fn build_robots_txt(rules: &[RobotsRule], sitemap_url: Option<&str>) -> String {
    let mut out = String::new();

    for (i, rule) in rules.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("User-agent: {}\n", rule.user_agent));
        for path in &rule.allow {
            out.push_str(&format!("Allow: {}\n", path));
        }
        for path in &rule.disallow {
            out.push_str(&format!("Disallow: {}\n", path));
        }
        // An empty group would read as "no rules"; be explicit
        if rule.allow.is_empty() && rule.disallow.is_empty() {
            out.push_str("Disallow:\n");
        }
        if let Some(delay) = rule.crawl_delay {
            out.push_str(&format!("Crawl-delay: {}\n", delay));
        }
    }

    if let Some(url) = sitemap_url {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("Sitemap: {}\n", url));
    }

    out
}
