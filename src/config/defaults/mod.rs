pub mod values;

// Export the default values
pub use values::*;

use crate::config::types::RobotsRule;

/// Default robots rules: every crawler may fetch everything
pub fn default_robots_rules() -> Vec<RobotsRule> {
    vec![RobotsRule {
        user_agent: "*".to_string(),
        allow: vec!["/".to_string()],
        disallow: Vec::new(),
        crawl_delay: None,
    }]
}
