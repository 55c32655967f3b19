use std::fs;
use std::io;
use std::path::Path;

use log::{error, info};

use crate::cli::types::Commands;

const CONFIG_TEMPLATE: &str = r#"# Site metadata configuration
base_url: "https://example.com"

content:
  kind: file
  path: pages.yml

site:
  name: "Example"
  title: "Example"
  title_template: "{{ title }} | {{ site.name }}"
  description: "A site with generated sitemap and head metadata"
  locale: en_US
  twitter_card: summary

robots:
  sitemap: true
  rules:
    - user_agent: "*"
      allow: ["/"]
      disallow: ["/admin"]
"#;

const PAGES_TEMPLATE: &str = r#"pages:
  - path: /
    title: Home
    description: Welcome to the example site
    priority: 1.0
    change_frequency: daily
    structured_data:
      "@context": "https://schema.org"
      "@type": WebSite
      name: Example
      url: "https://example.com"

  - path: /about
    title: About
    description: Who we are and what we do
    priority: 0.8
    change_frequency: monthly
"#;

/// Handle the 'new' command to scaffold a configuration
pub fn handle_new_command(command: &Commands) -> bool {
    if let Commands::New { path, force } = command {
        info!("Creating new sitemeta project at {}", path.display());

        // Check if directory exists and is not empty
        if path.exists() {
            let is_empty = path.read_dir().map(|mut i| i.next().is_none()).unwrap_or(false);

            if !is_empty && !force {
                error!("Directory '{}' exists and is not empty. Use --force to overwrite.", path.display());
                return false;
            }
        }

        if let Err(e) = create_scaffold(path) {
            error!("Failed to create scaffold: {}", e);
            return false;
        }

        info!("Run 'sitemeta --source {} build' to generate metadata", path.display());
        return true;
    }
    false
}

/// Write the configuration and sample pages file
fn create_scaffold(site_path: &Path) -> io::Result<()> {
    fs::create_dir_all(site_path)?;

    let config_path = site_path.join("_sitemeta.yml");
    fs::write(&config_path, CONFIG_TEMPLATE)?;
    info!("Created config file: {}", config_path.display());

    let pages_path = site_path.join("pages.yml");
    fs::write(&pages_path, PAGES_TEMPLATE)?;
    info!("Created pages file: {}", pages_path.display());

    let gitignore_path = site_path.join(".gitignore");
    fs::write(&gitignore_path, "_site\nsitemeta-report.html\n")?;
    info!("Created .gitignore: {}", gitignore_path.display());

    Ok(())
}
