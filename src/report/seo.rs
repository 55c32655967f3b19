use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::Serialize;

use crate::assembler::validate_structured_data;
use crate::config::SiteDefaults;
use crate::content::PageDescriptor;

/// Longest title search engines display in full
pub const TITLE_MAX_CHARS: usize = 60;

/// Longest description search engines display in full
pub const DESCRIPTION_MAX_CHARS: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// One finding of the audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditIssue {
    pub path: String,
    pub severity: Severity,
    pub message: String,
}

impl AuditIssue {
    fn warning(path: &str, message: String) -> Self {
        AuditIssue { path: path.to_string(), severity: Severity::Warning, message }
    }

    fn error(path: &str, message: String) -> Self {
        AuditIssue { path: path.to_string(), severity: Severity::Error, message }
    }
}

/// Check descriptors against the advisory SEO rules and the invariants the
/// generators rely on.
pub fn audit_pages(pages: &[PageDescriptor], site: &SiteDefaults) -> Vec<AuditIssue> {
    let mut issues = Vec::new();

    // Duplicate paths
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for page in pages {
        *seen.entry(page.path.as_str()).or_insert(0) += 1;
    }
    let mut duplicates: Vec<(&str, usize)> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort();
    for (path, count) in duplicates {
        issues.push(AuditIssue::error(path, format!("path is used by {} pages", count)));
    }

    for page in pages {
        check_page(page, site, &mut issues);
    }

    check_root_priority(pages, &mut issues);

    debug!("SEO audit of {} pages found {} issues", pages.len(), issues.len());
    issues
}

fn check_page(page: &PageDescriptor, site: &SiteDefaults, issues: &mut Vec<AuditIssue>) {
    let path = page.path.as_str();

    if !path.starts_with('/') {
        issues.push(AuditIssue::error(path, "path is not root-relative".to_string()));
    }

    // Title
    if page.title.trim().is_empty() {
        if site.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            issues.push(AuditIssue::error(path, "no title and no site default title".to_string()));
        } else {
            issues.push(AuditIssue::warning(path, "no title, the site default will be used".to_string()));
        }
    } else {
        let len = page.title.chars().count();
        if len > TITLE_MAX_CHARS {
            issues.push(AuditIssue::warning(path, format!("title too long ({} chars, max {})", len, TITLE_MAX_CHARS)));
        }
    }

    // Description
    if page.description.trim().is_empty() {
        if site.description.as_deref().map_or(true, |d| d.trim().is_empty()) {
            issues.push(AuditIssue::error(path, "no description and no site default description".to_string()));
        } else {
            issues.push(AuditIssue::warning(path, "no description, the site default will be used".to_string()));
        }
    } else {
        let len = page.description.chars().count();
        if len > DESCRIPTION_MAX_CHARS {
            issues.push(AuditIssue::warning(
                path,
                format!("description too long ({} chars, max {})", len, DESCRIPTION_MAX_CHARS),
            ));
        }
    }

    if page.priority.is_nan() || !(0.0..=1.0).contains(&page.priority) {
        issues.push(AuditIssue::error(path, format!("priority {} is outside 0.0..=1.0", page.priority)));
    }

    if let Some(image) = &page.og_image {
        if image.alt.as_deref().map_or(true, |alt| alt.trim().is_empty()) {
            issues.push(AuditIssue::warning(path, "social image has no alt text".to_string()));
        }
    }

    if let Some(data) = &page.structured_data {
        if let Err(e) = validate_structured_data(data) {
            issues.push(AuditIssue::error(path, e.to_string()));
        }
    }

    if !page.robots.index && page.priority > 0.0 {
        issues.push(AuditIssue::warning(path, "noindex page is listed in the sitemap".to_string()));
    }
}

fn check_root_priority(pages: &[PageDescriptor], issues: &mut Vec<AuditIssue>) {
    let root = match pages.iter().find(|p| p.is_root()) {
        Some(root) => root,
        None => return,
    };

    if let Some(higher) = pages
        .iter()
        .filter(|p| !p.is_root())
        .find(|p| p.priority > root.priority)
    {
        issues.push(AuditIssue::warning(
            "/",
            format!(
                "site root priority {:.1} is lower than {} ({:.1})",
                root.priority, higher.path, higher.priority
            ),
        ));
    }
}
