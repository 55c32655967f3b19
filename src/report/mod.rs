mod seo;

pub use seo::{audit_pages, AuditIssue, Severity, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};

use html_escape::encode_text;
use serde::Serialize;

use crate::config::Config;
use crate::content::ContentStore;
use crate::utils::error::BoxResult;

/// Audit report structure
#[derive(Debug, Clone, Serialize)]
pub struct SiteReport {
    /// Site name shown in the report header
    pub title: String,
    /// Number of pages audited
    pub num_pages: usize,
    /// Findings, in page order
    pub issues: Vec<AuditIssue>,
}

impl SiteReport {
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Warning).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Audit every page of the configured content store
pub fn generate_report(store: &dyn ContentStore, config: &Config) -> BoxResult<SiteReport> {
    let pages = store.list_pages()?;
    let issues = audit_pages(&pages, &config.site);

    let title = config
        .site
        .name
        .clone()
        .or_else(|| config.site.title.clone())
        .unwrap_or_else(|| "Site".to_string());

    Ok(SiteReport { title, num_pages: pages.len(), issues })
}

pub fn generate_html_report(report: &SiteReport) -> String {
    let mut html = String::from(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sitemeta SEO Report</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; max-width: 1200px; margin: 0 auto; padding: 20px; }
        h1, h2 { color: #333; }
        .section { margin-bottom: 30px; border: 1px solid #ddd; border-radius: 5px; padding: 15px; }
        .good { background-color: #e8f5e9; padding: 10px; border-left: 4px solid #4caf50; }
        .warning td:first-child { color: orange; }
        .error td:first-child { color: red; font-weight: bold; }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #ddd; }
        th { background-color: #f2f2f2; }
    </style>
</head>
<body>
"#);

    html.push_str(&format!("    <h1>SEO Report: {}</h1>\n", encode_text(&report.title)));
    html.push_str(&format!(
        "<div class='section'><p>{} pages audited, {} errors, {} warnings</p></div>",
        report.num_pages,
        report.error_count(),
        report.warning_count()
    ));

    html.push_str("<div class='section'><h2>Issues</h2>");
    if report.issues.is_empty() {
        html.push_str("<p class='good'>No SEO issues found!</p>");
    } else {
        html.push_str("<table><tr><th>Severity</th><th>Page</th><th>Issue</th></tr>");
        for issue in &report.issues {
            html.push_str(&format!(
                "<tr class='{}'><td>{}</td><td>{}</td><td>{}</td></tr>",
                issue.severity,
                issue.severity,
                encode_text(&issue.path),
                encode_text(&issue.message)
            ));
        }
        html.push_str("</table>");
    }
    html.push_str("</div>");

    html.push_str("</body></html>");
    html
}

pub fn generate_console_report(report: &SiteReport, verbose: bool) -> String {
    let mut output = format!("SEO Report: {}\n==================\n\n", report.title);
    output.push_str(&format!(
        "{} pages audited, {} errors, {} warnings\n\n",
        report.num_pages,
        report.error_count(),
        report.warning_count()
    ));

    if report.issues.is_empty() {
        output.push_str("No SEO issues found!\n");
        return output;
    }

    for issue in &report.issues {
        if !verbose && issue.severity == Severity::Warning {
            continue;
        }
        output.push_str(&format!("  [{}] {}: {}\n", issue.severity, issue.path, issue.message));
    }

    if !verbose && report.warning_count() > 0 {
        output.push_str(&format!("\n  ({} warnings hidden, use --verbose)\n", report.warning_count()));
    }

    output
}
