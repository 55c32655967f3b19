use std::fs;
use std::path::Path;

use crate::cli::commands::load_site_config;
use crate::cli::types::Commands;
use crate::content::open_store;
use crate::report;

/// Handle the check command. Returns false when the audit finds errors.
pub fn handle_check_command(command: &Commands, source: &Path) -> bool {
    if let Commands::Check { config: cfg_files, verbose, console, output } = command {
        let config = match load_site_config(source, cfg_files.as_ref(), None, None) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("Failed to load config: {}", e);
                return false;
            }
        };

        let store = open_store(&config.content, &config.source);
        if *verbose {
            log::info!("Auditing pages from {}", store.describe());
        }

        let report = match report::generate_report(store.as_ref(), &config) {
            Ok(report) => report,
            Err(e) => {
                log::error!("Failed to generate report: {}", e);
                return false;
            }
        };

        if *console {
            println!("{}", report::generate_console_report(&report, *verbose));
        } else {
            let html_report = report::generate_html_report(&report);
            match fs::write(output, html_report) {
                Ok(_) => log::info!("Report generated successfully at {}", output.display()),
                Err(e) => {
                    log::error!("Failed to write report to {}: {}", output.display(), e);
                    return false;
                }
            }
        }

        if report.has_errors() {
            log::error!("{} pages audited, {} errors found", report.num_pages, report.error_count());
            return false;
        }
        return true;
    }
    false
}
