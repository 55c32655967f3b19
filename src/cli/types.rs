use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "sitemeta")]
#[command(about = "Sitemap, robots.txt and head metadata assembler", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Source directory (defaults to ./)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub source: Option<PathBuf>,

    /// Show the full backtrace when an error occurs
    #[arg(short, long, default_value_t = false, global = true)]
    pub trace: bool,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false, global = true)]
    pub debug: bool,

    /// Only log errors
    #[arg(short, long, default_value_t = false, global = true)]
    pub quiet: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Write sitemap.xml, robots.txt and head fragments
    #[command(alias = "b")]
    Build {
        /// Custom configuration file
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<Vec<PathBuf>>,

        /// Absolute base URL of the site
        #[arg(short, long = "base-url", value_name = "URL")]
        base_url: Option<String>,

        /// Destination directory (defaults to ./_site)
        #[arg(short, long, value_name = "DIR")]
        destination: Option<PathBuf>,

        /// Watch for changes and rebuild
        #[arg(short = 'w', long, default_value_t = false)]
        watch: bool,

        /// Print verbose output
        #[arg(short = 'V', long, default_value_t = false)]
        verbose: bool,
    },

    /// Serve metadata per request and the admin API
    #[command(alias = "s", alias = "server")]
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(short = 'H', long, value_name = "HOST")]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(short = 'P', long, value_name = "PORT")]
        port: Option<u16>,

        /// Custom configuration file
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<Vec<PathBuf>>,

        /// Absolute base URL of the site
        #[arg(short, long = "base-url", value_name = "URL")]
        base_url: Option<String>,

        /// Reject admin API mutations
        #[arg(long, default_value_t = false)]
        read_only: bool,

        /// Also write the static artifacts once at startup
        #[arg(long, default_value_t = false)]
        build: bool,
    },

    /// Audit page metadata and report SEO issues
    #[command(alias = "c", alias = "report")]
    Check {
        /// Custom configuration file
        #[arg(long, value_name = "CONFIG_FILE")]
        config: Option<Vec<PathBuf>>,

        /// Print verbose output, including warnings
        #[arg(short = 'V', long, default_value_t = false)]
        verbose: bool,

        /// Display report in console instead of generating an HTML file
        #[arg(short = 'c', long, default_value_t = false)]
        console: bool,

        /// Output file path for the HTML report
        #[arg(short = 'o', long, value_name = "FILE", default_value = "./sitemeta-report.html")]
        output: PathBuf,
    },

    /// Remove the generated output directory
    Clean {},

    /// Creates a new configuration and pages file in PATH
    #[command(alias = "n")]
    New {
        /// Path where the scaffold will be created
        path: PathBuf,

        /// Force creation even if PATH already exists
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::try_parse_from([
            "sitemeta", "--debug", "build", "--base-url", "https://example.com", "-d", "out", "--watch",
        ])
        .unwrap();

        assert!(cli.debug);
        match cli.command {
            Some(Commands::Build { base_url, destination, watch, .. }) => {
                assert_eq!(base_url.as_deref(), Some("https://example.com"));
                assert_eq!(destination, Some(PathBuf::from("out")));
                assert!(watch);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["sitemeta", "serve", "-P", "8080"]).unwrap();
        match cli.command {
            Some(Commands::Serve { host, port, read_only, .. }) => {
                assert_eq!(host, None);
                assert_eq!(port, Some(8080));
                assert!(!read_only);
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sitemeta", "check", "--console", "--quiet"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Check { console: true, .. })));
    }
}
