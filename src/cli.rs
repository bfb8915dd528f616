//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for geoabbr using clap's derive macros.

use clap::{Parser, Subcommand};

/// geoabbr - GIS abbreviation dictionary service
#[derive(Parser, Debug)]
#[command(name = "geoabbr")]
#[command(version)]
#[command(about = "GIS abbreviation dictionary service", long_about = None)]
pub struct Cli {
    /// Path to config.toml (default: ./config.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Insert the built-in sample abbreviations if the table is empty
    Seed,

    /// Resolve a query such as "GSDJ,JZDJ;TDLY"
    Search {
        /// Keywords separated by ',', ';' or newlines
        query: String,
    },

    /// Add an abbreviation
    Add {
        /// Abbreviation (stored upper-cased)
        abbreviation: String,

        /// Full name
        full_name: String,
    },

    /// Show the most copied abbreviations
    Hot {
        #[arg(long, short = 'n', default_value_t = 10)]
        limit: u64,
    },

    /// Generate a sample configuration file
    GenerateConfig {
        /// Output path
        #[arg(long, short = 'o', default_value = "config.example.toml")]
        output: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_no_command() {
        let cli = Cli::parse_from(["geoabbr"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["geoabbr", "search", "GSDJ", "-c", "/etc/geoabbr.toml"]);
        assert_eq!(cli.config.as_deref(), Some("/etc/geoabbr.toml"));
        assert_eq!(
            cli.command,
            Some(Commands::Search {
                query: "GSDJ".to_string()
            })
        );
    }

    #[test]
    fn test_hot_limit() {
        let cli = Cli::parse_from(["geoabbr", "hot", "--limit", "5"]);
        assert_eq!(cli.command, Some(Commands::Hot { limit: 5 }));
        let cli = Cli::parse_from(["geoabbr", "hot"]);
        assert_eq!(cli.command, Some(Commands::Hot { limit: 10 }));
    }

    #[test]
    fn test_add_requires_both_args() {
        assert!(Cli::try_parse_from(["geoabbr", "add", "GSDJ"]).is_err());
        let cli = Cli::parse_from(["geoabbr", "add", "gsdj", "公示地价"]);
        assert_eq!(
            cli.command,
            Some(Commands::Add {
                abbreviation: "gsdj".to_string(),
                full_name: "公示地价".to_string()
            })
        );
    }
}
