use crate::config::ArchiveConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "stormfetch")]
#[command(about = "Fetch NHC cyclone tracks and SPC severe weather reports as tables")]
pub struct CliConfig {
    /// Path to a TOML file overriding archive locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv, global = true)]
    pub format: OutputFormat,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List storms from the ATCF index
    Storms {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Forecast models for a storm, or the tracks of selected models
    Tracks {
        #[arg(long)]
        year: i32,
        /// Storm file name, e.g. al061976
        #[arg(long)]
        storm: String,
        #[arg(long = "model")]
        models: Vec<String>,
    },
    /// Severe weather reports for one day
    Reports {
        /// tornado, hail or wind
        #[arg(long)]
        event: String,
        /// YYYYMMDD
        #[arg(long)]
        date: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl CliConfig {
    pub fn archive_config(&self) -> Result<ArchiveConfig> {
        match &self.config {
            Some(path) => ArchiveConfig::from_file(path),
            None => Ok(ArchiveConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tracks_command() {
        let cli = CliConfig::try_parse_from([
            "stormfetch",
            "tracks",
            "--year",
            "1976",
            "--storm",
            "al061976",
            "--model",
            "BCD5",
            "--model",
            "CLP5",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Tracks {
                year,
                storm,
                models,
            } => {
                assert_eq!(year, 1976);
                assert_eq!(storm, "al061976");
                assert_eq!(models, vec!["BCD5".to_string(), "CLP5".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_reports_defaults() {
        let cli =
            CliConfig::try_parse_from(["stormfetch", "reports", "--event", "hail", "--date", "20180615"])
                .unwrap();

        assert_eq!(cli.format, OutputFormat::Csv);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        assert_eq!(cli.archive_config().unwrap(), ArchiveConfig::default());
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(CliConfig::try_parse_from(["stormfetch"]).is_err());
    }
}
