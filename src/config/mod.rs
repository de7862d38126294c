pub mod toml_config;

use crate::adapters::xml_file::DEFAULT_DATA_FILE;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml_config::TomlConfig;

/// Which front end drives the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UiMode {
    /// Numbered menu over stdin/stdout
    #[default]
    Console,
    /// Interactive list and form in the terminal
    Tui,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "contact-book")]
#[command(about = "Manage a small contact list stored in an XML file")]
pub struct CliConfig {
    /// Contact file (default: contact.xml)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Front end to use (default: console)
    #[arg(long, value_enum)]
    pub ui: Option<UiMode>,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<String>,
}

/// Settings after merging CLI flags over the TOML file over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub ui: UiMode,
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn resolve(cli: CliConfig) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        file_config.validate()?;
        Ok(Self::merge(cli, file_config))
    }

    pub fn merge(cli: CliConfig, file_config: TomlConfig) -> Self {
        let data_file = cli
            .file
            .or(file_config.data_file)
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

        Self {
            data_file: PathBuf::from(data_file),
            ui: cli.ui.or(file_config.ui).unwrap_or_default(),
            verbose: cli.verbose || file_config.verbose.unwrap_or(false),
            log_file: cli.log_file.or(file_config.log_file).map(PathBuf::from),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_file", &self.data_file.to_string_lossy())?;
        if let Some(log_file) = &self.log_file {
            validate_path("log_file", &log_file.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::parse_from(std::iter::once("contact-book").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::merge(parse(&[]), TomlConfig::default());
        assert_eq!(config.data_file, PathBuf::from("contact.xml"));
        assert_eq!(config.ui, UiMode::Console);
        assert!(!config.verbose);
        assert!(config.log_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file_config = TomlConfig {
            data_file: Some("from-file.xml".to_string()),
            ui: Some(UiMode::Tui),
            verbose: Some(true),
            log_file: Some("file.log".to_string()),
        };

        let config = AppConfig::merge(
            parse(&["--file", "cli.xml", "--ui", "console", "--log-file", "cli.log"]),
            file_config,
        );
        assert_eq!(config.data_file, PathBuf::from("cli.xml"));
        assert_eq!(config.ui, UiMode::Console);
        assert!(config.verbose);
        assert_eq!(config.log_file, Some(PathBuf::from("cli.log")));
    }

    #[test]
    fn test_file_fills_missing_flags() {
        let file_config = TomlConfig {
            data_file: Some("from-file.xml".to_string()),
            ui: Some(UiMode::Tui),
            ..Default::default()
        };

        let config = AppConfig::merge(parse(&["-v"]), file_config);
        assert_eq!(config.data_file, PathBuf::from("from-file.xml"));
        assert_eq!(config.ui, UiMode::Tui);
        assert!(config.verbose);
    }

    #[test]
    fn test_empty_data_file_is_invalid() {
        let config = AppConfig::merge(parse(&["--file", ""]), TomlConfig::default());
        assert!(config.validate().is_err());
    }
}
