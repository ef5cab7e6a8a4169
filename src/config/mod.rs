pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{FusionError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "fusion-stabilizer"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Update a resource stabilizer group under fusion measurements")
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Resource generators, e.g. +XXX,+ZZI,+IZZ
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ',', allow_hyphen_values = true))]
    pub resource: Vec<String>,

    /// Fusion measurements in order, e.g. XII,IZI
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub fusions: Vec<String>,

    /// Measurement outcome as MEASUREMENT=+1|-1 (repeatable, default +1)
    #[cfg_attr(feature = "cli", arg(long = "outcome", allow_hyphen_values = true))]
    pub outcomes: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    /// Report formats: json, csv, tsv, txt
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ',', default_value = "json,txt"))]
    pub formats: Vec<String>,

    /// Bundle all report files into a single zip archive
    #[cfg_attr(feature = "cli", arg(long))]
    pub archive: bool,

    #[cfg_attr(feature = "cli", arg(long, default_value = "cli-job"))]
    pub name: String,

    /// Start the interactive calculator instead
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub interactive: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Log process CPU and memory usage"))]
    pub monitor: bool,
}

/// Parse a `MEASUREMENT=VALUE` outcome argument.
pub fn parse_outcome_arg(raw: &str) -> Result<(String, i64)> {
    let invalid = |reason: &str| FusionError::InvalidConfigValueError {
        field: "outcome".to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let (measurement, value) = raw
        .split_once('=')
        .ok_or_else(|| invalid("Expected MEASUREMENT=+1 or MEASUREMENT=-1"))?;

    let measurement = measurement.trim();
    if measurement.is_empty() {
        return Err(invalid("Measurement cannot be empty"));
    }

    let value = value
        .trim()
        .trim_start_matches('+')
        .parse::<i64>()
        .map_err(|_| invalid("Outcome is not an integer"))?;

    Ok((measurement.to_string(), value))
}

impl ConfigProvider for CliConfig {
    fn job_name(&self) -> &str {
        &self.name
    }

    fn resource(&self) -> &[String] {
        &self.resource
    }

    fn measurements(&self) -> &[String] {
        &self.fusions
    }

    fn outcome_entries(&self) -> Result<Vec<(String, i64)>> {
        self.outcomes.iter().map(|o| parse_outcome_arg(o)).collect()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn archive(&self) -> bool {
        self.archive
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.interactive {
            return Ok(());
        }

        validation::validate_non_empty_string("name", &self.name)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_operators(&self.resource, &self.fusions)?;

        for (measurement, value) in self.outcome_entries()? {
            crate::core::pauli::Sign::from_outcome(&measurement, value)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CliConfig {
        CliConfig {
            resource: vec!["+XXX".into(), "+ZZI".into(), "+IZZ".into()],
            fusions: vec!["XII".into(), "IZI".into()],
            outcomes: vec!["IZI=-1".into()],
            output_path: "./output".into(),
            formats: vec!["json".into()],
            archive: false,
            name: "test".into(),
            interactive: false,
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_parse_outcome_arg() {
        assert_eq!(parse_outcome_arg("XII=+1").unwrap(), ("XII".to_string(), 1));
        assert_eq!(parse_outcome_arg(" IZI = -1 ").unwrap(), ("IZI".to_string(), -1));
        assert!(parse_outcome_arg("IZI").is_err());
        assert!(parse_outcome_arg("=1").is_err());
        assert!(parse_outcome_arg("IZI=up").is_err());
    }

    #[test]
    fn test_cli_config_validation() {
        assert!(config().validate().is_ok());

        let mut bad_outcome = config();
        bad_outcome.outcomes = vec!["IZI=3".into()];
        assert!(bad_outcome.validate().is_err());

        let mut bad_width = config();
        bad_width.fusions = vec!["XI".into()];
        assert!(bad_width.validate().is_err());

        let mut interactive = config();
        interactive.resource.clear();
        interactive.fusions.clear();
        interactive.interactive = true;
        assert!(interactive.validate().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_args_parse() {
        use clap::Parser;

        let config = CliConfig::try_parse_from([
            "fusion-stabilizer",
            "--resource",
            "+XXX,-ZZI,+IZZ",
            "--fusions",
            "XII,IZI",
            "--outcome",
            "IZI=-1",
            "--formats",
            "csv,txt",
        ])
        .unwrap();

        assert_eq!(config.resource, vec!["+XXX", "-ZZI", "+IZZ"]);
        assert_eq!(config.fusions, vec!["XII", "IZI"]);
        assert_eq!(config.outcome_entries().unwrap(), vec![("IZI".to_string(), -1)]);
        assert_eq!(config.output_path, "./output");
        assert!(!config.archive);
    }
}
