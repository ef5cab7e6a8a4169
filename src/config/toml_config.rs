use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::{FusionError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub job: JobConfig,
    #[serde(default)]
    pub resource: ResourceConfig,
    #[serde(default)]
    pub fusion: FusionConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Generators in display form, e.g. "+XXI".
    #[serde(default)]
    pub generators: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FusionConfig {
    #[serde(default)]
    pub measurements: Vec<String>,
    #[serde(default)]
    pub outcomes: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    #[serde(default)]
    pub archive: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            formats: default_formats(),
            archive: false,
        }
    }
}

fn default_output_path() -> String {
    "./output".to_string()
}

fn default_formats() -> Vec<String> {
    vec![OutputFormat::Json.to_string(), OutputFormat::Txt.to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FusionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn job_name(&self) -> &str {
        &self.job.name
    }

    fn resource(&self) -> &[String] {
        &self.resource.generators
    }

    fn measurements(&self) -> &[String] {
        &self.fusion.measurements
    }

    fn outcome_entries(&self) -> Result<Vec<(String, i64)>> {
        Ok(self
            .fusion
            .outcomes
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect())
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn archive(&self) -> bool {
        self.output.archive
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("job.name", &self.job.name)?;
        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_output_formats("output.formats", &self.output.formats)?;
        validation::validate_operators(&self.resource.generators, &self.fusion.measurements)?;

        for (measurement, value) in &self.fusion.outcomes {
            crate::core::pauli::Sign::from_outcome(measurement, *value)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const GHZ_JOB: &str = r#"
[job]
name = "ghz-fusion"
description = "Three-qubit GHZ resource"

[resource]
generators = ["+XXX", "+ZZI", "+IZZ"]

[fusion]
measurements = ["XII", "IZI"]

[fusion.outcomes]
XII = 1
IZI = -1

[output]
output_path = "./test-output"
formats = ["json", "csv"]
archive = true
"#;

    #[test]
    fn test_parse_job_config() {
        let config = TomlConfig::from_toml_str(GHZ_JOB).unwrap();

        assert_eq!(config.job_name(), "ghz-fusion");
        assert_eq!(config.resource().len(), 3);
        assert_eq!(config.measurements(), &["XII".to_string(), "IZI".to_string()]);
        assert_eq!(config.fusion.outcomes.get("IZI"), Some(&-1));
        assert!(config.archive());
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[job]
name = "minimal"

[fusion]
measurements = ["ZZ"]
"#,
        )
        .unwrap();

        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.output_formats(), &["json".to_string(), "txt".to_string()]);
        assert!(config.resource().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FUSION_TEST_OUTPUT_DIR", "/tmp/fusion-out");

        let config = TomlConfig::from_toml_str(
            r#"
[job]
name = "env"

[fusion]
measurements = ["XX"]

[output]
output_path = "${FUSION_TEST_OUTPUT_DIR}"
"#,
        )
        .unwrap();
        assert_eq!(config.output_path(), "/tmp/fusion-out");

        std::env::remove_var("FUSION_TEST_OUTPUT_DIR");
    }

    #[test]
    fn test_invalid_outcome_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[job]
name = "bad"

[resource]
generators = ["+XX", "+ZZ"]

[fusion]
measurements = ["ZI"]
outcomes = { ZI = 0 }
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_job_section_is_parse_error() {
        let err = TomlConfig::from_toml_str("[fusion]\nmeasurements = [\"X\"]\n").unwrap_err();
        assert!(matches!(err, FusionError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(GHZ_JOB.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.job.name, "ghz-fusion");
        assert_eq!(
            config.job.description.as_deref(),
            Some("Three-qubit GHZ resource")
        );
    }
}
