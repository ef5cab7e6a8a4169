use crate::core::pauli::{PauliString, Sign, Stabilizer};
use crate::core::update::{Outcomes, UpdateStep};
use crate::utils::error::{FusionError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed resource group plus the fusion measurements to apply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionJob {
    pub name: String,
    pub resource: Vec<Stabilizer>,
    pub measurements: Vec<PauliString>,
    pub outcomes: Outcomes,
}

impl FusionJob {
    pub fn parse(
        name: &str,
        resource: &[String],
        measurements: &[String],
        outcome_entries: &[(String, i64)],
    ) -> Result<Self> {
        let resource = resource
            .iter()
            .map(|g| g.parse::<Stabilizer>())
            .collect::<Result<Vec<_>>>()?;

        let measurements = measurements
            .iter()
            .map(|m| m.parse::<PauliString>())
            .collect::<Result<Vec<_>>>()?;

        let mut outcomes = Outcomes::new();
        for (key, value) in outcome_entries {
            let measurement: PauliString = key.parse()?;
            let sign = Sign::from_outcome(key, *value)?;
            if !measurements.contains(&measurement) {
                tracing::warn!("Outcome given for '{}' but it is never measured", measurement);
            }
            if let Some(prev) = outcomes.insert(measurement.clone(), sign) {
                if prev != sign {
                    tracing::warn!(
                        "Outcome for '{}' given twice; using {} instead of {}",
                        measurement,
                        sign,
                        prev
                    );
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            resource,
            measurements,
            outcomes,
        })
    }

    /// Qubit count as the update rule determines it.
    pub fn num_qubits(&self) -> usize {
        self.resource
            .first()
            .map(Stabilizer::num_qubits)
            .or_else(|| self.measurements.first().map(PauliString::len))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub measurement: PauliString,
    pub outcome: Sign,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReport {
    pub job: String,
    pub generated_at: DateTime<Utc>,
    pub num_qubits: usize,
    pub initial: Vec<Stabilizer>,
    pub measurements: Vec<MeasurementRecord>,
    pub steps: Vec<UpdateStep>,
    pub generators: Vec<Stabilizer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Json,
    Csv,
    Tsv,
    Txt,
}

impl OutputFormat {
    pub const ALL: [&'static str; 4] = ["json", "csv", "tsv", "txt"];

    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Json => "report.json",
            OutputFormat::Csv => "generators.csv",
            OutputFormat::Tsv => "generators.tsv",
            OutputFormat::Txt => "generators.txt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "txt" => Ok(OutputFormat::Txt),
            other => Err(FusionError::InvalidConfigValueError {
                field: "output_formats".to_string(),
                value: other.to_string(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OutputFormat::ALL.join(", ")
                ),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Txt => "txt",
        };
        write!(f, "{}", name)
    }
}
