use crate::core::pauli::{PauliString, Stabilizer};
use crate::domain::model::OutputFormat;
use crate::utils::error::{FusionError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(FusionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FusionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FusionError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(FusionError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for format in formats {
        format
            .parse::<OutputFormat>()
            .map_err(|_| FusionError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OutputFormat::ALL.join(", ")
                ),
            })?;
    }
    Ok(())
}

/// Every generator and measurement must parse and act on the same number of
/// qubits.
pub fn validate_operators(resource: &[String], measurements: &[String]) -> Result<()> {
    if resource.is_empty() && measurements.is_empty() {
        return Err(FusionError::ValidationError {
            message: "No generators or measurements given".to_string(),
        });
    }

    let mut width = None;
    let widths = resource
        .iter()
        .map(|g| g.parse::<Stabilizer>().map(|s| (g, s.num_qubits())))
        .chain(measurements.iter().map(|m| {
            m.parse::<PauliString>()
                .map(|p| (m, p.len()))
        }));

    for entry in widths {
        let (raw, len) = entry?;
        match width {
            None => width = Some(len),
            Some(expected) if expected != len => {
                return Err(FusionError::LengthMismatch {
                    expected,
                    actual: len,
                    operator: raw.trim().to_string(),
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}
