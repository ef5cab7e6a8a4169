//! Resource stabilizer update under a sequence of fusion measurements.
//!
//! For each measurement M:
//! - if every generator commutes with M, `(outcome, M)` is appended;
//! - otherwise the first anticommuting generator is the pivot. It is replaced
//!   by `(outcome, M)` and every other anticommuting generator is multiplied
//!   by the old pivot, which makes it commute with M.

use crate::core::pauli::{anticommutes, multiply, PauliString, Sign, Stabilizer};
use crate::utils::error::{FusionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Measurement outcomes keyed by the measured Pauli string. Missing entries
/// default to +1, and repeated measurements of the same string share an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcomes(BTreeMap<PauliString, Sign>);

impl Outcomes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, measurement: PauliString, outcome: Sign) -> Option<Sign> {
        self.0.insert(measurement, outcome)
    }

    pub fn get(&self, measurement: &PauliString) -> Sign {
        self.0.get(measurement).copied().unwrap_or(Sign::Plus)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PauliString, Sign)> for Outcomes {
    fn from_iter<T: IntoIterator<Item = (PauliString, Sign)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdateAction {
    /// M commuted with the whole group and was added at `index`.
    Appended { index: usize },
    /// The generator at `pivot` was replaced; `multiplied` lists the other
    /// generators that absorbed the old pivot.
    Replaced {
        pivot: usize,
        previous: Stabilizer,
        multiplied: Vec<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStep {
    pub measurement: PauliString,
    pub outcome: Sign,
    pub action: UpdateAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub generators: Vec<Stabilizer>,
    pub steps: Vec<UpdateStep>,
}

/// Apply `measurements` in order to a copy of `resource`.
pub fn update_resource_with_fusions(
    resource: &[Stabilizer],
    measurements: &[PauliString],
    outcomes: &Outcomes,
) -> Result<UpdateResult> {
    let mut gens = resource.to_vec();
    let mut steps = Vec::with_capacity(measurements.len());

    let num_qubits = gens
        .first()
        .map(Stabilizer::num_qubits)
        .or_else(|| measurements.first().map(PauliString::len))
        .unwrap_or(0);

    for measurement in measurements {
        if measurement.len() != num_qubits {
            return Err(FusionError::LengthMismatch {
                expected: num_qubits,
                actual: measurement.len(),
                operator: measurement.to_string(),
            });
        }

        let outcome = outcomes.get(measurement);
        let step = apply_measurement(&mut gens, measurement, outcome)?;
        tracing::debug!("Measured {}{}: {:?}", outcome, measurement, step.action);
        steps.push(step);
    }

    Ok(UpdateResult {
        generators: gens,
        steps,
    })
}

fn apply_measurement(
    gens: &mut Vec<Stabilizer>,
    measurement: &PauliString,
    outcome: Sign,
) -> Result<UpdateStep> {
    let mut anti_idx = Vec::new();
    for (j, g) in gens.iter().enumerate() {
        if anticommutes(&g.pauli, measurement)? {
            anti_idx.push(j);
        }
    }

    let measured = Stabilizer::new(outcome, measurement.clone());

    let Some((&pivot, rest)) = anti_idx.split_first() else {
        gens.push(measured);
        return Ok(UpdateStep {
            measurement: measurement.clone(),
            outcome,
            action: UpdateAction::Appended {
                index: gens.len() - 1,
            },
        });
    };

    let previous = std::mem::replace(&mut gens[pivot], measured);
    for &j in rest {
        gens[j] = multiply(&gens[j], &previous)?;
    }

    Ok(UpdateStep {
        measurement: measurement.clone(),
        outcome,
        action: UpdateAction::Replaced {
            pivot,
            previous,
            multiplied: rest.to_vec(),
        },
    })
}
