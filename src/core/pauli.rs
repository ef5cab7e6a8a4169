//! Pauli operators, signed Pauli strings and their products.
//!
//! A stabilizer generator is a Hermitian Pauli operator, so its phase is
//! restricted to ±1. Products are tracked with a phase exponent in Z4
//! (factor i^e) and folded back into a sign; an odd exponent means the
//! product is not Hermitian and is rejected.

use crate::utils::error::{FusionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    /// Single-qubit product `self * other` as `(e, P)` meaning `i^e * P`.
    pub fn product(self, other: Pauli) -> (u8, Pauli) {
        use Pauli::*;
        match (self, other) {
            (I, p) | (p, I) => (0, p),
            (X, X) | (Y, Y) | (Z, Z) => (0, I),
            (X, Y) => (1, Z),
            (Y, Z) => (1, X),
            (Z, X) => (1, Y),
            (Y, X) => (3, Z),
            (Z, Y) => (3, X),
            (X, Z) => (3, Y),
        }
    }

    /// Two single-qubit Paulis anticommute iff both are non-identity and differ.
    pub fn anticommutes_with(self, other: Pauli) -> bool {
        self != Pauli::I && other != Pauli::I && self != other
    }

    pub fn as_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }

    pub fn from_char(c: char) -> Option<Pauli> {
        match c.to_ascii_uppercase() {
            'I' => Some(Pauli::I),
            'X' => Some(Pauli::X),
            'Y' => Some(Pauli::Y),
            'Z' => Some(Pauli::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sign {
    #[default]
    Plus,
    Minus,
}

impl Sign {
    /// Non-negative integers map to `Plus`, negative ones to `Minus`.
    pub fn from_int(value: i64) -> Sign {
        if value >= 0 {
            Sign::Plus
        } else {
            Sign::Minus
        }
    }

    /// Strict conversion for measurement outcomes, which must be exactly ±1.
    pub fn from_outcome(measurement: &str, value: i64) -> Result<Sign> {
        match value {
            1 => Ok(Sign::Plus),
            -1 => Ok(Sign::Minus),
            _ => Err(FusionError::InvalidOutcome {
                measurement: measurement.to_string(),
                value,
            }),
        }
    }

    pub fn as_int(self) -> i8 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }

    pub fn flip(self) -> Sign {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        if self == rhs {
            Sign::Plus
        } else {
            Sign::Minus
        }
    }
}

impl Serialize for Sign {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_int())
    }
}

impl<'de> Deserialize<'de> for Sign {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        match value {
            1 => Ok(Sign::Plus),
            -1 => Ok(Sign::Minus),
            other => Err(serde::de::Error::custom(format!(
                "sign must be 1 or -1, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Plus => write!(f, "+"),
            Sign::Minus => write!(f, "-"),
        }
    }
}

/// An n-qubit tensor product of single-qubit Paulis, qubit 0 first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PauliString(Vec<Pauli>);

impl PauliString {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ops(&self) -> &[Pauli] {
        &self.0
    }

    fn check_len(&self, other: &PauliString) -> Result<()> {
        if self.len() != other.len() {
            return Err(FusionError::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
                operator: other.to_string(),
            });
        }
        Ok(())
    }
}

impl FromStr for PauliString {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        trimmed
            .chars()
            .map(|c| {
                Pauli::from_char(c).ok_or_else(|| FusionError::PauliParseError {
                    input: trimmed.to_string(),
                    symbol: c,
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(PauliString)
    }
}

impl TryFrom<String> for PauliString {
    type Error = FusionError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PauliString> for String {
    fn from(value: PauliString) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.0 {
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

/// A Hermitian Pauli operator with a ±1 phase, e.g. `-ZZI`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Stabilizer {
    pub sign: Sign,
    pub pauli: PauliString,
}

impl Stabilizer {
    pub fn new(sign: Sign, pauli: PauliString) -> Self {
        Self { sign, pauli }
    }

    pub fn num_qubits(&self) -> usize {
        self.pauli.len()
    }

    pub fn pretty(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Stabilizer {
    type Err = FusionError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (sign, body) = match trimmed.chars().next() {
            Some('+') => (Sign::Plus, &trimmed[1..]),
            Some('-') => (Sign::Minus, &trimmed[1..]),
            _ => (Sign::Plus, trimmed),
        };

        let pauli: PauliString = body.parse().map_err(|e| match e {
            FusionError::PauliParseError { symbol, .. } => FusionError::StabilizerParseError {
                input: trimmed.to_string(),
                reason: format!("unexpected symbol '{}'", symbol),
            },
            other => other,
        })?;

        Ok(Self { sign, pauli })
    }
}

impl TryFrom<String> for Stabilizer {
    type Error = FusionError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Stabilizer> for String {
    fn from(value: Stabilizer) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Stabilizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign, self.pauli)
    }
}

/// Whether two Pauli strings anticommute: an odd number of positions where
/// both act non-trivially with different operators.
pub fn anticommutes(p: &PauliString, q: &PauliString) -> Result<bool> {
    p.check_len(q)?;

    let parity = p
        .ops()
        .iter()
        .zip(q.ops())
        .filter(|(a, b)| a.anticommutes_with(**b))
        .count()
        % 2;

    Ok(parity == 1)
}

/// Product `p * q` of two signed Pauli operators.
///
/// Fails with `NonHermitianPhase` when the operators anticommute, since the
/// product then carries a ±i phase.
pub fn multiply(p: &Stabilizer, q: &Stabilizer) -> Result<Stabilizer> {
    p.pauli.check_len(&q.pauli)?;

    let mut phase_exp = 0u8;
    let mut ops = Vec::with_capacity(p.num_qubits());

    for (a, b) in p.pauli.ops().iter().zip(q.pauli.ops()) {
        let (e, r) = a.product(*b);
        phase_exp = (phase_exp + e) % 4;
        ops.push(r);
    }

    if phase_exp % 2 != 0 {
        return Err(FusionError::NonHermitianPhase {
            left: p.to_string(),
            right: q.to_string(),
        });
    }

    let mut sign = p.sign * q.sign;
    if phase_exp == 2 {
        sign = sign.flip();
    }

    Ok(Stabilizer::new(sign, PauliString(ops)))
}

/// Display form of a stabilizer, e.g. `+XXI`.
pub fn pretty(stabilizer: &Stabilizer) -> String {
    stabilizer.pretty()
}
