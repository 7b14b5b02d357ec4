//! The compiled, canonical R1CS artifact.
//!
//! This is the structure a Groth16 prover/verifier would consume.
//! Coefficients stay as `BigInt` here regardless of whether a curve was
//! supplied at `compile` time — converting them into a concrete scalar
//! field is deferred to [`crate::solver::solve`], which is generic over
//! any [`crate::field::ScalarField`]. `curve` is still recorded so
//! downstream consumers (and tests) can distinguish an "untyped" compile
//! from one targeting a specific curve.

use num_bigint::BigInt;

use crate::curve::CurveId;
use crate::debug::LogEntry;
use crate::r1c::R1C;

/// A lowered, immutable constraint system: wires laid out
/// `[internal | secret | public]`, ready to be solved many times.
#[derive(Debug, Clone)]
pub struct R1CS {
    pub curve: CurveId,

    pub num_wires: usize,
    pub num_public: usize,
    pub num_secret: usize,
    pub num_internal: usize,

    /// `constraints[..num_computational]` are solve-producing (each defines
    /// exactly one new wire, per its `Hint`); the remainder are
    /// check-only assertions (`Hint::NoHint`).
    pub constraints: Vec<R1C>,
    pub num_computational: usize,

    pub public_names: Vec<String>,
    pub secret_names: Vec<String>,

    pub coefficients: Vec<BigInt>,

    pub logs: Vec<LogEntry>,
    pub debug_info: Vec<LogEntry>,
}

impl R1CS {
    /// Canonical id of the one-wire: `num_internal + num_secret`.
    pub fn one_wire_id(&self) -> usize {
        self.num_internal + self.num_secret
    }

    pub fn is_typed(&self) -> bool {
        self.curve != CurveId::Untyped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_wire_id_formula() {
        let r1cs = R1CS {
            curve: CurveId::Untyped,
            num_wires: 10,
            num_public: 3,
            num_secret: 4,
            num_internal: 3,
            constraints: Vec::new(),
            num_computational: 0,
            public_names: vec!["one".into()],
            secret_names: Vec::new(),
            coefficients: Vec::new(),
            logs: Vec::new(),
            debug_info: Vec::new(),
        };
        assert_eq!(r1cs.one_wire_id(), 7);
    }
}
