//! Curve identifiers.
//!
//! The core never links a curve implementation; `CurveId` is only a tag
//! threaded through [`crate::cs::ConstraintSystem::compile`] so
//! [`crate::lower`] knows whether to leave coefficients untyped or convert
//! them via a caller-supplied [`crate::field::ScalarField`].
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveId {
    /// No curve: coefficients stay as `BigInt`s.
    Untyped,
    Bn256,
    Bls12_377,
    Bls12_381,
    Bw6_761,
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CurveId::Untyped => "UNKNOWN",
            CurveId::Bn256 => "BN256",
            CurveId::Bls12_377 => "BLS12-377",
            CurveId::Bls12_381 => "BLS12-381",
            CurveId::Bw6_761 => "BW6-761",
        };
        f.write_str(name)
    }
}

impl CurveId {
    pub fn parse(name: &str) -> Option<CurveId> {
        match name.to_ascii_uppercase().as_str() {
            "UNKNOWN" | "UNTYPED" => Some(CurveId::Untyped),
            "BN256" => Some(CurveId::Bn256),
            "BLS12-377" | "BLS12_377" | "BLS377" => Some(CurveId::Bls12_377),
            "BLS12-381" | "BLS12_381" | "BLS381" => Some(CurveId::Bls12_381),
            "BW6-761" | "BW6_761" | "BW761" => Some(CurveId::Bw6_761),
            _ => None,
        }
    }
}
