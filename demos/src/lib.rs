//! Shared scaffolding for the demo binaries: a minimal prime field to drive
//! [`zkcs::solve`] without linking a pairing-friendly curve crate (these
//! demos only show the compile/solve pipeline, never a proof), plus a `run`
//! helper that compiles a circuit once and shows the solver accept a good
//! witness and reject a bad one.

use num_bigint::BigInt;
use zkcs::{solve, Error, Witness, R1CS};

const MODULUS: u64 = (1u64 << 61) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoField(u64);

impl zkcs::ScalarField for DemoField {
    fn zero() -> Self {
        DemoField(0)
    }
    fn one() -> Self {
        DemoField(1)
    }
    fn from_big_int(value: &BigInt) -> Self {
        let m: BigInt = value.clone() % BigInt::from(MODULUS);
        let m = if m < BigInt::from(0) { m + BigInt::from(MODULUS) } else { m };
        let (_, digits) = m.to_u64_digits();
        DemoField(digits.first().copied().unwrap_or(0))
    }
    fn add(&self, other: &Self) -> Self {
        DemoField(((self.0 as u128 + other.0 as u128) % MODULUS as u128) as u64)
    }
    fn sub(&self, other: &Self) -> Self {
        DemoField(((self.0 as u128 + MODULUS as u128 - other.0 as u128) % MODULUS as u128) as u64)
    }
    fn mul(&self, other: &Self) -> Self {
        DemoField(((self.0 as u128 * other.0 as u128) % MODULUS as u128) as u64)
    }
    fn neg(&self) -> Self {
        DemoField((MODULUS - self.0) % MODULUS)
    }
    fn invert(&self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }
        let mut base = self.0 as u128;
        let mut exp = MODULUS - 2;
        let modulus = MODULUS as u128;
        let mut result = 1u128;
        while exp > 0 {
            if exp & 1 == 1 {
                result = (result * base) % modulus;
            }
            base = (base * base) % modulus;
            exp >>= 1;
        }
        Some(DemoField(result as u64))
    }
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
    fn to_canonical_bytes(&self) -> Vec<u8> {
        self.0.to_le_bytes().to_vec()
    }
}

/// Solves `r1cs` against `good` (expected to succeed) and `bad` (expected
/// to fail with `AssertionFailed`), logging both outcomes.
pub fn run_good_and_bad(name: &str, r1cs: &R1CS, good: &Witness, bad: &Witness) {
    env_logger::init();

    match solve::<DemoField>(r1cs, good) {
        Ok(out) => log::info!("{name}: good witness accepted ({} wires solved)", out.wires.len()),
        Err(e) => panic!("{name}: good witness unexpectedly rejected: {e}"),
    }

    match solve::<DemoField>(r1cs, bad) {
        Ok(_) => panic!("{name}: bad witness unexpectedly accepted"),
        Err(Error::AssertionFailed { rendered, .. }) => log::info!("{name}: bad witness rejected: {rendered}"),
        Err(e) => log::info!("{name}: bad witness rejected: {e}"),
    }
}
