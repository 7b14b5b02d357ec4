//! The field-arithmetic boundary.
//!
//! The core never does field arithmetic itself; it manipulates coefficient
//! *representatives* as arbitrary-precision integers (`num_bigint::BigInt`)
//! right up until [`crate::lower`] optionally converts them for a concrete
//! curve. This module is the seam: a small trait for "a concrete prime
//! field", plus a blanket impl so any `ff::PrimeField` satisfies it for
//! free.

use num_bigint::{BigInt, Sign};

/// Operations the witness solver and the typed-lowering step need from a
/// concrete prime field.
pub trait ScalarField: Clone + PartialEq + std::fmt::Debug {
    fn zero() -> Self;
    fn one() -> Self;
    fn from_big_int(value: &BigInt) -> Self;
    fn add(&self, other: &Self) -> Self;
    fn sub(&self, other: &Self) -> Self;
    fn mul(&self, other: &Self) -> Self;
    fn neg(&self) -> Self;
    /// `None` iff `self` is the zero element.
    fn invert(&self) -> Option<Self>;
    fn is_zero(&self) -> bool;
    fn to_canonical_bytes(&self) -> Vec<u8>;
}

/// Any `ff::PrimeField` gets [`ScalarField`] for free.
impl<F: ff::PrimeField> ScalarField for F {
    fn zero() -> Self {
        <F as ff::Field>::ZERO
    }

    fn one() -> Self {
        <F as ff::Field>::ONE
    }

    fn from_big_int(value: &BigInt) -> Self {
        bigint_to_field::<F>(value)
    }

    fn add(&self, other: &Self) -> Self {
        *self + *other
    }

    fn sub(&self, other: &Self) -> Self {
        *self - *other
    }

    fn mul(&self, other: &Self) -> Self {
        *self * *other
    }

    fn neg(&self) -> Self {
        -*self
    }

    fn invert(&self) -> Option<Self> {
        let inv = ff::Field::invert(self);
        if bool::from(inv.is_some()) {
            Some(inv.unwrap())
        } else {
            None
        }
    }

    fn is_zero(&self) -> bool {
        bool::from(ff::Field::is_zero(self))
    }

    fn to_canonical_bytes(&self) -> Vec<u8> {
        self.to_repr().as_ref().to_vec()
    }
}

/// Converts an arbitrary-precision integer into any prime field by repeated
/// doubling, the portable technique that works for every `ff::PrimeField`
/// impl regardless of whether it exposes a `from_str_vartime`-style decimal
/// parser. Negative values are folded via the field's additive inverse.
pub fn bigint_to_field<F: ff::PrimeField>(value: &BigInt) -> F {
    let (sign, magnitude) = value.to_bytes_be();
    let mut acc = F::ZERO;
    let two = F::from(2u64);
    for byte in magnitude {
        for bit in (0..8).rev() {
            acc *= two;
            if (byte >> bit) & 1 == 1 {
                acc += F::ONE;
            }
        }
    }
    if sign == Sign::Minus {
        -acc
    } else {
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A minimal field mock to exercise `ScalarField` without pulling in a
    // real curve crate: arithmetic mod 101.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Mod101(u64);

    impl ScalarField for Mod101 {
        fn zero() -> Self {
            Mod101(0)
        }
        fn one() -> Self {
            Mod101(1)
        }
        fn from_big_int(value: &BigInt) -> Self {
            let m: BigInt = value.clone() % BigInt::from(101);
            let m = if m < BigInt::from(0) { m + BigInt::from(101) } else { m };
            Mod101(m.to_string().parse().unwrap())
        }
        fn add(&self, other: &Self) -> Self {
            Mod101((self.0 + other.0) % 101)
        }
        fn sub(&self, other: &Self) -> Self {
            Mod101((self.0 + 101 - other.0) % 101)
        }
        fn mul(&self, other: &Self) -> Self {
            Mod101((self.0 * other.0) % 101)
        }
        fn neg(&self) -> Self {
            Mod101((101 - self.0) % 101)
        }
        fn invert(&self) -> Option<Self> {
            if self.0 == 0 {
                return None;
            }
            for i in 1..101 {
                if (self.0 * i) % 101 == 1 {
                    return Some(Mod101(i));
                }
            }
            None
        }
        fn is_zero(&self) -> bool {
            self.0 == 0
        }
        fn to_canonical_bytes(&self) -> Vec<u8> {
            self.0.to_le_bytes().to_vec()
        }
    }

    #[test]
    fn mock_field_roundtrips() {
        let a = Mod101::from_big_int(&BigInt::from(7));
        let b = Mod101::from_big_int(&BigInt::from(15));
        assert_eq!(a.add(&b), Mod101(22));
        assert_eq!(a.mul(&b), Mod101(105 % 101));
        let inv = a.invert().unwrap();
        assert_eq!(a.mul(&inv), Mod101::one());
    }

    #[test]
    fn negative_bigint_maps_to_additive_inverse() {
        let a = Mod101::from_big_int(&BigInt::from(-1));
        assert_eq!(a, Mod101(100));
    }
}
