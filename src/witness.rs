//! Witness supply: the accepted value shapes and binding a declared input
//! schema to concrete values.

use std::collections::BTreeMap;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::Num;

use crate::error::Error;
use crate::variable::Variable;

/// One input value, in any of four shapes: an arbitrary-precision integer,
/// a decimal string, a hex string (`0x...`), or a field element's canonical
/// byte form (interpreted big-endian).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    Int(BigInt),
    Decimal(String),
    Hex(String),
    FieldElementBytes(Vec<u8>),
}

impl Assignment {
    pub fn to_big_int(&self) -> Result<BigInt, Error> {
        match self {
            Assignment::Int(v) => Ok(v.clone()),
            Assignment::Decimal(s) => BigInt::from_str(s)
                .map_err(|_| Error::InconsistentInput(format!("invalid decimal `{s}`"))),
            Assignment::Hex(s) => {
                let stripped = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
                BigInt::from_str_radix(stripped, 16)
                    .map_err(|_| Error::InconsistentInput(format!("invalid hex `{s}`")))
            }
            Assignment::FieldElementBytes(bytes) => Ok(BigInt::from_bytes_be(num_bigint::Sign::Plus, bytes)),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Assignment {
            fn from(v: $t) -> Self {
                Assignment::Int(BigInt::from(v))
            }
        })*
    };
}
impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize, isize);

impl From<BigInt> for Assignment {
    fn from(v: BigInt) -> Self {
        Assignment::Int(v)
    }
}

impl From<&str> for Assignment {
    fn from(s: &str) -> Self {
        if s.starts_with("0x") || s.starts_with("0X") {
            Assignment::Hex(s.to_string())
        } else {
            Assignment::Decimal(s.to_string())
        }
    }
}

/// A `name -> value` map, ordered for deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct InputMap(BTreeMap<String, Assignment>);

impl InputMap {
    pub fn new() -> Self {
        InputMap(BTreeMap::new())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Assignment>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Assignment> {
        self.0.get(name)
    }
}

/// The fully resolved, per-visibility-class input values a
/// [`crate::solver`] needs to initialize its wire table, in canonical
/// per-class order (public input 0, the one-wire, is implicit and never
/// stored here).
#[derive(Debug, Clone, Default)]
pub struct Witness {
    pub public: Vec<BigInt>,
    pub secret: Vec<BigInt>,
}

/// Binds from a circuit schema whose `Variable` fields already carry
/// `bound_value`s (set via [`Variable::assign`]). `public_vars` and
/// `secret_vars` hold only the circuit's own declared inputs — the one-wire
/// is never part of a [`crate::schema::CircuitSchema`]'s fields, so unlike
/// [`bind_from_map`] there is nothing to skip here.
pub fn bind_from_variables(public_vars: &[Variable], secret_vars: &[Variable]) -> Result<Witness, Error> {
    let public = public_vars
        .iter()
        .map(|v| {
            v.bound_value()
                .ok_or_else(|| Error::InconsistentInput(format!("public input #{}", v.id())))
                .and_then(Assignment::to_big_int)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let secret = secret_vars
        .iter()
        .map(|v| {
            v.bound_value()
                .ok_or_else(|| Error::InconsistentInput(format!("secret input #{}", v.id())))
                .and_then(Assignment::to_big_int)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Witness { public, secret })
}

/// Binds from declared names looked up in an [`InputMap`].
/// `public_names`/`secret_names` are the name vectors stored
/// on the compiled R1CS (`public_names[0]` is always `"one"` and is
/// skipped).
pub fn bind_from_map(public_names: &[String], secret_names: &[String], map: &InputMap) -> Result<Witness, Error> {
    let public = public_names
        .iter()
        .skip(1)
        .map(|name| {
            map.get(name)
                .ok_or_else(|| Error::InconsistentInput(name.clone()))
                .and_then(Assignment::to_big_int)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let secret = secret_names
        .iter()
        .map(|name| {
            map.get(name)
                .ok_or_else(|| Error::InconsistentInput(name.clone()))
                .and_then(Assignment::to_big_int)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Witness { public, secret })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_four_shapes() {
        assert_eq!(Assignment::Int(BigInt::from(42)).to_big_int().unwrap(), BigInt::from(42));
        assert_eq!(Assignment::Decimal("42".into()).to_big_int().unwrap(), BigInt::from(42));
        assert_eq!(Assignment::Hex("0x2a".into()).to_big_int().unwrap(), BigInt::from(42));
        assert_eq!(
            Assignment::FieldElementBytes(vec![0x2a]).to_big_int().unwrap(),
            BigInt::from(42)
        );
    }

    #[test]
    fn str_literal_detects_hex_prefix() {
        let a: Assignment = "0x10".into();
        assert_eq!(a.to_big_int().unwrap(), BigInt::from(16));
        let b: Assignment = "16".into();
        assert_eq!(b.to_big_int().unwrap(), BigInt::from(16));
    }

    #[test]
    fn bind_from_map_reports_missing_name() {
        let map = InputMap::new();
        let err = bind_from_map(&["one".into(), "x".into()], &[], &map).unwrap_err();
        assert!(matches!(err, Error::InconsistentInput(name) if name == "x"));
    }
}
