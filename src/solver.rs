//! The witness solver.
//!
//! Given a compiled [`R1CS`] and concrete input values, walks
//! `constraints[..num_computational]` filling in exactly one new wire per
//! constraint per its [`Hint`], then checks every remaining assertion.
//! Generic over [`ScalarField`] so the core itself never links a curve.

use num_bigint::BigInt;

use crate::coeff::SpecialCoeff;
use crate::error::Error;
use crate::field::ScalarField;
use crate::r1c::Hint;
use crate::r1cs::R1CS;
use crate::term::{LinearExpression, Term};
use crate::witness::Witness;

/// The result of a successful solve: every wire's value, in canonical
/// order, plus the rendered output of every `println` the circuit emitted.
#[derive(Debug, Clone)]
pub struct SolveOutput<F> {
    pub wires: Vec<F>,
    pub logs: Vec<String>,
}

fn coeff_as_field<F: ScalarField>(term: &Term, coefficients: &[BigInt]) -> F {
    match term.special() {
        SpecialCoeff::Zero => F::zero(),
        SpecialCoeff::One => F::one(),
        SpecialCoeff::MinusOne => F::one().neg(),
        SpecialCoeff::Two => F::one().add(&F::one()),
        SpecialCoeff::None => F::from_big_int(&coefficients[term.coeff_id() as usize]),
    }
}

fn eval_term<F: ScalarField>(term: &Term, wires: &[Option<F>], coefficients: &[BigInt]) -> Option<F> {
    let value = wires[term.wire_id() as usize].clone()?;
    Some(coeff_as_field::<F>(term, coefficients).mul(&value))
}

fn eval_full<F: ScalarField>(expr: &LinearExpression, wires: &[Option<F>], coefficients: &[BigInt]) -> Option<F> {
    let mut acc = F::zero();
    for term in expr.terms() {
        acc = acc.add(&eval_term::<F>(term, wires, coefficients)?);
    }
    Some(acc)
}

/// Sums the already-known terms of `expr` and returns the single
/// still-unknown one, if any. Every `SolveL`/`SolveR`/`SolveO` constraint
/// is built so exactly one term in its solved-for side is unknown; more
/// than one would mean the builder emitted a malformed constraint.
fn eval_partial<F: ScalarField>(expr: &LinearExpression, wires: &[Option<F>], coefficients: &[BigInt]) -> (F, Option<Term>) {
    let mut acc = F::zero();
    let mut unknown = None;
    for term in expr.terms() {
        match wires[term.wire_id() as usize].clone() {
            Some(value) => acc = acc.add(&coeff_as_field::<F>(term, coefficients).mul(&value)),
            None => {
                debug_assert!(unknown.is_none(), "linear expression has more than one unknown wire");
                unknown = Some(*term);
            }
        }
    }
    (acc, unknown)
}

fn solve_for<F: ScalarField>(
    target: F,
    known_sum: F,
    unknown: Term,
    coefficients: &[BigInt],
    constraint_index: usize,
) -> Result<F, Error> {
    let coeff = coeff_as_field::<F>(&unknown, coefficients);
    let inv = coeff.invert().ok_or(Error::DivByZero(constraint_index))?;
    Ok(target.sub(&known_sum).mul(&inv))
}

fn render_term<F: ScalarField>(term: &Term, wires: &[Option<F>], coefficients: &[BigInt]) -> String {
    match eval_term::<F>(term, wires, coefficients) {
        Some(value) => format!("{value:?}"),
        None => "<unsolved>".to_string(),
    }
}

/// Initializes the wire table from `witness`, then runs every computational
/// constraint followed by every assertion, in order. `logs` are rendered
/// last, once every wire they might reference is guaranteed solved.
pub fn solve<F: ScalarField>(r1cs: &R1CS, witness: &Witness) -> Result<SolveOutput<F>, Error> {
    if witness.secret.len() != r1cs.num_secret {
        return Err(Error::InconsistentInput(format!(
            "expected {} secret inputs, got {}",
            r1cs.num_secret,
            witness.secret.len()
        )));
    }
    if witness.public.len() + 1 != r1cs.num_public {
        return Err(Error::InconsistentInput(format!(
            "expected {} public inputs, got {}",
            r1cs.num_public - 1,
            witness.public.len()
        )));
    }

    let mut wires: Vec<Option<F>> = vec![None; r1cs.num_wires];
    wires[r1cs.one_wire_id()] = Some(F::one());

    for (i, value) in witness.secret.iter().enumerate() {
        wires[r1cs.num_internal + i] = Some(F::from_big_int(value));
    }
    let public_base = r1cs.num_internal + r1cs.num_secret + 1;
    for (i, value) in witness.public.iter().enumerate() {
        wires[public_base + i] = Some(F::from_big_int(value));
    }

    for (idx, record) in r1cs.constraints[..r1cs.num_computational].iter().enumerate() {
        match record.hint {
            Hint::SolveL => {
                let r_val = eval_full::<F>(&record.r, &wires, &r1cs.coefficients)
                    .expect("SolveL requires R fully known");
                let o_val = eval_full::<F>(&record.o, &wires, &r1cs.coefficients)
                    .expect("SolveL requires O fully known");
                let inv_r = r_val.invert().ok_or(Error::DivByZero(idx))?;
                let target = o_val.mul(&inv_r);
                let (known, unknown) = eval_partial::<F>(&record.l, &wires, &r1cs.coefficients);
                let unknown = unknown.expect("SolveL constraint has no unknown wire in L");
                let value = solve_for::<F>(target, known, unknown, &r1cs.coefficients, idx)?;
                wires[unknown.wire_id() as usize] = Some(value);
            }
            Hint::SolveR => {
                let l_val = eval_full::<F>(&record.l, &wires, &r1cs.coefficients)
                    .expect("SolveR requires L fully known");
                let o_val = eval_full::<F>(&record.o, &wires, &r1cs.coefficients)
                    .expect("SolveR requires O fully known");
                let inv_l = l_val.invert().ok_or(Error::DivByZero(idx))?;
                let target = o_val.mul(&inv_l);
                let (known, unknown) = eval_partial::<F>(&record.r, &wires, &r1cs.coefficients);
                let unknown = unknown.expect("SolveR constraint has no unknown wire in R");
                let value = solve_for::<F>(target, known, unknown, &r1cs.coefficients, idx)?;
                wires[unknown.wire_id() as usize] = Some(value);
            }
            Hint::SolveO => {
                let l_val = eval_full::<F>(&record.l, &wires, &r1cs.coefficients)
                    .expect("SolveO requires L fully known");
                let r_val = eval_full::<F>(&record.r, &wires, &r1cs.coefficients)
                    .expect("SolveO requires R fully known");
                let target = l_val.mul(&r_val);
                let (known, unknown) = eval_partial::<F>(&record.o, &wires, &r1cs.coefficients);
                let unknown = unknown.expect("SolveO constraint has no unknown wire in O");
                let value = solve_for::<F>(target, known, unknown, &r1cs.coefficients, idx)?;
                wires[unknown.wire_id() as usize] = Some(value);
            }
            Hint::ToBinary { bits } => {
                let l_val = eval_full::<F>(&record.l, &wires, &r1cs.coefficients)
                    .expect("ToBinary requires its source fully known");
                let bytes = l_val.to_canonical_bytes();
                for (i, term) in record.o.terms().iter().enumerate().take(bits) {
                    let byte = bytes.get(i / 8).copied().unwrap_or(0);
                    let bit = (byte >> (i % 8)) & 1;
                    wires[term.wire_id() as usize] = Some(if bit == 1 { F::one() } else { F::zero() });
                }
                // The low `bits` bits of the source only recompose to its
                // full value when the source actually fits in `bits` width;
                // an out-of-range value silently drops its high bits above,
                // so the packing equation must be checked explicitly.
                let packed = eval_full::<F>(&record.o, &wires, &r1cs.coefficients)
                    .expect("every bit wire was just assigned above");
                if packed != l_val {
                    return Err(Error::AssertionFailed {
                        index: idx,
                        rendered: format!("value does not fit in {bits} bits"),
                    });
                }
            }
            Hint::NoHint => unreachable!("computational constraints never carry NoHint"),
        }
    }

    for (k, record) in r1cs.constraints[r1cs.num_computational..].iter().enumerate() {
        let index = r1cs.num_computational + k;
        let l_val = eval_full::<F>(&record.l, &wires, &r1cs.coefficients)
            .expect("assertion operands are always fully known by this point");
        let r_val = eval_full::<F>(&record.r, &wires, &r1cs.coefficients)
            .expect("assertion operands are always fully known by this point");
        let o_val = eval_full::<F>(&record.o, &wires, &r1cs.coefficients)
            .expect("assertion operands are always fully known by this point");
        if l_val.mul(&r_val) != o_val {
            let rendered = r1cs
                .debug_info
                .get(k)
                .map(|entry| entry.render(|t| render_term::<F>(t, &wires, &r1cs.coefficients)))
                .unwrap_or_else(|| format!("constraint #{index} unsatisfied"));
            return Err(Error::AssertionFailed { index, rendered });
        }
    }

    let logs = r1cs
        .logs
        .iter()
        .map(|entry| entry.render(|t| render_term::<F>(t, &wires, &r1cs.coefficients)))
        .collect();

    let wires = wires
        .into_iter()
        .map(|w| w.expect("every wire is either an input or computed by a constraint"))
        .collect();

    Ok(SolveOutput { wires, logs })
}

#[cfg(test)]
mod tests {
    use super::*;

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
            (1..101).find(|i| (self.0 * i) % 101 == 1).map(Mod101)
        }
        fn is_zero(&self) -> bool {
            self.0 == 0
        }
        fn to_canonical_bytes(&self) -> Vec<u8> {
            self.0.to_le_bytes().to_vec()
        }
    }

    use crate::cs::ConstraintSystem;
    use crate::curve::CurveId;
    use crate::witness::bind_from_variables;

    #[test]
    fn solves_a_multiplication_circuit() {
        let mut cs = ConstraintSystem::new();
        let mut x = cs.secret_input("x").unwrap();
        let mut y = cs.secret_input("y").unwrap();
        let z = cs.mul(x.clone(), y.clone());
        cs.assert_is_equal(z, 12);
        x.assign(3);
        y.assign(4);
        let witness = bind_from_variables(&[], &[x, y]).unwrap();
        let r1cs = cs.compile(CurveId::Untyped).unwrap();
        let out = solve::<Mod101>(&r1cs, &witness).unwrap();
        assert!(out.logs.is_empty());
    }

    #[test]
    fn inverse_of_zero_is_div_by_zero() {
        let mut cs = ConstraintSystem::new();
        let mut x = cs.secret_input("x").unwrap();
        let _ = cs.inverse(x.clone());
        x.assign(0);
        let witness = bind_from_variables(&[], &[x]).unwrap();
        let r1cs = cs.compile(CurveId::Untyped).unwrap();
        let err = solve::<Mod101>(&r1cs, &witness).unwrap_err();
        assert!(matches!(err, Error::DivByZero(_)));
    }

    #[test]
    fn failing_assertion_renders_debug_info() {
        let mut cs = ConstraintSystem::new();
        let mut x = cs.secret_input("x").unwrap();
        cs.assert_is_equal(x.clone(), 5);
        x.assign(4);
        let witness = bind_from_variables(&[], &[x]).unwrap();
        let r1cs = cs.compile(CurveId::Untyped).unwrap();
        let err = solve::<Mod101>(&r1cs, &witness).unwrap_err();
        match err {
            Error::AssertionFailed { rendered, .. } => assert!(rendered.contains("assertion failed")),
            other => panic!("expected AssertionFailed, got {other:?}"),
        }
    }

    #[test]
    fn to_binary_decomposes_little_endian() {
        let mut cs = ConstraintSystem::new();
        let mut x = cs.secret_input("x").unwrap();
        let bits = cs.to_binary(x.clone(), 4);
        cs.assert_is_equal(bits[0].clone(), 1);
        cs.assert_is_equal(bits[1].clone(), 0);
        cs.assert_is_equal(bits[2].clone(), 1);
        cs.assert_is_equal(bits[3].clone(), 0);
        x.assign(5); // 0b0101
        let witness = bind_from_variables(&[], &[x]).unwrap();
        let r1cs = cs.compile(CurveId::Untyped).unwrap();
        solve::<Mod101>(&r1cs, &witness).unwrap();
    }

    #[test]
    fn to_binary_rejects_a_value_that_does_not_fit_in_the_requested_width() {
        let mut cs = ConstraintSystem::new();
        let mut x = cs.secret_input("x").unwrap();
        let _bits = cs.to_binary(x.clone(), 4);
        x.assign(37); // needs 6 bits, requested only 4
        let witness = bind_from_variables(&[], &[x]).unwrap();
        let r1cs = cs.compile(CurveId::Untyped).unwrap();
        let err = solve::<Mod101>(&r1cs, &witness).unwrap_err();
        assert!(matches!(err, Error::AssertionFailed { .. }));
    }
}
