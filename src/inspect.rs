//! Debug-printing and hashing helpers for a compiled [`R1CS`]: render its
//! constraints as readable text, find the first constraint a wire table
//! fails to satisfy, and hash its shape for equality checks across compiles.

use blake2s_simd::Params as Blake2sParams;
use byteorder::{BigEndian, ByteOrder};

use crate::field::ScalarField;
use crate::r1cs::R1CS;
use crate::term::{LinearExpression, Term};
use crate::variable::Visibility;

fn wire_name(r1cs: &R1CS, term: &Term) -> String {
    match term.visibility() {
        Visibility::Internal => format!("internal#{}", term.wire_id()),
        Visibility::Secret => r1cs
            .secret_names
            .get(term.wire_id() as usize)
            .cloned()
            .unwrap_or_else(|| format!("secret#{}", term.wire_id())),
        Visibility::Public => r1cs
            .public_names
            .get(term.wire_id() as usize)
            .cloned()
            .unwrap_or_else(|| format!("public#{}", term.wire_id())),
        Visibility::Unset => "<unset>".to_string(),
    }
}

fn pretty_expr(r1cs: &R1CS, expr: &LinearExpression) -> String {
    if expr.is_empty() {
        return "0".to_string();
    }
    let mut parts = Vec::with_capacity(expr.len());
    for term in expr.terms() {
        let coeff = &r1cs.coefficients[term.coeff_id() as usize];
        let name = wire_name(r1cs, term);
        if coeff == &num_bigint::BigInt::from(1) {
            parts.push(name);
        } else {
            parts.push(format!("{coeff} . {name}"));
        }
    }
    format!("({})", parts.join(" + "))
}

/// One line per constraint: `N: (L) * (R) = (O)`.
pub fn pretty_print(r1cs: &R1CS) -> String {
    let mut out = String::new();
    for (idx, record) in r1cs.constraints.iter().enumerate() {
        out.push_str(&format!(
            "{idx}: {} * {} = {}\n",
            pretty_expr(r1cs, &record.l),
            pretty_expr(r1cs, &record.r),
            pretty_expr(r1cs, &record.o)
        ));
    }
    out
}

fn eval_expr<F: ScalarField>(expr: &LinearExpression, wires: &[F], coefficients: &[num_bigint::BigInt]) -> F {
    let mut acc = F::zero();
    for term in expr.terms() {
        let coeff = F::from_big_int(&coefficients[term.coeff_id() as usize]);
        acc = acc.add(&coeff.mul(&wires[term.wire_id() as usize]));
    }
    acc
}

/// Scans every constraint (computational and assertion alike) against an
/// already-solved wire table and returns the index of the first one that
/// does not hold. `None` means `wires` is a valid satisfying assignment.
pub fn which_is_unsatisfied<F: ScalarField>(r1cs: &R1CS, wires: &[F]) -> Option<usize> {
    r1cs.constraints.iter().position(|record| {
        let l = eval_expr::<F>(&record.l, wires, &r1cs.coefficients);
        let r = eval_expr::<F>(&record.r, wires, &r1cs.coefficients);
        let o = eval_expr::<F>(&record.o, wires, &r1cs.coefficients);
        l.mul(&r) != o
    })
}

/// A content hash over the constraint shape (not the coefficients' curve
/// representation, since this core never picks one) — useful for asserting
/// two compiles of the same circuit produced byte-identical constraints.
pub fn hash(r1cs: &R1CS) -> String {
    let mut h = Blake2sParams::new().hash_length(32).to_state();
    let mut header = [0u8; 16];
    BigEndian::write_u64(&mut header[0..8], r1cs.num_wires as u64);
    BigEndian::write_u64(&mut header[8..16], r1cs.constraints.len() as u64);
    h.update(&header);

    for record in &r1cs.constraints {
        for expr in [&record.l, &record.r, &record.o] {
            let mut len_buf = [0u8; 8];
            BigEndian::write_u64(&mut len_buf, expr.len() as u64);
            h.update(&len_buf);
            for term in expr.terms() {
                let mut buf = [0u8; 9];
                buf[0] = match term.visibility() {
                    Visibility::Internal => b'I',
                    Visibility::Secret => b'S',
                    Visibility::Public => b'P',
                    Visibility::Unset => b'?',
                };
                BigEndian::write_u64(&mut buf[1..9], term.wire_id() as u64);
                h.update(&buf);
                h.update(r1cs.coefficients[term.coeff_id() as usize].to_signed_bytes_be().as_slice());
            }
        }
    }

    let digest = h.finalize();
    digest.as_bytes().iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::ConstraintSystem;
    use crate::curve::CurveId;

    #[test]
    fn hash_is_deterministic_across_identical_compiles() {
        let build = || {
            let mut cs = ConstraintSystem::new();
            let x = cs.secret_input("x").unwrap();
            let _ = cs.mul(x.clone(), x);
            cs.compile(CurveId::Untyped).unwrap()
        };
        assert_eq!(hash(&build()), hash(&build()));
    }

    #[test]
    fn pretty_print_lists_one_line_per_constraint() {
        let mut cs = ConstraintSystem::new();
        let x = cs.secret_input("x").unwrap();
        let _ = cs.mul(x.clone(), x);
        let r1cs = cs.compile(CurveId::Untyped).unwrap();
        assert_eq!(pretty_print(&r1cs).lines().count(), r1cs.constraints.len());
    }
}
