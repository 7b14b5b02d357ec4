//! Lowering a populated [`ConstraintSystem`] to a canonical [`R1CS`]:
//! renumber every wire into the canonical `internal || secret || public`
//! layout, concatenate `constraints` then `assertions`, and rewrite every
//! `Term` — in constraints, logs, and debug info alike — to use the new
//! canonical ids.

use crate::cs::ConstraintSystem;
use crate::curve::CurveId;
use crate::debug::LogEntry;
use crate::error::Error;
use crate::r1c::R1C;
use crate::r1cs::R1CS;
use crate::term::{LinearExpression, Term};
use crate::variable::Visibility;

fn remap_term(term: &Term, num_internal: usize, num_secret: usize) -> Result<Term, Error> {
    let canonical = match term.visibility() {
        Visibility::Internal => term.wire_id(),
        Visibility::Secret => term.wire_id() + num_internal as u32,
        Visibility::Public => term.wire_id() + (num_internal + num_secret) as u32,
        Visibility::Unset => {
            return Err(Error::UnsetVariable {
                location: String::new(),
            })
        }
    };
    Ok(term.remapped(canonical))
}

fn remap_expr(expr: &LinearExpression, num_internal: usize, num_secret: usize) -> Result<LinearExpression, Error> {
    let terms = expr
        .terms()
        .iter()
        .map(|term| remap_term(term, num_internal, num_secret))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LinearExpression::from_terms(terms))
}

fn remap_r1c(record: &R1C, num_internal: usize, num_secret: usize) -> Result<R1C, Error> {
    Ok(R1C::new(
        remap_expr(&record.l, num_internal, num_secret)?,
        remap_expr(&record.r, num_internal, num_secret)?,
        remap_expr(&record.o, num_internal, num_secret)?,
        record.hint,
    ))
}

fn remap_log_entry(entry: &LogEntry, num_internal: usize, num_secret: usize) -> Result<LogEntry, Error> {
    let mut out = LogEntry::new(entry.format.clone());
    for term in &entry.to_resolve {
        out.to_resolve.push(remap_term(term, num_internal, num_secret)?);
    }
    Ok(out)
}

/// Lowers `cs` into a canonical [`R1CS`]. Any `Term` ever built from an
/// unset variable fails the whole compile, with the location captured at
/// the offending call.
pub fn lower(cs: ConstraintSystem, curve: CurveId) -> Result<R1CS, Error> {
    if let Some(first) = cs.unset_uses().first() {
        return Err(Error::UnsetVariable {
            location: first.format.clone(),
        });
    }

    let num_internal = cs.num_internal();
    let num_secret = cs.num_secret();
    let num_public = cs.num_public();
    let num_wires = num_internal + num_secret + num_public;

    let num_computational = cs.constraints().len();

    let mut constraints = Vec::with_capacity(cs.constraints().len() + cs.assertions().len());
    for record in cs.constraints() {
        constraints.push(remap_r1c(record, num_internal, num_secret)?);
    }
    for record in cs.assertions() {
        constraints.push(remap_r1c(record, num_internal, num_secret)?);
    }

    let mut logs = Vec::with_capacity(cs.logs().len());
    for entry in cs.logs() {
        logs.push(remap_log_entry(entry, num_internal, num_secret)?);
    }

    let mut debug_info = Vec::with_capacity(cs.debug_info().len());
    for entry in cs.debug_info() {
        debug_info.push(remap_log_entry(entry, num_internal, num_secret)?);
    }

    Ok(R1CS {
        curve,
        num_wires,
        num_public,
        num_secret,
        num_internal,
        constraints,
        num_computational,
        public_names: cs.public_names().to_vec(),
        secret_names: cs.secret_names().to_vec(),
        coefficients: cs.coeffs().clone().into_vec(),
        logs,
        debug_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_layout_is_internal_then_secret_then_public() {
        let mut cs = ConstraintSystem::new();
        let x = cs.secret_input("x").unwrap();
        let y = cs.public_input("y").unwrap();
        let _w = cs.mul(x, y); // one internal wire
        let r1cs = cs.compile(CurveId::Untyped).unwrap();

        assert_eq!(r1cs.num_internal, 1);
        assert_eq!(r1cs.num_secret, 1);
        assert_eq!(r1cs.num_public, 2); // one-wire + y
        assert_eq!(r1cs.one_wire_id(), r1cs.num_internal + r1cs.num_secret);
        assert_eq!(r1cs.public_names[0], "one");
    }

    #[test]
    fn unset_variable_fails_compile() {
        let mut cs = ConstraintSystem::new();
        let unset = crate::variable::Variable::default();
        let _ = cs.add(unset, 1);
        let err = cs.compile(CurveId::Untyped).unwrap_err();
        assert!(matches!(err, Error::UnsetVariable { .. }));
    }
}
