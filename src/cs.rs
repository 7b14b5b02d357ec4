//! [`ConstraintSystem`]: the stateful builder exposing the algebraic DSL.
//!
//! This is the largest module in the crate: every wire-allocation and
//! coefficient-interning primitive a circuit's `define` step needs lives
//! here, plus the full arithmetic/boolean DSL built on top of them.
//!
//! [`ConstraintSystem::compile`] takes `self` by value, so the builder is
//! moved into the lowering step and simply cannot be called again
//! afterwards — calling a DSL method after compilation is a compile-time
//! error rather than a runtime one. [`crate::error::Error::Frozen`] is kept
//! in the error enum for API-shape parity with the rest of the error
//! taxonomy but is never constructed.

use std::collections::HashSet;

use num_bigint::BigInt;

use crate::coeff::{CoeffPool, SpecialCoeff};
use crate::debug::{caller_location, LogEntry};
use crate::error::Error;
use crate::operand::{IntoOperand, Operand};
use crate::r1c::{Hint, R1C};
use crate::term::{LinearExpression, Term};
use crate::variable::{Variable, Visibility};

#[derive(Debug, Default)]
struct PublicClass {
    names: Vec<String>,
    variables: Vec<Variable>,
    booleans: HashSet<u32>,
}

#[derive(Debug, Default)]
struct SecretClass {
    names: Vec<String>,
    variables: Vec<Variable>,
    booleans: HashSet<u32>,
}

#[derive(Debug, Default)]
struct InternalClass {
    variables: Vec<Variable>,
    booleans: HashSet<u32>,
}

/// The compile-time builder: allocates wires, emits constraints, and
/// accumulates debug trails. See the module docs for the freeze/consume
/// design.
#[derive(Debug)]
pub struct ConstraintSystem {
    public: PublicClass,
    secret: SecretClass,
    internal: InternalClass,

    constraints: Vec<R1C>,
    assertions: Vec<R1C>,
    one_term: Term,

    coeffs: CoeffPool,

    logs: Vec<LogEntry>,
    debug_info: Vec<LogEntry>,
    unset_uses: Vec<LogEntry>,

    all_names: HashSet<String>,
}

impl Default for ConstraintSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintSystem {
    /// Creates a fresh builder with public slot 0 reserved as the one-wire,
    /// named `"one"`.
    pub fn new() -> Self {
        let mut coeffs = CoeffPool::new();
        let one_var = Variable::one();
        let (coeff_id, special) = coeffs.intern(&BigInt::from(1));
        let one_term = Term::from_variable(&one_var, coeff_id, special);

        let mut all_names = HashSet::new();
        all_names.insert("one".to_string());

        ConstraintSystem {
            public: PublicClass {
                names: vec!["one".to_string()],
                variables: vec![one_var],
                booleans: HashSet::new(),
            },
            secret: SecretClass::default(),
            internal: InternalClass::default(),
            constraints: Vec::new(),
            assertions: Vec::new(),
            one_term,
            coeffs,
            logs: Vec::new(),
            debug_info: Vec::new(),
            unset_uses: Vec::new(),
            all_names,
        }
    }

    /// The reserved constant-1 wire.
    pub fn one(&self) -> Variable {
        self.public.variables[0].clone()
    }

    // ---------------------------------------------------------------
    // wire allocation
    // ---------------------------------------------------------------

    /// Declares a new public input. Names are unique across public *and*
    /// secret inputs combined; `"one"` is pre-occupied.
    pub fn public_input(&mut self, name: impl Into<String>) -> Result<Variable, Error> {
        let name = name.into();
        self.check_name_available(&name)?;
        let id = self.public.variables.len() as u32;
        let var = Variable::new(Visibility::Public, id);
        self.all_names.insert(name.clone());
        self.public.names.push(name);
        self.public.variables.push(var.clone());
        Ok(var)
    }

    /// Declares a new secret input. See [`ConstraintSystem::public_input`]
    /// for the name-uniqueness rule.
    pub fn secret_input(&mut self, name: impl Into<String>) -> Result<Variable, Error> {
        let name = name.into();
        self.check_name_available(&name)?;
        let id = self.secret.variables.len() as u32;
        let var = Variable::new(Visibility::Secret, id);
        self.all_names.insert(name.clone());
        self.secret.names.push(name);
        self.secret.variables.push(var.clone());
        Ok(var)
    }

    fn check_name_available(&self, name: &str) -> Result<(), Error> {
        if self.all_names.contains(name) {
            Err(Error::DuplicateInputName(name.to_string()))
        } else {
            Ok(())
        }
    }

    fn new_internal_variable(&mut self) -> Variable {
        let id = self.internal.variables.len() as u32;
        let var = Variable::new(Visibility::Internal, id);
        self.internal.variables.push(var.clone());
        var
    }

    // ---------------------------------------------------------------
    // coefficients and terms
    // ---------------------------------------------------------------

    fn coeff_id(&mut self, value: &BigInt) -> (u32, SpecialCoeff) {
        self.coeffs.intern(value)
    }

    /// Packs `coeff · var` into a [`Term`], interning `coeff` in the
    /// coefficient pool. If `var` is `Unset`, records a deferred error
    /// (resolved at [`ConstraintSystem::compile`] time) instead of failing
    /// immediately, so a circuit's `define` step never has to thread this
    /// check through every call.
    #[track_caller]
    fn term_from(&mut self, var: &Variable, coeff: &BigInt) -> Term {
        let (coeff_id, special) = self.coeff_id(coeff);
        let term = Term::from_variable(var, coeff_id, special);
        if var.is_unset() {
            let location = caller_location();
            self.unset_uses.push(LogEntry::new(location).with_term(term));
        }
        term
    }

    /// The single normalization step every DSL primitive funnels its
    /// arguments through.
    #[track_caller]
    fn to_linear_expression(&mut self, op: impl IntoOperand) -> LinearExpression {
        match op.into_operand() {
            Operand::Var(v) => {
                let one = BigInt::from(1);
                LinearExpression::single(self.term_from(&v, &one))
            }
            Operand::Expr(e) => e,
            Operand::Term(t) => LinearExpression::single(t),
            Operand::Const(k) => {
                let one = self.one();
                LinearExpression::single(self.term_from(&one, &k))
            }
        }
    }

    fn negate_term(&mut self, term: &Term) -> Term {
        let value = self.coeffs.get(term.coeff_id()).clone();
        let negated = -value;
        let (coeff_id, special) = self.coeff_id(&negated);
        Term::new(term.visibility(), term.wire_id(), coeff_id, special)
    }

    fn scale_term(&mut self, term: &Term, factor: &BigInt) -> Term {
        let value = self.coeffs.get(term.coeff_id()).clone();
        let scaled = value * factor;
        let (coeff_id, special) = self.coeff_id(&scaled);
        Term::new(term.visibility(), term.wire_id(), coeff_id, special)
    }

    // ---------------------------------------------------------------
    // affine combinators — add / sub / neg / constant
    // ---------------------------------------------------------------

    /// `add(a, b)`: merges terms; emits no constraint (purely affine).
    #[track_caller]
    pub fn add(&mut self, a: impl IntoOperand, b: impl IntoOperand) -> LinearExpression {
        self.add_many(vec![a.into_operand(), b.into_operand()])
    }

    /// `add(a, b, ...)`: the n-ary form [`ConstraintSystem::add`] is built on.
    #[track_caller]
    pub fn add_many(&mut self, operands: Vec<Operand>) -> LinearExpression {
        let mut acc = LinearExpression::new();
        for op in operands {
            acc.extend(self.to_linear_expression(op));
        }
        acc
    }

    /// `sub(a, b)`: `a` plus `b` with every coefficient negated.
    #[track_caller]
    pub fn sub(&mut self, a: impl IntoOperand, b: impl IntoOperand) -> LinearExpression {
        let mut la = self.to_linear_expression(a);
        let lb = self.to_linear_expression(b);
        for term in lb.into_terms() {
            la.push(self.negate_term(&term));
        }
        la
    }

    /// `neg(a)`: every coefficient of `a` negated.
    #[track_caller]
    pub fn neg(&mut self, a: impl IntoOperand) -> LinearExpression {
        let la = self.to_linear_expression(a);
        let mut out = LinearExpression::new();
        for term in la.into_terms() {
            out.push(self.negate_term(&term));
        }
        out
    }

    /// `constant(k)`: `k` times the one-wire. Emits no constraint.
    pub fn constant(&mut self, k: impl Into<BigInt>) -> LinearExpression {
        let one = self.one();
        let term = self.term_from(&one, &k.into());
        LinearExpression::single(term)
    }

    /// Forces a [`LinearExpression`] into a concrete wire by emitting
    /// `expr · one = w`. Used internally whenever a primitive's result has
    /// to be a wire rather than a bare affine combination.
    fn materialize(&mut self, expr: LinearExpression) -> Variable {
        let w = self.new_internal_variable();
        let one = self.one();
        let one_expr = LinearExpression::single(self.term_from(&one, &BigInt::from(1)));
        let w_term = self.term_from(&w, &BigInt::from(1));
        self.constraints
            .push(R1C::new(expr, one_expr, LinearExpression::single(w_term), Hint::SolveO));
        w
    }

    // ---------------------------------------------------------------
    // multiplicative primitives — mul / inverse / div
    // ---------------------------------------------------------------

    /// `mul(a, b)`: emits `⟨a⟩ · ⟨b⟩ = w` (hint `SolveO`) and returns the new
    /// internal wire `w`.
    #[track_caller]
    pub fn mul(&mut self, a: impl IntoOperand, b: impl IntoOperand) -> Variable {
        let la = self.to_linear_expression(a);
        let lb = self.to_linear_expression(b);
        let w = self.new_internal_variable();
        let w_term = self.term_from(&w, &BigInt::from(1));
        self.constraints
            .push(R1C::new(la, lb, LinearExpression::single(w_term), Hint::SolveO));
        w
    }

    /// `inverse(a)`: emits `⟨a⟩ · w = 1` (hint `SolveR`) and returns `w`.
    #[track_caller]
    pub fn inverse(&mut self, a: impl IntoOperand) -> Variable {
        let la = self.to_linear_expression(a);
        let w = self.new_internal_variable();
        let w_term = self.term_from(&w, &BigInt::from(1));
        let one_expr = self.constant(1);
        self.constraints
            .push(R1C::new(la, LinearExpression::single(w_term), one_expr, Hint::SolveR));
        w
    }

    /// `div(a, b)`: emits `⟨b⟩ · w = ⟨a⟩` (hint `SolveR`) and returns `w`.
    #[track_caller]
    pub fn div(&mut self, a: impl IntoOperand, b: impl IntoOperand) -> Variable {
        let la = self.to_linear_expression(a);
        let lb = self.to_linear_expression(b);
        let w = self.new_internal_variable();
        let w_term = self.term_from(&w, &BigInt::from(1));
        self.constraints
            .push(R1C::new(lb, LinearExpression::single(w_term), la, Hint::SolveR));
        w
    }

    // ---------------------------------------------------------------
    // boolean logic
    // ---------------------------------------------------------------

    /// `assert_is_boolean(w)`: emits `w · w = w`, idempotently — calling it
    /// twice on the same wire emits the assertion only once. Non-wire
    /// operands are materialized first.
    #[track_caller]
    pub fn assert_is_boolean(&mut self, w: impl IntoOperand) {
        let expr = self.to_linear_expression(w);
        let var = self.as_wire(expr);
        if self.is_marked_boolean(&var) {
            return;
        }
        self.mark_boolean(&var);
        let le = LinearExpression::single(self.term_from(&var, &BigInt::from(1)));
        self.assertions
            .push(R1C::new(le.clone(), le.clone(), le, Hint::NoHint));
        self.debug_info.push(LogEntry::new(format!(
            "{} runtime error: not boolean",
            caller_location()
        )));
    }

    fn as_wire(&mut self, expr: LinearExpression) -> Variable {
        if let Some(term) = expr.single_term() {
            if term.special() == SpecialCoeff::One {
                return Variable::new(term.visibility(), term.wire_id());
            }
        }
        self.materialize(expr)
    }

    fn is_marked_boolean(&self, var: &Variable) -> bool {
        match var.visibility() {
            Visibility::Public => self.public.booleans.contains(&var.id()),
            Visibility::Secret => self.secret.booleans.contains(&var.id()),
            Visibility::Internal => self.internal.booleans.contains(&var.id()),
            Visibility::Unset => false,
        }
    }

    fn mark_boolean(&mut self, var: &Variable) {
        match var.visibility() {
            Visibility::Public => {
                self.public.booleans.insert(var.id());
            }
            Visibility::Secret => {
                self.secret.booleans.insert(var.id());
            }
            Visibility::Internal => {
                self.internal.booleans.insert(var.id());
            }
            Visibility::Unset => {}
        }
    }

    /// `xor(a, b) = a + b − 2ab`. Both inputs are boolean-asserted lazily if
    /// not already. Returns the new internal wire holding the result.
    #[track_caller]
    pub fn xor(&mut self, a: impl IntoOperand, b: impl IntoOperand) -> Variable {
        let la = self.to_linear_expression(a);
        let lb = self.to_linear_expression(b);
        let wa = self.as_wire(la.clone());
        let wb = self.as_wire(lb.clone());
        self.assert_is_boolean(wa.clone());
        self.assert_is_boolean(wb.clone());

        let ab = self.mul(wa.clone(), wb.clone());
        let two_ab = {
            let term = self.term_from(&ab, &BigInt::from(1));
            self.scale_term(&term, &BigInt::from(2))
        };
        let sum = self.add(wa, wb);
        let mut result = sum;
        result.push(self.negate_term(&two_ab));
        self.materialize(result)
    }

    /// `select(cond, t, f)`: emits `cond · (t − f) = w − f` (hint `SolveO`)
    /// and returns the new internal wire `w`. `cond` is boolean-asserted
    /// lazily if needed.
    #[track_caller]
    pub fn select(&mut self, cond: impl IntoOperand, t: impl IntoOperand, f: impl IntoOperand) -> Variable {
        let cond_expr = self.to_linear_expression(cond);
        let cond_var = self.as_wire(cond_expr.clone());
        self.assert_is_boolean(cond_var.clone());

        let lt = self.to_linear_expression(t);
        let lf = self.to_linear_expression(f);
        let diff = self.sub(lt, lf.clone());

        let w = self.new_internal_variable();
        let w_term = self.term_from(&w, &BigInt::from(1));
        let mut o = LinearExpression::single(w_term);
        for term in lf.into_terms() {
            o.push(self.negate_term(&term));
        }
        let cond_le = LinearExpression::single(self.term_from(&cond_var, &BigInt::from(1)));
        self.constraints.push(R1C::new(cond_le, diff, o, Hint::SolveO));
        w
    }

    /// `to_binary(a, n)`: decomposes `a` into `n` little-endian boolean
    /// wires, each individually boolean-asserted, plus the packing
    /// equation `Σ 2ⁱ · bᵢ = a` (solved specially — see
    /// [`crate::r1c::Hint::ToBinary`] and [`crate::solver`]).
    #[track_caller]
    pub fn to_binary(&mut self, a: impl IntoOperand, n: usize) -> Vec<Variable> {
        let la = self.to_linear_expression(a);
        let mut bits = Vec::with_capacity(n);
        let mut sum = LinearExpression::new();
        for i in 0..n {
            let bit = self.new_internal_variable();
            self.assert_is_boolean(bit.clone());
            let coeff = BigInt::from(1) << i;
            sum.push(self.term_from(&bit, &coeff));
            bits.push(bit);
        }
        let one_expr = self.constant(1);
        self.constraints.push(R1C::new(la, one_expr, sum, Hint::ToBinary { bits: n }));
        bits
    }

    /// `from_binary(b0, ..., bn-1)`: `Σ 2ⁱ · bᵢ`, a pure linear combination
    /// (no constraint emitted).
    pub fn from_binary(&mut self, bits: &[Variable]) -> LinearExpression {
        let mut sum = LinearExpression::new();
        for (i, b) in bits.iter().enumerate() {
            let coeff = BigInt::from(1) << i;
            sum.push(self.term_from(b, &coeff));
        }
        sum
    }

    /// `assert_is_less_or_equal(a, bound, bits)`: bit-decomposes both
    /// operands to `bits` width and walks MSB-first maintaining a "prefix
    /// still equal" flag `c`. At each position, `a_i · (1 − b_i) · c = 0`
    /// forbids `a` from exceeding `bound` while the prefix is still tied;
    /// `c` is then carried forward via `select` on whether this bit was
    /// itself tied.
    #[track_caller]
    pub fn assert_is_less_or_equal(&mut self, a: impl IntoOperand, bound: impl IntoOperand, bits: usize) {
        let a_bits = self.to_binary(a, bits);
        let bound_bits = self.to_binary(bound, bits);

        let one_expr = self.constant(1);
        let mut c: Variable = self.as_wire(one_expr);
        for i in (0..bits).rev() {
            let ai = a_bits[i].clone();
            let bi = bound_bits[i].clone();

            let not_bi = self.sub(1, bi.clone());
            let gt_i = self.mul(ai.clone(), not_bi);
            let forbidden = self.mul(gt_i, c.clone());
            self.assert_is_equal(forbidden, 0);

            let bit_xor = self.xor(ai, bi);
            let eq_i = self.sub(1, bit_xor);
            let eq_i_wire = self.as_wire(eq_i);
            c = self.select(eq_i_wire, c, 0);
        }
    }

    // ---------------------------------------------------------------
    // assertions
    // ---------------------------------------------------------------

    /// `assert_is_equal(a, b)`: emits `(a − b) · 1 = 0` as an assertion.
    #[track_caller]
    pub fn assert_is_equal(&mut self, a: impl IntoOperand, b: impl IntoOperand) {
        let la = self.to_linear_expression(a);
        let lb = self.to_linear_expression(b);
        let diff = {
            let mut d = la.clone();
            for term in lb.clone().into_terms() {
                d.push(self.negate_term(&term));
            }
            d
        };
        let one_expr = self.constant(1);
        self.assertions
            .push(R1C::new(diff, one_expr, LinearExpression::new(), Hint::NoHint));

        let location = caller_location();
        let entry = match (la.single_term(), lb.single_term()) {
            (Some(&ta), Some(&tb)) => LogEntry::new(format!("{location} assertion failed: %s != %s"))
                .with_term(ta)
                .with_term(tb),
            _ => LogEntry::new(format!("{location} assertion failed")),
        };
        self.debug_info.push(entry);
    }

    /// `println(format, values)`: appends a [`LogEntry`], rendered only if
    /// the witness solver reaches it (successful runs never print).
    #[track_caller]
    pub fn println(&mut self, format: impl Into<String>, values: Vec<Operand>) {
        let location = caller_location();
        let mut entry = LogEntry::new(format!("{location} {}", format.into()));
        for value in values {
            let le = self.to_linear_expression(value);
            if let Some(term) = le.single_term() {
                entry = entry.with_term(*term);
            }
        }
        self.logs.push(entry);
    }

    // ---------------------------------------------------------------
    // accessors used by lower.rs / tests
    // ---------------------------------------------------------------

    pub(crate) fn num_internal(&self) -> usize {
        self.internal.variables.len()
    }

    pub(crate) fn num_public(&self) -> usize {
        self.public.variables.len()
    }

    pub(crate) fn num_secret(&self) -> usize {
        self.secret.variables.len()
    }

    pub(crate) fn public_names(&self) -> &[String] {
        &self.public.names
    }

    pub(crate) fn secret_names(&self) -> &[String] {
        &self.secret.names
    }

    pub(crate) fn constraints(&self) -> &[R1C] {
        &self.constraints
    }

    pub(crate) fn assertions(&self) -> &[R1C] {
        &self.assertions
    }

    pub(crate) fn coeffs(&self) -> &CoeffPool {
        &self.coeffs
    }

    pub(crate) fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub(crate) fn debug_info(&self) -> &[LogEntry] {
        &self.debug_info
    }

    pub(crate) fn unset_uses(&self) -> &[LogEntry] {
        &self.unset_uses
    }

    /// Compiles this builder into a canonical [`crate::r1cs::R1CS`]. Consumes
    /// `self` by value — see the module docs for why that, not a runtime
    /// flag, is what prevents further DSL calls once lowering has begun.
    pub fn compile(self, curve: crate::curve::CurveId) -> Result<crate::r1cs::R1CS, Error> {
        crate::lower::lower(self, curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_wire_is_public_slot_zero() {
        let cs = ConstraintSystem::new();
        assert_eq!(cs.num_public(), 1);
        assert_eq!(cs.public_names()[0], "one");
    }

    #[test]
    fn duplicate_name_across_visibilities_is_rejected() {
        let mut cs = ConstraintSystem::new();
        cs.public_input("foo").unwrap();
        let err = cs.secret_input("foo").unwrap_err();
        assert_eq!(err, Error::DuplicateInputName("foo".to_string()));
    }

    #[test]
    fn duplicate_public_name_is_rejected() {
        let mut cs = ConstraintSystem::new();
        cs.public_input("foo").unwrap();
        let err = cs.public_input("foo").unwrap_err();
        assert_eq!(err, Error::DuplicateInputName("foo".to_string()));
    }

    #[test]
    fn mul_allocates_one_internal_wire_and_one_constraint() {
        let mut cs = ConstraintSystem::new();
        let x = cs.secret_input("x").unwrap();
        let _y = cs.mul(x.clone(), x);
        assert_eq!(cs.num_internal(), 1);
        assert_eq!(cs.constraints().len(), 1);
    }

    #[test]
    fn assert_is_boolean_is_idempotent() {
        let mut cs = ConstraintSystem::new();
        let b = cs.secret_input("b").unwrap();
        cs.assert_is_boolean(b.clone());
        cs.assert_is_boolean(b.clone());
        cs.assert_is_boolean(b);
        assert_eq!(cs.assertions().len(), 1);
    }

    #[test]
    fn coefficient_pool_dedups_across_terms() {
        let mut cs = ConstraintSystem::new();
        let x = cs.secret_input("x").unwrap();
        let _ = cs.add(x.clone(), 5);
        let _ = cs.add(x, 5);
        // one-wire coeff(1) + coeff(5) == 2 distinct coefficients
        assert_eq!(cs.coeffs().len(), 2);
    }

    #[test]
    fn to_binary_allocates_n_wires_and_boolean_asserts_each() {
        let mut cs = ConstraintSystem::new();
        let x = cs.secret_input("x").unwrap();
        let bits = cs.to_binary(x, 4);
        assert_eq!(bits.len(), 4);
        assert_eq!(cs.assertions().len(), 4);
        assert_eq!(cs.num_internal(), 4);
    }
}
