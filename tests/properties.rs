//! Integration tests for binary round-trip, solvability-agrees-with-
//! satisfiability, and cross-compile determinism.

use num_bigint::BigInt;
use zkcs::{bind_from_variables, inspect, solve, Circuit, CircuitSchema, ConstraintSystem, CurveId, Error, ScalarField, Variable};

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

#[derive(Default, Clone)]
struct RoundTripCircuit {
    k: Variable,
    bits: Vec<Variable>,
}

impl CircuitSchema for RoundTripCircuit {
    fn allocate(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        self.k = cs.secret_input("k")?;
        Ok(())
    }
}

impl Circuit for RoundTripCircuit {
    fn define(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        self.bits = cs.to_binary(self.k.clone(), 4);
        let rebuilt = cs.from_binary(&self.bits);
        cs.assert_is_equal(self.k.clone(), rebuilt);
        Ok(())
    }
}

#[test]
fn p4_binary_round_trip_holds_for_every_four_bit_value() {
    for k in 0u32..16 {
        let mut cs = ConstraintSystem::new();
        let mut circuit = RoundTripCircuit::default();
        zkcs::synthesize(&mut circuit, &mut cs).unwrap();
        let r1cs = cs.compile(CurveId::Untyped).unwrap();

        let mut bound = circuit.clone();
        bound.k.assign(k);
        let witness = bind_from_variables(&[], &[bound.k]).unwrap();

        solve::<Mod101>(&r1cs, &witness).unwrap_or_else(|e| panic!("k={k} failed to solve: {e}"));
    }
}

#[derive(Default, Clone)]
struct EqualityCircuit {
    a: Variable,
    b: Variable,
}

impl CircuitSchema for EqualityCircuit {
    fn allocate(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        self.a = cs.secret_input("a")?;
        self.b = cs.secret_input("b")?;
        Ok(())
    }
}

impl Circuit for EqualityCircuit {
    fn define(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        cs.assert_is_equal(self.a.clone(), self.b.clone());
        Ok(())
    }
}

#[test]
fn p5_solver_succeeds_iff_every_assertion_holds() {
    let mut cs = ConstraintSystem::new();
    let mut circuit = EqualityCircuit::default();
    zkcs::synthesize(&mut circuit, &mut cs).unwrap();
    let r1cs = cs.compile(CurveId::Untyped).unwrap();

    let mut matching = circuit.clone();
    matching.a.assign(7);
    matching.b.assign(7);
    let ok_witness = bind_from_variables(&[], &[matching.a, matching.b]).unwrap();
    assert!(solve::<Mod101>(&r1cs, &ok_witness).is_ok());

    let mut mismatched = circuit.clone();
    mismatched.a.assign(7);
    mismatched.b.assign(8);
    let bad_witness = bind_from_variables(&[], &[mismatched.a, mismatched.b]).unwrap();
    let err = solve::<Mod101>(&r1cs, &bad_witness).unwrap_err();
    assert!(matches!(err, Error::AssertionFailed { .. }));
}

#[derive(Default, Clone)]
struct MulCircuit {
    x: Variable,
    y: Variable,
}

impl CircuitSchema for MulCircuit {
    fn allocate(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        self.x = cs.secret_input("x")?;
        self.y = cs.public_input("y")?;
        Ok(())
    }
}

impl Circuit for MulCircuit {
    fn define(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        let sq = cs.mul(self.x.clone(), self.x.clone());
        cs.assert_is_equal(sq, self.y.clone());
        Ok(())
    }
}

#[test]
fn p6_two_compiles_of_the_same_circuit_are_byte_identical() {
    let build = || {
        let mut cs = ConstraintSystem::new();
        let mut circuit = MulCircuit::default();
        zkcs::synthesize(&mut circuit, &mut cs).unwrap();
        cs.compile(CurveId::Bn256).unwrap()
    };
    let a = build();
    let b = build();
    assert_eq!(inspect::hash(&a), inspect::hash(&b));
    assert_eq!(inspect::pretty_print(&a), inspect::pretty_print(&b));
    assert_eq!(a.public_names, b.public_names);
    assert_eq!(a.secret_names, b.secret_names);
}
