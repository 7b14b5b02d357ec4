//! `x³ + x + 5 = y`.

use zkcs::{bind_from_variables, synthesize, Circuit, CircuitSchema, ConstraintSystem, CurveId, Error, Variable};

#[derive(Default, Clone)]
struct CubicCircuit {
    x: Variable,
    y: Variable,
}

impl CircuitSchema for CubicCircuit {
    fn allocate(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        self.x = cs.secret_input("x")?;
        self.y = cs.public_input("y")?;
        Ok(())
    }
}

impl Circuit for CubicCircuit {
    fn define(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        let x2 = cs.mul(self.x.clone(), self.x.clone());
        let x3 = cs.mul(x2, self.x.clone());
        let sum = cs.add(x3, self.x.clone());
        let sum = cs.add(sum, 5);
        cs.assert_is_equal(sum, self.y.clone());
        Ok(())
    }
}

fn main() {
    let mut cs = ConstraintSystem::new();
    let mut circuit = CubicCircuit::default();
    synthesize(&mut circuit, &mut cs).unwrap();
    let r1cs = cs.compile(CurveId::Untyped).unwrap();

    let mut good = circuit.clone();
    good.x.assign(3);
    good.y.assign(35);
    let good_witness = bind_from_variables(&[good.y], &[good.x]).unwrap();

    let mut bad = circuit.clone();
    bad.x.assign(42);
    bad.y.assign(42);
    let bad_witness = bind_from_variables(&[bad.y], &[bad.x]).unwrap();

    demos::run_good_and_bad("cubic", &r1cs, &good_witness, &bad_witness);
}
