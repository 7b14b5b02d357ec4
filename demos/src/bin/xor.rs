//! `y0 = b0 xor b1`.

use zkcs::{bind_from_variables, synthesize, Circuit, CircuitSchema, ConstraintSystem, CurveId, Error, Variable};

#[derive(Default, Clone)]
struct XorCircuit {
    b0: Variable,
    b1: Variable,
    y0: Variable,
}

impl CircuitSchema for XorCircuit {
    fn allocate(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        self.b0 = cs.secret_input("b0")?;
        self.b1 = cs.secret_input("b1")?;
        self.y0 = cs.public_input("y0")?;
        Ok(())
    }
}

impl Circuit for XorCircuit {
    fn define(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        cs.assert_is_boolean(self.b0.clone());
        cs.assert_is_boolean(self.b1.clone());
        let z0 = cs.xor(self.b0.clone(), self.b1.clone());
        cs.assert_is_equal(z0, self.y0.clone());
        Ok(())
    }
}

fn main() {
    let mut cs = ConstraintSystem::new();
    let mut circuit = XorCircuit::default();
    synthesize(&mut circuit, &mut cs).unwrap();
    let r1cs = cs.compile(CurveId::Untyped).unwrap();

    let mut good = circuit.clone();
    good.b0.assign(0);
    good.b1.assign(0);
    good.y0.assign(0);
    let good_witness = bind_from_variables(&[good.y0], &[good.b0, good.b1]).unwrap();

    let mut bad = circuit.clone();
    bad.b0.assign(0);
    bad.b1.assign(0);
    bad.y0.assign(1);
    let bad_witness = bind_from_variables(&[bad.y0], &[bad.b0, bad.b1]).unwrap();

    demos::run_good_and_bad("xor", &r1cs, &good_witness, &bad_witness);
}
