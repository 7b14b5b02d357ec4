//! `z = x² / y`.

use zkcs::{bind_from_variables, synthesize, Circuit, CircuitSchema, ConstraintSystem, CurveId, Error, Variable};

#[derive(Default, Clone)]
struct DivCircuit {
    x: Variable,
    y: Variable,
    z: Variable,
}

impl CircuitSchema for DivCircuit {
    fn allocate(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        self.x = cs.secret_input("x")?;
        self.y = cs.secret_input("y")?;
        self.z = cs.public_input("z")?;
        Ok(())
    }
}

impl Circuit for DivCircuit {
    fn define(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        let m = cs.mul(self.x.clone(), self.x.clone());
        let d = cs.div(m, self.y.clone());
        cs.assert_is_equal(d, self.z.clone());
        Ok(())
    }
}

fn main() {
    let mut cs = ConstraintSystem::new();
    let mut circuit = DivCircuit::default();
    synthesize(&mut circuit, &mut cs).unwrap();
    let r1cs = cs.compile(CurveId::Untyped).unwrap();

    let mut good = circuit.clone();
    good.x.assign(6);
    good.y.assign(12);
    good.z.assign(3);
    let good_witness = bind_from_variables(&[good.z], &[good.x, good.y]).unwrap();

    let mut bad = circuit.clone();
    bad.x.assign(4);
    bad.y.assign(10);
    bad.z.assign(42);
    let bad_witness = bind_from_variables(&[bad.z], &[bad.x, bad.y]).unwrap();

    demos::run_good_and_bad("div", &r1cs, &good_witness, &bad_witness);
}
