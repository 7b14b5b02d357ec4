//! `y = x^e` via square-and-multiply over a 4-bit exponent.

use zkcs::{bind_from_variables, synthesize, Circuit, CircuitSchema, ConstraintSystem, CurveId, Error, Variable};

#[derive(Default, Clone)]
struct ExpCircuit {
    x: Variable,
    e: Variable,
    y: Variable,
}

impl CircuitSchema for ExpCircuit {
    fn allocate(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        self.x = cs.secret_input("x")?;
        self.e = cs.secret_input("e")?;
        self.y = cs.public_input("y")?;
        Ok(())
    }
}

impl Circuit for ExpCircuit {
    fn define(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        let mut o = cs.mul(1, 1);
        let bits = cs.to_binary(self.e.clone(), 4);
        for i in 0..bits.len() {
            o = cs.mul(o.clone(), o.clone());
            let mu = cs.mul(o.clone(), self.x.clone());
            o = cs.select(bits[bits.len() - 1 - i].clone(), mu, o);
        }
        cs.assert_is_equal(self.y.clone(), o);
        Ok(())
    }
}

fn main() {
    let mut cs = ConstraintSystem::new();
    let mut circuit = ExpCircuit::default();
    synthesize(&mut circuit, &mut cs).unwrap();
    let r1cs = cs.compile(CurveId::Untyped).unwrap();

    let mut good = circuit.clone();
    good.x.assign(2);
    good.e.assign(12);
    good.y.assign(4096);
    let good_witness = bind_from_variables(&[good.y], &[good.x, good.e]).unwrap();

    let mut bad = circuit.clone();
    bad.x.assign(2);
    bad.e.assign(12);
    bad.y.assign(4095);
    let bad_witness = bind_from_variables(&[bad.y], &[bad.x, bad.e]).unwrap();

    demos::run_good_and_bad("exponentiate", &r1cs, &good_witness, &bad_witness);
}
