//! `y = Σ 2ⁱ · bᵢ`.

use zkcs::{bind_from_variables, synthesize, Circuit, CircuitSchema, ConstraintSystem, CurveId, Error, Variable};

#[derive(Default, Clone)]
struct FromBinaryCircuit {
    bits: Vec<Variable>,
    y: Variable,
}

impl CircuitSchema for FromBinaryCircuit {
    fn allocate(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        for name in ["b0", "b1", "b2", "b3"] {
            self.bits.push(cs.secret_input(name)?);
        }
        self.y = cs.public_input("y")?;
        Ok(())
    }
}

impl Circuit for FromBinaryCircuit {
    fn define(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
        for bit in &self.bits {
            cs.assert_is_boolean(bit.clone());
        }
        let r = cs.from_binary(&self.bits);
        cs.assert_is_equal(self.y.clone(), r);
        Ok(())
    }
}

fn main() {
    let mut cs = ConstraintSystem::new();
    let mut circuit = FromBinaryCircuit::default();
    synthesize(&mut circuit, &mut cs).unwrap();
    let r1cs = cs.compile(CurveId::Untyped).unwrap();

    let mut good = circuit.clone();
    for (bit, value) in good.bits.iter_mut().zip([1, 0, 1, 1]) {
        bit.assign(value);
    }
    good.y.assign(13);
    let good_witness = bind_from_variables(&[good.y.clone()], &good.bits).unwrap();

    let mut bad = circuit.clone();
    for (bit, value) in bad.bits.iter_mut().zip([1, 0, 1, 1]) {
        bit.assign(value);
    }
    bad.y.assign(12);
    let bad_witness = bind_from_variables(&[bad.y.clone()], &bad.bits).unwrap();

    demos::run_good_and_bad("from_binary", &r1cs, &good_witness, &bad_witness);
}
