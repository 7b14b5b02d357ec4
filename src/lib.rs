//! A frontend constraint-system compiler for Groth16-style zk-SNARKs: it
//! turns a circuit written against an algebraic DSL into a lowered
//! [`R1CS`] (`⟨L⟩·⟨R⟩ = ⟨O⟩` records over a canonical wire numbering), and
//! can then solve that `R1CS` against concrete witness values. It does not
//! do any elliptic-curve or pairing arithmetic itself — see
//! [`field::ScalarField`] for the seam a prover/verifier plugs into.
//!
//! # Example circuit
//!
//! The canonical "cubic" circuit: prove knowledge of `x` such that
//! `x³ + x + 5 = y`, with `y` public.
//!
//! ```ignore
//! use zkcs::{Circuit, CircuitSchema, ConstraintSystem, CurveId, Error, Variable};
//!
//! #[derive(Default)]
//! struct Cubic {
//!     x: Variable,
//!     y: Variable,
//! }
//!
//! impl CircuitSchema for Cubic {
//!     fn allocate(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
//!         self.x = cs.secret_input("x")?;
//!         self.y = cs.public_input("y")?;
//!         Ok(())
//!     }
//! }
//!
//! impl Circuit for Cubic {
//!     fn define(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error> {
//!         let x2 = cs.mul(self.x.clone(), self.x.clone());
//!         let x3 = cs.mul(x2, self.x.clone());
//!         let sum = cs.add(x3, self.x.clone());
//!         let sum = cs.add(sum, 5);
//!         cs.assert_is_equal(sum, self.y.clone());
//!         Ok(())
//!     }
//! }
//!
//! let mut cs = ConstraintSystem::new();
//! let mut circuit = Cubic::default();
//! zkcs::synthesize(&mut circuit, &mut cs).unwrap();
//! let r1cs = cs.compile(CurveId::Bn256).unwrap();
//! assert_eq!(r1cs.num_public, 2); // one-wire + y
//! ```

mod coeff;
pub mod cs;
pub mod curve;
pub mod debug;
pub mod error;
pub mod field;
pub mod inspect;
mod lower;
pub mod operand;
pub mod r1c;
pub mod r1cs;
pub mod schema;
pub mod solver;
pub mod term;
pub mod variable;
pub mod witness;

pub use cs::ConstraintSystem;
pub use curve::CurveId;
pub use error::{Error, Result};
pub use field::{bigint_to_field, ScalarField};
pub use operand::{IntoOperand, Operand};
pub use r1c::{Hint, R1C};
pub use r1cs::R1CS;
pub use schema::{synthesize, Circuit, CircuitSchema};
pub use solver::{solve, SolveOutput};
pub use term::{LinearExpression, Term};
pub use variable::{Variable, Visibility};
pub use witness::{bind_from_map, bind_from_variables, Assignment, InputMap, Witness};
