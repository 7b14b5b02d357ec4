//! Circuit reflection and wire allocation.
//!
//! A circuit declares its input wires by implementing a small trait rather
//! than through runtime reflection, since Rust has none: each field maps
//! to one `public_input`/`secret_input` call.

use crate::cs::ConstraintSystem;
use crate::error::Error;

/// Implemented once per circuit shape. `allocate` walks the circuit's
/// input fields: for each one, call [`ConstraintSystem::public_input`] or
/// [`ConstraintSystem::secret_input`] (default visibility is secret) and
/// store the returned [`crate::variable::Variable`] back into `self`.
pub trait CircuitSchema {
    fn allocate(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error>;
}

/// Implemented once per circuit's constraint logic. `define` is invoked
/// after [`CircuitSchema::allocate`] has populated every input wire.
pub trait Circuit: CircuitSchema {
    fn define(&mut self, cs: &mut ConstraintSystem) -> Result<(), Error>;
}

/// Runs the full allocate-then-define pipeline: allocate every input wire,
/// then invoke the circuit's own logic. [`crate::cs::ConstraintSystem::compile`]
/// is left to the caller, since it consumes `cs` by value.
pub fn synthesize<C: Circuit>(circuit: &mut C, cs: &mut ConstraintSystem) -> Result<(), Error> {
    circuit.allocate(cs)?;
    circuit.define(cs)
}
