//! Error taxonomy for circuit compilation and witness solving.
//!
//! One variant per case a circuit author can trigger, no panics; programmer
//! errors (an invariant violated by this crate's own code, not by a
//! circuit) remain `panic!`/`debug_assert!` at the call site instead.

use thiserror::Error;

/// Everything that can go wrong compiling a circuit or solving a witness.
///
/// Schema and structural errors are raised at compile time, solve errors at
/// witness time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two inputs (public and/or secret, combined) were declared with the
    /// same name.
    #[error("duplicate input name: `{0}`")]
    DuplicateInputName(String),

    /// A `Term` was built from a `Variable` whose visibility is `Unset`.
    /// The location is the call site of the offending DSL operation,
    /// captured via `#[track_caller]`.
    #[error("unset variable used at {location}")]
    UnsetVariable { location: String },

    /// A DSL primitive was invoked after `compile` had already consumed the
    /// constraint system.
    #[error("constraint system is frozen: lowering has already begun")]
    Frozen,

    /// A declared input has no bound value at solve time.
    #[error("missing witness value for input `{0}`")]
    InconsistentInput(String),

    /// An assertion failed while solving; the message has already had its
    /// `%s` placeholders substituted with wire values.
    #[error("assertion failed (constraint #{index}): {rendered}")]
    AssertionFailed { index: usize, rendered: String },

    /// A `SolveR`/`SolveL` step would require dividing by the zero element.
    #[error("division by zero while solving constraint #{0}")]
    DivByZero(usize),

    /// `compile` was asked to target a curve this build does not recognize.
    #[error("unknown curve id: `{0}`")]
    UnknownCurve(String),
}

pub type Result<T> = std::result::Result<T, Error>;
