//! [`Operand`]: the tagged variant every DSL primitive normalizes its
//! arguments through.
//!
//! [`crate::cs::ConstraintSystem::to_linear_expression`] is the single
//! normalization step; everything in the DSL goes through it before
//! touching a coefficient or wire.

use num_bigint::BigInt;

use crate::term::{LinearExpression, Term};
use crate::variable::Variable;

/// Any shape a DSL primitive's argument may arrive in.
#[derive(Debug, Clone)]
pub enum Operand {
    Var(Variable),
    Expr(LinearExpression),
    Term(Term),
    Const(BigInt),
}

/// Implemented for every type the public DSL methods accept, so callers
/// write `cs.mul(x, 5)` or `cs.mul(&x, y)` without an explicit `Operand::`
/// wrapper at each call site.
pub trait IntoOperand {
    fn into_operand(self) -> Operand;
}

impl IntoOperand for Operand {
    fn into_operand(self) -> Operand {
        self
    }
}

impl IntoOperand for Variable {
    fn into_operand(self) -> Operand {
        Operand::Var(self)
    }
}

impl IntoOperand for &Variable {
    fn into_operand(self) -> Operand {
        Operand::Var(self.clone())
    }
}

impl IntoOperand for LinearExpression {
    fn into_operand(self) -> Operand {
        Operand::Expr(self)
    }
}

impl IntoOperand for &LinearExpression {
    fn into_operand(self) -> Operand {
        Operand::Expr(self.clone())
    }
}

impl IntoOperand for Term {
    fn into_operand(self) -> Operand {
        Operand::Term(self)
    }
}

impl IntoOperand for BigInt {
    fn into_operand(self) -> Operand {
        Operand::Const(self)
    }
}

impl IntoOperand for &BigInt {
    fn into_operand(self) -> Operand {
        Operand::Const(self.clone())
    }
}

macro_rules! impl_into_operand_int {
    ($($t:ty),*) => {
        $(impl IntoOperand for $t {
            fn into_operand(self) -> Operand {
                Operand::Const(BigInt::from(self))
            }
        })*
    };
}
impl_into_operand_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize, isize);
