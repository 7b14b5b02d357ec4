//! [`Variable`] and its [`Visibility`] tag: nothing but a `(visibility, id)`
//! pair until witness time, at which point an input variable may
//! additionally carry a bound value.

use crate::witness::Assignment;

/// Which wire class a [`Variable`] belongs to.
///
/// `Unset` is the zero value: a `Variable` that was never allocated through
/// [`crate::cs::ConstraintSystem`]. Using one in a [`crate::term::Term`] is
/// not an immediate error — it is recorded and only fails at `compile` time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Visibility {
    Unset,
    Public,
    Secret,
    Internal,
}

/// A handle to a wire: its visibility class, a dense id within that class,
/// and (for input variables, at witness time only) a bound value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Variable {
    visibility: VisibilityRepr,
    id: u32,
    bound_value: Option<Assignment>,
}

/// `Visibility` doesn't implement `Default`, so we wrap it to give
/// `Variable` a zero value whose visibility is `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct VisibilityRepr(Visibility);

impl Default for VisibilityRepr {
    fn default() -> Self {
        VisibilityRepr(Visibility::Unset)
    }
}

impl Variable {
    pub(crate) fn new(visibility: Visibility, id: u32) -> Self {
        debug_assert_ne!(visibility, Visibility::Unset, "use Variable::default() for unset");
        Variable {
            visibility: VisibilityRepr(visibility),
            id,
            bound_value: None,
        }
    }

    /// The reserved constant-1 wire: `Public`, id 0.
    pub(crate) fn one() -> Self {
        Variable::new(Visibility::Public, 0)
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility.0
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn is_unset(&self) -> bool {
        self.visibility.0 == Visibility::Unset
    }

    pub fn bound_value(&self) -> Option<&Assignment> {
        self.bound_value.as_ref()
    }

    /// Binds a concrete value to an input variable. Only meaningful for
    /// `Public`/`Secret` variables; binding an `Internal` or `Unset`
    /// variable is a programmer error since those never participate in
    /// witness supply.
    pub fn assign(&mut self, value: impl Into<Assignment>) {
        debug_assert!(
            matches!(self.visibility.0, Visibility::Public | Visibility::Secret),
            "only input variables take a bound value"
        );
        self.bound_value = Some(value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        let v = Variable::default();
        assert_eq!(v.visibility(), Visibility::Unset);
        assert!(v.is_unset());
    }

    #[test]
    fn one_wire_is_public_slot_zero() {
        let one = Variable::one();
        assert_eq!(one.visibility(), Visibility::Public);
        assert_eq!(one.id(), 0);
    }
}
