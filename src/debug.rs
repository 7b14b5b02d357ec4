//! Debug trails: log entries, assertion debug info, and source-location
//! capture.
//!
//! Every `assert_is_*`/`println` entry point on [`crate::cs::ConstraintSystem`]
//! is `#[track_caller]`, so a failure can be traced back to the call site
//! without walking a stack at runtime.

use std::panic::Location;

use crate::term::Term;

/// A deferred, formattable message: a format string with `%s` placeholders
/// and the [`Term`]s whose solved values fill them in, in order.
///
/// Used for three purposes: `logs` (rendered by `println`), `debug_info`
/// (rendered only when an assertion fails), and `unset_uses` (rendered when
/// `compile` finds a `Term` built from an unset variable).
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub format: String,
    pub to_resolve: Vec<Term>,
}

impl LogEntry {
    pub fn new(format: impl Into<String>) -> Self {
        LogEntry {
            format: format.into(),
            to_resolve: Vec::new(),
        }
    }

    pub fn with_term(mut self, term: Term) -> Self {
        self.to_resolve.push(term);
        self
    }

    /// Substitutes each `%s` placeholder, in order, with the rendering
    /// function's output for the corresponding resolved term.
    pub fn render(&self, mut resolve: impl FnMut(&Term) -> String) -> String {
        let mut out = String::with_capacity(self.format.len());
        let mut rest = self.format.as_str();
        for term in &self.to_resolve {
            match rest.find("%s") {
                Some(idx) => {
                    out.push_str(&rest[..idx]);
                    out.push_str(&resolve(term));
                    rest = &rest[idx + 2..];
                }
                None => break,
            }
        }
        out.push_str(rest);
        out
    }
}

/// Captures the caller's file:line at the point a `#[track_caller]` DSL
/// method was invoked.
#[track_caller]
pub fn caller_location() -> String {
    let loc = Location::caller();
    format!("{}:{}", loc.file(), loc.line())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coeff::SpecialCoeff;
    use crate::variable::Visibility;

    #[test]
    fn renders_placeholders_in_order() {
        let t1 = Term::new(Visibility::Internal, 0, 0, SpecialCoeff::One);
        let t2 = Term::new(Visibility::Internal, 1, 0, SpecialCoeff::One);
        let entry = LogEntry::new("a=%s b=%s\n").with_term(t1).with_term(t2);
        let mut calls = 0;
        let rendered = entry.render(|_| {
            calls += 1;
            calls.to_string()
        });
        assert_eq!(rendered, "a=1 b=2\n");
    }
}
