//! Diagnostic reporting seam.
//!
//! The engine never formats positioned diagnostics itself. On a rejected
//! assignment it hands the position, the source text of the expression and
//! the typed reason to an [`ErrorCatalog`] owned by the caller.

use dws_ir::Position;

use crate::AssignError;

/// Sink for positioned assignment diagnostics.
pub trait ErrorCatalog {
    /// Report a rejected assignment.
    fn report(&mut self, position: Position, expr: &str, error: &AssignError);
}

/// A rendered diagnostic, as collected by the `Vec` catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub position: Position,
    pub expr: String,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (in \"{}\")", self.position, self.message, self.expr)
    }
}

impl ErrorCatalog for Vec<Diagnostic> {
    fn report(&mut self, position: Position, expr: &str, error: &AssignError) {
        self.push(Diagnostic {
            position,
            expr: expr.to_owned(),
            message: error.to_string(),
        });
    }
}
