//! Error types.
//!
//! Registry errors are local: a failed registration leaves the registry
//! usable and unchanged. Assignment and overload failures carry the type
//! names involved so a diagnostic catalog can render them.

use dws_ir::Position;

/// A rejected registration or mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("type '{name}' already defined at {position}")]
    DuplicateType { name: String, position: Position },

    #[error("operator '{operator}' already defined for operand types ({signature})")]
    DuplicateOperator { operator: String, signature: String },

    #[error("{} conversion from {from} to {to} already registered", conversion_kind(.implicit))]
    DuplicateConversion {
        from: String,
        to: String,
        implicit: bool,
    },

    #[error("helper '{name}' already defined")]
    DuplicateHelper { name: String },

    #[error("function '{name}' already declared with {arity} parameter(s); use the 'overload' directive")]
    ConflictingOverload { name: String, arity: usize },

    #[error("cannot modify '{name}' after declarations are sealed")]
    Sealed { name: String },

    #[error("'{name}' is not a class")]
    NotAClass { name: String },

    #[error("class '{name}' is already complete")]
    NotForward { name: String },

    #[error("type declared as '{name}' carries the name '{declared}'")]
    NameMismatch { name: String, declared: String },

    #[error("{category} RTTI identifiers exhausted")]
    RttiExhausted { category: crate::RttiCategory },
}

fn conversion_kind(implicit: &bool) -> &'static str {
    if *implicit {
        "implicit"
    } else {
        "explicit"
    }
}

/// Why an assignment was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    #[error("class '{from}' is not '{to}' or a descendant of it")]
    ClassMismatch { from: String, to: String },

    #[error("class '{class}' does not implement interface '{interface}'")]
    InterfaceNotImplemented { class: String, interface: String },

    #[error("interface '{from}' does not extend '{to}'")]
    InterfaceMismatch { from: String, to: String },

    #[error("signature '{from}' is not compatible with '{to}'")]
    SignatureMismatch { from: String, to: String },

    #[error("incompatible types: cannot assign {from} to {to}")]
    Incompatible { from: String, to: String },
}

impl AssignError {
    /// Source and target type names.
    pub fn type_names(&self) -> (&str, &str) {
        match self {
            AssignError::ClassMismatch { from, to }
            | AssignError::InterfaceMismatch { from, to }
            | AssignError::SignatureMismatch { from, to }
            | AssignError::Incompatible { from, to } => (from, to),
            AssignError::InterfaceNotImplemented { class, interface } => (class, interface),
        }
    }
}

/// Failure to pick a single overload.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OverloadError {
    #[error("unknown name \"{name}\"")]
    Unknown { name: String },

    #[error("There is no overloaded version of \"{name}\" that can be called with these arguments")]
    NoMatch { name: String },

    #[error("ambiguous call to \"{name}\": {candidates} candidates match equally well")]
    Ambiguous { name: String, candidates: usize },
}

/// A value outside the bounds of a subrange.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("value {value} is out of range for type {name} ({low}..{high})")]
pub struct OutOfRange {
    pub value: i64,
    pub name: String,
    pub low: i64,
    pub high: i64,
}
