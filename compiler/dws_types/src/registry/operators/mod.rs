//! Operator overload registry.
//!
//! Candidates are grouped by operator symbol and told apart by their exact
//! operand-type signature. Lookup never widens operand types; matching a
//! subclass operand against a base-class overload is done by the caller
//! (see `TypeSystem::resolve_operator`).

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::RegistryError;

/// Operand type names of an operator signature.
pub type OperandTypes = SmallVec<[String; 2]>;

/// A registered operator overload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorEntry {
    /// Operator symbol or keyword as declared (`+`, `in`, `implicit`, ...).
    pub operator: String,
    /// Operand type names in operand order.
    pub operand_types: OperandTypes,
    /// Name of the routine implementing the operator.
    pub binding: String,
    /// Owning class, for class operators.
    pub class: Option<String>,
    /// Operand position bound to `Self`, for class operators.
    pub self_index: Option<usize>,
    pub is_class_method: bool,
}

impl OperatorEntry {
    /// A global operator bound to `binding`.
    pub fn new<S: AsRef<str>>(
        operator: &str,
        operand_types: impl IntoIterator<Item = S>,
        binding: &str,
    ) -> Self {
        OperatorEntry {
            operator: operator.to_owned(),
            operand_types: operand_types
                .into_iter()
                .map(|s| s.as_ref().to_owned())
                .collect(),
            binding: binding.to_owned(),
            class: None,
            self_index: None,
            is_class_method: false,
        }
    }

    /// Mark this operator as declared by `class`, with `Self` at `self_index`.
    #[must_use]
    pub fn in_class(mut self, class: &str, self_index: usize) -> Self {
        self.class = Some(class.to_owned());
        self.self_index = Some(self_index);
        self
    }

    #[must_use]
    pub fn class_method(mut self) -> Self {
        self.is_class_method = true;
        self
    }

    /// The composite signature key of this entry.
    pub fn signature(&self) -> String {
        signature_key(&self.operand_types)
    }
}

/// Join operand type names into one comparable key.
///
/// Type names compare case-insensitively.
pub fn signature_key<S: AsRef<str>>(operand_types: &[S]) -> String {
    operand_types
        .iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join("|")
}

/// Registry of operator overloads.
///
/// `Clone` yields an independent copy for a nested analysis scope.
#[derive(Clone, Debug, Default)]
pub struct OperatorRegistry {
    /// Lowercased operator -> candidates in registration order.
    entries: FxHashMap<String, Vec<OperatorEntry>>,
}

impl OperatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an overload; rejects a repeated signature for the same operator.
    pub fn register(&mut self, entry: OperatorEntry) -> Result<(), RegistryError> {
        let signature = entry.signature();
        let candidates = self.entries.entry(entry.operator.to_lowercase()).or_default();
        if candidates.iter().any(|e| e.signature() == signature) {
            return Err(RegistryError::DuplicateOperator {
                operator: entry.operator,
                signature: entry.operand_types.join(", "),
            });
        }
        tracing::debug!(operator = %entry.operator, %signature, "operator registered");
        candidates.push(entry);
        Ok(())
    }

    /// Find the overload whose signature matches `operand_types` exactly.
    pub fn lookup<S: AsRef<str>>(&self, operator: &str, operand_types: &[S]) -> Option<&OperatorEntry> {
        let signature = signature_key(operand_types);
        self.operators_for(operator)
            .iter()
            .find(|e| e.signature() == signature)
    }

    /// Every overload of `operator`, in registration order.
    pub fn operators_for(&self, operator: &str) -> &[OperatorEntry] {
        self.entries
            .get(&operator.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of overloads.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
