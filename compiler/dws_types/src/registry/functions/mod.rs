//! Function registry: overload sets keyed by name.
//!
//! Every declaration is appended to the overload set of its name; overloads
//! are told apart later by arity and the `overload` directive. Functions
//! imported from a unit are additionally reachable as `Unit.Name`.

use std::rc::Rc;

use dws_ir::{same_ident, IdentMap};

use crate::{FunctionDecl, RegistryError};

/// One registered overload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionEntry {
    /// The name as registered.
    pub name: String,
    /// Declaring unit, for functions registered with one.
    pub unit: Option<String>,
    pub decl: Rc<FunctionDecl>,
}

impl FunctionEntry {
    #[inline]
    pub fn arity(&self) -> usize {
        self.decl.arity()
    }
}

/// Summary of one overload, for tooling and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionMetadata {
    pub name: String,
    pub unit: Option<String>,
    pub parameter_count: usize,
    pub is_forward: bool,
    pub is_overload: bool,
}

/// Registry of function overloads.
#[derive(Clone, Debug, Default)]
pub struct FunctionRegistry {
    /// Bare name -> overloads, in registration order.
    global: IdentMap<Vec<FunctionEntry>>,
    /// `unit.name` -> overloads, in registration order.
    qualified: IdentMap<Vec<FunctionEntry>>,
}

fn qualified_key(unit: &str, name: &str) -> String {
    format!("{unit}.{name}")
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an overload to the global namespace.
    pub fn register(&mut self, name: &str, decl: impl Into<Rc<FunctionDecl>>) {
        let entry = FunctionEntry {
            name: name.to_owned(),
            unit: None,
            decl: decl.into(),
        };
        self.push_global(entry);
    }

    /// Append an overload under both `name` and `unit.name`.
    pub fn register_with_unit(&mut self, unit: &str, name: &str, decl: impl Into<Rc<FunctionDecl>>) {
        let entry = FunctionEntry {
            name: name.to_owned(),
            unit: Some(unit.to_owned()),
            decl: decl.into(),
        };
        self.qualified
            .entry_or_default(&qualified_key(unit, name))
            .push(entry.clone());
        self.push_global(entry);
    }

    fn push_global(&mut self, entry: FunctionEntry) {
        let overloads = self.global.entry_or_default(&entry.name);
        overloads.push(entry);
        if overloads.len() > 1 {
            tracing::trace!(
                name = %overloads[0].name,
                overloads = overloads.len(),
                "overload appended"
            );
        }
    }

    /// All overloads of `name` (empty when unknown).
    pub fn lookup(&self, name: &str) -> &[FunctionEntry] {
        self.global.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// All overloads of `unit.name` (empty when unknown).
    pub fn lookup_qualified(&self, unit: &str, name: &str) -> &[FunctionEntry] {
        self.qualified
            .get(&qualified_key(unit, name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn exists(&self, name: &str) -> bool {
        !self.lookup(name).is_empty()
    }

    pub fn exists_qualified(&self, unit: &str, name: &str) -> bool {
        !self.lookup_qualified(unit, name).is_empty()
    }

    pub fn overload_count(&self, name: &str) -> usize {
        self.lookup(name).len()
    }

    pub fn overload_count_qualified(&self, unit: &str, name: &str) -> usize {
        self.lookup_qualified(unit, name).len()
    }

    /// Number of distinct global names.
    pub fn count(&self) -> usize {
        self.global.len()
    }

    /// Number of global overloads across all names.
    pub fn total_overloads(&self) -> usize {
        self.global.values().map(Vec::len).sum()
    }

    /// Every global name with its overloads, ordered by name.
    pub fn all_functions(&self) -> impl Iterator<Item = (&str, &[FunctionEntry])> {
        self.global.iter().map(|(name, v)| (name, v.as_slice()))
    }

    /// Distinct global names, ordered case-insensitively.
    pub fn function_names(&self) -> Vec<&str> {
        self.global.names().collect()
    }

    /// Overloads declared in `unit`.
    pub fn functions_in_unit(&self, unit: &str) -> Vec<&FunctionEntry> {
        self.qualified
            .values()
            .flatten()
            .filter(|e| e.unit.as_deref().is_some_and(|u| same_ident(u, unit)))
            .collect()
    }

    /// Overloads taking exactly `count` parameters, grouped by name.
    pub fn find_by_parameter_count(&self, count: usize) -> Vec<(&str, Vec<&FunctionEntry>)> {
        self.global
            .iter()
            .filter_map(|(name, overloads)| {
                let matching: Vec<_> = overloads.iter().filter(|e| e.arity() == count).collect();
                (!matching.is_empty()).then_some((name, matching))
            })
            .collect()
    }

    /// Per-overload summary of `name`, in registration order.
    pub fn metadata(&self, name: &str) -> Vec<FunctionMetadata> {
        self.lookup(name)
            .iter()
            .map(|e| FunctionMetadata {
                name: e.name.clone(),
                unit: e.unit.clone(),
                parameter_count: e.arity(),
                is_forward: e.decl.is_forward,
                is_overload: e.decl.is_overload,
            })
            .collect()
    }

    /// Check that a new declaration of `name` with `arity` parameters would not
    /// clash with an existing overload.
    ///
    /// Same name with a different arity is always allowed. Same arity is
    /// allowed only if one of the two declarations carries `overload`.
    pub fn validate_no_conflicts(
        &self,
        name: &str,
        arity: usize,
        has_overload: bool,
    ) -> Result<(), RegistryError> {
        if has_overload {
            return Ok(());
        }
        match self
            .lookup(name)
            .iter()
            .find(|e| e.arity() == arity && !e.decl.is_overload)
        {
            Some(existing) => Err(RegistryError::ConflictingOverload {
                name: existing.name.clone(),
                arity,
            }),
            None => Ok(()),
        }
    }

    /// Remove every overload of `name`.
    ///
    /// Qualified entries whose name part matches are removed as well.
    pub fn remove_function(&mut self, name: &str) -> bool {
        if self.global.remove(name).is_none() {
            return false;
        }
        self.qualified.retain(|key, _| {
            key.rsplit_once('.')
                .map_or(true, |(_, suffix)| !same_ident(suffix, name))
        });
        true
    }

    pub fn clear(&mut self) {
        self.global.clear();
        self.qualified.clear();
    }
}
