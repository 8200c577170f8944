//! Registry of every named type in an analysis unit.
//!
//! The `TypeRegistry` maps case-insensitive names to pool handles plus the
//! declaration metadata needed by validation passes.
//!
//! # Duplicate Policy
//!
//! - `register` rejects a name already taken by a user declaration.
//! - A built-in entry may be shadowed by a user declaration.
//! - `register_builtin` always succeeds and replaces any prior entry, so the
//!   built-in set can be seeded repeatedly.

use dws_ir::{IdentMap, Position, TypeVisibility};

use crate::{RegistryError, TypeData, TypeId, TypeKind, TypePool};

/// A registered type with its declaration metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// The name as declared.
    pub name: String,
    /// Pool handle.
    pub ty: TypeId,
    /// Declaration site (`Position::BUILTIN` for built-ins).
    pub position: Position,
    pub visibility: TypeVisibility,
    pub builtin: bool,
}

/// Registry of named types.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: IdentMap<TypeDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user-declared type.
    pub fn register(
        &mut self,
        name: &str,
        ty: TypeId,
        position: Position,
        visibility: TypeVisibility,
    ) -> Result<(), RegistryError> {
        self.check_available(name)?;
        if self.types.contains(name) {
            tracing::debug!(name, "user type shadows built-in");
        }

        self.types.insert(
            name,
            TypeDescriptor {
                name: name.to_owned(),
                ty,
                position,
                visibility,
                builtin: false,
            },
        );
        Ok(())
    }

    /// Check that `name` may be taken by a user declaration.
    pub fn check_available(&self, name: &str) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        match self.types.get(name) {
            Some(existing) if !existing.builtin => Err(RegistryError::DuplicateType {
                name: existing.name.clone(),
                position: existing.position,
            }),
            _ => Ok(()),
        }
    }

    /// Register a built-in type, replacing any prior entry.
    pub fn register_builtin(&mut self, name: &str, ty: TypeId) {
        let replaced = self.types.insert(
            name,
            TypeDescriptor {
                name: name.to_owned(),
                ty,
                position: Position::BUILTIN,
                visibility: TypeVisibility::Public,
                builtin: true,
            },
        );
        if replaced.is_some() {
            tracing::trace!(name, "built-in type re-registered");
        }
    }

    /// Resolve a name to its pool handle.
    pub fn resolve(&self, name: &str) -> Option<TypeId> {
        self.types.get(name).map(|d| d.ty)
    }

    /// Resolve a name to its full descriptor.
    pub fn resolve_descriptor(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Resolve a name and unwrap any alias chain.
    pub fn resolve_underlying(&self, pool: &TypePool, name: &str) -> Option<TypeId> {
        self.resolve(name).map(|ty| pool.underlying(ty))
    }

    pub fn has(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    /// Number of registered types.
    pub fn count(&self) -> usize {
        self.types.len()
    }

    /// Snapshot of every `(name, handle)` pair, ordered by name.
    pub fn all_types(&self) -> Vec<(&str, TypeId)> {
        self.types.values().map(|d| (d.name.as_str(), d.ty)).collect()
    }

    /// Iterate every descriptor, ordered by name.
    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    /// Names of every type whose kind is `kind`.
    ///
    /// Aliases are classified by the kind of the type they abbreviate.
    pub fn types_by_kind(&self, pool: &TypePool, kind: TypeKind) -> Vec<&str> {
        self.types
            .values()
            .filter(|d| pool.underlying_kind(d.ty) == kind)
            .map(|d| d.name.as_str())
            .collect()
    }

    /// Find the type declared at `position` (line and column).
    pub fn find_by_position(&self, position: Position) -> Option<&TypeDescriptor> {
        self.types
            .values()
            .find(|d| !d.builtin && d.position.same_location(position))
    }

    /// Types declared on lines `start..=end`.
    pub fn types_in_range(&self, start: u32, end: u32) -> Vec<&TypeDescriptor> {
        self.types
            .values()
            .filter(|d| !d.builtin && d.position.on_lines(start, end))
            .collect()
    }

    /// Display names of the types `name` refers to directly.
    pub fn dependencies(&self, pool: &TypePool, name: &str) -> Vec<String> {
        let Some(descriptor) = self.types.get(name) else {
            return Vec::new();
        };

        let mut deps = Vec::new();
        match pool.get(descriptor.ty) {
            TypeData::Record(record) => {
                deps.extend(record.fields.values().map(|f| pool.display_name(f.ty)));
            }
            TypeData::Class(class) => {
                deps.extend(class.parent.clone());
                deps.extend(class.fields.values().map(|f| pool.display_name(f.ty)));
            }
            TypeData::Interface(interface) => deps.extend(interface.parent.clone()),
            TypeData::Array(array) => deps.push(pool.display_name(array.element)),
            TypeData::Subrange(subrange) => deps.push(pool.display_name(subrange.base)),
            TypeData::Alias(alias) => deps.push(pool.display_name(alias.target)),
            TypeData::ClassOf(class) => deps.push(pool.display_name(*class)),
            TypeData::FunctionPointer(sig) | TypeData::MethodPointer(sig) => {
                deps.extend(sig.params.iter().map(|&p| pool.display_name(p)));
                deps.extend(sig.ret.map(|r| pool.display_name(r)));
            }
            _ => {}
        }
        deps
    }

    /// Remove a type, returning whether it was present.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.types.remove(name).is_some()
    }

    /// Remove every type, built-ins included.
    pub fn clear(&mut self) {
        self.types.clear();
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
