//! Type pool: arena storage for every type of one analysis unit.
//!
//! Types are pushed once and referenced by [`TypeId`] from then on.
//! Primitives are pre-interned at the fixed indices named on `TypeId`.
//!
//! # Lifecycle
//!
//! During declaration collection class bodies may still be completed through
//! [`TypePool::class_mut`]. After [`TypePool::seal`] they are read-only.

mod construct;
mod equality;
mod format;

use crate::{
    ArrayType, ClassType, EnumType, InterfaceType, RecordType, RegistryError, SignatureType,
    SubrangeType, TypeData, TypeId, TypeKind,
};

/// Arena of type data indexed by [`TypeId`].
#[derive(Clone, Debug)]
pub struct TypePool {
    items: Vec<TypeData>,
    sealed: bool,
}

impl TypePool {
    /// Create a pool holding only the pre-interned primitives.
    pub fn new() -> Self {
        let items = vec![
            TypeData::Integer,
            TypeData::Float,
            TypeData::String,
            TypeData::Boolean,
            TypeData::Nil,
            TypeData::Void,
            TypeData::Variant,
        ];
        debug_assert_eq!(items.len(), TypeId::PRIMITIVE_COUNT as usize);
        TypePool {
            items,
            sealed: false,
        }
    }

    /// Append a type and return its handle.
    pub fn push(&mut self, data: TypeData) -> TypeId {
        let raw = u32::try_from(self.items.len()).unwrap_or(u32::MAX);
        self.items.push(data);
        TypeId::from_raw(raw)
    }

    /// Number of types in the pool, primitives included.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check whether `id` was issued by this pool.
    #[inline]
    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.items.len()
    }

    /// Get the data of a type.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this pool.
    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.items[id.index()]
    }

    /// Get the raw kind of a type (aliases report `Alias`).
    #[inline]
    pub fn kind(&self, id: TypeId) -> TypeKind {
        self.get(id).kind()
    }

    /// Follow alias links to the aliased type.
    ///
    /// Alias targets always precede the alias in the pool, so the chain is
    /// finite; the walk is still capped at the pool size.
    pub fn underlying(&self, id: TypeId) -> TypeId {
        let mut current = id;
        for _ in 0..self.items.len() {
            match self.get(current) {
                TypeData::Alias(alias) => current = alias.target,
                _ => return current,
            }
        }
        current
    }

    /// Kind after unwrapping aliases.
    #[inline]
    pub fn underlying_kind(&self, id: TypeId) -> TypeKind {
        self.kind(self.underlying(id))
    }

    /// Data after unwrapping aliases.
    #[inline]
    pub fn resolved(&self, id: TypeId) -> &TypeData {
        self.get(self.underlying(id))
    }

    // === Alias-transparent accessors ===

    pub fn class(&self, id: TypeId) -> Option<&ClassType> {
        match self.resolved(id) {
            TypeData::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn record(&self, id: TypeId) -> Option<&RecordType> {
        match self.resolved(id) {
            TypeData::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn interface(&self, id: TypeId) -> Option<&InterfaceType> {
        match self.resolved(id) {
            TypeData::Interface(interface) => Some(interface),
            _ => None,
        }
    }

    pub fn enumeration(&self, id: TypeId) -> Option<&EnumType> {
        match self.resolved(id) {
            TypeData::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn array(&self, id: TypeId) -> Option<&ArrayType> {
        match self.resolved(id) {
            TypeData::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn subrange(&self, id: TypeId) -> Option<&SubrangeType> {
        match self.resolved(id) {
            TypeData::Subrange(subrange) => Some(subrange),
            _ => None,
        }
    }

    /// Signature of a function or method pointer.
    pub fn signature(&self, id: TypeId) -> Option<&SignatureType> {
        match self.resolved(id) {
            TypeData::FunctionPointer(sig) | TypeData::MethodPointer(sig) => Some(sig),
            _ => None,
        }
    }

    /// Class handle of a metaclass.
    pub fn class_of_target(&self, id: TypeId) -> Option<TypeId> {
        match self.resolved(id) {
            TypeData::ClassOf(class) => Some(*class),
            _ => None,
        }
    }

    // === Declaration collection ===

    /// Get a class for completion during declaration collection.
    pub fn class_mut(&mut self, id: TypeId) -> Result<&mut ClassType, RegistryError> {
        let target = self.underlying(id);
        let sealed = self.sealed;
        match &mut self.items[target.index()] {
            TypeData::Class(class) if sealed => Err(RegistryError::Sealed {
                name: class.name.clone(),
            }),
            TypeData::Class(class) => Ok(class),
            other => Err(RegistryError::NotAClass {
                name: other
                    .declared_name()
                    .map_or_else(|| target.to_string(), str::to_owned),
            }),
        }
    }

    /// End declaration collection. Class member maps become read-only.
    pub fn seal(&mut self) {
        tracing::debug!(types = self.items.len(), "type pool sealed");
        self.sealed = true;
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Iterate every `(handle, data)` pair in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeData)> {
        (0_u32..).zip(&self.items).map(|(raw, data)| (TypeId::from_raw(raw), data))
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
