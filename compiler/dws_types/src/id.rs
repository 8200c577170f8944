//! Type handle.
//!
//! `TypeId` is the canonical way to refer to a type. Every type lives in a
//! [`TypePool`](crate::TypePool) and is referenced by its 32-bit index.
//!
//! # Design
//!
//! - Primitive types have fixed indices for O(1) access
//! - Handles are `Copy`; compound types and aliases hold handles, never owners
//! - Handle equality is identity, not type equality (see `TypePool::equals`)

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Primitive Types (indices 0-6) ===
    // Pre-interned at pool creation.

    /// The `Integer` type.
    pub const INTEGER: Self = Self(0);
    /// The `Float` type.
    pub const FLOAT: Self = Self(1);
    /// The `String` type.
    pub const STRING: Self = Self(2);
    /// The `Boolean` type.
    pub const BOOLEAN: Self = Self(3);
    /// The type of the `nil` literal.
    pub const NIL: Self = Self(4);
    /// The result type of procedures.
    pub const VOID: Self = Self(5);
    /// The dynamically-typed `Variant` container.
    pub const VARIANT: Self = Self(6);

    /// Number of pre-interned types.
    pub const PRIMITIVE_COUNT: u32 = 7;

    /// Create a handle from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as a `usize` for slice access.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this handle names a pre-interned type.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::INTEGER => write!(f, "TypeId::INTEGER"),
            Self::FLOAT => write!(f, "TypeId::FLOAT"),
            Self::STRING => write!(f, "TypeId::STRING"),
            Self::BOOLEAN => write!(f, "TypeId::BOOLEAN"),
            Self::NIL => write!(f, "TypeId::NIL"),
            Self::VOID => write!(f, "TypeId::VOID"),
            Self::VARIANT => write!(f, "TypeId::VARIANT"),
            _ => write!(f, "TypeId({})", self.0),
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
