//! Type kind discriminant for kind-driven dispatch.
//!
//! Each type in the pool has a `TypeKind` that identifies its variant.
//!
//! # Kind Categories
//!
//! Kinds are organized into semantic ranges:
//! - 0-15: Primitives
//! - 16-31: Nominal user types (class, record, interface, enum)
//! - 32-47: Structural types (array, subrange, pointers, metaclass)
//! - 48-63: Special (variant, alias)

use std::fmt;

/// Type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TypeKind {
    // === Primitives (0-15) ===
    /// 64-bit signed integer.
    Integer = 0,
    /// 64-bit floating point.
    Float = 1,
    /// Unicode string.
    String = 2,
    /// Boolean.
    Boolean = 3,
    /// Type of the `nil` literal.
    Nil = 4,
    /// Result type of procedures.
    Void = 5,

    // === Nominal Types (16-31) ===
    /// Class with single inheritance.
    Class = 16,
    /// Value record.
    Record = 17,
    /// Interface with single interface inheritance.
    Interface = 18,
    /// Enumeration.
    Enum = 19,

    // === Structural Types (32-47) ===
    /// Static or dynamic array.
    Array = 32,
    /// Ordinal subrange.
    Subrange = 33,
    /// Plain function or procedure pointer.
    FunctionPointer = 34,
    /// Method pointer (`of object`).
    MethodPointer = 35,
    /// Metaclass (`class of T`).
    ClassOf = 36,

    // === Special (48-63) ===
    /// Dynamically typed container.
    Variant = 48,
    /// Alias of another type.
    Alias = 49,
}

impl TypeKind {
    /// Check if this kind is a primitive.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        (self as u8) < 16
    }

    /// Check if this kind is compared by name rather than by structure.
    #[inline]
    pub const fn is_nominal(self) -> bool {
        let v = self as u8;
        v >= 16 && v < 32
    }

    /// Check if this kind is a function or method pointer.
    #[inline]
    pub const fn is_pointer(self) -> bool {
        matches!(self, Self::FunctionPointer | Self::MethodPointer)
    }

    /// Check if values of this kind may be `nil`.
    #[inline]
    pub const fn is_nullable(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::ClassOf)
    }

    /// Check if this kind is an ordinal (usable as a subrange base).
    #[inline]
    pub const fn is_ordinal(self) -> bool {
        matches!(self, Self::Integer | Self::Boolean | Self::Enum)
    }

    /// Get the name of this kind as a static string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Float => "FLOAT",
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::Nil => "NIL",
            Self::Void => "VOID",
            Self::Class => "CLASS",
            Self::Record => "RECORD",
            Self::Interface => "INTERFACE",
            Self::Enum => "ENUM",
            Self::Array => "ARRAY",
            Self::Subrange => "SUBRANGE",
            Self::FunctionPointer => "FUNCTION_POINTER",
            Self::MethodPointer => "METHOD_POINTER",
            Self::ClassOf => "CLASSOF",
            Self::Variant => "VARIANT",
            Self::Alias => "ALIAS",
        }
    }
}

impl fmt::Debug for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
