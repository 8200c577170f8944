//! Type construction helpers for the pool.
//!
//! Provides ergonomic methods for creating compound types.

use crate::{
    AliasType, ArrayType, ClassType, EnumType, InterfaceType, RecordType, SignatureType,
    SubrangeType, TypeData, TypeId, TypePool,
};

impl TypePool {
    // === Named Types ===

    pub fn add_class(&mut self, class: ClassType) -> TypeId {
        self.push(TypeData::Class(class))
    }

    pub fn add_record(&mut self, record: RecordType) -> TypeId {
        self.push(TypeData::Record(record))
    }

    pub fn add_interface(&mut self, interface: InterfaceType) -> TypeId {
        self.push(TypeData::Interface(interface))
    }

    pub fn add_enum(&mut self, enumeration: EnumType) -> TypeId {
        self.push(TypeData::Enum(enumeration))
    }

    /// Create a named alias of `target`.
    pub fn alias(&mut self, name: impl Into<String>, target: TypeId) -> TypeId {
        self.push(TypeData::Alias(AliasType {
            name: name.into(),
            target,
        }))
    }

    /// Create a subrange of `base` over `low..high` (inclusive).
    pub fn add_subrange(&mut self, name: impl Into<String>, base: TypeId, low: i64, high: i64) -> TypeId {
        self.push(TypeData::Subrange(SubrangeType {
            name: name.into(),
            base,
            low,
            high,
        }))
    }

    // === Structural Types ===

    /// Create a dynamic array `array of elem`.
    pub fn dynamic_array(&mut self, element: TypeId) -> TypeId {
        self.push(TypeData::Array(ArrayType {
            element,
            bounds: None,
        }))
    }

    /// Create a static array `array[low..high] of elem`.
    pub fn static_array(&mut self, element: TypeId, low: i64, high: i64) -> TypeId {
        self.push(TypeData::Array(ArrayType {
            element,
            bounds: Some((low, high)),
        }))
    }

    /// Create a function pointer type. A `None` result makes it a procedure.
    pub fn function_pointer(
        &mut self,
        params: impl IntoIterator<Item = TypeId>,
        ret: Option<TypeId>,
    ) -> TypeId {
        self.push(TypeData::FunctionPointer(SignatureType::new(params, ret)))
    }

    /// Create a method pointer type (`... of object`).
    pub fn method_pointer(
        &mut self,
        params: impl IntoIterator<Item = TypeId>,
        ret: Option<TypeId>,
    ) -> TypeId {
        self.push(TypeData::MethodPointer(SignatureType::new(params, ret)))
    }

    /// Create the metaclass `class of C`.
    pub fn class_of(&mut self, class: TypeId) -> TypeId {
        self.push(TypeData::ClassOf(class))
    }
}
