//! Type data stored in the pool.
//!
//! `TypeData` is the closed set of type shapes the engine knows about.
//! Compound shapes refer to other types by [`TypeId`] only; classes and
//! interfaces refer to their parents by name so a subclass may be declared
//! before its base.

use dws_ir::{same_ident, IdentMap, Visibility};
use smallvec::SmallVec;

use crate::{ClassFlags, MemberFlags, OutOfRange, TypeId, TypeKind};

/// Parameter type list of a callable signature.
pub type ParamTypes = SmallVec<[TypeId; 4]>;

/// The shape of one type in the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeData {
    Integer,
    Float,
    String,
    Boolean,
    Nil,
    Void,
    Variant,
    Class(ClassType),
    Record(RecordType),
    Interface(InterfaceType),
    Enum(EnumType),
    Array(ArrayType),
    Subrange(SubrangeType),
    FunctionPointer(SignatureType),
    MethodPointer(SignatureType),
    /// Metaclass over the class with the given handle.
    ClassOf(TypeId),
    Alias(AliasType),
}

impl TypeData {
    /// The raw discriminant (aliases report `Alias`).
    pub const fn kind(&self) -> TypeKind {
        match self {
            TypeData::Integer => TypeKind::Integer,
            TypeData::Float => TypeKind::Float,
            TypeData::String => TypeKind::String,
            TypeData::Boolean => TypeKind::Boolean,
            TypeData::Nil => TypeKind::Nil,
            TypeData::Void => TypeKind::Void,
            TypeData::Variant => TypeKind::Variant,
            TypeData::Class(_) => TypeKind::Class,
            TypeData::Record(_) => TypeKind::Record,
            TypeData::Interface(_) => TypeKind::Interface,
            TypeData::Enum(_) => TypeKind::Enum,
            TypeData::Array(_) => TypeKind::Array,
            TypeData::Subrange(_) => TypeKind::Subrange,
            TypeData::FunctionPointer(_) => TypeKind::FunctionPointer,
            TypeData::MethodPointer(_) => TypeKind::MethodPointer,
            TypeData::ClassOf(_) => TypeKind::ClassOf,
            TypeData::Alias(_) => TypeKind::Alias,
        }
    }

    /// The declared name, for types that carry one.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            TypeData::Class(c) => Some(&c.name),
            TypeData::Record(r) => Some(&r.name),
            TypeData::Interface(i) => Some(&i.name),
            TypeData::Enum(e) => Some(&e.name),
            TypeData::Subrange(s) if !s.name.is_empty() => Some(&s.name),
            TypeData::Alias(a) => Some(&a.name),
            _ => None,
        }
    }
}

/// A field of a class or record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    pub ty: TypeId,
    pub visibility: Visibility,
    /// Declared `class var`.
    pub is_class_var: bool,
}

/// A method of a class, record, interface or helper.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    /// A `FunctionPointer` type describing parameters and result.
    pub signature: TypeId,
    pub visibility: Visibility,
    pub flags: MemberFlags,
}

impl MethodInfo {
    pub fn new(signature: TypeId) -> Self {
        MethodInfo {
            signature,
            visibility: Visibility::Public,
            flags: MemberFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// How a property reads or writes its value.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum PropertyAccess {
    /// Not readable (or not writable).
    #[default]
    None,
    /// Backed directly by a field.
    Field(String),
    /// Routed through a getter or setter method.
    Method(String),
}

/// A property of a class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyInfo {
    pub ty: TypeId,
    pub read: PropertyAccess,
    pub write: PropertyAccess,
    pub visibility: Visibility,
    /// Indexed properties take an argument list.
    pub is_indexed: bool,
    /// The `default` property of the class.
    pub is_default: bool,
}

impl PropertyInfo {
    pub fn new(ty: TypeId, read: PropertyAccess, write: PropertyAccess) -> Self {
        PropertyInfo {
            ty,
            read,
            write,
            visibility: Visibility::Public,
            is_indexed: false,
            is_default: false,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.write == PropertyAccess::None
    }
}

/// A class declaration.
///
/// Members are keyed case-insensitively. The parent is stored by name and
/// resolved lazily through the class registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassType {
    pub name: String,
    pub parent: Option<String>,
    pub fields: IdentMap<FieldInfo>,
    pub methods: IdentMap<MethodInfo>,
    pub properties: IdentMap<PropertyInfo>,
    /// Names of directly implemented interfaces, in declaration order.
    pub interfaces: Vec<String>,
    pub flags: ClassFlags,
    pub external_name: Option<String>,
}

impl ClassType {
    pub fn new(name: impl Into<String>) -> Self {
        ClassType {
            name: name.into(),
            parent: None,
            fields: IdentMap::new(),
            methods: IdentMap::new(),
            properties: IdentMap::new(),
            interfaces: Vec::new(),
            flags: ClassFlags::empty(),
            external_name: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, name: &str, ty: TypeId, visibility: Visibility) -> Self {
        self.add_field(name, ty, visibility);
        self
    }

    #[must_use]
    pub fn with_method(mut self, name: &str, method: MethodInfo) -> Self {
        self.methods.insert(name, method);
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: &str, property: PropertyInfo) -> Self {
        self.properties.insert(name, property);
        self
    }

    #[must_use]
    pub fn implementing(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ClassFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn add_field(&mut self, name: &str, ty: TypeId, visibility: Visibility) {
        self.fields.insert(
            name,
            FieldInfo {
                ty,
                visibility,
                is_class_var: false,
            },
        );
    }

    pub fn add_method(&mut self, name: &str, method: MethodInfo) {
        self.methods.insert(name, method);
    }

    /// Check whether this class lists `interface` among its direct interfaces.
    pub fn declares_interface(&self, interface: &str) -> bool {
        self.interfaces.iter().any(|i| same_ident(i, interface))
    }

    pub fn is_forward(&self) -> bool {
        self.flags.contains(ClassFlags::FORWARD)
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.contains(ClassFlags::ABSTRACT)
            || self.methods.values().any(|m| m.flags.contains(MemberFlags::ABSTRACT))
    }
}

/// A record declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordType {
    pub name: String,
    pub fields: IdentMap<FieldInfo>,
    pub methods: IdentMap<MethodInfo>,
}

impl RecordType {
    pub fn new(name: impl Into<String>) -> Self {
        RecordType {
            name: name.into(),
            fields: IdentMap::new(),
            methods: IdentMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: &str, ty: TypeId) -> Self {
        self.fields.insert(
            name,
            FieldInfo {
                ty,
                visibility: Visibility::Public,
                is_class_var: false,
            },
        );
        self
    }
}

/// An interface declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceType {
    pub name: String,
    pub parent: Option<String>,
    pub methods: IdentMap<MethodInfo>,
    pub external_name: Option<String>,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>) -> Self {
        InterfaceType {
            name: name.into(),
            parent: None,
            methods: IdentMap::new(),
            external_name: None,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_method(mut self, name: &str, method: MethodInfo) -> Self {
        self.methods.insert(name, method);
        self
    }
}

/// An enumeration with explicit ordinal values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    /// Elements in declaration order.
    pub values: Vec<(String, i64)>,
}

impl EnumType {
    /// Build an enumeration whose ordinals count up from zero.
    pub fn new<S: Into<String>>(name: impl Into<String>, elements: impl IntoIterator<Item = S>) -> Self {
        EnumType {
            name: name.into(),
            values: elements
                .into_iter()
                .zip(0_i64..)
                .map(|(n, v)| (n.into(), v))
                .collect(),
        }
    }

    pub fn ordinal_of(&self, element: &str) -> Option<i64> {
        self.values
            .iter()
            .find(|(n, _)| same_ident(n, element))
            .map(|&(_, v)| v)
    }

    pub fn element_of(&self, ordinal: i64) -> Option<&str> {
        self.values
            .iter()
            .find(|&&(_, v)| v == ordinal)
            .map(|(n, _)| n.as_str())
    }

    pub fn low(&self) -> Option<i64> {
        self.values.iter().map(|&(_, v)| v).min()
    }

    pub fn high(&self) -> Option<i64> {
        self.values.iter().map(|&(_, v)| v).max()
    }
}

/// An array. Static arrays carry inclusive bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ArrayType {
    pub element: TypeId,
    pub bounds: Option<(i64, i64)>,
}

impl ArrayType {
    pub fn is_dynamic(&self) -> bool {
        self.bounds.is_none()
    }

    /// Element count of a static array (zero when the bounds are inverted).
    ///
    /// A span too wide for `i64` counts as zero.
    pub fn len(&self) -> Option<u64> {
        self.bounds.map(|(low, high)| {
            high.checked_sub(low)
                .and_then(|span| span.checked_add(1))
                .and_then(|count| u64::try_from(count).ok())
                .unwrap_or(0)
        })
    }
}

/// A restriction of an ordinal base type to an inclusive interval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubrangeType {
    /// Declared name, empty for anonymous subranges.
    pub name: String,
    pub base: TypeId,
    pub low: i64,
    pub high: i64,
}

impl SubrangeType {
    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        (self.low..=self.high).contains(&value)
    }

    /// Narrowing check applied when a base-typed value is stored into the subrange.
    pub fn check_range(&self, value: i64) -> Result<i64, OutOfRange> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(OutOfRange {
                value,
                name: self.name.clone(),
                low: self.low,
                high: self.high,
            })
        }
    }
}

/// Parameters and result of a function or method pointer.
///
/// A `None` result denotes a procedure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureType {
    pub params: ParamTypes,
    pub ret: Option<TypeId>,
}

impl SignatureType {
    pub fn new(params: impl IntoIterator<Item = TypeId>, ret: Option<TypeId>) -> Self {
        SignatureType {
            params: params.into_iter().collect(),
            ret,
        }
    }

    pub fn is_procedure(&self) -> bool {
        self.ret.is_none()
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A named alias of another type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasType {
    pub name: String,
    pub target: TypeId,
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
