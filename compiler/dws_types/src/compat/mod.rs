//! Assignment compatibility.
//!
//! `assign_rule` is a priority-ordered chain: the first rule that admits an
//! assignment wins. Rule order is observable through the reported rule and
//! its cost.
//!
//! Aliases are unwrapped before any rule runs.

use dws_ir::Position;

use crate::{AssignError, ErrorCatalog, TypeData, TypeId, TypeKind, TypeSystem};

/// The rule that admitted an assignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssignRule {
    /// Same type, structurally or nominally.
    Identical,
    /// `Integer` into `Float`.
    NumericWidening,
    /// `nil` into (or compared with) a reference type.
    Nil,
    /// A class into one of its ancestors.
    ClassUpcast,
    /// `class of A` into `class of B` where A descends from B.
    MetaclassUpcast,
    /// A class reference used as a value into a `class of` variable.
    ClassToMetaclass,
    /// A class into an interface it implements.
    InterfaceImplementation,
    /// An interface into one it extends.
    InterfaceUpcast,
    SubrangeToBase,
    /// Narrowing; checked at run time.
    BaseToSubrange,
    VariantBoxing,
    /// Unchecked; the value is validated at run time.
    VariantUnboxing,
    EnumToInteger,
    /// Function or method pointers with equal signatures.
    PointerCompatible,
    /// A registered implicit conversion.
    ImplicitConversion,
}

impl AssignRule {
    /// Ranking cost used by overload resolution.
    pub const fn cost(self) -> u32 {
        match self {
            AssignRule::Identical => 0,
            AssignRule::NumericWidening
            | AssignRule::Nil
            | AssignRule::ClassUpcast
            | AssignRule::MetaclassUpcast
            | AssignRule::ClassToMetaclass
            | AssignRule::InterfaceImplementation
            | AssignRule::InterfaceUpcast
            | AssignRule::SubrangeToBase
            | AssignRule::BaseToSubrange
            | AssignRule::EnumToInteger
            | AssignRule::PointerCompatible => 1,
            AssignRule::ImplicitConversion => 2,
            AssignRule::VariantBoxing | AssignRule::VariantUnboxing => 3,
        }
    }
}

impl TypeSystem {
    /// Primitive compatibility: equality, or `Integer` widening to `Float`.
    pub fn is_compatible(&self, from: TypeId, to: TypeId) -> bool {
        self.pool().equals(from, to)
            || (self.pool().underlying_kind(from) == TypeKind::Integer
                && self.pool().underlying_kind(to) == TypeKind::Float)
    }

    /// Find the rule admitting `from` into `to`, if any.
    pub fn assign_rule(&self, from: TypeId, to: TypeId) -> Option<AssignRule> {
        let pool = self.pool();

        if pool.equals(from, to) {
            return Some(AssignRule::Identical);
        }
        if self.is_compatible(from, to) {
            return Some(AssignRule::NumericWidening);
        }

        let from_kind = pool.underlying_kind(from);
        let to_kind = pool.underlying_kind(to);

        if (from_kind == TypeKind::Nil && to_kind.is_nullable())
            || (to_kind == TypeKind::Nil && from_kind.is_nullable())
        {
            return Some(AssignRule::Nil);
        }

        let source = pool.resolved(from);
        let target = pool.resolved(to);

        match (source, target) {
            (TypeData::Class(_), TypeData::Class(_)) if self.class_descends_from(from, to) => {
                return Some(AssignRule::ClassUpcast);
            }
            (TypeData::ClassOf(a), TypeData::ClassOf(b)) if self.class_descends_from(*a, *b) => {
                return Some(AssignRule::MetaclassUpcast);
            }
            (TypeData::Class(_), TypeData::ClassOf(base)) if self.class_descends_from(from, *base) => {
                return Some(AssignRule::ClassToMetaclass);
            }
            (TypeData::Class(class), TypeData::Interface(interface))
                if self.implements_interface(&class.name, &interface.name) =>
            {
                return Some(AssignRule::InterfaceImplementation);
            }
            (TypeData::Interface(a), TypeData::Interface(b))
                if self.interface_extends(&a.name, &b.name) =>
            {
                return Some(AssignRule::InterfaceUpcast);
            }
            (TypeData::Subrange(range), _) if pool.equals(range.base, to) => {
                return Some(AssignRule::SubrangeToBase);
            }
            (_, TypeData::Subrange(range)) if pool.equals(range.base, from) => {
                return Some(AssignRule::BaseToSubrange);
            }
            _ => {}
        }

        if to_kind == TypeKind::Variant {
            return Some(AssignRule::VariantBoxing);
        }
        if from_kind == TypeKind::Variant {
            return Some(AssignRule::VariantUnboxing);
        }
        if from_kind == TypeKind::Enum && to_kind == TypeKind::Integer {
            return Some(AssignRule::EnumToInteger);
        }

        if to_kind.is_pointer() {
            // Pointer targets never fall through to conversions.
            return match (pool.signature(from), pool.signature(to)) {
                (Some(a), Some(b)) if pool.signatures_equal(a, b) => {
                    Some(AssignRule::PointerCompatible)
                }
                _ => None,
            };
        }

        self.find_implicit_conversion(from, to)
            .then_some(AssignRule::ImplicitConversion)
    }

    /// Registered implicit conversion by declared name, then by underlying name.
    fn find_implicit_conversion(&self, from: TypeId, to: TypeId) -> bool {
        let conversions = self.conversions();
        if conversions.is_empty() {
            return false;
        }
        let pool = self.pool();
        let direct = conversions
            .find_implicit(&pool.display_name(from), &pool.display_name(to))
            .is_some();
        direct || {
            let (from_u, to_u) = (pool.underlying(from), pool.underlying(to));
            (from_u != from || to_u != to)
                && conversions
                    .find_implicit(&pool.display_name(from_u), &pool.display_name(to_u))
                    .is_some()
        }
    }

    /// Check whether a value of type `from` may be assigned to `to`.
    ///
    /// Used for assignments, parameter binding and return values.
    pub fn can_assign(&self, from: TypeId, to: TypeId) -> bool {
        self.assign_rule(from, to).is_some()
    }

    /// Like [`can_assign`](Self::can_assign), with a typed reason on failure.
    pub fn explain_assign(&self, from: TypeId, to: TypeId) -> Result<AssignRule, AssignError> {
        if let Some(rule) = self.assign_rule(from, to) {
            return Ok(rule);
        }

        let pool = self.pool();
        let from_name = pool.display_name(from);
        let to_name = pool.display_name(to);
        let error = match (pool.resolved(from), pool.resolved(to)) {
            (TypeData::Class(_), TypeData::Class(_)) => AssignError::ClassMismatch {
                from: from_name,
                to: to_name,
            },
            (TypeData::Class(_), TypeData::Interface(_)) => AssignError::InterfaceNotImplemented {
                class: from_name,
                interface: to_name,
            },
            (TypeData::Interface(_), TypeData::Interface(_)) => AssignError::InterfaceMismatch {
                from: from_name,
                to: to_name,
            },
            (_, TypeData::FunctionPointer(_) | TypeData::MethodPointer(_)) => {
                AssignError::SignatureMismatch {
                    from: from_name,
                    to: to_name,
                }
            }
            _ => AssignError::Incompatible {
                from: from_name,
                to: to_name,
            },
        };
        Err(error)
    }

    /// Check an assignment and report a rejection to `catalog`.
    pub fn check_assign(
        &self,
        from: TypeId,
        to: TypeId,
        position: Position,
        expr: &str,
        catalog: &mut dyn ErrorCatalog,
    ) -> bool {
        match self.explain_assign(from, to) {
            Ok(rule) => {
                tracing::trace!(?rule, %position, "assignment accepted");
                true
            }
            Err(error) => {
                catalog.report(position, expr, &error);
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
