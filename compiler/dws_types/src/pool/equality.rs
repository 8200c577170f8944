//! Type equality.
//!
//! Named types (class, record, interface, enum) compare nominally by
//! case-insensitive name. Arrays, subranges, pointer types and metaclasses
//! compare structurally. Aliases are transparent on both sides.

use dws_ir::same_ident;

use crate::{SignatureType, TypeData, TypeId, TypePool};

impl TypePool {
    /// Structural/nominal equality of two types.
    pub fn equals(&self, a: TypeId, b: TypeId) -> bool {
        let a = self.underlying(a);
        let b = self.underlying(b);
        if a == b {
            return true;
        }

        match (self.get(a), self.get(b)) {
            (TypeData::Class(x), TypeData::Class(y)) => same_ident(&x.name, &y.name),
            (TypeData::Record(x), TypeData::Record(y)) => same_ident(&x.name, &y.name),
            (TypeData::Interface(x), TypeData::Interface(y)) => same_ident(&x.name, &y.name),
            (TypeData::Enum(x), TypeData::Enum(y)) => same_ident(&x.name, &y.name),
            (TypeData::Array(x), TypeData::Array(y)) => {
                x.bounds == y.bounds && self.equals(x.element, y.element)
            }
            (TypeData::Subrange(x), TypeData::Subrange(y)) => {
                x.low == y.low && x.high == y.high && self.equals(x.base, y.base)
            }
            (TypeData::FunctionPointer(x), TypeData::FunctionPointer(y))
            | (TypeData::MethodPointer(x), TypeData::MethodPointer(y)) => {
                self.signatures_equal(x, y)
            }
            (TypeData::ClassOf(x), TypeData::ClassOf(y)) => self.equals(*x, *y),
            (x, y) => x.kind().is_primitive() && x.kind() == y.kind(),
        }
    }

    /// Same arity, pairwise-equal parameters, and equal results.
    ///
    /// A procedure never equals a function.
    pub fn signatures_equal(&self, a: &SignatureType, b: &SignatureType) -> bool {
        a.params.len() == b.params.len()
            && a
                .params
                .iter()
                .zip(&b.params)
                .all(|(&p, &q)| self.equals(p, q))
            && match (a.ret, b.ret) {
                (None, None) => true,
                (Some(r), Some(s)) => self.equals(r, s),
                _ => false,
            }
    }
}
