//! Type formatting for diagnostics.

#![allow(clippy::format_push_string)] // Diagnostic formatting favours clarity over allocation

use crate::{SignatureType, TypeData, TypeId, TypePool};

impl TypePool {
    /// Format a type as it would be written in source.
    pub fn display_name(&self, id: TypeId) -> String {
        let mut buf = String::new();
        self.display_into(id, &mut buf);
        buf
    }

    /// Format a type into an existing buffer.
    pub fn display_into(&self, id: TypeId, buf: &mut String) {
        match self.get(id) {
            TypeData::Integer => buf.push_str("Integer"),
            TypeData::Float => buf.push_str("Float"),
            TypeData::String => buf.push_str("String"),
            TypeData::Boolean => buf.push_str("Boolean"),
            TypeData::Nil => buf.push_str("Nil"),
            TypeData::Void => buf.push_str("Void"),
            TypeData::Variant => buf.push_str("Variant"),
            TypeData::Class(c) => buf.push_str(&c.name),
            TypeData::Record(r) => buf.push_str(&r.name),
            TypeData::Interface(i) => buf.push_str(&i.name),
            TypeData::Enum(e) => buf.push_str(&e.name),
            TypeData::Alias(a) => buf.push_str(&a.name),
            TypeData::Subrange(s) => {
                if s.name.is_empty() {
                    buf.push_str(&format!("{}..{}", s.low, s.high));
                } else {
                    buf.push_str(&s.name);
                }
            }
            TypeData::Array(a) => {
                match a.bounds {
                    Some((low, high)) => buf.push_str(&format!("array[{low}..{high}] of ")),
                    None => buf.push_str("array of "),
                }
                self.display_into(a.element, buf);
            }
            TypeData::FunctionPointer(sig) => self.display_signature(sig, buf),
            TypeData::MethodPointer(sig) => {
                self.display_signature(sig, buf);
                buf.push_str(" of object");
            }
            TypeData::ClassOf(class) => {
                buf.push_str("class of ");
                self.display_into(*class, buf);
            }
        }
    }

    fn display_signature(&self, sig: &SignatureType, buf: &mut String) {
        buf.push_str(if sig.is_procedure() {
            "procedure"
        } else {
            "function"
        });
        buf.push('(');
        for (i, &param) in sig.params.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            self.display_into(param, buf);
        }
        buf.push(')');
        if let Some(ret) = sig.ret {
            buf.push_str(": ");
            self.display_into(ret, buf);
        }
    }
}
