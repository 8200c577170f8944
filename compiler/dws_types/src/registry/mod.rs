//! Name-keyed registries populated during declaration collection.
//!
//! The pool stores type shapes; registries store what the program declared
//! under which name, plus the indices needed to answer hierarchy, overload
//! and conversion queries.
//!
//! # Architecture
//!
//! ```text
//! TypePool (types as TypeId)
//!     └── TypeRegistry       (every named type)
//!     └── ClassRegistry      (class hierarchy by parent name)
//!     └── FunctionRegistry   (overload sets, unit-qualified names)
//!     └── OperatorRegistry   (operator overloads by exact signature)
//!     └── ConversionRegistry (implicit/explicit conversion edges)
//!     └── HelperRegistry     (helper extensions per type)
//!     └── RttiRegistry       (RTTI identifiers per category)
//! ```
//!
//! # Duplicate Policy
//!
//! Type, operator, conversion and helper registration reject duplicates.
//! Class registration overwrites; function registration appends an overload.

mod classes;
mod conversions;
mod functions;
mod helpers;
mod operators;
mod rtti;
mod types;

pub use classes::{ClassEntry, ClassLike, ClassRef, ClassRegistry};
pub use conversions::{ConversionEntry, ConversionRegistry};
pub use functions::{FunctionEntry, FunctionMetadata, FunctionRegistry};
pub use helpers::{HelperRegistry, HelperType};
pub use operators::{signature_key, OperandTypes, OperatorEntry, OperatorRegistry};
pub use rtti::{RttiCategory, RttiRegistry};
pub use types::{TypeDescriptor, TypeRegistry};
