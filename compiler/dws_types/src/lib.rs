//! Type registries and assignment compatibility for DWS.
//!
//! This crate answers the questions the semantic analyzer and the interpreter
//! ask about declared types:
//! - which type a name refers to (`TypeRegistry`)
//! - how classes relate (`ClassRegistry`)
//! - which overload a call or operator binds to (`FunctionRegistry`,
//!   `OperatorRegistry`, `TypeSystem::resolve_call`)
//! - whether a value may be assigned to a location (`TypeSystem::can_assign`)
//! - which RTTI identifier a class, record or enum carries (`RttiRegistry`)
//!
//! # Phases
//!
//! A [`TypeSystem`] is built per analysis unit. Declarations are collected
//! first (`declare_*`, `register*`); [`TypeSystem::seal`] then freezes class
//! shapes and everything after is a read-only query. Nothing here is shared
//! between units, and nothing is thread-safe for mutation.

mod compat;
mod config;
mod data;
mod decl;
mod error;
mod flags;
mod id;
mod kind;
mod pool;
mod registry;
mod report;
mod resolve;
mod system;

pub use compat::AssignRule;
pub use config::{EngineConfig, RttiConfig};
pub use data::{
    AliasType, ArrayType, ClassType, EnumType, FieldInfo, InterfaceType, MethodInfo, ParamTypes,
    PropertyAccess, PropertyInfo, RecordType, SignatureType, SubrangeType, TypeData,
};
pub use decl::{FunctionDecl, Param, ParamMode};
pub use error::{AssignError, OutOfRange, OverloadError, RegistryError};
pub use flags::{ClassFlags, MemberFlags};
pub use id::TypeId;
pub use kind::TypeKind;
pub use pool::TypePool;
pub use registry::{
    signature_key, ClassEntry, ClassLike, ClassRef, ClassRegistry, ConversionEntry,
    ConversionRegistry, FunctionEntry, FunctionMetadata, FunctionRegistry, HelperRegistry,
    HelperType, OperandTypes, OperatorEntry, OperatorRegistry, RttiCategory, RttiRegistry,
    TypeDescriptor, TypeRegistry,
};
pub use report::{Diagnostic, ErrorCatalog};
pub use system::{TypeSystem, ROOT_INTERFACE};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=dws_types=debug`
/// or `RUST_LOG=dws_types=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

// Handles are copied everywhere; keep them small.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{TypeId, TypeKind};
    dws_ir::static_assert_size!(TypeId, 4);
    dws_ir::static_assert_size!(TypeKind, 1);
}
