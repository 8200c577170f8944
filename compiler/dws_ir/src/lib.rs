//! DWS IR - shared leaf types for the DWS type engine.
//!
//! This crate contains the data structures every other engine crate agrees on:
//! - `Position` for declaration sites
//! - `IdentKey` / `IdentMap` for case-insensitive identifiers
//! - `Visibility` for members and types
//!
//! # Design Philosophy
//!
//! - **Case-insensitive, case-preserving**: identifiers compare by a folded key
//!   but always remember the spelling they were declared with.
//! - **Deterministic iteration**: identifier maps are ordered by key so that
//!   enumeration passes (validation, diagnostics) are reproducible.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod ident;
mod position;
mod visibility;

pub use ident::{same_ident, IdentKey, IdentMap, IdentSet};
pub use position::Position;
pub use visibility::{TypeVisibility, Visibility};

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Position, Visibility};
    crate::static_assert_size!(Position, 12);
    crate::static_assert_size!(Visibility, 1);
}
