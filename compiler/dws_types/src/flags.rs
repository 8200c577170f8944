//! Declaration flags for classes and their members.
//!
//! Flags are recorded once during declaration collection and never
//! recomputed; queries against them are O(1).

use bitflags::bitflags;

bitflags! {
    /// Dispatch and binding modifiers on a method.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MemberFlags: u8 {
        /// Declared `virtual`; may be overridden.
        const VIRTUAL = 1 << 0;
        /// Declared `override`; replaces an inherited virtual method.
        const OVERRIDE = 1 << 1;
        /// Declared `abstract`; no body in this class.
        const ABSTRACT = 1 << 2;
        /// Declared `class`; bound to the metaclass, not an instance.
        const CLASS_METHOD = 1 << 3;
        /// Declared `reintroduce`; hides an inherited method on purpose.
        const REINTRODUCE = 1 << 4;
    }
}

impl MemberFlags {
    /// Check if calls to this member dispatch through the virtual table.
    #[inline]
    pub const fn is_dynamic(self) -> bool {
        self.intersects(Self::VIRTUAL.union(Self::OVERRIDE).union(Self::ABSTRACT))
    }
}

bitflags! {
    /// Declaration-level markers on a class.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassFlags: u8 {
        /// Forward declaration; the body has not been seen yet.
        const FORWARD = 1 << 0;
        /// Implemented by the host (`external`).
        const EXTERNAL = 1 << 1;
        /// Declared `abstract`; cannot be instantiated.
        const ABSTRACT = 1 << 2;
        /// Declared `sealed`; cannot be inherited from.
        const SEALED = 1 << 3;
        /// Declared `partial`; may be completed by later declarations.
        const PARTIAL = 1 << 4;
    }
}
