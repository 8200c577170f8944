//! Engine configuration.
//!
//! Every analysis unit builds its own [`TypeSystem`](crate::TypeSystem) from an
//! `EngineConfig`, so identifier spaces are never shared between units.

/// First identifier of each RTTI category.
///
/// The bases are spaced far enough apart that categories never collide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RttiConfig {
    pub class_base: u32,
    pub record_base: u32,
    pub enum_base: u32,
}

impl RttiConfig {
    pub const DEFAULT_CLASS_BASE: u32 = 1000;
    pub const DEFAULT_RECORD_BASE: u32 = 200_000;
    pub const DEFAULT_ENUM_BASE: u32 = 300_000;
}

impl Default for RttiConfig {
    fn default() -> Self {
        RttiConfig {
            class_base: Self::DEFAULT_CLASS_BASE,
            record_base: Self::DEFAULT_RECORD_BASE,
            enum_base: Self::DEFAULT_ENUM_BASE,
        }
    }
}

/// Configuration for a [`TypeSystem`](crate::TypeSystem).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub rtti: RttiConfig,
    /// Maximum number of hops when searching for a chained implicit conversion.
    pub conversion_depth: usize,
    /// Seed the built-in types on construction.
    pub register_builtins: bool,
}

impl EngineConfig {
    pub const DEFAULT_CONVERSION_DEPTH: usize = 3;

    #[must_use]
    pub fn with_rtti(mut self, rtti: RttiConfig) -> Self {
        self.rtti = rtti;
        self
    }

    #[must_use]
    pub fn with_conversion_depth(mut self, depth: usize) -> Self {
        self.conversion_depth = depth;
        self
    }

    #[must_use]
    pub fn without_builtins(mut self) -> Self {
        self.register_builtins = false;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            rtti: RttiConfig::default(),
            conversion_depth: Self::DEFAULT_CONVERSION_DEPTH,
            register_builtins: true,
        }
    }
}
