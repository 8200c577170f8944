//! Visibility levels for members and types.

use std::fmt;

/// Visibility of a class, record or interface member.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    /// Visible only inside the declaring type.
    Private,
    /// Visible inside the declaring type and its descendants.
    Protected,
    /// Visible everywhere.
    #[default]
    Public,
    /// Visible everywhere and exposed to RTTI.
    Published,
}

impl Visibility {
    /// Check whether a member with this visibility is reachable from a
    /// descendant class.
    #[inline]
    pub fn inherited(self) -> bool {
        self >= Visibility::Protected
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
            Visibility::Published => "published",
        })
    }
}

/// Visibility of a type declaration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeVisibility {
    /// Visible only in the declaring scope.
    Private,
    /// Visible across the declaring unit.
    Unit,
    /// Exported from the declaring unit.
    #[default]
    Public,
}
