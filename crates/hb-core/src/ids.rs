//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so merged batch output can be sorted by
//! plain tuple ordering, e.g. `(PathId, Generation, TechnologyId, u32)`.
//! The inner integer is `pub` because upstream extraction hands out raw
//! integers; callers should still prefer `.index()` when indexing `Vec`s.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identifier of a route as assigned by upstream route extraction.
    pub struct PathId(u32);
}

typed_id! {
    /// Geographic node identifier (network node or region centroid).
    pub struct NodeId(u32);
}

typed_id! {
    /// Vehicle technology (drivetrain) identifier, e.g. diesel or BEV.
    pub struct TechnologyId(u32);
}

typed_id! {
    /// Vehicle generation, expressed as its model year (e.g. 2030).
    pub struct Generation(u16);
}
