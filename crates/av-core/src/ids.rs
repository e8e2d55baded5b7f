//! Strongly typed, zero-cost identifier wrappers.
//!
//! Grid cells are stored row-major in a dense `Vec`, so a cell's identity is
//! simply its index `y * cols + x`.  Wrapping it keeps cell indices from
//! being confused with dataset indices, which are plain `usize`.

use std::fmt;

/// Wrap a `u32` index in a distinct id type.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
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
    };
}

typed_id! {
    /// Row-major index of a cell in a [`Grid`][crate::Grid] or
    /// [`PathGrid`][crate::PathGrid].
    pub struct CellId;
}

typed_id! {
    /// Disjoint-set label carried by maze generators that merge regions
    /// (Eller's, Kruskal's).  `SetId(0)` is reserved for "not yet labelled".
    pub struct SetId;
}

impl SetId {
    pub const UNLABELLED: SetId = SetId(0);
}
