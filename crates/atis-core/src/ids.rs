//! Strongly typed identifiers.
//!
//! `NodeId` and `EdgeId` index the network's per-node and per-edge arrays;
//! `ActorId` indexes the simulator's actor list and is assigned in creation
//! order.  All are `Copy + Ord + Hash`.

use std::fmt;

/// Generate a typed ID wrapper around a `u32` that displays as `<tag><n>`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
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
                write!(f, concat!($tag, "{}"), self.0)
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
    /// A simulated commuter.
    pub struct ActorId(u32) => "actor#";
}

typed_id! {
    /// A road-network node.
    pub struct NodeId(u32) => "n";
}

typed_id! {
    /// A directed road-network edge.
    pub struct EdgeId(u32) => "e";
}
