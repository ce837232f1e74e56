//! `NodeId` / `ElementId`: strong, zero-cost handles for mesh entities
//!
//! Input decks number nodes and elements independently, so the two id spaces
//! get distinct newtypes around `u64`. Mixing them up (passing a node id where
//! an element id is expected) is then a compile error rather than a silent
//! lookup miss.
//!
//! Zero is a legal id: some exporters emit a node 0, and whether it should
//! take part in skin extraction is a policy decision made by
//! [`BoundaryOptions`](crate::algs::boundary::BoundaryOptions), not by the id
//! type.

use std::fmt;

macro_rules! mesh_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw id.
            #[inline]
            pub const fn new(raw: u64) -> Self {
                $name(raw)
            }

            /// Returns the raw `u64` value.
            #[inline]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            #[inline]
            fn from(raw: u64) -> Self {
                $name(raw)
            }
        }

        /// Tuple-style debug output, e.g. `NodeId(7)`.
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints only the raw integer, honouring width and fill.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

mesh_id! {
    /// Identifier of a mesh node (vertex with coordinates).
    NodeId
}

mesh_id! {
    /// Identifier of a mesh element (volume tetrahedron or synthetic skin triangle).
    ElementId
}

impl ElementId {
    /// The id following `self`, or `None` on overflow.
    #[inline]
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(ElementId(raw)),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_a_valid_node_id() {
        let n = NodeId::new(0);
        assert_eq!(n.get(), 0);
    }

    #[test]
    fn debug_and_display() {
        assert_eq!(format!("{:?}", NodeId::new(7)), "NodeId(7)");
        assert_eq!(format!("{}", NodeId::new(7)), "7");
        assert_eq!(format!("{:?}", ElementId::new(10)), "ElementId(10)");
        assert_eq!(format!("{}", ElementId::new(10)), "10");
        assert_eq!(format!("{:6}", ElementId::new(10)), "    10");
    }

    #[test]
    fn ordering_and_hash() {
        let a = NodeId::new(1);
        let b = NodeId::new(2);
        assert!(a < b);
        let set: std::collections::HashSet<_> = [a, b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn checked_next_stops_at_max() {
        assert_eq!(ElementId::new(41).checked_next(), Some(ElementId::new(42)));
        assert_eq!(ElementId::new(u64::MAX).checked_next(), None);
    }
}


#[cfg(test)]
mod abi_tests {
    use super::*;
    use static_assertions::{assert_eq_align, assert_eq_size};

    assert_eq_size!(NodeId, u64);
    assert_eq_size!(ElementId, u64);
    assert_eq_align!(NodeId, u64);
}
