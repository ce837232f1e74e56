//! Tetrahedron face decomposition.
//!
//! Each tetrahedron contributes four triangular faces. A face is identified
//! by its [`FaceKey`] (node ids sorted ascending, so both tetrahedra sharing
//! a face produce the same key) and carries a raw vertex order that is wound
//! outward for a positive-volume element.

use std::fmt;

use crate::topology::point::{ElementId, NodeId};

/// Local corner indices of the four faces of a tetrahedron `(n0, n1, n2, n3)`.
///
/// Faces are listed opposite `n3`, `n2`, `n1`, `n0`; each triple is wound so
/// that its right-hand normal points away from the opposite corner when the
/// element has positive volume.
pub const TET_FACES: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

/// Local index of the corner opposite each entry of [`TET_FACES`].
pub const TET_FACE_OPPOSITE: [usize; 4] = [3, 2, 1, 0];

/// Orientation-independent identity of a triangular face.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceKey([NodeId; 3]);

impl FaceKey {
    /// Builds the key of the triangle `(a, b, c)` in any vertex order.
    pub fn new(a: NodeId, b: NodeId, c: NodeId) -> Self {
        let mut nodes = [a, b, c];
        nodes.sort_unstable();
        FaceKey(nodes)
    }

    /// Node ids in ascending order.
    #[inline]
    pub fn nodes(&self) -> [NodeId; 3] {
        self.0
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.0.contains(&node)
    }
}

impl From<[NodeId; 3]> for FaceKey {
    fn from([a, b, c]: [NodeId; 3]) -> Self {
        FaceKey::new(a, b, c)
    }
}

impl fmt::Debug for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "FaceKey({a}, {b}, {c})")
    }
}

impl fmt::Display for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{{{a}, {b}, {c}}}")
    }
}

/// One face of one tetrahedron.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TetFace {
    /// Canonical identity used for counting.
    pub key: FaceKey,
    /// Vertex order taken from the element's reference order.
    pub nodes: [NodeId; 3],
    /// The element's fourth corner, not on this face.
    pub opposite: NodeId,
    /// Element the face was taken from.
    pub element: ElementId,
}

/// Decomposes a tetrahedron into its four faces.
pub fn tet_faces(element: ElementId, nodes: &[NodeId; 4]) -> [TetFace; 4] {
    std::array::from_fn(|f| {
        let [i, j, k] = TET_FACES[f];
        let tri = [nodes[i], nodes[j], nodes[k]];
        TetFace {
            key: FaceKey::from(tri),
            nodes: tri,
            opposite: nodes[TET_FACE_OPPOSITE[f]],
            element,
        }
    })
}
