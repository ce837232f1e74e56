//! Outward winding of boundary faces.
//!
//! A boundary face belongs to exactly one tetrahedron, so the element's
//! fourth corner tells which side of the face is solid. With `(p1, p2, p3)`
//! the face and `q` the opposite corner:
//!
//! ```text
//! n = (p2 - p1) x (p3 - p1)
//! d = n . (q - p1)
//! ```
//!
//! `d > 0` means `n` points into the element, so the winding is flipped to
//! `(p1, p3, p2)`; otherwise `(p1, p2, p3)` is kept. The result is the same
//! whatever vertex order the face arrives in.

use crate::algs::faces::TetFace;
use crate::geometry::vector::{EPS, cross, dot, norm, sub};
use crate::mesh_error::{MeshSkinError, Result};
use crate::topology::mesh::TetMesh;
use crate::topology::point::NodeId;

/// Outward winding of `face` from explicit coordinates.
///
/// `points` are the coordinates of `face.nodes` in the same order and
/// `opposite` those of `face.opposite`.
///
/// Returns [`MeshSkinError::DegenerateFace`] when the face has collinear or
/// coincident corners, or when the owning element is flat so the opposite
/// corner does not pick a side.
pub fn resolve_winding(
    face: &TetFace,
    points: [[f64; 3]; 3],
    opposite: [f64; 3],
) -> Result<[NodeId; 3]> {
    let [p1, p2, p3] = points;
    let e1 = sub(p2, p1);
    let e2 = sub(p3, p1);
    let normal = cross(e1, e2);
    let n_len = norm(normal);

    let degenerate = || MeshSkinError::DegenerateFace {
        face: face.key,
        element: face.element,
    };

    // NaN compares false, so non-finite input also lands here.
    if !(n_len > EPS * norm(e1) * norm(e2)) {
        return Err(degenerate());
    }

    let to_opposite = sub(opposite, p1);
    let d = dot(normal, to_opposite);
    if !(d.abs() > EPS * n_len * norm(to_opposite)) {
        return Err(degenerate());
    }

    let [a, b, c] = face.nodes;
    Ok(if d > 0.0 { [a, c, b] } else { [a, b, c] })
}

/// Outward winding of `face`, looking coordinates up in `mesh`.
pub fn orient_face(face: &TetFace, mesh: &TetMesh) -> Result<[NodeId; 3]> {
    let coords = |node: NodeId| {
        mesh.node(node).ok_or(MeshSkinError::MissingNode {
            node,
            element: face.element,
        })
    };
    let [a, b, c] = face.nodes;
    let points = [coords(a)?, coords(b)?, coords(c)?];
    let opposite = coords(face.opposite)?;
    resolve_winding(face, points, opposite)
}
