//! Structured tetrahedral box meshes.
//!
//! Each hexahedral cell of an `nx`×`ny`×`nz` grid is split into six
//! tetrahedra around its `v0`–`v6` diagonal (Kuhn subdivision). Neighbouring
//! cells then split their shared quad along the same diagonal, so the mesh
//! is conforming and every tetrahedron has positive volume.

use crate::mesh_error::{MeshSkinError, Result};
use crate::topology::mesh::TetMesh;
use crate::topology::point::{ElementId, NodeId};

/// Local hex corners of the six Kuhn tetrahedra, all positively oriented.
const KUHN_TETS: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
    [0, 5, 1, 6],
];

/// Numbering and grouping for generated meshes.
#[derive(Clone, Debug)]
pub struct MeshGenOptions {
    /// Id of the first generated node.
    pub first_node: u64,
    /// Id of the first generated element.
    pub first_element: u64,
    /// Element group receiving every generated tetrahedron.
    pub group: Option<String>,
}

impl Default for MeshGenOptions {
    fn default() -> Self {
        Self {
            first_node: 1,
            first_element: 1,
            group: None,
        }
    }
}

fn invalid_geometry(message: impl Into<String>) -> MeshSkinError {
    MeshSkinError::InvalidGeometry(message.into())
}

/// Adds a structured box over `[min, max]` with `nx`×`ny`×`nz` hex cells
/// (six tetrahedra each) to `mesh`.
pub fn add_structured_box(
    mesh: &mut TetMesh,
    divisions: [usize; 3],
    min: [f64; 3],
    max: [f64; 3],
    options: &MeshGenOptions,
) -> Result<()> {
    let [nx, ny, nz] = divisions;
    if nx == 0 || ny == 0 || nz == 0 {
        return Err(invalid_geometry("nx, ny, and nz must be positive"));
    }
    if (0..3).any(|d| !(max[d] > min[d])) {
        return Err(invalid_geometry("box max must exceed min on every axis"));
    }

    let dx = (max[0] - min[0]) / nx as f64;
    let dy = (max[1] - min[1]) / ny as f64;
    let dz = (max[2] - min[2]) / nz as f64;
    let row_stride = nx + 1;
    let slab_stride = row_stride * (ny + 1);
    let node = |idx: usize| NodeId::new(options.first_node + idx as u64);

    for k in 0..=nz {
        let z = min[2] + dz * k as f64;
        for j in 0..=ny {
            let y = min[1] + dy * j as f64;
            for i in 0..=nx {
                let x = min[0] + dx * i as f64;
                mesh.insert_node(node(k * slab_stride + j * row_stride + i), [x, y, z])?;
            }
        }
    }

    let mut next_element = options.first_element;
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let base = k * slab_stride + j * row_stride + i;
                let v0 = base;
                let v1 = base + 1;
                let v3 = base + row_stride;
                let v2 = v3 + 1;
                let v4 = base + slab_stride;
                let v5 = v4 + 1;
                let v7 = v4 + row_stride;
                let v6 = v7 + 1;
                let hex = [v0, v1, v2, v3, v4, v5, v6, v7];
                for local in KUHN_TETS {
                    let id = ElementId::new(next_element);
                    next_element += 1;
                    mesh.insert_element(id, local.map(|c| node(hex[c])))?;
                    if let Some(group) = &options.group {
                        mesh.groups_mut().insert(group, id);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Generates a structured tetrahedral box mesh.
pub fn structured_tet_box(
    divisions: [usize; 3],
    min: [f64; 3],
    max: [f64; 3],
    options: &MeshGenOptions,
) -> Result<TetMesh> {
    let mut mesh = TetMesh::new();
    add_structured_box(&mut mesh, divisions, min, max, options)?;
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vector::signed_volume;

    #[test]
    fn counts_and_groups() {
        let options = MeshGenOptions {
            group: Some("Block".into()),
            ..MeshGenOptions::default()
        };
        let mesh = structured_tet_box([2, 1, 3], [0.0; 3], [2.0, 1.0, 3.0], &options).unwrap();
        assert_eq!(mesh.num_nodes(), 3 * 2 * 4);
        assert_eq!(mesh.num_elements(), 6 * 2 * 1 * 3);
        assert_eq!(mesh.groups().get("Block").map(<[_]>::len), Some(36));
    }

    #[test]
    fn every_tet_has_positive_volume() {
        let mesh =
            structured_tet_box([2, 2, 2], [0.0; 3], [1.0, 2.0, 0.5], &MeshGenOptions::default())
                .unwrap();
        let mut total = 0.0;
        for (_, nodes) in mesh.elements() {
            let p = nodes.map(|n| mesh.node(n).unwrap());
            let v = signed_volume(p[0], p[1], p[2], p[3]);
            assert!(v > 0.0);
            total += v;
        }
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_empty_boxes() {
        let options = MeshGenOptions::default();
        assert!(structured_tet_box([0, 1, 1], [0.0; 3], [1.0; 3], &options).is_err());
        assert!(structured_tet_box([1, 1, 1], [0.0; 3], [1.0, 0.0, 1.0], &options).is_err());
    }
}
