#![allow(dead_code)]
use mesh_skin::{
    algs::skin::RegionSkin,
    geometry::vector::enclosed_volume,
    topology::mesh::TetMesh,
    topology::point::{ElementId, NodeId},
};

pub fn n(u: u64) -> NodeId {
    NodeId::new(u)
}

pub fn e(u: u64) -> ElementId {
    ElementId::new(u)
}

/// Build a mesh from `(id, xyz)` nodes and `(id, [n0, n1, n2, n3])` tets.
pub fn mesh_from(nodes: &[(u64, [f64; 3])], tets: &[(u64, [u64; 4])]) -> TetMesh {
    let mut mesh = TetMesh::new();
    for &(id, xyz) in nodes {
        mesh.insert_node(n(id), xyz).unwrap();
    }
    for &(id, conn) in tets {
        mesh.insert_element(e(id), conn.map(n)).unwrap();
    }
    mesh
}

/// Unit corner tet: nodes 1..4 at the origin and the unit axes, element 10.
pub fn unit_tet() -> TetMesh {
    mesh_from(
        &[
            (1, [0.0, 0.0, 0.0]),
            (2, [1.0, 0.0, 0.0]),
            (3, [0.0, 1.0, 0.0]),
            (4, [0.0, 0.0, 1.0]),
        ],
        &[(10, [1, 2, 3, 4])],
    )
}

/// Coordinates of a triangle's corners.
pub fn corners(mesh: &TetMesh, tri: [NodeId; 3]) -> [[f64; 3]; 3] {
    tri.map(|id| mesh.node(id).unwrap())
}

/// Volume enclosed by a skin, positive when it is wound outward.
pub fn skin_volume(mesh: &TetMesh, skin: &RegionSkin) -> f64 {
    enclosed_volume(skin.faces.iter().map(|f| corners(mesh, f.nodes)))
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Clone + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
