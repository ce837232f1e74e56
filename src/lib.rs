#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-skin
//!
//! mesh-skin extracts oriented boundary surfaces ("skins") from tetrahedral
//! finite-element meshes. For every named region it finds the triangles on
//! the region's outer boundary, winds each one so its right-hand normal
//! points out of the solid, and numbers the triangles as synthetic shell
//! elements that can define contact surfaces in an explicit solver.
//!
//! ## Features
//! - Face canonicalisation and boundary classification by face occurrence
//!   counting, with non-manifold faces reported rather than guessed at
//! - Outward winding from the owning tetrahedron's opposite vertex
//! - Gap-free synthetic element numbering threaded through an explicit
//!   [`SkinIdCursor`](algs::skin::SkinIdCursor)
//! - Abaqus/CalculiX `.inp` reading and OpenRadioss starter/engine writing
//! - Declarative part roles (which groups form a part, which skins are
//!   contact masters or slaves) loaded from JSON
//!
//! ## Determinism
//!
//! Skin faces follow element order within a region and region order across
//! regions, so the same input always yields the same ids. With the `rayon`
//! feature regions are processed in parallel, but ids are still assigned in
//! one sequential pass afterwards.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! mesh-skin = "0.3"
//! # Optional features:
//! # features = ["rayon"]
//! ```
//!
//! ```
//! use mesh_skin::prelude::*;
//!
//! let mut mesh = TetMesh::new();
//! for (id, xyz) in [
//!     (1, [0.0, 0.0, 0.0]),
//!     (2, [1.0, 0.0, 0.0]),
//!     (3, [0.0, 1.0, 0.0]),
//!     (4, [0.0, 0.0, 1.0]),
//! ] {
//!     mesh.insert_node(NodeId::new(id), xyz)?;
//! }
//! let nodes = [1, 2, 3, 4].map(NodeId::new);
//! mesh.insert_element(ElementId::new(1000), nodes)?;
//!
//! let elements = [ElementId::new(1000)];
//! let skins = extract_skins(
//!     &mesh,
//!     [("Block", &elements[..])],
//!     &BoundaryOptions::default(),
//!     SkinIdCursor::for_mesh(&mesh),
//! )?;
//! let block = skins.get("Block").unwrap();
//! assert_eq!(block.len(), 4);
//! assert_eq!(block.faces[0].id, ElementId::new(1001));
//! # Ok::<(), MeshSkinError>(())
//! ```

pub mod algs;
pub mod config;
pub mod convert;
pub mod geometry;
pub mod io;
pub mod mesh_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::boundary::{
        BoundaryClassification, BoundaryOptions, NonManifoldHandling, classify_boundary_faces,
    };
    pub use crate::algs::faces::{FaceKey, TetFace, tet_faces};
    pub use crate::algs::orientation::{orient_face, resolve_winding};
    pub use crate::algs::parts::{Part, resolve_parts};
    pub use crate::algs::skin::{
        RegionSkin, SkinFace, SkinIdCursor, SkinSet, assemble_skin, extract_region_faces,
        extract_skins,
    };
    pub use crate::config::{ContactSide, ConverterConfig, PartRole};
    pub use crate::convert::{Conversion, convert};
    pub use crate::io::{DeckWriter, MeshReader};
    pub use crate::mesh_error::MeshSkinError;
    pub use crate::topology::groups::ElementGroups;
    pub use crate::topology::mesh::TetMesh;
    pub use crate::topology::point::{ElementId, NodeId};
}
