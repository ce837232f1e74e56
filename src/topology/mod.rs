//! Top-level module for mesh topology.
//!
//! This module provides the types describing a tetrahedral mesh snapshot:
//! - Node and element identifiers
//! - Cell type metadata
//! - Named element groups (regions)
//! - The [`TetMesh`](mesh::TetMesh) container tying them to coordinates

pub mod cell_type;
pub mod groups;
pub mod mesh;
pub mod point;

pub use mesh::TetMesh;
pub use point::{ElementId, NodeId};
