//! MeshSkinError: Unified error type for mesh-skin public APIs
//!
//! Every fallible operation in the crate (deck parsing, skin extraction,
//! configuration loading and deck writing) reports through this type. Variants
//! carry the element ids and face keys needed to locate the offending input.

use itertools::Itertools;
use thiserror::Error;

use crate::algs::faces::FaceKey;
use crate::topology::point::{ElementId, NodeId};

/// Unified error type for mesh-skin operations.
#[derive(Debug, Error)]
pub enum MeshSkinError {
    /// A tetrahedron references the same node more than once.
    #[error("malformed element {element}: node ids {} are not distinct", fmt_nodes(.nodes))]
    MalformedElement {
        element: ElementId,
        nodes: [NodeId; 4],
    },
    /// A boundary face has no usable normal, so its winding is undefined.
    #[error("degenerate face {face} of element {element}: orientation is undefined")]
    DegenerateFace { face: FaceKey, element: ElementId },
    /// A face key is shared by more than two elements of one region.
    #[error("non-manifold face {face}: shared by elements {}", fmt_elements(.elements))]
    NonManifoldFace {
        face: FaceKey,
        elements: Vec<ElementId>,
    },
    /// A region lists an element id that the mesh does not define.
    #[error("unknown element {element}")]
    UnknownElement { element: ElementId },
    /// An element references a node without coordinates.
    #[error("element {element} references missing node {node}")]
    MissingNode { node: NodeId, element: ElementId },
    /// A node id was defined twice.
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),
    /// An element id was defined twice.
    #[error("duplicate element id {0}")]
    DuplicateElement(ElementId),
    /// The synthetic skin element id range ran past `u64::MAX`.
    #[error("synthetic skin element ids exhausted after {last}")]
    SkinIdOverflow { last: ElementId },
    /// Invalid geometric input (e.g. an empty generator box).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Syntax or content error while reading a mesh deck.
    #[error("mesh I/O parse error: {0}")]
    MeshIoParse(String),
    /// Invalid converter configuration.
    #[error("configuration error: {0}")]
    Config(String),
    /// Underlying reader/writer failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results carrying [`MeshSkinError`].
pub type Result<T> = std::result::Result<T, MeshSkinError>;

fn fmt_nodes(nodes: &[NodeId]) -> String {
    format!("({})", nodes.iter().join(", "))
}

fn fmt_elements(elements: &[ElementId]) -> String {
    elements.iter().join(", ")
}

impl From<serde_json::Error> for MeshSkinError {
    fn from(err: serde_json::Error) -> Self {
        MeshSkinError::Config(err.to_string())
    }
}
