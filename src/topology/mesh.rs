//! In-memory tetrahedral mesh snapshot.
//!
//! [`TetMesh`] holds node coordinates, tetrahedral connectivity and named
//! element groups exactly as read from an input deck. Readers build it once;
//! every algorithm afterwards takes `&TetMesh`, so skin extraction never
//! mutates the mesh it works on.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::mesh_error::{MeshSkinError, Result};
use crate::topology::groups::ElementGroups;
use crate::topology::point::{ElementId, NodeId};

/// Nodes, tetrahedra and element groups of one model.
#[derive(Clone, Debug, Default)]
pub struct TetMesh {
    nodes: BTreeMap<NodeId, [f64; 3]>,
    elements: BTreeMap<ElementId, [NodeId; 4]>,
    groups: ElementGroups,
}

impl TetMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. Ids must be unique.
    pub fn insert_node(&mut self, id: NodeId, coords: [f64; 3]) -> Result<()> {
        match self.nodes.entry(id) {
            Entry::Occupied(_) => Err(MeshSkinError::DuplicateNode(id)),
            Entry::Vacant(slot) => {
                slot.insert(coords);
                Ok(())
            }
        }
    }

    /// Adds a tetrahedron with nodes in reference order. Ids must be unique.
    ///
    /// Connectivity is stored as given; repeated node ids are reported when a
    /// region containing the element is classified.
    pub fn insert_element(&mut self, id: ElementId, nodes: [NodeId; 4]) -> Result<()> {
        match self.elements.entry(id) {
            Entry::Occupied(_) => Err(MeshSkinError::DuplicateElement(id)),
            Entry::Vacant(slot) => {
                slot.insert(nodes);
                Ok(())
            }
        }
    }

    /// Coordinates of `id`, if defined.
    pub fn node(&self, id: NodeId) -> Option<[f64; 3]> {
        self.nodes.get(&id).copied()
    }

    /// Connectivity of `id`, if defined.
    pub fn element(&self, id: ElementId) -> Option<&[NodeId; 4]> {
        self.elements.get(&id)
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, [f64; 3])> + '_ {
        self.nodes.iter().map(|(&id, &xyz)| (id, xyz))
    }

    /// Elements in ascending id order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &[NodeId; 4])> + '_ {
        self.elements.iter().map(|(&id, nodes)| (id, nodes))
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Largest element id in the mesh, `None` when there are no elements.
    pub fn max_element_id(&self) -> Option<ElementId> {
        self.elements.keys().next_back().copied()
    }

    pub fn groups(&self) -> &ElementGroups {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut ElementGroups {
        &mut self.groups
    }

    /// Checks that every element references defined nodes and every group
    /// references defined elements.
    pub fn validate_references(&self) -> Result<()> {
        for (&element, nodes) in &self.elements {
            if let Some(&node) = nodes.iter().find(|n| !self.nodes.contains_key(*n)) {
                return Err(MeshSkinError::MissingNode { node, element });
            }
        }
        for (_, members) in self.groups.iter() {
            if let Some(&element) = members.iter().find(|e| !self.elements.contains_key(*e)) {
                return Err(MeshSkinError::UnknownElement { element });
            }
        }
        Ok(())
    }
}
