//! Boundary face classification.
//!
//! These helpers classify the triangular faces of a set of tetrahedra as
//! boundary or interior based on how many elements of the set contain them:
//! a face seen once lies on the surface of the set, a face seen twice is
//! shared by two neighbours. Anything seen more often means the set is not a
//! manifold solid and is reported instead of being guessed at.
//!
//! Adjacency is purely combinatorial: two elements sharing three node ids
//! are treated as neighbours without checking their geometry.

use std::collections::{BTreeSet, HashSet};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use serde::{Deserialize, Serialize};

use crate::algs::faces::{FaceKey, TetFace, tet_faces};
use crate::mesh_error::{MeshSkinError, Result};
use crate::topology::mesh::TetMesh;
use crate::topology::point::{ElementId, NodeId};

/// Behavior for faces shared by more than two elements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonManifoldHandling {
    /// Log a warning and keep the face out of the boundary.
    Warn,
    /// Return [`MeshSkinError::NonManifoldFace`].
    #[default]
    Error,
}

/// Options for boundary classification.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryOptions {
    /// Boundary faces touching any of these nodes are dropped.
    ///
    /// Empty by default. Some decks reserve node 0 for a non-physical
    /// reference point; list it here to keep it out of the skin.
    pub excluded_nodes: BTreeSet<NodeId>,
    /// How to handle non-manifold faces.
    pub non_manifold: NonManifoldHandling,
}

impl BoundaryOptions {
    /// Options that drop boundary faces touching any of `nodes`.
    pub fn excluding_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        Self {
            excluded_nodes: nodes.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Returns true when `key` may appear in a skin.
    pub fn admits(&self, key: &FaceKey) -> bool {
        !key.nodes().iter().any(|n| self.excluded_nodes.contains(n))
    }
}

/// Occurrences of one face key.
#[derive(Clone, Debug)]
pub struct FaceRecord {
    /// The face as first recorded.
    pub face: TetFace,
    /// Every element containing the face, in recording order.
    pub owners: Vec<ElementId>,
}

impl FaceRecord {
    #[inline]
    pub fn count(&self) -> usize {
        self.owners.len()
    }
}

/// Face key occurrence counts over a set of elements.
///
/// Records keep the order in which keys were first seen.
#[derive(Clone, Debug, Default)]
pub struct FaceCensus {
    index: HashMap<FaceKey, usize>,
    records: Vec<FaceRecord>,
}

impl FaceCensus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `face`.
    pub fn record(&mut self, face: TetFace) {
        match self.index.entry(face.key) {
            Entry::Occupied(slot) => self.records[*slot.get()].owners.push(face.element),
            Entry::Vacant(slot) => {
                slot.insert(self.records.len());
                self.records.push(FaceRecord {
                    face,
                    owners: vec![face.element],
                });
            }
        }
    }

    /// Counts the four faces of a tetrahedron, rejecting repeated node ids.
    pub fn record_element(&mut self, element: ElementId, nodes: &[NodeId; 4]) -> Result<()> {
        let distinct: HashSet<NodeId> = nodes.iter().copied().collect();
        if distinct.len() != 4 {
            return Err(MeshSkinError::MalformedElement {
                element,
                nodes: *nodes,
            });
        }
        for face in tet_faces(element, nodes) {
            self.record(face);
        }
        Ok(())
    }

    /// Occurrence count of `key` (0 when never seen).
    pub fn count(&self, key: &FaceKey) -> usize {
        self.index
            .get(key)
            .map_or(0, |&slot| self.records[slot].count())
    }

    /// Number of distinct face keys.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &FaceRecord> + '_ {
        self.records.iter()
    }
}

/// Classified boundary/interior faces of an element set.
#[derive(Clone, Debug, Default)]
pub struct BoundaryClassification {
    /// Faces seen exactly once, in first-seen order.
    pub boundary: Vec<TetFace>,
    /// Keys of faces shared by two elements.
    pub interior: Vec<FaceKey>,
    /// Keys seen more than twice, with all owning elements. Only populated
    /// under [`NonManifoldHandling::Warn`].
    pub non_manifold: Vec<(FaceKey, Vec<ElementId>)>,
    /// Boundary faces dropped by [`BoundaryOptions::excluded_nodes`].
    pub excluded: usize,
}

/// Count faces over `elements` of `mesh`.
///
/// Repeated element ids are counted once.
pub fn face_census(mesh: &TetMesh, elements: &[ElementId]) -> Result<FaceCensus> {
    let mut census = FaceCensus::new();
    let mut seen = HashSet::with_capacity(elements.len());
    for &element in elements {
        if !seen.insert(element) {
            continue;
        }
        let nodes = mesh
            .element(element)
            .ok_or(MeshSkinError::UnknownElement { element })?;
        census.record_element(element, nodes)?;
    }
    Ok(census)
}

/// Split a face census into boundary and interior faces.
pub fn classify_census(
    census: &FaceCensus,
    options: &BoundaryOptions,
) -> Result<BoundaryClassification> {
    let mut out = BoundaryClassification::default();
    for record in census.iter() {
        match record.count() {
            1 => {
                if options.admits(&record.face.key) {
                    out.boundary.push(record.face);
                } else {
                    out.excluded += 1;
                }
            }
            2 => out.interior.push(record.face.key),
            count => {
                let err = MeshSkinError::NonManifoldFace {
                    face: record.face.key,
                    elements: record.owners.clone(),
                };
                match options.non_manifold {
                    NonManifoldHandling::Warn => {
                        log::warn!("{err} ({count} incident elements); face skipped");
                        out.non_manifold
                            .push((record.face.key, record.owners.clone()));
                    }
                    NonManifoldHandling::Error => return Err(err),
                }
            }
        }
    }
    Ok(out)
}

/// Classify the faces of `elements` as boundary or interior.
///
/// Faces contained in exactly **one** element of the set are boundary faces;
/// faces contained in **two** are interior. The returned boundary faces keep
/// the order in which they were first met while walking `elements`.
pub fn classify_boundary_faces(
    mesh: &TetMesh,
    elements: &[ElementId],
    options: &BoundaryOptions,
) -> Result<BoundaryClassification> {
    let census = face_census(mesh, elements)?;
    let classification = classify_census(&census, options)?;
    log::debug!(
        "classified {} faces of {} elements: boundary={} interior={} excluded={}",
        census.len(),
        elements.len(),
        classification.boundary.len(),
        classification.interior.len(),
        classification.excluded
    );
    Ok(classification)
}
