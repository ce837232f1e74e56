//! Skin assembly: oriented boundary triangles per region.
//!
//! Extraction runs in two stages. Each region is classified and oriented on
//! its own ([`extract_region_faces`]); the per-region face lists are then
//! numbered in one sequential pass ([`assemble_skin`]) that hands out
//! synthetic element ids from a [`SkinIdCursor`]. The cursor is an ordinary
//! value passed in and returned, so the first stage can run on any number of
//! threads without changing the numbering.
//!
//! Numbering contract: ids start one past the largest element id of the
//! mesh and increase by one per face, in region order and then in face
//! discovery order, with no gaps and no restart between regions.

use std::collections::BTreeSet;

use crate::algs::boundary::{BoundaryOptions, classify_boundary_faces};
use crate::algs::orientation::orient_face;
use crate::mesh_error::{MeshSkinError, Result};
use crate::topology::mesh::TetMesh;
use crate::topology::point::{ElementId, NodeId};

/// Next synthetic element id to hand out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SkinIdCursor {
    next: ElementId,
    exhausted: bool,
}

impl SkinIdCursor {
    /// Cursor starting at `first`.
    pub const fn starting_at(first: ElementId) -> Self {
        Self {
            next: first,
            exhausted: false,
        }
    }

    /// Cursor starting one past `max` (at 1 when there is no element yet).
    pub fn after(max: Option<ElementId>) -> Self {
        match max {
            None => Self::starting_at(ElementId::new(1)),
            Some(max) => match max.checked_next() {
                Some(first) => Self::starting_at(first),
                None => Self {
                    next: max,
                    exhausted: true,
                },
            },
        }
    }

    /// Cursor starting one past the largest element id of `mesh`.
    pub fn for_mesh(mesh: &TetMesh) -> Self {
        Self::after(mesh.max_element_id())
    }

    /// The id the next allocation will return.
    pub fn peek(&self) -> Option<ElementId> {
        (!self.exhausted).then_some(self.next)
    }

    /// Takes one id and returns it with the advanced cursor.
    pub fn allocate(self) -> Result<(ElementId, Self)> {
        if self.exhausted {
            return Err(MeshSkinError::SkinIdOverflow { last: self.next });
        }
        let advanced = match self.next.checked_next() {
            Some(next) => Self {
                next,
                exhausted: false,
            },
            None => Self {
                next: self.next,
                exhausted: true,
            },
        };
        Ok((self.next, advanced))
    }
}

/// One synthetic skin triangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SkinFace {
    pub id: ElementId,
    /// Outward-wound corner nodes.
    pub nodes: [NodeId; 3],
}

/// The assembled skin of one region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionSkin {
    pub name: String,
    /// Triangles in numbering order.
    pub faces: Vec<SkinFace>,
    /// Distinct nodes referenced by `faces`.
    pub nodes: BTreeSet<NodeId>,
}

impl RegionSkin {
    /// First and last synthetic id of the region.
    pub fn id_range(&self) -> Option<(ElementId, ElementId)> {
        Some((self.faces.first()?.id, self.faces.last()?.id))
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// All assembled skins plus the cursor left after the last region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkinSet {
    /// Skins of regions that produced faces, in region order.
    pub skins: Vec<RegionSkin>,
    pub next_id: SkinIdCursor,
}

impl SkinSet {
    /// Skin of the region called `name`, if it produced any face.
    pub fn get(&self, name: &str) -> Option<&RegionSkin> {
        self.skins.iter().find(|skin| skin.name == name)
    }

    /// Total number of skin triangles.
    pub fn num_faces(&self) -> usize {
        self.skins.iter().map(RegionSkin::len).sum()
    }
}

/// Boundary faces of `elements`, wound outward, in discovery order.
pub fn extract_region_faces(
    mesh: &TetMesh,
    elements: &[ElementId],
    options: &BoundaryOptions,
) -> Result<Vec<[NodeId; 3]>> {
    let classification = classify_boundary_faces(mesh, elements, options)?;
    classification
        .boundary
        .iter()
        .map(|face| orient_face(face, mesh))
        .collect()
}

/// Numbers the oriented `faces` of one region.
///
/// An empty face list yields no skin and leaves the cursor untouched.
pub fn assemble_skin(
    name: &str,
    faces: Vec<[NodeId; 3]>,
    cursor: SkinIdCursor,
) -> Result<(Option<RegionSkin>, SkinIdCursor)> {
    if faces.is_empty() {
        return Ok((None, cursor));
    }
    let mut cursor = cursor;
    let mut skin_faces = Vec::with_capacity(faces.len());
    let mut nodes = BTreeSet::new();
    for tri in faces {
        let (id, next) = cursor.allocate()?;
        cursor = next;
        nodes.extend(tri);
        skin_faces.push(SkinFace { id, nodes: tri });
    }
    let skin = RegionSkin {
        name: name.to_string(),
        faces: skin_faces,
        nodes,
    };
    Ok((Some(skin), cursor))
}

/// Extracts and numbers the skins of several regions.
///
/// `regions` yields `(name, elements)` pairs; their order fixes the id
/// numbering. Regions without boundary faces are skipped. With the `rayon`
/// feature the per-region work runs in parallel; the result (including
/// which error is reported when several regions fail) is identical to the
/// serial run.
pub fn extract_skins<'a, I>(
    mesh: &TetMesh,
    regions: I,
    options: &BoundaryOptions,
    cursor: SkinIdCursor,
) -> Result<SkinSet>
where
    I: IntoIterator<Item = (&'a str, &'a [ElementId])>,
{
    let regions: Vec<(&str, &[ElementId])> = regions.into_iter().collect();
    let per_region = oriented_faces_per_region(mesh, &regions, options);

    let mut cursor = cursor;
    let mut skins = Vec::new();
    for ((name, _), faces) in regions.iter().zip(per_region) {
        let (skin, next) = assemble_skin(name, faces?, cursor)?;
        cursor = next;
        match skin {
            Some(skin) => {
                log::debug!(
                    "region `{name}`: {} skin faces over {} nodes",
                    skin.len(),
                    skin.nodes.len()
                );
                skins.push(skin);
            }
            None => log::debug!("region `{name}`: no boundary faces, skin skipped"),
        }
    }
    Ok(SkinSet {
        skins,
        next_id: cursor,
    })
}

#[cfg(not(feature = "rayon"))]
fn oriented_faces_per_region(
    mesh: &TetMesh,
    regions: &[(&str, &[ElementId])],
    options: &BoundaryOptions,
) -> Vec<Result<Vec<[NodeId; 3]>>> {
    regions
        .iter()
        .map(|(_, elements)| extract_region_faces(mesh, elements, options))
        .collect()
}

#[cfg(feature = "rayon")]
fn oriented_faces_per_region(
    mesh: &TetMesh,
    regions: &[(&str, &[ElementId])],
    options: &BoundaryOptions,
) -> Vec<Result<Vec<[NodeId; 3]>>> {
    use rayon::prelude::*;

    regions
        .par_iter()
        .map(|(_, elements)| extract_region_faces(mesh, elements, options))
        .collect()
}
