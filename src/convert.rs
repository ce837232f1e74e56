//! Conversion pipeline: parts, then skins.

use crate::algs::parts::{Part, resolve_parts};
use crate::algs::skin::{SkinIdCursor, SkinSet, extract_skins};
use crate::config::ConverterConfig;
use crate::mesh_error::Result;
use crate::topology::mesh::TetMesh;

/// Everything a deck writer needs besides the mesh.
#[derive(Clone, Debug)]
pub struct Conversion {
    /// Resolved parts in configuration order.
    pub parts: Vec<Part>,
    /// Skins of the parts with `skin` enabled, keyed by part name.
    pub skins: SkinSet,
}

impl Conversion {
    /// The part called `name`.
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name() == name)
    }
}

/// Resolves parts and extracts their skins.
///
/// Skin element ids start one past the largest element id of `mesh` and
/// follow part order.
pub fn convert(mesh: &TetMesh, config: &ConverterConfig) -> Result<Conversion> {
    let parts = resolve_parts(mesh.groups(), config);
    let regions = parts
        .iter()
        .filter(|p| p.role.skin)
        .map(|p| (p.name(), p.elements.as_slice()));
    let skins = extract_skins(
        mesh,
        regions,
        &config.boundary,
        SkinIdCursor::for_mesh(mesh),
    )?;

    for skin in &skins.skins {
        if let Some((first, last)) = skin.id_range() {
            log::info!(
                "{} skin: {} faces (ids {first}..={last}), {} nodes",
                skin.name,
                skin.len(),
                skin.nodes.len()
            );
        }
    }
    log::info!(
        "converted {} parts, {} skin faces",
        parts.len(),
        skins.num_faces()
    );
    Ok(Conversion { parts, skins })
}
