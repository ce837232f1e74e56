//! Mesh I/O: deck readers and solver deck writers.
//!
//! This module provides trait-based readers that load a [`TetMesh`] with its
//! element groups, and writers that serialise a mesh together with the
//! result of a [`convert`](crate::convert::convert) run.

pub mod inp;
pub mod radioss;

use std::io::{Read, Write};

use crate::convert::Conversion;
use crate::mesh_error::Result;
use crate::topology::mesh::TetMesh;

/// Trait for readers that produce a tetrahedral mesh.
pub trait MeshReader {
    /// Parse a mesh from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<TetMesh>;
}

/// Trait for writers that serialise a mesh and its converted parts/skins.
pub trait DeckWriter {
    /// Write the deck to a writer.
    fn write<W: Write>(&self, writer: W, mesh: &TetMesh, conversion: &Conversion) -> Result<()>;
}
