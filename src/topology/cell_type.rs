//! Cell type metadata for mesh elements.

/// Element shapes handled by the converter.
///
/// Volume elements are read as [`CellType::Tetrahedron`]; the extracted skin
/// is written as [`CellType::Triangle`] shell elements.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CellType {
    /// 2D simplex (skin triangle).
    Triangle,
    /// 3D simplex (tet).
    #[default]
    Tetrahedron,
}

impl CellType {
    /// Number of corner nodes.
    pub fn node_count(self) -> usize {
        match self {
            CellType::Triangle => 3,
            CellType::Tetrahedron => 4,
        }
    }

    /// Maps an Abaqus/CalculiX `TYPE=` token onto a cell type.
    ///
    /// Only linear simplices are recognised; every other element family
    /// (hexahedra, wedges, second-order tets, beams) yields `None`.
    pub fn from_inp_type(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_uppercase();
        match token.as_str() {
            "C3D4" | "C3D4H" | "C3D4T" | "C3D4HT" | "DC3D4" => Some(CellType::Tetrahedron),
            "S3" | "S3R" | "M3D3" | "R3D3" | "STRI3" => Some(CellType::Triangle),
            _ => None,
        }
    }

    /// Radioss element keyword for this shape.
    pub fn radioss_keyword(self) -> &'static str {
        match self {
            CellType::Triangle => "SH3N",
            CellType::Tetrahedron => "TETRA4",
        }
    }
}
