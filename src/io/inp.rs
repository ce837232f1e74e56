//! Abaqus / CalculiX `.inp` reader.
//!
//! # Supported keywords
//! - `*NODE`: `id, x, y, z` data lines. `*NODE FILE`, `*NODE PRINT` and
//!   `*NODE OUTPUT` are output requests and are ignored.
//! - `*ELEMENT, TYPE=..., ELSET=...`: 4-node tetrahedra (`C3D4` family, or
//!   no `TYPE` at all). Blocks of other element types are skipped with a
//!   warning. `ELSET=` adds every element of the block to that group.
//! - `*ELSET, ELSET=name[, GENERATE]`: element ids, names of earlier element
//!   sets, or `start, end[, step]` ranges.
//!
//! Keywords and parameter names are case-insensitive; parameter values keep
//! their case. Every other keyword block is skipped.

use std::io::Read;

use crate::io::MeshReader;
use crate::mesh_error::{MeshSkinError, Result};
use crate::topology::cell_type::CellType;
use crate::topology::mesh::TetMesh;
use crate::topology::point::{ElementId, NodeId};

/// Upper bound on the ids one `*ELSET, GENERATE` line may expand to.
const MAX_GENERATED_IDS: u64 = 50_000_000;

/// Options for [`InpReader`].
#[derive(Debug, Default, Clone)]
pub struct InpReadOptions {
    /// Check that elements only reference defined nodes and groups only
    /// reference defined elements.
    pub validate_references: bool,
}

/// `.inp` deck reader.
#[derive(Debug, Default, Clone)]
pub struct InpReader {
    pub options: InpReadOptions,
}

/// Data block opened by the last keyword line.
#[derive(Debug)]
enum Block {
    Nodes,
    Elements { elset: Option<String> },
    Elset { name: String, generate: bool },
    Ignored,
}

/// A parsed keyword line.
#[derive(Debug)]
struct Keyword<'a> {
    name: String,
    params: Vec<(String, Option<&'a str>)>,
}

impl<'a> Keyword<'a> {
    fn parse(line: &'a str) -> Self {
        let body = line.trim_start_matches('*');
        let mut tokens = body.split(',');
        let name = tokens
            .next()
            .unwrap_or_default()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        let params = tokens
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| match t.split_once('=') {
                Some((k, v)) => (k.trim().to_ascii_uppercase(), Some(v.trim())),
                None => (t.to_ascii_uppercase(), None),
            })
            .collect();
        Keyword { name, params }
    }

    fn param(&self, key: &str) -> Option<&'a str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| *v)
    }

    fn flag(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| k == key)
    }
}

fn parse_error(line: usize, message: impl std::fmt::Display) -> MeshSkinError {
    MeshSkinError::MeshIoParse(format!("line {line}: {message}"))
}

fn data_fields(line: &str) -> Vec<&str> {
    line.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn parse_id(line: usize, raw: &str, what: &str) -> Result<u64> {
    raw.parse::<u64>()
        .map_err(|_| parse_error(line, format!("invalid {what} id `{raw}`")))
}

fn parse_coord(line: usize, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| parse_error(line, format!("invalid coordinate `{raw}`")))
}

impl InpReader {
    pub fn new(options: InpReadOptions) -> Self {
        Self { options }
    }

    fn open_block(line: usize, keyword: &Keyword<'_>, mesh: &mut TetMesh) -> Result<Block> {
        Ok(match keyword.name.as_str() {
            "NODE" => Block::Nodes,
            "ELEMENT" => {
                let ty = keyword.param("TYPE");
                let cell = ty.map_or(Some(CellType::Tetrahedron), CellType::from_inp_type);
                if cell != Some(CellType::Tetrahedron) {
                    log::warn!(
                        "line {line}: skipping *ELEMENT block of unsupported type {}",
                        ty.unwrap_or_default()
                    );
                    return Ok(Block::Ignored);
                }
                let elset = keyword.param("ELSET").map(str::to_string);
                if let Some(name) = &elset {
                    mesh.groups_mut().ensure_group(name);
                }
                Block::Elements { elset }
            }
            "ELSET" => {
                let name = keyword
                    .param("ELSET")
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| parse_error(line, "*ELSET without ELSET= name"))?;
                mesh.groups_mut().ensure_group(name);
                Block::Elset {
                    name: name.to_string(),
                    generate: keyword.flag("GENERATE"),
                }
            }
            _ => Block::Ignored,
        })
    }

    fn read_node(line: usize, fields: &[&str], mesh: &mut TetMesh) -> Result<()> {
        if fields.len() < 4 {
            return Err(parse_error(line, "node line needs `id, x, y, z`"));
        }
        let id = NodeId::new(parse_id(line, fields[0], "node")?);
        let xyz = [
            parse_coord(line, fields[1])?,
            parse_coord(line, fields[2])?,
            parse_coord(line, fields[3])?,
        ];
        mesh.insert_node(id, xyz)
    }

    fn read_element(
        line: usize,
        fields: &[&str],
        elset: Option<&str>,
        mesh: &mut TetMesh,
    ) -> Result<()> {
        let corners = CellType::Tetrahedron.node_count();
        if fields.len() != corners + 1 {
            return Err(parse_error(
                line,
                format!(
                    "tetrahedron line needs an id and {corners} node ids, found {} fields",
                    fields.len()
                ),
            ));
        }
        let id = ElementId::new(parse_id(line, fields[0], "element")?);
        let mut nodes = [NodeId::new(0); 4];
        for (slot, raw) in nodes.iter_mut().zip(&fields[1..]) {
            *slot = NodeId::new(parse_id(line, raw, "node")?);
        }
        mesh.insert_element(id, nodes)?;
        if let Some(name) = elset {
            mesh.groups_mut().insert(name, id);
        }
        Ok(())
    }

    fn read_elset(
        line: usize,
        fields: &[&str],
        name: &str,
        generate: bool,
        mesh: &mut TetMesh,
    ) -> Result<()> {
        if generate {
            let range = fields
                .iter()
                .map(|raw| parse_id(line, raw, "element"))
                .collect::<Result<Vec<_>>>()?;
            let (start, end, step) = match range.as_slice() {
                [start, end] => (*start, *end, 1),
                [start, end, step] => (*start, *end, *step),
                _ => return Err(parse_error(line, "GENERATE line needs `start, end[, step]`")),
            };
            if step == 0 || start > end {
                return Err(parse_error(
                    line,
                    format!("invalid GENERATE range {start}..{end} step {step}"),
                ));
            }
            if (end - start) / step >= MAX_GENERATED_IDS {
                return Err(parse_error(
                    line,
                    format!(
                        "GENERATE range {start}..{end} step {step} expands to more than {MAX_GENERATED_IDS} ids"
                    ),
                ));
            }
            let step = usize::try_from(step)
                .map_err(|_| parse_error(line, format!("GENERATE step {step} is too large")))?;
            let ids = (start..=end).step_by(step).map(ElementId::new);
            mesh.groups_mut().extend(name, ids);
            return Ok(());
        }

        let mut members = Vec::new();
        for raw in fields {
            match raw.parse::<u64>() {
                Ok(id) => members.push(ElementId::new(id)),
                Err(_) => {
                    let nested = mesh
                        .groups()
                        .get(raw)
                        .ok_or_else(|| parse_error(line, format!("unknown element set `{raw}`")))?;
                    members.extend_from_slice(nested);
                }
            }
        }
        mesh.groups_mut().extend(name, members);
        Ok(())
    }
}

impl MeshReader for InpReader {
    fn read<R: Read>(&self, mut reader: R) -> Result<TetMesh> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        let mut mesh = TetMesh::new();
        let mut block = Block::Ignored;
        for (idx, raw) in contents.lines().enumerate() {
            let line = idx + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with("**") {
                continue;
            }
            if text.starts_with('*') {
                block = Self::open_block(line, &Keyword::parse(text), &mut mesh)?;
                continue;
            }
            let fields = data_fields(text);
            match &block {
                Block::Nodes => Self::read_node(line, &fields, &mut mesh)?,
                Block::Elements { elset } => {
                    Self::read_element(line, &fields, elset.as_deref(), &mut mesh)?
                }
                Block::Elset { name, generate } => {
                    Self::read_elset(line, &fields, name, *generate, &mut mesh)?
                }
                Block::Ignored => {}
            }
        }

        if self.options.validate_references {
            mesh.validate_references()?;
        }
        log::info!(
            "read {} nodes, {} tetrahedra, {} element groups",
            mesh.num_nodes(),
            mesh.num_elements(),
            mesh.groups().len()
        );
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(deck: &str) -> Result<TetMesh> {
        InpReader::default().read(deck.as_bytes())
    }

    fn ids(mesh: &TetMesh, group: &str) -> Vec<u64> {
        mesh.groups()
            .get(group)
            .unwrap_or_default()
            .iter()
            .map(|e| e.get())
            .collect()
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let mesh = read(
            "*Heading\n\
             ** comment\n\
             *node, nset=All\n\
             1, 0., 0., 0.\n\
             2, 1., 0., 0.\n\
             3, 0., 1., 0.\n\
             4, 0., 0., 1.,\n\
             *Element, type=c3d4, elset=Solid_part-Die\n\
             7, 1, 2, 3, 4\n",
        )
        .unwrap();
        assert_eq!(mesh.num_nodes(), 4);
        assert_eq!(mesh.node(NodeId::new(4)), Some([0.0, 0.0, 1.0]));
        assert_eq!(ids(&mesh, "Solid_part-Die"), vec![7]);
    }

    #[test]
    fn node_output_requests_are_not_node_blocks() {
        let mesh = read("*NODE FILE\nU, RF\n*NODE PRINT\n1, 2, 3, 4\n").unwrap();
        assert_eq!(mesh.num_nodes(), 0);
    }

    #[test]
    fn other_element_types_are_skipped() {
        let mesh = read(
            "*ELEMENT, TYPE=S3, ELSET=Shells\n\
             1, 1, 2, 3\n\
             *ELEMENT, ELSET=Tets\n\
             2, 1, 2, 3, 4\n",
        )
        .unwrap();
        assert_eq!(mesh.num_elements(), 1);
        assert!(!mesh.groups().contains("Shells"));
        assert_eq!(ids(&mesh, "Tets"), vec![2]);
    }

    #[test]
    fn empty_element_block_registers_its_group() {
        let mesh = read("*ELEMENT, TYPE=C3D4, ELSET=Empty\n*END STEP\n").unwrap();
        assert!(mesh.groups().contains("Empty"));
        assert!(mesh.groups().get("Empty").unwrap().is_empty());
    }

    #[test]
    fn elset_generate_and_references() {
        let mesh = read(
            "*ELSET, ELSET=A, GENERATE\n\
             1, 9, 4\n\
             *ELSET, ELSET=B\n\
             20, 21,\n\
             A\n",
        )
        .unwrap();
        assert_eq!(ids(&mesh, "A"), vec![1, 5, 9]);
        assert_eq!(ids(&mesh, "B"), vec![20, 21, 1, 5, 9]);
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = read("*NODE\n1, 0, 0, 0\n2, 0, x, 0\n").unwrap_err();
        assert!(
            matches!(&err, MeshSkinError::MeshIoParse(msg) if msg.starts_with("line 3:")),
            "{err}"
        );

        let err = read("*ELEMENT, TYPE=C3D4\n1, 1, 2, 3\n").unwrap_err();
        assert!(matches!(&err, MeshSkinError::MeshIoParse(msg) if msg.starts_with("line 2:")));
        let err = read("*ELEMENT, TYPE=C3D4\n1, 1, 2, 3, 4, 5\n").unwrap_err();
        assert!(
            matches!(&err, MeshSkinError::MeshIoParse(msg) if msg.contains("4 node ids, found 6 fields")),
            "{err}"
        );

        let err = read("*ELSET, ELSET=B\nMissing\n").unwrap_err();
        assert!(matches!(&err, MeshSkinError::MeshIoParse(msg) if msg.contains("Missing")));

        assert!(read("*ELSET, ELSET=C, GENERATE\n5, 1\n").is_err());
    }

    #[test]
    fn generate_range_is_bounded() {
        let err = read("*ELSET, ELSET=All, GENERATE\n1, 18446744073709551615\n").unwrap_err();
        assert!(
            matches!(&err, MeshSkinError::MeshIoParse(msg) if msg.starts_with("line 2:")),
            "{err}"
        );
        let err = read("*ELSET, ELSET=All, GENERATE\n0, 18446744073709551615, 1\n").unwrap_err();
        assert!(matches!(err, MeshSkinError::MeshIoParse(_)));

        // A wide range with a matching stride is fine.
        let mesh = read("*ELSET, ELSET=Sparse, GENERATE\n1, 18446744073709551615, 9223372036854775807\n")
            .unwrap();
        assert_eq!(ids(&mesh, "Sparse"), vec![1, 9223372036854775808, 18446744073709551615]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = read("*NODE\n1, 0, 0, 0\n1, 1, 1, 1\n").unwrap_err();
        assert!(matches!(err, MeshSkinError::DuplicateNode(id) if id.get() == 1));
    }

    #[test]
    fn reference_validation_is_optional() {
        let deck = "*ELEMENT, ELSET=E\n1, 1, 2, 3, 4\n";
        assert!(read(deck).is_ok());
        let strict = InpReader::new(InpReadOptions {
            validate_references: true,
        });
        let err = strict.read(deck.as_bytes()).unwrap_err();
        assert!(matches!(err, MeshSkinError::MissingNode { .. }));
    }
}
