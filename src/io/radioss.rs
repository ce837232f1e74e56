//! OpenRadioss deck writer.
//!
//! Produces the starter deck (`*_0000.rad`: nodes, parts, elements, skins,
//! node groups and contact interfaces) and the engine deck (`*_0001.rad`:
//! run length and animation output). Fixed-width columns follow the Radioss
//! input format: ids in 10 characters, reals in 20.

use std::io::Write;

use crate::config::{ContactOptions, ContactSide, ConverterConfig, DeckOptions, SkinDeckOptions};
use crate::convert::Conversion;
use crate::io::DeckWriter;
use crate::mesh_error::{MeshSkinError, Result};
use crate::topology::cell_type::CellType;
use crate::topology::mesh::TetMesh;
use crate::topology::point::NodeId;

/// Starter format version written on the `/BEGIN` card.
const STARTER_VERSION: u32 = 2022;
/// `Tstop` written for interfaces active during the whole run.
const FOREVER: f64 = 1.0e30;
/// Node ids per `/GRNOD/NODE` data line.
const IDS_PER_LINE: usize = 10;

/// Scientific notation with a signed, at least two-digit exponent
/// (`1.5E-03`), as expected by fixed-format readers.
pub fn fortran_exp(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string().to_ascii_uppercase();
    }
    let formatted = format!("{value:.precision$E}");
    match formatted.split_once('E') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or_default();
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}E{sign}{:02}", exponent.unsigned_abs())
        }
        None => formatted,
    }
}

/// Writer for OpenRadioss starter and engine decks.
#[derive(Clone, Debug, Default)]
pub struct RadiossWriter {
    pub deck: DeckOptions,
    pub skin: SkinDeckOptions,
    pub contact: ContactOptions,
}

impl RadiossWriter {
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            deck: config.deck.clone(),
            skin: config.skin.clone(),
            contact: config.contact.clone(),
        }
    }

    fn skin_part_id(&self, part_id: u32) -> u32 {
        self.skin.part_offset.saturating_add(part_id)
    }

    /// Writes the starter deck.
    pub fn write_starter<W: Write>(
        &self,
        mut w: W,
        mesh: &TetMesh,
        conversion: &Conversion,
    ) -> Result<()> {
        self.write_header(&mut w)?;
        self.write_nodes(&mut w, mesh)?;
        for card in &self.deck.extra_cards {
            write_card(&mut w, card)?;
        }
        // Only parts present in the deck contribute their cards.
        for card in conversion.parts.iter().flat_map(|p| &p.role.cards) {
            write_card(&mut w, card)?;
        }

        // Parts whose skin produced at least one face.
        let skinned: Vec<_> = conversion
            .parts
            .iter()
            .filter(|p| p.role.skin)
            .filter_map(|p| Some((p, conversion.skins.get(p.name())?)))
            .collect();

        if !skinned.is_empty() {
            self.write_skin_property(&mut w)?;
        }
        for part in &conversion.parts {
            let title = if part.role.role.is_empty() {
                part.name().to_string()
            } else {
                format!("{}_{}", part.name(), part.role.role)
            };
            writeln!(w, "/PART/{}", part.part_id())?;
            writeln!(w, "{title}")?;
            writeln!(w, "#    Prop_ID     Mat_ID")?;
            writeln!(w, "{:10}{:10}", part.role.property_id, part.role.material_id)?;
        }
        for (part, _) in &skinned {
            writeln!(w, "/PART/{}", self.skin_part_id(part.part_id()))?;
            writeln!(w, "{}_Skin", part.name())?;
            writeln!(w, "#    Prop_ID     Mat_ID")?;
            writeln!(w, "{:10}{:10}", self.skin.property_id, part.role.material_id)?;
        }
        for (part, _) in &skinned {
            if let ContactSide::Master { surface_id } = part.role.contact {
                writeln!(w, "/SURF/PART/{surface_id}/0")?;
                writeln!(w, "{}_Skin_Surf", part.name())?;
                writeln!(w, "{:10}", self.skin_part_id(part.part_id()))?;
                writeln!(w)?;
            }
        }

        let tetra = CellType::Tetrahedron.radioss_keyword();
        for part in &conversion.parts {
            writeln!(w, "/{tetra}/{}", part.part_id())?;
            for &element in &part.elements {
                let nodes = mesh
                    .element(element)
                    .ok_or(MeshSkinError::UnknownElement { element })?;
                write!(w, "{element:10}")?;
                for node in nodes {
                    write!(w, "{node:10}")?;
                }
                writeln!(w)?;
            }
        }
        let shell = CellType::Triangle.radioss_keyword();
        for (part, skin) in &skinned {
            writeln!(w, "/{shell}/{}", self.skin_part_id(part.part_id()))?;
            for face in &skin.faces {
                let [a, b, c] = face.nodes;
                writeln!(w, "{:10}{a:10}{b:10}{c:10}", face.id)?;
            }
        }

        for part in &conversion.parts {
            if let Some(group) = part.role.node_group {
                let nodes = part.nodes(mesh)?;
                write_node_group(&mut w, group, &format!("{}_Nodes", part.name()), &nodes)?;
            }
        }
        for (part, skin) in &skinned {
            if let ContactSide::Slave { node_group_id } = part.role.contact {
                let title = format!("{}_Skin_Nodes", part.name());
                write_node_group(&mut w, node_group_id, &title, &skin.nodes)?;
            }
        }

        let mut interface = 0u32;
        for (master, _) in &skinned {
            let ContactSide::Master { surface_id } = master.role.contact else {
                continue;
            };
            for (slave, _) in &skinned {
                let ContactSide::Slave { node_group_id } = slave.role.contact else {
                    continue;
                };
                interface += 1;
                let title = format!("{}_{}_Contact", master.name(), slave.name());
                self.write_contact(&mut w, interface, &title, node_group_id, surface_id)?;
            }
        }

        writeln!(w, "/END")?;
        w.flush()?;
        Ok(())
    }

    /// Writes the engine deck.
    pub fn write_engine<W: Write>(&self, mut w: W) -> Result<()> {
        writeln!(w, "/RUN/{}/1", self.deck.run_name)?;
        writeln!(w, "{:25.10}", self.deck.end_time)?;
        writeln!(w, "/RFILE/{}", self.deck.restart_interval)?;
        writeln!(w, "/ANIM/DT")?;
        writeln!(
            w,
            "{:25.10}{:>20}",
            0.0,
            fortran_exp(self.deck.animation_interval, 5)
        )?;
        for anim in &self.deck.animations {
            writeln!(w, "/ANIM/{anim}")?;
        }
        writeln!(w, "/END")?;
        w.flush()?;
        Ok(())
    }

    fn write_header<W: Write>(&self, w: &mut W) -> Result<()> {
        writeln!(w, "#RADIOSS STARTER")?;
        writeln!(w, "/BEGIN")?;
        writeln!(w, "{}", self.deck.run_name)?;
        writeln!(w, "{STARTER_VERSION:10}{:10}", 0)?;
        let [mass, length, time] = &self.deck.units;
        // Input units, then working units.
        for _ in 0..2 {
            writeln!(w, "{mass:>20}{length:>20}{time:>20}")?;
        }
        writeln!(w, "/TITLE")?;
        writeln!(w, "{}", self.deck.title)?;
        Ok(())
    }

    fn write_nodes<W: Write>(&self, w: &mut W, mesh: &TetMesh) -> Result<()> {
        let scale = self.deck.coordinate_scale;
        writeln!(w, "/NODE")?;
        for (id, xyz) in mesh.nodes() {
            write!(w, "{id:10}")?;
            for x in xyz {
                write!(w, "{:>20}", fortran_exp(x * scale, 12))?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    fn write_skin_property<W: Write>(&self, w: &mut W) -> Result<()> {
        writeln!(w, "/PROP/SHELL/{}", self.skin.property_id)?;
        writeln!(w, "Skin_Property")?;
        writeln!(w, "#   Ishell    Ismstr      Ish3n    Idrill")?;
        writeln!(w, "{:10}{:10}{:10}{:10}", 1, 2, 2, 0)?;
        writeln!(w, "{}", format!("{:20.5}", 0.0).repeat(5))?;
        // N, Thick, Ashear, Ithick, Iplas, Ipos
        write!(w, "{:20.5}{:20.5}", 5.0, self.skin.thickness)?;
        writeln!(w, "{}", format!("{:20.5}", 0.0).repeat(4))?;
        writeln!(w, "{}", format!("{:20}", 0).repeat(5))?;
        Ok(())
    }

    fn write_contact<W: Write>(
        &self,
        w: &mut W,
        id: u32,
        title: &str,
        slave_group: u32,
        master_surface: u32,
    ) -> Result<()> {
        let c = &self.contact;
        writeln!(w, "/INTER/TYPE7/{id}")?;
        writeln!(w, "{title}")?;
        writeln!(
            w,
            "#   Slav_id    Mast_id       Istf       Ithe       Igap       Ibag       Idel      Icurv"
        )?;
        writeln!(
            w,
            "{slave_group:10}{master_surface:10}{:10}{:10}{:10}{:10}{:10}{:10}",
            c.stiffness_formulation, 0, c.gap_flag, 0, c.deletion_flag, 0
        )?;
        writeln!(
            w,
            "#               Fric            Gap_min            Gapmax            Tstart             Tstop"
        )?;
        writeln!(
            w,
            "{:20.5}{:20.5}{:20.5}{:20.5}{:>20}",
            c.friction,
            c.gap_min,
            c.gap_max,
            0.0,
            fortran_exp(FOREVER, 5)
        )?;
        writeln!(
            w,
            "#              Stfac            Fpenmax               I_BC             Iform"
        )?;
        writeln!(
            w,
            "{:20.3}{:20.5}{:10}{:10}",
            c.stiffness_factor, 0.0, 0, c.formulation
        )?;
        Ok(())
    }
}

fn write_card<W: Write>(w: &mut W, card: &str) -> Result<()> {
    if card.ends_with('\n') {
        write!(w, "{card}")?;
    } else {
        writeln!(w, "{card}")?;
    }
    Ok(())
}

fn write_node_group<'a, W, I>(w: &mut W, id: u32, title: &str, nodes: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a NodeId>,
{
    writeln!(w, "/GRNOD/NODE/{id}")?;
    writeln!(w, "{title}")?;
    let nodes: Vec<_> = nodes.into_iter().collect();
    for line in nodes.chunks(IDS_PER_LINE) {
        for node in line {
            write!(w, "{node:10}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

impl DeckWriter for RadiossWriter {
    fn write<W: Write>(&self, writer: W, mesh: &TetMesh, conversion: &Conversion) -> Result<()> {
        self.write_starter(writer, mesh, conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::convert;
    use crate::topology::point::ElementId;

    #[test]
    fn exponent_is_padded_and_signed() {
        assert_eq!(fortran_exp(0.001, 12), "1.000000000000E-03");
        assert_eq!(fortran_exp(0.0, 12), "0.000000000000E+00");
        assert_eq!(fortran_exp(-2.5e-10, 3), "-2.500E-10");
        assert_eq!(fortran_exp(1.0e30, 5), "1.00000E+30");
        assert_eq!(fortran_exp(1.0e123, 1), "1.0E+123");
        assert_eq!(fortran_exp(f64::INFINITY, 5), "INF");
    }

    fn unit_tet(group: &str) -> TetMesh {
        let mut mesh = TetMesh::new();
        let coords = [
            [0.0, 0.0, 0.0],
            [1000.0, 0.0, 0.0],
            [0.0, 1000.0, 0.0],
            [0.0, 0.0, 1000.0],
        ];
        for (i, xyz) in coords.into_iter().enumerate() {
            mesh.insert_node(NodeId::new(i as u64 + 1), xyz).unwrap();
        }
        let nodes = [1, 2, 3, 4].map(NodeId::new);
        mesh.insert_element(ElementId::new(1), nodes).unwrap();
        mesh.groups_mut().insert(group, ElementId::new(1));
        mesh
    }

    fn starter(mesh: &TetMesh) -> String {
        let config = ConverterConfig::default();
        let conversion = convert(mesh, &config).unwrap();
        let mut out = Vec::new();
        RadiossWriter::from_config(&config)
            .write(&mut out, mesh, &conversion)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn starter_for_a_single_punch() {
        let deck = starter(&unit_tet("Solid_part-1"));
        let lines: Vec<&str> = deck.lines().collect();
        assert_eq!(&lines[..4], ["#RADIOSS STARTER", "/BEGIN", "Punch_Die_Shearing", "      2022         0"]);
        assert!(lines.contains(&"         2  1.000000000000E+00  0.000000000000E+00  0.000000000000E+00"));
        assert!(deck.contains("/PART/1\nPunch_PUNCH\n#    Prop_ID     Mat_ID\n         1         1\n"));
        assert!(deck.contains("/PART/101\nPunch_Skin\n#    Prop_ID     Mat_ID\n       999         1\n"));
        assert!(deck.contains("/SURF/PART/300/0\nPunch_Skin_Surf\n       101\n\n"));
        assert!(deck.contains("/TETRA4/1\n         1         1         2         3         4\n"));
        assert!(deck.contains("/SH3N/101\n         2         1         3         2\n"));
        assert!(deck.contains("/GRNOD/NODE/100\nPunch_Nodes\n         1         2         3         4\n"));
        // No material skin, so no slave group and no interface.
        assert!(!deck.contains("/GRNOD/NODE/400"));
        assert!(!deck.contains("/INTER/"));
        assert!(deck.ends_with("/END\n"));
    }

    #[test]
    fn stripper_gets_no_skin() {
        let deck = starter(&unit_tet("Solid_part-Stripper"));
        assert!(deck.contains("/PART/4\nStripper_STRIPPER\n"));
        assert!(deck.contains("/GRNOD/NODE/300\nStripper_Nodes\n"));
        assert!(!deck.contains("/PROP/SHELL"));
        assert!(!deck.contains("/SH3N/"));
        assert!(!deck.contains("/SURF/"));
    }

    #[test]
    fn contact_pairs_need_both_skins() {
        let mut mesh = unit_tet("Solid_part-1");
        let offset = [0.0, 0.0, 2000.0];
        for i in 0..4u64 {
            let [x, y, z] = mesh.node(NodeId::new(i + 1)).unwrap();
            let xyz = [x + offset[0], y + offset[1], z + offset[2]];
            mesh.insert_node(NodeId::new(i + 11), xyz).unwrap();
        }
        let nodes = [11, 12, 13, 14].map(NodeId::new);
        mesh.insert_element(ElementId::new(2), nodes).unwrap();
        mesh.groups_mut().insert("Solid_part-Material", ElementId::new(2));

        let deck = starter(&mesh);
        assert!(deck.contains("/GRNOD/NODE/400\nMaterial_Skin_Nodes\n        11        12        13        14\n"));
        assert!(deck.contains(
            "/INTER/TYPE7/1\nPunch_Material_Contact\n\
             #   Slav_id    Mast_id       Istf       Ithe       Igap       Ibag       Idel      Icurv\n       \
             400       300         4         0         2         0         1         0\n"
        ));
        assert!(deck.contains(
            "             0.10000             0.00010             1.00000             0.00000         1.00000E+30\n"
        ));
        assert!(deck.contains("              20.000             0.00000         0         2\n"));
        assert!(!deck.contains("/INTER/TYPE7/2"));
        // Skin ids continue after the largest element id.
        assert!(deck.contains("/SH3N/102\n         7"));
    }

    #[test]
    fn part_cards_follow_resolved_parts() {
        let mut config = ConverterConfig::default();
        config.deck.extra_cards = vec!["/FUNCT/1\nRamp\n".into()];
        config.parts[0].cards = vec!["/IMPVEL/1\nPunch_Velocity".into()];
        config.parts[3].cards = vec!["/IMPVEL/5\nStripper_Velocity".into()];

        let mesh = unit_tet("Solid_part-1");
        let conversion = convert(&mesh, &config).unwrap();
        let mut out = Vec::new();
        RadiossWriter::from_config(&config)
            .write_starter(&mut out, &mesh, &conversion)
            .unwrap();
        let deck = String::from_utf8(out).unwrap();

        assert!(deck.contains("/FUNCT/1\nRamp\n/IMPVEL/1\nPunch_Velocity\n/PROP/SHELL/999\n"));
        assert!(!deck.contains("/IMPVEL/5"));
        assert!(!deck.contains("/GRNOD/NODE/300"));
    }

    #[test]
    fn node_groups_wrap_every_ten_ids() {
        let mut out = Vec::new();
        let nodes: Vec<NodeId> = (1..=10).map(NodeId::new).collect();
        write_node_group(&mut out, 7, "G", &nodes).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.ends_with("        10\n"));
    }

    #[test]
    fn engine_deck() {
        let mut out = Vec::new();
        RadiossWriter::default().write_engine(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(
            "/RUN/Punch_Die_Shearing/1\n             0.0007000000\n/RFILE/5000\n/ANIM/DT\n             0.0000000000         1.00000E-04\n"
        ));
        assert!(text.contains("/ANIM/ELEM/SIGZX\n/ANIM/VECT/DISP\n/ANIM/VECT/VEL\n/END\n"));
    }
}
