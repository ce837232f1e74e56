//! Converter configuration.
//!
//! Maps element group names onto physical parts and decides which parts get
//! a skin, which skins act as contact master surfaces and which provide the
//! slave nodes. Everything the deck writer needs beyond the mesh itself
//! lives here too, so a different press setup only needs a different JSON
//! file.
//!
//! # Example
//!
//! ```
//! use mesh_skin::config::ConverterConfig;
//!
//! let config = ConverterConfig::from_json_str(r#"{
//!     "parts": [
//!         { "role": "TOOL", "name": "Tool", "part_id": 1, "patterns": ["Tool*"] }
//!     ]
//! }"#)?;
//! assert_eq!(config.parts[0].material_id, 1);
//! assert!(config.parts[0].skin);
//! # Ok::<(), mesh_skin::mesh_error::MeshSkinError>(())
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algs::boundary::BoundaryOptions;
use crate::mesh_error::{MeshSkinError, Result};

/// Contact side played by a part's skin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "side")]
pub enum ContactSide {
    /// No contact interface.
    #[default]
    None,
    /// The skin is a master surface with the given surface id.
    Master { surface_id: u32 },
    /// The skin's nodes form the slave node group with the given id.
    Slave { node_group_id: u32 },
}

/// One logical part and the element groups that make it up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartRole {
    /// Role tag written next to the part name (e.g. `PUNCH`).
    pub role: String,
    /// Part title.
    pub name: String,
    pub part_id: u32,
    pub material_id: u32,
    pub property_id: u32,
    /// Accepted element group names; `*` matches any run of characters.
    pub patterns: Vec<String>,
    /// Whether to extract a skin for this part.
    pub skin: bool,
    /// Node group id covering every node of the part, if any.
    pub node_group: Option<u32>,
    pub contact: ContactSide,
    /// Cards written verbatim only when the part resolves to at least one
    /// element (imposed velocities on its node group, ...).
    pub cards: Vec<String>,
}

impl Default for PartRole {
    fn default() -> Self {
        Self {
            role: String::new(),
            name: String::new(),
            part_id: 1,
            material_id: 1,
            property_id: 1,
            patterns: Vec::new(),
            skin: true,
            node_group: None,
            contact: ContactSide::None,
            cards: Vec::new(),
        }
    }
}

impl PartRole {
    /// Returns true when `group` matches one of the role's patterns.
    pub fn matches(&self, group: &str) -> bool {
        self.patterns.iter().any(|p| pattern_matches(p, group))
    }
}

/// Skin part/property numbering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinDeckOptions {
    /// Skin part id = `part_offset + part_id`.
    pub part_offset: u32,
    /// Shell property shared by every skin part.
    pub property_id: u32,
    /// Shell thickness of the skin property.
    pub thickness: f64,
}

impl Default for SkinDeckOptions {
    fn default() -> Self {
        Self {
            part_offset: 100,
            property_id: 999,
            thickness: 0.001,
        }
    }
}

/// Deck-level settings for the starter and engine files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckOptions {
    pub run_name: String,
    pub title: String,
    /// Factor applied to every coordinate (mm → m by default).
    pub coordinate_scale: f64,
    /// Unit system line (mass, length, time).
    pub units: [String; 3],
    /// Cards written verbatim after the node block whatever parts are
    /// present (materials, solid properties, load curves, ...).
    pub extra_cards: Vec<String>,
    /// Simulated time of the engine run.
    pub end_time: f64,
    pub restart_interval: u32,
    pub animation_interval: f64,
    /// `/ANIM/...` outputs requested by the engine file.
    pub animations: Vec<String>,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            run_name: "Punch_Die_Shearing".into(),
            title: "Punch Die Shearing".into(),
            coordinate_scale: 1.0e-3,
            units: ["kg".into(), "m".into(), "s".into()],
            extra_cards: Vec::new(),
            end_time: 7.0e-4,
            restart_interval: 5000,
            animation_interval: 1.0e-4,
            animations: [
                "ELEM/EPSP",
                "ELEM/VONM",
                "ELEM/ENER",
                "ELEM/SIGX",
                "ELEM/SIGY",
                "ELEM/SIGZ",
                "ELEM/SIGXY",
                "ELEM/SIGYZ",
                "ELEM/SIGZX",
                "VECT/DISP",
                "VECT/VEL",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// `/INTER/TYPE7` settings shared by every generated contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactOptions {
    pub stiffness_formulation: u32,
    pub gap_flag: u32,
    pub deletion_flag: u32,
    pub friction: f64,
    pub gap_min: f64,
    pub gap_max: f64,
    pub stiffness_factor: f64,
    pub formulation: u32,
}

impl Default for ContactOptions {
    fn default() -> Self {
        Self {
            stiffness_formulation: 4,
            gap_flag: 2,
            deletion_flag: 1,
            friction: 0.1,
            gap_min: 1.0e-4,
            gap_max: 1.0,
            stiffness_factor: 20.0,
            formulation: 2,
        }
    }
}

/// Complete converter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Part roles in output order.
    pub parts: Vec<PartRole>,
    /// Part holding every grouped element when no role matches.
    pub fallback: Option<PartRole>,
    pub boundary: BoundaryOptions,
    pub skin: SkinDeckOptions,
    pub deck: DeckOptions,
    pub contact: ContactOptions,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        let patterns = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            parts: vec![
                PartRole {
                    role: "PUNCH".into(),
                    name: "Punch".into(),
                    part_id: 1,
                    patterns: patterns(&[
                        "Solid_part-1",
                        "Solid_part-Punch_Hole",
                        "Solid_part-Punch_Trim",
                        "Solid_part-Punch_Rectangle",
                        "From_parts-Punch_Hole",
                        "From_parts-Punch_Trim",
                        "From_parts-Punch_Rectangle",
                    ]),
                    node_group: Some(100),
                    contact: ContactSide::Master { surface_id: 300 },
                    ..PartRole::default()
                },
                PartRole {
                    role: "MATERIAL".into(),
                    name: "Material".into(),
                    part_id: 2,
                    material_id: 2,
                    property_id: 2,
                    patterns: patterns(&[
                        "Solid_part-5",
                        "Solid_part-6",
                        "Solid_part-Material",
                        "From_parts-Material",
                    ]),
                    contact: ContactSide::Slave { node_group_id: 400 },
                    ..PartRole::default()
                },
                PartRole {
                    role: "DIE".into(),
                    name: "Die".into(),
                    part_id: 3,
                    patterns: patterns(&["Solid_part-4", "Solid_part-Die", "From_parts-Die"]),
                    node_group: Some(200),
                    contact: ContactSide::Master { surface_id: 500 },
                    ..PartRole::default()
                },
                PartRole {
                    role: "STRIPPER".into(),
                    name: "Stripper".into(),
                    part_id: 4,
                    patterns: patterns(&["Solid_part-Stripper", "From_parts-Stripper"]),
                    skin: false,
                    node_group: Some(300),
                    ..PartRole::default()
                },
            ],
            fallback: Some(PartRole {
                role: "PUNCH".into(),
                name: "AllElements".into(),
                part_id: 1,
                node_group: Some(100),
                contact: ContactSide::Master { surface_id: 300 },
                ..PartRole::default()
            }),
            boundary: BoundaryOptions::default(),
            skin: SkinDeckOptions::default(),
            deck: DeckOptions::default(),
            contact: ContactOptions::default(),
        }
    }
}

impl ConverterConfig {
    /// Parses and validates a JSON configuration. Missing fields take their
    /// default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ConverterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks that part, skin part, surface and node group ids do not clash.
    pub fn validate(&self) -> Result<()> {
        for role in self.parts.iter().chain(self.fallback.iter()) {
            if role.name.is_empty() {
                return Err(MeshSkinError::Config(format!(
                    "part {} has an empty name",
                    role.part_id
                )));
            }
            if role.contact != ContactSide::None && !role.skin {
                return Err(MeshSkinError::Config(format!(
                    "part `{}` takes part in contact but has no skin",
                    role.name
                )));
            }
        }
        // The fallback replaces the roles, so only the roles must not clash.
        check_unique_ids(&self.parts, self.skin.part_offset)?;
        if let Some(fallback) = &self.fallback {
            check_unique_ids(std::slice::from_ref(fallback), self.skin.part_offset)?;
        }
        Ok(())
    }
}

fn check_unique_ids(roles: &[PartRole], skin_offset: u32) -> Result<()> {
    let clash = |what: &str, id: u32| {
        Err(MeshSkinError::Config(format!("{what} id {id} is used twice")))
    };
    let mut part_ids = HashSet::new();
    let mut group_ids = HashSet::new();
    let mut surface_ids = HashSet::new();
    for role in roles {
        if !part_ids.insert(role.part_id) {
            return clash("part", role.part_id);
        }
        if let Some(group) = role.node_group {
            if !group_ids.insert(group) {
                return clash("node group", group);
            }
        }
        match role.contact {
            ContactSide::Master { surface_id } if !surface_ids.insert(surface_id) => {
                return clash("surface", surface_id);
            }
            ContactSide::Slave { node_group_id } if !group_ids.insert(node_group_id) => {
                return clash("node group", node_group_id);
            }
            _ => {}
        }
    }
    for role in roles.iter().filter(|r| r.skin) {
        let skin_part = skin_offset.saturating_add(role.part_id);
        if part_ids.contains(&skin_part) {
            return Err(MeshSkinError::Config(format!(
                "skin part id {skin_part} of `{}` clashes with a part id",
                role.name
            )));
        }
    }
    Ok(())
}

/// Glob-style match where `*` stands for any (possibly empty) run of
/// characters. Matching is case-sensitive.
pub fn pattern_matches(pattern: &str, name: &str) -> bool {
    let mut pieces = pattern.split('*');
    let Some(first) = pieces.next() else {
        return name.is_empty();
    };
    let Some(mut rest) = name.strip_prefix(first) else {
        return false;
    };
    let pieces: Vec<&str> = pieces.collect();
    let Some((last, middle)) = pieces.split_last() else {
        // No wildcard at all.
        return rest.is_empty();
    };
    for piece in middle {
        match rest.find(piece) {
            Some(pos) => rest = &rest[pos + piece.len()..],
            None => return false,
        }
    }
    rest.len() >= last.len() && rest.ends_with(last)
}
