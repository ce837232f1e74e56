//! Resolution of element groups into logical parts.
//!
//! A part collects every element group whose name matches one of its role's
//! patterns. Roles are visited in configuration order; within a role, groups
//! are taken pattern by pattern and, for each pattern, in group definition
//! order. Element ids are kept once, at their first position, and an element
//! claimed by an earlier part is not repeated in a later one.

use std::collections::{BTreeSet, HashSet};

use itertools::Itertools;

use crate::config::{ConverterConfig, PartRole};
use crate::mesh_error::{MeshSkinError, Result};
use crate::topology::groups::ElementGroups;
use crate::topology::mesh::TetMesh;
use crate::topology::point::{ElementId, NodeId};

/// A resolved part: its role and the merged element list.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub role: PartRole,
    /// Names of the groups merged into the part, in merge order.
    pub groups: Vec<String>,
    pub elements: Vec<ElementId>,
}

impl Part {
    #[inline]
    pub fn name(&self) -> &str {
        &self.role.name
    }

    #[inline]
    pub fn part_id(&self) -> u32 {
        self.role.part_id
    }

    /// Every node referenced by the part's elements.
    pub fn nodes(&self, mesh: &TetMesh) -> Result<BTreeSet<NodeId>> {
        let mut nodes = BTreeSet::new();
        for &element in &self.elements {
            let conn = mesh
                .element(element)
                .ok_or(MeshSkinError::UnknownElement { element })?;
            nodes.extend(conn.iter().copied());
        }
        Ok(nodes)
    }
}

/// Group names matched by `role`, in pattern order then definition order.
pub fn matching_groups<'a>(role: &PartRole, groups: &'a ElementGroups) -> Vec<&'a str> {
    role.patterns
        .iter()
        .flat_map(|pattern| {
            groups
                .names()
                .filter(move |name| crate::config::pattern_matches(pattern, name))
        })
        .unique()
        .collect()
}

/// Merges `groups` into parts according to `config`.
///
/// Only roles with at least one element produce a part. An element matched by
/// several roles stays in the first one, with a warning. When no role matches
/// anything but groups exist, the configured fallback part receives every
/// grouped element.
pub fn resolve_parts(groups: &ElementGroups, config: &ConverterConfig) -> Vec<Part> {
    let mut parts = Vec::new();
    let mut claimed: HashSet<ElementId> = HashSet::new();
    for role in &config.parts {
        let names = matching_groups(role, groups);
        let (elements, taken): (Vec<_>, Vec<_>) = groups
            .union(names.iter().copied())
            .into_iter()
            .partition(|element| !claimed.contains(element));
        if !taken.is_empty() {
            log::warn!(
                "part `{}`: {} elements already belong to an earlier part and are left there: {}",
                role.name,
                taken.len(),
                taken.iter().join(", ")
            );
        }
        claimed.extend(elements.iter().copied());
        if elements.is_empty() {
            if !names.is_empty() && taken.is_empty() {
                log::debug!("part `{}`: matched groups are empty", role.name);
            }
            continue;
        }
        log::debug!(
            "part `{}` ({}): {} elements from {}",
            role.name,
            role.part_id,
            elements.len(),
            names.iter().join(", ")
        );
        parts.push(Part {
            role: role.clone(),
            groups: names.into_iter().map(String::from).collect(),
            elements,
        });
    }

    if parts.is_empty() && !groups.is_empty() {
        if let Some(fallback) = &config.fallback {
            let elements = groups.all_elements();
            log::warn!(
                "no element group matches a configured part; using `{}` for all {} grouped elements",
                fallback.name,
                elements.len()
            );
            if !elements.is_empty() {
                parts.push(Part {
                    role: fallback.clone(),
                    groups: groups.names().map(String::from).collect(),
                    elements,
                });
            }
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(raw: u64) -> ElementId {
        ElementId::new(raw)
    }

    fn groups(defs: &[(&str, &[u64])]) -> ElementGroups {
        let mut groups = ElementGroups::new();
        for (name, members) in defs {
            groups.extend(name, members.iter().copied().map(e));
        }
        groups
    }

    #[test]
    fn aliases_merge_in_pattern_order() {
        let groups = groups(&[
            ("From_parts-Punch_Trim", &[5, 6]),
            ("Solid_part-1", &[1, 2]),
            ("From_parts-Material", &[10, 11]),
            ("Solid_part-Die", &[20]),
        ]);
        let parts = resolve_parts(&groups, &ConverterConfig::default());
        let summary: Vec<_> = parts
            .iter()
            .map(|p| (p.name(), p.part_id(), p.elements.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Punch", 1, vec![e(1), e(2), e(5), e(6)]),
                ("Material", 2, vec![e(10), e(11)]),
                ("Die", 3, vec![e(20)]),
            ]
        );
        assert_eq!(parts[0].groups, vec!["Solid_part-1", "From_parts-Punch_Trim"]);
    }

    #[test]
    fn overlapping_groups_are_deduplicated() {
        let groups = groups(&[("Solid_part-5", &[1, 2, 3]), ("Solid_part-6", &[3, 4])]);
        let parts = resolve_parts(&groups, &ConverterConfig::default());
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].elements, vec![e(1), e(2), e(3), e(4)]);
    }

    #[test]
    fn empty_matches_produce_no_part() {
        let groups = groups(&[("Solid_part-Die", &[]), ("Solid_part-Stripper", &[7])]);
        let parts = resolve_parts(&groups, &ConverterConfig::default());
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name(), "Stripper");
    }

    #[test]
    fn unmatched_groups_fall_back_to_one_part() {
        let groups = groups(&[("Housing", &[3, 1]), ("Bolt", &[2, 3])]);
        let parts = resolve_parts(&groups, &ConverterConfig::default());
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name(), "AllElements");
        assert_eq!(parts[0].role.role, "PUNCH");
        assert_eq!(parts[0].elements, vec![e(3), e(1), e(2)]);

        let config = ConverterConfig {
            fallback: None,
            ..ConverterConfig::default()
        };
        assert!(resolve_parts(&groups, &config).is_empty());
        assert!(resolve_parts(&ElementGroups::new(), &ConverterConfig::default()).is_empty());
    }

    #[test]
    fn elements_stay_in_the_first_matching_part() {
        let mut config = ConverterConfig::default();
        config.parts[0].patterns.push("*".into());
        let groups = groups(&[("Solid_part-Material", &[4, 5]), ("Solid_part-1", &[1, 4])]);
        let parts = resolve_parts(&groups, &config);

        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name(), "Punch");
        assert_eq!(parts[0].elements, vec![e(1), e(4), e(5)]);

        // A later role keeps only what is left.
        config.parts[0].patterns = vec!["Solid_part-1".into()];
        let parts = resolve_parts(&groups, &config);
        let summary: Vec<_> = parts.iter().map(|p| (p.name(), p.elements.clone())).collect();
        assert_eq!(summary, vec![("Punch", vec![e(1), e(4)]), ("Material", vec![e(5)])]);
    }

    #[test]
    fn wildcard_patterns() {
        let mut config = ConverterConfig::default();
        config.parts.truncate(1);
        config.parts[0].patterns = vec!["*Punch*".into()];
        let groups = groups(&[("Punch_B", &[2]), ("Die", &[9]), ("Punch_A", &[1])]);
        let parts = resolve_parts(&groups, &config);
        assert_eq!(parts[0].elements, vec![e(2), e(1)]);
    }
}
