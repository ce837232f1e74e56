//! Named element groups (regions) for mesh elements.
//!
//! Groups map a name → ordered list of `ElementId`s. They come from `ELSET`
//! definitions in the input deck and describe the physical parts or tools of
//! the model (blank material, punch, die, ...). Group order and member order
//! are both kept as first seen, because skin element numbering downstream
//! follows them.

use std::collections::{HashMap, HashSet};

use crate::topology::point::ElementId;

/// Insertion-ordered named element groups.
#[derive(Clone, Debug, Default)]
pub struct ElementGroups {
    names: Vec<String>,
    members: HashMap<String, Vec<ElementId>>,
}

impl ElementGroups {
    /// Creates an empty group set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` without members. Existing groups are left unchanged.
    pub fn ensure_group(&mut self, name: &str) -> &mut Vec<ElementId> {
        if !self.members.contains_key(name) {
            self.names.push(name.to_string());
        }
        self.members.entry(name.to_string()).or_default()
    }

    /// Appends `element` to group `name`, creating the group if needed.
    pub fn insert(&mut self, name: &str, element: ElementId) {
        self.ensure_group(name).push(element);
    }

    /// Appends every element of `elements` to group `name`.
    pub fn extend<I>(&mut self, name: &str, elements: I)
    where
        I: IntoIterator<Item = ElementId>,
    {
        self.ensure_group(name).extend(elements);
    }

    /// Members of `name` in insertion order.
    pub fn get(&self, name: &str) -> Option<&[ElementId]> {
        self.members.get(name).map(Vec::as_slice)
    }

    /// Returns true when a group called `name` exists (possibly empty).
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Group names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Iterate over `(name, members)` in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ElementId])> + '_ {
        self.names
            .iter()
            .map(move |name| (name.as_str(), self.members[name].as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true when no group is defined.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Ordered union of several groups: members appear in the order of the
    /// first group that lists them, and each element id appears once.
    ///
    /// Unknown names contribute nothing.
    pub fn union<'a, I>(&self, names: I) -> Vec<ElementId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for name in names {
            if let Some(members) = self.members.get(name) {
                out.extend(members.iter().copied().filter(|e| seen.insert(*e)));
            }
        }
        out
    }

    /// All grouped elements, in group order, each listed once.
    pub fn all_elements(&self) -> Vec<ElementId> {
        self.union(self.names())
    }
}
