//! Composition of a base model with overlay layers and thematic slices.
//!
//! Composition is a pure function: it never mutates its inputs and never
//! validates its output. Structural checks are a separate pass, see
//! [`crate::validate::validate_hierarchy`].

use std::collections::{HashMap, HashSet};

use crate::model::{LayerDefinition, LayerEntry, ModelDefinition, SliceDefinition};
use crate::nodes::{ModelNode, NodeId};

/// Membership filtering derived from a list of thematic slices.
///
/// An empty slice list disables filtering entirely; it never means "select
/// nothing". The two cases are distinct variants so that emptiness checks
/// cannot be inverted by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceFilter {
    Unfiltered,
    RestrictedTo(HashSet<NodeId>),
}

impl SliceFilter {
    /// The union of every node id across the given slices, or
    /// [`SliceFilter::Unfiltered`] for an empty list.
    pub fn from_slices(slices: &[&SliceDefinition]) -> Self {
        if slices.is_empty() {
            return SliceFilter::Unfiltered;
        }
        let active: HashSet<NodeId> = slices
            .iter()
            .flat_map(|slice| slice.nodes.iter().map(|r| r.node_id.clone()))
            .collect();
        SliceFilter::RestrictedTo(active)
    }

    pub fn admits(&self, id: &str) -> bool {
        match self {
            SliceFilter::Unfiltered => true,
            SliceFilter::RestrictedTo(active) => active.contains(id),
        }
    }
}

enum Slot<'a> {
    Node(&'a ModelNode),
    Tombstone,
}

fn overwrite<'a>(
    order: &mut Vec<&'a str>,
    slots: &mut HashMap<&'a str, Slot<'a>>,
    id: &'a str,
    slot: Slot<'a>,
) {
    if slots.insert(id, slot).is_none() {
        order.push(id);
    }
}

/// Overlay `layers` onto `base` in order and restrict to `slices`.
///
/// Later layers override earlier ones and the base (last-write-wins per
/// id); a tombstone entry removes its id no matter which input introduced
/// it. The result contains no tombstones, keeps surviving node content
/// unchanged, and iterates in first-insertion order across base-then-layers
/// rather than any sorted order. A tombstone for an id nothing defined is a
/// silent no-op, and slice references that match no surviving id are
/// silently dropped.
pub fn compose<'a>(
    base: &'a ModelDefinition,
    layers: &[&'a LayerDefinition],
    slices: &[&SliceDefinition],
) -> ModelDefinition {
    let filter = SliceFilter::from_slices(slices);

    // Ordered id table: `order` records each id's first insertion, `slots`
    // holds the latest entry for it. Replacements and tombstones overwrite
    // the slot but never move the id.
    let mut order: Vec<&'a str> = Vec::new();
    let mut slots: HashMap<&'a str, Slot<'a>> = HashMap::new();

    for node in &base.nodes {
        overwrite(&mut order, &mut slots, node.id(), Slot::Node(node));
    }
    for layer in layers {
        for entry in &layer.nodes {
            match entry {
                LayerEntry::Node(node) => {
                    overwrite(&mut order, &mut slots, node.id(), Slot::Node(node))
                }
                LayerEntry::Tombstone(tombstone) => {
                    overwrite(&mut order, &mut slots, &tombstone.id, Slot::Tombstone)
                }
            }
        }
    }

    let nodes = order
        .iter()
        .filter_map(|id| match slots.get(id) {
            Some(Slot::Node(node)) if filter.admits(id) => Some((*node).clone()),
            _ => None,
        })
        .collect();
    ModelDefinition { nodes }
}
