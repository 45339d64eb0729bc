//! Distributable units of a model repository: base models, overlay profiles
//! and thematic slices, plus the package identity they all share.

use serde::Serialize;

use crate::nodes::{ModelNode, NodeId};

/// Identity and metadata carried by every distributable unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub id: String,
    pub label: String,
    pub version: String,
}

/// A bare node collection, the input and output of composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDefinition {
    pub nodes: Vec<ModelNode>,
}

/// A deletion marker inside a profile layer.
///
/// Tombstones are layer entries, never nodes: composition removes the id
/// they name and they can never appear in a composed result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "nothing")]
pub struct Tombstone {
    pub id: NodeId,
}

/// One entry of a profile layer: a node to add or replace, or a tombstone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LayerEntry {
    Node(ModelNode),
    Tombstone(Tombstone),
}

impl LayerEntry {
    /// The id this entry affects.
    pub fn id(&self) -> &str {
        match self {
            LayerEntry::Node(node) => node.id(),
            LayerEntry::Tombstone(tombstone) => &tombstone.id,
        }
    }
}

/// The node entries of a profile, without packaging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerDefinition {
    pub nodes: Vec<LayerEntry>,
}

/// A reference to a node by id, as used in thematic slices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRef {
    pub node_id: NodeId,
}

/// The membership list of a thematic slice, without packaging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceDefinition {
    pub nodes: Vec<NodeRef>,
}

/// A packaged base model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseModel {
    #[serde(flatten)]
    pub package: Package,
    #[serde(flatten)]
    pub definition: ModelDefinition,
}

/// A packaged overlay profile, bound to its base model by `model_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelProfile {
    #[serde(flatten)]
    pub package: Package,
    #[serde(rename = "modelId")]
    pub model_id: String,
    #[serde(flatten)]
    pub layer: LayerDefinition,
}

/// A packaged thematic slice, bound to its base model by `model_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThematicSlice {
    #[serde(flatten)]
    pub package: Package,
    #[serde(rename = "modelId")]
    pub model_id: String,
    #[serde(flatten)]
    pub selection: SliceDefinition,
}
