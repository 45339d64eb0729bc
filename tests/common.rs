//! Common test helpers for integration tests

use serde_json::{json, Value};

use strata::model::{
    BaseModel, LayerDefinition, LayerEntry, ModelDefinition, ModelProfile, NodeRef, Package,
    SliceDefinition, ThematicSlice, Tombstone,
};
use strata::nodes::{ConsiderationLevel, ModelNode, NodeDetails, NodeKind, QuestionNode, TaxonNode};

/// Build the shared descriptive field set with deterministic content.
pub fn mock_details(id: &str) -> NodeDetails {
    NodeDetails {
        id: id.to_string(),
        icon: Some(format!("icons/{}.png", id)),
        name: format!("Name of {}", id),
        short_name: None,
        description: format!("Description of {}", id),
        short_description: None,
        examples: None,
        sources: None,
        consideration_level: ConsiderationLevel::Core,
    }
}

/// Build a node of the given kind; `parent` is ignored for root nodes.
pub fn mock_node(id: &str, kind: NodeKind, parent: &str) -> ModelNode {
    match kind {
        NodeKind::EssentialElement => ModelNode::EssentialElement(mock_details(id)),
        NodeKind::Question => ModelNode::Question(QuestionNode {
            id: id.to_string(),
            parent_id: parent.to_string(),
            text: format!("Text of {}", id),
            description: format!("Description of {}", id),
        }),
        taxon_kind => {
            let taxon = TaxonNode {
                parent_id: parent.to_string(),
                details: mock_details(id),
            };
            match taxon_kind {
                NodeKind::Category => ModelNode::Category(taxon),
                NodeKind::Subcategory => ModelNode::Subcategory(taxon),
                NodeKind::Attribute => ModelNode::Attribute(taxon),
                NodeKind::Feature => ModelNode::Feature(taxon),
                _ => ModelNode::Kpi(taxon),
            }
        }
    }
}

/// The JSON wire form of [`mock_node`].
pub fn mock_node_value(id: &str, kind: NodeKind, parent: &str) -> Value {
    serde_json::to_value(mock_node(id, kind, parent)).expect("mock nodes serialize")
}

pub fn package(id: &str) -> Package {
    Package {
        id: id.to_string(),
        label: format!("Label of {}", id),
        version: "1.0.0".to_string(),
    }
}

/// A well-formed model exercising every node kind.
pub fn sample_model_nodes() -> Vec<ModelNode> {
    vec![
        mock_node("a", NodeKind::EssentialElement, ""),
        mock_node("b", NodeKind::Category, "a"),
        mock_node("c", NodeKind::Subcategory, "b"),
        mock_node("a-attr", NodeKind::Attribute, "a"),
        mock_node("a-attr-feat", NodeKind::Feature, "a-attr"),
        mock_node("a-attr-kpi", NodeKind::Kpi, "a-attr"),
        mock_node("a-question", NodeKind::Question, "a"),
    ]
}

pub fn base_model(id: &str, nodes: Vec<ModelNode>) -> BaseModel {
    BaseModel {
        package: package(id),
        definition: ModelDefinition { nodes },
    }
}

pub fn profile(id: &str, model_id: &str, nodes: Vec<LayerEntry>) -> ModelProfile {
    ModelProfile {
        package: package(id),
        model_id: model_id.to_string(),
        layer: LayerDefinition { nodes },
    }
}

pub fn slice(id: &str, model_id: &str, node_ids: &[&str]) -> ThematicSlice {
    ThematicSlice {
        package: package(id),
        model_id: model_id.to_string(),
        selection: SliceDefinition {
            nodes: node_ids
                .iter()
                .map(|node_id| NodeRef {
                    node_id: node_id.to_string(),
                })
                .collect(),
        },
    }
}

pub fn tombstone(id: &str) -> LayerEntry {
    LayerEntry::Tombstone(Tombstone { id: id.to_string() })
}

/// The JSON wire form of a minimal repository with one inline model.
pub fn sample_repository_value() -> Value {
    json!({
        "id": "example-repo",
        "name": "Example Repo",
        "description": "This is an example repo",
        "baseModels": [{
            "id": "m",
            "label": "Label of m",
            "version": "1.0.0",
            "nodes": [
                mock_node_value("a", NodeKind::EssentialElement, ""),
                mock_node_value("b", NodeKind::Category, "a"),
            ],
        }],
        "profiles": [{
            "id": "p",
            "label": "Label of p",
            "version": "1.0.0",
            "modelId": "m",
            "nodes": [{"type": "nothing", "id": "b"}],
        }],
        "thematicSlices": [{
            "id": "s",
            "label": "Label of s",
            "version": "1.0.0",
            "modelId": "m",
            "nodes": [{"nodeId": "a"}],
        }],
    })
}
