//! Node types of the layered model hierarchy.
//!
//! Every node is one of a closed set of kinds. The kinds that participate in
//! the structural taxonomy share a descriptive field set; question nodes are
//! annotations that may hang off any substantive node but never parent
//! anything themselves.

use std::fmt;

use serde::Serialize;

/// Identifier of a node, unique within one model's node collection.
pub type NodeId = String;

/// The discriminant of a [`ModelNode`], matching the wire `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    EssentialElement,
    Category,
    Subcategory,
    Attribute,
    Feature,
    Kpi,
    Question,
}

impl NodeKind {
    /// The wire tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::EssentialElement => "essential-element",
            NodeKind::Category => "category",
            NodeKind::Subcategory => "subcategory",
            NodeKind::Attribute => "attribute",
            NodeKind::Feature => "feature",
            NodeKind::Kpi => "kpi",
            NodeKind::Question => "question",
        }
    }

    /// The parent kinds a node of this kind may legally sit under.
    ///
    /// This table is the single source of truth for legal tree shapes. An
    /// empty slice means the kind must have no parent at all.
    pub fn allowed_parents(self) -> &'static [NodeKind] {
        use NodeKind::*;
        match self {
            EssentialElement => &[],
            Category => &[EssentialElement],
            Subcategory => &[Category],
            Attribute => &[EssentialElement, Category, Subcategory],
            Feature => &[Attribute],
            Kpi => &[Attribute, Feature],
            Question => &[
                EssentialElement,
                Category,
                Subcategory,
                Attribute,
                Feature,
                Kpi,
            ],
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How strongly a node is recommended for consideration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsiderationLevel {
    Core,
    Desirable,
    Optional,
}

impl ConsiderationLevel {
    /// The legal wire literals, in declaration order.
    pub const LITERALS: &'static [&'static str] = &["core", "desirable", "optional"];

    pub fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "core" => Some(ConsiderationLevel::Core),
            "desirable" => Some(ConsiderationLevel::Desirable),
            "optional" => Some(ConsiderationLevel::Optional),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConsiderationLevel::Core => "core",
            ConsiderationLevel::Desirable => "desirable",
            ConsiderationLevel::Optional => "optional",
        }
    }
}

/// Descriptive fields shared by every taxonomy node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetails {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    /// Source descriptors are carried verbatim; their shape is not
    /// interpreted by the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<serde_json::Value>>,
    pub consideration_level: ConsiderationLevel,
}

/// A taxonomy node below the root level: details plus the parent link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonNode {
    pub parent_id: NodeId,
    #[serde(flatten)]
    pub details: NodeDetails,
}

/// An annotation node attachable to any substantive node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionNode {
    pub id: NodeId,
    pub parent_id: NodeId,
    pub text: String,
    pub description: String,
}

/// A node of the model hierarchy.
///
/// The variant set is closed on purpose: validators dispatch on the kind
/// instead of probing for optional fields that may or may not be meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ModelNode {
    EssentialElement(NodeDetails),
    Category(TaxonNode),
    Subcategory(TaxonNode),
    Attribute(TaxonNode),
    Feature(TaxonNode),
    Kpi(TaxonNode),
    Question(QuestionNode),
}

impl ModelNode {
    pub fn id(&self) -> &str {
        match self {
            ModelNode::EssentialElement(details) => &details.id,
            ModelNode::Category(taxon)
            | ModelNode::Subcategory(taxon)
            | ModelNode::Attribute(taxon)
            | ModelNode::Feature(taxon)
            | ModelNode::Kpi(taxon) => &taxon.details.id,
            ModelNode::Question(question) => &question.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            ModelNode::EssentialElement(_) => NodeKind::EssentialElement,
            ModelNode::Category(_) => NodeKind::Category,
            ModelNode::Subcategory(_) => NodeKind::Subcategory,
            ModelNode::Attribute(_) => NodeKind::Attribute,
            ModelNode::Feature(_) => NodeKind::Feature,
            ModelNode::Kpi(_) => NodeKind::Kpi,
            ModelNode::Question(_) => NodeKind::Question,
        }
    }

    /// The parent link, absent only on root-level nodes.
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            ModelNode::EssentialElement(_) => None,
            ModelNode::Category(taxon)
            | ModelNode::Subcategory(taxon)
            | ModelNode::Attribute(taxon)
            | ModelNode::Feature(taxon)
            | ModelNode::Kpi(taxon) => Some(&taxon.parent_id),
            ModelNode::Question(question) => Some(&question.parent_id),
        }
    }
}
