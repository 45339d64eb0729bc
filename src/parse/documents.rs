//! Format-specific parsers for the repository document shapes.
//!
//! Each parser converts one untrusted document (or sub-document) into its
//! typed form, failing with an aggregated error whose rendered form names
//! the path from the root collection down to the offending field.

use serde_json::Value;

use crate::model::{
    BaseModel, LayerDefinition, LayerEntry, ModelDefinition, ModelProfile, NodeRef,
    SliceDefinition, ThematicSlice, Tombstone,
};
use crate::nodes::{ConsiderationLevel, ModelNode, NodeDetails, NodeKind, QuestionNode, TaxonNode};
use crate::parse::primitives::{
    kind_of, parse_enumeration, parse_object_value, parse_package, parse_ref_or,
    parse_related_ref_or, parse_sequence, parse_string, FieldMap,
};
use crate::report::{ErrorGroup, GroupedError};
use crate::repository::{RepositoryInfo, RepositoryRoot};

/// The `type` tag of a node-shaped document, or a failure naming the
/// problem.
fn node_tag(value: &Value) -> Result<&str, ErrorGroup> {
    match value {
        Value::Object(map) => match map.get("type") {
            Some(Value::String(tag)) => Ok(tag),
            Some(other) => Err(ErrorGroup::leaf(
                "node",
                format!("type tag is not a string (found {})", kind_of(other)),
            )),
            None => Err(ErrorGroup::leaf("node", "type tag is missing")),
        },
        other => Err(ErrorGroup::leaf(
            "node",
            format!("value is not an object (found {})", kind_of(other)),
        )),
    }
}

fn parse_consideration_level(value: &Value) -> Result<ConsiderationLevel, GroupedError> {
    let literal = parse_enumeration(value, ConsiderationLevel::LITERALS)?;
    ConsiderationLevel::from_literal(&literal).ok_or_else(|| {
        GroupedError::Message(format!("value \"{}\" is not a consideration level", literal))
    })
}

/// Field results for the shared descriptive field set, collected before the
/// enclosing [`FieldMap::finish`] decides success.
struct DetailsDraft {
    id: Result<String, ErrorGroup>,
    icon: Result<Option<String>, ErrorGroup>,
    name: Result<String, ErrorGroup>,
    short_name: Result<Option<String>, ErrorGroup>,
    description: Result<String, ErrorGroup>,
    short_description: Result<Option<String>, ErrorGroup>,
    examples: Result<Option<Vec<String>>, ErrorGroup>,
    sources: Result<Option<Vec<Value>>, ErrorGroup>,
    consideration_level: Result<ConsiderationLevel, ErrorGroup>,
}

impl DetailsDraft {
    fn read(fields: &mut FieldMap<'_>) -> Self {
        Self {
            id: fields.required("id", parse_string),
            icon: fields.optional("icon", parse_string),
            name: fields.required("name", parse_string),
            short_name: fields.optional("shortName", parse_string),
            description: fields.required("description", parse_string),
            short_description: fields.optional("shortDescription", parse_string),
            examples: fields.optional("examples", |v| parse_sequence(v, parse_string)),
            sources: fields.optional("sources", |v| parse_sequence(v, parse_object_value)),
            consideration_level: fields.required("considerationLevel", parse_consideration_level),
        }
    }

    fn build(self) -> Result<NodeDetails, ErrorGroup> {
        Ok(NodeDetails {
            id: self.id?,
            icon: self.icon?,
            name: self.name?,
            short_name: self.short_name?,
            description: self.description?,
            short_description: self.short_description?,
            examples: self.examples?,
            sources: self.sources?,
            consideration_level: self.consideration_level?,
        })
    }
}

fn parse_essential_element(value: &Value) -> Result<ModelNode, ErrorGroup> {
    let mut fields = FieldMap::new(value, "essential element node")?;
    let details = DetailsDraft::read(&mut fields);
    fields.finish()?;
    Ok(ModelNode::EssentialElement(details.build()?))
}

fn parse_taxon(value: &Value, kind: NodeKind) -> Result<ModelNode, ErrorGroup> {
    let mut fields = FieldMap::new(value, format!("{} node", kind))?;
    let parent_id = fields.required("parentId", parse_string);
    let details = DetailsDraft::read(&mut fields);
    fields.finish()?;
    let taxon = TaxonNode {
        parent_id: parent_id?,
        details: details.build()?,
    };
    Ok(match kind {
        NodeKind::Category => ModelNode::Category(taxon),
        NodeKind::Subcategory => ModelNode::Subcategory(taxon),
        NodeKind::Attribute => ModelNode::Attribute(taxon),
        NodeKind::Feature => ModelNode::Feature(taxon),
        _ => ModelNode::Kpi(taxon),
    })
}

fn parse_question(value: &Value) -> Result<ModelNode, ErrorGroup> {
    let mut fields = FieldMap::new(value, "question node")?;
    let id = fields.required("id", parse_string);
    let parent_id = fields.required("parentId", parse_string);
    let text = fields.required("text", parse_string);
    let description = fields.required("description", parse_string);
    fields.finish()?;
    Ok(ModelNode::Question(QuestionNode {
        id: id?,
        parent_id: parent_id?,
        text: text?,
        description: description?,
    }))
}

/// Parse a node document, discriminating on the `type` tag.
pub fn parse_node(value: &Value) -> Result<ModelNode, ErrorGroup> {
    match node_tag(value)? {
        "essential-element" => parse_essential_element(value),
        "category" => parse_taxon(value, NodeKind::Category),
        "subcategory" => parse_taxon(value, NodeKind::Subcategory),
        "attribute" => parse_taxon(value, NodeKind::Attribute),
        "feature" => parse_taxon(value, NodeKind::Feature),
        "kpi" => parse_taxon(value, NodeKind::Kpi),
        "question" => parse_question(value),
        other => Err(ErrorGroup::leaf(
            "node",
            format!("unknown node type \"{}\"", other),
        )),
    }
}

/// Parse a layer entry: a tombstone when tagged `nothing`, a node otherwise.
pub fn parse_layer_entry(value: &Value) -> Result<LayerEntry, ErrorGroup> {
    if node_tag(value)? == "nothing" {
        let mut fields = FieldMap::new(value, "tombstone")?;
        let id = fields.required("id", parse_string);
        fields.finish()?;
        Ok(LayerEntry::Tombstone(Tombstone { id: id? }))
    } else {
        Ok(LayerEntry::Node(parse_node(value)?))
    }
}

/// Parse a `{nodeId}` reference as used in thematic slices.
pub fn parse_node_ref(value: &Value) -> Result<NodeRef, ErrorGroup> {
    let mut fields = FieldMap::new(value, "node reference")?;
    let node_id = fields.required("nodeId", parse_string);
    fields.finish()?;
    Ok(NodeRef { node_id: node_id? })
}

/// Parse the node collection of a base model.
pub fn parse_model(value: &Value) -> Result<ModelDefinition, ErrorGroup> {
    let mut fields = FieldMap::new(value, "model")?;
    let nodes = fields.required("nodes", |v| parse_sequence(v, parse_node));
    fields.finish()?;
    Ok(ModelDefinition { nodes: nodes? })
}

/// Parse the foreign key and node entries of a profile, without packaging.
pub fn parse_layer(value: &Value) -> Result<(String, LayerDefinition), ErrorGroup> {
    let mut fields = FieldMap::new(value, "profile")?;
    let model_id = fields.required("modelId", parse_string);
    let nodes = fields.required("nodes", |v| parse_sequence(v, parse_layer_entry));
    fields.finish()?;
    Ok((model_id?, LayerDefinition { nodes: nodes? }))
}

fn parse_slice_body(value: &Value) -> Result<(String, SliceDefinition), ErrorGroup> {
    let mut fields = FieldMap::new(value, "slice")?;
    let model_id = fields.required("modelId", parse_string);
    let nodes = fields.required("nodes", |v| parse_sequence(v, parse_node_ref));
    fields.finish()?;
    Ok((model_id?, SliceDefinition { nodes: nodes? }))
}

/// Parse a packaged base model document.
pub fn parse_base_model(value: &Value) -> Result<BaseModel, ErrorGroup> {
    let (package, definition) = parse_package(value, parse_model)?;
    Ok(BaseModel {
        package,
        definition,
    })
}

/// Parse a packaged profile document.
pub fn parse_profile(value: &Value) -> Result<ModelProfile, ErrorGroup> {
    let (package, (model_id, layer)) = parse_package(value, parse_layer)?;
    Ok(ModelProfile {
        package,
        model_id,
        layer,
    })
}

/// Parse a packaged thematic slice document.
pub fn parse_slice(value: &Value) -> Result<ThematicSlice, ErrorGroup> {
    let (package, (model_id, selection)) = parse_package(value, parse_slice_body)?;
    Ok(ThematicSlice {
        package,
        model_id,
        selection,
    })
}

/// Parse a repository root document.
pub fn parse_repository(value: &Value) -> Result<RepositoryRoot, ErrorGroup> {
    let mut fields = FieldMap::new(value, "repository")?;
    let id = fields.required("id", parse_string);
    let name = fields.required("name", parse_string);
    let description = fields.optional("description", parse_string);
    let url = fields.optional("url", parse_string);
    let base_models = fields.required("baseModels", |v| {
        parse_sequence(v, |v| parse_ref_or(v, parse_base_model))
    });
    let profiles = fields.required("profiles", |v| {
        parse_sequence(v, |v| parse_related_ref_or(v, parse_profile))
    });
    let thematic_slices = fields.required("thematicSlices", |v| {
        parse_sequence(v, |v| parse_related_ref_or(v, parse_slice))
    });
    fields.finish()?;
    Ok(RepositoryRoot {
        info: RepositoryInfo {
            id: id?,
            name: name?,
            description: description?,
            url: url?,
        },
        base_models: base_models?,
        profiles: profiles?,
        thematic_slices: thematic_slices?,
    })
}
