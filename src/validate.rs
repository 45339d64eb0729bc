//! Semantic validation of parsed models, profiles and slices.
//!
//! Validators never fail: each returns the complete list of violations it
//! found, possibly empty, so an author sees every problem in one pass.
//! Parse errors are a different discipline entirely, see [`crate::parse`].

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt;

use crate::compose::compose;
use crate::model::{BaseModel, ModelDefinition, ModelProfile, ThematicSlice};
use crate::nodes::{NodeId, NodeKind};
use crate::report::{ErrorGroup, GroupedError};

/// A single semantic violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A profile or slice names a model id no known model carries.
    ModelReference { used_by: String, model_id: String },
    /// A node's parent link does not resolve to any node.
    ParentReference { node_id: NodeId, parent_id: NodeId },
    /// A node's parent resolves, but to a kind the grammar forbids.
    ParentType {
        node_id: NodeId,
        parent_kind: NodeKind,
    },
    /// An id occurs more than once within one collection.
    IdConflict { id: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ModelReference { used_by, model_id } => write!(
                f,
                "Model reference '{}', used by '{}', could not be found.",
                model_id, used_by
            ),
            ValidationError::ParentReference { node_id, parent_id } => write!(
                f,
                "Parent reference '{}', used by '{}', could not be found.",
                parent_id, node_id
            ),
            ValidationError::ParentType {
                node_id,
                parent_kind,
            } => write!(
                f,
                "Parent type '{}', is not valid for '{}'",
                parent_kind, node_id
            ),
            ValidationError::IdConflict { id } => write!(f, "Duplicate id found: '{}'", id),
        }
    }
}

impl Error for ValidationError {}

/// Check every node's parent link against the allowed-parent grammar.
///
/// Each node's check inspects only its immediate parent; a malformed
/// ancestor chain is reported at the ancestor itself, never retroactively
/// via its descendants.
pub fn validate_hierarchy(model: &ModelDefinition) -> Vec<ValidationError> {
    let index: HashMap<&str, &crate::nodes::ModelNode> =
        model.nodes.iter().map(|node| (node.id(), node)).collect();
    let mut errors = Vec::new();
    for node in &model.nodes {
        let Some(parent_id) = node.parent_id() else {
            continue;
        };
        match index.get(parent_id) {
            None => errors.push(ValidationError::ParentReference {
                node_id: node.id().to_string(),
                parent_id: parent_id.to_string(),
            }),
            Some(parent) => {
                let parent_kind = parent.kind();
                if !node.kind().allowed_parents().contains(&parent_kind) {
                    errors.push(ValidationError::ParentType {
                        node_id: node.id().to_string(),
                        parent_kind,
                    });
                }
            }
        }
    }
    errors
}

/// Check that every profile and slice refers to a known model id.
///
/// Foreign keys only; content is not inspected.
pub fn validate_relations(
    models: &[BaseModel],
    profiles: &[ModelProfile],
    slices: &[ThematicSlice],
) -> Vec<ValidationError> {
    let known: HashSet<&str> = models.iter().map(|m| m.package.id.as_str()).collect();
    let mut errors = Vec::new();
    let mut check = |used_by: &str, model_id: &str| {
        if !known.contains(model_id) {
            errors.push(ValidationError::ModelReference {
                used_by: used_by.to_string(),
                model_id: model_id.to_string(),
            });
        }
    };
    for profile in profiles {
        check(&profile.package.id, &profile.model_id);
    }
    for slice in slices {
        check(&slice.package.id, &slice.model_id);
    }
    errors
}

/// Report every occurrence of an id beyond its first appearance.
///
/// Three occurrences of the same id yield two conflicts, one per extra
/// occurrence.
pub fn validate_unique_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::IdConflict { id: id.to_string() });
        }
    }
    errors
}

/// Re-check the hierarchy of `model` with exactly this profile applied.
///
/// Surfaces breakage the overlay introduces, e.g. a tombstoned node whose
/// children remain and are now parentless.
pub fn validate_profile(model: &ModelDefinition, profile: &ModelProfile) -> Vec<ValidationError> {
    validate_hierarchy(&compose(model, &[&profile.layer], &[]))
}

/// Re-check the hierarchy of `model` restricted to exactly this slice.
pub fn validate_slice(model: &ModelDefinition, slice: &ThematicSlice) -> Vec<ValidationError> {
    validate_hierarchy(&compose(model, &[], &[&slice.selection]))
}

/// Refuse activation when any violation was collected.
///
/// The full list is carried in the returned group so callers can display
/// every violation in one shot.
pub fn ensure_valid(context: &str, errors: Vec<ValidationError>) -> Result<(), ErrorGroup> {
    match ErrorGroup::from_errors(
        context,
        errors.into_iter().map(GroupedError::Validation).collect(),
    ) {
        None => Ok(()),
        Some(group) => Err(group),
    }
}

/// Run the whole validation pipeline over a repository's collections.
///
/// One labelled group per stage, empty stages omitted: relations, node ids
/// and hierarchy per model, composed re-checks per profile and slice, and
/// package id uniqueness per collection.
pub fn validate_collections(
    models: &[BaseModel],
    profiles: &[ModelProfile],
    slices: &[ThematicSlice],
) -> Vec<ErrorGroup> {
    let stage = |context: &str, errors: Vec<ValidationError>| {
        ErrorGroup::from_errors(
            context,
            errors.into_iter().map(GroupedError::Validation).collect(),
        )
    };

    let node_ids = models
        .iter()
        .flat_map(|m| validate_unique_ids(m.definition.nodes.iter().map(|n| n.id())))
        .collect();
    let hierarchies = models
        .iter()
        .flat_map(|m| validate_hierarchy(&m.definition))
        .collect();
    let profile_checks = models
        .iter()
        .flat_map(|m| {
            profiles
                .iter()
                .filter(|p| p.model_id == m.package.id)
                .flat_map(|p| validate_profile(&m.definition, p))
        })
        .collect();
    let slice_checks = models
        .iter()
        .flat_map(|m| {
            slices
                .iter()
                .filter(|s| s.model_id == m.package.id)
                .flat_map(|s| validate_slice(&m.definition, s))
        })
        .collect();

    [
        stage("model relations", validate_relations(models, profiles, slices)),
        stage("node ids", node_ids),
        stage("model hierarchy", hierarchies),
        stage("profiles", profile_checks),
        stage("slices", slice_checks),
        stage(
            "model ids",
            validate_unique_ids(models.iter().map(|m| m.package.id.as_str())),
        ),
        stage(
            "profile ids",
            validate_unique_ids(profiles.iter().map(|p| p.package.id.as_str())),
        ),
        stage(
            "slice ids",
            validate_unique_ids(slices.iter().map(|s| s.package.id.as_str())),
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        LayerDefinition, LayerEntry, NodeRef, Package, SliceDefinition, Tombstone,
    };
    use crate::nodes::{ConsiderationLevel, ModelNode, NodeDetails, QuestionNode, TaxonNode};

    fn details(id: &str) -> NodeDetails {
        NodeDetails {
            id: id.to_string(),
            icon: None,
            name: format!("Name of {}", id),
            short_name: None,
            description: format!("Description of {}", id),
            short_description: None,
            examples: None,
            sources: None,
            consideration_level: ConsiderationLevel::Core,
        }
    }

    fn node(id: &str, kind: NodeKind, parent: &str) -> ModelNode {
        let taxon = TaxonNode {
            parent_id: parent.to_string(),
            details: details(id),
        };
        match kind {
            NodeKind::EssentialElement => ModelNode::EssentialElement(details(id)),
            NodeKind::Category => ModelNode::Category(taxon),
            NodeKind::Subcategory => ModelNode::Subcategory(taxon),
            NodeKind::Attribute => ModelNode::Attribute(taxon),
            NodeKind::Feature => ModelNode::Feature(taxon),
            NodeKind::Kpi => ModelNode::Kpi(taxon),
            NodeKind::Question => ModelNode::Question(QuestionNode {
                id: id.to_string(),
                parent_id: parent.to_string(),
                text: format!("Text of {}", id),
                description: format!("Description of {}", id),
            }),
        }
    }

    fn package(id: &str) -> Package {
        Package {
            id: id.to_string(),
            label: format!("Label of {}", id),
            version: "1.0.0".to_string(),
        }
    }

    fn well_formed_model() -> ModelDefinition {
        ModelDefinition {
            nodes: vec![
                node("a", NodeKind::EssentialElement, ""),
                node("b", NodeKind::Category, "a"),
                node("c", NodeKind::Subcategory, "b"),
                node("a-attr", NodeKind::Attribute, "a"),
                node("a-feat", NodeKind::Feature, "a-attr"),
                node("a-kpi", NodeKind::Kpi, "a-feat"),
                node("a-question", NodeKind::Question, "a"),
            ],
        }
    }

    #[test]
    fn test_hierarchy_of_well_formed_model_is_clean() {
        assert_eq!(validate_hierarchy(&well_formed_model()), vec![]);
    }

    #[test]
    fn test_hierarchy_reports_disallowed_parent_kind() {
        let mut model = well_formed_model();
        model.nodes.push(node("t", NodeKind::Category, "b"));
        assert_eq!(
            validate_hierarchy(&model),
            vec![ValidationError::ParentType {
                node_id: "t".to_string(),
                parent_kind: NodeKind::Category,
            }]
        );
    }

    #[test]
    fn test_hierarchy_reports_unresolvable_parent() {
        let model = ModelDefinition {
            nodes: vec![node("b", NodeKind::Category, "missing")],
        };
        assert_eq!(
            validate_hierarchy(&model),
            vec![ValidationError::ParentReference {
                node_id: "b".to_string(),
                parent_id: "missing".to_string(),
            }]
        );
    }

    #[test]
    fn test_hierarchy_blames_the_ancestor_not_the_descendants() {
        // "b" has a bad parent; "c" under "b" is itself fine.
        let model = ModelDefinition {
            nodes: vec![
                node("a", NodeKind::EssentialElement, ""),
                node("b", NodeKind::Category, "ghost"),
                node("c", NodeKind::Subcategory, "b"),
            ],
        };
        assert_eq!(
            validate_hierarchy(&model),
            vec![ValidationError::ParentReference {
                node_id: "b".to_string(),
                parent_id: "ghost".to_string(),
            }]
        );
    }

    #[test]
    fn test_relations_resolve() {
        let models = vec![BaseModel {
            package: package("m"),
            definition: ModelDefinition { nodes: vec![] },
        }];
        let profiles = vec![ModelProfile {
            package: package("p"),
            model_id: "m".to_string(),
            layer: LayerDefinition { nodes: vec![] },
        }];
        let slices = vec![ThematicSlice {
            package: package("s"),
            model_id: "other".to_string(),
            selection: SliceDefinition { nodes: vec![] },
        }];
        assert_eq!(
            validate_relations(&models, &profiles, &slices),
            vec![ValidationError::ModelReference {
                used_by: "s".to_string(),
                model_id: "other".to_string(),
            }]
        );
    }

    #[test]
    fn test_unique_ids_yields_one_error_per_extra_occurrence() {
        let errors = validate_unique_ids(["a", "a", "a"]);
        assert_eq!(
            errors,
            vec![
                ValidationError::IdConflict {
                    id: "a".to_string()
                },
                ValidationError::IdConflict {
                    id: "a".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_profile_tombstone_orphans_children() {
        let model = ModelDefinition {
            nodes: vec![
                node("a", NodeKind::EssentialElement, ""),
                node("b", NodeKind::Category, "a"),
            ],
        };
        let profile = ModelProfile {
            package: package("p"),
            model_id: "x".to_string(),
            layer: LayerDefinition {
                nodes: vec![LayerEntry::Tombstone(Tombstone {
                    id: "a".to_string(),
                })],
            },
        };
        assert_eq!(
            validate_profile(&model, &profile),
            vec![ValidationError::ParentReference {
                node_id: "b".to_string(),
                parent_id: "a".to_string(),
            }]
        );
    }

    #[test]
    fn test_slice_that_cuts_parents_is_reported() {
        let model = well_formed_model();
        let slice = ThematicSlice {
            package: package("s"),
            model_id: "m".to_string(),
            selection: SliceDefinition {
                nodes: vec![NodeRef {
                    node_id: "c".to_string(),
                }],
            },
        };
        assert_eq!(
            validate_slice(&model, &slice),
            vec![ValidationError::ParentReference {
                node_id: "c".to_string(),
                parent_id: "b".to_string(),
            }]
        );
    }

    #[test]
    fn test_ensure_valid_passes_empty() {
        assert!(ensure_valid("model", vec![]).is_ok());
    }

    #[test]
    fn test_ensure_valid_carries_every_violation() {
        let errors = validate_unique_ids(["a", "a", "a"]);
        let group = ensure_valid("node ids", errors).unwrap_err();
        assert_eq!(group.errors.len(), 2);
        assert_eq!(
            group.to_string(),
            "node ids: \n- Duplicate id found: 'a'\n- Duplicate id found: 'a'"
        );
    }
}
