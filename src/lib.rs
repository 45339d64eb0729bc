//! # Strata - Layered Model Composition
//!
//! Strata turns untrusted, externally supplied model documents into
//! verified, internally consistent typed node graphs, overlays optional
//! profile layers onto a base model, filters by thematic slice membership,
//! and checks the result against a fixed parent/child type grammar.
//!
//! ## Overview
//!
//! A repository distributes three kinds of packages: base models (node
//! collections), profiles (overlays that add, replace or delete nodes) and
//! thematic slices (allow-lists restricting a model to a sub-topic).
//! Documents are parsed through hand-built converters that report every
//! failing field at once; parsed collections are then validated and
//! composed as pure functions over immutable data.
//!
//! ## Error disciplines
//!
//! Two deliberately disjoint kinds of failure:
//!
//! - **Parse errors** abort the whole document and surface as an
//!   [`report::ErrorGroup`] tree naming the full field path.
//! - **Validation errors** never abort: each validator returns the complete
//!   list of violations so an author sees every problem in one pass.
//!
//! ## Modules
//!
//! - [`nodes`] - node kinds, shared field sets and the parent/child grammar
//! - [`model`] - packaged models, profiles, slices and layer entries
//! - [`parse`] - converter primitives and document parsers
//! - [`compose`] - overlay and slice composition
//! - [`validate`] - hierarchy, relation and uniqueness validators
//! - [`report`] - aggregated error trees with deterministic rendering
//! - [`repository`] - sources that load and resolve repository documents
//! - [`formatters`] - terminal rendering of validation reports
//!
//! ## Example
//!
//! ```
//! use strata::compose::compose;
//! use strata::parse::parse_model;
//! use strata::validate::validate_hierarchy;
//!
//! let document = serde_json::json!({
//!     "nodes": [
//!         {
//!             "type": "essential-element",
//!             "id": "governance",
//!             "name": "Governance",
//!             "description": "How decisions are made.",
//!             "considerationLevel": "core"
//!         },
//!         {
//!             "type": "category",
//!             "id": "leadership",
//!             "parentId": "governance",
//!             "name": "Leadership",
//!             "description": "Who leads and how leadership changes.",
//!             "considerationLevel": "core"
//!         }
//!     ]
//! });
//!
//! let model = parse_model(&document).expect("document matches the schema");
//! assert!(validate_hierarchy(&model).is_empty());
//!
//! let composed = compose(&model, &[], &[]);
//! assert_eq!(composed.nodes.len(), 2);
//! ```

pub mod compose;
pub mod formatters;
pub mod model;
pub mod nodes;
pub mod parse;
pub mod report;
pub mod repository;
pub mod validate;
