//! Conversion of untrusted structured payloads into typed values.
//!
//! [`primitives`] holds the reusable fallible converters; [`documents`]
//! builds the format-specific parsers for nodes, models, profiles, slices
//! and repository roots on top of them.
//!
//! Two failure policies meet here, deliberately asymmetric: object fields
//! are converted independently and every failing field is reported at once,
//! while sequences stop at the first bad element. A malformed document
//! therefore names all of its wrong fields in one report without flooding it
//! with one error per element of a broken list.

pub mod documents;
pub mod primitives;

pub use documents::{
    parse_base_model, parse_layer, parse_layer_entry, parse_model, parse_node, parse_node_ref,
    parse_profile, parse_repository, parse_slice,
};
pub use primitives::{
    kind_of, parse_enumeration, parse_object_value, parse_package, parse_ref_or,
    parse_related_ref_or, parse_sequence, parse_string, parse_type, FieldMap, MaybeRef, RelatedRef,
    ValueKind,
};
