//! Reusable fallible converters over untyped JSON values.
//!
//! Converters take a borrowed [`serde_json::Value`] and either produce a
//! typed value or fail with a [`GroupedError`]. Compound converters label
//! failures with the field or context they occurred in, so the rendered
//! error names the path from the document root down to the offending field.

use std::fmt;

use serde_json::{Map, Value};

use crate::model::Package;
use crate::report::{ErrorGroup, GroupedError};

/// The runtime kind of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a value by its runtime kind.
pub fn kind_of(value: &Value) -> ValueKind {
    match value {
        Value::Null => ValueKind::Null,
        Value::Bool(_) => ValueKind::Bool,
        Value::Number(_) => ValueKind::Number,
        Value::String(_) => ValueKind::String,
        Value::Array(_) => ValueKind::Array,
        Value::Object(_) => ValueKind::Object,
    }
}

/// Accept a value iff its runtime kind is in the allowed set.
pub fn parse_type<'a>(value: &'a Value, allowed: &[ValueKind]) -> Result<&'a Value, GroupedError> {
    let found = kind_of(value);
    if allowed.contains(&found) {
        Ok(value)
    } else {
        let legal: Vec<String> = allowed.iter().map(|kind| format!("'{}'", kind)).collect();
        Err(GroupedError::Message(format!(
            "type '{}' is not compatible with {}",
            found,
            legal.join(" or ")
        )))
    }
}

/// Accept a string value.
pub fn parse_string(value: &Value) -> Result<String, GroupedError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(GroupedError::Message(format!(
            "type '{}' is not compatible with 'string'",
            kind_of(other)
        ))),
    }
}

/// Accept an object value, carried verbatim.
pub fn parse_object_value(value: &Value) -> Result<Value, GroupedError> {
    parse_type(value, &[ValueKind::Object]).map(Value::clone)
}

/// Accept a value iff it is a member of a fixed literal set.
pub fn parse_enumeration(value: &Value, literals: &[&str]) -> Result<String, GroupedError> {
    if let Value::String(s) = value {
        if literals.contains(&s.as_str()) {
            return Ok(s.clone());
        }
    }
    let legal: Vec<String> = literals.iter().map(|l| format!("\"{}\"", l)).collect();
    Err(GroupedError::Message(format!(
        "value {} is not in [{}]",
        value,
        legal.join(", ")
    )))
}

/// Require an ordered sequence and convert each element.
///
/// Stops at the first failing element and propagates its error unchanged,
/// in contrast with the collect-all policy of [`FieldMap`].
pub fn parse_sequence<T, E>(
    value: &Value,
    convert: impl Fn(&Value) -> Result<T, E>,
) -> Result<Vec<T>, GroupedError>
where
    E: Into<GroupedError>,
{
    match value {
        Value::Array(items) => {
            let mut parsed = Vec::with_capacity(items.len());
            for item in items {
                parsed.push(convert(item).map_err(Into::into)?);
            }
            Ok(parsed)
        }
        other => Err(GroupedError::Message(format!(
            "value is not an array (found {})",
            kind_of(other)
        ))),
    }
}

/// Field-by-field converter for one JSON object.
///
/// Every `required`/`optional` call runs its converter independently and
/// records the failure, labelled with the field name; [`FieldMap::finish`]
/// then either succeeds or reports every failing field in one aggregated
/// error. Call sites thread each field's own `Result` into the constructed
/// value after `finish`, so a success path never sees a missing field.
pub struct FieldMap<'a> {
    map: &'a Map<String, Value>,
    context: String,
    errors: Vec<GroupedError>,
}

impl<'a> FieldMap<'a> {
    /// Wrap an object value; any other kind fails immediately.
    pub fn new(value: &'a Value, context: impl Into<String>) -> Result<Self, ErrorGroup> {
        let context = context.into();
        match value {
            Value::Object(map) => Ok(Self {
                map,
                context,
                errors: Vec::new(),
            }),
            other => Err(ErrorGroup::leaf(
                context,
                format!("value is not an object (found {})", kind_of(other)),
            )),
        }
    }

    /// Convert a required field; a missing key is a failure.
    pub fn required<T, E>(
        &mut self,
        key: &str,
        convert: impl FnOnce(&Value) -> Result<T, E>,
    ) -> Result<T, ErrorGroup>
    where
        E: Into<GroupedError>,
    {
        let result = match self.map.get(key) {
            Some(value) => convert(value).map_err(Into::into),
            None => Err(GroupedError::Message("required field is missing".to_string())),
        };
        self.record(key, result)
    }

    /// Convert an optional field; an absent key passes through unchanged.
    ///
    /// An explicit `null` is not an absent key and fails the converter.
    pub fn optional<T, E>(
        &mut self,
        key: &str,
        convert: impl FnOnce(&Value) -> Result<T, E>,
    ) -> Result<Option<T>, ErrorGroup>
    where
        E: Into<GroupedError>,
    {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => {
                let result = convert(value).map(Some).map_err(Into::into);
                self.record(key, result)
            }
        }
    }

    fn record<T>(&mut self, key: &str, result: Result<T, GroupedError>) -> Result<T, ErrorGroup> {
        result.map_err(|error| {
            let labelled = ErrorGroup::new(key, vec![error]);
            self.errors.push(GroupedError::Group(labelled.clone()));
            labelled
        })
    }

    /// Succeed iff no field converter failed; otherwise one aggregated
    /// error naming each failing field.
    pub fn finish(self) -> Result<(), ErrorGroup> {
        match ErrorGroup::from_errors(self.context, self.errors) {
            None => Ok(()),
            Some(group) => Err(group),
        }
    }
}

/// Either a lazy pointer to an external document or an inline payload.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum MaybeRef<T> {
    Reference {
        #[serde(rename = "ref")]
        href: String,
    },
    Inline(T),
}

/// As [`MaybeRef`], with the owning model's id available on both branches.
///
/// The reference branch carries the foreign key explicitly so callers can
/// filter by model without resolving the pointer; the inline branch's
/// payload holds its own `model_id`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum RelatedRef<T> {
    Reference {
        #[serde(rename = "ref")]
        href: String,
        #[serde(rename = "modelId")]
        model_id: String,
    },
    Inline(T),
}

/// Accept either `{ref}` or an inline payload matching `inline`.
pub fn parse_ref_or<T>(
    value: &Value,
    inline: impl FnOnce(&Value) -> Result<T, ErrorGroup>,
) -> Result<MaybeRef<T>, ErrorGroup> {
    match value {
        Value::Object(map) if map.contains_key("ref") => {
            let mut fields = FieldMap::new(value, "reference")?;
            let href = fields.required("ref", parse_string);
            fields.finish()?;
            Ok(MaybeRef::Reference { href: href? })
        }
        Value::Object(_) => Ok(MaybeRef::Inline(inline(value)?)),
        other => Err(ErrorGroup::leaf(
            "reference",
            format!("value is not data or a reference (found {})", kind_of(other)),
        )),
    }
}

/// Accept either `{ref, modelId}` or an inline payload matching `inline`.
pub fn parse_related_ref_or<T>(
    value: &Value,
    inline: impl FnOnce(&Value) -> Result<T, ErrorGroup>,
) -> Result<RelatedRef<T>, ErrorGroup> {
    match value {
        Value::Object(map) if map.contains_key("ref") => {
            let mut fields = FieldMap::new(value, "reference")?;
            let href = fields.required("ref", parse_string);
            let model_id = fields.required("modelId", parse_string);
            fields.finish()?;
            Ok(RelatedRef::Reference {
                href: href?,
                model_id: model_id?,
            })
        }
        Value::Object(_) => Ok(RelatedRef::Inline(inline(value)?)),
        other => Err(ErrorGroup::leaf(
            "reference",
            format!("value is not data or a related reference (found {})", kind_of(other)),
        )),
    }
}

/// Parse the shared [`Package`] fields, then the format-specific payload.
///
/// Package field failures are aggregated among themselves and reported
/// before the payload is attempted.
pub fn parse_package<T>(
    value: &Value,
    payload: impl FnOnce(&Value) -> Result<T, ErrorGroup>,
) -> Result<(Package, T), ErrorGroup> {
    let mut fields = FieldMap::new(value, "package")?;
    let id = fields.required("id", parse_string);
    let label = fields.required("label", parse_string);
    let version = fields.required("version", parse_string);
    fields.finish()?;
    let package = Package {
        id: id?,
        label: label?,
        version: version?,
    };
    let payload = payload(value)?;
    Ok((package, payload))
}
