//! Aggregated error trees for parse and validation failures.
//!
//! An [`ErrorGroup`] is a labelled tree: a context string plus a list of
//! children, each of which is either a leaf failure or another group. The
//! renderer is deterministic so reports can be diffed and asserted on.

use std::error::Error;
use std::fmt;

use crate::validate::ValidationError;

/// A single child of an [`ErrorGroup`].
#[derive(Debug, Clone, PartialEq)]
pub enum GroupedError {
    /// A plain failure message, e.g. from a field converter.
    Message(String),
    /// A semantic violation from one of the validators.
    Validation(ValidationError),
    /// A nested group, e.g. a failing sub-document.
    Group(ErrorGroup),
}

impl fmt::Display for GroupedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupedError::Message(message) => write!(f, "{}", message),
            GroupedError::Validation(error) => write!(f, "{}", error),
            GroupedError::Group(group) => write!(f, "{}", group),
        }
    }
}

impl From<ErrorGroup> for GroupedError {
    fn from(group: ErrorGroup) -> Self {
        GroupedError::Group(group)
    }
}

impl From<ValidationError> for GroupedError {
    fn from(error: ValidationError) -> Self {
        GroupedError::Validation(error)
    }
}

/// A labelled collection of failures.
///
/// Construct with [`ErrorGroup::from_errors`] when the child list may be
/// empty: an empty list yields `None`, the explicit "no error" outcome, so
/// call sites can test for absence directly instead of inspecting a
/// populated-but-empty node.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorGroup {
    pub context: String,
    pub errors: Vec<GroupedError>,
}

impl ErrorGroup {
    pub fn new(context: impl Into<String>, errors: Vec<GroupedError>) -> Self {
        Self {
            context: context.into(),
            errors,
        }
    }

    /// A group holding a single message leaf.
    pub fn leaf(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(context, vec![GroupedError::Message(message.into())])
    }

    /// Build a group from collected errors, or `None` when there are none.
    pub fn from_errors(context: impl Into<String>, errors: Vec<GroupedError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self::new(context, errors))
        }
    }

    /// Flatten this tree into one message per leaf, in rendering order.
    pub fn leaf_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        self.collect_leaves(&mut messages);
        messages
    }

    fn collect_leaves(&self, into: &mut Vec<String>) {
        for error in &self.errors {
            match error {
                GroupedError::Group(group) => group.collect_leaves(into),
                leaf => into.push(leaf.to_string()),
            }
        }
    }

    // A group with exactly one non-group child renders inline as
    // `context: leaf`; any other shape renders as an indented, bulleted
    // list with nested groups one level deeper.
    fn render(&self, level: usize) -> String {
        if let [leaf] = self.errors.as_slice() {
            if !matches!(leaf, GroupedError::Group(_)) {
                return format!("{}: {}", self.context, leaf);
            }
        }
        let depth = " ".repeat(level);
        let rendered: Vec<String> = self
            .errors
            .iter()
            .map(|error| match error {
                GroupedError::Group(group) => group.render(level + 1),
                leaf => leaf.to_string(),
            })
            .collect();
        format!(
            "{}: \n{}- {}",
            self.context,
            depth,
            rendered.join(&format!("\n{}- ", depth))
        )
    }
}

impl fmt::Display for ErrorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(0))
    }
}

impl Error for ErrorGroup {}
