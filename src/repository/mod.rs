//! Repository sources: where packaged models, profiles and slices come from.
//!
//! The engine itself is pure; sources are the thin I/O layer in front of it.
//! Every source parses documents through [`crate::parse`] before handing
//! them out, so callers only ever see verified data.

mod file;
mod in_memory;
mod source;

pub use file::{load_document, parse_document_text, FileRepository};
pub use in_memory::InMemoryRepository;
pub use source::{RepositoryInfo, RepositoryRoot, RepositorySource};
