//! Subcommand implementations for the strata binary.

pub mod compose;
pub mod export;
pub mod lint;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use strata::parse::parse_repository;
use strata::repository::{parse_document_text, FileRepository};

/// Open the repository named on the command line: a document path, or `-`
/// for a document piped on stdin.
pub fn open_repository(root: &str) -> Result<FileRepository> {
    if root == "-" {
        if atty::is(atty::Stream::Stdin) {
            bail!("Refusing to read a document from an interactive terminal; pipe a document or pass a path");
        }
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read document from stdin")?;
        let value = parse_document_text(&content)?;
        let parsed = parse_repository(&value)
            .map_err(anyhow::Error::from)
            .context("Invalid repository document on stdin")?;
        Ok(FileRepository::from_root(parsed, PathBuf::from(".")))
    } else {
        FileRepository::open(Path::new(root))
    }
}
