use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::model::{BaseModel, ModelProfile, ThematicSlice};
use crate::parse::{
    parse_base_model, parse_profile, parse_repository, parse_slice, MaybeRef, RelatedRef,
};

use super::source::{RepositoryInfo, RepositoryRoot, RepositorySource};

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Parse document text as JSON, falling back to YAML.
pub fn parse_document_text(content: &str) -> Result<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(content) {
        return Ok(value);
    }
    serde_yaml::from_str::<Value>(content).context("Document is neither valid JSON nor valid YAML")
}

/// Read one structured document from disk, JSON by default and YAML for
/// `.yaml`/`.yml` files.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    let value = if is_yaml(path) {
        serde_yaml::from_str::<Value>(&content)
            .with_context(|| format!("Failed to parse YAML document: {}", path.display()))?
    } else {
        serde_json::from_str::<Value>(&content)
            .with_context(|| format!("Failed to parse JSON document: {}", path.display()))?
    };
    Ok(value)
}

/// File-backed implementation of [`RepositorySource`].
///
/// `{ref}` entries resolve as paths relative to the root document's
/// directory. Every resolved document goes through the schema parsers
/// before it is handed out; a document that does not parse fails the whole
/// call. Remote (URL) references are rejected: fetching belongs to a
/// network-capable source, not this one.
pub struct FileRepository {
    root_dir: PathBuf,
    root: RepositoryRoot,
}

impl FileRepository {
    /// Load and parse a repository root document.
    pub fn open(path: &Path) -> Result<Self> {
        let value = load_document(path)?;
        let root = parse_repository(&value)
            .map_err(anyhow::Error::from)
            .with_context(|| format!("Invalid repository document: {}", path.display()))?;
        let root_dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        Ok(Self { root_dir, root })
    }

    /// Wrap an already parsed root, resolving refs against `root_dir`.
    pub fn from_root(root: RepositoryRoot, root_dir: PathBuf) -> Self {
        Self { root_dir, root }
    }

    pub fn root(&self) -> &RepositoryRoot {
        &self.root
    }

    fn resolve(&self, href: &str) -> Result<PathBuf> {
        if href.contains("://") {
            bail!(
                "Remote reference '{}' cannot be resolved by a file repository",
                href
            );
        }
        Ok(self.root_dir.join(href))
    }

    fn load_referenced<T>(
        &self,
        href: &str,
        parse: impl FnOnce(&Value) -> Result<T, crate::report::ErrorGroup>,
        what: &str,
    ) -> Result<T> {
        let path = self.resolve(href)?;
        let value = load_document(&path)?;
        parse(&value)
            .map_err(anyhow::Error::from)
            .with_context(|| format!("Invalid {} document: {}", what, path.display()))
    }
}

impl RepositorySource for FileRepository {
    fn info(&self) -> &RepositoryInfo {
        &self.root.info
    }

    fn base_models(&self) -> Result<Vec<BaseModel>> {
        self.root
            .base_models
            .iter()
            .map(|entry| match entry {
                MaybeRef::Inline(model) => Ok(model.clone()),
                MaybeRef::Reference { href } => {
                    self.load_referenced(href, parse_base_model, "base model")
                }
            })
            .collect()
    }

    fn profiles(&self, model_id: Option<&str>) -> Result<Vec<ModelProfile>> {
        // References carry the foreign key, so filtering never forces a load.
        let mut profiles = Vec::new();
        for entry in &self.root.profiles {
            match entry {
                RelatedRef::Inline(profile) => {
                    if model_id.map_or(true, |id| profile.model_id == id) {
                        profiles.push(profile.clone());
                    }
                }
                RelatedRef::Reference {
                    href,
                    model_id: related,
                } => {
                    if model_id.map_or(true, |id| related == id) {
                        profiles.push(self.load_referenced(href, parse_profile, "profile")?);
                    }
                }
            }
        }
        Ok(profiles)
    }

    fn thematic_slices(&self, model_id: Option<&str>) -> Result<Vec<ThematicSlice>> {
        let mut slices = Vec::new();
        for entry in &self.root.thematic_slices {
            match entry {
                RelatedRef::Inline(slice) => {
                    if model_id.map_or(true, |id| slice.model_id == id) {
                        slices.push(slice.clone());
                    }
                }
                RelatedRef::Reference {
                    href,
                    model_id: related,
                } => {
                    if model_id.map_or(true, |id| related == id) {
                        slices.push(self.load_referenced(href, parse_slice, "thematic slice")?);
                    }
                }
            }
        }
        Ok(slices)
    }
}
