use anyhow::Result;
use serde::Serialize;

use crate::model::{BaseModel, ModelProfile, ThematicSlice};
use crate::parse::{MaybeRef, RelatedRef};

/// Identity of a repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryInfo {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A parsed repository root document.
///
/// Each collection entry is either an inline payload or a `{ref}` pointer
/// to an external document, resolved lazily by the source that owns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryRoot {
    #[serde(flatten)]
    pub info: RepositoryInfo,
    #[serde(rename = "baseModels")]
    pub base_models: Vec<MaybeRef<BaseModel>>,
    pub profiles: Vec<RelatedRef<ModelProfile>>,
    #[serde(rename = "thematicSlices")]
    pub thematic_slices: Vec<RelatedRef<ThematicSlice>>,
}

/// A provider of packaged models, profiles and slices.
///
/// Implementations are synchronous and return freshly materialized values;
/// any fetching or caching strategy lives behind this seam.
pub trait RepositorySource {
    /// The repository's identity.
    fn info(&self) -> &RepositoryInfo;

    /// All base models, fully resolved.
    fn base_models(&self) -> Result<Vec<BaseModel>>;

    /// Profiles, optionally restricted to one base model.
    fn profiles(&self, model_id: Option<&str>) -> Result<Vec<ModelProfile>>;

    /// Thematic slices, optionally restricted to one base model.
    fn thematic_slices(&self, model_id: Option<&str>) -> Result<Vec<ThematicSlice>>;
}
