use anyhow::Result;

use crate::model::{BaseModel, ModelProfile, ThematicSlice};

use super::source::{RepositoryInfo, RepositorySource};

/// In-memory implementation of [`RepositorySource`] for tests and embedded
/// use: everything is pre-populated, nothing is resolved lazily.
pub struct InMemoryRepository {
    info: RepositoryInfo,
    models: Vec<BaseModel>,
    profiles: Vec<ModelProfile>,
    slices: Vec<ThematicSlice>,
}

impl InMemoryRepository {
    pub fn new(
        info: RepositoryInfo,
        models: Vec<BaseModel>,
        profiles: Vec<ModelProfile>,
        slices: Vec<ThematicSlice>,
    ) -> Self {
        Self {
            info,
            models,
            profiles,
            slices,
        }
    }
}

impl RepositorySource for InMemoryRepository {
    fn info(&self) -> &RepositoryInfo {
        &self.info
    }

    fn base_models(&self) -> Result<Vec<BaseModel>> {
        Ok(self.models.clone())
    }

    fn profiles(&self, model_id: Option<&str>) -> Result<Vec<ModelProfile>> {
        Ok(self
            .profiles
            .iter()
            .filter(|p| model_id.map_or(true, |id| p.model_id == id))
            .cloned()
            .collect())
    }

    fn thematic_slices(&self, model_id: Option<&str>) -> Result<Vec<ThematicSlice>> {
        Ok(self
            .slices
            .iter()
            .filter(|s| model_id.map_or(true, |id| s.model_id == id))
            .cloned()
            .collect())
    }
}
