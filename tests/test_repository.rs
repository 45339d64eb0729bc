//! File-backed and in-memory repository sources.

mod common;

use std::fs;

use common::{base_model, mock_node_value, profile, sample_model_nodes, slice};
use serde_json::json;
use strata::nodes::NodeKind;
use strata::repository::{FileRepository, InMemoryRepository, RepositoryInfo, RepositorySource};
use tempfile::TempDir;

fn repo_info(id: &str) -> RepositoryInfo {
    RepositoryInfo {
        id: id.to_string(),
        name: format!("Name of {}", id),
        description: None,
        url: None,
    }
}

#[test]
fn test_file_repository_resolves_relative_refs() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("models")).unwrap();

    let model = json!({
        "id": "m",
        "label": "Model",
        "version": "1.0.0",
        "nodes": [
            mock_node_value("a", NodeKind::EssentialElement, ""),
            mock_node_value("b", NodeKind::Category, "a"),
        ],
    });
    fs::write(
        tmp.path().join("models/m.json"),
        serde_json::to_string_pretty(&model).unwrap(),
    )
    .unwrap();

    let root = json!({
        "id": "repo",
        "name": "Repo",
        "baseModels": [{"ref": "models/m.json"}],
        "profiles": [],
        "thematicSlices": [],
    });
    let root_path = tmp.path().join("root.json");
    fs::write(&root_path, serde_json::to_string_pretty(&root).unwrap()).unwrap();

    let source = FileRepository::open(&root_path).unwrap();
    assert_eq!(source.info().id, "repo");
    let models = source.base_models().unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].package.id, "m");
    assert_eq!(models[0].definition.nodes.len(), 2);
}

#[test]
fn test_file_repository_reads_yaml_documents() {
    let tmp = TempDir::new().unwrap();

    let profile_yaml = "\
id: p
label: Profile
version: 1.0.0
modelId: m
nodes:
  - type: nothing
    id: b
";
    fs::write(tmp.path().join("p.yaml"), profile_yaml).unwrap();

    let root = json!({
        "id": "repo",
        "name": "Repo",
        "baseModels": [],
        "profiles": [{"ref": "p.yaml", "modelId": "m"}],
        "thematicSlices": [],
    });
    let root_path = tmp.path().join("root.json");
    fs::write(&root_path, serde_json::to_string_pretty(&root).unwrap()).unwrap();

    let source = FileRepository::open(&root_path).unwrap();
    let profiles = source.profiles(None).unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].package.id, "p");
    assert_eq!(profiles[0].layer.nodes.len(), 1);
}

#[test]
fn test_file_repository_filters_refs_without_loading() {
    // The ref target for the other model does not exist on disk; filtering
    // by model id must skip it without trying to load.
    let tmp = TempDir::new().unwrap();

    let inline_profile = json!({
        "id": "p1",
        "label": "Profile 1",
        "version": "1.0.0",
        "modelId": "m",
        "nodes": [],
    });
    let root = json!({
        "id": "repo",
        "name": "Repo",
        "baseModels": [],
        "profiles": [
            inline_profile,
            {"ref": "missing.json", "modelId": "other"},
        ],
        "thematicSlices": [],
    });
    let root_path = tmp.path().join("root.json");
    fs::write(&root_path, serde_json::to_string_pretty(&root).unwrap()).unwrap();

    let source = FileRepository::open(&root_path).unwrap();
    let profiles = source.profiles(Some("m")).unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].package.id, "p1");

    assert!(source.profiles(Some("other")).is_err());
}

#[test]
fn test_file_repository_error_names_the_bad_document() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.json"), r#"{"id": 7}"#).unwrap();

    let root = json!({
        "id": "repo",
        "name": "Repo",
        "baseModels": [{"ref": "broken.json"}],
        "profiles": [],
        "thematicSlices": [],
    });
    let root_path = tmp.path().join("root.json");
    fs::write(&root_path, serde_json::to_string_pretty(&root).unwrap()).unwrap();

    let source = FileRepository::open(&root_path).unwrap();
    let error = source.base_models().unwrap_err();
    assert!(format!("{:#}", error).contains("broken.json"));
}

#[test]
fn test_file_repository_rejects_remote_refs() {
    let tmp = TempDir::new().unwrap();
    let root = json!({
        "id": "repo",
        "name": "Repo",
        "baseModels": [{"ref": "https://example.org/m.json"}],
        "profiles": [],
        "thematicSlices": [],
    });
    let root_path = tmp.path().join("root.json");
    fs::write(&root_path, serde_json::to_string_pretty(&root).unwrap()).unwrap();

    let source = FileRepository::open(&root_path).unwrap();
    let error = source.base_models().unwrap_err();
    assert!(error.to_string().contains("Remote reference"));
}

#[test]
fn test_in_memory_repository_filters_by_model() {
    let source = InMemoryRepository::new(
        repo_info("repo"),
        vec![base_model("m", sample_model_nodes())],
        vec![profile("p1", "m", vec![]), profile("p2", "other", vec![])],
        vec![slice("s1", "m", &["a"])],
    );
    assert_eq!(source.profiles(None).unwrap().len(), 2);
    let for_m = source.profiles(Some("m")).unwrap();
    assert_eq!(for_m.len(), 1);
    assert_eq!(for_m[0].package.id, "p1");
    assert_eq!(source.thematic_slices(Some("other")).unwrap().len(), 0);
}
