//! Compose command: overlay profiles onto a base model, filter by slices,
//! and print the resulting model in wire format.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;

use strata::compose::compose;
use strata::model::{LayerDefinition, SliceDefinition};
use strata::repository::RepositorySource;
use strata::validate::{ensure_valid, validate_hierarchy};

/// Execute the compose command.
#[allow(clippy::too_many_arguments)]
pub fn cmd_compose(
    root: &str,
    model_id: &str,
    profile_ids: &[String],
    slice_ids: &[String],
    format: &str,
    output: Option<&Path>,
    force: bool,
    quiet: bool,
) -> Result<()> {
    let source = super::open_repository(root)?;
    let models = source.base_models()?;
    let model = models
        .iter()
        .find(|m| m.package.id == model_id)
        .ok_or_else(|| anyhow!("Base model '{}' not found in repository", model_id))?;

    let available_profiles = source.profiles(Some(model_id))?;
    let available_slices = source.thematic_slices(Some(model_id))?;

    // Overlay order is the order the ids were given on the command line.
    let layers: Vec<&LayerDefinition> = profile_ids
        .iter()
        .map(|id| {
            available_profiles
                .iter()
                .find(|p| p.package.id == *id)
                .map(|p| &p.layer)
                .ok_or_else(|| anyhow!("Profile '{}' not found for model '{}'", id, model_id))
        })
        .collect::<Result<_>>()?;
    let selections: Vec<&SliceDefinition> = slice_ids
        .iter()
        .map(|id| {
            available_slices
                .iter()
                .find(|s| s.package.id == *id)
                .map(|s| &s.selection)
                .ok_or_else(|| anyhow!("Thematic slice '{}' not found for model '{}'", id, model_id))
        })
        .collect::<Result<_>>()?;

    let composed = compose(&model.definition, &layers, &selections);

    if let Err(report) = ensure_valid("composed model", validate_hierarchy(&composed)) {
        if force {
            if !quiet {
                eprintln!("{} {}", "Warning:".yellow(), report);
            }
        } else {
            eprintln!("{}", report);
            bail!("Composed model is not structurally valid (use --force to emit it anyway)");
        }
    }

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&composed)?,
        "yaml" => serde_yaml::to_string(&composed)?,
        other => bail!("Unknown output format '{}' (expected json or yaml)", other),
    };

    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            writeln!(file, "{}", rendered).context("Failed to write composed model")?;
            if !quiet {
                println!(
                    "{} wrote composed model '{}' to {}",
                    "✓".green(),
                    model_id,
                    path.display()
                );
            }
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
