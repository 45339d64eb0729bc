//! Export command: split an inline repository into per-package files plus a
//! root document holding references.
//!
//! The inverse of what a lazy-loading source does on read: every model,
//! profile and slice lands in its own JSON file and the exported root
//! points at them with `{ref}` entries, profiles and slices keeping their
//! `modelId` next to the ref so consumers can filter without fetching.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde::Serialize;

use strata::formatters;
use strata::parse::{MaybeRef, RelatedRef};
use strata::repository::{RepositoryRoot, RepositorySource};
use strata::validate::validate_collections;

/// Execute the export command.
pub fn cmd_export(root: &str, out: &Path, force: bool, quiet: bool) -> Result<()> {
    let source = super::open_repository(root)?;
    let models = source.base_models()?;
    let profiles = source.profiles(None)?;
    let slices = source.thematic_slices(None)?;

    let stages = validate_collections(&models, &profiles, &slices);
    if !stages.is_empty() {
        eprintln!("{}", formatters::format_report(&stages));
        bail!("Repository has validation problems; refusing to export");
    }

    if out.exists() && !force {
        bail!(
            "Output directory {} already exists (use --force to overwrite)",
            out.display()
        );
    }

    write_packages(&out.join("models"), &models, |m| &m.package.id)?;
    write_packages(&out.join("profiles"), &profiles, |p| &p.package.id)?;
    write_packages(&out.join("slices"), &slices, |s| &s.package.id)?;

    let exported = RepositoryRoot {
        info: source.info().clone(),
        base_models: models
            .iter()
            .map(|m| MaybeRef::Reference {
                href: format!("models/{}.json", m.package.id),
            })
            .collect(),
        profiles: profiles
            .iter()
            .map(|p| RelatedRef::Reference {
                href: format!("profiles/{}.json", p.package.id),
                model_id: p.model_id.clone(),
            })
            .collect(),
        thematic_slices: slices
            .iter()
            .map(|s| RelatedRef::Reference {
                href: format!("slices/{}.json", s.package.id),
                model_id: s.model_id.clone(),
            })
            .collect(),
    };
    write_document(&out.join("root.json"), &exported)?;

    if !quiet {
        println!(
            "{} exported {} models, {} profiles, {} slices to {}",
            "✓".green(),
            models.len(),
            profiles.len(),
            slices.len(),
            out.display()
        );
    }
    Ok(())
}

fn write_packages<T: Serialize>(
    dir: &Path,
    items: &[T],
    id_of: impl Fn(&T) -> &str,
) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    for item in items {
        write_document(&dir.join(format!("{}.json", id_of(item))), item)?;
    }
    Ok(())
}

fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(document)?;
    fs::write(path, rendered + "\n")
        .with_context(|| format!("Failed to write document: {}", path.display()))
}
