//! Lint command: validate a repository document and everything it
//! references.

use anyhow::Result;
use serde_json::json;

use strata::formatters;
use strata::repository::RepositorySource;
use strata::validate::validate_collections;

/// Execute the lint command.
///
/// Parses the root document and every referenced document (any parse
/// failure aborts the run), then collects every semantic violation across
/// the full pipeline. Returns `true` when the repository is clean.
pub fn cmd_lint(root: &str, json: bool, quiet: bool) -> Result<bool> {
    let source = super::open_repository(root)?;
    let models = source.base_models()?;
    let profiles = source.profiles(None)?;
    let slices = source.thematic_slices(None)?;

    let stages = validate_collections(&models, &profiles, &slices);

    if json {
        let entries: Vec<serde_json::Value> = stages
            .iter()
            .map(|stage| {
                json!({
                    "stage": stage.context,
                    "problems": stage.leaf_messages(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if !stages.is_empty() {
        println!("{}", formatters::format_report(&stages));
    } else if !quiet {
        println!("{}", formatters::format_summary(0));
    }

    Ok(stages.is_empty())
}
