//! Output formatters for validation reports.
//!
//! Transforms the validators' error groups into terminal-friendly text. The
//! underlying tree rendering is deterministic (see [`crate::report`]); this
//! module only adds section marks and color.

use colored::Colorize;

use crate::report::ErrorGroup;

/// Total number of leaf problems across all stages.
pub fn problem_count(stages: &[ErrorGroup]) -> usize {
    stages.iter().map(|stage| stage.leaf_messages().len()).sum()
}

/// Format a full validation report, one section per failing stage.
pub fn format_report(stages: &[ErrorGroup]) -> String {
    let mut output = Vec::new();
    for stage in stages {
        let rendered = stage.to_string();
        let mut lines = rendered.lines();
        if let Some(first) = lines.next() {
            output.push(format!("{} {}", "✗".red(), first.bold()));
        }
        for line in lines {
            output.push(format!("  {}", line));
        }
        output.push(String::new());
    }
    output.push(format_summary(problem_count(stages)));
    output.join("\n")
}

/// One-line summary of a validation run.
pub fn format_summary(problems: usize) -> String {
    match problems {
        0 => format!("{} no problems found", "✓".green()),
        1 => format!("{} 1 problem found", "✗".red()),
        n => format!("{} {} problems found", "✗".red(), n),
    }
}
