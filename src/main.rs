//! CLI entry point and command dispatch for strata.

mod cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "strata")]
#[command(version)]
#[command(about = "Layered model composition and validation", long_about = None)]
struct Cli {
    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a repository document and everything it references
    Lint {
        /// Path to the repository root document, or '-' for stdin
        root: String,
        /// Emit the violation list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compose a base model with profiles and slices and print the result
    Compose {
        /// Path to the repository root document, or '-' for stdin
        root: String,
        /// Id of the base model to compose
        #[arg(long)]
        model: String,
        /// Profile id to overlay, applied in the given order (can be specified multiple times)
        #[arg(long)]
        profile: Vec<String>,
        /// Thematic slice id to filter by (can be specified multiple times)
        #[arg(long)]
        slice: Vec<String>,
        /// Output format (json, yaml)
        #[arg(long, default_value = "json")]
        format: String,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Emit the composed model even when it fails validation
        #[arg(long)]
        force: bool,
    },
    /// Split an inline repository into per-package files with references
    Export {
        /// Path to the repository root document, or '-' for stdin
        root: String,
        /// Directory to write the exported repository to
        #[arg(long)]
        out: PathBuf,
        /// Overwrite an existing output directory
        #[arg(long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lint { root, json } => {
            let clean = cmd::lint::cmd_lint(&root, json, cli.quiet)?;
            if !clean {
                process::exit(1);
            }
        }
        Commands::Compose {
            root,
            model,
            profile,
            slice,
            format,
            output,
            force,
        } => {
            cmd::compose::cmd_compose(
                &root,
                &model,
                &profile,
                &slice,
                &format,
                output.as_deref(),
                force,
                cli.quiet,
            )?;
        }
        Commands::Export { root, out, force } => {
            cmd::export::cmd_export(&root, &out, force, cli.quiet)?;
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "strata", &mut io::stdout());
        }
        Commands::Version => {
            const GIT_SHA: &str = env!("GIT_SHA");
            const BUILD_DATE: &str = env!("BUILD_DATE");
            println!("strata {}", env!("CARGO_PKG_VERSION"));
            println!("commit: {}", GIT_SHA);
            println!("built: {}", BUILD_DATE);
        }
    }

    Ok(())
}
