//! Markeval CLI - DOCX table markup placement evaluator
//!
//! Compares a ground-truth DOCX against an evaluated DOCX and reports how
//! many `cell_<n>` markup tokens sit at the correct position inside table
//! cells.

mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use markeval_backend::evaluate_documents;
use report::{format_report, ReportFormat};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "markeval",
    version,
    about = "Evaluate DOCX markup placement within tables"
)]
struct Cli {
    /// Path to the ground-truth .docx
    #[arg(long = "gt", value_name = "FILE")]
    gt: PathBuf,

    /// Path to the evaluated .docx
    #[arg(long = "eval", value_name = "FILE")]
    eval: PathBuf,

    /// Report format
    #[arg(long, value_enum)]
    format: ReportFormat,

    /// Output file path
    #[arg(long, value_name = "FILE")]
    out: PathBuf,

    /// Include per-cell detail and echo the full result to stdout
    #[arg(long)]
    debug: bool,
}

/// Check that a path points at an existing `.docx` file.
fn validate_input(path: &Path, flag: &str) -> Result<()> {
    let is_docx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
    if !path.exists() || !is_docx {
        bail!("invalid --{flag} path: {}", path.display());
    }
    Ok(())
}

/// Check the output path extension and probe writability.
fn validate_output(out: &Path) -> Result<()> {
    let known = out
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ReportFormat::from_extension);
    if known.is_none() {
        bail!("invalid --out extension: {}", out.display());
    }

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    fs::write(out, "").with_context(|| format!("cannot write to --out path: {}", out.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    validate_input(&cli.gt, "gt")?;
    validate_input(&cli.eval, "eval")?;
    validate_output(&cli.out)?;

    let result = evaluate_documents(&cli.gt, &cli.eval, cli.debug)?;

    let report_text = format_report(&result, cli.format)?;
    fs::write(&cli.out, &report_text)
        .with_context(|| format!("writing report to {}", cli.out.display()))?;

    if cli.debug {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    eprintln!(
        "{} {} correct, {} missed, {} misplaced ({} ground-truth tokens) -> {}",
        "done:".green().bold(),
        result.correct,
        result.missed,
        result.misplaced,
        result.gt_total,
        cli.out.display()
    );

    Ok(())
}
