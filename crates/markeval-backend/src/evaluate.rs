//! End-to-end evaluation of two DOCX documents.

use crate::docx::DocxBackend;
use crate::traits::TableReader;
use markeval_core::{evaluate_tables, EvaluationResult, Result};
use std::path::Path;

/// Compare token placement between a ground-truth and an evaluated DOCX.
///
/// Loads both documents independently (each load is a pure extraction pass
/// with no shared state), resolves their tables and scores the evaluated
/// document against the ground truth. With `debug` set, the result carries
/// per-cell detail.
///
/// # Errors
///
/// Returns [`markeval_core::MarkevalError::DocumentRead`] if either file
/// cannot be parsed, with the offending path attached.
pub fn evaluate_documents(
    gt_path: &Path,
    eval_path: &Path,
    debug: bool,
) -> Result<EvaluationResult> {
    let backend = DocxBackend::new();
    let gt_tables = backend.read_tables(gt_path)?;
    let eval_tables = backend.read_tables(eval_path)?;

    log::debug!(
        "evaluating {} ({} tables) against {} ({} tables)",
        eval_path.display(),
        eval_tables.len(),
        gt_path.display(),
        gt_tables.len()
    );

    evaluate_tables(&gt_tables, &eval_tables, debug)
}
