//! Cell pairing and token-placement scoring.

use crate::align::map_positions;
use crate::error::{MarkevalError, Result};
use crate::table::{CellSpan, LogicalCell, TableGrid};
use crate::token::strip_tokens;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Scoring detail for one `(table, anchor)` cell key.
///
/// Constructed once during scoring and never mutated; held only long enough
/// to fold into the aggregate totals and optional debug output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEvaluation {
    /// Zero-based table index
    pub table: usize,
    /// Anchor row of the logical cell
    pub row: usize,
    /// Anchor column of the logical cell
    pub col: usize,
    /// Merged-region bounding rectangle
    pub span: CellSpan,
    /// Token offsets in the ground-truth base text, document order
    pub gt_positions: Vec<usize>,
    /// Token offsets in the evaluated base text, document order
    pub eval_positions: Vec<usize>,
    /// `gt_positions` translated into evaluated base-text coordinates
    #[serde(rename = "mapped_from_gt")]
    pub mapped_positions: Vec<usize>,
    /// Ground-truth tokens found at their mapped position
    pub correct: usize,
    /// Ground-truth tokens with no match
    pub missed: usize,
    /// Evaluated tokens with no corresponding ground-truth match
    pub misplaced: usize,
}

/// Aggregate evaluation outcome.
///
/// Invariants: `correct + missed == gt_total` and
/// `correct + misplaced == eval_total`. Built once per run, immutable
/// thereafter; this record is the sole handoff to report formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Total tokens in the ground-truth document
    pub gt_total: usize,
    /// Total tokens in the evaluated document
    pub eval_total: usize,
    /// Tokens found at their mapped position
    pub correct: usize,
    /// Evaluated tokens with no ground-truth counterpart
    pub misplaced: usize,
    /// Ground-truth tokens absent from the evaluated document
    pub missed: usize,
    /// Per-cell detail, populated in debug mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<CellEvaluation>>,
}

/// Score two documents given their resolved tables.
///
/// Convenience wrapper over [`evaluate_cells`] that resolves every table
/// grid into logical cells first.
pub fn evaluate_tables(
    gt_tables: &[TableGrid],
    eval_tables: &[TableGrid],
    debug: bool,
) -> Result<EvaluationResult> {
    let gt_cells: Vec<LogicalCell> = gt_tables.iter().flat_map(TableGrid::logical_cells).collect();
    let eval_cells: Vec<LogicalCell> = eval_tables
        .iter()
        .flat_map(TableGrid::logical_cells)
        .collect();

    log::debug!(
        "scoring {} ground-truth cells against {} evaluated cells ({} / {} tables)",
        gt_cells.len(),
        eval_cells.len(),
        gt_tables.len(),
        eval_tables.len()
    );

    evaluate_cells(&gt_cells, &eval_cells, debug)
}

/// Pair logical cells by `(table_index, anchor)` and tally token placement.
///
/// Every key present on either side is scored; a key missing on one side is
/// treated as empty text with zero tokens there, contributing only `missed`
/// or `misplaced` counts. Tables are paired purely by coordinate key: a
/// structural mismatch between the two documents degenerates into empty-side
/// pairings rather than being detected.
pub fn evaluate_cells(
    gt_cells: &[LogicalCell],
    eval_cells: &[LogicalCell],
    debug: bool,
) -> Result<EvaluationResult> {
    let key = |c: &LogicalCell| (c.table_index, c.anchor.0, c.anchor.1);
    let gt_index: BTreeMap<_, &LogicalCell> = gt_cells.iter().map(|c| (key(c), c)).collect();
    let eval_index: BTreeMap<_, &LogicalCell> = eval_cells.iter().map(|c| (key(c), c)).collect();

    let all_keys: BTreeSet<_> = gt_index.keys().chain(eval_index.keys()).copied().collect();

    let mut result = EvaluationResult {
        gt_total: 0,
        eval_total: 0,
        correct: 0,
        misplaced: 0,
        missed: 0,
        cells: debug.then(Vec::new),
    };

    for k in all_keys {
        let gt_cell = gt_index.get(&k).copied();
        let eval_cell = eval_index.get(&k).copied();
        let gt_text = gt_cell.map_or("", |c| c.text.as_str());
        let eval_text = eval_cell.map_or("", |c| c.text.as_str());

        let (gt_base, gt_positions) = strip_tokens(gt_text);
        let (eval_base, eval_positions) = strip_tokens(eval_text);
        let mapped_positions = map_positions(&gt_base, &eval_base, &gt_positions);

        let correct = count_correct(&mapped_positions, &eval_positions);
        let missed = gt_positions.len() - correct;
        let misplaced = eval_positions.len() - correct;

        result.gt_total += gt_positions.len();
        result.eval_total += eval_positions.len();
        result.correct += correct;
        result.missed += missed;
        result.misplaced += misplaced;

        if let Some(cells) = result.cells.as_mut() {
            let span = gt_cell
                .or(eval_cell)
                .map_or(
                    CellSpan {
                        row_start: 0,
                        col_start: 0,
                        row_end: 0,
                        col_end: 0,
                    },
                    |c| c.span,
                );
            cells.push(CellEvaluation {
                table: k.0,
                row: k.1,
                col: k.2,
                span,
                gt_positions,
                eval_positions,
                mapped_positions,
                correct,
                missed,
                misplaced,
            });
        }
    }

    verify_conservation(&result)?;
    Ok(result)
}

/// Count mapped positions present in the evaluated offset collection.
///
/// Each distinct offset value matches at most as many times as the evaluated
/// document holds tokens at that exact offset, so `correct` can never exceed
/// either side's token count.
fn count_correct(mapped_positions: &[usize], eval_positions: &[usize]) -> usize {
    let mut remaining: HashMap<usize, usize> = HashMap::new();
    for &p in eval_positions {
        *remaining.entry(p).or_insert(0) += 1;
    }

    let mut correct = 0;
    for p in mapped_positions {
        if let Some(count) = remaining.get_mut(p) {
            if *count > 0 {
                *count -= 1;
                correct += 1;
            }
        }
    }
    correct
}

/// Check both conservation laws on the aggregate totals.
///
/// A violation is a defect in the scoring engine, never a property of the
/// input documents, so it surfaces as a fatal error instead of a result.
fn verify_conservation(result: &EvaluationResult) -> Result<()> {
    if result.correct + result.missed != result.gt_total {
        return Err(MarkevalError::Consistency(format!(
            "correct ({}) + missed ({}) != gt_total ({})",
            result.correct, result.missed, result.gt_total
        )));
    }
    if result.correct + result.misplaced != result.eval_total {
        return Err(MarkevalError::Consistency(format!(
            "correct ({}) + misplaced ({}) != eval_total ({})",
            result.correct, result.misplaced, result.eval_total
        )));
    }
    Ok(())
}
