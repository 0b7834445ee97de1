//! Multi-table and merged-cell evaluation, end to end over real DOCX
//! fixtures.

mod common;

use common::{simple_table, write_docx, CellSpec, TableSpec};
use markeval_backend::evaluate_documents;
use markeval_core::EvaluationResult;
use std::path::Path;
use tempfile::TempDir;

fn evaluate(dir: &Path, gt: &[TableSpec], ev: &[TableSpec]) -> EvaluationResult {
    let gt_path = dir.join("gt.docx");
    let ev_path = dir.join("ev.docx");
    write_docx(&gt_path, gt);
    write_docx(&ev_path, ev);
    evaluate_documents(&gt_path, &ev_path, true).expect("evaluation succeeds")
}

#[test]
fn multiple_tables_perfect() {
    let tmp = TempDir::new().unwrap();
    let tables = vec![
        simple_table(&[&["CELL_1", ""]]),
        simple_table(&[&["CELL_2", "CELL_3"]]),
    ];

    let res = evaluate(tmp.path(), &tables, &tables);
    assert_eq!(res.gt_total, 3);
    assert_eq!(res.eval_total, 3);
    assert_eq!(res.correct, 3);
    assert_eq!(res.missed, 0);
    assert_eq!(res.misplaced, 0);
}

#[test]
fn multiple_tables_misplaced() {
    let tmp = TempDir::new().unwrap();
    let gt = vec![
        simple_table(&[&["CELL_1", ""]]),
        simple_table(&[&["CELL_2", ""]]),
    ];
    let ev = vec![
        simple_table(&[&["", "CELL_999"]]), // moved to the neighbouring cell
        simple_table(&[&["CELL_2", ""]]),
    ];

    let res = evaluate(tmp.path(), &gt, &ev);
    assert_eq!(res.gt_total, 2);
    assert_eq!(res.eval_total, 2);
    assert_eq!(res.correct, 1);
    assert_eq!(res.missed, 1);
    assert_eq!(res.misplaced, 1);
}

#[test]
fn merged_cells_correct_horizontal() {
    // First two of three columns merged in both documents; the merged cell
    // carries the token
    let tmp = TempDir::new().unwrap();
    let gt = vec![vec![vec![
        CellSpec::text("A CELL_1 B").grid_span(2),
        CellSpec::empty(),
    ]]];
    let ev = vec![vec![vec![
        CellSpec::text("A cell_999 B").grid_span(2),
        CellSpec::empty(),
    ]]];

    let res = evaluate(tmp.path(), &gt, &ev);
    assert_eq!(res.gt_total, 1);
    assert_eq!(res.eval_total, 1);
    assert_eq!(res.correct, 1);
    assert_eq!(res.missed, 0);
    assert_eq!(res.misplaced, 0);
}

#[test]
fn merged_cells_wrong_position_across_parts() {
    // Full-column vertical merge; the ground truth holds the token in the
    // top part, the evaluated document in the bottom part
    let tmp = TempDir::new().unwrap();
    let gt = vec![vec![
        vec![CellSpec::paragraphs(&["Top CELL_1", "Bottom"]).v_merge_restart()],
        vec![CellSpec::empty().v_merge_continue()],
    ]];
    let ev = vec![vec![
        vec![CellSpec::paragraphs(&["Top", "Bottom cell_9"]).v_merge_restart()],
        vec![CellSpec::empty().v_merge_continue()],
    ]];

    let res = evaluate(tmp.path(), &gt, &ev);
    assert_eq!(res.gt_total, 1);
    assert_eq!(res.eval_total, 1);
    assert_eq!(res.correct, 0);
    assert_eq!(res.missed, 1);
    assert_eq!(res.misplaced, 1);
}

#[test]
fn merged_region_reports_single_cell_detail() {
    // A 2x2 block merge (gridSpan + vMerge) must resolve to one logical
    // cell whose span covers all four positions, with no text double-count
    let tmp = TempDir::new().unwrap();
    let doc = vec![vec![
        vec![
            CellSpec::text("block CELL_1").grid_span(2).v_merge_restart(),
            CellSpec::text("right"),
        ],
        vec![
            CellSpec::empty().grid_span(2).v_merge_continue(),
            CellSpec::text("lower"),
        ],
    ]];

    let res = evaluate(tmp.path(), &doc, &doc);
    assert_eq!(res.correct, 1);
    assert_eq!(res.gt_total, 1);

    let cells = res.cells.expect("debug detail requested");
    assert_eq!(cells.len(), 3);
    let merged = &cells[0];
    assert_eq!((merged.row, merged.col), (0, 0));
    assert_eq!(merged.span.row_end, 1);
    assert_eq!(merged.span.col_end, 1);
    assert_eq!(merged.gt_positions.len(), 1);
}

#[test]
fn table_count_mismatch_degenerates_to_empty_pairings() {
    // Extra table on the evaluated side pairs against nothing and only
    // contributes misplaced counts
    let tmp = TempDir::new().unwrap();
    let gt = vec![simple_table(&[&["CELL_1"]])];
    let ev = vec![
        simple_table(&[&["CELL_1"]]),
        simple_table(&[&["cell_2"]]),
    ];

    let res = evaluate(tmp.path(), &gt, &ev);
    assert_eq!(res.gt_total, 1);
    assert_eq!(res.eval_total, 2);
    assert_eq!(res.correct, 1);
    assert_eq!(res.missed, 0);
    assert_eq!(res.misplaced, 1);
}
