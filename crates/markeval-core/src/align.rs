//! Base-text position alignment between ground-truth and evaluated cells.
//!
//! Token offsets are computed against the ground-truth base text but must be
//! checked against the evaluated base text, which may have drifted through
//! re-wording. A character-level LCS diff maps offsets across that drift so
//! minor edits do not spuriously count a token as moved.

use similar::{Algorithm, DiffOp, TextDiff};

/// Map ground-truth base-text offsets onto evaluated base-text coordinates.
///
/// Returns one evaluated-text offset per input offset, in the same order.
/// When the two base texts are identical the offsets are returned unchanged.
/// Otherwise each offset is carried across the diff opcodes:
///
/// - inside (or at the end boundary of) an equal block, the same relative
///   position is kept;
/// - inside an inserted/deleted/replaced region, the offset anchors to where
///   the first following opcode begins in the evaluated text;
/// - past the last opcode, it lands at the very end.
///
/// Anchoring edited regions to the following opcode start is a deliberate
/// conservative simplification: a token inside rewritten text maps to where
/// that rewrite now begins rather than being interpolated, which biases
/// toward non-matches near edits. All offsets are character offsets.
#[must_use]
pub fn map_positions(gt_base: &str, eval_base: &str, gt_offsets: &[usize]) -> Vec<usize> {
    if gt_base == eval_base {
        return gt_offsets.to_vec();
    }

    // Myers is LCS-driven and deterministic; every character position is
    // autonomous (no junk-element heuristics).
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_chars(gt_base, eval_base);
    let ops = diff.ops();
    let eval_len = eval_base.chars().count();

    gt_offsets
        .iter()
        .map(|&offset| map_index(ops, offset, eval_len))
        .collect()
}

fn map_index(ops: &[DiffOp], i: usize, eval_len: usize) -> usize {
    for op in ops {
        if let DiffOp::Equal {
            old_index,
            new_index,
            len,
        } = *op
        {
            if old_index <= i && i <= old_index + len {
                return new_index + (i - old_index).min(len);
            }
        }
    }

    // Not inside any equal block: anchor to the nearest following opcode
    for op in ops {
        if op.old_range().start > i {
            return op.new_range().start;
        }
    }

    eval_len
}
