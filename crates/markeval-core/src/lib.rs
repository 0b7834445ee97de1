//! # Markeval Core - Table Markup Placement Scoring
//!
//! Scores how accurately `cell_<digits>` markup tokens were placed inside
//! the tables of a structured document, by comparing a ground-truth document
//! against an evaluated one. For each logical table cell (merged regions
//! respected) it determines which tokens sit at the correct position, which
//! are missing and which are spurious or moved.
//!
//! The pipeline, leaves first:
//!
//! 1. [`table::TableGrid::logical_cells`]: resolve a raw row/column grid
//!    into merged-region logical cells.
//! 2. [`table`] text extraction: combined, whitespace-normalized text per
//!    logical cell.
//! 3. [`token::strip_tokens`]: locate markers and produce token-free base
//!    text plus base-coordinate offsets.
//! 4. [`align::map_positions`]: carry ground-truth offsets onto the
//!    evaluated base text across textual drift.
//! 5. [`score::evaluate_tables`]: pair cells by coordinate key and tally
//!    correct / missed / misplaced counts.
//!
//! This crate performs no I/O; document backends hand it [`table::TableGrid`]
//! values and report formatting consumes [`score::EvaluationResult`].
//!
//! ## Example
//!
//! ```
//! use markeval_core::table::{CellId, TableGrid};
//! use markeval_core::score::evaluate_tables;
//!
//! let gt = TableGrid::new(0, 1, 1, vec![CellId(0)], vec!["a CELL_1 b".into()]);
//! let ev = TableGrid::new(0, 1, 1, vec![CellId(0)], vec!["a cell_9 b".into()]);
//!
//! let result = evaluate_tables(&[gt], &[ev], false).unwrap();
//! assert_eq!(result.correct, 1);
//! ```

pub mod align;
pub mod error;
pub mod score;
pub mod table;
pub mod token;

pub use error::{MarkevalError, Result};
pub use score::{evaluate_cells, evaluate_tables, CellEvaluation, EvaluationResult};
pub use table::{CellId, CellSpan, LogicalCell, TableGrid};
