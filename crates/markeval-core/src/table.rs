//! Table grid model, merged-cell resolution and cell text extraction.
//!
//! A backend hands the scorer one [`TableGrid`] per table: an R×C grid of
//! opaque [`CellId`] handles plus the flattened text of each underlying
//! cell. Merged regions (horizontal `gridSpan`, vertical `vMerge`) appear
//! as several grid positions carrying the same handle. This module resolves
//! that grid into [`LogicalCell`]s, one per merged region, each owning its
//! anchor, bounding span and normalized combined text.

use serde::{Deserialize, Serialize};

/// Opaque handle for one underlying table cell.
///
/// Handles are arena indices assigned by the backend in the order cells are
/// first materialized. Two grid positions belong to the same merged region
/// iff their handles compare equal; cell text content plays no part in the
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(pub usize);

/// One table as exposed by the document model: a row-major grid of cell
/// handles plus a text arena indexed by handle.
#[derive(Debug, Clone, PartialEq)]
pub struct TableGrid {
    /// Zero-based index of the table within the document, in document order
    pub index: usize,
    rows: usize,
    cols: usize,
    /// Row-major, length `rows * cols`
    cells: Vec<CellId>,
    /// Flattened text per underlying cell, indexed by `CellId`
    texts: Vec<String>,
}

impl TableGrid {
    /// Build a grid from row-major cell handles and the per-cell text arena.
    ///
    /// # Panics
    ///
    /// Panics if `cells.len() != rows * cols` or a handle indexes past the
    /// arena; both indicate a defective backend, not bad input data.
    #[must_use]
    pub fn new(index: usize, rows: usize, cols: usize, cells: Vec<CellId>, texts: Vec<String>) -> Self {
        assert_eq!(cells.len(), rows * cols, "grid shape mismatch");
        assert!(
            cells.iter().all(|id| id.0 < texts.len()),
            "cell handle outside text arena"
        );
        Self {
            index,
            rows,
            cols,
            cells,
            texts,
        }
    }

    /// Row count of the raw grid.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Column count of the raw grid. Zero whenever `rows` is zero.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Handle at grid position `(row, col)`.
    #[inline]
    #[must_use]
    pub fn cell_id(&self, row: usize, col: usize) -> CellId {
        self.cells[row * self.cols + col]
    }

    /// Flattened raw text of the underlying cell behind `id`.
    #[inline]
    #[must_use]
    pub fn cell_text(&self, id: CellId) -> &str {
        &self.texts[id.0]
    }

    /// Resolve the raw grid into logical cells.
    ///
    /// Two passes over the grid in row-major order. Pass one: the first
    /// position encountered for a given handle becomes that region's anchor,
    /// and every later position with the same handle records the same
    /// anchor. Pass two: each anchor's span is the min/max bounding
    /// rectangle of all positions carrying it: merges can leave holes, so
    /// the rectangle is not known until the whole grid has been scanned.
    #[must_use]
    pub fn logical_cells(&self) -> Vec<LogicalCell> {
        // anchor of each underlying cell, indexed by CellId
        let mut anchors: Vec<Option<(usize, usize)>> = vec![None; self.texts.len()];
        // anchors in row-major discovery order
        let mut order: Vec<CellId> = Vec::new();

        for row in 0..self.rows {
            for col in 0..self.cols {
                let id = self.cell_id(row, col);
                if anchors[id.0].is_none() {
                    anchors[id.0] = Some((row, col));
                    order.push(id);
                }
            }
        }

        let mut spans: Vec<CellSpan> = order
            .iter()
            .map(|id| {
                let (row, col) = anchors[id.0].unwrap_or_default();
                CellSpan {
                    row_start: row,
                    col_start: col,
                    row_end: row,
                    col_end: col,
                }
            })
            .collect();

        // Second pass: grow each span to cover every aliasing position
        let span_of: std::collections::HashMap<CellId, usize> =
            order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let id = self.cell_id(row, col);
                if let Some(&slot) = span_of.get(&id) {
                    let span = &mut spans[slot];
                    span.row_end = span.row_end.max(row);
                    span.col_end = span.col_end.max(col);
                }
            }
        }

        order
            .iter()
            .zip(spans)
            .map(|(id, span)| LogicalCell {
                table_index: self.index,
                anchor: anchors[id.0].unwrap_or_default(),
                text: self.span_text(&span),
                span,
            })
            .collect()
    }

    /// Combined normalized text of one span rectangle.
    ///
    /// Every grid position inside the rectangle resolves to an underlying
    /// cell; each distinct cell contributes its text exactly once, in
    /// row-major order of first appearance (a merged region revisits the
    /// same cell through several positions). Contributions are joined with
    /// a newline before normalization collapses it away.
    fn span_text(&self, span: &CellSpan) -> String {
        let mut seen: Vec<CellId> = Vec::new();
        let mut parts: Vec<&str> = Vec::new();
        for row in span.row_start..=span.row_end {
            for col in span.col_start..=span.col_end {
                let id = self.cell_id(row, col);
                if !seen.contains(&id) {
                    seen.push(id);
                    parts.push(self.cell_text(id));
                }
            }
        }
        normalize_whitespace(&parts.join("\n"))
    }
}

/// Inclusive rectangle of grid positions covered by one logical cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSpan {
    /// Top row of the rectangle
    pub row_start: usize,
    /// Leftmost column of the rectangle
    pub col_start: usize,
    /// Bottom row of the rectangle (inclusive)
    pub row_end: usize,
    /// Rightmost column of the rectangle (inclusive)
    pub col_end: usize,
}

/// One merged-cell region, identified by its top-left grid anchor.
///
/// Derived and read-only: recomputed fresh per document, never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalCell {
    /// Zero-based table index within the document
    pub table_index: usize,
    /// Top-left (row, column) grid position: the unique key within a table
    pub anchor: (usize, usize),
    /// Minimal bounding rectangle of all positions resolving to `anchor`
    pub span: CellSpan,
    /// Normalized combined text of the region
    pub text: String,
}

/// Convert NBSP to ordinary spaces, collapse whitespace runs, trim.
///
/// Run so that encoding/whitespace differences between ground-truth and
/// evaluated authoring never register as textual drift downstream.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.replace('\u{00A0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
