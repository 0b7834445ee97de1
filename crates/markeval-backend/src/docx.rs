//! DOCX (Microsoft Word) table reader.
//!
//! Manual ZIP + XML parsing. DOCX files are ZIP archives; the only member
//! this backend cares about is `word/document.xml`, whose `w:tbl` subtrees
//! are materialized as [`TableGrid`]s. Everything else in the body
//! (paragraphs, headers, drawings, math) is skipped.
//!
//! Merge handling: `w:gridSpan` replicates one cell handle across the
//! spanned columns of its row; `w:vMerge` with `w:val="restart"` opens a
//! vertical span and a valueless/`continue` `w:vMerge` re-uses the handle
//! of the same column one row up, discarding the continuation cell's own
//! content. Handles are arena indices assigned in the order cells are
//! first materialized, which makes identity comparison deterministic.

use crate::traits::TableReader;
use markeval_core::{CellId, MarkevalError, Result, TableGrid};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Extract an attribute value by key from an element
#[inline]
fn get_attr(e: &quick_xml::events::BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .find(|a| a.as_ref().ok().map(|x| x.key.as_ref()) == Some(key))
        .and_then(std::result::Result::ok)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Extract an attribute value by key and parse as usize
#[inline]
fn get_attr_usize(e: &quick_xml::events::BytesStart, key: &[u8]) -> Option<usize> {
    get_attr(e, key).and_then(|s| s.parse().ok())
}

/// DOCX table reader backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocxBackend;

impl DocxBackend {
    /// Create a new DOCX backend.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Read `word/document.xml` out of the ZIP container.
    fn read_document_xml(path: &Path) -> Result<String> {
        let file = File::open(path)
            .map_err(|e| MarkevalError::document_read(path, e.to_string()))?;
        let mut archive = ZipArchive::new(file).map_err(|e| {
            MarkevalError::document_read(path, format!("failed to open DOCX as ZIP: {e}"))
        })?;

        let mut document_xml = archive.by_name("word/document.xml").map_err(|e| {
            MarkevalError::document_read(path, format!("missing word/document.xml: {e}"))
        })?;

        let mut content = String::new();
        document_xml
            .read_to_string(&mut content)
            .map_err(|e| MarkevalError::document_read(path, e.to_string()))?;
        Ok(content)
    }

    /// Walk the document body and materialize every top-level table.
    fn walk_body(xml_content: &str, path: &Path) -> Result<Vec<TableGrid>> {
        let mut reader = Reader::from_str(xml_content);
        let mut state = WalkBodyState::new();

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => state.handle_start_element(&e),
                Ok(Event::Empty(e)) => state.handle_empty_element(&e),
                Ok(Event::Text(e)) => {
                    let text = e.unescape().unwrap_or_default();
                    state.handle_text_event(&text);
                }
                Ok(Event::End(e)) => state.handle_end_element(&e),
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(MarkevalError::document_read(
                        path,
                        format!(
                            "XML parse error at byte {}: {e}",
                            reader.buffer_position()
                        ),
                    ));
                }
                _ => {}
            }
            buf.clear();
        }

        let tables = state.into_tables();
        log::debug!("{}: {} table(s) materialized", path.display(), tables.len());
        Ok(tables)
    }
}

impl TableReader for DocxBackend {
    fn read_tables(&self, path: &Path) -> Result<Vec<TableGrid>> {
        let xml_content = Self::read_document_xml(path)?;
        Self::walk_body(&xml_content, path)
    }
}

/// Streaming parser state for one pass over `word/document.xml`.
struct WalkBodyState {
    // Output accumulator
    tables: Vec<TableGrid>,

    // Location tracking flags
    in_body: bool,
    in_table_row: bool,
    in_table_cell: bool,
    in_text: bool,
    /// Nesting depth of `w:tbl` elements; only depth 1 is materialized.
    table_depth: usize,

    // Builders for accumulating content
    current_table: Option<TableGridBuilder>,
    current_row: Vec<RawCell>,
    current_cell: Option<RawCellBuilder>,
}

impl WalkBodyState {
    const fn new() -> Self {
        Self {
            tables: Vec::new(),
            in_body: false,
            in_table_row: false,
            in_table_cell: false,
            in_text: false,
            table_depth: 0,
            current_table: None,
            current_row: Vec::new(),
            current_cell: None,
        }
    }

    fn into_tables(self) -> Vec<TableGrid> {
        self.tables
    }

    /// Whether events currently land in a top-level table cell.
    #[inline]
    const fn in_top_level_cell(&self) -> bool {
        self.in_table_cell && self.table_depth == 1
    }

    fn handle_start_element(&mut self, e: &quick_xml::events::BytesStart<'_>) {
        match e.name().as_ref() {
            b"w:body" => {
                self.in_body = true;
            }
            b"w:tbl" if self.in_body => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.current_table = Some(TableGridBuilder::new());
                }
            }
            b"w:tr" if self.table_depth == 1 && !self.in_table_row => {
                self.in_table_row = true;
                self.current_row.clear();
            }
            b"w:tc" if self.in_table_row && !self.in_table_cell => {
                self.in_table_cell = true;
                self.current_cell = Some(RawCellBuilder::new());
            }
            b"w:t" if self.in_top_level_cell() => {
                self.in_text = true;
            }
            _ => {}
        }
    }

    fn handle_empty_element(&mut self, e: &quick_xml::events::BytesStart<'_>) {
        match e.name().as_ref() {
            b"w:gridSpan" if self.in_top_level_cell() => {
                if let (Some(cell), Some(span)) =
                    (self.current_cell.as_mut(), get_attr_usize(e, b"w:val"))
                {
                    cell.grid_span = span.max(1);
                }
            }
            b"w:vMerge" if self.in_top_level_cell() => {
                let is_restart = get_attr(e, b"w:val").as_deref() == Some("restart");
                if let Some(cell) = self.current_cell.as_mut() {
                    cell.v_merge = Some(is_restart);
                }
            }
            b"w:tab" if self.in_top_level_cell() => {
                if let Some(cell) = self.current_cell.as_mut() {
                    cell.add_text("\t");
                }
            }
            b"w:br" if self.in_top_level_cell() => {
                if let Some(cell) = self.current_cell.as_mut() {
                    cell.add_text("\n");
                }
            }
            _ => {}
        }
    }

    fn handle_text_event(&mut self, text: &str) {
        if self.in_text {
            if let Some(cell) = self.current_cell.as_mut() {
                cell.add_text(text);
            }
        }
    }

    fn handle_end_element(&mut self, e: &quick_xml::events::BytesEnd<'_>) {
        match e.name().as_ref() {
            b"w:body" => {
                self.in_body = false;
            }
            b"w:tbl" if self.table_depth > 0 => {
                self.table_depth -= 1;
                if self.table_depth == 0 {
                    if let Some(builder) = self.current_table.take() {
                        let index = self.tables.len();
                        self.tables.push(builder.build(index));
                    }
                }
            }
            b"w:tr" if self.in_table_row && self.table_depth == 1 => {
                self.in_table_row = false;
                if let Some(table) = self.current_table.as_mut() {
                    table.add_row(self.current_row.drain(..).collect());
                }
            }
            b"w:tc" if self.in_table_cell && self.table_depth == 1 => {
                self.in_table_cell = false;
                if let Some(cell) = self.current_cell.take() {
                    self.current_row.push(cell.build());
                }
            }
            b"w:p" if self.in_top_level_cell() => {
                if let Some(cell) = self.current_cell.as_mut() {
                    cell.finish_paragraph();
                }
            }
            b"w:t" if self.in_text => {
                self.in_text = false;
            }
            _ => {}
        }
    }
}

/// Helper for accumulating one `w:tc` while parsing.
struct RawCellBuilder {
    paragraphs: Vec<String>,
    current_paragraph: String,
    /// Column span from `w:gridSpan` (default 1)
    grid_span: usize,
    /// Vertical merge state: None = no merge, Some(true) = restart,
    /// Some(false) = continue
    v_merge: Option<bool>,
}

impl RawCellBuilder {
    const fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
            current_paragraph: String::new(),
            grid_span: 1,
            v_merge: None,
        }
    }

    fn add_text(&mut self, text: &str) {
        self.current_paragraph.push_str(text);
    }

    fn finish_paragraph(&mut self) {
        self.paragraphs.push(std::mem::take(&mut self.current_paragraph));
    }

    fn build(mut self) -> RawCell {
        if !self.current_paragraph.is_empty() {
            self.finish_paragraph();
        }
        RawCell {
            // Runs concatenate with no separator; paragraphs join on newline
            text: self.paragraphs.join("\n"),
            grid_span: self.grid_span,
            v_merge: self.v_merge,
        }
    }
}

/// One parsed `w:tc` with its span data.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawCell {
    text: String,
    grid_span: usize,
    /// None = no merge, Some(true) = restart (start), Some(false) = continue
    v_merge: Option<bool>,
}

/// Builds a [`TableGrid`] from parsed rows, expanding merges into shared
/// cell handles.
struct TableGridBuilder {
    rows: Vec<Vec<RawCell>>,
}

impl TableGridBuilder {
    const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    fn add_row(&mut self, cells: Vec<RawCell>) {
        self.rows.push(cells);
    }

    /// Expand `gridSpan`/`vMerge` into an R×C grid of arena handles.
    ///
    /// A horizontal span stamps the same handle across its columns; a
    /// vertical continuation copies the handle of the position one row up,
    /// so every grid position of a merged region aliases one underlying
    /// cell. Positions no `w:tc` accounted for (jagged rows) get fresh
    /// empty cells.
    fn build(self, index: usize) -> TableGrid {
        let num_rows = self.rows.len();
        let num_cols: usize = self
            .rows
            .iter()
            .map(|row| row.iter().map(|c| c.grid_span).sum())
            .max()
            .unwrap_or(0);

        let mut grid: Vec<Vec<Option<CellId>>> = vec![vec![None; num_cols]; num_rows];
        let mut texts: Vec<String> = Vec::new();

        for (row_idx, row) in self.rows.into_iter().enumerate() {
            let mut col_idx = 0;
            for cell in row {
                while col_idx < num_cols && grid[row_idx][col_idx].is_some() {
                    col_idx += 1;
                }
                if col_idx >= num_cols {
                    break;
                }

                let grid_span = cell.grid_span;
                let id = match cell.v_merge {
                    // Continuation: alias the cell one row up in this column.
                    // A continue without a restart above falls back to a
                    // fresh cell, mirroring how readers treat stray merges.
                    Some(false) => row_idx
                        .checked_sub(1)
                        .and_then(|above| grid[above][col_idx])
                        .unwrap_or_else(|| Self::fresh_cell(&mut texts, cell.text)),
                    _ => Self::fresh_cell(&mut texts, cell.text),
                };

                for span_offset in 0..grid_span {
                    if col_idx + span_offset < num_cols {
                        grid[row_idx][col_idx + span_offset] = Some(id);
                    }
                }
                col_idx += grid_span;
            }
        }

        // Jagged rows leave unassigned positions behind
        let cells: Vec<CellId> = grid
            .into_iter()
            .flatten()
            .map(|slot| slot.unwrap_or_else(|| Self::fresh_cell(&mut texts, String::new())))
            .collect();

        TableGrid::new(index, num_rows, num_cols, cells, texts)
    }

    fn fresh_cell(texts: &mut Vec<String>, text: String) -> CellId {
        let id = CellId(texts.len());
        texts.push(text);
        id
    }
}
