//! Shared fixture builder: synthesizes minimal DOCX files with tables,
//! merges and split runs so the scenario tests run hermetically.

// Each integration-test target compiles its own copy and uses a subset
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// One table cell to be written into a fixture document.
#[derive(Debug, Clone, Default)]
pub struct CellSpec {
    /// Paragraphs, each a list of runs
    paragraphs: Vec<Vec<String>>,
    grid_span: usize,
    v_merge: Option<&'static str>,
}

impl CellSpec {
    /// Cell with a single paragraph holding one run.
    pub fn text(text: &str) -> Self {
        Self {
            paragraphs: vec![vec![text.to_string()]],
            ..Self::default()
        }
    }

    /// Cell with a single paragraph split across several runs.
    pub fn runs(parts: &[&str]) -> Self {
        Self {
            paragraphs: vec![parts.iter().map(ToString::to_string).collect()],
            ..Self::default()
        }
    }

    /// Cell with several paragraphs of one run each.
    pub fn paragraphs(parts: &[&str]) -> Self {
        Self {
            paragraphs: parts.iter().map(|p| vec![p.to_string()]).collect(),
            ..Self::default()
        }
    }

    /// Empty cell.
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Span `n` grid columns (`w:gridSpan`).
    pub fn grid_span(mut self, n: usize) -> Self {
        self.grid_span = n;
        self
    }

    /// Open a vertical merge (`w:vMerge w:val="restart"`).
    pub fn v_merge_restart(mut self) -> Self {
        self.v_merge = Some("restart");
        self
    }

    /// Continue a vertical merge from the row above (`w:vMerge`).
    pub fn v_merge_continue(mut self) -> Self {
        self.v_merge = Some("continue");
        self
    }

    fn to_xml(&self) -> String {
        let mut xml = String::from("<w:tc>");

        let has_props = self.grid_span > 1 || self.v_merge.is_some();
        if has_props {
            xml.push_str("<w:tcPr>");
            if self.grid_span > 1 {
                xml.push_str(&format!("<w:gridSpan w:val=\"{}\"/>", self.grid_span));
            }
            match self.v_merge {
                Some("restart") => xml.push_str("<w:vMerge w:val=\"restart\"/>"),
                Some(_) => xml.push_str("<w:vMerge/>"),
                None => {}
            }
            xml.push_str("</w:tcPr>");
        }

        for paragraph in &self.paragraphs {
            xml.push_str("<w:p>");
            for run in paragraph {
                xml.push_str(&format!(
                    "<w:r><w:t xml:space=\"preserve\">{}</w:t></w:r>",
                    escape_xml(run)
                ));
            }
            xml.push_str("</w:p>");
        }
        if self.paragraphs.is_empty() {
            xml.push_str("<w:p/>");
        }

        xml.push_str("</w:tc>");
        xml
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// One table: rows of cell specs.
pub type TableSpec = Vec<Vec<CellSpec>>;

/// Shorthand for a table where every cell is a single text.
pub fn simple_table(rows: &[&[&str]]) -> TableSpec {
    rows.iter()
        .map(|row| row.iter().map(|text| CellSpec::text(text)).collect())
        .collect()
}

/// Write a DOCX file containing the given tables, in order.
pub fn write_docx(path: &Path, tables: &[TableSpec]) {
    let mut body = String::new();
    for table in tables {
        body.push_str("<w:tbl>");
        for row in table {
            body.push_str("<w:tr>");
            for cell in row {
                body.push_str(&cell.to_xml());
            }
            body.push_str("</w:tr>");
        }
        body.push_str("</w:tbl>");
        // Word requires a paragraph between consecutive tables
        body.push_str("<w:p/>");
    }

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let file = File::create(path).expect("create fixture file");
    let mut zip = ZipWriter::new(file);
    zip.start_file("[Content_Types].xml", SimpleFileOptions::default())
        .expect("start content types");
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#)
        .expect("write content types");
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .expect("start document.xml");
    zip.write_all(document.as_bytes()).expect("write document.xml");
    zip.finish().expect("finish zip");
}
