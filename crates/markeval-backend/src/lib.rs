//! # Markeval Backend - DOCX Document Model
//!
//! The document-model side of markeval: opens DOCX containers (ZIP +
//! WordprocessingML) and exposes their tables as
//! [`markeval_core::TableGrid`] values: row/column grids of opaque cell
//! handles with identity semantics, plus flattened per-cell text. Merge
//! primitives (`w:gridSpan`, `w:vMerge`) become aliased handles, which is
//! all the core's merge resolver needs.
//!
//! ## Example
//!
//! ```no_run
//! use markeval_backend::evaluate_documents;
//! use std::path::Path;
//!
//! fn main() -> markeval_core::Result<()> {
//!     let result = evaluate_documents(
//!         Path::new("ground_truth.docx"),
//!         Path::new("evaluated.docx"),
//!         false,
//!     )?;
//!     println!("correct: {} / {}", result.correct, result.gt_total);
//!     Ok(())
//! }
//! ```

pub mod docx;
pub mod evaluate;
pub mod traits;

pub use docx::DocxBackend;
pub use evaluate::evaluate_documents;
pub use traits::TableReader;
