//! Core trait definitions for document table readers.

use markeval_core::{Result, TableGrid};
use std::path::Path;

/// A document model capable of exposing a document's tables.
///
/// Implementations enumerate tables in document order and materialize each
/// one as a [`TableGrid`]: row/column counts, an opaque cell handle per grid
/// position (identical handles mean the same underlying cell, the identity
/// the merge resolver relies on) and the flattened text behind each handle.
///
/// Loading a malformed or unsupported document fails with
/// [`markeval_core::MarkevalError::DocumentRead`] carrying the offending
/// path.
pub trait TableReader {
    /// Read every table of the document at `path`, in document order.
    fn read_tables(&self, path: &Path) -> Result<Vec<TableGrid>>;
}
