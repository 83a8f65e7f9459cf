//! In-memory DOM
//!
//! This module provides the document tree the page controller works on:
//! - Document: arena-backed tree of element and text nodes
//! - ElementNode: nested, serializable snapshot of an element subtree
//! - ElementSelector: the supported selector grammar
//! - ElementResolver: interchangeable element lookup strategies
//! - Query: jQuery-style selection sets

pub mod element;
pub mod query;
pub mod selector;
pub mod tree;

pub use element::ElementNode;
pub use query::{Query, QueryResolver};
pub use selector::{CompoundSelector, ElementResolver, ElementSelector, IdResolver, SelectorResolver};
pub use tree::{Document, ElementData, NodeId, NodeKind};

use crate::error::Result;
use std::path::Path;

/// Load a document from a JSON file in the [`ElementNode`] shape
pub fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| {
        crate::error::PageError::DocumentParseFailed(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))
    })?;
    Document::from_json(&json)
}
