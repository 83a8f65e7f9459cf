//! A small jQuery-style selection helper
//!
//! `Query::select(&doc, "#cell4")` plays the part of `$("#cell4")`: it
//! captures every matching element at call time and exposes chainable
//! accessors and bulk mutators over that set.

use crate::dom::selector::ElementResolver;
use crate::dom::tree::{Document, NodeId};
use crate::error::Result;

/// An ordered set of elements captured from a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    nodes: Vec<NodeId>,
}

impl Query {
    /// Select every connected element matching `selector`
    pub fn select(document: &Document, selector: &str) -> Result<Self> {
        Ok(Self {
            nodes: document.query_selector_all(selector)?,
        })
    }

    /// Wrap nodes that were found some other way
    pub fn from_nodes(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First element of the set
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Set an attribute on every element in the set
    pub fn set_attr(&self, document: &mut Document, name: &str, value: &str) -> Result<&Self> {
        for node in self.iter() {
            document.set_attribute(node, name, value)?;
        }
        Ok(self)
    }

    /// Combined text of every element in the set
    pub fn text(&self, document: &Document) -> String {
        self.iter().map(|node| document.text_content(node)).collect()
    }
}

/// Resolves elements through [`Query`], the helper-library strategy
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryResolver;

impl ElementResolver for QueryResolver {
    fn name(&self) -> &str {
        "query"
    }

    fn resolve(&self, document: &Document, key: &str) -> Result<Option<NodeId>> {
        Ok(Query::select(document, key)?.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementNode;
    use crate::dom::selector::IdResolver;

    fn rows() -> Document {
        Document::from_element(&ElementNode::new("table").with_children(vec![
            ElementNode::new("tr").with_class("row").with_children(vec![
                ElementNode::new("td").with_id("cell1").with_text("1"),
            ]),
            ElementNode::new("tr").with_class("row odd").with_children(vec![
                ElementNode::new("td").with_id("cell4").with_text("4"),
            ]),
            ElementNode::new("tr").with_children(vec![
                ElementNode::new("td").with_id("cell7").with_text("7"),
            ]),
        ]))
    }

    #[test]
    fn test_select() {
        let doc = rows();

        assert_eq!(Query::select(&doc, "tr").unwrap().len(), 3);
        assert_eq!(Query::select(&doc, ".row").unwrap().len(), 2);
        assert_eq!(Query::select(&doc, ".odd").unwrap().len(), 1);
        assert_eq!(Query::select(&doc, "td").unwrap().text(&doc), "147");
    }

    #[test]
    fn test_empty_selection() {
        let doc = rows();
        let query = Query::select(&doc, "#nope").unwrap();

        assert!(query.is_empty());
        assert_eq!(query.first(), None);
        assert_eq!(query.text(&doc), "");
    }

    #[test]
    fn test_bulk_mutation() {
        let mut doc = rows();
        let query = Query::select(&doc, ".row").unwrap();

        let styled = query
            .set_attr(&mut doc, "style", "background-color: yellow")
            .unwrap();
        assert_eq!(styled.len(), 2);

        for node in query.iter() {
            assert_eq!(doc.get_attribute(node, "style"), Some("background-color: yellow"));
        }
        let plain = doc.get_elements_by_tag_name("tr")[2];
        assert_eq!(doc.get_attribute(plain, "style"), None);
    }

    #[test]
    fn test_query_resolver_matches_id_resolver() {
        let doc = rows();

        let via_query = QueryResolver.resolve(&doc, "#cell4").unwrap();
        let via_id = IdResolver.resolve(&doc, "cell4").unwrap();

        assert!(via_query.is_some());
        assert_eq!(via_query, via_id);
        assert_eq!(Query::from_nodes(vec![via_id.unwrap()]).first(), via_query);
    }
}
