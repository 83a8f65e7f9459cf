use crate::dom::element::ElementNode;
use crate::dom::selector::ElementSelector;
use crate::error::{PageError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its document's arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Element payload: tag name and ordered attributes
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub tag_name: String,
    pub attributes: IndexMap<String, String>,
}

impl ElementData {
    fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: IndexMap::new(),
        }
    }

    /// Check if the class attribute contains `class_name` as a token
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attributes
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    /// The id attribute, if set
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// An in-memory document tree
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Removing a node
/// detaches it from its parent but keeps it in the arena, so a handle held
/// by the caller stays valid; detached nodes are skipped by every lookup.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            root: NodeId(0),
        }
    }

    /// Build a document whose single top-level element is `root`
    pub fn from_element(root: &ElementNode) -> Self {
        let mut document = Self::new();
        let top = document.root;
        document.import(top, root);
        log::debug!(
            "loaded document {} with {} elements",
            root.to_simple_string(),
            root.count_elements()
        );
        document
    }

    /// Parse a document from the JSON form of an [`ElementNode`]
    pub fn from_json(json: &str) -> Result<Self> {
        let root: ElementNode = serde_json::from_str(json)
            .map_err(|e| PageError::DocumentParseFailed(format!("Invalid document JSON: {}", e)))?;
        Ok(Self::from_element(&root))
    }

    fn import(&mut self, parent: NodeId, source: &ElementNode) {
        let element = self.create_element(&source.tag_name);
        if let NodeKind::Element(data) = &mut self.nodes[element.0].kind {
            data.attributes = source.attributes.clone();
        }

        if let Some(text) = source.text_content.as_deref().filter(|t| !t.is_empty()) {
            let text = self.create_text_node(text);
            self.attach(element, text);
        }

        for child in &source.children {
            self.import(element, child);
        }

        self.attach(parent, element);
    }

    /// The document node (parent of the top-level element)
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The first element child of the document node
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(self.root).into_iter().next()
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| PageError::InvalidNode(format!("{} does not exist", id)))
    }

    /// Kind of the node, if it exists
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|node| &node.kind)
    }

    /// Element payload, if `id` is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.kind(id)? {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        match self.nodes.get_mut(id.0).map(|node| &mut node.kind) {
            Some(NodeKind::Element(data)) => Ok(data),
            Some(_) => Err(PageError::InvalidNode(format!("{} is not an element", id))),
            None => Err(PageError::InvalidNode(format!("{} does not exist", id))),
        }
    }

    /// Tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|data| data.tag_name.as_str())
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData::new(tag_name)))
    }

    /// Create a detached text node
    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Parent of a node, `None` for the root and detached nodes
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    /// Children of a node in order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Element children of a node in order, skipping text
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == self.root {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Append `child` as the last child of `parent`, moving it if already attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        match self.node(parent)?.kind {
            NodeKind::Text(_) => {
                return Err(PageError::InvalidNode(format!(
                    "{} is a text node and cannot have children",
                    parent
                )));
            }
            NodeKind::Document | NodeKind::Element(_) => {}
        }

        if matches!(self.node(child)?.kind, NodeKind::Document) {
            return Err(PageError::InvalidNode(
                "the document node cannot be appended".to_string(),
            ));
        }

        if self.is_inclusive_ancestor(child, parent) {
            return Err(PageError::InvalidNode(format!(
                "appending {} to {} would create a cycle",
                self.describe(child),
                self.describe(parent)
            )));
        }

        if let Some(old_parent) = self.parent(child) {
            self.detach(old_parent, child);
        }
        self.attach(parent, child);

        log::debug!("appended {} to {}", self.describe(child), self.describe(parent));
        Ok(())
    }

    /// Remove `child` from `parent`'s children and return it
    ///
    /// Fails with [`PageError::NotAChild`] if `child` is not currently a
    /// direct child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        self.node(parent)?;
        self.node(child)?;

        if self.parent(child) != Some(parent) {
            return Err(PageError::NotAChild {
                parent: self.describe(parent),
                child: self.describe(child),
            });
        }

        self.detach(parent, child);
        log::debug!("removed {} from {}", self.describe(child), self.describe(parent));
        Ok(child)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.retain(|c| *c != child);
        self.nodes[child.0].parent = None;
    }

    /// Descendants of `from` in document order, excluding `from`
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(from).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// All connected elements in document order
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| self.element(*id).is_some())
            .collect()
    }

    /// First connected element with the given id
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|node| self.element(*node).and_then(ElementData::id) == Some(id))
    }

    /// Connected elements with the given tag name; `*` matches every element
    pub fn get_elements_by_tag_name(&self, tag_name: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|node| {
                tag_name == "*"
                    || self
                        .tag_name(*node)
                        .is_some_and(|tag| tag.eq_ignore_ascii_case(tag_name))
            })
            .collect()
    }

    /// Connected elements carrying the given class token
    pub fn get_elements_by_class_name(&self, class_name: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|node| self.has_class(*node, class_name))
            .collect()
    }

    /// First connected element matching `selector`
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let selector = ElementSelector::parse(selector)?;
        Ok(self
            .elements()
            .into_iter()
            .find(|node| selector.matches(self, *node)))
    }

    /// Every connected element matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let selector = ElementSelector::parse(selector)?;
        Ok(self
            .elements()
            .into_iter()
            .filter(|node| selector.matches(self, *node))
            .collect())
    }

    /// Attribute value on an element
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value wholesale
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        self.element_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        log::debug!("set {}=\"{}\" on {}", name, value, self.describe(id));
        Ok(())
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>> {
        Ok(self.element_mut(id)?.attributes.shift_remove(name))
    }

    /// Whether the element carries a class token
    pub fn has_class(&self, id: NodeId, class_name: &str) -> bool {
        self.element(id).is_some_and(|data| data.has_class(class_name))
    }

    /// Replace all children of an element with a single text node
    ///
    /// The text is taken literally; markup in it is not parsed. An empty
    /// string leaves the element with no children.
    pub fn set_content(&mut self, id: NodeId, text: &str) -> Result<()> {
        self.element_mut(id)?;

        for child in std::mem::take(&mut self.nodes[id.0].children) {
            self.nodes[child.0].parent = None;
        }

        if !text.is_empty() {
            let text_node = self.create_text_node(text);
            self.attach(id, text_node);
        }

        log::debug!("set content of {} to {:?}", self.describe(id), text);
        Ok(())
    }

    /// Concatenated text of every descendant text node
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(NodeKind::Text(text)) = self.kind(id) {
            return text.clone();
        }

        self.descendants(id)
            .into_iter()
            .filter_map(|node| match self.kind(node) {
                Some(NodeKind::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Short human-readable label such as `td#extracell` or `tr.row`
    pub fn describe(&self, id: NodeId) -> String {
        match self.kind(id) {
            Some(NodeKind::Document) => "#document".to_string(),
            Some(NodeKind::Text(_)) => format!("#text({})", id.0),
            Some(NodeKind::Element(data)) => {
                let mut label = data.tag_name.clone();
                if let Some(el_id) = data.id() {
                    label.push('#');
                    label.push_str(el_id);
                } else if let Some(class) = data
                    .attributes
                    .get("class")
                    .and_then(|c| c.split_whitespace().next())
                {
                    label.push('.');
                    label.push_str(class);
                }
                label
            }
            None => id.to_string(),
        }
    }

    /// Count connected elements
    pub fn count_elements(&self) -> usize {
        self.elements().len()
    }

    /// Snapshot an element subtree in the nested [`ElementNode`] form
    ///
    /// Text children are merged into `text_content`.
    pub fn to_element_node(&self, id: NodeId) -> Option<ElementNode> {
        let data = self.element(id)?;
        let mut node = ElementNode::new(data.tag_name.clone());
        node.attributes = data.attributes.clone();

        let mut text = String::new();
        for child in self.children(id) {
            match self.kind(*child) {
                Some(NodeKind::Text(t)) => text.push_str(t),
                Some(NodeKind::Element(_)) => {
                    if let Some(child_node) = self.to_element_node(*child) {
                        node.add_child(child_node);
                    }
                }
                _ => {}
            }
        }
        if !text.is_empty() {
            node.text_content = Some(text);
        }

        Some(node)
    }

    /// Serialize the document element to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        let root = self
            .document_element()
            .and_then(|id| self.to_element_node(id))
            .ok_or_else(|| PageError::InvalidNode("document has no element".to_string()))?;

        serde_json::to_string_pretty(&root)
            .map_err(|e| PageError::DocumentParseFailed(format!("Failed to serialize document: {}", e)))
    }

    /// Serialize the document to HTML markup
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for child in self.children(self.root) {
            self.write_html(*child, &mut out);
        }
        out
    }

    /// Serialize a single node (and its subtree) to HTML markup
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => out.push_str(&escape_text(text)),
            Some(NodeKind::Element(data)) => {
                out.push('<');
                out.push_str(&data.tag_name);
                for (name, value) in &data.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&data.tag_name.as_str()) {
                    return;
                }

                for child in self.children(id) {
                    self.write_html(*child, out);
                }
                out.push_str("</");
                out.push_str(&data.tag_name);
                out.push('>');
            }
            Some(NodeKind::Document) => {
                for child in self.children(id) {
                    self.write_html(*child, out);
                }
            }
            None => {}
        }
    }

    /// Render the document as Markdown
    pub fn to_markdown(&self) -> String {
        html2md::parse_html(&self.to_html())
    }
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
