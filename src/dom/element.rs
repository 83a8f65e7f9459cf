use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Serializable, nested form of an element subtree
///
/// This is the interchange shape used to load a page from JSON and to export
/// a [`Document`](crate::dom::Document) back out. The live document itself is
/// an arena; `ElementNode` is only a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "table", "tr", "td")
    pub tag_name: String,

    /// Element attributes in source order (e.g., id, class, style)
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Text content placed before any child elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,

    /// Child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            text_content: None,
            children: Vec::new(),
        }
    }

    /// Builder method: set the id attribute
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.add_attribute("id", id);
        self
    }

    /// Builder method: set the class attribute
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_attribute("class", class);
        self
    }

    /// Builder method: set a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        self.children = children;
        self
    }

    /// Add a single attribute, replacing any previous value
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(child);
    }

    /// Check if element has a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attributes
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    /// Get element ID
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id")
    }

    /// Count this element and all of its descendants
    pub fn count_elements(&self) -> usize {
        1 + self.children.iter().map(ElementNode::count_elements).sum::<usize>()
    }

    /// Convert to a one-line opening-tag summary, used in logs
    pub fn to_simple_string(&self) -> String {
        let mut parts = vec![format!("<{}", self.tag_name)];

        if let Some(id) = self.id() {
            parts.push(format!(" id=\"{}\"", id));
        }

        if let Some(class) = self.attributes.get("class") {
            parts.push(format!(" class=\"{}\"", class));
        }

        parts.push(">".to_string());

        if let Some(text) = &self.text_content {
            if !text.trim().is_empty() {
                parts.push(text.trim().to_string());
            }
        }

        parts.join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_creation() {
        let element = ElementNode::new("td")
            .with_id("cell5")
            .with_class("center wide")
            .with_text("CENTER");

        assert_eq!(element.tag_name, "td");
        assert_eq!(element.id(), Some(&"cell5".to_string()));
        assert_eq!(element.text_content, Some("CENTER".to_string()));
    }

    #[test]
    fn test_has_class() {
        let mut element = ElementNode::new("tr");
        element.add_attribute("class", "row striped  odd");

        assert!(element.has_class("row"));
        assert!(element.has_class("striped"));
        assert!(element.has_class("odd"));
        assert!(!element.has_class("ro"));
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let element = ElementNode::new("button")
            .with_id("addButton")
            .with_attribute("type", "button")
            .with_class("primary");

        let keys: Vec<_> = element.attributes.keys().cloned().collect();
        assert_eq!(keys, vec!["id", "type", "class"]);
    }

    #[test]
    fn test_count_elements() {
        let row = ElementNode::new("tr").with_children(vec![
            ElementNode::new("td"),
            ElementNode::new("td"),
        ]);
        let table = ElementNode::new("table").with_children(vec![row]);

        assert_eq!(table.count_elements(), 4);
    }

    #[test]
    fn test_serialization() {
        let element = ElementNode::new("tr")
            .with_class("row")
            .with_children(vec![ElementNode::new("td").with_id("cell1").with_text("1")]);

        let json = serde_json::to_string(&element).unwrap();
        let deserialized: ElementNode = serde_json::from_str(&json).unwrap();

        assert_eq!(element, deserialized);
    }

    #[test]
    fn test_deserialize_minimal() {
        let element: ElementNode = serde_json::from_str(r#"{"tag_name": "td"}"#).unwrap();
        assert!(element.attributes.is_empty());
        assert!(element.children.is_empty());
        assert!(element.text_content.is_none());
    }

    #[test]
    fn test_to_simple_string() {
        let element = ElementNode::new("button")
            .with_id("addButton")
            .with_class("btn primary")
            .with_text("  ADD  ");

        let simple = element.to_simple_string();
        assert_eq!(simple, "<button id=\"addButton\" class=\"btn primary\">ADD");
    }
}
