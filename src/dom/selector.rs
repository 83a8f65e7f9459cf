use crate::dom::tree::{Document, ElementData, NodeId};
use crate::error::{PageError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One compound part of a selector: `tag#id.class.class`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompoundSelector {
    /// Tag name, lowercased. `None` matches any tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    /// Required id attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Class tokens that must all be present
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
}

impl CompoundSelector {
    /// Check a single element against this compound
    pub fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = &self.tag_name {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if let Some(id) = &self.id {
            if element.attributes.get("id") != Some(id) {
                return false;
            }
        }

        self.classes.iter().all(|class| element.has_class(class))
    }

    fn is_empty(&self) -> bool {
        self.tag_name.is_none() && self.id.is_none() && self.classes.is_empty()
    }

    fn parse(raw: &str, full: &str) -> Result<Self> {
        let unsupported = || PageError::UnsupportedSelector(full.to_string());
        let mut compound = CompoundSelector::default();
        let mut rest = raw;

        if let Some(stripped) = rest.strip_prefix('*') {
            rest = stripped;
        } else {
            let (tag, tail) = split_ident(rest);
            if !tag.is_empty() {
                compound.tag_name = Some(tag.to_ascii_lowercase());
            }
            rest = tail;
        }

        while let Some(marker) = rest.chars().next() {
            let (ident, tail) = split_ident(&rest[marker.len_utf8()..]);
            if ident.is_empty() {
                return Err(unsupported());
            }
            match marker {
                '#' if compound.id.is_none() => compound.id = Some(ident.to_string()),
                '.' => compound.classes.push(ident.to_string()),
                _ => return Err(unsupported()),
            }
            rest = tail;
        }

        if compound.is_empty() && !raw.starts_with('*') {
            return Err(unsupported());
        }

        Ok(compound)
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag_name {
            Some(tag) => write!(f, "{}", tag)?,
            None if self.id.is_none() && self.classes.is_empty() => write!(f, "*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        Ok(())
    }
}

/// Split the leading identifier (`[A-Za-z0-9_-]+`) off a selector fragment
fn split_ident(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(input.len());
    input.split_at(end)
}

/// A parsed selector: compound parts joined by descendant combinators
///
/// Supported syntax is deliberately small: `td`, `#cell1`, `.row`,
/// `tr#secondRow.row`, `#extracell button`. Anything else (child combinators,
/// attribute selectors, pseudo-classes, selector lists) is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElementSelector {
    parts: Vec<CompoundSelector>,
}

impl ElementSelector {
    /// Parse a selector string
    pub fn parse(selector: &str) -> Result<Self> {
        let parts = selector
            .split_whitespace()
            .map(|raw| CompoundSelector::parse(raw, selector))
            .collect::<Result<Vec<_>>>()?;

        if parts.is_empty() {
            return Err(PageError::UnsupportedSelector(selector.to_string()));
        }

        Ok(Self { parts })
    }

    /// Selector matching a single id
    pub fn id(id: impl Into<String>) -> Self {
        Self::from_compound(CompoundSelector {
            id: Some(id.into()),
            ..Default::default()
        })
    }

    /// Selector matching a class token
    pub fn class(class: impl Into<String>) -> Self {
        Self::from_compound(CompoundSelector {
            classes: vec![class.into()],
            ..Default::default()
        })
    }

    /// Selector matching a tag name
    pub fn tag(tag_name: impl Into<String>) -> Self {
        Self::from_compound(CompoundSelector {
            tag_name: Some(tag_name.into().to_ascii_lowercase()),
            ..Default::default()
        })
    }

    fn from_compound(compound: CompoundSelector) -> Self {
        Self { parts: vec![compound] }
    }

    /// Compound parts, outermost ancestor first
    pub fn parts(&self) -> &[CompoundSelector] {
        &self.parts
    }

    /// The id this selector pins down, if it is exactly `#id`
    pub fn as_plain_id(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [only] if only.tag_name.is_none() && only.classes.is_empty() => only.id.as_deref(),
            _ => None,
        }
    }

    /// Check whether `node` in `document` matches this selector
    pub fn matches(&self, document: &Document, node: NodeId) -> bool {
        let Some((last, ancestors)) = self.parts.split_last() else {
            return false;
        };

        match document.element(node) {
            Some(element) if last.matches(element) => {}
            _ => return false,
        }

        // Descendant combinators only, so matching each remaining part against
        // the nearest qualifying ancestor is sufficient.
        let mut cursor = document.parent(node);
        for part in ancestors.iter().rev() {
            loop {
                let Some(current) = cursor else {
                    return false;
                };
                cursor = document.parent(current);
                if document.element(current).is_some_and(|el| part.matches(el)) {
                    break;
                }
            }
        }

        true
    }
}

impl FromStr for ElementSelector {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ElementSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// A strategy for resolving one element out of a document
///
/// The page controller does not care how an element is found, only that it
/// is. Implementations: [`IdResolver`], [`SelectorResolver`] and
/// [`QueryResolver`](crate::dom::query::QueryResolver).
pub trait ElementResolver {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    /// Resolve `key` to the first matching element, if any
    fn resolve(&self, document: &Document, key: &str) -> Result<Option<NodeId>>;

    /// Resolve `key`, treating no match as an error
    fn require(&self, document: &Document, key: &str) -> Result<NodeId> {
        let node = self.resolve(document, key)?;
        log::debug!("{} resolved '{}' to {:?}", self.name(), key, node);
        node.ok_or_else(|| PageError::ElementNotFound(format!("{} (via {})", key, self.name())))
    }
}

/// `document.getElementById`: the key is a bare id
#[derive(Debug, Default, Clone, Copy)]
pub struct IdResolver;

impl ElementResolver for IdResolver {
    fn name(&self) -> &str {
        "getElementById"
    }

    fn resolve(&self, document: &Document, key: &str) -> Result<Option<NodeId>> {
        Ok(document.get_element_by_id(key))
    }
}

/// `document.querySelector`: the key is a selector
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectorResolver;

impl ElementResolver for SelectorResolver {
    fn name(&self) -> &str {
        "querySelector"
    }

    fn resolve(&self, document: &Document, key: &str) -> Result<Option<NodeId>> {
        document.query_selector(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementNode;

    fn sample() -> Document {
        let table = ElementNode::new("table").with_id("grid").with_children(vec![
            ElementNode::new("tr").with_class("row").with_children(vec![
                ElementNode::new("td").with_id("cell1").with_text("1"),
                ElementNode::new("td").with_id("cell2").with_class("wide odd"),
            ]),
            ElementNode::new("tr")
                .with_id("secondRow")
                .with_class("row")
                .with_children(vec![ElementNode::new("td").with_id("cell4").with_children(vec![
                    ElementNode::new("button").with_text("DELETE ME"),
                ])]),
        ]);
        Document::from_element(&table)
    }

    #[test]
    fn test_parse_compound() {
        let selector = ElementSelector::parse("tr#secondRow.row.striped").unwrap();
        let part = &selector.parts()[0];

        assert_eq!(part.tag_name.as_deref(), Some("tr"));
        assert_eq!(part.id.as_deref(), Some("secondRow"));
        assert_eq!(part.classes, vec!["row", "striped"]);
        assert_eq!(selector.to_string(), "tr#secondRow.row.striped");
    }

    #[test]
    fn test_parse_descendant() {
        let selector: ElementSelector = "#extracell  button".parse().unwrap();
        assert_eq!(selector.parts().len(), 2);
        assert_eq!(selector.to_string(), "#extracell button");
        assert!(selector.as_plain_id().is_none());
    }

    #[test]
    fn test_parse_rejects_unsupported() {
        for raw in ["", "   ", "tr > td", "td:first-child", "[id=x]", "a,b", "#", ".", "#a#b"] {
            let err = ElementSelector::parse(raw).unwrap_err();
            assert!(
                matches!(err, PageError::UnsupportedSelector(_)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_constructors() {
        assert_eq!(ElementSelector::id("cell1").to_string(), "#cell1");
        assert_eq!(ElementSelector::id("cell1").as_plain_id(), Some("cell1"));
        assert_eq!(ElementSelector::class("row").to_string(), ".row");
        assert_eq!(ElementSelector::tag("TD").to_string(), "td");
        assert_eq!(ElementSelector::parse("*").unwrap().to_string(), "*");
    }

    #[test]
    fn test_matches() {
        let doc = sample();
        let cell2 = doc.get_element_by_id("cell2").unwrap();

        assert!(ElementSelector::parse("td.wide").unwrap().matches(&doc, cell2));
        assert!(ElementSelector::parse(".odd.wide").unwrap().matches(&doc, cell2));
        assert!(ElementSelector::parse("table tr td").unwrap().matches(&doc, cell2));
        assert!(ElementSelector::parse("#grid .row #cell2").unwrap().matches(&doc, cell2));
        assert!(!ElementSelector::parse("#secondRow td").unwrap().matches(&doc, cell2));
        assert!(!ElementSelector::parse("td.narrow").unwrap().matches(&doc, cell2));
    }

    #[test]
    fn test_resolvers_agree() {
        let doc = sample();

        let by_id = IdResolver.resolve(&doc, "cell4").unwrap();
        let by_selector = SelectorResolver.resolve(&doc, "#cell4").unwrap();

        assert!(by_id.is_some());
        assert_eq!(by_id, by_selector);
    }

    #[test]
    fn test_require_missing() {
        let doc = sample();

        let err = IdResolver.require(&doc, "cell9").unwrap_err();
        assert_eq!(
            err,
            PageError::ElementNotFound("cell9 (via getElementById)".to_string())
        );

        let err = SelectorResolver.require(&doc, "#cell9").unwrap_err();
        assert!(matches!(err, PageError::ElementNotFound(_)));
    }
}
