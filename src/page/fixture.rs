//! The exercise page: a 3x3 table and an add button

use crate::dom::{Document, ElementNode};
use crate::page::ids;

/// Markup the controller is written against, as an element tree
///
/// ```text
/// <body>
///   <table id="table">
///     <tr class="row"><td id="cell1">1</td><td id="cell2">2</td><td id="cell3">3</td></tr>
///     <tr class="row" id="secondRow"><td id="cell4">4</td><td id="cell5">CENTER</td><td id="cell6">6</td></tr>
///     <tr class="row"><td id="cell7">7</td><td id="cell8">8</td><td id="cell9">9</td></tr>
///   </table>
///   <button id="addButton">ADD</button>
/// </body>
/// ```
pub fn exam_page_element() -> ElementNode {
    let row = |id: Option<&str>, cells: [(&str, &str); 3]| {
        let mut tr = ElementNode::new("tr").with_class("row");
        if let Some(id) = id {
            tr.add_attribute("id", id);
        }
        tr.with_children(
            cells
                .iter()
                .map(|(id, text)| ElementNode::new("td").with_id(*id).with_text(*text))
                .collect(),
        )
    };

    ElementNode::new("body").with_children(vec![
        ElementNode::new("table").with_id("table").with_children(vec![
            row(None, [(ids::CELL1, "1"), ("cell2", "2"), ("cell3", "3")]),
            row(
                Some(ids::SECOND_ROW),
                [(ids::CELL4, "4"), ("cell5", "CENTER"), ("cell6", "6")],
            ),
            row(None, [("cell7", "7"), ("cell8", "8"), (ids::CELL9, "9")]),
        ]),
        ElementNode::new("button").with_id(ids::ADD_BUTTON).with_text("ADD"),
    ])
}

/// The exercise page as a live document
pub fn exam_page() -> Document {
    Document::from_element(&exam_page_element())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_page_shape() {
        let doc = exam_page();

        assert_eq!(doc.get_elements_by_tag_name("td").len(), 9);
        assert_eq!(doc.get_elements_by_class_name("row").len(), 3);

        let second_row = doc.get_element_by_id(ids::SECOND_ROW).unwrap();
        assert!(doc.has_class(second_row, "row"));
        assert!(doc.text_content(second_row).contains("CENTER"));
        assert!(doc.get_element_by_id(ids::ADD_BUTTON).is_some());
    }

    #[test]
    fn test_second_row_is_the_center_row() {
        let doc = exam_page();
        let rows = doc.get_elements_by_tag_name("tr");

        let center_row = rows
            .iter()
            .copied()
            .find(|row| {
                doc.element_children(*row)
                    .iter()
                    .any(|cell| doc.text_content(*cell) == "CENTER")
            })
            .unwrap();

        assert_eq!(rows[1], center_row);
        assert_eq!(doc.get_element_by_id(ids::SECOND_ROW), Some(center_row));
    }
}
