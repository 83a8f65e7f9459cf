use crate::dom::{ElementResolver, IdResolver};
use crate::error::Result;
use crate::handlers::{DELETE_ELEMENT, Handler, HandlerContext, HandlerResult};
use crate::page::{EventTarget, ids};

/// Remove `td#extracell` from the second row
///
/// In strict mode a missing cell is an error, matching what the DOM does
/// when asked to remove nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeleteElementHandler;

impl Handler for DeleteElementHandler {
    fn name(&self) -> &str {
        DELETE_ELEMENT
    }

    fn handle(&self, context: &mut HandlerContext<'_>) -> Result<HandlerResult> {
        let document = &mut *context.document;

        let child = match document.get_element_by_id(ids::EXTRA_CELL) {
            Some(child) => child,
            None if !context.options.strict => {
                log::warn!("no {} to delete, ignoring", ids::EXTRA_CELL);
                return Ok(HandlerResult::with_data(serde_json::json!({ "removed": false })));
            }
            None => IdResolver.require(document, ids::EXTRA_CELL)?,
        };
        let parent = IdResolver.require(document, ids::SECOND_ROW)?;
        log::debug!("removing {}", document.outer_html(child));

        document.remove_child(parent, child)?;

        for node in document.descendants(child) {
            context.listeners.remove_target(EventTarget::Node(node));
        }

        Ok(HandlerResult::with_data(serde_json::json!({
            "cell": child.index(),
            "removed": true,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::error::PageError;
    use crate::handlers::AddElementHandler;
    use crate::page::fixture::exam_page;
    use crate::page::{Console, EventListeners, PageOptions};

    fn run(
        handler: &dyn Handler,
        document: &mut Document,
        listeners: &mut EventListeners,
        options: &PageOptions,
    ) -> Result<HandlerResult> {
        let mut console = Console::new();
        let mut context = HandlerContext {
            document,
            console: &mut console,
            listeners,
            options,
        };
        handler.handle(&mut context)
    }

    #[test]
    fn test_add_then_delete_restores_row() {
        let mut doc = exam_page();
        let mut listeners = EventListeners::new();
        let options = PageOptions::default();
        let second_row = doc.get_element_by_id(ids::SECOND_ROW).unwrap();
        let before = doc.element_children(second_row).len();

        run(&AddElementHandler, &mut doc, &mut listeners, &options).unwrap();
        run(&DeleteElementHandler, &mut doc, &mut listeners, &options).unwrap();

        assert_eq!(doc.element_children(second_row).len(), before);
        assert_eq!(doc.get_element_by_id(ids::EXTRA_CELL), None);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_strict_delete_without_cell_fails() {
        let mut doc = exam_page();
        let mut listeners = EventListeners::new();

        let err = run(&DeleteElementHandler, &mut doc, &mut listeners, &PageOptions::default())
            .unwrap_err();

        assert_eq!(
            err,
            PageError::ElementNotFound("extracell (via getElementById)".to_string())
        );
    }

    #[test]
    fn test_strict_double_delete_fails() {
        let mut doc = exam_page();
        let mut listeners = EventListeners::new();
        let options = PageOptions::default();

        run(&AddElementHandler, &mut doc, &mut listeners, &options).unwrap();
        run(&DeleteElementHandler, &mut doc, &mut listeners, &options).unwrap();
        let second = run(&DeleteElementHandler, &mut doc, &mut listeners, &options);

        assert!(matches!(second, Err(PageError::ElementNotFound(_))));
    }

    #[test]
    fn test_hardened_delete_without_cell_is_noop() {
        let mut doc = exam_page();
        let mut listeners = EventListeners::new();
        let options = PageOptions::new().strict(false);
        let html_before = doc.to_html();

        let result = run(&DeleteElementHandler, &mut doc, &mut listeners, &options).unwrap();

        assert_eq!(result.data.unwrap()["removed"], false);
        assert_eq!(doc.to_html(), html_before);
    }

    #[test]
    fn test_cell_outside_second_row_is_not_a_child() {
        let mut doc = exam_page();
        let mut listeners = EventListeners::new();
        let cell1 = doc.get_element_by_id(ids::CELL1).unwrap();
        doc.set_attribute(cell1, "id", ids::EXTRA_CELL).unwrap();

        let err = run(&DeleteElementHandler, &mut doc, &mut listeners, &PageOptions::default())
            .unwrap_err();

        assert!(matches!(err, PageError::NotAChild { .. }));
    }

    #[test]
    fn test_duplicate_cells_removed_first_in_order() {
        let mut doc = exam_page();
        let mut listeners = EventListeners::new();
        let options = PageOptions::default();

        run(&AddElementHandler, &mut doc, &mut listeners, &options).unwrap();
        run(&AddElementHandler, &mut doc, &mut listeners, &options).unwrap();
        let extras = doc.query_selector_all("#extracell").unwrap();

        run(&DeleteElementHandler, &mut doc, &mut listeners, &options).unwrap();

        assert_eq!(doc.get_element_by_id(ids::EXTRA_CELL), Some(extras[1]));
        assert!(!doc.is_connected(extras[0]));
    }
}
