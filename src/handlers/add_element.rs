use crate::dom::{ElementResolver, IdResolver};
use crate::error::Result;
use crate::handlers::{ADD_ELEMENT, DELETE_ELEMENT, Handler, HandlerContext, HandlerResult};
use crate::page::{EventKind, EventTarget, ids};

pub const DELETE_BUTTON_LABEL: &str = "DELETE ME";

/// Append a `td#extracell` holding a DELETE ME button to the second row
#[derive(Debug, Default, Clone, Copy)]
pub struct AddElementHandler;

impl Handler for AddElementHandler {
    fn name(&self) -> &str {
        ADD_ELEMENT
    }

    fn handle(&self, context: &mut HandlerContext<'_>) -> Result<HandlerResult> {
        let document = &mut *context.document;
        let second_row = IdResolver.require(document, ids::SECOND_ROW)?;

        if !context.options.strict {
            if let Some(existing) = document.get_element_by_id(ids::EXTRA_CELL) {
                log::warn!("{} already present, reusing it", document.describe(existing));
                return Ok(HandlerResult::with_data(serde_json::json!({
                    "cell": existing.index(),
                    "created": false,
                })));
            }
        }

        let td = document.create_element("td");
        document.set_attribute(td, "id", ids::EXTRA_CELL)?;

        let button = document.create_element("button");
        document.set_content(button, DELETE_BUTTON_LABEL)?;
        context
            .listeners
            .set_listener(EventTarget::Node(button), EventKind::Click, DELETE_ELEMENT);

        document.append_child(td, button)?;
        document.append_child(second_row, td)?;

        Ok(HandlerResult::with_data(serde_json::json!({
            "cell": td.index(),
            "button": button.index(),
            "created": true,
        })))
    }
}
