use crate::dom::{ElementResolver, IdResolver, Query, SelectorResolver};
use crate::error::Result;
use crate::handlers::{ADD_ELEMENT, Handler, HandlerContext, HandlerResult, INITIALIZE};
use crate::page::{EventKind, EventTarget, ids};

pub const CELL1_CONTENT: &str = "I am Cell1";
pub const BIG_ARRAY: &str = "Big Array!";
pub const SMALL_ARRAY: &str = "Small Array!";

/// Load-time setup: content, size check, row highlighting, add-button wiring
///
/// Steps run in order and a failure leaves earlier effects in place. Only
/// cell1 and the add button are required; the cell9 and cell4 lookups are
/// informational.
#[derive(Debug, Default, Clone, Copy)]
pub struct InitializeHandler;

impl Handler for InitializeHandler {
    fn name(&self) -> &str {
        INITIALIZE
    }

    fn handle(&self, context: &mut HandlerContext<'_>) -> Result<HandlerResult> {
        let document = &mut *context.document;

        let cell1 = SelectorResolver.require(document, &format!("#{}", ids::CELL1))?;
        document.set_content(cell1, CELL1_CONTENT)?;

        let cell9 = IdResolver.resolve(document, ids::CELL9)?;
        let cell4 = Query::select(document, &format!("#{}", ids::CELL4))?;
        log::debug!(
            "cell9 {}, cell4 matched {} element(s) with text {:?}",
            cell9.map_or_else(|| "missing".to_string(), |node| document.describe(node)),
            cell4.len(),
            cell4.text(document)
        );

        let cells = document.get_elements_by_tag_name("td").len();
        let verdict = if cells > context.options.big_array_threshold {
            BIG_ARRAY
        } else {
            SMALL_ARRAY
        };
        context.console.log(verdict);

        let rows = Query::from_nodes(document.get_elements_by_class_name(&context.options.row_class));
        rows.set_attr(document, "style", &context.options.highlight_style)?;

        let add_button = SelectorResolver.require(document, &format!("#{}", ids::ADD_BUTTON))?;
        context
            .listeners
            .set_listener(EventTarget::Node(add_button), EventKind::Click, ADD_ELEMENT);

        Ok(HandlerResult::with_data(serde_json::json!({
            "cells": cells,
            "rows": rows.len(),
            "verdict": verdict,
        })))
    }
}
