//! # table-controller
//!
//! An in-memory DOM and a page controller for a small table exercise: select
//! nodes, mutate attributes and content, and add or remove a cell in
//! response to clicks.
//!
//! ## Features
//!
//! - **Document**: arena-backed element tree with `getElementById`,
//!   `querySelector`, tag and class lookups, and HTML/JSON/Markdown output
//! - **Interchangeable lookups**: by id, by selector, or through a
//!   jQuery-style [`Query`] set, all behind [`ElementResolver`]
//! - **Page Controller**: load and click events dispatched one at a time to
//!   named handlers
//! - **Strict or hardened**: keep the exercise's unguarded add/delete
//!   behaviour, or make double-add and double-delete harmless
//!
//! ## Usage
//!
//! ```rust
//! use table_controller::{PageController, fixture};
//!
//! # fn main() -> table_controller::Result<()> {
//! let mut page = PageController::new(fixture::exam_page());
//!
//! // Fire the load event: sets cell1, logs the size check, highlights rows
//! page.load()?;
//! assert_eq!(page.console().messages(), vec!["Small Array!"]);
//!
//! // The add button now appends a cell with a DELETE ME button
//! page.click("#addButton")?;
//! assert!(page.document().get_element_by_id("extracell").is_some());
//!
//! // ...which removes it again
//! page.click("#extracell button")?;
//! assert!(page.document().get_element_by_id("extracell").is_none());
//! # Ok(())
//! # }
//! ```
//!
//! Deleting when nothing was added is an error in the default strict mode:
//!
//! ```rust
//! use table_controller::{PageController, PageError, fixture};
//!
//! let mut page = PageController::new(fixture::exam_page());
//! assert!(matches!(page.delete_element(), Err(PageError::ElementNotFound(_))));
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: document tree, selectors, lookup strategies
//! - [`page`]: page controller, options, console, events, exercise fixture
//! - [`handlers`]: Initialize, Add Element and Delete Element
//! - [`error`]: Error types and result aliases

pub mod dom;
pub mod error;
pub mod handlers;
pub mod page;

pub use dom::{Document, ElementNode, ElementResolver, ElementSelector, NodeId, Query};
pub use error::{PageError, Result};
pub use handlers::{Handler, HandlerContext, HandlerRegistry, HandlerResult};
pub use page::{Console, Event, EventKind, EventTarget, PageController, PageOptions, fixture};
