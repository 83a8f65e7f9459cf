//! Named event handlers
//!
//! Every behaviour the page exposes is a [`Handler`] registered by name in a
//! [`HandlerRegistry`]. Listeners refer to handlers by that name, so wiring
//! "on click of X run Y" is just data in the listener table.

pub mod add_element;
pub mod delete_element;
pub mod initialize;

pub use add_element::AddElementHandler;
pub use delete_element::DeleteElementHandler;
pub use initialize::InitializeHandler;

use crate::dom::Document;
use crate::error::{PageError, Result};
use crate::page::{Console, EventListeners, PageOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Handler name for the load-time setup
pub const INITIALIZE: &str = "initialize";
/// Handler name for adding the extra cell
pub const ADD_ELEMENT: &str = "add_element";
/// Handler name for removing the extra cell
pub const DELETE_ELEMENT: &str = "delete_element";

/// Everything a handler may touch while it runs
pub struct HandlerContext<'a> {
    /// Document being manipulated; borrowed from the controller
    pub document: &'a mut Document,

    /// Console output
    pub console: &'a mut Console,

    /// Listener table, for handlers that subscribe further handlers
    pub listeners: &'a mut EventListeners,

    /// Behaviour switches
    pub options: &'a PageOptions,
}

/// Outcome of a handler run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandlerResult {
    /// Handler-specific details (created node, counts, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl HandlerResult {
    /// A result carrying details
    pub fn with_data(data: serde_json::Value) -> Self {
        Self { data: Some(data) }
    }
}

/// A behaviour that runs to completion against a [`HandlerContext`]
pub trait Handler: Send + Sync {
    /// Registry name
    fn name(&self) -> &str;

    /// Run the handler
    fn handle(&self, context: &mut HandlerContext<'_>) -> Result<HandlerResult>;
}

/// Registry of handlers by name
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the page's handlers registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(InitializeHandler);
        registry.register(AddElementHandler);
        registry.register(DeleteElementHandler);
        registry
    }

    /// Register a handler under its own name, replacing any previous one
    pub fn register<H: Handler + 'static>(&mut self, handler: H) {
        let name = handler.name().to_string();
        self.handlers.insert(name, Arc::new(handler));
    }

    /// Look up a handler
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Handler>> {
        self.handlers.get(name)
    }

    /// Whether a handler with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered handler names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run a handler by name
    pub fn execute(&self, name: &str, context: &mut HandlerContext<'_>) -> Result<HandlerResult> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| PageError::HandlerNotFound(name.to_string()))?;

        log::debug!("running handler '{}'", name);
        handler.handle(context)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
