use crate::dom::{Document, ElementResolver, NodeId, SelectorResolver};
use crate::error::{PageError, Result};
use crate::handlers::{ADD_ELEMENT, DELETE_ELEMENT, HandlerContext, HandlerRegistry, HandlerResult, INITIALIZE};
use crate::page::config::PageOptions;
use crate::page::console::Console;
use crate::page::events::{Event, EventKind, EventListeners, EventTarget};
use std::collections::VecDeque;

/// Binds behaviour to a document and dispatches events to it
///
/// The controller owns the document handle for its lifetime. Events are
/// handled strictly one at a time; each handler runs to completion before
/// the next one starts.
pub struct PageController {
    /// The live document
    document: Document,

    /// Captured console output
    console: Console,

    /// (target, event) subscriptions
    listeners: EventListeners,

    /// Handlers the listeners refer to by name
    registry: HandlerRegistry,

    /// Behaviour switches
    options: PageOptions,

    /// Events waiting for [`PageController::run_pending`]
    queue: VecDeque<Event>,
}

impl PageController {
    /// Wrap a document with default options
    pub fn new(document: Document) -> Self {
        Self::with_options(document, PageOptions::default())
    }

    /// Wrap a document; subscribes Initialize to the window load event
    pub fn with_options(document: Document, options: PageOptions) -> Self {
        let mut listeners = EventListeners::new();
        listeners.add_listener(EventTarget::Window, EventKind::Load, INITIALIZE);

        Self {
            document,
            console: Console::new(),
            listeners,
            registry: HandlerRegistry::with_defaults(),
            options,
            queue: VecDeque::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Give the document back, dropping the controller
    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn listeners(&self) -> &EventListeners {
        &self.listeners
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Get the handler registry
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Get mutable handler registry
    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }

    /// Fire the window load event
    pub fn load(&mut self) -> Result<()> {
        self.dispatch(Event::load())
    }

    /// Click the first element matching `selector`
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let node = SelectorResolver.require(&self.document, selector)?;
        self.dispatch(Event::click(node))
    }

    /// Click a specific node
    pub fn click_node(&mut self, node: NodeId) -> Result<()> {
        self.dispatch(Event::click(node))
    }

    /// Run Add Element directly, as the add button would
    pub fn add_element(&mut self) -> Result<HandlerResult> {
        self.run_handler(ADD_ELEMENT)
    }

    /// Run Delete Element directly, as a DELETE ME button would
    pub fn delete_element(&mut self) -> Result<HandlerResult> {
        self.run_handler(DELETE_ELEMENT)
    }

    /// Deliver one event to its listeners, stopping at the first failure
    ///
    /// Clicks on detached nodes or nodes without listeners do nothing.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        if let EventTarget::Node(node) = event.target {
            if !self.document.is_connected(node) {
                log::debug!("ignoring {} on detached {}", event.kind, node);
                return Ok(());
            }
        }

        let handlers = self.listeners.listeners(event.target, event.kind).to_vec();
        log::info!(
            "dispatching {} on {:?} to {} handler(s)",
            event.kind,
            event.target,
            handlers.len()
        );

        for name in handlers {
            self.run_handler(&name)?;
        }
        Ok(())
    }

    /// Queue an event for later dispatch
    pub fn enqueue(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Number of queued events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drain the queue in FIFO order
    ///
    /// A failing event is reported to the console as uncaught and the
    /// remaining events still run. Returns the errors that were reported.
    pub fn run_pending(&mut self) -> Vec<PageError> {
        let mut errors = Vec::new();
        while let Some(event) = self.queue.pop_front() {
            if let Err(err) = self.dispatch(event) {
                self.report_uncaught(&err);
                errors.push(err);
            }
        }
        errors
    }

    /// Record an error the way a browser reports an uncaught exception
    pub fn report_uncaught(&mut self, err: &PageError) {
        self.console.error(format!("Uncaught {}", err));
    }

    fn run_handler(&mut self, name: &str) -> Result<HandlerResult> {
        let mut context = HandlerContext {
            document: &mut self.document,
            console: &mut self.console,
            listeners: &mut self.listeners,
            options: &self.options,
        };
        self.registry.execute(name, &mut context)
    }
}
