use crate::dom::NodeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Load,
    Click,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Load => write!(f, "load"),
            EventKind::Click => write!(f, "click"),
        }
    }
}

/// What an event is fired at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTarget {
    Window,
    Node(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub target: EventTarget,
}

impl Event {
    /// The window `load` event
    pub fn load() -> Self {
        Self {
            kind: EventKind::Load,
            target: EventTarget::Window,
        }
    }

    /// A `click` on an element
    pub fn click(node: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target: EventTarget::Node(node),
        }
    }
}

/// Listener table: (target, event kind) to handler names, in registration order
#[derive(Debug, Clone, Default)]
pub struct EventListeners {
    map: IndexMap<(EventTarget, EventKind), Vec<String>>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a named handler
    pub fn add_listener(&mut self, target: EventTarget, kind: EventKind, handler: impl Into<String>) {
        let handler = handler.into();
        log::debug!("listening for {} on {:?} with '{}'", kind, target, handler);
        self.map.entry((target, kind)).or_default().push(handler);
    }

    /// Bind a single handler to (target, kind), replacing any earlier ones
    ///
    /// This is the `onclick = ...` style of subscription, as opposed to the
    /// appending [`EventListeners::add_listener`].
    pub fn set_listener(&mut self, target: EventTarget, kind: EventKind, handler: impl Into<String>) {
        let handler = handler.into();
        log::debug!("binding {} on {:?} to '{}'", kind, target, handler);
        self.map.insert((target, kind), vec![handler]);
    }

    /// Handler names subscribed to (target, kind)
    pub fn listeners(&self, target: EventTarget, kind: EventKind) -> &[String] {
        self.map
            .get(&(target, kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Drop every listener on `target`
    pub fn remove_target(&mut self, target: EventTarget) {
        self.map.retain(|(t, _), _| *t != target);
    }

    /// Number of (target, kind) pairs with at least one listener
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
