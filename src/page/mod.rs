//! The page controller and everything it owns
//!
//! - PageController: document handle, console, listeners, event dispatch
//! - PageOptions: strict/hardened behaviour and styling configuration
//! - Console: captured diagnostic output
//! - EventListeners: explicit (target, event) subscriptions
//! - fixture: the exercise page markup

pub mod config;
pub mod console;
pub mod controller;
pub mod events;
pub mod fixture;

pub use config::PageOptions;
pub use console::{Console, ConsoleEntry, ConsoleLevel};
pub use controller::PageController;
pub use events::{Event, EventKind, EventListeners, EventTarget};

/// Fixed element ids the controller relies on
pub mod ids {
    pub const CELL1: &str = "cell1";
    pub const CELL4: &str = "cell4";
    pub const CELL9: &str = "cell9";
    pub const ADD_BUTTON: &str = "addButton";
    pub const SECOND_ROW: &str = "secondRow";
    pub const EXTRA_CELL: &str = "extracell";
}
