use thiserror::Error;

/// Errors raised while querying or mutating a page
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PageError {
    /// A lookup by id or selector matched nothing
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// `remove_child` was asked to detach a node from something that is not its parent
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: String, child: String },

    /// Selector syntax outside the supported compound form
    #[error("Unsupported selector: {0}")]
    UnsupportedSelector(String),

    /// A node id that does not refer to a usable node for the operation
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    /// A serialized document could not be read
    #[error("Failed to parse document: {0}")]
    DocumentParseFailed(String),

    /// No handler registered under the requested name
    #[error("Handler not found: {0}")]
    HandlerNotFound(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PageError>;
