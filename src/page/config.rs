use serde::{Deserialize, Serialize};

/// Behaviour switches for a [`PageController`](crate::page::PageController)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOptions {
    /// Strict mode keeps the exercise's unguarded behaviour: a second Add
    /// duplicates the extra cell and Delete without a cell is an error.
    /// With `strict` off, Add reuses an existing cell and Delete is a no-op.
    pub strict: bool,

    /// A page with more `td` cells than this logs "Big Array!"
    pub big_array_threshold: usize,

    /// Class shared by every table row that gets highlighted
    pub row_class: String,

    /// Value written to each row's `style` attribute
    pub highlight_style: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            strict: true,
            big_array_threshold: 9,
            row_class: "row".to_string(),
            highlight_style: "background-color: yellow".to_string(),
        }
    }
}

impl PageOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: strict or hardened add/delete behaviour
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builder method: cell-count threshold for "Big Array!"
    pub fn big_array_threshold(mut self, threshold: usize) -> Self {
        self.big_array_threshold = threshold;
        self
    }

    /// Builder method: row class to highlight
    pub fn row_class(mut self, class: impl Into<String>) -> Self {
        self.row_class = class.into();
        self
    }

    /// Builder method: style applied to highlighted rows
    pub fn highlight_style(mut self, style: impl Into<String>) -> Self {
        self.highlight_style = style.into();
        self
    }
}
