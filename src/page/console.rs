use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    Log,
    Error,
}

impl fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleLevel::Log => write!(f, "log"),
            ConsoleLevel::Error => write!(f, "error"),
        }
    }
}

/// One line written to the page console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleEntry {
    pub level: ConsoleLevel,
    pub message: String,
}

impl fmt::Display for ConsoleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Diagnostic output captured from handlers
///
/// Entries are kept in order for inspection and mirrored to the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct Console {
    entries: Vec<ConsoleEntry>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// `console.log`
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("console.log: {}", message);
        self.entries.push(ConsoleEntry {
            level: ConsoleLevel::Log,
            message,
        });
    }

    /// `console.error`
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("console.error: {}", message);
        self.entries.push(ConsoleEntry {
            level: ConsoleLevel::Error,
            message,
        });
    }

    pub fn entries(&self) -> &[ConsoleEntry] {
        &self.entries
    }

    /// Messages at `Log` level, in order
    pub fn messages(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.level == ConsoleLevel::Log)
            .map(|entry| entry.message.as_str())
            .collect()
    }

    /// Messages at `Error` level, in order
    pub fn errors(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.level == ConsoleLevel::Error)
            .map(|entry| entry.message.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
