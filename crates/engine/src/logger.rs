//! Output and confirmation sinks used by the installer
//!
//! The installer never prints directly; every message goes through a
//! [`Logger`]. [`TracingLogger`] is the terminal implementation and
//! [`MemoryLogger`] records messages for embedding and tests.

use dialoguer::{Confirm, theme::ColorfulTheme};
use std::cell::RefCell;
use std::io::IsTerminal;

/// Message sink for installer decisions
pub trait Logger {
    /// A handled failure
    fn error(&self, msg: &str);

    /// Something was skipped on purpose
    fn warn(&self, msg: &str);

    /// Decision details, only emitted when debugging is enabled
    fn debug(&self, msg: &str);

    /// What a dry run would have done
    fn dry(&self, msg: &str);

    /// A destination was changed
    fn success(&self, msg: &str);

    /// Plain informational line
    fn log(&self, msg: &str);

    /// Ask a yes/no question, `true` means go ahead
    fn confirm(&self, msg: &str) -> bool;
}

/// Logger that emits tracing events and prompts on the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn dry(&self, msg: &str) {
        tracing::info!(dry_run = true, "[DRY] {msg}");
    }

    fn success(&self, msg: &str) {
        tracing::info!("-> {msg}");
    }

    fn log(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn confirm(&self, msg: &str) -> bool {
        // Without a terminal there is nobody to say yes
        if !std::io::stdin().is_terminal() {
            tracing::debug!(prompt = msg, "No terminal, declining");
            return false;
        }

        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(msg)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Severity of a recorded message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// [`Logger::error`]
    Error,
    /// [`Logger::warn`]
    Warn,
    /// [`Logger::debug`]
    Debug,
    /// [`Logger::dry`]
    Dry,
    /// [`Logger::success`]
    Success,
    /// [`Logger::log`]
    Log,
    /// [`Logger::confirm`]
    Prompt,
}

/// Logger that keeps every message in memory
///
/// Prompts are answered with a fixed value.
///
/// # Examples
///
/// ```
/// use dotdrop_engine::logger::{Level, Logger, MemoryLogger};
///
/// let logger = MemoryLogger::answering(false);
/// assert!(!logger.confirm("Overwrite?"));
/// assert_eq!(logger.count(Level::Prompt), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryLogger {
    answer: bool,
    entries: RefCell<Vec<(Level, String)>>,
}

impl MemoryLogger {
    /// Create a logger whose prompts are all answered with `answer`
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            entries: RefCell::new(Vec::new()),
        }
    }

    /// All recorded messages in order
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    /// Messages recorded at `level`
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Number of messages recorded at `level`
    pub fn count(&self, level: Level) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    fn record(&self, level: Level, msg: &str) {
        self.entries.borrow_mut().push((level, msg.to_string()));
    }
}

impl Logger for MemoryLogger {
    fn error(&self, msg: &str) {
        self.record(Level::Error, msg);
    }

    fn warn(&self, msg: &str) {
        self.record(Level::Warn, msg);
    }

    fn debug(&self, msg: &str) {
        self.record(Level::Debug, msg);
    }

    fn dry(&self, msg: &str) {
        self.record(Level::Dry, msg);
    }

    fn success(&self, msg: &str) {
        self.record(Level::Success, msg);
    }

    fn log(&self, msg: &str) {
        self.record(Level::Log, msg);
    }

    fn confirm(&self, msg: &str) -> bool {
        self.record(Level::Prompt, msg);
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_records_in_order() {
        let logger = MemoryLogger::default();
        logger.log("one");
        logger.error("two");
        logger.success("three");

        assert_eq!(
            logger.entries(),
            vec![
                (Level::Log, "one".to_string()),
                (Level::Error, "two".to_string()),
                (Level::Success, "three".to_string()),
            ]
        );
    }

    #[test]
    fn test_memory_logger_answers() {
        assert!(MemoryLogger::answering(true).confirm("go?"));
        assert!(!MemoryLogger::answering(false).confirm("go?"));
        assert!(!MemoryLogger::default().confirm("go?"));
    }

    #[test]
    fn test_memory_logger_filter_and_clear() {
        let logger = MemoryLogger::default();
        logger.warn("a");
        logger.warn("b");
        logger.dry("c");

        assert_eq!(logger.messages(Level::Warn), vec!["a", "b"]);
        assert_eq!(logger.count(Level::Dry), 1);

        logger.clear();
        assert!(logger.entries().is_empty());
    }
}
